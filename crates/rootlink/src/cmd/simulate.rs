use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tracing::info;

use rootlink_frame::{decode_frame, encode_frame, Device};
use rootlink_session::{
    CancelToken, Session, SessionConfig, SystemClock, ROOT_DEVICE_NAME, ROOT_NOTIFY_UUID,
    ROOT_WRITE_UUID,
};
use rootlink_transport::SimTransport;

use crate::cmd::SimulateArgs;
use crate::exit::{session_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_frame, OutputFormat};

/// Exercise the whole stack without hardware: discovery against a flaky
/// simulated robot, a couple of outbound commands, scripted battery
/// telemetry routed back through the dispatcher.
pub fn run(args: SimulateArgs, format: OutputFormat) -> CliResult<i32> {
    let transport = Arc::new(
        SimTransport::new(ROOT_DEVICE_NAME, ROOT_WRITE_UUID, ROOT_NOTIFY_UUID)
            .advertise_after(args.advertise_after)
            .resolve_endpoints_after(args.resolve_after),
    );

    let cancel = CancelToken::new();
    install_ctrlc_handler(cancel.clone())?;

    // Short intervals keep the simulated retries snappy.
    let config = SessionConfig {
        scan_interval: Duration::from_millis(100),
        resolve_interval: Duration::from_millis(100),
        ..SessionConfig::default()
    };
    let session = Session::connect_with(Arc::clone(&transport), config, &SystemClock, cancel)
        .map_err(|err| session_error("session setup failed", err))?;
    info!(
        device = %session.connection().device.name,
        polls = transport.device_polls(),
        "simulated robot connected"
    );

    session.register_handler(Device::Battery, move |raw| {
        if let Ok(frame) = decode_frame(raw) {
            print_frame(&frame, raw, format);
        }
    });

    session
        .set_lights(1, 0, 255, 0)
        .map_err(|err| session_error("lights command failed", err))?;
    session
        .drive(100, 100)
        .map_err(|err| session_error("drive command failed", err))?;
    session
        .drive(0, 0)
        .map_err(|err| session_error("stop command failed", err))?;

    for n in 0..args.telemetry {
        let percent = 100u8.saturating_sub(n as u8);
        let mut telemetry = BytesMut::new();
        encode_frame(Device::Battery.into(), 0, &[percent], &mut telemetry)
            .map_err(|err| crate::exit::frame_error("telemetry fixture failed", err))?;
        transport.notify(&telemetry);
    }

    info!(
        writes = transport.writes().len(),
        dropped = session.dropped_frames(),
        "simulation complete"
    );
    session
        .close()
        .map_err(|err| session_error("close failed", err))?;
    Ok(SUCCESS)
}

fn install_ctrlc_handler(cancel: CancelToken) -> CliResult<()> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .map_err(|err| {
        CliError::new(
            INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

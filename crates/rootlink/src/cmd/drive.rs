use bytes::BytesMut;

use rootlink_frame::command::{motor_speed_payload, MOTORS_SET_SPEED};
use rootlink_frame::{decode_frame, encode_frame, Device};

use crate::cmd::DriveArgs;
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DriveArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = motor_speed_payload(args.left, args.right);

    let mut buf = BytesMut::new();
    encode_frame(Device::Motors.into(), MOTORS_SET_SPEED, &payload, &mut buf)
        .map_err(|err| frame_error("encode failed", err))?;

    let frame = decode_frame(&buf).map_err(|err| frame_error("self-check failed", err))?;
    print_frame(&frame, &buf, format);
    Ok(SUCCESS)
}

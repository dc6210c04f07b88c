use clap::{Args, Subcommand};

use rootlink_frame::Device;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod devices;
pub mod drive;
pub mod encode;
pub mod simulate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a frame from device, command and payload.
    Encode(EncodeArgs),
    /// Parse and validate a hex-encoded frame.
    Decode(DecodeArgs),
    /// List known device identifiers.
    Devices(DevicesArgs),
    /// Build the motor set-speed frame for given wheel speeds.
    Drive(DriveArgs),
    /// Run a full session against the simulated transport.
    Simulate(SimulateArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Devices(args) => devices::run(args, format),
        Command::Drive(args) => drive::run(args, format),
        Command::Simulate(args) => simulate::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Target device, by name (e.g. motors) or wire value.
    #[arg(long, short = 'd')]
    pub device: String,
    /// Command id within the device.
    #[arg(long, short = 'c')]
    pub command: u8,
    /// Payload as hex, at most 16 bytes. Default: empty.
    #[arg(long, short = 'p', default_value = "")]
    pub payload: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded frame, checksum byte included.
    pub frame: String,
}

#[derive(Args, Debug, Default)]
pub struct DevicesArgs {}

#[derive(Args, Debug)]
pub struct DriveArgs {
    /// Left wheel speed in mm/s.
    #[arg(long, allow_hyphen_values = true)]
    pub left: i32,
    /// Right wheel speed in mm/s.
    #[arg(long, allow_hyphen_values = true)]
    pub right: i32,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Registry polls before the simulated robot advertises.
    #[arg(long, default_value = "2")]
    pub advertise_after: u32,
    /// Registry polls before endpoints resolve.
    #[arg(long, default_value = "1")]
    pub resolve_after: u32,
    /// Battery telemetry frames to inject.
    #[arg(long, default_value = "3")]
    pub telemetry: u32,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Accepts device names as listed by `devices` (case-insensitive) or raw
/// wire values, including ones outside the known set.
pub fn parse_device(input: &str) -> CliResult<u8> {
    if let Ok(raw) = input.parse::<u8>() {
        return Ok(raw);
    }
    let upper = input.to_ascii_uppercase().replace('-', "_");
    Device::ALL
        .iter()
        .find(|device| rootlink_frame::device_name(u8::from(**device)) == upper)
        .map(|device| u8::from(*device))
        .ok_or_else(|| CliError::new(USAGE, format!("unknown device: {input}")))
}

pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let input = input.trim();
    if input.len() % 2 != 0 {
        return Err(CliError::new(
            USAGE,
            format!("hex string has odd length ({})", input.len()),
        ));
    }
    (0..input.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&input[i..i + 2], 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex at offset {i}")))
        })
        .collect()
}

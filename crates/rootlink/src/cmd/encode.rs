use bytes::BytesMut;

use rootlink_frame::{decode_frame, encode_frame};

use crate::cmd::{parse_device, parse_hex, EncodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let device = parse_device(&args.device)?;
    let payload = parse_hex(&args.payload)?;

    let mut buf = BytesMut::new();
    encode_frame(device, args.command, &payload, &mut buf)
        .map_err(|err| frame_error("encode failed", err))?;

    // Decoding our own output gives the padded-payload view for printing.
    let frame = decode_frame(&buf).map_err(|err| frame_error("self-check failed", err))?;
    print_frame(&frame, &buf, format);
    Ok(SUCCESS)
}

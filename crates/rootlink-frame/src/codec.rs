use bytes::{BufMut, Bytes, BytesMut};

use crate::crc::crc8;
use crate::error::{FrameError, Result};

/// Total wire length of every frame, fixed.
pub const FRAME_LEN: usize = 20;

/// Fixed payload width. Shorter payloads are zero-padded, never truncated.
pub const MAX_PAYLOAD: usize = 16;

/// Minimum decodable length: device + command + one body byte + checksum.
pub const MIN_FRAME_LEN: usize = 4;

/// A decoded, checksum-validated frame.
///
/// `payload` covers everything between the command byte and the checksum,
/// including the reserved byte and any trailing zero padding — the wire
/// format does not carry a payload length, so padding cannot be stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Subsystem the frame targets or originates from. Unknown wire
    /// values are preserved as-is.
    pub device: u8,
    /// Command id within the subsystem.
    pub command: u8,
    /// Body bytes, padding included.
    pub payload: Bytes,
}

/// Encode a frame into the wire format, appending to `dst`.
///
/// Wire format (20 bytes, fixed):
/// ```text
/// ┌───────────┬────────────┬──────────────┬───────────────────┬──────────┐
/// │ Device    │ Command    │ Reserved     │ Payload           │ CRC-8    │
/// │ (1B)      │ (1B)       │ (1B, zero)   │ (16B, zero-pad)   │ (1B)     │
/// └───────────┴────────────┴──────────────┴───────────────────┴──────────┘
/// ```
///
/// The checksum covers the 19 preceding bytes. Fails with
/// [`FrameError::PayloadTooLong`] without writing anything if the payload
/// exceeds [`MAX_PAYLOAD`].
pub fn encode_frame(device: u8, command: u8, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLong {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }

    let start = dst.len();
    dst.reserve(FRAME_LEN);
    dst.put_u8(device);
    dst.put_u8(command);
    dst.put_u8(0); // reserved
    dst.put_slice(payload);
    dst.put_bytes(0, MAX_PAYLOAD - payload.len());

    let checksum = crc8(&dst[start..start + FRAME_LEN - 1]);
    dst.put_u8(checksum);
    Ok(())
}

/// Decode and validate a frame.
///
/// Fails with [`FrameError::FrameTooShort`] below [`MIN_FRAME_LEN`] bytes,
/// or [`FrameError::ChecksumMismatch`] when the recomputed CRC-8 over all
/// bytes except the last does not equal the last byte. Device ids outside
/// the known enumeration are valid and returned unchanged.
pub fn decode_frame(frame: &[u8]) -> Result<Frame> {
    if frame.len() < MIN_FRAME_LEN {
        return Err(FrameError::FrameTooShort {
            size: frame.len(),
            min: MIN_FRAME_LEN,
        });
    }

    let (body, checksum) = frame.split_at(frame.len() - 1);
    let expected = crc8(body);
    if expected != checksum[0] {
        return Err(FrameError::ChecksumMismatch {
            expected,
            actual: checksum[0],
        });
    }

    Ok(Frame {
        device: body[0],
        command: body[1],
        payload: Bytes::copy_from_slice(&body[2..]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;

    fn encode(device: u8, command: u8, payload: &[u8]) -> BytesMut {
        let mut buf = BytesMut::new();
        encode_frame(device, command, payload, &mut buf).unwrap();
        buf
    }

    #[test]
    fn encoded_frames_are_fixed_size() {
        assert_eq!(encode(3, 2, &[]).len(), FRAME_LEN);
        assert_eq!(encode(3, 2, &[0xff; 16]).len(), FRAME_LEN);
    }

    #[test]
    fn short_payload_is_zero_padded() {
        let buf = encode(1, 4, &[0xaa, 0xbb]);
        assert_eq!(buf[3], 0xaa);
        assert_eq!(buf[4], 0xbb);
        assert!(buf[5..FRAME_LEN - 1].iter().all(|&b| b == 0));
    }

    #[test]
    fn reserved_byte_is_zero() {
        let buf = encode(1, 4, &[0xff; 16]);
        assert_eq!(buf[2], 0);
    }

    #[test]
    fn oversized_payload_rejected_without_writing() {
        let mut buf = BytesMut::new();
        let err = encode_frame(1, 4, &[0u8; 17], &mut buf).unwrap_err();
        assert!(matches!(
            err,
            FrameError::PayloadTooLong { size: 17, max: 16 }
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn encode_decode_preserves_checksum_validity() {
        for len in 0..=MAX_PAYLOAD {
            let payload: Vec<u8> = (0..len as u8).collect();
            let buf = encode(7, 9, &payload);
            let frame = decode_frame(&buf).expect("encoder output must validate");
            assert_eq!(frame.device, 7);
            assert_eq!(frame.command, 9);
            assert_eq!(frame.payload.len(), FRAME_LEN - 3);
            assert_eq!(&frame.payload[1..=len], payload.as_slice());
        }
    }

    #[test]
    fn motor_command_vector() {
        // MOTORS set-speed: left 100 mm/s, right -100 mm/s, big-endian i32s.
        let mut payload = Vec::new();
        payload.extend_from_slice(&100i32.to_be_bytes());
        payload.extend_from_slice(&(-100i32).to_be_bytes());

        let buf = encode(Device::Motors.into(), 4, &payload);
        assert_eq!(buf.len(), FRAME_LEN);
        assert_eq!(buf[FRAME_LEN - 1], crc8(&buf[..FRAME_LEN - 1]));

        let frame = decode_frame(&buf).unwrap();
        assert_eq!(frame.device, 1);
        assert_eq!(frame.command, 4);
    }

    #[test]
    fn too_short_rejected() {
        for len in 0..MIN_FRAME_LEN {
            let err = decode_frame(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, FrameError::FrameTooShort { .. }));
        }
    }

    #[test]
    fn minimal_frame_decodes() {
        // device + command + one body byte + checksum: shortest legal frame.
        let body = [14u8, 0, 0x7f];
        let mut wire = body.to_vec();
        wire.push(crc8(&body));

        let frame = decode_frame(&wire).unwrap();
        assert_eq!(frame.device, 14);
        assert_eq!(frame.payload.as_ref(), &[0x7f]);
    }

    #[test]
    fn unknown_device_id_decodes() {
        let buf = encode(99, 1, &[1, 2, 3]);
        let frame = decode_frame(&buf).unwrap();
        assert_eq!(frame.device, 99);
        assert!(Device::from_raw(frame.device).is_none());
    }

    #[test]
    fn every_single_byte_corruption_is_caught() {
        let buf = encode(1, 4, &[0, 0, 0, 100, 0xff, 0xff, 0xff, 0x9c]);
        for byte in 0..FRAME_LEN {
            for bit in 0..8 {
                let mut corrupted = buf.to_vec();
                corrupted[byte] ^= 1 << bit;
                let err = decode_frame(&corrupted).unwrap_err();
                assert!(
                    matches!(err, FrameError::ChecksumMismatch { .. }),
                    "flip of byte {byte} bit {bit} went undetected"
                );
            }
        }
    }
}

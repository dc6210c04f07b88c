//! CRC-8 checksum used by the Root wire protocol.

/// Compute the CRC-8 of a byte sequence.
///
/// Polynomial 0x07, initial value 0, MSB-first bit order, no reflection,
/// no final XOR. The empty sequence checksums to 0.
///
/// Callers pass exactly the bytes to be protected — never the checksum
/// slot itself.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ 0x07;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

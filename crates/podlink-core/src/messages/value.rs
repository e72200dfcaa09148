//! Parameter value codec.
//!
//! Parameter slots travel as 4-byte little-endian blocks. Most are plain
//! IEEE-754 float32; tempo-linked parameters may instead carry a tap-tempo
//! index in a side-channel flag byte, in which case the raw block is ignored
//! and the flag is converted (not bit-cast) to a float value.

/// Read a 4-byte little-endian float32 block.
pub fn decode_float(raw: [u8; 4]) -> f32 {
    f32::from_le_bytes(raw)
}

/// Inverse of [`decode_float`]; bit-exact round trip.
pub fn encode_float(value: f32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Tempo-aware decode: a flag above 1 is a tap-tempo index and wins over the
/// raw block; flags 0 and 1 mean the block carries the value.
pub fn decode_tempo_or_float(raw: [u8; 4], tempo_flag: u8) -> f32 {
    if tempo_flag > 1 {
        f32::from(tempo_flag)
    } else {
        decode_float(raw)
    }
}

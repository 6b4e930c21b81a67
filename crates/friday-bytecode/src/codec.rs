//! Little-endian encoding of the fixed-width values stored in a program image.
//!
//! Readers return `None` when the value would extend past the end of `bytes`.
//! Constants travel as raw 32-bit patterns; whether they hold an integer or a
//! float is decided by the instruction consuming them.

pub fn read_u8(bytes: &[u8], at: usize) -> Option<u8> {
    bytes.get(at).copied()
}

pub fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_le_bytes(read_array(bytes, at)?))
}

pub fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(read_array(bytes, at)?))
}

pub fn read_array<const N: usize>(bytes: &[u8], at: usize) -> Option<[u8; N]> {
    let end = at.checked_add(N)?;
    bytes.get(at..end)?.try_into().ok()
}

pub fn write_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

pub fn write_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Reinterpret a constant's bits as a signed integer.
#[inline]
pub fn bits_to_i32(bits: u32) -> i32 {
    bits as i32
}

/// Reinterpret a constant's bits as a float.
#[inline]
pub fn bits_to_f32(bits: u32) -> f32 {
    f32::from_bits(bits)
}

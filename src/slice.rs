//! Bit-range helpers over single bytes and wider unsigned operands.
//!
//! Bit indices count from the least significant bit: bit 7 is the high bit of a byte. A range is
//! given by two inclusive indices, `begin` (high) and `end` (low). Callers may pass them in either
//! order; they are swapped so that `begin >= end`.

/// Returns a mask with the low `k + 1` bits set. `k >= 31` yields all ones.
#[inline(always)]
pub const fn mask(k: u8) -> u32 {
    if k >= 31 {
        u32::MAX
    } else {
        (1u32 << (k + 1)) - 1
    }
}

#[inline(always)]
fn ordered(begin: u8, end: u8) -> (u8, u8) {
    if begin < end {
        (end, begin)
    } else {
        (begin, end)
    }
}

/// Extracts bits `begin..=end` of `byte`, right-justified.
///
/// `begin` is clamped to 7. A range that lies entirely above bit 7 selects nothing and yields 0.
#[inline]
pub fn get_byte_slice(byte: u8, begin: u8, end: u8) -> u8 {
    let (begin, end) = ordered(begin, end);
    let begin = begin.min(7);
    (u32::from(byte) & mask(begin))
        .checked_shr(u32::from(end))
        .unwrap_or(0) as u8
}

/// Extracts the high `n` bits of `byte`, right-justified.
#[inline]
pub fn get_byte_hi(byte: u8, n: u8) -> u8 {
    if n == 0 {
        return 0;
    }
    get_byte_slice(byte, 7, 8u8.saturating_sub(n))
}

/// Extracts the low `n` bits of `byte`.
#[inline]
pub fn get_byte_low(byte: u8, n: u8) -> u8 {
    if n == 0 {
        return 0;
    }
    get_byte_slice(byte, n - 1, 0)
}

/// Replaces bits `begin..=end` of `byte` with the low bits of `value`.
///
/// Bits above `begin` and below `end` are left as they were. Only the low `begin - end + 1` bits
/// of `value` are used, so an oversized value never spills into neighbouring bits.
pub fn set_byte_slice(byte: &mut u8, begin: u8, end: u8, value: u8) {
    let (begin, end) = ordered(begin, end);
    let begin = begin.min(7);
    if end > begin {
        return;
    }

    let high = u32::from(get_byte_hi(*byte, 7 - begin)) << (begin + 1);
    let mid = (u32::from(value) & mask(begin - end)) << end;
    let low = u32::from(get_byte_low(*byte, end));

    *byte = (high | mid | low) as u8;
}

/// Replaces the high `n` bits of `byte` with the low `n` bits of `value`.
#[inline]
pub fn set_byte_hi(byte: &mut u8, n: u8, value: u8) {
    if n == 0 {
        return;
    }
    set_byte_slice(byte, 7, 8u8.saturating_sub(n), value);
}

/// Replaces the low `n` bits of `byte` with the low `n` bits of `value`.
#[inline]
pub fn set_byte_low(byte: &mut u8, n: u8, value: u8) {
    if n == 0 {
        return;
    }
    set_byte_slice(byte, n - 1, 0, value);
}

/// Extracts bits `begin..=end` of a 16-bit operand, right-justified.
///
/// Unlike [`get_byte_slice`], `begin` is not clamped to a byte.
#[inline]
pub fn get_short_slice(value: u16, begin: u8, end: u8) -> u16 {
    let (begin, end) = ordered(begin, end);
    (u32::from(value) & mask(begin))
        .checked_shr(u32::from(end))
        .unwrap_or(0) as u16
}

/// Extracts bits `begin..=end` of a 32-bit operand, right-justified.
#[inline]
pub fn get_int_slice(value: u32, begin: u8, end: u8) -> u32 {
    let (begin, end) = ordered(begin, end);
    (value & mask(begin)).checked_shr(u32::from(end)).unwrap_or(0)
}

use crate::slice::{
    get_byte_hi, get_byte_low, get_byte_slice, get_int_slice, set_byte_hi, set_byte_low,
    set_byte_slice,
};
use crate::{CodecError, Mode, Result};

/// Widest field a single get or set may address.
pub const MAX_FIELD_BITS: u8 = 32;

/// Bit-granular cursor over a fixed-capacity buffer.
///
/// Bits are addressed MSB-first: bit position 0 is bit 7 of the first byte. A field of 1 to 32
/// bits may start at any bit position and cross any number of byte boundaries; it is read and
/// written as an unsigned integer whose most significant bit comes first in the buffer.
///
/// Sequential operations (`get_bit`, `set_bit`, ...) consume bits at the cursor. Positional
/// operations (`*_by_pos`) address an absolute bit position and leave the cursor alone, which is
/// how a finished field (a length, a checksum) is patched in after the fact.
///
/// Errors follow the same rules as [`crate::ByteStream`]: each failure is returned and also
/// recorded, replacing the previously recorded error, and never has side effects on the cursor
/// or the buffer.
pub struct BitStream<B> {
    buf: B,
    bit: usize,
    error: Option<CodecError>,
}

impl<B: AsRef<[u8]>> BitStream<B> {
    /// Binds a stream to `buf` in decode mode. The buffer is left exactly as supplied.
    pub fn decode(buf: B) -> Self {
        Self {
            buf,
            bit: 0,
            error: None,
        }
    }

    /// The most recent error recorded by this stream, or `None` if no operation has failed.
    #[inline(always)]
    pub fn error(&self) -> Option<CodecError> {
        self.error
    }

    /// The cursor, as a bit offset from the start of the buffer.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.bit
    }

    /// The byte that contains the cursor, i.e. `position() / 8`.
    #[inline(always)]
    pub fn byte_position(&self) -> usize {
        self.bit / 8
    }

    /// The number of bits consumed (decode) or produced (encode) so far. This is the cursor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bit
    }

    /// Returns `true` if the cursor is still at the start of the buffer.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bit == 0
    }

    /// The capacity of the stream in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// The capacity of the stream in bits.
    #[inline(always)]
    pub fn capacity_bits(&self) -> usize {
        self.capacity().saturating_mul(8)
    }

    /// The number of bits between the cursor and the end of the buffer.
    #[inline(always)]
    pub fn remaining_bits(&self) -> usize {
        self.capacity_bits() - self.bit
    }

    /// The whole underlying buffer.
    #[inline(always)]
    pub fn buffer(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// The bytes touched by the cursor so far, including a partially filled last byte.
    #[inline(always)]
    pub fn filled(&self) -> &[u8] {
        &self.buf.as_ref()[..self.bit.div_ceil(8)]
    }

    /// Releases the underlying buffer.
    #[inline(always)]
    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Moves the cursor forward by `n` bits.
    ///
    /// This check is stricter than the one used by reads and writes: `forward` fails with
    /// [`CodecError::MoveOverrun`] when `position() + n >= capacity_bits()`, so it can never
    /// reach the end of the buffer, while `get_bit(1)` on the last bit is allowed and leaves the
    /// cursor exactly at `capacity_bits()`.
    pub fn forward(&mut self, n: usize) -> Result<()> {
        match self.bit.checked_add(n) {
            Some(end) if end < self.capacity_bits() => {
                self.bit = end;
                Ok(())
            }
            _ => self.fail(CodecError::MoveOverrun, "forward", self.bit, n),
        }
    }

    /// Reads an `n`-bit field at the cursor and advances past it.
    ///
    /// Fails with [`CodecError::GetZeroWidth`] if `n == 0`, and with [`CodecError::GetOverrun`]
    /// if `n > 32` or the field would extend past the end of the buffer.
    pub fn get_bit(&mut self, n: u8) -> Result<u32> {
        let pos = self.bit;
        let value = self.read_field(pos, n, "get_bit")?;
        self.bit = pos + usize::from(n);
        Ok(value)
    }

    /// Reads 8 bits at the cursor.
    pub fn get_byte(&mut self) -> Result<u8> {
        Ok(self.get_bit(8)? as u8)
    }

    /// Reads 16 bits at the cursor.
    pub fn get_word(&mut self) -> Result<u16> {
        Ok(self.get_bit(16)? as u16)
    }

    /// Reads 32 bits at the cursor.
    pub fn get_dword(&mut self) -> Result<u32> {
        self.get_bit(32)
    }

    /// Reads an `n`-bit field starting at bit `pos`. The cursor is not used and not changed.
    ///
    /// The field may end exactly at the end of the buffer.
    pub fn get_bit_by_pos(&mut self, pos: usize, n: u8) -> Result<u32> {
        self.read_field(pos, n, "get_bit_by_pos")
    }

    /// Reads 8 bits starting at bit `pos`.
    pub fn get_byte_by_pos(&mut self, pos: usize) -> Result<u8> {
        Ok(self.read_field(pos, 8, "get_byte_by_pos")? as u8)
    }

    /// Reads 16 bits starting at bit `pos`.
    pub fn get_word_by_pos(&mut self, pos: usize) -> Result<u16> {
        Ok(self.read_field(pos, 16, "get_word_by_pos")? as u16)
    }

    /// Reads 32 bits starting at bit `pos`.
    pub fn get_dword_by_pos(&mut self, pos: usize) -> Result<u32> {
        self.read_field(pos, 32, "get_dword_by_pos")
    }

    fn read_field(&mut self, pos: usize, n: u8, op: &'static str) -> Result<u32> {
        self.check_field(pos, n, CodecError::GetZeroWidth, CodecError::GetOverrun, op)?;
        Ok(read_bits(self.buf.as_ref(), pos, n))
    }

    fn check_field(
        &mut self,
        pos: usize,
        n: u8,
        zero_width: CodecError,
        overrun: CodecError,
        op: &'static str,
    ) -> Result<()> {
        let width = usize::from(n);
        if n == 0 {
            return self.fail(zero_width, op, pos, width);
        }
        if n > MAX_FIELD_BITS {
            return self.fail(overrun, op, pos, width);
        }
        match pos.checked_add(width) {
            Some(end) if end <= self.capacity_bits() => Ok(()),
            _ => self.fail(overrun, op, pos, width),
        }
    }

    fn fail<T>(
        &mut self,
        err: CodecError,
        op: &'static str,
        pos: usize,
        width: usize,
    ) -> Result<T> {
        log::debug!(
            "bit stream: {op} of {width} bits failed at bit {pos} of {}: {err}",
            self.capacity_bits()
        );
        self.error = Some(err);
        Err(err)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BitStream<B> {
    /// Binds a stream to `buf` in encode mode. The whole buffer is zero-filled.
    pub fn encode(buf: B) -> Self {
        Self::with_mode(buf, Mode::Encode)
    }

    /// Binds a stream to `buf`, zero-filling it if `mode` is [`Mode::Encode`].
    pub fn with_mode(mut buf: B, mode: Mode) -> Self {
        if mode == Mode::Encode {
            buf.as_mut().fill(0);
        }
        Self::decode(buf)
    }

    /// The whole underlying buffer, mutably.
    #[inline(always)]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.buf.as_mut()
    }

    /// Writes the low `n` bits of `value` at the cursor and advances past them.
    ///
    /// Bits of the first and last byte that lie outside the field keep their values. Fails with
    /// [`CodecError::SetZeroWidth`] if `n == 0`, and with [`CodecError::SetOverrun`] if `n > 32`
    /// or the field would extend past the end of the buffer.
    pub fn set_bit(&mut self, n: u8, value: u32) -> Result<()> {
        let pos = self.bit;
        self.write_field(pos, n, value, "set_bit")?;
        self.bit = pos + usize::from(n);
        Ok(())
    }

    /// Writes 8 bits at the cursor.
    pub fn set_byte(&mut self, value: u8) -> Result<()> {
        self.set_bit(8, value.into())
    }

    /// Writes 16 bits at the cursor.
    pub fn set_word(&mut self, value: u16) -> Result<()> {
        self.set_bit(16, value.into())
    }

    /// Writes 32 bits at the cursor.
    pub fn set_dword(&mut self, value: u32) -> Result<()> {
        self.set_bit(32, value)
    }

    /// Writes the low `n` bits of `value` starting at bit `pos`. The cursor is not used and not
    /// changed.
    pub fn set_bit_by_pos(&mut self, pos: usize, n: u8, value: u32) -> Result<()> {
        self.write_field(pos, n, value, "set_bit_by_pos")
    }

    /// Writes 8 bits starting at bit `pos`.
    pub fn set_byte_by_pos(&mut self, pos: usize, value: u8) -> Result<()> {
        self.write_field(pos, 8, value.into(), "set_byte_by_pos")
    }

    /// Writes 16 bits starting at bit `pos`.
    pub fn set_word_by_pos(&mut self, pos: usize, value: u16) -> Result<()> {
        self.write_field(pos, 16, value.into(), "set_word_by_pos")
    }

    /// Writes 32 bits starting at bit `pos`.
    pub fn set_dword_by_pos(&mut self, pos: usize, value: u32) -> Result<()> {
        self.write_field(pos, 32, value, "set_dword_by_pos")
    }

    fn write_field(&mut self, pos: usize, n: u8, value: u32, op: &'static str) -> Result<()> {
        self.check_field(pos, n, CodecError::SetZeroWidth, CodecError::SetOverrun, op)?;
        write_bits(self.buf.as_mut(), pos, n, value);
        Ok(())
    }
}

/// Reads the `n`-bit field at bit `pos`. The caller has already checked the bounds.
///
/// A field spanning several bytes is the concatenation of the tail of the first byte, every
/// interior byte, and the head of the last byte. Each group is shifted in by its own width.
fn read_bits(buf: &[u8], pos: usize, n: u8) -> u32 {
    let last = pos + usize::from(n) - 1;
    let first_byte = pos / 8;
    let last_byte = last / 8;
    let skip = (pos % 8) as u8;
    let tail = (last % 8) as u8 + 1;

    if first_byte == last_byte {
        return get_byte_slice(buf[first_byte], 7 - skip, 8 - tail).into();
    }

    let mut value = u32::from(get_byte_low(buf[first_byte], 8 - skip));
    for &byte in &buf[first_byte + 1..last_byte] {
        value = (value << 8) | u32::from(byte);
    }
    (value << tail) | u32::from(get_byte_hi(buf[last_byte], tail))
}

/// Writes the low `n` bits of `value` at bit `pos`. The caller has already checked the bounds.
///
/// Interior bytes are overwritten whole; the first and last byte only have the field's bits
/// replaced.
fn write_bits(buf: &mut [u8], pos: usize, n: u8, value: u32) {
    let last = pos + usize::from(n) - 1;
    let first_byte = pos / 8;
    let last_byte = last / 8;
    let skip = (pos % 8) as u8;
    let tail = (last % 8) as u8 + 1;

    if first_byte == last_byte {
        set_byte_slice(&mut buf[first_byte], 7 - skip, 8 - tail, value as u8);
        return;
    }

    // `rest` counts the low bits of `value` not yet stored.
    let head = 8 - skip;
    let mut rest = n - head;
    set_byte_low(
        &mut buf[first_byte],
        head,
        get_int_slice(value, n - 1, rest) as u8,
    );
    for byte in &mut buf[first_byte + 1..last_byte] {
        rest -= 8;
        *byte = get_int_slice(value, rest + 7, rest) as u8;
    }
    debug_assert_eq!(rest, tail);
    set_byte_hi(&mut buf[last_byte], tail, get_int_slice(value, tail - 1, 0) as u8);
}

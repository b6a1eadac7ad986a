use core::mem::size_of;
use core::ops::Range;

use zerocopy::byteorder::{BE, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::bit_stream::BitStream;
use crate::slice::set_byte_slice;
use crate::{CodecError, Mode, Result};

/// Byte-granular cursor over a fixed-capacity buffer.
///
/// The capacity is the length of the buffer; the stream never grows or reallocates it. Words and
/// dwords are stored most-significant byte first.
///
/// Every failing operation returns `Err` and also records the error in the stream, replacing any
/// error recorded earlier. A caller can therefore run a whole sequence of operations and check
/// [`ByteStream::error`] once at the end. Failing operations never move the cursor and never
/// modify the buffer.
///
/// The read surface is available for any `B: AsRef<[u8]>`. The write surface additionally needs
/// `B: AsMut<[u8]>`.
pub struct ByteStream<B> {
    buf: B,
    cur: usize,
    error: Option<CodecError>,
}

impl<B: AsRef<[u8]>> ByteStream<B> {
    /// Binds a stream to `buf` in decode mode. The buffer is left exactly as supplied.
    pub fn decode(buf: B) -> Self {
        Self {
            buf,
            cur: 0,
            error: None,
        }
    }

    /// The most recent error recorded by this stream, or `None` if no operation has failed.
    #[inline(always)]
    pub fn error(&self) -> Option<CodecError> {
        self.error
    }

    /// The cursor, as a byte offset from the start of the buffer.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.cur
    }

    /// The number of bytes consumed (decode) or produced (encode) so far. This is the cursor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cur
    }

    /// Returns `true` if the cursor is still at the start of the buffer.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cur == 0
    }

    /// The capacity of the stream in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// The number of bytes between the cursor and the end of the buffer.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.cur
    }

    /// The whole underlying buffer.
    #[inline(always)]
    pub fn buffer(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// The bytes before the cursor.
    #[inline(always)]
    pub fn filled(&self) -> &[u8] {
        &self.buf.as_ref()[..self.cur]
    }

    /// Releases the underlying buffer.
    #[inline(always)]
    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Moves the cursor forward by `n` bytes.
    ///
    /// The cursor may not land on the capacity itself: `forward` fails with
    /// [`CodecError::MoveOverrun`] if `position() + n >= capacity()`, even though a sequence of
    /// reads may legitimately consume the last byte.
    pub fn forward(&mut self, n: usize) -> Result<()> {
        match self.cur.checked_add(n) {
            Some(end) if end < self.capacity() => {
                self.cur = end;
                Ok(())
            }
            _ => self.fail(CodecError::MoveOverrun, "forward", self.cur),
        }
    }

    /// Moves the cursor back by `n` bytes. Fails with [`CodecError::MoveOverrun`] if `n` is larger
    /// than the cursor.
    pub fn back(&mut self, n: usize) -> Result<()> {
        match self.cur.checked_sub(n) {
            Some(start) => {
                self.cur = start;
                Ok(())
            }
            None => self.fail(CodecError::MoveOverrun, "back", self.cur),
        }
    }

    /// Reads a single byte at the cursor.
    pub fn get_byte(&mut self) -> Result<u8> {
        let value = self.read_at::<u8>(self.cur, "get_byte")?;
        self.cur += 1;
        Ok(value)
    }

    /// Reads a big-endian `u16` at the cursor.
    pub fn get_word(&mut self) -> Result<u16> {
        let value = self.read_at::<U16<BE>>(self.cur, "get_word")?;
        self.cur += 2;
        Ok(value.get())
    }

    /// Reads a big-endian `u32` at the cursor.
    pub fn get_dword(&mut self) -> Result<u32> {
        let value = self.read_at::<U32<BE>>(self.cur, "get_dword")?;
        self.cur += 4;
        Ok(value.get())
    }

    /// Reads the byte at offset `pos`. The cursor is not used and not changed.
    pub fn get_byte_by_pos(&mut self, pos: usize) -> Result<u8> {
        self.read_at::<u8>(pos, "get_byte_by_pos")
    }

    /// Reads a big-endian `u16` at offset `pos`. The cursor is not used and not changed.
    pub fn get_word_by_pos(&mut self, pos: usize) -> Result<u16> {
        Ok(self.read_at::<U16<BE>>(pos, "get_word_by_pos")?.get())
    }

    /// Reads a big-endian `u32` at offset `pos`. The cursor is not used and not changed.
    pub fn get_dword_by_pos(&mut self, pos: usize) -> Result<u32> {
        Ok(self.read_at::<U32<BE>>(pos, "get_dword_by_pos")?.get())
    }

    /// Hands the next `n` bytes over to a [`BitStream`] in decode mode.
    ///
    /// The bit stream starts at the byte cursor. The byte cursor itself does not move; callers
    /// that continue with byte access afterwards must step over the bit region with
    /// [`ByteStream::forward`].
    pub fn bit_stream(&mut self, n: usize) -> Result<BitStream<&[u8]>> {
        match self.span(self.cur, n) {
            Some(range) => Ok(BitStream::decode(&self.buf.as_ref()[range])),
            None => self.fail(CodecError::GetOverrun, "bit_stream", self.cur),
        }
    }

    fn span(&self, pos: usize, len: usize) -> Option<Range<usize>> {
        let end = pos.checked_add(len)?;
        (end <= self.capacity()).then_some(pos..end)
    }

    fn read_at<T: FromBytes>(&mut self, pos: usize, op: &'static str) -> Result<T> {
        let value = self
            .span(pos, size_of::<T>())
            .and_then(|range| T::read_from_bytes(&self.buf.as_ref()[range]).ok());
        match value {
            Some(value) => Ok(value),
            None => self.fail(CodecError::GetOverrun, op, pos),
        }
    }

    fn fail<T>(&mut self, err: CodecError, op: &'static str, pos: usize) -> Result<T> {
        log::debug!(
            "byte stream: {op} failed at byte {pos} of {}: {err}",
            self.capacity()
        );
        self.error = Some(err);
        Err(err)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ByteStream<B> {
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

    /// Writes a single byte at the cursor.
    pub fn set_byte(&mut self, value: u8) -> Result<()> {
        self.write_at(self.cur, value, "set_byte")?;
        self.cur += 1;
        Ok(())
    }

    /// Writes a big-endian `u16` at the cursor.
    pub fn set_word(&mut self, value: u16) -> Result<()> {
        self.write_at(self.cur, U16::<BE>::new(value), "set_word")?;
        self.cur += 2;
        Ok(())
    }

    /// Writes a big-endian `u32` at the cursor.
    pub fn set_dword(&mut self, value: u32) -> Result<()> {
        self.write_at(self.cur, U32::<BE>::new(value), "set_dword")?;
        self.cur += 4;
        Ok(())
    }

    /// Replaces bits `begin..=end` of the byte just written (the byte before the cursor).
    ///
    /// Does nothing if no byte has been written yet. A `begin` above 7 records
    /// [`CodecError::SetOverrun`]; the patch is still applied with `begin` clamped to 7, and the
    /// error is returned.
    pub fn set_byte_slice(&mut self, begin: u8, end: u8, value: u8) -> Result<()> {
        let clamped = begin.max(end) > 7;
        if let Some(last) = self.cur.checked_sub(1) {
            set_byte_slice(&mut self.buf.as_mut()[last], begin, end, value);
        }
        if clamped {
            return self.fail(CodecError::SetOverrun, "set_byte_slice", self.cur);
        }
        Ok(())
    }

    /// Writes a byte at offset `pos`. The cursor is not used and not changed.
    pub fn set_byte_by_pos(&mut self, pos: usize, value: u8) -> Result<()> {
        self.write_at(pos, value, "set_byte_by_pos")
    }

    /// Writes a big-endian `u16` at offset `pos`. The cursor is not used and not changed.
    ///
    /// This is the usual way to back-patch a length prefix once the length is known.
    pub fn set_word_by_pos(&mut self, pos: usize, value: u16) -> Result<()> {
        self.write_at(pos, U16::<BE>::new(value), "set_word_by_pos")
    }

    /// Writes a big-endian `u32` at offset `pos`. The cursor is not used and not changed.
    pub fn set_dword_by_pos(&mut self, pos: usize, value: u32) -> Result<()> {
        self.write_at(pos, U32::<BE>::new(value), "set_dword_by_pos")
    }

    /// Hands the next `n` bytes over to a writable [`BitStream`].
    ///
    /// The region is not zero-filled again: an encode-mode stream already zero-filled the whole
    /// buffer when it was created, and a decode-mode stream keeps its contents. As with
    /// [`ByteStream::bit_stream`], the byte cursor does not move.
    pub fn bit_stream_mut(&mut self, n: usize) -> Result<BitStream<&mut [u8]>> {
        match self.span(self.cur, n) {
            Some(range) => Ok(BitStream::decode(&mut self.buf.as_mut()[range])),
            None => self.fail(CodecError::SetOverrun, "bit_stream_mut", self.cur),
        }
    }

    fn write_at<T: IntoBytes + Immutable>(
        &mut self,
        pos: usize,
        value: T,
        op: &'static str,
    ) -> Result<()> {
        match self.span(pos, size_of::<T>()) {
            Some(range) => {
                self.buf.as_mut()[range].copy_from_slice(value.as_bytes());
                Ok(())
            }
            None => self.fail(CodecError::SetOverrun, op, pos),
        }
    }
}

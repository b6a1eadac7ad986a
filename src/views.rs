//! Read-only and write-only facades over [`ByteStream`] and [`BitStream`].
//!
//! An input view borrows `&[u8]` and only offers reads and navigation, so a decoder cannot
//! modify the message it is parsing. An output view borrows `&mut [u8]`, zero-fills it when it is
//! created and only offers writes.

use crate::{BitStream, ByteStream, CodecError, Result};

/// Decode-mode byte stream that can only read.
pub struct InputByteStream<'a>(ByteStream<&'a [u8]>);

impl<'a> InputByteStream<'a> {
    /// Binds to `buf`, leaving its contents as they are.
    #[inline(always)]
    pub fn new(buf: &'a [u8]) -> Self {
        Self(ByteStream::decode(buf))
    }

    /// See [`ByteStream::forward`].
    #[inline(always)]
    pub fn forward(&mut self, n: usize) -> Result<()> {
        self.0.forward(n)
    }

    /// See [`ByteStream::back`].
    #[inline(always)]
    pub fn back(&mut self, n: usize) -> Result<()> {
        self.0.back(n)
    }

    /// Reads a byte at the cursor.
    #[inline(always)]
    pub fn get_byte(&mut self) -> Result<u8> {
        self.0.get_byte()
    }

    /// Reads a big-endian `u16` at the cursor.
    #[inline(always)]
    pub fn get_word(&mut self) -> Result<u16> {
        self.0.get_word()
    }

    /// Reads a big-endian `u32` at the cursor.
    #[inline(always)]
    pub fn get_dword(&mut self) -> Result<u32> {
        self.0.get_dword()
    }

    /// Reads the byte at offset `pos` without touching the cursor.
    #[inline(always)]
    pub fn get_byte_by_pos(&mut self, pos: usize) -> Result<u8> {
        self.0.get_byte_by_pos(pos)
    }

    /// Reads a big-endian `u16` at offset `pos` without touching the cursor.
    #[inline(always)]
    pub fn get_word_by_pos(&mut self, pos: usize) -> Result<u16> {
        self.0.get_word_by_pos(pos)
    }

    /// Reads a big-endian `u32` at offset `pos` without touching the cursor.
    #[inline(always)]
    pub fn get_dword_by_pos(&mut self, pos: usize) -> Result<u32> {
        self.0.get_dword_by_pos(pos)
    }

    /// Decodes the next `n` bytes bit by bit. See [`ByteStream::bit_stream`].
    #[inline(always)]
    pub fn bit_stream(&mut self, n: usize) -> Result<InputBitStream<'_>> {
        self.0.bit_stream(n).map(InputBitStream)
    }

    /// The cursor, in bytes.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.0.position()
    }

    /// The number of bytes consumed so far.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been consumed yet.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The capacity in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// The number of bytes left after the cursor.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.0.remaining()
    }

    /// The most recent error, if any.
    #[inline(always)]
    pub fn error(&self) -> Option<CodecError> {
        self.0.error()
    }

    /// Returns the underlying stream.
    #[inline(always)]
    pub fn into_inner(self) -> ByteStream<&'a [u8]> {
        self.0
    }
}

impl<'a> From<ByteStream<&'a [u8]>> for InputByteStream<'a> {
    fn from(stream: ByteStream<&'a [u8]>) -> Self {
        Self(stream)
    }
}

/// Encode-mode byte stream that can only write.
pub struct OutputByteStream<'a>(ByteStream<&'a mut [u8]>);

impl<'a> OutputByteStream<'a> {
    /// Binds to `buf` and zero-fills it. This is the only way to create an output view.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self(ByteStream::encode(buf))
    }

    /// Steps over `n` bytes, typically a region filled through [`OutputByteStream::bit_stream`].
    /// See [`ByteStream::forward`].
    #[inline(always)]
    pub fn forward(&mut self, n: usize) -> Result<()> {
        self.0.forward(n)
    }

    /// Writes a byte at the cursor.
    #[inline(always)]
    pub fn set_byte(&mut self, value: u8) -> Result<()> {
        self.0.set_byte(value)
    }

    /// Writes a big-endian `u16` at the cursor.
    #[inline(always)]
    pub fn set_word(&mut self, value: u16) -> Result<()> {
        self.0.set_word(value)
    }

    /// Writes a big-endian `u32` at the cursor.
    #[inline(always)]
    pub fn set_dword(&mut self, value: u32) -> Result<()> {
        self.0.set_dword(value)
    }

    /// See [`ByteStream::set_byte_slice`].
    #[inline(always)]
    pub fn set_byte_slice(&mut self, begin: u8, end: u8, value: u8) -> Result<()> {
        self.0.set_byte_slice(begin, end, value)
    }

    /// Writes a byte at offset `pos` without touching the cursor.
    #[inline(always)]
    pub fn set_byte_by_pos(&mut self, pos: usize, value: u8) -> Result<()> {
        self.0.set_byte_by_pos(pos, value)
    }

    /// Writes a big-endian `u16` at offset `pos` without touching the cursor.
    #[inline(always)]
    pub fn set_word_by_pos(&mut self, pos: usize, value: u16) -> Result<()> {
        self.0.set_word_by_pos(pos, value)
    }

    /// Writes a big-endian `u32` at offset `pos` without touching the cursor.
    #[inline(always)]
    pub fn set_dword_by_pos(&mut self, pos: usize, value: u32) -> Result<()> {
        self.0.set_dword_by_pos(pos, value)
    }

    /// Encodes the next `n` bytes bit by bit. See [`ByteStream::bit_stream_mut`].
    #[inline(always)]
    pub fn bit_stream(&mut self, n: usize) -> Result<OutputBitStream<'_>> {
        self.0.bit_stream_mut(n).map(OutputBitStream)
    }

    /// The cursor, in bytes.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.0.position()
    }

    /// The number of bytes produced so far.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been written at the cursor yet.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The capacity in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// The number of bytes left after the cursor.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.0.remaining()
    }

    /// The most recent error, if any.
    #[inline(always)]
    pub fn error(&self) -> Option<CodecError> {
        self.0.error()
    }

    /// The whole output buffer.
    #[inline(always)]
    pub fn buffer(&self) -> &[u8] {
        self.0.buffer()
    }

    /// The bytes produced so far, ready to hand to a transport.
    #[inline(always)]
    pub fn filled(&self) -> &[u8] {
        self.0.filled()
    }

    /// Returns the underlying stream.
    #[inline(always)]
    pub fn into_inner(self) -> ByteStream<&'a mut [u8]> {
        self.0
    }
}

/// Decode-mode bit stream that can only read.
pub struct InputBitStream<'a>(BitStream<&'a [u8]>);

impl<'a> InputBitStream<'a> {
    /// Binds to `buf`, leaving its contents as they are.
    #[inline(always)]
    pub fn new(buf: &'a [u8]) -> Self {
        Self(BitStream::decode(buf))
    }

    /// See [`BitStream::forward`].
    #[inline(always)]
    pub fn forward(&mut self, n: usize) -> Result<()> {
        self.0.forward(n)
    }

    /// See [`BitStream::get_bit`].
    #[inline(always)]
    pub fn get_bit(&mut self, n: u8) -> Result<u32> {
        self.0.get_bit(n)
    }

    /// Reads 8 bits at the cursor.
    #[inline(always)]
    pub fn get_byte(&mut self) -> Result<u8> {
        self.0.get_byte()
    }

    /// Reads 16 bits at the cursor.
    #[inline(always)]
    pub fn get_word(&mut self) -> Result<u16> {
        self.0.get_word()
    }

    /// Reads 32 bits at the cursor.
    #[inline(always)]
    pub fn get_dword(&mut self) -> Result<u32> {
        self.0.get_dword()
    }

    /// See [`BitStream::get_bit_by_pos`].
    #[inline(always)]
    pub fn get_bit_by_pos(&mut self, pos: usize, n: u8) -> Result<u32> {
        self.0.get_bit_by_pos(pos, n)
    }

    /// Reads 8 bits at bit `pos` without touching the cursor.
    #[inline(always)]
    pub fn get_byte_by_pos(&mut self, pos: usize) -> Result<u8> {
        self.0.get_byte_by_pos(pos)
    }

    /// Reads 16 bits at bit `pos` without touching the cursor.
    #[inline(always)]
    pub fn get_word_by_pos(&mut self, pos: usize) -> Result<u16> {
        self.0.get_word_by_pos(pos)
    }

    /// Reads 32 bits at bit `pos` without touching the cursor.
    #[inline(always)]
    pub fn get_dword_by_pos(&mut self, pos: usize) -> Result<u32> {
        self.0.get_dword_by_pos(pos)
    }

    /// The cursor, in bits.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.0.position()
    }

    /// The byte containing the cursor.
    #[inline(always)]
    pub fn byte_position(&self) -> usize {
        self.0.byte_position()
    }

    /// The number of bits consumed so far.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been consumed yet.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The capacity in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// The number of bits left after the cursor.
    #[inline(always)]
    pub fn remaining_bits(&self) -> usize {
        self.0.remaining_bits()
    }

    /// The most recent error, if any.
    #[inline(always)]
    pub fn error(&self) -> Option<CodecError> {
        self.0.error()
    }

    /// Returns the underlying stream.
    #[inline(always)]
    pub fn into_inner(self) -> BitStream<&'a [u8]> {
        self.0
    }
}

impl<'a> From<BitStream<&'a [u8]>> for InputBitStream<'a> {
    fn from(stream: BitStream<&'a [u8]>) -> Self {
        Self(stream)
    }
}

/// Encode-mode bit stream that can only write.
pub struct OutputBitStream<'a>(BitStream<&'a mut [u8]>);

impl<'a> OutputBitStream<'a> {
    /// Binds to `buf` and zero-fills it. This is the only way to create an output view.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self(BitStream::encode(buf))
    }

    /// See [`BitStream::set_bit`].
    #[inline(always)]
    pub fn set_bit(&mut self, n: u8, value: u32) -> Result<()> {
        self.0.set_bit(n, value)
    }

    /// Writes 8 bits at the cursor.
    #[inline(always)]
    pub fn set_byte(&mut self, value: u8) -> Result<()> {
        self.0.set_byte(value)
    }

    /// Writes 16 bits at the cursor.
    #[inline(always)]
    pub fn set_word(&mut self, value: u16) -> Result<()> {
        self.0.set_word(value)
    }

    /// Writes 32 bits at the cursor.
    #[inline(always)]
    pub fn set_dword(&mut self, value: u32) -> Result<()> {
        self.0.set_dword(value)
    }

    /// See [`BitStream::set_bit_by_pos`].
    #[inline(always)]
    pub fn set_bit_by_pos(&mut self, pos: usize, n: u8, value: u32) -> Result<()> {
        self.0.set_bit_by_pos(pos, n, value)
    }

    /// Writes 8 bits at bit `pos` without touching the cursor.
    #[inline(always)]
    pub fn set_byte_by_pos(&mut self, pos: usize, value: u8) -> Result<()> {
        self.0.set_byte_by_pos(pos, value)
    }

    /// Writes 16 bits at bit `pos` without touching the cursor.
    #[inline(always)]
    pub fn set_word_by_pos(&mut self, pos: usize, value: u16) -> Result<()> {
        self.0.set_word_by_pos(pos, value)
    }

    /// Writes 32 bits at bit `pos` without touching the cursor.
    #[inline(always)]
    pub fn set_dword_by_pos(&mut self, pos: usize, value: u32) -> Result<()> {
        self.0.set_dword_by_pos(pos, value)
    }

    /// The cursor, in bits.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.0.position()
    }

    /// The byte containing the cursor.
    #[inline(always)]
    pub fn byte_position(&self) -> usize {
        self.0.byte_position()
    }

    /// The number of bits produced so far.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been written at the cursor yet.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The capacity in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// The number of bits left after the cursor.
    #[inline(always)]
    pub fn remaining_bits(&self) -> usize {
        self.0.remaining_bits()
    }

    /// The most recent error, if any.
    #[inline(always)]
    pub fn error(&self) -> Option<CodecError> {
        self.0.error()
    }

    /// The whole output buffer.
    #[inline(always)]
    pub fn buffer(&self) -> &[u8] {
        self.0.buffer()
    }

    /// The bytes touched so far, including a partially filled last byte.
    #[inline(always)]
    pub fn filled(&self) -> &[u8] {
        self.0.filled()
    }

    /// Returns the underlying stream.
    #[inline(always)]
    pub fn into_inner(self) -> BitStream<&'a mut [u8]> {
        self.0
    }
}

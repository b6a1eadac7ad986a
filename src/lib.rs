//! Packs and unpacks unsigned bit fields in fixed-capacity byte buffers.
//!
//! This crate is the layer underneath binary wire-format encoders and decoders whose messages mix
//! byte-aligned fields with sub-byte fields (flags, short counters, variable-width codes). It does
//! not define any message layout itself.
//!
//! * [`ByteStream`] walks a buffer byte by byte and reads or writes bytes, big-endian words and
//!   big-endian dwords. It can hand a region of the buffer over to a [`BitStream`].
//! * [`BitStream`] reads and writes fields of 1 to 32 bits at any bit position, MSB first,
//!   including fields that cross byte boundaries.
//! * The views in [`views`] restrict a stream to reading or to writing, so the capability is part
//!   of the type.
//! * The functions in [`slice`] operate on bit ranges of a single byte or integer.
//!
//! Both streams borrow their buffer and never grow it; the capacity is the buffer length. Both also
//! address bytes and bits by absolute position (`*_by_pos`) without disturbing the cursor, which
//! is how a length prefix or checksum is patched in once it is known.
//!
//! # Errors
//!
//! Every fallible operation returns a [`Result`]. In addition, each failure is recorded in the
//! stream and can be read back with `error()`. A later failure replaces an earlier one, so after
//! a whole sequence of operations `error()` reports the last thing that went wrong. The intended
//! pattern is to treat any recorded error as "this message is invalid":
//!
//! ```
//! use bitpatch::views::OutputBitStream;
//!
//! let mut buf = [0xffu8; 2];
//! let mut out = OutputBitStream::new(&mut buf);
//! let _ = out.set_bit(3, 0b101);
//! let _ = out.set_bit(5, 0b00001);
//! let _ = out.set_byte(0x7e);
//! assert_eq!(out.error(), None);
//! assert_eq!(out.filled(), &[0b1010_0001, 0x7e]);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod bit_stream;
mod byte_stream;
mod error;
pub mod slice;
pub mod views;


pub use bit_stream::{BitStream, MAX_FIELD_BITS};
pub use byte_stream::ByteStream;
pub use error::{CodecError, Result};
pub use views::{InputBitStream, InputByteStream, OutputBitStream, OutputByteStream};

/// Suggested buffer capacity for a single message.
///
/// This is advisory only. Streams enforce the capacity of the buffer they are given, which may be
/// smaller or larger than this.
pub const MAX_BUFFER_LEN: usize = 4096;

/// How a stream treats its buffer when it is created.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    /// The buffer is zero-filled once, before anything is written.
    Encode,
    /// The buffer is left exactly as supplied.
    Decode,
}

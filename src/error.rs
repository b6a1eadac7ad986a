/// Error type shared by every byte and bit stream.
///
/// A stream keeps the most recent of these in its error slot (see `error()` on each stream).
/// Later failures overwrite earlier ones; nothing in this crate clears the slot.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum CodecError {
    /// A read would run past the end of the buffer, or asked for more than 32 bits.
    #[error("read overruns the buffer or exceeds 32 bits")]
    GetOverrun,

    /// A write would run past the end of the buffer, or asked for more than 32 bits.
    #[error("write overruns the buffer or exceeds 32 bits")]
    SetOverrun,

    /// `forward` or `back` would move the cursor outside the buffer.
    #[error("cursor movement overruns the buffer")]
    MoveOverrun,

    /// A read asked for a field of zero bits.
    #[error("read of a zero-width field")]
    GetZeroWidth,

    /// A write asked for a field of zero bits.
    #[error("write of a zero-width field")]
    SetZeroWidth,
}

impl CodecError {
    /// Returns the numeric status code used by existing encoders for this error.
    ///
    /// Code 0 means "no error" and is never returned here; a stream with no error reports `None`
    /// from `error()` instead.
    pub const fn code(self) -> u16 {
        match self {
            Self::GetOverrun => 1,
            Self::SetOverrun => 2,
            Self::MoveOverrun => 3,
            Self::GetZeroWidth => 4,
            Self::SetZeroWidth => 5,
        }
    }
}

/// Result type used by all stream operations.
pub type Result<T> = core::result::Result<T, CodecError>;

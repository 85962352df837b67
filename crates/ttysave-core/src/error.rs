//! The eight error kinds a Save or Load can raise (spec §7).
//!
//! Everything here is fatal except [`Error::BodyChecksumMismatch`], which
//! `Savegame::load` returns alongside a fully-parsed `Savegame` rather than
//! in place of one; the legacy game tolerates a bad trailing checksum, so
//! we surface it as a diagnostic instead of aborting the load.

use crate::layout::MAX_NAME_LEN;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("short read: expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },

    #[error("short write: expected {expected} bytes, got {got}")]
    ShortWrite { expected: usize, got: usize },

    #[error("unexpected end of file while decompressing run-length payload")]
    UnexpectedEof,

    #[error("title checksum mismatch: file has {on_disk:#06x}, computed {computed:#06x}")]
    TitleChecksumMismatch { on_disk: u16, computed: u16 },

    #[error("body checksum mismatch: file has {on_disk:#010x}, computed {computed:#010x}")]
    BodyChecksumMismatch { on_disk: u32, computed: u32 },

    #[error("unsupported tile class {0:#x}")]
    UnsupportedTileClass(u8),

    #[error("payload length mismatch: consumed {consumed} bytes, expected {expected}")]
    PayloadLengthMismatch { consumed: usize, expected: usize },

    #[error("custom string {0:?} exceeds the {MAX_NAME_LEN}-byte limit")]
    CustomStringOverflow(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

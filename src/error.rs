//! Error types for buffer construction, growth, reads and configuration.
//!
//! Every failure is reported through a typed error instead of a sentinel or
//! a silent no-op:
//!
//! - **Allocation**: initial allocation or growth could not obtain storage
//! - **Capacity**: growth would overflow `usize` or exceed the configured cap
//! - **Bounds**: a read or cursor move would leave `[0, capacity]`
//! - **File loading**: stat, open, read and short-read failures
//!
//! Configuration parsing has its own [`ConfigError`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BufferError>;

/// Errors produced by [`ByteBuffer`](crate::ByteBuffer) operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Backing storage of the requested size could not be allocated.
    #[error("could not allocate buffer storage of {requested} bytes")]
    AllocationFailed {
        /// Capacity that was requested.
        requested: usize,
    },

    /// Computing the next capacity overflowed `usize`.
    #[error("buffer capacity overflow growing from {current} bytes")]
    CapacityOverflow {
        /// Capacity at the time of the failed growth.
        current: usize,
    },

    /// The buffer would need to grow beyond its configured maximum.
    #[error("buffer needs {required} bytes but is capped at {limit}")]
    CapacityExceeded {
        /// Capacity needed to complete the write.
        required: usize,
        /// Configured maximum capacity.
        limit: usize,
    },

    /// A read of `len` bytes at `pos` would run past the end of storage.
    #[error("read of {len} bytes at offset {pos} is out of bounds (capacity {size})")]
    OutOfBounds {
        /// Read cursor position.
        pos: usize,
        /// Width of the attempted read.
        len: usize,
        /// Buffer capacity.
        size: usize,
    },

    /// A [`Buf`](crate::Buf) read needed more bytes than remain.
    #[error("buffer underflow: need {needed} bytes, have {remaining}")]
    Underflow {
        /// Width of the attempted read.
        needed: usize,
        /// Bytes left before the end.
        remaining: usize,
    },

    /// A skip or seek targeted a position past the end of storage.
    #[error("cursor target {target} is out of range (capacity {size})")]
    CursorOutOfRange {
        /// Requested cursor position.
        target: usize,
        /// Buffer capacity.
        size: usize,
    },

    /// The file's metadata could not be read.
    #[error("could not stat {}: {source}", path.display())]
    Stat {
        /// Path that was loaded.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file could not be opened for reading.
    #[error("could not open file {} for caching: {source}", path.display())]
    Open {
        /// Path that was loaded.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The bulk read ended before the file's reported size was reached.
    #[error("could not cache file {} of size {expected}: read {actual} bytes", path.display())]
    ShortRead {
        /// Path that was loaded.
        path: PathBuf,
        /// Size reported by the filesystem.
        expected: usize,
        /// Bytes actually read.
        actual: usize,
    },

    /// The file is larger than the configured load limit.
    #[error("file {} of size {size} exceeds load limit of {limit} bytes", path.display())]
    FileTooLarge {
        /// Path that was loaded.
        path: PathBuf,
        /// Size reported by the filesystem.
        size: u64,
        /// Configured limit.
        limit: u64,
    },

    /// An I/O error occurred during the bulk read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BufferError {
    /// Returns true if this error came from the filesystem.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(
            self,
            Self::Stat { .. }
                | Self::Open { .. }
                | Self::ShortRead { .. }
                | Self::FileTooLarge { .. }
                | Self::Io(_)
        )
    }

    /// Returns true if this error is a read or cursor bounds violation.
    #[must_use]
    pub const fn is_bounds(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. } | Self::Underflow { .. } | Self::CursorOutOfRange { .. }
        )
    }

    /// Returns true if this error came from allocating or growing storage.
    #[must_use]
    pub const fn is_capacity(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailed { .. }
                | Self::CapacityOverflow { .. }
                | Self::CapacityExceeded { .. }
        )
    }
}

/// Errors produced while building a [`BufferConfig`](crate::BufferConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to a value that does not parse.
    #[error("invalid value for {var}: got {value:?} ({reason})")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value found in the environment.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The configuration is internally inconsistent.
    #[error("invalid buffer config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let bounds = BufferError::OutOfBounds {
            pos: 4,
            len: 2,
            size: 5,
        };
        assert!(bounds.is_bounds());
        assert!(!bounds.is_io());
        assert!(!bounds.is_capacity());

        let grow = BufferError::CapacityExceeded {
            required: 10,
            limit: 8,
        };
        assert!(grow.is_capacity());
        assert!(!grow.is_bounds());

        let io = BufferError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(io.is_io());
    }

    #[test]
    fn test_error_display_names_path() {
        let err = BufferError::ShortRead {
            path: PathBuf::from("/tmp/data.bin"),
            expected: 10,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/data.bin"));
        assert!(msg.contains("size 10"));
        assert!(msg.contains("read 3 bytes"));
    }

    #[test]
    fn test_open_error_keeps_os_text() {
        let err = BufferError::Open {
            path: PathBuf::from("missing.bin"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(err.to_string().contains("permission denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnv {
            var: "BYTEBUF_MAX_CAPACITY",
            value: "lots".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("BYTEBUF_MAX_CAPACITY"));
        assert!(msg.contains("\"lots\""));
    }
}

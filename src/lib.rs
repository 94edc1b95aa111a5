//! bytebuf: a growable byte buffer with independent read and write cursors.
//!
//! # Overview
//!
//! [`ByteBuffer`] owns a contiguous, zero-initialized byte region. Bytes are
//! appended at the write cursor, growing the region by roughly 1.5x when it
//! is full, and consumed from the read cursor with checked little-endian
//! reads. A buffer can also be bulk-loaded from a file.
//!
//! # Guarantees
//!
//! - **No silent failures**: allocation, growth, reads, skips and seeks all
//!   report errors instead of aborting or doing nothing
//! - **Prefix preservation**: growth never loses written bytes
//! - **No use after release**: releasing consumes the buffer
//!
//! # Module Structure
//!
//! - [`buffer`]: `ByteBuffer`, its growth policy, and the `Buf` read trait
//! - [`config`]: `BufferConfig` and `BYTEBUF_*` environment overrides
//! - [`error`]: error types
//!
//! # Example
//!
//! ```
//! use bytebuf::ByteBuffer;
//!
//! let mut buf = ByteBuffer::allocate(1)?;
//! buf.append_slice(&[0xAA, 0x34, 0x12])?;
//!
//! assert_eq!(buf.read_byte()?, 0xAA);
//! assert_eq!(buf.read_u16()?, 0x1234);
//! assert!(buf.read_u32().is_err());
//! # Ok::<(), bytebuf::BufferError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod tracing_compat;

#[cfg(test)]
pub(crate) mod test_utils;

pub use buffer::{Buf, ByteBuffer, GrowthPolicy};
pub use config::BufferConfig;
pub use error::{BufferError, ConfigError, Result};

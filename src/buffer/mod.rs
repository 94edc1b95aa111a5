//! The byte buffer and its supporting pieces.
//!
//! - [`ByteBuffer`]: growable storage with separate read and write cursors
//! - [`GrowthPolicy`]: the `size * 3 / 2 + 1` growth rule with an optional cap
//! - [`Buf`]: read-cursor trait shared by `ByteBuffer` and `&[u8]`
//!
//! File loading lives in `file` as additional constructors on `ByteBuffer`.

mod buf;
mod byte_buffer;
mod file;
mod growth;

pub use buf::Buf;
pub use byte_buffer::ByteBuffer;
pub use growth::GrowthPolicy;

//! The `Buf` trait for reading bytes through a cursor.

use crate::error::{BufferError, Result};

/// Read bytes from a buffer.
///
/// A cursor-like interface that advances through the buffer as bytes are
/// consumed. Multi-byte reads are little-endian.
///
/// # Required Methods
///
/// Implementors must provide:
/// - [`remaining()`](Buf::remaining): Returns bytes available to read
/// - [`chunk()`](Buf::chunk): Returns the readable bytes
/// - [`advance()`](Buf::advance): Advances the cursor
///
/// The panicking `get_*` methods suit callers that have already checked
/// [`remaining()`](Buf::remaining); the `try_get_*` methods report
/// [`BufferError::Underflow`] instead.
///
/// # Examples
///
/// ```
/// use bytebuf::Buf;
///
/// let mut buf: &[u8] = &[0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
/// assert_eq!(buf.get_u16_le(), 0x1234);
/// assert_eq!(buf.try_get_u32_le().unwrap(), 0x1234_5678);
/// assert!(buf.try_get_u8().is_err());
/// ```
pub trait Buf {
    /// Returns the number of bytes remaining.
    fn remaining(&self) -> usize;

    /// Returns the bytes between the cursor and the end.
    fn chunk(&self) -> &[u8];

    /// Advance the internal cursor by `cnt` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `cnt > self.remaining()`.
    fn advance(&mut self, cnt: usize);

    // === Default implementations ===

    /// Returns true if there are bytes remaining.
    #[inline]
    fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Copy bytes to `dst`, advancing the cursor.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() > self.remaining()`.
    fn copy_to_slice(&mut self, dst: &mut [u8]) {
        assert!(
            self.remaining() >= dst.len(),
            "buffer underflow: need {} bytes, have {}",
            dst.len(),
            self.remaining()
        );
        dst.copy_from_slice(&self.chunk()[..dst.len()]);
        self.advance(dst.len());
    }

    /// Copy bytes to `dst`, advancing the cursor, or fail without moving it.
    fn try_copy_to_slice(&mut self, dst: &mut [u8]) -> Result<()> {
        if self.remaining() < dst.len() {
            return Err(BufferError::Underflow {
                needed: dst.len(),
                remaining: self.remaining(),
            });
        }
        self.copy_to_slice(dst);
        Ok(())
    }

    /// Get a u8, advancing the cursor.
    ///
    /// # Panics
    ///
    /// Panics if fewer than 1 byte remains.
    fn get_u8(&mut self) -> u8 {
        assert!(self.remaining() >= 1, "buffer underflow: need 1 byte");
        let val = self.chunk()[0];
        self.advance(1);
        val
    }

    /// Get a little-endian u16.
    fn get_u16_le(&mut self) -> u16 {
        let mut buf = [0u8; 2];
        self.copy_to_slice(&mut buf);
        u16::from_le_bytes(buf)
    }

    /// Get a little-endian u32.
    ///
    /// The low 16-bit half comes from the lower address.
    fn get_u32_le(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.copy_to_slice(&mut buf);
        u32::from_le_bytes(buf)
    }

    /// Get a u8, or fail without moving the cursor.
    fn try_get_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.try_copy_to_slice(&mut buf)?;
        Ok(buf[0])
    }

    /// Get a little-endian u16, or fail without moving the cursor.
    fn try_get_u16_le(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.try_copy_to_slice(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Get a little-endian u32, or fail without moving the cursor.
    fn try_get_u32_le(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.try_copy_to_slice(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }
}

impl Buf for &[u8] {
    #[inline]
    fn remaining(&self) -> usize {
        self.len()
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        self
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.len(),
            "advance out of bounds: cnt={cnt}, len={}",
            self.len()
        );
        *self = &self[cnt..];
    }
}

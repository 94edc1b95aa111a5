//! Growable byte buffer with independent read and write cursors.

use super::buf::Buf;
use super::growth::GrowthPolicy;
use crate::config::BufferConfig;
use crate::error::{BufferError, Result};
use crate::tracing_compat::trace;

/// Growable byte buffer with a write cursor and a read cursor.
///
/// Storage is always fully allocated and zero-initialized: `capacity()` is
/// the length of the backing storage, not a reservation hint. Appends write
/// at the write cursor and grow the storage by roughly 1.5x when it is full.
/// Reads consume from the read cursor and are checked against `capacity()`.
///
/// The two cursors are independent. Reading past the write cursor yields the
/// zero fill of unwritten storage.
///
/// # Examples
///
/// ```
/// use bytebuf::ByteBuffer;
///
/// let mut buf = ByteBuffer::allocate(2)?;
/// for byte in [0x01, 0x02, 0x03, 0x04] {
///     buf.append_byte(byte)?;
/// }
/// assert!(buf.capacity() >= 4);
/// assert_eq!(buf.read_u32()?, 0x0403_0201);
/// assert_eq!(buf.tell(), 4);
/// # Ok::<(), bytebuf::BufferError>(())
/// ```
#[derive(Clone)]
pub struct ByteBuffer {
    /// Backing storage; its length is the capacity.
    data: Vec<u8>,
    /// Next write offset.
    wpos: usize,
    /// Next read offset.
    rpos: usize,
    growth: GrowthPolicy,
}

impl ByteBuffer {
    /// Allocate a zero-filled buffer of `capacity` bytes.
    ///
    /// Fails with [`BufferError::AllocationFailed`] if the storage cannot be
    /// obtained.
    pub fn allocate(capacity: usize) -> Result<Self> {
        Self::allocate_with_policy(capacity, GrowthPolicy::unbounded())
    }

    /// Allocate a buffer sized and capped by `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebuf::{BufferConfig, ByteBuffer};
    ///
    /// let config = BufferConfig::new()
    ///     .with_initial_capacity(2)
    ///     .with_max_capacity(Some(3));
    /// let mut buf = ByteBuffer::with_config(&config)?;
    /// buf.append_slice(b"abc")?;
    /// assert!(buf.append_byte(b'd').is_err());
    /// # Ok::<(), bytebuf::BufferError>(())
    /// ```
    pub fn with_config(config: &BufferConfig) -> Result<Self> {
        Self::allocate_with_policy(
            config.initial_capacity,
            GrowthPolicy::with_max(config.max_capacity),
        )
    }

    /// Allocate a zero-filled buffer that grows under `growth`.
    pub fn allocate_with_policy(capacity: usize, growth: GrowthPolicy) -> Result<Self> {
        growth.check(capacity)?;

        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| BufferError::AllocationFailed {
                requested: capacity,
            })?;
        data.resize(capacity, 0);

        Ok(Self {
            data,
            wpos: 0,
            rpos: 0,
            growth,
        })
    }

    /// Returns the capacity: the length of the backing storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of bytes written (the write cursor).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.wpos
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wpos == 0
    }

    /// Returns the growth cap, if any.
    #[inline]
    #[must_use]
    pub fn max_capacity(&self) -> Option<usize> {
        self.growth.max_capacity()
    }

    /// Returns the written region `[0, len)`.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.data[..self.wpos]
    }

    /// Returns the whole storage `[0, capacity)`.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    // === Writing ===

    /// Append one byte at the write cursor, growing first if full.
    ///
    /// On a growth error the buffer is left unchanged.
    pub fn append_byte(&mut self, byte: u8) -> Result<()> {
        self.ensure_writable(1)?;
        self.data[self.wpos] = byte;
        self.wpos += 1;
        Ok(())
    }

    /// Append `src` at the write cursor, growing as many steps as needed.
    ///
    /// Either all of `src` is written or, on a growth error, nothing is.
    pub fn append_slice(&mut self, src: &[u8]) -> Result<()> {
        self.ensure_writable(src.len())?;
        let end = self.wpos + src.len();
        self.data[self.wpos..end].copy_from_slice(src);
        self.wpos = end;
        Ok(())
    }

    fn ensure_writable(&mut self, additional: usize) -> Result<()> {
        let required = self
            .wpos
            .checked_add(additional)
            .ok_or(BufferError::CapacityOverflow {
                current: self.capacity(),
            })?;
        if required > self.capacity() {
            self.grow_to(required)?;
        }
        Ok(())
    }

    fn grow_to(&mut self, required: usize) -> Result<()> {
        let old_size = self.capacity();
        let new_size = self.growth.target_capacity(old_size, required)?;

        self.data
            .try_reserve_exact(new_size - old_size)
            .map_err(|_| BufferError::AllocationFailed {
                requested: new_size,
            })?;
        // Only the written prefix survives a resize.
        self.data[self.wpos..].fill(0);
        self.data.resize(new_size, 0);

        trace!(old_size, new_size, wpos = self.wpos, "byte buffer grew");
        Ok(())
    }

    // === Reading ===

    /// Read a little-endian u32 at the read cursor.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure_readable(4)?;
        Ok(self.get_u32_le())
    }

    /// Read a little-endian u16 at the read cursor.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure_readable(2)?;
        Ok(self.get_u16_le())
    }

    /// Read one byte at the read cursor.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure_readable(1)?;
        Ok(self.get_u8())
    }

    /// Returns the read cursor.
    #[inline]
    #[must_use]
    pub fn tell(&self) -> usize {
        self.rpos
    }

    fn ensure_readable(&self, len: usize) -> Result<()> {
        if len > self.remaining() {
            return Err(BufferError::OutOfBounds {
                pos: self.rpos,
                len,
                size: self.capacity(),
            });
        }
        Ok(())
    }

    // === Cursor control ===

    /// Move the read cursor forward by `n` bytes.
    ///
    /// Fails with [`BufferError::CursorOutOfRange`], leaving the cursor
    /// alone, if that would pass the end of storage.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let target = self.rpos.checked_add(n).unwrap_or(usize::MAX);
        if n > self.remaining() {
            return Err(BufferError::CursorOutOfRange {
                target,
                size: self.capacity(),
            });
        }
        self.rpos = target;
        Ok(())
    }

    /// Set the read cursor to `pos`.
    ///
    /// Fails with [`BufferError::CursorOutOfRange`], leaving the cursor
    /// alone, if `pos` is past the end of storage.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.capacity() {
            return Err(BufferError::CursorOutOfRange {
                target: pos,
                size: self.capacity(),
            });
        }
        self.rpos = pos;
        Ok(())
    }

    /// Reset the read cursor to the start.
    pub fn rewind(&mut self) {
        self.rpos = 0;
    }

    /// Reset both cursors and zero the storage. Capacity is kept.
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.wpos = 0;
        self.rpos = 0;
    }

    // === Release ===

    /// Release the buffer and its storage.
    ///
    /// Consumes the buffer, so it cannot be used afterwards. A caller that
    /// keeps the buffer in an `Option` releases it with `take()`:
    ///
    /// ```
    /// use bytebuf::ByteBuffer;
    ///
    /// let mut handle = Some(ByteBuffer::allocate(8)?);
    /// if let Some(buf) = handle.take() {
    ///     buf.release();
    /// }
    /// assert!(handle.is_none());
    /// # Ok::<(), bytebuf::BufferError>(())
    /// ```
    pub fn release(self) {
        trace!(capacity = self.capacity(), "byte buffer released");
        drop(self);
    }

    /// Release the buffer, handing back the written region.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.wpos);
        self.data
    }

    // === Crate internals for file loading ===

    pub(super) fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(super) fn mark_filled(&mut self) {
        self.wpos = self.data.len();
    }
}

impl Buf for ByteBuffer {
    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.rpos
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.data[self.rpos..]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining(),
            "advance out of bounds: cnt={cnt}, remaining={}",
            self.remaining()
        );
        self.rpos += cnt;
    }
}

impl From<Vec<u8>> for ByteBuffer {
    /// Adopt `vec` as fully written storage.
    fn from(vec: Vec<u8>) -> Self {
        let wpos = vec.len();
        Self {
            data: vec,
            wpos,
            rpos: 0,
            growth: GrowthPolicy::unbounded(),
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(slice: &[u8]) -> Self {
        Self::from(slice.to_vec())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.written()
    }
}

impl std::fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("wpos", &self.wpos)
            .field("rpos", &self.rpos)
            .field("capacity", &self.capacity())
            .field("max_capacity", &self.max_capacity())
            .finish()
    }
}

//! Loading a whole file into a [`ByteBuffer`].
//!
//! The file is stat'ed for its size, a buffer of exactly that size is
//! allocated, and the content is read in one bulk fill. A fill that stops
//! short of the stat'ed size is a failure; the partially filled buffer is
//! dropped before the error is returned. Every failure is also logged at
//! `warn` with the path.

use super::byte_buffer::ByteBuffer;
use super::growth::GrowthPolicy;
use crate::config::BufferConfig;
use crate::error::{BufferError, Result};
use crate::tracing_compat::{debug, debug_span, warn};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

impl ByteBuffer {
    /// Allocate a buffer holding the entire contents of the file at `path`.
    ///
    /// The returned buffer has `capacity() == len() == file size` and its
    /// read cursor at 0.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bytebuf::ByteBuffer;
    ///
    /// let mut buf = ByteBuffer::allocate_from_file("map.bin")?;
    /// let magic = buf.read_u32()?;
    /// # let _ = magic;
    /// # Ok::<(), bytebuf::BufferError>(())
    /// ```
    pub fn allocate_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load(path.as_ref(), GrowthPolicy::unbounded(), None)
    }

    /// Like [`allocate_from_file`](Self::allocate_from_file), honoring the
    /// file size limit and growth cap in `config`.
    pub fn allocate_from_file_with_config<P: AsRef<Path>>(
        path: P,
        config: &BufferConfig,
    ) -> Result<Self> {
        load(
            path.as_ref(),
            GrowthPolicy::with_max(config.max_capacity),
            config.max_file_size,
        )
    }
}

fn load(path: &Path, growth: GrowthPolicy, max_file_size: Option<u64>) -> Result<ByteBuffer> {
    let span = debug_span!("load_file", path = %path.display());
    let _guard = span.enter();

    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(source) => {
            warn!(path = %path.display(), error = %source, "could not stat file");
            return Err(BufferError::Stat {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if let Some(limit) = max_file_size {
        if size > limit {
            warn!(path = %path.display(), size, limit, "file exceeds load limit");
            return Err(BufferError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
    }

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            warn!(path = %path.display(), error = %source, "could not open file for caching");
            return Err(BufferError::Open {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let Ok(expected) = usize::try_from(size) else {
        warn!(path = %path.display(), size, "file does not fit in memory");
        return Err(BufferError::AllocationFailed {
            requested: usize::MAX,
        });
    };

    let buffer = cache_from_reader(path, &mut file, expected, growth)?;
    debug!(size = expected, "file cached");
    Ok(buffer)
}

/// Fill a fresh buffer of `expected` bytes from `reader`.
fn cache_from_reader<R: Read>(
    path: &Path,
    reader: &mut R,
    expected: usize,
    growth: GrowthPolicy,
) -> Result<ByteBuffer> {
    let mut buffer = ByteBuffer::allocate_with_policy(expected, growth).map_err(|err| {
        warn!(path = %path.display(), size = expected, error = %err, "could not allocate buffer");
        err
    })?;

    let actual = match fill(reader, buffer.storage_mut()) {
        Ok(n) => n,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "read failed while caching file");
            return Err(BufferError::Io(err));
        }
    };

    if actual != expected {
        warn!(path = %path.display(), expected, actual, "could not cache file");
        drop(buffer);
        return Err(BufferError::ShortRead {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }

    buffer.mark_filled();
    Ok(buffer)
}

/// Read into `dst` until it is full or the reader reports end of input.
fn fill<R: Read>(reader: &mut R, dst: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < dst.len() {
        match reader.read(&mut dst[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buf;
    use crate::test_utils::{init_test_logging, scratch_file};

    /// Hands out at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(dst.len()).min(self.data.len());
            dst[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Fails once with `Interrupted`, then behaves like the inner slice.
    struct InterruptOnce<'a> {
        interrupted: bool,
        inner: &'a [u8],
    }

    impl Read for InterruptOnce<'_> {
        fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read(dst)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _dst: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_load_file_contents() {
        init_test_logging();
        let file = scratch_file(&[0x01, 0x02, 0x03, 0x04, 0xFF]);
        let mut buf = ByteBuffer::allocate_from_file(file.path()).unwrap();
        assert_eq!(buf.capacity(), 5);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.tell(), 0);
        assert_eq!(buf.read_u32().unwrap(), 0x0403_0201);
        assert_eq!(buf.read_byte().unwrap(), 0xFF);
    }

    #[test]
    fn test_load_empty_file() {
        let file = scratch_file(&[]);
        let buf = ByteBuffer::allocate_from_file(file.path()).unwrap();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_loaded_buffer_keeps_growing() {
        let file = scratch_file(b"abc");
        let mut buf = ByteBuffer::allocate_from_file(file.path()).unwrap();
        buf.append_byte(b'd').unwrap();
        assert_eq!(buf.written(), b"abcd");
    }

    #[test]
    fn test_load_missing_file_is_stat_error() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.bin");
        let err = ByteBuffer::allocate_from_file(&missing).unwrap_err();
        match err {
            BufferError::Stat { path, .. } => assert_eq!(path, missing),
            other => unreachable!("expected Stat, got {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_large_file_before_reading() {
        let file = scratch_file(&[0u8; 32]);
        let config = BufferConfig::new().with_max_file_size(Some(16));
        let err = ByteBuffer::allocate_from_file_with_config(file.path(), &config).unwrap_err();
        assert!(matches!(
            err,
            BufferError::FileTooLarge {
                size: 32,
                limit: 16,
                ..
            }
        ));
    }

    #[test]
    fn test_config_growth_cap_applies_to_loaded_buffer() {
        let file = scratch_file(&[1, 2]);
        let config = BufferConfig::new().with_max_capacity(Some(3));
        let mut buf = ByteBuffer::allocate_from_file_with_config(file.path(), &config).unwrap();
        assert_eq!(buf.max_capacity(), Some(3));
        buf.append_byte(3).unwrap();
        assert!(buf.append_byte(4).unwrap_err().is_capacity());
    }

    #[test]
    fn test_config_cap_below_file_size() {
        let file = scratch_file(&[0u8; 8]);
        let config = BufferConfig::new().with_max_capacity(Some(4));
        let err = ByteBuffer::allocate_from_file_with_config(file.path(), &config).unwrap_err();
        assert!(matches!(
            err,
            BufferError::CapacityExceeded {
                required: 8,
                limit: 4
            }
        ));
    }

    #[test]
    fn test_fill_across_partial_reads() {
        let data = [9u8, 8, 7, 6, 5, 4, 3];
        let mut reader = Trickle {
            data: &data,
            step: 2,
        };
        let mut buf = cache_from_reader(
            Path::new("trickle"),
            &mut reader,
            data.len(),
            GrowthPolicy::unbounded(),
        )
        .unwrap();
        assert_eq!(buf.written(), &data);
        assert_eq!(buf.get_u8(), 9);
    }

    #[test]
    fn test_fill_retries_interrupted() {
        let mut reader = InterruptOnce {
            interrupted: false,
            inner: &[1, 2, 3],
        };
        let buf =
            cache_from_reader(Path::new("intr"), &mut reader, 3, GrowthPolicy::unbounded())
                .unwrap();
        assert_eq!(buf.written(), &[1, 2, 3]);
    }

    #[test]
    fn test_short_read_is_reported() {
        init_test_logging();
        let mut reader: &[u8] = &[1, 2, 3];
        let err = cache_from_reader(Path::new("short.bin"), &mut reader, 5, GrowthPolicy::unbounded())
            .unwrap_err();
        match err {
            BufferError::ShortRead {
                path,
                expected,
                actual,
            } => {
                assert_eq!(path, Path::new("short.bin"));
                assert_eq!(expected, 5);
                assert_eq!(actual, 3);
            }
            other => unreachable!("expected ShortRead, got {other:?}"),
        }
    }

    #[test]
    fn test_read_error_is_io() {
        let err = cache_from_reader(Path::new("broken"), &mut Broken, 4, GrowthPolicy::unbounded())
            .unwrap_err();
        assert!(matches!(err, BufferError::Io(_)));
    }
}

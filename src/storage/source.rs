use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use eyre::Result;
use memmap2::Mmap;

use crate::error::{classify_read, DlisError};

/// Seekable byte-oriented stream feeding the framing reader.
///
/// Positions are absolute byte offsets from the start of the source.
pub trait ByteSource {
    /// Fills `buf` completely or fails; a short read at end-of-file is
    /// `UnexpectedEof`, any other failure is `Io`.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Moves to an absolute position.
    fn seek(&mut self, pos: u64) -> Result<()>;

    /// Moves relative to the current position.
    fn skip(&mut self, delta: i64) -> Result<()>;

    /// Current absolute position.
    fn tell(&mut self) -> Result<u64>;

    /// True when no byte remains at the current position.
    fn at_eof(&mut self) -> Result<bool>;
}

/// Stream source over a plain file handle.
#[derive(Debug)]
pub struct FileSource {
    inner: fs::File,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = fs::File::open(path).map_err(DlisError::Io)?;
        Ok(Self { inner })
    }
}

impl ByteSource for FileSource {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner
            .read_exact(buf)
            .map_err(|e| classify_read(e, "byte source").into())
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(pos)).map_err(DlisError::Io)?;
        Ok(())
    }

    fn skip(&mut self, delta: i64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Current(delta))
            .map_err(DlisError::Io)?;
        Ok(())
    }

    fn tell(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position().map_err(DlisError::Io)?)
    }

    fn at_eof(&mut self) -> Result<bool> {
        // peek one byte, then step back if something was there
        let mut probe = [0u8; 1];
        match self.inner.read(&mut probe) {
            Ok(0) => Ok(true),
            Ok(_) => {
                self.inner
                    .seek(SeekFrom::Current(-1))
                    .map_err(DlisError::Io)?;
                Ok(false)
            }
            Err(e) => Err(DlisError::Io(e).into()),
        }
    }
}

/// Cursor over a read-only memory mapping of the whole file.
#[derive(Debug)]
pub struct MmapSource {
    map: Mmap,
    pos: u64,
}

impl MmapSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = fs::File::open(path).map_err(DlisError::Io)?;
        // SAFETY: the mapping is read-only and private to this source;
        // mutating the file underneath a live map is undefined on every
        // platform, which is the standard mmap contract callers accept by
        // choosing this source.
        let map = unsafe { Mmap::map(&file) }.map_err(DlisError::Io)?;
        Ok(Self { map, pos: 0 })
    }

    fn remaining(&self) -> u64 {
        (self.map.len() as u64).saturating_sub(self.pos)
    }
}

impl ByteSource for MmapSource {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.remaining() < buf.len() as u64 {
            return Err(DlisError::UnexpectedEof("byte source".into()).into());
        }
        let start = self.pos as usize;
        buf.copy_from_slice(&self.map[start..start + buf.len()]);
        self.pos += buf.len() as u64;
        Ok(())
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        self.pos = pos;
        Ok(())
    }

    fn skip(&mut self, delta: i64) -> Result<()> {
        let next = self.pos as i64 + delta;
        if next < 0 {
            return Err(DlisError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "seek before start of mapping",
            ))
            .into());
        }
        self.pos = next as u64;
        Ok(())
    }

    fn tell(&mut self) -> Result<u64> {
        Ok(self.pos)
    }

    fn at_eof(&mut self) -> Result<bool> {
        Ok(self.remaining() == 0)
    }
}

//! Minimal byte source/sink abstractions (spec §4.1).
//!
//! Both traits mirror the legacy game's I/O contract: a short read or short
//! write is itself the error, not a "maybe fewer bytes" result the caller
//! has to loop over. Anything implementing [`std::io::Read`] / [`std::io::Write`]
//! gets an impl for free, including `&[u8]` and `std::fs::File`.

use crate::checksum::BodyChecksum;
use crate::error::Error;

pub trait Reader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;
}

pub trait Writer {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error>;
}

impl<R: std::io::Read> Reader for R {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let expected = buf.len();
        if expected == 0 {
            return Ok(0);
        }
        self.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                Error::ShortRead { expected, got: 0 }
            } else {
                Error::Io(e)
            }
        })?;
        Ok(expected)
    }
}

impl<W: std::io::Write> Writer for W {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        let expected = buf.len();
        let mut written = 0;
        while written < buf.len() {
            match std::io::Write::write(self, &buf[written..]) {
                Ok(0) => return Err(Error::ShortWrite { expected, got: written }),
                Ok(n) => written += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(written)
    }
}

/// Feeds every byte that passes through `inner` into a running [`BodyChecksum`].
pub struct ChecksumReader<'r, 'c, R: Reader> {
    inner: &'r mut R,
    checksum: &'c mut BodyChecksum,
}

impl<'r, 'c, R: Reader> ChecksumReader<'r, 'c, R> {
    pub fn new(inner: &'r mut R, checksum: &'c mut BodyChecksum) -> Self {
        Self { inner, checksum }
    }
}

impl<'r, 'c, R: Reader> Reader for ChecksumReader<'r, 'c, R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = self.inner.read(buf)?;
        self.checksum.update(&buf[..n]);
        Ok(n)
    }
}

/// Feeds every byte that passes through `inner` into a running [`BodyChecksum`].
pub struct ChecksumWriter<'w, 'c, W: Writer> {
    inner: &'w mut W,
    checksum: &'c mut BodyChecksum,
}

impl<'w, 'c, W: Writer> ChecksumWriter<'w, 'c, W> {
    pub fn new(inner: &'w mut W, checksum: &'c mut BodyChecksum) -> Self {
        Self { inner, checksum }
    }
}

impl<'w, 'c, W: Writer> Writer for ChecksumWriter<'w, 'c, W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        let n = self.inner.write(buf)?;
        self.checksum.update(&buf[..n]);
        Ok(n)
    }
}

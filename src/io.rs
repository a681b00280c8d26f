//! The sequential byte stream the codec reads blocks from and writes them to.
//!
//! The codec only needs five primitives: single bytes for the header, fixed
//! 8-byte big-endian words for the payload, and a forward skip. They are
//! expressed as the `DataInput` / `DataOutput` traits so a storage layer can plug
//! in its own file or buffer abstraction. Errors are plain `std::io::Error`s and
//! are passed through untouched; retries, if any, belong to the stream.
//!
//! Provided implementations:
//! - [`ByteArrayInput`]: an in-memory reader with position tracking and a skip
//!   that never touches the skipped bytes.
//! - [`ReaderInput`]: wraps any `std::io::Read`.
//! - `DataOutput` for every `std::io::Write`, which covers `Vec<u8>`.

use std::io::{self, ErrorKind, Read, Write};

//==================================================================================
// 1. Traits
//==================================================================================

pub trait DataInput {
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Reads exactly 8 bytes as one big-endian word.
    fn read_fixed_word(&mut self) -> io::Result<u64>;

    /// Fills `dst` with consecutive words.
    fn read_fixed_words(&mut self, dst: &mut [u64]) -> io::Result<()> {
        for word in dst.iter_mut() {
            *word = self.read_fixed_word()?;
        }
        Ok(())
    }

    /// Advances the stream by `n` bytes, failing if fewer remain.
    fn skip_bytes(&mut self, n: usize) -> io::Result<()>;
}

pub trait DataOutput {
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Writes one word as 8 big-endian bytes.
    fn write_fixed_word(&mut self, word: u64) -> io::Result<()>;

    fn write_fixed_words(&mut self, src: &[u64]) -> io::Result<()> {
        for &word in src {
            self.write_fixed_word(word)?;
        }
        Ok(())
    }
}

fn unexpected_eof(needed: usize, available: usize) -> io::Error {
    io::Error::new(
        ErrorKind::UnexpectedEof,
        format!("needed {} bytes but only {} remain", needed, available),
    )
}

//==================================================================================
// 2. In-Memory Input
//==================================================================================

/// Reads blocks from a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteArrayInput<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteArrayInput<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current offset from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn take(&mut self, n: usize) -> io::Result<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(unexpected_eof(n, available));
        }
        let out = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }
}

impl DataInput for ByteArrayInput<'_> {
    fn read_byte(&mut self) -> io::Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_fixed_word(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(buf))
    }

    fn read_fixed_words(&mut self, dst: &mut [u64]) -> io::Result<()> {
        // One bounds check for the whole payload.
        let bytes = self.take(dst.len() * 8)?;
        for (word, chunk) in dst.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_be_bytes(buf);
        }
        Ok(())
    }

    fn skip_bytes(&mut self, n: usize) -> io::Result<()> {
        self.take(n).map(|_| ())
    }
}

//==================================================================================
// 3. std::io Adapters
//==================================================================================

/// Adapts any `std::io::Read` into a `DataInput`.
///
/// A plain reader cannot seek, so `skip_bytes` drains the skipped range into a
/// sink. Wrap a `BufReader` for small reads on unbuffered sources.
#[derive(Debug)]
pub struct ReaderInput<R> {
    inner: R,
    consumed: u64,
}

impl<R: Read> ReaderInput<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Total bytes read or skipped so far.
    pub fn position(&self) -> u64 {
        self.consumed
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> DataInput for ReaderInput<R> {
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        self.consumed += 1;
        Ok(buf[0])
    }

    fn read_fixed_word(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        self.consumed += 8;
        Ok(u64::from_be_bytes(buf))
    }

    fn skip_bytes(&mut self, n: usize) -> io::Result<()> {
        let skipped = io::copy(&mut self.inner.by_ref().take(n as u64), &mut io::sink())?;
        self.consumed += skipped;
        if skipped < n as u64 {
            return Err(unexpected_eof(n, skipped as usize));
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> DataOutput for W {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])
    }

    fn write_fixed_word(&mut self, word: u64) -> io::Result<()> {
        self.write_all(&word.to_be_bytes())
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_big_endian() {
        let mut out = Vec::new();
        out.write_byte(0x02).unwrap();
        out.write_fixed_word(0x0102_0304_0506_0708).unwrap();
        assert_eq!(out, vec![0x02, 1, 2, 3, 4, 5, 6, 7, 8]);

        let mut input = ByteArrayInput::new(&out);
        assert_eq!(input.read_byte().unwrap(), 0x02);
        assert_eq!(input.read_fixed_word().unwrap(), 0x0102_0304_0506_0708);
        assert!(input.is_eof());
    }

    #[test]
    fn test_byte_array_skip_tracks_position() {
        let bytes = [0u8; 20];
        let mut input = ByteArrayInput::new(&bytes);
        input.skip_bytes(16).unwrap();
        assert_eq!(input.position(), 16);
        assert_eq!(input.remaining(), 4);

        let err = input.skip_bytes(5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        // A failed skip leaves the position unchanged.
        assert_eq!(input.position(), 16);
    }

    #[test]
    fn test_byte_array_short_word_read() {
        let bytes = [0u8; 7];
        let mut input = ByteArrayInput::new(&bytes);
        let err = input.read_fixed_word().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

        let mut words = [0u64; 2];
        let mut input = ByteArrayInput::new(&[0u8; 15]);
        assert!(input.read_fixed_words(&mut words).is_err());
    }

    #[test]
    fn test_reader_input_skip_and_read() {
        let mut bytes = vec![0xAAu8; 10];
        bytes.extend_from_slice(&42u64.to_be_bytes());
        let mut input = ReaderInput::new(bytes.as_slice());
        input.skip_bytes(10).unwrap();
        assert_eq!(input.read_fixed_word().unwrap(), 42);
        assert_eq!(input.position(), 18);

        let err = input.skip_bytes(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }
}

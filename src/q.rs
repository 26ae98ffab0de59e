//! Streaming decoder for the RFC 2047 "Q" transfer encoding.
//!
//! `_` decodes to a space, `=XX` to the byte with hex value `XX`, and every
//! other byte passes through untouched.

use std::io::{self, Read};

use crate::defects::Defect;

/// Wraps a byte source holding a Q encoded payload.
///
/// Each call to [`Read::read`] yields at most one decoded byte, so the
/// decoder drains cleanly through `read_to_end` or `io::copy`.  A source
/// that ends between escapes ends the stream; a source that ends inside an
/// `=XX` escape is a [`Defect::TruncatedEscape`].
#[derive(Debug)]
pub struct QDecoder<R> {
    inner: R,
    scratch: [u8; 2],
}

impl<R: Read> QDecoder<R> {
    pub fn new(inner: R) -> Self {
        QDecoder {
            inner,
            scratch: [0; 2],
        }
    }

    /// Decode the next byte, or `None` once the source is exhausted.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.next_source_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        match byte {
            b'=' => self.read_escape().map(Some),
            b'_' => Ok(Some(b' ')),
            _ => Ok(Some(byte)),
        }
    }

    fn read_escape(&mut self) -> io::Result<u8> {
        let filled = self.read_n(2)?;
        if filled < 2 {
            return Err(Defect::TruncatedEscape {
                bytes: self.scratch[..filled].to_vec(),
            }
            .into());
        }

        let mut decoded = [0u8; 1];
        hex::decode_to_slice(self.scratch, &mut decoded).map_err(|_| Defect::InvalidEscape {
            bytes: self.scratch,
        })?;
        Ok(decoded[0])
    }

    /// Fill the first `n` scratch bytes, returning how many the source had.
    fn read_n(&mut self, n: usize) -> io::Result<usize> {
        let mut filled = 0;
        while filled < n {
            match self.next_source_byte()? {
                Some(byte) => {
                    self.scratch[filled] = byte;
                    filled += 1;
                }
                None => break,
            }
        }
        Ok(filled)
    }

    fn next_source_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: Read> Read for QDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.read_byte()? {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

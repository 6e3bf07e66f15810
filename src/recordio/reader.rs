use std::io::{ErrorKind, Read};
use crate::error::RecordIoError;
use crate::recordio::{PositionRecord, FORMAT_VERSION, MAX_PAYLOAD_LEN};

/// Streaming reader over a record stream. Yields records until a clean end of stream;
/// the first error ends the iteration.
pub struct RecordReader<R: Read> {
    source: R,
    done: bool,
}

/// Reads until `buf` is full or the source is exhausted, returning the bytes read.
fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize, RecordIoError> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(filled)
}

impl<R: Read> RecordReader<R> {
    /// Checks the version byte and positions the reader at the first frame.
    pub fn new(mut source: R) -> Result<RecordReader<R>, RecordIoError> {
        let mut version = [0u8; 1];
        if read_up_to(&mut source, &mut version)? == 0 {
            return Err(RecordIoError::MissingVersion);
        }
        if version[0] != FORMAT_VERSION {
            return Err(RecordIoError::UnsupportedVersion(version[0]));
        }
        Ok(RecordReader { source, done: false })
    }

    /// Reads the next frame. `Ok(None)` marks a clean end of stream.
    pub fn read_record(&mut self) -> Result<Option<PositionRecord>, RecordIoError> {
        let mut len_bytes = [0u8; 4];
        match read_up_to(&mut self.source, &mut len_bytes)? {
            0 => return Ok(None),
            4 => {},
            actual => return Err(RecordIoError::Truncated { expected: 4, actual }),
        }

        let len = u32::from_le_bytes(len_bytes) as usize;
        if len > MAX_PAYLOAD_LEN {
            return Err(RecordIoError::PayloadTooLarge { len, max: MAX_PAYLOAD_LEN });
        }
        let mut payload = vec![0u8; len];
        let actual = read_up_to(&mut self.source, &mut payload)?;
        if actual != len {
            return Err(RecordIoError::Truncated { expected: len, actual });
        }
        PositionRecord::from_payload(&payload).map(Some)
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<PositionRecord, RecordIoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            },
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

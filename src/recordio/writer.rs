use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use parking_lot::Mutex;
use crate::error::RecordIoError;
use crate::recordio::{PositionRecord, FORMAT_VERSION, MAX_PAYLOAD_LEN};

struct WriterState<W> {
    sink: W,
    records_written: u64,
    poisoned: bool,
}

impl<W: Write> WriterState<W> {
    /// A failed write may leave part of a frame behind, so every later write is refused.
    fn write_frames(&mut self, frames: &[u8]) -> Result<(), RecordIoError> {
        if self.poisoned {
            return Err(RecordIoError::Poisoned);
        }
        if let Err(err) = self.sink.write_all(frames) {
            self.poisoned = true;
            return Err(err.into());
        }
        Ok(())
    }
}

/// Appends `[len u32 LE][payload]` for `record` to `frames`.
fn push_frame(frames: &mut Vec<u8>, record: &PositionRecord) -> Result<(), RecordIoError> {
    let payload = record.to_payload()?;
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(RecordIoError::PayloadTooLarge { len: payload.len(), max: MAX_PAYLOAD_LEN });
    }
    frames.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frames.extend_from_slice(&payload);
    Ok(())
}

/// Append-only record stream writer. Shareable between threads; each append lands as
/// one uninterrupted frame. After a failed write the writer is poisoned and rejects
/// every later append, so a torn frame is always the last thing in the stream.
pub struct RecordWriter<W: Write> {
    state: Mutex<WriterState<W>>,
}

impl<W: Write> RecordWriter<W> {
    /// Starts a fresh stream by writing the version byte.
    pub fn create(mut sink: W) -> Result<RecordWriter<W>, RecordIoError> {
        sink.write_all(&[FORMAT_VERSION])?;
        Ok(RecordWriter::resume(sink))
    }

    /// Continues a stream whose version byte is already present.
    pub fn resume(sink: W) -> RecordWriter<W> {
        RecordWriter {
            state: Mutex::new(WriterState { sink, records_written: 0, poisoned: false }),
        }
    }

    /// Appends one record frame. The payload is encoded before the lock is taken.
    pub fn append(&self, record: &PositionRecord) -> Result<(), RecordIoError> {
        let mut frame = Vec::new();
        push_frame(&mut frame, record)?;

        let mut state = self.state.lock();
        state.write_frames(&frame)?;
        state.records_written += 1;
        Ok(())
    }

    /// Appends several records, holding the lock for all of them so they stay contiguous.
    pub fn append_all<'a, I>(&self, records: I) -> Result<usize, RecordIoError>
    where
        I: IntoIterator<Item = &'a PositionRecord>,
    {
        let mut frames = Vec::new();
        let mut count = 0;
        for record in records {
            push_frame(&mut frames, record)?;
            count += 1;
        }

        let mut state = self.state.lock();
        state.write_frames(&frames)?;
        state.records_written += count as u64;
        Ok(count)
    }

    /// Flushes the sink. A buffered sink may write a partial frame here, so a failure poisons too.
    pub fn flush(&self) -> Result<(), RecordIoError> {
        let mut state = self.state.lock();
        if state.poisoned {
            return Err(RecordIoError::Poisoned);
        }
        if let Err(err) = state.sink.flush() {
            state.poisoned = true;
            return Err(err.into());
        }
        Ok(())
    }

    /// Whether a failed write has closed this writer.
    pub fn is_poisoned(&self) -> bool {
        self.state.lock().poisoned
    }

    /// Records appended through this writer.
    pub fn records_written(&self) -> u64 {
        self.state.lock().records_written
    }

    pub fn into_inner(self) -> W {
        self.state.into_inner().sink
    }
}

impl RecordWriter<BufWriter<File>> {
    /// Opens `path` for appending, writing the version byte if the file is new or empty
    /// and checking it otherwise.
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<RecordWriter<BufWriter<File>>, RecordIoError> {
        let mut file = OpenOptions::new().read(true).append(true).create(true).open(path)?;
        if file.metadata()?.len() == 0 {
            return RecordWriter::create(BufWriter::new(file));
        }
        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != FORMAT_VERSION {
            return Err(RecordIoError::UnsupportedVersion(version[0]));
        }
        Ok(RecordWriter::resume(BufWriter::new(file)))
    }
}

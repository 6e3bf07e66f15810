use std::io::Write;
use parking_lot::Mutex;
use crate::engine::selfplay::TrainingRecord;
use crate::error::RecordIoError;
use crate::recordio::{PositionRecord, RecordWriter};

/// Destination for the records of finished games. Shared by all games of a run.
pub trait RecordSink: Sync {
    /// Takes every record of one game. Results are back-filled by the time this is called.
    fn accept(&self, records: &[TrainingRecord]) -> Result<usize, RecordIoError>;
}

impl<W: Write + Send> RecordSink for RecordWriter<W> {
    fn accept(&self, records: &[TrainingRecord]) -> Result<usize, RecordIoError> {
        let wire = records.iter()
            .map(PositionRecord::from_training)
            .collect::<Result<Vec<_>, _>>()?;
        self.append_all(&wire)
    }
}

/// Keeps records in memory.
impl RecordSink for Mutex<Vec<TrainingRecord>> {
    fn accept(&self, records: &[TrainingRecord]) -> Result<usize, RecordIoError> {
        if records.iter().any(|record| record.result.is_none()) {
            return Err(RecordIoError::UnresolvedResult);
        }
        self.lock().extend_from_slice(records);
        Ok(records.len())
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl RecordSink for DiscardSink {
    fn accept(&self, records: &[TrainingRecord]) -> Result<usize, RecordIoError> {
        Ok(records.len())
    }
}

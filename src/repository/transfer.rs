//! Transfer events
//!
//! Every get/put reports its progress to a [`TransferObserver`]:
//!
//! ```text
//! Started { total } -> Progress* -> Completed | Error
//! ```
//!
//! Events of one transfer are emitted synchronously on the thread doing the
//! transfer, so they arrive in order even when several transfers run at once.
//! [`TransferTracker`] guarantees the single terminal event, including when a
//! transfer is abandoned by an early return.

use std::io::{Read, Write};

use super::resource::Resource;
use crate::error::IvyError;

/// Buffer size for streamed copies
const COPY_BUFFER_SIZE: usize = 8192;

/// Direction of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Get,
    Put,
}

/// What happened in a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEventKind {
    Started,
    Progress,
    Completed,
    Error(String),
}

impl TransferEventKind {
    #[cfg(test)]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferEventKind::Completed | TransferEventKind::Error(_))
    }
}

/// One transfer event
#[derive(Debug, Clone)]
pub struct TransferEvent {
    pub resource: Resource,
    pub direction: Direction,
    pub kind: TransferEventKind,
    /// Expected size, if known
    pub total_length: Option<u64>,
    /// Bytes transferred so far
    pub transferred_length: u64,
}

/// Receives transfer events
pub trait TransferObserver: Send + Sync {
    fn on_transfer(&self, event: &TransferEvent);
}

/// Observer that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TransferObserver for NoopObserver {
    fn on_transfer(&self, _event: &TransferEvent) {}
}

/// Emits the events of a single transfer in order
pub struct TransferTracker<'a> {
    observer: &'a dyn TransferObserver,
    resource: Resource,
    direction: Direction,
    total_length: Option<u64>,
    transferred_length: u64,
    finished: bool,
}

impl<'a> TransferTracker<'a> {
    /// Begin a transfer, emitting `Started`
    pub fn start(
        observer: &'a dyn TransferObserver,
        resource: Resource,
        direction: Direction,
        total_length: Option<u64>,
    ) -> Self {
        let tracker = Self {
            observer,
            resource,
            direction,
            total_length,
            transferred_length: 0,
            finished: false,
        };
        tracker.emit(TransferEventKind::Started);
        tracker
    }

    fn emit(&self, kind: TransferEventKind) {
        self.observer.on_transfer(&TransferEvent {
            resource: self.resource.clone(),
            direction: self.direction,
            kind,
            total_length: self.total_length,
            transferred_length: self.transferred_length,
        });
    }

    /// Record `bytes` more transferred bytes
    pub fn progress(&mut self, bytes: u64) {
        self.transferred_length += bytes;
        self.emit(TransferEventKind::Progress);
    }

    pub fn transferred(&self) -> u64 {
        self.transferred_length
    }

    /// Finish successfully, emitting `Completed`
    pub fn complete(mut self) {
        self.finished = true;
        self.emit(TransferEventKind::Completed);
    }

    /// Finish with an error, emitting `Error`
    pub fn fail(mut self, error: &IvyError) {
        self.finished = true;
        self.emit(TransferEventKind::Error(error.to_string()));
    }

    /// Stream `reader` into `writer`, reporting each chunk
    pub fn copy<R, W>(&mut self, reader: &mut R, writer: &mut W) -> std::io::Result<CopyOutcome>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut buffer = [0u8; COPY_BUFFER_SIZE];
        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Ok(CopyOutcome::ReadFailed(e)),
            };
            writer.write_all(&buffer[..bytes_read])?;
            self.progress(bytes_read as u64);
        }
        writer.flush()?;
        Ok(CopyOutcome::Done(self.transferred_length))
    }
}

/// Result of [`TransferTracker::copy`]
///
/// Read failures are reported separately from write failures because they
/// come from the backend rather than from the local destination.
#[derive(Debug)]
pub enum CopyOutcome {
    Done(u64),
    ReadFailed(std::io::Error),
}

impl Drop for TransferTracker<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.finished = true;
            self.emit(TransferEventKind::Error("transfer aborted".to_string()));
        }
    }
}

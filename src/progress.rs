//! Progress bar display for transfers

use std::sync::{Mutex, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};

use crate::repository::{TransferEvent, TransferEventKind, TransferObserver};

/// Shows one progress bar per transfer on stderr
///
/// Transfers are expected to run one after another; a new `Started` event
/// replaces the bar of the previous transfer.
#[derive(Default)]
pub struct ProgressObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_bar(event: &TransferEvent) -> ProgressBar {
        let bar = match event.total_length {
            Some(total) => {
                let style = ProgressStyle::default_bar()
                    .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                let bar = ProgressBar::new(total);
                bar.set_style(style);
                bar
            }
            None => {
                let style = ProgressStyle::default_spinner()
                    .template("{spinner} {bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                let bar = ProgressBar::new_spinner();
                bar.set_style(style);
                bar
            }
        };
        bar.set_message(event.resource.name().to_string());
        bar
    }
}

impl TransferObserver for ProgressObserver {
    fn on_transfer(&self, event: &TransferEvent) {
        let mut slot = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        match &event.kind {
            TransferEventKind::Started => {
                if let Some(previous) = slot.take() {
                    previous.finish_and_clear();
                }
                *slot = Some(Self::start_bar(event));
            }
            TransferEventKind::Progress => {
                if let Some(bar) = slot.as_ref() {
                    bar.set_position(event.transferred_length);
                }
            }
            TransferEventKind::Completed => {
                if let Some(bar) = slot.take() {
                    bar.set_position(event.transferred_length);
                    bar.finish();
                }
            }
            TransferEventKind::Error(reason) => {
                if let Some(bar) = slot.take() {
                    bar.abandon_with_message(format!("{} failed: {reason}", event.resource.name()));
                }
            }
        }
    }
}

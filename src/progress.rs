//! Progress reporting.
//!
//! A [`ProgressCallback`] attached to [`SliceOptions`](crate::SliceOptions)
//! receives a [`ProgressInfo`] snapshot every time a frame image is written.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vidslice::{ProgressCallback, ProgressInfo, SliceOptions};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("{pct:.0}% ({} of {:?})", info.current, info.total);
//!         }
//!     }
//! }
//!
//! let options = SliceOptions::new("input.mp4").with_progress(Arc::new(PrintProgress));
//! ```

use std::time::{Duration, Instant};

/// A snapshot of slicing progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// How many frame images have been written so far.
    pub current: u64,
    /// Total number of frame images expected, if known.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Frame number of the image just written. `None` on the closing
    /// snapshot sent when the stream ended before every sample was reached.
    pub current_frame: Option<u64>,
    /// Wall-clock time elapsed since scanning started.
    pub elapsed: Duration,
}

/// Trait for receiving progress updates while frames are written.
///
/// Callbacks observe the run and cannot stop it.
pub trait ProgressCallback: Send + Sync {
    /// Called after each frame image is written.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. Used when no callback is set.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Builds [`ProgressInfo`] snapshots for one scan.
pub(crate) struct ProgressTracker<'a> {
    callback: &'a dyn ProgressCallback,
    total: Option<u64>,
    current: u64,
    started: Instant,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(callback: &'a dyn ProgressCallback, total: Option<u64>) -> Self {
        Self {
            callback,
            total,
            current: 0,
            started: Instant::now(),
        }
    }

    pub(crate) fn advance(&mut self, frame_number: u64) {
        self.current += 1;
        self.report(Some(frame_number));
    }

    /// Close the scan. If fewer items arrived than expected, a last
    /// snapshot reports the real count as the total.
    pub(crate) fn finish(&mut self) {
        if self.total.is_some_and(|total| total != self.current) {
            self.total = Some(self.current);
            self.report(None);
        }
    }

    fn report(&self, current_frame: Option<u64>) {
        let percentage = self
            .total
            .filter(|&total| total > 0)
            .map(|total| (self.current as f32 / total as f32 * 100.0).min(100.0));

        self.callback.on_progress(&ProgressInfo {
            current: self.current,
            total: self.total,
            percentage,
            current_frame,
            elapsed: self.started.elapsed(),
        });
    }
}

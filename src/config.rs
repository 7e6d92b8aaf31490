//! Slicing configuration.
//!
//! [`SliceOptions`] carries everything a run needs: the input video, the
//! optional subtitle file, how many frames to sample, where to write, and an
//! optional progress callback.
//!
//! # Example
//!
//! ```
//! use vidslice::SliceOptions;
//!
//! let options = SliceOptions::new("movie.mp4")
//!     .with_subtitle_path("movie.srt")
//!     .with_frame_count(8)
//!     .with_output_path("out");
//!
//! assert_eq!(options.frame_count, 8);
//! assert_eq!(options.frames_directory(), std::path::Path::new("out/frames"));
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::progress::{NoOpProgress, ProgressCallback};

/// Number of frames sampled when none is given.
pub const DEFAULT_FRAME_COUNT: u64 = 2;

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_PATH: &str = "output";

/// Name of the frame image directory inside the output directory.
pub const FRAMES_DIRECTORY_NAME: &str = "frames";

/// Name of the aligned subtitle text file inside the output directory.
pub const SUBTITLES_FILE_NAME: &str = "subtitles.txt";

/// Settings for one slicing run.
#[derive(Clone)]
pub struct SliceOptions {
    /// Video to sample frames from.
    pub video_path: PathBuf,
    /// Subtitle file to align against. Ignored when it does not exist.
    pub subtitle_path: Option<PathBuf>,
    /// How many frames to sample. Must be at least 1.
    pub frame_count: u64,
    /// Root directory for `frames/` and `subtitles.txt`.
    pub output_path: PathBuf,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for SliceOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SliceOptions")
            .field("video_path", &self.video_path)
            .field("subtitle_path", &self.subtitle_path)
            .field("frame_count", &self.frame_count)
            .field("output_path", &self.output_path)
            .finish_non_exhaustive()
    }
}

impl SliceOptions {
    /// Options for slicing `video_path` with the default settings.
    pub fn new<P: Into<PathBuf>>(video_path: P) -> Self {
        Self {
            video_path: video_path.into(),
            subtitle_path: None,
            frame_count: DEFAULT_FRAME_COUNT,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Align subtitles from this file.
    pub fn with_subtitle_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.subtitle_path = Some(path.into());
        self
    }

    /// Sample `count` frames.
    pub fn with_frame_count(mut self, count: u64) -> Self {
        self.frame_count = count;
        self
    }

    /// Write results under `path`.
    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }

    /// Report frame writes to `callback`.
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// `<output_path>/frames`.
    pub fn frames_directory(&self) -> PathBuf {
        self.output_path.join(FRAMES_DIRECTORY_NAME)
    }

    /// `<output_path>/subtitles.txt`.
    pub fn subtitles_file(&self) -> PathBuf {
        self.output_path.join(SUBTITLES_FILE_NAME)
    }

    /// The subtitle path, if one was given and exists on disk.
    pub(crate) fn existing_subtitle_path(&self) -> Option<&Path> {
        let path = self.subtitle_path.as_deref()?;
        if path.exists() {
            Some(path)
        } else {
            log::warn!(
                "Subtitle file {} does not exist; subtitles will be empty",
                path.display()
            );
            None
        }
    }
}

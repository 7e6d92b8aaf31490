//! # vidslice
//!
//! Slice a video into a fixed number of evenly spaced still frames and pair
//! each frame with the subtitle shown at that moment.
//!
//! A run decodes the video with FFmpeg (via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)), writes the sampled
//! frames as JPEG images under `<output>/frames/` and writes the aligned
//! subtitle lines to `<output>/subtitles.txt`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vidslice::SliceOptions;
//!
//! let options = SliceOptions::new("clip.v1.mp4")
//!     .with_subtitle_path("clip.srt")
//!     .with_frame_count(4)
//!     .with_output_path("output");
//!
//! let report = vidslice::slice(&options)?;
//! for path in &report.frame_files {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), vidslice::SliceError>(())
//! ```
//!
//! ## Frame sampling
//!
//! [`sample_frame_indices`] splits the frame range into equal segments and
//! takes the midpoint of each:
//!
//! ```
//! assert_eq!(vidslice::sample_frame_indices(100, 2)?, vec![25, 74]);
//! # Ok::<(), vidslice::SliceError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod config;
mod conversion;
pub mod error;
pub mod ffmpeg;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod sampling;
pub mod scanner;
pub mod source;
pub mod subtitle;
pub mod video_file;
pub mod video_iterator;

pub use config::{
    DEFAULT_FRAME_COUNT, DEFAULT_OUTPUT_PATH, FRAMES_DIRECTORY_NAME, SUBTITLES_FILE_NAME,
    SliceOptions,
};
pub use error::SliceError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use metadata::VideoMetadata;
pub use output::prepare_output_directory;
pub use pipeline::{SliceReport, slice, slice_source};
pub use progress::{ProgressCallback, ProgressInfo};
pub use sampling::sample_frame_indices;
pub use scanner::{frame_file_name, frame_timestamp_label, output_file_prefix, scan_frames};
pub use source::FrameSource;
pub use subtitle::{SubtitleEvent, SubtitleTrack, align_subtitles, frame_to_subtitle_time};
pub use video_file::VideoFile;
pub use video_iterator::FrameIterator;

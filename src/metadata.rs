//! Video metadata types.
//!
//! [`VideoMetadata`] is read once when a [`VideoFile`](crate::VideoFile) is
//! opened and cached for the lifetime of the handle.

use std::time::Duration;

/// Metadata for the video stream used for slicing.
///
/// # Example
///
/// ```no_run
/// use vidslice::VideoFile;
///
/// let video = VideoFile::open("input.mp4").unwrap();
/// let metadata = video.metadata();
/// println!("{} frames at {:.2} fps", metadata.frame_count, metadata.frames_per_second);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (the stream's average frame rate).
    pub frames_per_second: f64,
    /// Number of frames reported by the container, or an estimate from
    /// duration and frame rate when the container does not report one.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
    /// Container-level duration.
    pub duration: Duration,
    /// Index of the stream inside the container.
    pub stream_index: usize,
}

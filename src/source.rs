//! The [`FrameSource`] abstraction.
//!
//! The pipeline only needs three things from a video: how many frames it
//! has, its frame rate, and a way to walk its frames in order. Keeping that
//! behind a trait lets the sampling and writing logic run against synthetic
//! frames in tests as well as against a decoded [`VideoFile`](crate::VideoFile).

use image::DynamicImage;

use crate::error::SliceError;

/// A finite, ordered sequence of video frames.
pub trait FrameSource {
    /// Iterator over `(frame_number, image)` pairs. It is lazy, finite and
    /// cannot be restarted.
    type Frames<'a>: Iterator<Item = Result<(u64, DynamicImage), SliceError>>
    where
        Self: 'a;

    /// Number of frames the source reports.
    fn frame_count(&self) -> u64;

    /// Frame rate used to turn frame numbers into timestamps.
    fn frames_per_second(&self) -> f64;

    /// Start walking the source from frame 0.
    ///
    /// Implementations yield at least the frames listed in `wanted` that
    /// exist in the source and may yield others; callers filter.
    fn frames(&mut self, wanted: &[u64]) -> Result<Self::Frames<'_>, SliceError>;
}

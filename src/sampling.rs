//! Frame index sampling.
//!
//! [`sample_frame_indices`] picks which frames of a video get extracted. The
//! index range `[0, total - 1]` is cut into `desired` equal-width segments
//! and the midpoint of each segment is taken, so the samples cover the whole
//! video and sit away from segment boundaries.
//!
//! # Example
//!
//! ```
//! use vidslice::sample_frame_indices;
//!
//! let indices = sample_frame_indices(10, 5)?;
//! assert_eq!(indices, vec![1, 3, 4, 6, 8]);
//! # Ok::<(), vidslice::SliceError>(())
//! ```

use crate::error::SliceError;

/// Compute `desired` frame indices spread evenly across `total` frames.
///
/// For segment `i` of width `seg = (total - 1) / desired`, the boundaries
/// `round(seg * i)` and `round(seg * (i + 1))` are rounded half-to-even and
/// their integer midpoint is emitted. The result always has exactly
/// `desired` entries in non-decreasing order.
///
/// When `desired` exceeds `total` segments are narrower than one frame and
/// indices repeat. A video with zero or one frame yields index `0` for every
/// sample.
///
/// # Errors
///
/// Returns [`SliceError::InvalidFrameCount`] if `desired` is zero.
pub fn sample_frame_indices(total: u64, desired: u64) -> Result<Vec<u64>, SliceError> {
    if desired == 0 {
        return Err(SliceError::InvalidFrameCount(0));
    }

    if total <= 1 {
        log::debug!("Video has {total} frame(s); every sample maps to frame 0");
        return Ok(vec![0; desired as usize]);
    }

    let segment_size = (total - 1) as f64 / desired as f64;

    let indices = (0..desired)
        .map(|segment| {
            let start = (segment_size * segment as f64).round_ties_even() as u64;
            let end = (segment_size * (segment + 1) as f64).round_ties_even() as u64;
            (start + end) / 2
        })
        .collect();

    Ok(indices)
}

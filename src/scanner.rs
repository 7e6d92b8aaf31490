//! Writing sampled frames to disk.
//!
//! [`scan_frames`] walks a frame sequence once and saves every frame whose
//! number is in the sample set as a JPEG named after the video and the
//! frame's `MM:SS` position, e.g. `clip_v1_mp4_frame_01:15.jpg`.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageFormat};

use crate::{
    error::SliceError,
    progress::{ProgressCallback, ProgressTracker},
};

/// File name prefix for a video: its base name with every `.` turned into `_`.
///
/// ```
/// assert_eq!(vidslice::output_file_prefix("videos/clip.v1.mp4"), "clip_v1_mp4");
/// ```
pub fn output_file_prefix<P: AsRef<Path>>(video_path: P) -> String {
    video_path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().replace('.', "_"))
        .unwrap_or_default()
}

/// `MM:SS` position of a frame, from the whole seconds of `frame / fps`.
///
/// Minutes are not wrapped into hours, so a frame past the hundredth minute
/// gets a three-digit minute field.
///
/// ```
/// assert_eq!(vidslice::frame_timestamp_label(750, 10.0), "01:15");
/// ```
pub fn frame_timestamp_label(frame_number: u64, frames_per_second: f64) -> String {
    let seconds = (frame_number as f64 / frames_per_second) as u64;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// `<prefix>_frame_<MM>:<SS>.jpg`.
pub fn frame_file_name(prefix: &str, frame_number: u64, frames_per_second: f64) -> String {
    format!(
        "{prefix}_frame_{}.jpg",
        frame_timestamp_label(frame_number, frames_per_second)
    )
}

/// Save the sampled frames of `frames` into `directory`.
///
/// Every frame whose number appears in `samples` is encoded as JPEG and
/// written to `directory/<prefix>_frame_<MM>:<SS>.jpg`. Frames sharing a
/// label overwrite each other. The sequence is consumed until it ends; the
/// first error it yields stops the scan and is returned.
///
/// Returns the path of every file written, in write order. If the sequence
/// ends before every sampled frame was seen, `progress` receives a last
/// update whose total is the number of frames actually written.
///
/// # Errors
///
/// Returns errors yielded by `frames`, [`SliceError::ImageError`] if a frame
/// cannot be encoded or written.
pub fn scan_frames<I>(
    frames: I,
    samples: &[u64],
    frames_per_second: f64,
    prefix: &str,
    directory: &Path,
    progress: &dyn ProgressCallback,
) -> Result<Vec<PathBuf>, SliceError>
where
    I: IntoIterator<Item = Result<(u64, DynamicImage), SliceError>>,
{
    let wanted: BTreeSet<u64> = samples.iter().copied().collect();
    let mut tracker = ProgressTracker::new(progress, Some(wanted.len() as u64));
    let mut written = Vec::with_capacity(wanted.len());

    for result in frames {
        let (frame_number, image) = result?;
        if !wanted.contains(&frame_number) {
            continue;
        }

        let path = directory.join(frame_file_name(prefix, frame_number, frames_per_second));
        image
            .into_rgb8()
            .save_with_format(&path, ImageFormat::Jpeg)?;
        log::debug!("Saved frame {frame_number} -> {}", path.display());

        tracker.advance(frame_number);
        written.push(path);
    }

    tracker.finish();
    Ok(written)
}

//! The slicing pipeline.
//!
//! [`slice`] runs a whole job described by [`SliceOptions`]: open the video,
//! sample frame numbers, load subtitles, recreate `<output>/frames/`, write
//! the sampled frames and write `<output>/subtitles.txt`.
//!
//! Arguments, frame rate and subtitle file are all checked before the output
//! directory is touched, so a bad subtitle file never leaves a half-written
//! result behind.

use std::{fs, path::PathBuf};

use crate::{
    config::SliceOptions,
    error::SliceError,
    output::prepare_output_directory,
    sampling::sample_frame_indices,
    scanner::{output_file_prefix, scan_frames},
    source::FrameSource,
    subtitle::{SubtitleTrack, align_subtitles},
    video_file::VideoFile,
};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct SliceReport {
    /// Sampled frame numbers, in sample order.
    pub frame_indices: Vec<u64>,
    /// Every frame image written, in write order.
    pub frame_files: Vec<PathBuf>,
    /// Lines written to the subtitle file.
    pub subtitle_lines: Vec<String>,
    /// Path of the subtitle text file.
    pub subtitles_file: PathBuf,
    /// Frame rate used for timestamps.
    pub frames_per_second: f64,
    /// Frame count the sampling was based on.
    pub total_frames: u64,
}

/// Slice the video named in `options`.
///
/// # Errors
///
/// - [`SliceError::InvalidFrameCount`] if `options.frame_count` is zero.
/// - Errors from [`VideoFile::open`] and from decoding.
/// - Subtitle read and parse errors, output directory errors and image
///   write errors.
///
/// # Example
///
/// ```no_run
/// use vidslice::SliceOptions;
///
/// let options = SliceOptions::new("talk.mp4")
///     .with_subtitle_path("talk.srt")
///     .with_frame_count(6);
/// let report = vidslice::slice(&options)?;
/// println!("wrote {} frames", report.frame_files.len());
/// # Ok::<(), vidslice::SliceError>(())
/// ```
pub fn slice(options: &SliceOptions) -> Result<SliceReport, SliceError> {
    log::info!("Extracting video: {}", options.video_path.display());
    if options.frame_count == 0 {
        return Err(SliceError::InvalidFrameCount(0));
    }

    let mut video = VideoFile::open(&options.video_path)?;
    slice_source(&mut video, options)
}

/// Slice an already opened [`FrameSource`].
///
/// Output file names are derived from `options.video_path`.
///
/// # Errors
///
/// As [`slice`], plus [`SliceError::InvalidFrameRate`] if the source reports
/// a frame rate that is not a positive finite number.
pub fn slice_source<S: FrameSource>(
    source: &mut S,
    options: &SliceOptions,
) -> Result<SliceReport, SliceError> {
    let total_frames = source.frame_count();
    let frames_per_second = source.frames_per_second();
    if !(frames_per_second.is_finite() && frames_per_second > 0.0) {
        return Err(SliceError::InvalidFrameRate(frames_per_second));
    }

    let frame_indices = sample_frame_indices(total_frames, options.frame_count)?;
    log::debug!("Sampled frame indices: {frame_indices:?}");

    let subtitles = options
        .existing_subtitle_path()
        .map(SubtitleTrack::load)
        .transpose()?;

    let frames_directory = options.frames_directory();
    prepare_output_directory(&frames_directory)?;

    let prefix = output_file_prefix(&options.video_path);
    let frame_files = scan_frames(
        source.frames(&frame_indices)?,
        &frame_indices,
        frames_per_second,
        &prefix,
        &frames_directory,
        options.progress.as_ref(),
    )?;

    let subtitle_lines = subtitles
        .as_ref()
        .map(|track| align_subtitles(track, &frame_indices, frames_per_second))
        .unwrap_or_default();
    let subtitles_file = options.subtitles_file();
    fs::write(&subtitles_file, subtitle_lines.join("\n"))?;

    log::info!(
        "Wrote {} frame image(s) to {} and {} subtitle line(s) to {}",
        frame_files.len(),
        frames_directory.display(),
        subtitle_lines.len(),
        subtitles_file.display(),
    );

    Ok(SliceReport {
        frame_indices,
        frame_files,
        subtitle_lines,
        subtitles_file,
        frames_per_second,
        total_frames,
    })
}

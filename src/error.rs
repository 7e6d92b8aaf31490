//! Error types for the `vidslice` crate.
//!
//! [`SliceError`] is the single error type returned by every fallible
//! operation. Variants fall into three groups: invalid arguments (frame
//! count, frame rate), I/O failures (opening or decoding the video, writing
//! output, reading subtitles) and subtitle format errors.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `vidslice` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SliceError {
    /// The requested number of frames is not a positive integer.
    #[error("Invalid frame count {0}: the number of frames must be at least 1")]
    InvalidFrameCount(i64),

    /// The video reports a frame rate that cannot be used for timestamps.
    #[error("Invalid frame rate {0}: the video must report a positive frame rate")]
    InvalidFrameRate(f64),

    /// The input video does not exist on disk.
    #[error("Video file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The video file could not be opened.
    #[error("Failed to open video file at {}: {reason}", .path.display())]
    FileOpen {
        /// Path that was passed to [`crate::VideoFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A video frame could not be decoded or converted.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// The output directory could not be created or cleared.
    #[error("Failed to prepare output directory {}: {source}", .path.display())]
    OutputDirectory {
        /// Directory that was being prepared.
        path: PathBuf,
        /// The filesystem error.
        source: IoError,
    },

    /// The subtitle file exists but could not be read.
    #[error("Failed to read subtitle file {}: {source}", .path.display())]
    SubtitleRead {
        /// Path of the subtitle file.
        path: PathBuf,
        /// The filesystem error.
        source: IoError,
    },

    /// The subtitle file could not be parsed.
    #[error("Malformed subtitle file at line {line}: {message}")]
    SubtitleParse {
        /// One-based line number where parsing failed.
        line: usize,
        /// What was wrong with the input.
        message: String,
    },

    /// An I/O error occurred while writing output files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding a frame.
    #[error("Image encoding error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for SliceError {
    fn from(error: FfmpegError) -> Self {
        SliceError::FfmpegError(error.to_string())
    }
}

//! Core [`VideoFile`] implementation.
//!
//! `VideoFile` opens a video with FFmpeg, picks the best video stream and
//! caches its [`VideoMetadata`]. Frames are decoded through
//! [`VideoFile::frames`], which hands out a lazy [`FrameIterator`].
//!
//! The FFmpeg demuxer context is owned by the `VideoFile` and released when
//! it is dropped, whichever way the caller leaves.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{codec::context::Context as CodecContext, format::context::Input, media::Type};

use crate::{
    conversion::rate_to_frames_per_second, error::SliceError, metadata::VideoMetadata,
    source::FrameSource, video_iterator::FrameIterator,
};

/// An opened video file.
///
/// # Example
///
/// ```no_run
/// use vidslice::{FrameSource, VideoFile};
///
/// let mut video = VideoFile::open("input.mp4")?;
/// for result in video.frames(&[0, 25, 50])? {
///     let (frame_number, image) = result?;
///     image.save(format!("frame_{frame_number}.png"))?;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct VideoFile {
    /// The opened FFmpeg input (demuxer) context.
    pub(crate) input_context: Input,
    /// Cached metadata for the selected video stream.
    pub(crate) metadata: VideoMetadata,
    /// Path to the opened file (kept for error messages).
    pub(crate) file_path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("metadata", &self.metadata)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file for slicing.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, locates the
    /// best video stream and reads its frame rate and frame count.
    ///
    /// # Errors
    ///
    /// - [`SliceError::FileNotFound`] if nothing exists at `path`.
    /// - [`SliceError::FileOpen`] if FFmpeg cannot open the container or
    ///   build a decoder for the video stream.
    /// - [`SliceError::NoVideoStream`] if the file has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SliceError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SliceError::FileNotFound(path.to_path_buf()));
        }

        log::debug!("Opening video file: {}", path.display());

        let open_error = |reason: String| SliceError::FileOpen {
            path: path.to_path_buf(),
            reason,
        };

        ffmpeg_next::init()
            .map_err(|error| open_error(format!("FFmpeg initialisation failed: {error}")))?;

        let input_context =
            ffmpeg_next::format::input(path).map_err(|error| open_error(error.to_string()))?;

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let metadata = {
            let stream = input_context
                .streams()
                .best(Type::Video)
                .ok_or(SliceError::NoVideoStream)?;
            let stream_index = stream.index();

            let decoder_context = CodecContext::from_parameters(stream.parameters())
                .map_err(|error| {
                    open_error(format!(
                        "Failed to read codec parameters for stream {stream_index}: {error}"
                    ))
                })?;
            let decoder = decoder_context.decoder().video().map_err(|error| {
                open_error(format!(
                    "Failed to create video decoder for stream {stream_index}: {error}"
                ))
            })?;

            let frames_per_second = rate_to_frames_per_second(stream.avg_frame_rate())
                .or_else(|| rate_to_frames_per_second(stream.rate()))
                .unwrap_or(0.0);

            // nb_frames is optional in most containers.
            let frame_count = if stream.frames() > 0 {
                stream.frames() as u64
            } else if frames_per_second > 0.0 {
                (duration.as_secs_f64() * frames_per_second) as u64
            } else {
                0
            };

            let codec = decoder
                .codec()
                .map(|codec| codec.name().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            VideoMetadata {
                width: decoder.width(),
                height: decoder.height(),
                frames_per_second,
                frame_count,
                codec,
                duration,
                stream_index,
            }
        };

        log::info!(
            "Opened video file: {} ({}x{}, {:.2} fps, {} frames, codec={}, duration={:.2}s)",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.frame_count,
            metadata.codec,
            metadata.duration.as_secs_f64(),
        );

        Ok(Self {
            input_context,
            metadata,
            file_path: path.to_path_buf(),
        })
    }

    /// Get a reference to the cached video metadata.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Path the video was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl FrameSource for VideoFile {
    type Frames<'a> = FrameIterator<'a>;

    fn frame_count(&self) -> u64 {
        self.metadata.frame_count
    }

    fn frames_per_second(&self) -> f64 {
        self.metadata.frames_per_second
    }

    /// Decode the video from the first frame, yielding the frames in
    /// `wanted`. Duplicates and ordering in `wanted` do not matter.
    fn frames(&mut self, wanted: &[u64]) -> Result<Self::Frames<'_>, SliceError> {
        let mut frame_numbers = wanted.to_vec();
        frame_numbers.sort_unstable();
        frame_numbers.dedup();
        FrameIterator::new(self, frame_numbers)
    }
}

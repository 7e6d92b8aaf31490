//! Lazy, pull-based video frame iterator.
//!
//! [`FrameIterator`] decodes a video from its first frame, numbering frames
//! in the order the decoder emits them, and converts only the frames that
//! were asked for. Each call to [`next()`](Iterator::next) feeds the decoder
//! just enough packets to reach the next requested frame.
//!
//! Create one via [`VideoFile::frames`](crate::FrameSource::frames).

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{conversion::frame_to_rgb_buffer, error::SliceError, video_file::VideoFile};

/// A lazy iterator over decoded video frames.
///
/// The iterator borrows the [`VideoFile`] mutably; dropping it releases the
/// borrow. Frames are numbered sequentially from 0, so the whole stream is
/// decoded up to the last requested frame and nothing is seeked.
pub struct FrameIterator<'a> {
    video: &'a mut VideoFile,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    stream_index: usize,
    /// Sorted, deduplicated frame numbers to yield.
    target_frames: Vec<u64>,
    /// Index into `target_frames` of the next frame to yield.
    target_index: usize,
    /// Number the next decoded frame will get.
    next_frame_number: u64,
    width: u32,
    height: u32,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    eof_sent: bool,
    done: bool,
}

impl<'a> FrameIterator<'a> {
    /// `frame_numbers` must be sorted and deduplicated.
    pub(crate) fn new(
        video: &'a mut VideoFile,
        frame_numbers: Vec<u64>,
    ) -> Result<Self, SliceError> {
        let stream_index = video.metadata.stream_index;
        let stream = video
            .input_context
            .stream(stream_index)
            .ok_or(SliceError::NoVideoStream)?;
        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();
        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        log::debug!(
            "Decoding stream {stream_index} for {} target frame(s)",
            frame_numbers.len()
        );

        Ok(Self {
            video,
            decoder,
            scaler,
            stream_index,
            target_frames: frame_numbers,
            target_index: 0,
            next_frame_number: 0,
            width,
            height,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            eof_sent: false,
            done: false,
        })
    }

    fn convert_current_frame(&mut self) -> Result<DynamicImage, SliceError> {
        self.scaler.run(&self.decoded_frame, &mut self.rgb_frame)?;

        let buffer = frame_to_rgb_buffer(&self.rgb_frame, self.width, self.height);
        let image = RgbImage::from_raw(self.width, self.height, buffer).ok_or_else(|| {
            SliceError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })?;
        Ok(DynamicImage::ImageRgb8(image))
    }

    fn finish_input(&mut self) -> Result<(), SliceError> {
        self.eof_sent = true;
        self.decoder.send_eof()?;
        Ok(())
    }
}

impl Iterator for FrameIterator<'_> {
    type Item = Result<(u64, DynamicImage), SliceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.target_index >= self.target_frames.len() {
            return None;
        }

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                let frame_number = self.next_frame_number;
                self.next_frame_number += 1;

                if frame_number != self.target_frames[self.target_index] {
                    continue;
                }

                self.target_index += 1;
                return match self.convert_current_frame() {
                    Ok(image) => Some(Ok((frame_number, image))),
                    Err(error) => {
                        self.done = true;
                        Some(Err(error))
                    }
                };
            }

            // Decoder is drained.
            if self.eof_sent {
                self.done = true;
                if self.target_index < self.target_frames.len() {
                    log::debug!(
                        "Stream ended after {} frames; {} requested frame(s) not reached",
                        self.next_frame_number,
                        self.target_frames.len() - self.target_index,
                    );
                }
                return None;
            }

            let mut packet = Packet::empty();
            let result = match packet.read(&mut self.video.input_context) {
                Ok(()) if packet.stream() == self.stream_index => self
                    .decoder
                    .send_packet(&packet)
                    .map_err(SliceError::from),
                Ok(()) => Ok(()),
                Err(FfmpegError::Eof) => self.finish_input(),
                Err(error) => {
                    log::warn!(
                        "Failed to read packet after frame {}: {error}; treating as end of stream",
                        self.next_frame_number,
                    );
                    self.finish_input()
                }
            };

            if let Err(error) = result {
                self.done = true;
                return Some(Err(error));
            }
        }
    }
}

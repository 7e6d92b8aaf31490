//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use image::{DynamicImage, Rgb, RgbImage};
use vidslice::{FrameSource, ProgressCallback, ProgressInfo, SliceError};

pub fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

/// An 8x8 frame whose red channel encodes the frame number.
pub fn solid_frame(frame_number: u64) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(
        8,
        8,
        Rgb([(frame_number % 256) as u8, 64, 128]),
    ))
}

/// A decoded-frame stand-in: `frame_count` solid frames at a fixed rate.
pub struct SyntheticVideo {
    pub frame_count: u64,
    pub frames_per_second: f64,
}

impl SyntheticVideo {
    pub fn new(frame_count: u64, frames_per_second: f64) -> Self {
        Self {
            frame_count,
            frames_per_second,
        }
    }
}

impl FrameSource for SyntheticVideo {
    type Frames<'a> = Box<dyn Iterator<Item = Result<(u64, DynamicImage), SliceError>> + 'a>;

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }

    fn frames(&mut self, _wanted: &[u64]) -> Result<Self::Frames<'_>, SliceError> {
        let frame_count = self.frame_count;
        Ok(Box::new(
            (0..frame_count).map(|frame_number| Ok((frame_number, solid_frame(frame_number)))),
        ))
    }
}

/// Records every progress snapshot it receives.
#[derive(Default)]
pub struct RecordingProgress {
    pub updates: Mutex<Vec<ProgressInfo>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.updates.lock().unwrap().push(info.clone());
    }
}

//! Internal conversion helpers shared by the decoding code.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy pixel data from an RGB24 FFmpeg frame into a tightly-packed buffer.
///
/// FFmpeg pads rows to an aligned stride; the padding is dropped so the
/// result can go straight into [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_length = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == row_length {
        return data[..row_length * (height as usize)].to_vec();
    }

    data.chunks(stride)
        .take(height as usize)
        .flat_map(|row| &row[..row_length])
        .copied()
        .collect()
}

/// Turn an FFmpeg rational rate into frames per second.
///
/// Returns `None` for a zero denominator or a non-positive rate.
pub(crate) fn rate_to_frames_per_second(rate: Rational) -> Option<f64> {
    if rate.denominator() == 0 {
        return None;
    }
    let frames_per_second = rate.numerator() as f64 / rate.denominator() as f64;
    (frames_per_second > 0.0).then_some(frames_per_second)
}

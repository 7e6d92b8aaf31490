//! End-to-end slicing tests over a synthetic frame source.

mod common;

use std::{fs, path::Path, sync::Arc};

use vidslice::{SliceError, SliceOptions, slice, slice_source};

use common::{RecordingProgress, SyntheticVideo};

fn sorted_file_names(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(directory)
        .expect("Failed to list directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn slices_synthetic_video_without_subtitles() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("output");
    let options = SliceOptions::new("videos/synthetic.clip.mp4")
        .with_frame_count(4)
        .with_output_path(&output);

    let mut video = SyntheticVideo::new(100, 10.0);
    let report = slice_source(&mut video, &options).expect("Slicing failed");

    assert_eq!(report.frame_indices, vec![12, 37, 62, 86]);
    assert_eq!(report.frame_files.len(), 4);
    assert_eq!(report.total_frames, 100);
    assert_eq!(
        sorted_file_names(&output.join("frames")),
        vec![
            "synthetic_clip_mp4_frame_00:01.jpg",
            "synthetic_clip_mp4_frame_00:03.jpg",
            "synthetic_clip_mp4_frame_00:06.jpg",
            "synthetic_clip_mp4_frame_00:08.jpg",
        ]
    );
    assert_eq!(fs::read_to_string(output.join("subtitles.txt")).unwrap(), "");
    assert!(report.subtitle_lines.is_empty());
}

#[test]
fn removes_files_from_previous_runs() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("output");
    fs::create_dir_all(output.join("frames")).unwrap();
    fs::write(output.join("frames").join("old_frame_09:59.jpg"), b"stale").unwrap();

    let options = SliceOptions::new("clip.mp4")
        .with_frame_count(2)
        .with_output_path(&output);
    slice_source(&mut SyntheticVideo::new(100, 25.0), &options).expect("Slicing failed");

    let names = sorted_file_names(&output.join("frames"));
    assert_eq!(names.len(), 2);
    assert!(!names.iter().any(|name| name.starts_with("old_")));
}

#[test]
fn aligns_subtitles_end_to_end() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("output");
    let srt_path = temporary_directory.path().join("clip.srt");
    fs::write(
        &srt_path,
        "1\n00:00:01,000 --> 00:00:02,000\nfirst line\nsecond\n\n\
         2\n00:00:06,000 --> 00:00:07,000\n\\N\n\n\
         3\n00:00:08,000 --> 00:00:09,000\n<i>last</i>\n",
    )
    .unwrap();

    let options = SliceOptions::new("clip.mp4")
        .with_subtitle_path(&srt_path)
        .with_frame_count(4)
        .with_output_path(&output);
    let report = slice_source(&mut SyntheticVideo::new(100, 10.0), &options).expect("Slicing failed");

    // Samples 12, 37, 62, 86 fall at 1.2s, 3.7s, 6.2s and 8.6s.
    assert_eq!(report.subtitle_lines, vec!["first line second", "<i>last</i>"]);
    assert_eq!(
        fs::read_to_string(output.join("subtitles.txt")).unwrap(),
        "first line second\n<i>last</i>"
    );
}

#[test]
fn missing_subtitle_file_writes_empty_output() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("output");
    let options = SliceOptions::new("clip.mp4")
        .with_subtitle_path(temporary_directory.path().join("absent.srt"))
        .with_output_path(&output);

    let report = slice_source(&mut SyntheticVideo::new(50, 25.0), &options).expect("Slicing failed");

    assert_eq!(report.frame_indices.len(), 2);
    assert_eq!(fs::read_to_string(output.join("subtitles.txt")).unwrap(), "");
}

#[test]
fn reports_progress_for_each_frame_written() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let progress = Arc::new(RecordingProgress::default());
    let options = SliceOptions::new("clip.mp4")
        .with_frame_count(5)
        .with_output_path(temporary_directory.path().join("output"))
        .with_progress(progress.clone());

    slice_source(&mut SyntheticVideo::new(10, 1.0), &options).expect("Slicing failed");

    let updates = progress.updates.lock().unwrap();
    let frames: Vec<Option<u64>> = updates.iter().map(|info| info.current_frame).collect();
    assert_eq!(frames, vec![Some(1), Some(3), Some(4), Some(6), Some(8)]);
    assert_eq!(updates.last().and_then(|info| info.percentage), Some(100.0));
}

#[test]
fn invalid_frame_rate_is_rejected_before_output() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("output");
    let options = SliceOptions::new("clip.mp4").with_output_path(&output);

    let result = slice_source(&mut SyntheticVideo::new(100, 0.0), &options);

    assert!(matches!(result, Err(SliceError::InvalidFrameRate(_))));
    assert!(!output.exists());
}

#[test]
fn zero_frame_count_is_rejected_before_output() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("output");
    let options = SliceOptions::new("clip.mp4")
        .with_frame_count(0)
        .with_output_path(&output);

    let result = slice_source(&mut SyntheticVideo::new(100, 10.0), &options);
    assert!(matches!(result, Err(SliceError::InvalidFrameCount(0))));

    // `slice` checks the count before touching the video at all.
    let result = slice(&options);
    assert!(matches!(result, Err(SliceError::InvalidFrameCount(0))));
    assert!(!output.exists());
}

#[test]
fn malformed_subtitles_leave_previous_output_untouched() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("output");
    let kept = output.join("frames").join("clip_mp4_frame_00:00.jpg");
    fs::create_dir_all(output.join("frames")).unwrap();
    fs::write(&kept, b"previous run").unwrap();

    let srt_path = temporary_directory.path().join("broken.srt");
    fs::write(&srt_path, "1\n00:00:01,000 --> soon\nText\n").unwrap();

    let options = SliceOptions::new("clip.mp4")
        .with_subtitle_path(&srt_path)
        .with_output_path(&output);
    let result = slice_source(&mut SyntheticVideo::new(100, 10.0), &options);

    assert!(matches!(result, Err(SliceError::SubtitleParse { line: 2, .. })));
    assert_eq!(fs::read(&kept).unwrap(), b"previous run");
}

#[test]
fn single_frame_video_samples_frame_zero() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("output");
    let options = SliceOptions::new("still.png.mp4")
        .with_frame_count(3)
        .with_output_path(&output);

    let report = slice_source(&mut SyntheticVideo::new(1, 30.0), &options).expect("Slicing failed");

    assert_eq!(report.frame_indices, vec![0, 0, 0]);
    assert_eq!(
        sorted_file_names(&output.join("frames")),
        vec!["still_png_mp4_frame_00:00.jpg"]
    );
}

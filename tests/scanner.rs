//! Frame naming and frame writing tests.

mod common;

use std::fs;

use vidslice::{
    SliceError, frame_file_name, frame_timestamp_label, output_file_prefix, scan_frames,
};

use common::{RecordingProgress, solid_frame};

#[test]
fn prefix_replaces_every_dot() {
    assert_eq!(output_file_prefix("clip.v1.mp4"), "clip_v1_mp4");
    assert_eq!(output_file_prefix("/media/videos/holiday.mkv"), "holiday_mkv");
    assert_eq!(output_file_prefix("noextension"), "noextension");
}

#[test]
fn timestamp_label_uses_whole_seconds() {
    assert_eq!(frame_timestamp_label(0, 25.0), "00:00");
    assert_eq!(frame_timestamp_label(24, 25.0), "00:00");
    assert_eq!(frame_timestamp_label(25, 25.0), "00:01");
    assert_eq!(frame_timestamp_label(750, 10.0), "01:15");
    assert_eq!(frame_timestamp_label(1799, 29.97), "01:00");
}

#[test]
fn timestamp_label_does_not_wrap_minutes() {
    assert_eq!(frame_timestamp_label(6000, 1.0), "100:00");
}

#[test]
fn file_name_at_seventy_five_seconds() {
    let prefix = output_file_prefix("clip.v1.mp4");
    assert_eq!(
        frame_file_name(&prefix, 750, 10.0),
        "clip_v1_mp4_frame_01:15.jpg"
    );
}

#[test]
fn writes_only_sampled_frames() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let directory = temporary_directory.path();
    let frames = (0..100).map(|n| Ok((n, solid_frame(n))));
    let progress = RecordingProgress::default();

    let written = scan_frames(frames, &[12, 37, 62, 86], 10.0, "clip", directory, &progress)
        .expect("Scan failed");

    assert_eq!(written.len(), 4);
    let mut names: Vec<String> = fs::read_dir(directory)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "clip_frame_00:01.jpg",
            "clip_frame_00:03.jpg",
            "clip_frame_00:06.jpg",
            "clip_frame_00:08.jpg",
        ]
    );

    let decoded = image::open(directory.join("clip_frame_00:03.jpg")).expect("Not a readable image");
    assert_eq!((decoded.width(), decoded.height()), (8, 8));
}

#[test]
fn duplicate_samples_write_each_frame_once() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frames = (0..3).map(|n| Ok((n, solid_frame(n))));
    let progress = RecordingProgress::default();

    let written = scan_frames(
        frames,
        &[0, 0, 1, 1, 1, 2],
        1.0,
        "short",
        temporary_directory.path(),
        &progress,
    )
    .expect("Scan failed");

    assert_eq!(written.len(), 3);
    assert_eq!(fs::read_dir(temporary_directory.path()).unwrap().count(), 3);
}

#[test]
fn frames_sharing_a_label_collapse_into_one_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frames = (0..10).map(|n| Ok((n, solid_frame(n))));
    let progress = RecordingProgress::default();

    let written = scan_frames(
        frames,
        &[1, 2],
        10.0,
        "fast",
        temporary_directory.path(),
        &progress,
    )
    .expect("Scan failed");

    assert_eq!(written.len(), 2);
    assert_eq!(written[0], written[1]);
    assert_eq!(fs::read_dir(temporary_directory.path()).unwrap().count(), 1);
}

#[test]
fn samples_past_the_end_are_skipped() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frames = (0..5).map(|n| Ok((n, solid_frame(n))));
    let progress = RecordingProgress::default();

    let written = scan_frames(
        frames,
        &[2, 40],
        1.0,
        "clip",
        temporary_directory.path(),
        &progress,
    )
    .expect("Scan failed");

    assert_eq!(written.len(), 1);

    // The closing update shrinks the total to what was written.
    let updates = progress.updates.lock().unwrap();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].total, Some(2));
    let last = updates.last().unwrap();
    assert_eq!(last.total, Some(1));
    assert_eq!(last.current, 1);
    assert_eq!(last.current_frame, None);
    assert_eq!(last.percentage, Some(100.0));
}

#[test]
fn decode_errors_stop_the_scan() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frames = (0..5).map(|n| {
        if n == 3 {
            Err(SliceError::VideoDecodeError("corrupt packet".to_string()))
        } else {
            Ok((n, solid_frame(n)))
        }
    });
    let progress = RecordingProgress::default();

    let result = scan_frames(
        frames,
        &[1, 4],
        1.0,
        "clip",
        temporary_directory.path(),
        &progress,
    );

    assert!(matches!(result, Err(SliceError::VideoDecodeError(_))));
    // Frame 1 was written before the failure.
    assert_eq!(fs::read_dir(temporary_directory.path()).unwrap().count(), 1);
}

#[test]
fn progress_reports_each_write() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frames = (0..20).map(|n| Ok((n, solid_frame(n))));
    let progress = RecordingProgress::default();

    scan_frames(
        frames,
        &[5, 10, 15, 15],
        5.0,
        "clip",
        temporary_directory.path(),
        &progress,
    )
    .expect("Scan failed");

    let updates = progress.updates.lock().unwrap();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[0].total, Some(3));
    assert_eq!(updates[0].current_frame, Some(5));
    assert_eq!(updates[2].current, 3);
    assert_eq!(updates[2].percentage, Some(100.0));
}

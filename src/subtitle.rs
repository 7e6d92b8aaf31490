//! Subtitle loading and alignment.
//!
//! [`SubtitleTrack`] reads SubRip (`.srt`) and WebVTT (`.vtt`) files into an
//! ordered list of [`SubtitleEvent`]s. [`align_subtitles`] then looks up, for
//! every sampled frame, the event on screen at that frame's timestamp.
//!
//! # Example
//!
//! ```
//! use vidslice::{SubtitleTrack, align_subtitles};
//!
//! let track = SubtitleTrack::parse("1\n00:00:01,000 --> 00:00:03,000\nhello\n")?;
//! // At 10 fps, frame 20 is at 2.0s and frame 10 is exactly on the start.
//! assert_eq!(align_subtitles(&track, &[10, 20], 10.0), vec!["hello"]);
//! # Ok::<(), vidslice::SliceError>(())
//! ```

use std::{
    fs,
    io::{Error as IoError, ErrorKind},
    path::Path,
    time::Duration,
};

use nom::{
    Err as NomErr, IResult,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, digit1, one_of, space0},
    combinator::{map_res, opt},
    error::{Error as NomError, ErrorKind as NomErrorKind},
    sequence::{delimited, preceded},
};

use crate::error::SliceError;

const TIMING_ARROW: &str = "-->";

/// A single subtitle event with timing and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEvent {
    /// When this subtitle starts displaying.
    pub start_time: Duration,
    /// When this subtitle stops displaying.
    pub end_time: Duration,
    /// Text lines of the cue, joined with `\n`.
    pub text: String,
    /// Zero-based position of this event in the file.
    pub index: usize,
}

impl SubtitleEvent {
    /// The text on a single line: `\n` and ASS-style `\N` breaks become spaces.
    pub fn normalized_text(&self) -> String {
        self.text.replace("\\N", " ").replace('\n', " ")
    }

    /// Whether `time` falls strictly inside this event.
    ///
    /// Boundaries are excluded: an event from 1s to 3s is not active at
    /// exactly 1s or 3s.
    pub fn is_active_at(&self, time: Duration) -> bool {
        self.start_time < time && time < self.end_time
    }
}

/// The events of a subtitle file, in file order.
#[derive(Debug, Clone, Default)]
pub struct SubtitleTrack {
    events: Vec<SubtitleEvent>,
}

impl SubtitleTrack {
    /// Read and parse a UTF-8 subtitle file.
    ///
    /// # Errors
    ///
    /// - [`SliceError::SubtitleRead`] if the file cannot be read or is not
    ///   valid UTF-8.
    /// - [`SliceError::SubtitleParse`] if its contents are malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SliceError> {
        let path = path.as_ref();
        let read_error = |source| SliceError::SubtitleRead {
            path: path.to_path_buf(),
            source,
        };

        let bytes = fs::read(path).map_err(read_error)?;
        let contents = String::from_utf8(bytes)
            .map_err(|error| read_error(IoError::new(ErrorKind::InvalidData, error)))?;

        let track = Self::parse(&contents)?;
        log::info!(
            "Loaded {} subtitle event(s) from {}",
            track.len(),
            path.display()
        );
        Ok(track)
    }

    /// Parse SubRip or WebVTT text.
    ///
    /// Every line of the form `start --> end` starts a new cue, whether or
    /// not a blank line precedes it; the lines after it, up to the next
    /// timing line, are the cue's text. A cue identifier just before a
    /// timing line (a number, or any line opening a block) is dropped.
    /// Blank lines between text lines are kept as part of the text.
    ///
    /// Input starting with `WEBVTT` is read as WebVTT: the header block and
    /// `NOTE`, `STYLE` and `REGION` blocks are skipped and cue settings after
    /// the end timestamp are ignored. Whitespace-only input gives an empty
    /// track.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::SubtitleParse`] for a malformed timing line or
    /// text that appears before the first cue.
    pub fn parse(input: &str) -> Result<Self, SliceError> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        let lines: Vec<&str> = input.lines().map(str::trim_end).collect();
        let is_webvtt = lines.first().is_some_and(|line| line.starts_with("WEBVTT"));

        let mut events: Vec<SubtitleEvent> = Vec::new();
        let mut pending_blank_lines = 0;
        let mut skipping_block = false;

        for (position, &line) in lines.iter().enumerate() {
            let line_number = position + 1;
            if line.trim().is_empty() {
                skipping_block = false;
                pending_blank_lines += 1;
                continue;
            }

            let opens_block = position == 0 || lines[position - 1].trim().is_empty();
            if is_webvtt && opens_block && (position == 0 || is_webvtt_metadata(line)) {
                skipping_block = true;
            }
            if skipping_block {
                continue;
            }

            if line.contains(TIMING_ARROW) {
                let (start_time, end_time) = parse_timing_line(line, line_number)?;
                events.push(SubtitleEvent {
                    start_time,
                    end_time,
                    text: String::new(),
                    index: events.len(),
                });
                pending_blank_lines = 0;
                continue;
            }

            let precedes_timing = lines
                .get(position + 1)
                .is_some_and(|next| next.contains(TIMING_ARROW));
            if precedes_timing && (opens_block || is_cue_number(line)) {
                continue;
            }

            let Some(current) = events.last_mut() else {
                return Err(SliceError::SubtitleParse {
                    line: line_number,
                    message: format!(
                        "expected a cue timing line (`start {TIMING_ARROW} end`), found {line:?}"
                    ),
                });
            };
            if !current.text.is_empty() {
                current.text.push_str(&"\n".repeat(pending_blank_lines + 1));
            }
            current.text.push_str(line);
            pending_blank_lines = 0;
        }

        Ok(Self { events })
    }

    /// All events, in file order.
    pub fn events(&self) -> &[SubtitleEvent] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the track has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The first event, in file order, active at `time`.
    ///
    /// This is a linear scan over the events.
    pub fn event_at(&self, time: Duration) -> Option<&SubtitleEvent> {
        self.events.iter().find(|event| event.is_active_at(time))
    }
}

impl From<Vec<SubtitleEvent>> for SubtitleTrack {
    fn from(events: Vec<SubtitleEvent>) -> Self {
        Self { events }
    }
}

/// Subtitle-clock time of a frame: `frame * 1000 / fps` milliseconds,
/// rounded half to even.
pub fn frame_to_subtitle_time(frames_per_second: f64, frame_number: u64) -> Duration {
    let milliseconds = (frame_number as f64 * (1000.0 / frames_per_second)).round_ties_even();
    Duration::from_millis(milliseconds.max(0.0) as u64)
}

/// Text shown at each sampled frame, skipping frames with no text.
///
/// Samples are visited in order, duplicates included. For each one the
/// first active event's [normalized text](SubtitleEvent::normalized_text)
/// is taken; texts that are empty after trimming are dropped.
pub fn align_subtitles(
    track: &SubtitleTrack,
    samples: &[u64],
    frames_per_second: f64,
) -> Vec<String> {
    samples
        .iter()
        .filter_map(|&frame_number| {
            let time = frame_to_subtitle_time(frames_per_second, frame_number);
            let text = track.event_at(time)?.normalized_text();
            log::debug!("Frame {frame_number} at {time:?}: {text:?}");
            (!text.trim().is_empty()).then_some(text)
        })
        .collect()
}

fn is_cue_number(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_webvtt_metadata(line: &str) -> bool {
    ["NOTE", "STYLE", "REGION"]
        .iter()
        .any(|keyword| line == *keyword || line.starts_with(&format!("{keyword} ")))
}

fn parse_timing_line(line: &str, line_number: usize) -> Result<(Duration, Duration), SliceError> {
    timing_line(line)
        .map(|(_, times)| times)
        .map_err(|error| SliceError::SubtitleParse {
            line: line_number,
            message: format!("invalid timing line {line:?}: {error}"),
        })
}

/// `start --> end`, with anything after `end` (WebVTT cue settings) ignored.
fn timing_line(input: &str) -> IResult<&str, (Duration, Duration)> {
    let (input, _) = space0(input)?;
    let (input, start) = timestamp(input)?;
    let (input, _) = delimited(space0, tag(TIMING_ARROW), space0)(input)?;
    let (input, end) = timestamp(input)?;
    Ok((input, (start, end)))
}

/// `[hh:]mm:ss[,mmm]`, also accepting `.` before the milliseconds.
///
/// Short fields are tolerated: `1:2:3,4` reads as `01:02:03,400`. A leading
/// field too large to represent fails the parse.
fn timestamp(input: &str) -> IResult<&str, Duration> {
    let start = input;
    let (input, first) = map_res(digit1, str::parse::<u64>)(input)?;
    let (input, second) = preceded(char(':'), clock_field)(input)?;
    let (input, third) = opt(preceded(char(':'), clock_field))(input)?;
    let (input, millis) = opt(preceded(one_of(",."), milliseconds))(input)?;

    let (hours, minutes, seconds) = match third {
        Some(seconds) => (first, second, seconds),
        None => (0, first, second),
    };

    let total_millis = hours
        .checked_mul(60 * 60 * 1000)
        .zip(minutes.checked_mul(60 * 1000))
        .and_then(|(hours, minutes)| hours.checked_add(minutes))
        .and_then(|total| total.checked_add(seconds * 1000 + millis.unwrap_or(0)))
        .ok_or_else(|| NomErr::Error(NomError::new(start, NomErrorKind::TooLarge)))?;

    Ok((input, Duration::from_millis(total_millis)))
}

fn clock_field(input: &str) -> IResult<&str, u64> {
    map_res(
        take_while_m_n(1, 2, |c: char| c.is_ascii_digit()),
        str::parse::<u64>,
    )(input)
}

/// Up to three digits, right-padded: `,2` means 200 ms.
fn milliseconds(input: &str) -> IResult<&str, u64> {
    map_res(
        take_while_m_n(0, 3, |c: char| c.is_ascii_digit()),
        |digits: &str| format!("{digits:0<3}").parse::<u64>(),
    )(input)
}

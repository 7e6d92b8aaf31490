use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};
use vidslice::{
    DEFAULT_FRAME_COUNT, DEFAULT_OUTPUT_PATH, FfmpegLogLevel, ProgressCallback, ProgressInfo,
    SliceError, SliceOptions, SliceReport,
};

const CLI_AFTER_HELP: &str = "Examples:\n  vidslice --video_path clip.mp4\n  vidslice --video_path clip.mp4 --srt_path clip.srt --num_frames 8 --output_path out\n  vidslice --video_path clip.mp4 --num_frames 4 --progress --json";

#[derive(Debug, Parser)]
#[command(
    name = "vidslice",
    version,
    about = "Extract evenly spaced frames from a video together with the subtitles shown at each frame",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Path to the video file.
    #[arg(long = "video_path")]
    video_path: PathBuf,

    /// Path to the subtitles file. Ignored if it does not exist.
    #[arg(long = "srt_path")]
    srt_path: Option<PathBuf>,

    /// Number of frames to extract.
    #[arg(
        long = "num_frames",
        default_value_t = DEFAULT_FRAME_COUNT as i64,
        allow_negative_numbers = true
    )]
    num_frames: i64,

    /// Path to the output directory.
    #[arg(long = "output_path", default_value = DEFAULT_OUTPUT_PATH)]
    output_path: PathBuf,

    /// Show debug logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar while frames are written.
    #[arg(long)]
    progress: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long = "log_level")]
    log_level: Option<String>,

    /// Print the result as machine-readable JSON.
    #[arg(long)]
    json: bool,
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total);
        }
        self.bar.set_position(info.current);
        if let Some(frame_number) = info.current_frame {
            self.bar.set_message(format!("frame {frame_number}"));
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "debug"
    } else {
        "warn,vidslice=info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn parse_frame_count(value: i64) -> Result<u64, SliceError> {
    u64::try_from(value)
        .ok()
        .filter(|&count| count > 0)
        .ok_or(SliceError::InvalidFrameCount(value))
}

fn report_json(report: &SliceReport) -> Value {
    json!({
        "frames_per_second": report.frames_per_second,
        "total_frames": report.total_frames,
        "frame_indices": report.frame_indices,
        "frame_files": report
            .frame_files
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>(),
        "subtitles_file": report.subtitles_file.display().to_string(),
        "subtitle_lines": report.subtitle_lines,
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(level) = &cli.log_level {
        vidslice::set_ffmpeg_log_level(level.parse::<FfmpegLogLevel>()?);
    }

    let mut options = SliceOptions::new(&cli.video_path)
        .with_frame_count(parse_frame_count(cli.num_frames)?)
        .with_output_path(&cli.output_path);
    if let Some(srt_path) = &cli.srt_path {
        options = options.with_subtitle_path(srt_path);
    }

    let progress_bar = if cli.progress {
        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        options = options.with_progress(Arc::new(TerminalProgress { bar: bar.clone() }));
        Some(bar)
    } else {
        None
    };

    let report = vidslice::slice(&options)?;

    if let Some(bar) = progress_bar {
        bar.finish_with_message("done");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "Extracted {} frame(s) to {} and {} subtitle line(s) to {}",
                report.frame_files.len(),
                options.frames_directory().display(),
                report.subtitle_lines.len(),
                report.subtitles_file.display(),
            )
            .green()
        );
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

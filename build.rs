//! Build-time hints for locating FFmpeg.
//!
//! `ffmpeg-sys-next` does the actual discovery and linking. This script only
//! warns early when the environment looks wrong, which otherwise shows up
//! as a long linker error.

use std::env;
use std::path::{Path, PathBuf};

fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    if let Some(ffmpeg_dir) = env::var_os("FFMPEG_DIR").map(PathBuf::from) {
        check_ffmpeg_dir(&ffmpeg_dir);
        return;
    }

    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() == "windows" {
        suggest_vcpkg_install();
    }
}

fn check_ffmpeg_dir(ffmpeg_dir: &Path) {
    for subdirectory in ["include", "lib"] {
        let expected = ffmpeg_dir.join(subdirectory);
        if !expected.is_dir() {
            println!(
                "cargo:warning=FFMPEG_DIR is set to {} but {} is missing.",
                ffmpeg_dir.display(),
                expected.display(),
            );
        }
    }
}

fn suggest_vcpkg_install() {
    let Ok(vcpkg_root) = env::var("VCPKG_ROOT") else {
        println!(
            "cargo:warning=FFMPEG_DIR is not set. On Windows, install FFmpeg (e.g. `vcpkg install ffmpeg`) and point FFMPEG_DIR at it."
        );
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let candidate = Path::new(&vcpkg_root).join("installed").join(&triplet);
    if candidate.is_dir() {
        println!(
            "cargo:warning=Found a vcpkg install at {}; set FFMPEG_DIR to it if FFmpeg is not picked up.",
            candidate.display(),
        );
    } else {
        println!(
            "cargo:warning=VCPKG_ROOT is set but {} does not exist.",
            candidate.display(),
        );
    }
}

//! Typed argument list for the screen encoder.
//!
//! Every argument is a discrete `OsString`; nothing is ever handed to a shell.

use crate::{CaptureRegion, CoreResult, DisplaySize, Platform, RecorderError};

use std::{
    ffi::OsString,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;

/// Capture rate used unless configured otherwise.
pub const DEFAULT_FRAMERATE: u32 = 30;

const WINDOWS_INPUT: &str = "desktop";
const MACOS_INPUT: &str = "1:0";
const LINUX_INPUT: &str = ":0.0";

/// Builder for one encoder invocation.
#[derive(Debug, Clone)]
pub struct EncoderInvocation {
    platform: Platform,
    display: DisplaySize,
    region: Option<CaptureRegion>,
    output_path: PathBuf,
    framerate: u32,
    input: Option<String>,
}

impl EncoderInvocation {
    /// Start a full-screen invocation writing to `output_path`.
    pub fn new(platform: Platform, display: DisplaySize, output_path: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            display,
            region: None,
            output_path: output_path.into(),
            framerate: DEFAULT_FRAMERATE,
            input: None,
        }
    }

    /// Limit capture to a region; `None` records the full display.
    pub fn with_region(mut self, region: Option<CaptureRegion>) -> Self {
        self.region = region;
        self
    }

    /// Override the capture framerate.
    pub fn with_framerate(mut self, framerate: u32) -> Self {
        self.framerate = framerate;
        self
    }

    /// Override the capture device (`desktop`, `1:0`, `:0.0` by default).
    pub fn with_input(mut self, input: Option<String>) -> Self {
        self.input = input;
        self
    }

    /// Destination file.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Produce the argument list, excluding the program name.
    #[track_caller]
    pub fn build(&self) -> CoreResult<Vec<OsString>> {
        let region = self.region.map(CaptureRegion::normalized).transpose()?;
        let framerate = self.framerate.to_string();

        let mut args: Vec<OsString> = Vec::new();
        let mut push = |values: &[&str]| args.extend(values.iter().map(OsString::from));

        match &self.platform {
            Platform::Windows => {
                push(&["-f", "gdigrab", "-framerate", &framerate]);
                if let Some(r) = region {
                    push(&[
                        "-offset_x",
                        &r.x.to_string(),
                        "-offset_y",
                        &r.y.to_string(),
                        "-video_size",
                        &format!("{}x{}", r.width, r.height),
                    ]);
                }
                push(&["-i", self.input.as_deref().unwrap_or(WINDOWS_INPUT)]);
            }
            Platform::MacOs => {
                push(&[
                    "-f",
                    "avfoundation",
                    "-framerate",
                    &framerate,
                    "-i",
                    self.input.as_deref().unwrap_or(MACOS_INPUT),
                ]);
                // avfoundation has no offset option, so crop after capture.
                if let Some(r) = region {
                    push(&[
                        "-vf",
                        &format!("crop={}:{}:{}:{}", r.width, r.height, r.x, r.y),
                    ]);
                }
            }
            Platform::Linux => {
                let display = self.input.as_deref().unwrap_or(LINUX_INPUT);
                let (size, source) = match region {
                    Some(r) => (
                        format!("{}x{}", r.width, r.height),
                        format!("{}+{},{}", display, r.x, r.y),
                    ),
                    None => (
                        format!("{}x{}", self.display.width & !1, self.display.height & !1),
                        display.to_string(),
                    ),
                };
                push(&[
                    "-f",
                    "x11grab",
                    "-framerate",
                    &framerate,
                    "-video_size",
                    &size,
                    "-i",
                    &source,
                ]);
            }
            Platform::Unsupported(name) => {
                return Err(RecorderError::UnsupportedPlatform {
                    platform: name.clone(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        push(&[
            "-c:v",
            "libx264",
            "-preset",
            "ultrafast",
            "-pix_fmt",
            "yuv420p",
            "-y",
        ]);
        args.push(self.output_path.clone().into_os_string());

        Ok(args)
    }
}

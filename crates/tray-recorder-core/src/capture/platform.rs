use std::fmt;

/// Operating system the encoder is being driven on.
///
/// Each variant selects its own capture driver; there is no shared
/// abstraction over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// GDI screen grab.
    Windows,
    /// AVFoundation screen device.
    MacOs,
    /// X11 screen grab.
    Linux,
    /// Anything else, carrying the OS name for diagnostics.
    Unsupported(String),
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            other => Platform::Unsupported(other.to_string()),
        }
    }

    /// Exit code the encoder reports after being interrupted by a stop
    /// request rather than finishing on its own.
    pub fn stop_exit_code(&self) -> Option<i32> {
        match self {
            Platform::Windows | Platform::MacOs | Platform::Linux => Some(255),
            Platform::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::MacOs => f.write_str("macos"),
            Platform::Linux => f.write_str("linux"),
            Platform::Unsupported(name) => f.write_str(name),
        }
    }
}

/// Pixel size of the primary display's work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DisplaySize {
    /// Create a display size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

use crate::{CaptureRegion, DisplaySize, EncoderInvocation, Platform, RecorderError};

use std::ffi::OsString;

const OUTPUT: &str = "/tmp/scratch/recording-1.mp4";
const DISPLAY: DisplaySize = DisplaySize {
    width: 1920,
    height: 1080,
};

#[allow(clippy::unwrap_used)]
fn build(platform: Platform, region: Option<CaptureRegion>) -> Vec<String> {
    EncoderInvocation::new(platform, DISPLAY, OUTPUT)
        .with_region(region)
        .build()
        .unwrap()
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn ends_with_profile(args: &[String]) -> bool {
    let tail = [
        "-c:v", "libx264", "-preset", "ultrafast", "-pix_fmt", "yuv420p", "-y", OUTPUT,
    ];
    args.len() >= tail.len() && args[args.len() - tail.len()..] == tail
}

/// WHAT: Full-screen Linux capture uses the display size and default X display
/// WHY: x11grab needs explicit frame dimensions for the whole screen
#[test]
fn given_no_region_on_linux_when_building_then_full_display_captured() {
    // Given/When: A full-screen Linux invocation
    let args = build(Platform::Linux, None);

    // Then: The capture source, size and encoding profile are present
    assert_eq!(
        args[..8],
        [
            "-f",
            "x11grab",
            "-framerate",
            "30",
            "-video_size",
            "1920x1080",
            "-i",
            ":0.0"
        ]
    );
    assert!(ends_with_profile(&args));
}

/// WHAT: A Linux region passes its size and origin to x11grab
/// WHY: Region capture must not record the full display
#[test]
fn given_odd_region_on_linux_when_building_then_even_size_and_offset_passed() {
    // Given: A region 101x50 at (10, 10)
    let region = CaptureRegion::new(10, 10, 101, 50);

    // When: Building the invocation
    let args = build(Platform::Linux, Some(region));

    // Then: Width is decremented to 100 and the origin is appended to the display
    assert!(args.windows(2).any(|w| w == ["-video_size", "100x50"]));
    assert!(args.windows(2).any(|w| w == ["-i", ":0.0+10,10"]));
    assert!(ends_with_profile(&args));
}

/// WHAT: A Windows region uses gdigrab offsets before the input
/// WHY: gdigrab options only apply when given ahead of `-i desktop`
#[test]
fn given_region_on_windows_when_building_then_offsets_precede_input() {
    // Given: A region 640x481 at (100, 200)
    let region = CaptureRegion::new(100, 200, 640, 481);

    // When: Building the invocation
    let args = build(Platform::Windows, Some(region));

    // Then: Offsets and the even size come before the desktop input
    assert_eq!(
        args[..12],
        [
            "-f",
            "gdigrab",
            "-framerate",
            "30",
            "-offset_x",
            "100",
            "-offset_y",
            "200",
            "-video_size",
            "640x480",
            "-i",
            "desktop"
        ]
    );
    assert!(ends_with_profile(&args));
}

/// WHAT: Full-screen Windows capture has no size options
/// WHY: gdigrab records the whole desktop by default
#[test]
fn given_no_region_on_windows_when_building_then_desktop_only() {
    let args = build(Platform::Windows, None);

    assert_eq!(args[..6], ["-f", "gdigrab", "-framerate", "30", "-i", "desktop"]);
    assert!(!args.iter().any(|a| a == "-video_size"));
}

/// WHAT: A macOS region is applied as a crop filter
/// WHY: avfoundation has no capture offset option
#[test]
fn given_region_on_macos_when_building_then_crop_filter_added() {
    // Given: A region 301x201 at (5, 7)
    let region = CaptureRegion::new(5, 7, 301, 201);

    // When: Building the invocation
    let args = build(Platform::MacOs, Some(region));

    // Then: The crop uses even dimensions and the region origin
    assert_eq!(args[..6], ["-f", "avfoundation", "-framerate", "30", "-i", "1:0"]);
    assert!(args.windows(2).any(|w| w == ["-vf", "crop=300:200:5:7"]));
    assert!(ends_with_profile(&args));
}

/// WHAT: Framerate and input overrides reach the argument list
/// WHY: Users with non-default devices or displays configure these
#[test]
#[allow(clippy::unwrap_used)]
fn given_overrides_when_building_then_overrides_used() {
    // Given: An invocation with a custom framerate and X display
    let args = EncoderInvocation::new(Platform::Linux, DISPLAY, OUTPUT)
        .with_framerate(60)
        .with_input(Some(":1.0".to_string()))
        .build()
        .unwrap();

    // Then: Both overrides appear
    assert!(args.windows(2).any(|w| w == [OsString::from("-framerate"), OsString::from("60")]));
    assert!(args.windows(2).any(|w| w == [OsString::from("-i"), OsString::from(":1.0")]));
}

/// WHAT: Unknown platforms are rejected before anything runs
/// WHY: There is no capture driver to select
#[test]
fn given_unsupported_platform_when_building_then_unsupported_platform_error() {
    // Given: A platform without a capture branch
    let invocation =
        EncoderInvocation::new(Platform::Unsupported("haiku".to_string()), DISPLAY, OUTPUT);

    // When: Building
    let result = invocation.build();

    // Then: Returns UnsupportedPlatform
    assert!(matches!(
        result,
        Err(RecorderError::UnsupportedPlatform { ref platform, .. }) if platform == "haiku"
    ));
}

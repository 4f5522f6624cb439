//! Range picker shown before a recording is exported.
//!
//! A small timeline with a start and an end handle. Dragging moves the
//! nearest handle; Enter confirms the range and Escape or closing the
//! window cancels the export.

use crate::{AppCommand, AppError, AppResult, canvas::Canvas};

use std::{panic::Location, path::PathBuf, time::Duration};

use error_location::ErrorLocation;
use tao::{
    dpi::LogicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::EventLoopWindowTarget,
    keyboard::KeyCode,
    window::{WindowBuilder, WindowId},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use tray_recorder_core::{TrimSelection, format_elapsed};

const WINDOW_WIDTH: f64 = 640.0;
const WINDOW_HEIGHT: f64 = 72.0;
const MARGIN: u32 = 12;
const HANDLE_WIDTH: u32 = 4;

const BACKGROUND: u32 = 0xFF20_2020;
const TRACK: u32 = 0xFF50_5050;
const SELECTED: u32 = 0xFF1E_88E5;
const HANDLE: u32 = 0xFFFF_FFFF;

/// One of the two selection handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handle {
    Start,
    End,
}

/// Maps between window pixels and recording offsets.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Timeline {
    width: u32,
}

impl Timeline {
    pub(crate) fn new(width: u32) -> Self {
        Self { width }
    }

    fn track(&self) -> (f64, f64) {
        let left = f64::from(MARGIN);
        let right = (f64::from(self.width) - f64::from(MARGIN)).max(left + 1.0);
        (left, right)
    }

    /// Recording offset under pixel column `x`, clamped to the track.
    pub(crate) fn seconds_at(&self, x: f64, duration: f64) -> f64 {
        let (left, right) = self.track();
        ((x - left) / (right - left)).clamp(0.0, 1.0) * duration
    }

    /// Pixel column of a recording offset.
    pub(crate) fn x_of(&self, seconds: f64, duration: f64) -> f64 {
        let (left, right) = self.track();
        if duration <= 0.0 {
            return left;
        }
        left + (seconds / duration).clamp(0.0, 1.0) * (right - left)
    }

    /// Handle closest to `x`. Past the end handle always picks the end
    /// handle so collapsed handles can be pulled apart.
    pub(crate) fn handle_for(&self, x: f64, selection: &TrimSelection) -> Handle {
        let start = self.x_of(selection.start(), selection.duration());
        let end = self.x_of(selection.end(), selection.duration());

        if x >= end || (x - end).abs() < (x - start).abs() {
            Handle::End
        } else {
            Handle::Start
        }
    }

    /// Pixels for a `height` tall strip showing `selection`.
    pub(crate) fn render(&self, height: u32, selection: &TrimSelection) -> Vec<u32> {
        let width = self.width as usize;
        let mut pixels = vec![BACKGROUND; width * height as usize];

        let start = self.x_of(selection.start(), selection.duration());
        let end = self.x_of(selection.end(), selection.duration());
        let (left, right) = self.track();
        let band = height / 3..height - height / 3;

        for y in 0..height {
            for x in 0..self.width {
                let column = f64::from(x);
                let near = |at: f64| (column - at).abs() < f64::from(HANDLE_WIDTH) / 2.0;

                let color = if near(start) || near(end) {
                    HANDLE
                } else if !band.contains(&y) || column < left || column > right {
                    continue;
                } else if column >= start && column <= end {
                    SELECTED
                } else {
                    TRACK
                };
                pixels[y as usize * width + x as usize] = color;
            }
        }

        pixels
    }
}

/// Window title describing the current selection.
pub(crate) fn trim_title(selection: &TrimSelection) -> String {
    let offset = |secs: f64| format_elapsed(Duration::try_from_secs_f64(secs).unwrap_or_default());
    format!(
        "Export {} to {} ({:.1}s) - Enter to save, Esc to cancel",
        offset(selection.start()),
        offset(selection.end()),
        selection.end() - selection.start()
    )
}

/// The open range picker. Lives on the main thread.
pub struct TrimWindow {
    canvas: Canvas,
    source: PathBuf,
    selection: TrimSelection,
    cursor_x: f64,
    grabbed: Option<Handle>,
    command_tx: mpsc::Sender<AppCommand>,
}

impl TrimWindow {
    /// Open the picker for `source`, initially selecting all of it.
    #[track_caller]
    #[instrument(skip(target, command_tx))]
    pub fn open<T: 'static>(
        target: &EventLoopWindowTarget<T>,
        source: PathBuf,
        duration: f64,
        command_tx: mpsc::Sender<AppCommand>,
    ) -> AppResult<Self> {
        let selection = TrimSelection::new(duration);

        let window = WindowBuilder::new()
            .with_title(trim_title(&selection))
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false)
            .with_always_on_top(true)
            .build(target)
            .map_err(|e| AppError::WindowError {
                reason: format!("Failed to create trim window: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        window.set_focus();

        let canvas = Canvas::new(window)?;
        canvas.window().request_redraw();

        info!("Trim window opened");

        Ok(Self {
            canvas,
            source,
            selection,
            cursor_x: 0.0,
            grabbed: None,
            command_tx,
        })
    }

    /// Id used to route window events to this picker.
    pub fn id(&self) -> WindowId {
        self.canvas.window().id()
    }

    /// Paint the timeline.
    pub fn redraw(&mut self) {
        let selection = self.selection;
        if let Err(e) = self
            .canvas
            .redraw(|width, height| Timeline::new(width).render(height, &selection))
        {
            error!(error = ?e, "Failed to draw trim timeline");
        }
    }

    /// Feed one window event. Returns `true` once the picker is finished
    /// and should be dropped.
    pub fn handle_event(&mut self, event: &WindowEvent<'_>) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_x = position.x;
                if let Some(handle) = self.grabbed {
                    self.move_handle(handle);
                }
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        let handle = self.timeline().handle_for(self.cursor_x, &self.selection);
                        self.grabbed = Some(handle);
                        self.move_handle(handle);
                    }
                    _ => self.grabbed = None,
                }
                false
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    KeyCode::Enter | KeyCode::NumpadEnter => {
                        self.send(AppCommand::TrimSelected {
                            source: self.source.clone(),
                            selection: self.selection,
                        });
                        true
                    }
                    KeyCode::Escape => {
                        self.cancel();
                        true
                    }
                    _ => false,
                }
            }
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.cancel();
                true
            }
            _ => false,
        }
    }

    fn timeline(&self) -> Timeline {
        Timeline::new(self.canvas.window().inner_size().width)
    }

    fn move_handle(&mut self, handle: Handle) {
        let seconds = self
            .timeline()
            .seconds_at(self.cursor_x, self.selection.duration());
        match handle {
            Handle::Start => self.selection.set_start(seconds),
            Handle::End => self.selection.set_end(seconds),
        }

        let window = self.canvas.window();
        window.set_title(&trim_title(&self.selection));
        window.request_redraw();
    }

    fn cancel(&self) {
        debug!(source = ?self.source, "Export cancelled from trim window");
        self.send(AppCommand::ExportFinished {
            source: self.source.clone(),
            result: Ok(None),
        });
    }

    fn send(&self, cmd: AppCommand) {
        if let Err(e) = self.command_tx.try_send(cmd) {
            error!(error = ?e, "Failed to deliver trim result");
        }
    }
}

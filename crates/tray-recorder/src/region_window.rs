//! Drag-to-select overlay for area recordings.
//!
//! A borderless, transparent, always-on-top window covering the primary
//! display. The screen is dimmed and the rectangle being dragged is cut out
//! and outlined. Pointer input is fed into a [`RegionSelector`]; the
//! finished rectangle is translated to screen coordinates and sent to the
//! control loop. Escape or closing the window cancels.

use crate::{AppCommand, AppError, AppResult, canvas::Canvas};

use std::panic::Location;

use error_location::ErrorLocation;
use tao::{
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::EventLoopWindowTarget,
    keyboard::KeyCode,
    window::{CursorIcon, Fullscreen, WindowBuilder, WindowId},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use tray_recorder_core::{CaptureRegion, RegionSelector, SelectionOutcome};

const BACKDROP: u32 = 0x4020_2020;
// Fully transparent pixels let clicks through to the window below on macOS.
const CLEAR: u32 = 0x0100_0000;
const OUTLINE: u32 = 0xFFE5_3935;
const OUTLINE_WIDTH: u32 = 2;

/// The open selection overlay. Lives on the main thread.
pub struct RegionWindow {
    canvas: Canvas,
    selector: RegionSelector,
    command_tx: mpsc::Sender<AppCommand>,
}

impl RegionWindow {
    /// Open the overlay on the primary display.
    #[track_caller]
    #[instrument(skip_all)]
    pub fn open<T: 'static>(
        target: &EventLoopWindowTarget<T>,
        command_tx: mpsc::Sender<AppCommand>,
    ) -> AppResult<Self> {
        let monitor = target.primary_monitor();

        let window = WindowBuilder::new()
            .with_title("Select recording area")
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(true)
            .with_fullscreen(Some(Fullscreen::Borderless(monitor)))
            .build(target)
            .map_err(|e| AppError::WindowError {
                reason: format!("Failed to create selection window: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        window.set_cursor_icon(CursorIcon::Crosshair);
        window.set_focus();

        let canvas = Canvas::new(window)?;
        canvas.window().request_redraw();

        info!("Region selection window opened");

        Ok(Self {
            canvas,
            selector: RegionSelector::new(),
            command_tx,
        })
    }

    /// Id used to route window events to this overlay.
    pub fn id(&self) -> WindowId {
        self.canvas.window().id()
    }

    /// Paint the dimmed backdrop and the current selection.
    pub fn redraw(&mut self) {
        let selection = self.selector.current();
        if let Err(e) = self
            .canvas
            .redraw(|width, height| render_overlay(width, height, selection))
        {
            error!(error = ?e, "Failed to draw selection overlay");
        }
    }

    /// Feed one window event. Returns `true` once the overlay is finished
    /// and should be dropped.
    pub fn handle_event(&mut self, event: &WindowEvent<'_>) -> bool {
        let outcome = match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.selector
                    .pointer_moved(position.x.round() as i32, position.y.round() as i32);
                if self.selector.current().is_some() {
                    self.canvas.window().request_redraw();
                }
                None
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.selector.button_pressed();
                    self.canvas.window().request_redraw();
                    None
                }
                ElementState::Released => self.selector.button_released(),
                _ => None,
            },
            WindowEvent::KeyboardInput { event, .. }
                if event.physical_key == KeyCode::Escape
                    && event.state == ElementState::Pressed =>
            {
                Some(self.selector.cancel())
            }
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(self.selector.cancel()),
            _ => None,
        };

        match outcome {
            Some(outcome) => {
                self.finish(outcome);
                true
            }
            None => false,
        }
    }

    fn finish(&self, outcome: SelectionOutcome) {
        match outcome {
            SelectionOutcome::Complete(region) => {
                // Pointer positions are relative to the overlay's client area.
                let (dx, dy) = self
                    .canvas
                    .window()
                    .inner_position()
                    .map(|p| (p.x, p.y))
                    .unwrap_or((0, 0));
                let region = region.offset(dx, dy);

                info!(?region, "Region selected");

                if let Err(e) = self.command_tx.try_send(AppCommand::RegionSelected(region)) {
                    error!(error = ?e, "Failed to deliver selected region");
                }
            }
            SelectionOutcome::Cancelled => debug!("Region selection cancelled"),
        }
    }
}

/// Pixels for a `width` x `height` overlay: a dimmed backdrop with
/// `selection` (window-local) cut out and outlined.
pub(crate) fn render_overlay(
    width: u32,
    height: u32,
    selection: Option<CaptureRegion>,
) -> Vec<u32> {
    let mut pixels = vec![BACKDROP; width as usize * height as usize];

    let Some(region) = selection else {
        return pixels;
    };

    // Clip to the surface; the drag may leave the window.
    let clamp_x = |v: i64| v.clamp(0, i64::from(width)) as u32;
    let clamp_y = |v: i64| v.clamp(0, i64::from(height)) as u32;
    let left = i64::from(region.x);
    let top = i64::from(region.y);
    let right = left + i64::from(region.width);
    let bottom = top + i64::from(region.height);
    let (x0, x1) = (clamp_x(left), clamp_x(right));
    let (y0, y1) = (clamp_y(top), clamp_y(bottom));

    for y in y0..y1 {
        for x in x0..x1 {
            let on_edge = i64::from(x) < left + i64::from(OUTLINE_WIDTH)
                || i64::from(x) >= right - i64::from(OUTLINE_WIDTH)
                || i64::from(y) < top + i64::from(OUTLINE_WIDTH)
                || i64::from(y) >= bottom - i64::from(OUTLINE_WIDTH);
            pixels[y as usize * width as usize + x as usize] = if on_edge { OUTLINE } else { CLEAR };
        }
    }

    pixels
}

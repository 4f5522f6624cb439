//! Software-rendered window surface shared by the selection and trim windows.

use crate::{AppError, AppResult};

use std::{num::NonZeroU32, panic::Location, rc::Rc};

use error_location::ErrorLocation;
use softbuffer::{Context, Surface};
use tao::window::Window;

/// A window plus the pixel surface drawn into it.
///
/// Pixels are `0xAARRGGBB`. The alpha byte only has an effect where the
/// compositor treats the surface as ARGB; elsewhere it is ignored.
pub struct Canvas {
    window: Rc<Window>,
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
}

impl Canvas {
    /// Attach a drawing surface to `window`.
    #[track_caller]
    pub fn new(window: Window) -> AppResult<Self> {
        let window = Rc::new(window);

        let context = Context::new(window.clone()).map_err(|e| AppError::WindowError {
            reason: format!("Failed to create drawing context: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let surface = Surface::new(&context, window.clone()).map_err(|e| AppError::WindowError {
            reason: format!("Failed to create drawing surface: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            window,
            _context: context,
            surface,
        })
    }

    /// The underlying window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Resize the surface to the window and present the pixels `draw`
    /// returns for that size. Zero-sized windows are skipped.
    #[track_caller]
    pub fn redraw(&mut self, draw: impl FnOnce(u32, u32) -> Vec<u32>) -> AppResult<()> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };

        let fail = |step: &str, e: softbuffer::SoftBufferError| AppError::WindowError {
            reason: format!("Failed to {step}: {e}"),
            location: ErrorLocation::from(Location::caller()),
        };

        self.surface
            .resize(width, height)
            .map_err(|e| fail("resize surface", e))?;

        let pixels = draw(width.get(), height.get());
        let mut buffer = self.surface.buffer_mut().map_err(|e| fail("map surface", e))?;
        if pixels.len() != buffer.len() {
            return Err(AppError::WindowError {
                reason: format!(
                    "Frame has {} pixels, surface expects {}",
                    pixels.len(),
                    buffer.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        buffer.copy_from_slice(&pixels);
        buffer.present().map_err(|e| fail("present frame", e))
    }
}

//! System tray icon with state-based updates.
//!
//! Manages a system tray icon with four states (Idle, Recording, Stopping,
//! Exporting), the elapsed-time label, and the recording context menu.

use crate::{AppError, AppResult, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{Rgba, RgbaImage};
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;
const APP_NAME: &str = "Tray Recorder";

/// Menu item ids the control loop reacts to.
#[derive(Debug, Clone)]
pub struct TrayMenuIds {
    /// Record Screen / Stop Recording toggle.
    pub record: MenuId,
    /// Record a selected area.
    pub record_area: MenuId,
    /// Export the last recording.
    pub save: MenuId,
    /// Open the last recording.
    pub open: MenuId,
    /// Delete the last recording.
    pub discard: MenuId,
    /// Quit.
    pub exit: MenuId,
}

impl TrayMenuIds {
    /// Action for a clicked menu item; `None` for ids this menu did not
    /// create.
    pub(crate) fn action(&self, id: &MenuId) -> Option<MenuAction> {
        let actions = [
            (&self.record, MenuAction::ToggleRecording),
            (&self.record_area, MenuAction::SelectArea),
            (&self.save, MenuAction::Save),
            (&self.open, MenuAction::Open),
            (&self.discard, MenuAction::Discard),
            (&self.exit, MenuAction::Exit),
        ];
        actions
            .into_iter()
            .find_map(|(item, action)| (item == id).then_some(action))
    }
}

/// What a tray menu click asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuAction {
    ToggleRecording,
    SelectArea,
    Save,
    Open,
    Discard,
    Exit,
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    record_item: MenuItem,
    record_area_item: MenuItem,
    save_item: MenuItem,
    open_item: MenuItem,
    discard_item: MenuItem,
    ids: TrayMenuIds,
    state: TrayIconState,
}

impl TrayManager {
    /// Create a new tray manager with initial state.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let record_item = MenuItem::new("Record Screen", true, None);
        let record_area_item = MenuItem::new("Record Area", true, None);
        let save_item = MenuItem::new("Save Last Recording", false, None);
        let open_item = MenuItem::new("Open Last Recording", false, None);
        let discard_item = MenuItem::new("Discard Last Recording", false, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let ids = TrayMenuIds {
            record: record_item.id().clone(),
            record_area: record_area_item.id().clone(),
            save: save_item.id().clone(),
            open: open_item.id().clone(),
            discard: discard_item.id().clone(),
            exit: exit_item.id().clone(),
        };

        menu.append_items(&[
            &record_item,
            &record_area_item,
            &PredefinedMenuItem::separator(),
            &save_item,
            &open_item,
            &discard_item,
            &PredefinedMenuItem::separator(),
            &exit_item,
        ])
        .map_err(|e| AppError::TrayError {
            reason: format!("Failed to build tray menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let icon = Self::load_icon(TrayIconState::Idle)?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(TrayIconState::Idle, None))
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            record_item,
            record_area_item,
            save_item,
            open_item,
            discard_item,
            ids,
            state: TrayIconState::Idle,
        })
    }

    /// Update the tray icon, tooltip and record items for a new state.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        self.tray_icon
            .set_icon(Some(Self::load_icon(state)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let (record_label, record_enabled) = match state {
            TrayIconState::Recording => ("Stop Recording", true),
            TrayIconState::Stopping => ("Stopping...", false),
            TrayIconState::Idle | TrayIconState::Exporting => ("Record Screen", true),
        };
        self.record_item.set_text(record_label);
        self.record_item.set_enabled(record_enabled);
        self.record_area_item
            .set_enabled(matches!(state, TrayIconState::Idle | TrayIconState::Exporting));

        self.state = state;
        self.set_tooltip(None)
    }

    /// Show the elapsed-time label next to the icon, or clear it.
    #[track_caller]
    pub fn show_elapsed(&mut self, label: Option<String>) -> AppResult<()> {
        // Titles only render on macOS; the tooltip carries the label elsewhere.
        self.tray_icon.set_title(label.as_deref());
        self.set_tooltip(label.as_deref())
    }

    /// Enable the items acting on the last finished recording.
    pub fn set_last_recording_available(&mut self, available: bool) {
        self.save_item.set_enabled(available);
        self.open_item.set_enabled(available);
        self.discard_item.set_enabled(available);
    }

    /// Ids of the menu items.
    pub fn menu_ids(&self) -> &TrayMenuIds {
        &self.ids
    }

    #[track_caller]
    fn set_tooltip(&self, elapsed: Option<&str>) -> AppResult<()> {
        self.tray_icon
            .set_tooltip(Some(tooltip(self.state, elapsed)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Render the state icon into a tray icon.
    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        let rgba = render_icon(state);
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Tooltip text for a state, with an optional elapsed label.
pub(crate) fn tooltip(state: TrayIconState, elapsed: Option<&str>) -> String {
    let status = match state {
        TrayIconState::Idle => "Ready",
        TrayIconState::Recording => "Recording",
        TrayIconState::Stopping => "Finishing recording...",
        TrayIconState::Exporting => "Exporting...",
    };

    match elapsed {
        Some(label) => format!("{APP_NAME} - {status} {label}"),
        None => format!("{APP_NAME} - {status}"),
    }
}

/// Draw the state icon: a filled disc whose colour encodes the state.
///
/// Rendered at runtime so no image assets need to ship with the binary.
pub(crate) fn render_icon(state: TrayIconState) -> RgbaImage {
    let color = match state {
        TrayIconState::Idle => [0x9e, 0x9e, 0x9e, 0xff],
        TrayIconState::Recording => [0xe5, 0x39, 0x35, 0xff],
        TrayIconState::Stopping => [0xfb, 0x8c, 0x00, 0xff],
        TrayIconState::Exporting => [0x1e, 0x88, 0xe5, 0xff],
    };

    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;

    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        if dx * dx + dy * dy <= radius * radius {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

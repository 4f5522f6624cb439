//! Global hotkey handler.
//!
//! Registers CTRL+SHIFT+R as a global hotkey and forwards presses to the
//! control loop as [`AppCommand::ToggleRecording`]. The recording session
//! decides whether a press starts or stops a recording.

use crate::{AppCommand, AppError, AppResult};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Global hotkey listener.
pub struct HotkeyHandler {
    hotkey_id: u32,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Register CTRL+SHIFT+R as the global hotkey.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkey to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey() -> AppResult<(GlobalHotKeyManager, u32)> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let hotkey = HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyR);

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register CTRL+SHIFT+R: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(hotkey = "CTRL+SHIFT+R", "Global hotkey registered");

        Ok((manager, hotkey.id()))
    }

    /// Create a handler for a previously registered hotkey.
    ///
    /// The `hotkey_id` should come from [`HotkeyHandler::register_hotkey`].
    /// This struct is `Send` and can live on any thread; it only listens on
    /// the global [`GlobalHotKeyEvent`] channel.
    pub fn new(hotkey_id: u32, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            hotkey_id,
            command_tx,
        }
    }

    /// Run the hotkey handler event loop until a shutdown signal arrives.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Blocking forwarder; exits on the first failed send after event_rx
        // is dropped.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    // Releases are reported too on some platforms.
                    if event.id == self.hotkey_id && event.state == HotKeyState::Pressed {
                        handle_hotkey_press(&self.command_tx).await?;
                    }
                }
            }
        }

        drop(event_rx);

        // The blocking task may sit in recv() until the next hotkey event.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }
}

/// Forward one hotkey press to the control loop.
#[instrument(skip(command_tx))]
pub(crate) async fn handle_hotkey_press(command_tx: &mpsc::Sender<AppCommand>) -> AppResult<()> {
    command_tx
        .send(AppCommand::ToggleRecording)
        .await
        .map_err(|e| AppError::ChannelSendFailed {
            message: format!("Failed to send ToggleRecording: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    debug!("Recording toggle requested");

    Ok(())
}

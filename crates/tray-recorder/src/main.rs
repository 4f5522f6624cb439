//! Tray Recorder: screen recording from the system tray, encoded by ffmpeg.

mod app;
mod app_command;
mod canvas;
mod config;
mod error;
mod hotkey_handler;
mod logging;
mod notifier;
mod region_window;
mod tray_command;
mod tray_icon_state;
mod tray_manager;
mod trim_window;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    notifier::Notifier,
    region_window::RegionWindow,
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::{TrayManager, TrayMenuIds},
    trim_window::TrimWindow,
};

use crate::config::Config;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};
use tray_recorder_core::DisplaySize;

const FALLBACK_DISPLAY: DisplaySize = DisplaySize {
    width: 1920,
    height: 1080,
};

/// Application entry point.
fn main() {
    let log_dir = Config::log_dir().ok();
    let log_guard = logging::init_tracing(log_dir.as_deref());

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Persists across event loop iterations; dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;
    let mut region_window: Option<RegionWindow> = None;
    let mut trim_window: Option<TrimWindow> = None;
    // Sender used by the windows; filled in once the channel exists.
    let mut window_tx: Option<mpsc::Sender<AppCommand>> = None;

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    TrayCommand::SetState(state) => {
                        if let Err(e) = tray_manager.update_state(state) {
                            error!(error = ?e, "Failed to update tray icon");
                        }
                    }
                    TrayCommand::SetElapsed(label) => {
                        if let Err(e) = tray_manager.show_elapsed(label) {
                            error!(error = ?e, "Failed to update elapsed label");
                        }
                    }
                    TrayCommand::SetLastRecording(available) => {
                        tray_manager.set_last_recording_available(available);
                    }
                    TrayCommand::SelectRegion => {
                        if region_window.is_some() {
                            return;
                        }
                        let Some(command_tx) = window_tx.clone() else {
                            warn!("Region selection requested before startup finished");
                            return;
                        };
                        match RegionWindow::open(target, command_tx) {
                            Ok(window) => region_window = Some(window),
                            Err(e) => error!(error = ?e, "Failed to open region selection"),
                        }
                    }
                    TrayCommand::EditTrim { source, duration } => {
                        let Some(command_tx) = window_tx.clone() else {
                            warn!("Trim requested before startup finished");
                            return;
                        };
                        if trim_window.is_some() {
                            warn!(source = ?source, "Trim window already open");
                            let _ = command_tx.try_send(AppCommand::ExportFinished {
                                source,
                                result: Ok(None),
                            });
                            return;
                        }
                        let opened =
                            TrimWindow::open(target, source.clone(), duration, command_tx.clone());
                        match opened {
                            Ok(window) => trim_window = Some(window),
                            Err(e) => {
                                error!(error = ?e, "Failed to open trim window");
                                let finished = AppCommand::ExportFinished {
                                    source,
                                    result: Err(e),
                                };
                                if let Err(e) = command_tx.try_send(finished) {
                                    error!(error = ?e, "Failed to report trim window failure");
                                }
                            }
                        }
                    }
                    TrayCommand::Shutdown => {
                        region_window = None;
                        trim_window = None;
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::WindowEvent {
                window_id, event, ..
            } => {
                if let Some(window) = region_window.as_mut()
                    && window.id() == window_id
                    && window.handle_event(&event)
                {
                    region_window = None;
                }
                if let Some(window) = trim_window.as_mut()
                    && window.id() == window_id
                    && window.handle_event(&event)
                {
                    trim_window = None;
                }
            }
            Event::RedrawRequested(window_id) => {
                if let Some(window) = region_window.as_mut()
                    && window.id() == window_id
                {
                    window.redraw();
                }
                if let Some(window) = trim_window.as_mut()
                    && window.id() == window_id
                {
                    window.redraw();
                }
            }
            Event::NewEvents(StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let display = match target.primary_monitor() {
                    Some(monitor) => {
                        let size = monitor.size();
                        DisplaySize::new(size.width, size.height)
                    }
                    None => {
                        warn!(
                            fallback = ?FALLBACK_DISPLAY,
                            "No primary monitor reported, using fallback size"
                        );
                        FALLBACK_DISPLAY
                    }
                };
                info!(?display, "Primary display detected");

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);
                window_tx = Some(command_tx.clone());

                // Register hotkey on the main thread: tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let (manager, hotkey_id) = match HotkeyHandler::register_hotkey() {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("Failed to register hotkey: {:?}", e);
                        std::process::exit(1);
                    }
                };
                hotkey_manager = Some(manager);

                let tray_proxy = tray_proxy.clone();
                let menu_ids = tray_manager.menu_ids().clone();

                // TrayManager, the windows and hotkey_manager stay on the
                // main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hotkey_handler = HotkeyHandler::new(hotkey_id, command_tx.clone());

                        let app = App::new(
                            &config,
                            display,
                            tray_proxy,
                            command_tx,
                            command_rx,
                            shutdown_tx,
                            menu_ids,
                        );

                        tokio::join!(
                            async {
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager and the log writer alive for the app's lifetime.
        let _ = (&hotkey_manager, &log_guard);
    });
}

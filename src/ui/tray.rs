//! System tray icon management.
//!
//! The tray lives on its own thread with its own blocking loop. Menu
//! clicks are posted to the UI thread; the UI pushes tooltip text back
//! through a [`TrayHandle`].

use crate::ui::dispatch::UiHandle;
use crate::ui::menu::MenuAction;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Tooltip shown before the first tick.
pub const INITIAL_TOOLTIP: &str = "Memento Mori";

/// How long the tray loop waits for a command between message pumps.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Tray service error types.
#[derive(Debug, Error)]
pub enum TrayError {
    #[error("Failed to create tray icon: {0}")]
    CreateFailed(String),

    #[error("Failed to load icon resource")]
    IconLoadFailed,

    #[error("Failed to create menu: {0}")]
    MenuFailed(String),

    #[error("Failed to update tray icon: {0}")]
    UpdateFailed(String),

    #[error("System tray is not supported on this platform")]
    Unsupported,
}

/// Requests from the UI thread to the tray thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayCommand {
    SetTooltip(String),
    Stop,
}

/// What the tray loop needs from a concrete tray icon.
pub trait TrayBackend {
    /// Process pending OS messages for the icon.
    fn pump(&mut self) {}

    /// Next menu action the user picked, if any.
    fn next_action(&mut self) -> Option<MenuAction>;

    fn set_tooltip(&mut self, text: &str) -> Result<(), TrayError>;
}

/// The UI side's link to the tray thread.
///
/// Does not own the tray; pushes are dropped until the tray reports itself
/// attached, and after it has gone away.
#[derive(Debug, Clone)]
pub struct TrayHandle {
    commands: Sender<TrayCommand>,
    attached: Arc<AtomicBool>,
    stop_requested: Arc<AtomicBool>,
}

impl TrayHandle {
    fn new(commands: Sender<TrayCommand>) -> Self {
        Self {
            commands,
            attached: Arc::new(AtomicBool::new(false)),
            stop_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Update the tooltip if the tray is up. Returns whether it was sent.
    pub fn push_tooltip(&self, text: &str) -> bool {
        if !self.is_attached() {
            return false;
        }
        self.commands
            .send(TrayCommand::SetTooltip(text.to_string()))
            .is_ok()
    }

    /// Ask the tray loop to exit. Only the first call sends anything.
    pub fn stop(&self) {
        if self.stop_requested.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = self.commands.send(TrayCommand::Stop);
    }
}

/// Start the tray on a background thread.
///
/// The thread is never joined; process exit ends it.
pub fn spawn(ui: UiHandle, tooltip: String) -> TrayHandle {
    let (sender, receiver) = channel();
    let handle = TrayHandle::new(sender);
    let attached = handle.attached.clone();

    let spawned = thread::Builder::new()
        .name("tray".to_string())
        .spawn(move || host(ui, receiver, attached, tooltip));
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "failed to start tray thread");
    }

    handle
}

fn host(ui: UiHandle, commands: Receiver<TrayCommand>, attached: Arc<AtomicBool>, tooltip: String) {
    let mut backend = match create_backend(&tooltip) {
        Ok(backend) => backend,
        Err(e) => {
            tracing::warn!(error = %e, "tray presence unavailable");
            return;
        }
    };

    attached.store(true, Ordering::Release);
    tracing::info!("tray icon created");

    run_loop(&mut backend, &commands, &ui, POLL_INTERVAL);

    attached.store(false, Ordering::Release);
    tracing::info!("tray loop stopped");
}

/// Blocking tray loop: forward menu picks to the UI, apply UI commands.
///
/// Returns on [`TrayCommand::Stop`] or when the UI side hangs up.
pub fn run_loop<B: TrayBackend>(
    backend: &mut B,
    commands: &Receiver<TrayCommand>,
    ui: &UiHandle,
    poll: Duration,
) {
    loop {
        backend.pump();

        while let Some(action) = backend.next_action() {
            tracing::debug!(?action, "tray menu action");
            ui.post(action);
        }

        match commands.recv_timeout(poll) {
            Ok(TrayCommand::SetTooltip(text)) => {
                if let Err(e) = backend.set_tooltip(&text) {
                    tracing::debug!(error = %e, "tooltip update failed");
                }
            }
            Ok(TrayCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

#[cfg(windows)]
fn create_backend(tooltip: &str) -> Result<TrayManager, TrayError> {
    TrayManager::create(tooltip)
}

#[cfg(not(windows))]
fn create_backend(_tooltip: &str) -> Result<UnsupportedTray, TrayError> {
    Err(TrayError::Unsupported)
}

/// Placeholder backend type on platforms without a tray implementation.
#[cfg(not(windows))]
pub enum UnsupportedTray {}

#[cfg(not(windows))]
impl TrayBackend for UnsupportedTray {
    fn next_action(&mut self) -> Option<MenuAction> {
        match *self {}
    }

    fn set_tooltip(&mut self, _text: &str) -> Result<(), TrayError> {
        match *self {}
    }
}

#[cfg(windows)]
pub use windows_tray::TrayManager;

#[cfg(windows)]
mod windows_tray {
    use super::{TrayBackend, TrayError};
    use crate::platform::icons;
    use crate::ui::menu::{MenuAction, MenuEntry, TRAY_MENU};
    use std::collections::HashMap;
    use tray_icon::{
        menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
        TrayIcon, TrayIconBuilder,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE,
    };

    /// Tray icon built on `tray-icon`, owned by the tray thread.
    pub struct TrayManager {
        tray_icon: TrayIcon,
        actions: HashMap<MenuId, MenuAction>,
    }

    impl TrayManager {
        /// Create and show the tray icon.
        pub fn create(tooltip: &str) -> Result<Self, TrayError> {
            let icon = icons::create_tray_icon()?;

            let menu = Menu::new();
            let mut actions = HashMap::new();
            for entry in TRAY_MENU {
                match entry {
                    MenuEntry::Item { label, action } => {
                        let item = MenuItem::new(*label, true, None);
                        actions.insert(item.id().clone(), *action);
                        menu.append(&item)
                            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;
                    }
                    MenuEntry::Separator => {
                        menu.append(&PredefinedMenuItem::separator())
                            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;
                    }
                }
            }

            let tray_icon = TrayIconBuilder::new()
                .with_icon(icon)
                .with_tooltip(tooltip)
                .with_menu(Box::new(menu))
                .build()
                .map_err(|e| TrayError::CreateFailed(e.to_string()))?;

            Ok(Self { tray_icon, actions })
        }
    }

    impl TrayBackend for TrayManager {
        fn pump(&mut self) {
            // The icon's hidden window belongs to this thread.
            unsafe {
                let mut msg = MSG::default();
                while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
        }

        fn next_action(&mut self) -> Option<MenuAction> {
            while let Ok(event) = MenuEvent::receiver().try_recv() {
                if let Some(action) = self.actions.get(&event.id) {
                    return Some(*action);
                }
            }
            None
        }

        fn set_tooltip(&mut self, text: &str) -> Result<(), TrayError> {
            self.tray_icon
                .set_tooltip(Some(text))
                .map_err(|e| TrayError::UpdateFailed(e.to_string()))
        }
    }
}

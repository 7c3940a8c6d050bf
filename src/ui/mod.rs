//! UI module for the overlay window and the system tray.
//!
//! This module provides the overlay surface, its popups, the tray icon,
//! and the plumbing that carries actions between their threads.

pub mod details;
pub mod dispatch;
pub mod drag;
pub mod menu;
pub mod overlay;
pub mod theme;
pub mod ticker;
pub mod tray;

pub use dispatch::UiHandle;
pub use menu::{MenuAction, MenuEntry};
pub use overlay::OverlayApp;
pub use tray::{TrayCommand, TrayError, TrayHandle};

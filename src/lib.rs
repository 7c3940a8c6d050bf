//! Memento Mori - Library
//!
//! A desktop overlay and system tray clock showing how long you have been
//! alive.
//!
//! ## Features
//!
//! - Calendar-correct age as years, days and a running clock
//! - Borderless always-on-top overlay, draggable anywhere
//! - Details popup with total days and hours lived
//! - Tray icon mirroring the overlay's menu and text
//! - Birthdate read from `config.json` next to the executable

pub mod app;
pub mod clock;
pub mod platform;
pub mod ui;

pub use app::{AppState, SurfaceEffect, SurfacePhase};
pub use clock::{compute_age, format_age, AgeBreakdown, AgeSource, RunningFlag};
pub use platform::{ConfigError, LoadOutcome};
pub use ui::{MenuAction, OverlayApp, TrayHandle, UiHandle};

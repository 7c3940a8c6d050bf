//! Platform services: config storage, editor launching and icons.

pub mod config;
pub mod editor;
pub mod icons;

pub use config::{config_path, load_birthdate, ConfigError, LoadOutcome};
pub use editor::{open_for_editing, EditOutcome, EditorLauncher, SystemEditor};

//! Opening the config file in an external editor.
//!
//! Best effort: try the preferred text editor, then the OS default handler
//! for the file, and ignore anything that still fails.

use std::path::Path;
use std::process::{Command, Stdio};

/// Ways of opening a file outside this process.
pub trait EditorLauncher {
    /// Launch the preferred text editor. Returns false if it could not start.
    fn try_preferred_editor(&self, path: &Path) -> bool;

    /// Hand the file to the OS default handler.
    fn open_with_default_handler(&self, path: &Path) -> bool;
}

/// Which launcher ended up opening the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Preferred,
    DefaultHandler,
    Failed,
}

/// Open `path` for editing, falling back to the default handler.
pub fn open_for_editing(launcher: &dyn EditorLauncher, path: &Path) -> EditOutcome {
    if launcher.try_preferred_editor(path) {
        return EditOutcome::Preferred;
    }
    tracing::debug!(path = %path.display(), "preferred editor unavailable, using default handler");
    if launcher.open_with_default_handler(path) {
        EditOutcome::DefaultHandler
    } else {
        tracing::warn!(path = %path.display(), "could not open config for editing");
        EditOutcome::Failed
    }
}

/// Launcher that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEditor;

impl SystemEditor {
    fn spawn(mut command: Command) -> bool {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .is_ok()
    }
}

#[cfg(windows)]
impl EditorLauncher for SystemEditor {
    fn try_preferred_editor(&self, path: &Path) -> bool {
        let mut command = Command::new("notepad.exe");
        command.arg(path);
        Self::spawn(command)
    }

    fn open_with_default_handler(&self, path: &Path) -> bool {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        Self::spawn(command)
    }
}

#[cfg(target_os = "macos")]
impl EditorLauncher for SystemEditor {
    fn try_preferred_editor(&self, path: &Path) -> bool {
        let mut command = Command::new("open");
        command.arg("-t").arg(path);
        Self::spawn(command)
    }

    fn open_with_default_handler(&self, path: &Path) -> bool {
        let mut command = Command::new("open");
        command.arg(path);
        Self::spawn(command)
    }
}

#[cfg(not(any(windows, target_os = "macos")))]
impl EditorLauncher for SystemEditor {
    fn try_preferred_editor(&self, path: &Path) -> bool {
        let Some(editor) = std::env::var_os("VISUAL").or_else(|| std::env::var_os("EDITOR")) else {
            return false;
        };
        let mut command = Command::new(editor);
        command.arg(path);
        Self::spawn(command)
    }

    fn open_with_default_handler(&self, path: &Path) -> bool {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        Self::spawn(command)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Launcher that records calls instead of spawning anything.
    #[derive(Default)]
    pub(crate) struct RecordingEditor {
        pub preferred_ok: bool,
        pub default_ok: bool,
        pub calls: RefCell<Vec<(&'static str, PathBuf)>>,
    }

    impl EditorLauncher for RecordingEditor {
        fn try_preferred_editor(&self, path: &Path) -> bool {
            self.calls.borrow_mut().push(("preferred", path.to_path_buf()));
            self.preferred_ok
        }

        fn open_with_default_handler(&self, path: &Path) -> bool {
            self.calls.borrow_mut().push(("default", path.to_path_buf()));
            self.default_ok
        }
    }

    #[test]
    fn preferred_editor_wins() {
        let editor = RecordingEditor {
            preferred_ok: true,
            default_ok: true,
            ..Default::default()
        };
        assert_eq!(open_for_editing(&editor, Path::new("c.json")), EditOutcome::Preferred);
        assert_eq!(editor.calls.borrow().len(), 1);
    }

    #[test]
    fn falls_back_to_default_handler() {
        let editor = RecordingEditor {
            default_ok: true,
            ..Default::default()
        };
        assert_eq!(
            open_for_editing(&editor, Path::new("c.json")),
            EditOutcome::DefaultHandler
        );
        let calls = editor.calls.borrow();
        assert_eq!(calls[0].0, "preferred");
        assert_eq!(calls[1], ("default", PathBuf::from("c.json")));
    }

    #[test]
    fn total_failure_is_swallowed() {
        let editor = RecordingEditor::default();
        assert_eq!(open_for_editing(&editor, Path::new("c.json")), EditOutcome::Failed);
    }
}

//! Menu model shared by the overlay context menu and the tray menu.

/// Something the user asked for from either surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    ShowOverlay,
    ShowDetails,
    EditBirthdate,
    ReloadConfig,
    HideOverlay,
    Quit,
}

/// One row of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        label: &'static str,
        action: MenuAction,
    },
    Separator,
}

const fn item(label: &'static str, action: MenuAction) -> MenuEntry {
    MenuEntry::Item { label, action }
}

/// Right-click menu of the overlay.
pub const OVERLAY_MENU: &[MenuEntry] = &[
    item("Show Details", MenuAction::ShowDetails),
    item("Edit Birthdate", MenuAction::EditBirthdate),
    item("Reload Config", MenuAction::ReloadConfig),
    MenuEntry::Separator,
    item("Hide Overlay", MenuAction::HideOverlay),
    item("Quit Application", MenuAction::Quit),
];

/// Menu of the tray icon.
pub const TRAY_MENU: &[MenuEntry] = &[
    item("Show Overlay", MenuAction::ShowOverlay),
    item("Show Details", MenuAction::ShowDetails),
    item("Edit Birthdate", MenuAction::EditBirthdate),
    item("Reload Config", MenuAction::ReloadConfig),
    MenuEntry::Separator,
    item("Quit", MenuAction::Quit),
];

/// Open/closed state of the overlay's context menu popup.
///
/// The popup is dismissed once it has had focus and then loses it.
#[derive(Debug, Clone, Default)]
pub struct ContextMenuState {
    position: Option<[f32; 2]>,
    had_focus: bool,
}

impl ContextMenuState {
    /// Open at a screen position, replacing any open menu.
    pub fn open(&mut self, position: [f32; 2]) {
        self.position = Some(position);
        self.had_focus = false;
    }

    pub fn close(&mut self) {
        self.position = None;
        self.had_focus = false;
    }

    pub fn position(&self) -> Option<[f32; 2]> {
        self.position
    }

    pub fn is_open(&self) -> bool {
        self.position.is_some()
    }

    /// Feed the popup's focus state; closes it on focus loss.
    pub fn observe_focus(&mut self, focused: Option<bool>) {
        match focused {
            Some(true) => self.had_focus = true,
            Some(false) if self.had_focus => self.close(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(menu: &[MenuEntry]) -> Vec<MenuAction> {
        menu.iter()
            .filter_map(|entry| match entry {
                MenuEntry::Item { action, .. } => Some(*action),
                MenuEntry::Separator => None,
            })
            .collect()
    }

    #[test]
    fn tray_menu_mirrors_overlay_actions() {
        let overlay = actions(OVERLAY_MENU);
        for action in actions(TRAY_MENU) {
            if action != MenuAction::ShowOverlay {
                assert!(overlay.contains(&action), "{action:?}");
            }
        }
    }

    #[test]
    fn separator_precedes_visibility_and_quit() {
        assert_eq!(OVERLAY_MENU[3], MenuEntry::Separator);
        assert_eq!(TRAY_MENU[4], MenuEntry::Separator);
        assert_eq!(actions(TRAY_MENU).last(), Some(&MenuAction::Quit));
        assert_eq!(actions(OVERLAY_MENU).last(), Some(&MenuAction::Quit));
    }

    #[test]
    fn context_menu_waits_for_focus_before_closing() {
        let mut menu = ContextMenuState::default();
        menu.open([100.0, 200.0]);
        menu.observe_focus(Some(false));
        assert!(menu.is_open());
        menu.observe_focus(Some(true));
        menu.observe_focus(None);
        assert!(menu.is_open());
        menu.observe_focus(Some(false));
        assert!(!menu.is_open());
    }

    #[test]
    fn reopening_resets_focus_tracking() {
        let mut menu = ContextMenuState::default();
        menu.open([0.0, 0.0]);
        menu.observe_focus(Some(true));
        menu.open([5.0, 5.0]);
        menu.observe_focus(Some(false));
        assert_eq!(menu.position(), Some([5.0, 5.0]));
    }
}

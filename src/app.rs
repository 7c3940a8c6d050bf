//! Application state and lifecycle management.
//!
//! `AppState` is the overlay's state machine, independent of the window
//! toolkit. It runs on the UI thread; everything that reaches it from the
//! tray arrives as a posted [`MenuAction`].

use crate::clock::AgeSource;
use crate::platform::editor::{open_for_editing, EditorLauncher};
use crate::ui::details::{DetailsPopup, DetailsReport};
use crate::ui::menu::MenuAction;
use crate::ui::ticker::{Tick, TickScheduler};
use crate::ui::tray::TrayHandle;
use std::time::{Duration, Instant};

/// Lifecycle of the overlay surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePhase {
    Visible,
    Hidden,
    /// Terminal.
    Destroyed,
}

/// Window changes the toolkit layer must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEffect {
    Show,
    Hide,
    Close,
}

/// Main application state.
pub struct AppState {
    source: AgeSource,
    editor: Box<dyn EditorLauncher>,
    tray: Option<TrayHandle>,
    phase: SurfacePhase,
    label: String,
    ticker: TickScheduler,
    details: Vec<DetailsPopup>,
    next_popup_id: u64,
    effects: Vec<SurfaceEffect>,
}

impl AppState {
    pub fn new(source: AgeSource, editor: Box<dyn EditorLauncher>) -> Self {
        let label = source.current_age_string();
        Self {
            source,
            editor,
            tray: None,
            phase: SurfacePhase::Visible,
            label,
            ticker: TickScheduler::default(),
            details: Vec::new(),
            next_popup_id: 0,
            effects: Vec::new(),
        }
    }

    /// Link the tray so ticks also refresh its tooltip.
    pub fn attach_tray(&mut self, tray: TrayHandle) {
        self.tray = Some(tray);
    }

    pub fn source(&self) -> &AgeSource {
        &self.source
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == SurfacePhase::Destroyed
    }

    /// Text of the last tick.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn details(&self) -> &[DetailsPopup] {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut Vec<DetailsPopup> {
        &mut self.details
    }

    /// Drop popups the user has closed.
    pub fn prune_details(&mut self) {
        self.details.retain(|popup| popup.open);
    }

    /// Pending window changes, oldest first.
    pub fn take_effects(&mut self) -> Vec<SurfaceEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Handle a menu action from either surface.
    pub fn handle_action(&mut self, action: MenuAction) {
        if self.is_destroyed() {
            tracing::debug!(?action, "ignoring action after quit");
            return;
        }
        tracing::debug!(?action, "menu action");
        match action {
            MenuAction::ShowOverlay => self.show_overlay(),
            MenuAction::HideOverlay => self.hide_overlay(),
            MenuAction::ShowDetails => self.show_details(),
            MenuAction::EditBirthdate => self.edit_birthdate(),
            MenuAction::ReloadConfig => self.reload_config(),
            MenuAction::Quit => {
                self.quit();
            }
        }
    }

    pub fn show_overlay(&mut self) {
        if self.phase == SurfacePhase::Hidden {
            self.phase = SurfacePhase::Visible;
        }
        // Re-assert topmost even if already visible.
        if self.phase == SurfacePhase::Visible {
            self.effects.push(SurfaceEffect::Show);
        }
    }

    pub fn hide_overlay(&mut self) {
        if self.phase == SurfacePhase::Visible {
            self.phase = SurfacePhase::Hidden;
            self.effects.push(SurfaceEffect::Hide);
        }
    }

    /// Open another details popup with a snapshot of the current age.
    pub fn show_details(&mut self) {
        self.next_popup_id += 1;
        let report = DetailsReport::capture(&self.source);
        self.details.push(DetailsPopup::new(self.next_popup_id, report));
    }

    /// Open the config in an editor. Does not reload.
    pub fn edit_birthdate(&self) {
        open_for_editing(self.editor.as_ref(), self.source.config_path());
    }

    pub fn reload_config(&mut self) {
        self.source.reload();
    }

    /// Advance the tick loop. Returns how long until the next tick is due,
    /// or `None` once the loop has stopped.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        match self.ticker.poll(now, self.source.is_running()) {
            Tick::Fire => {
                self.refresh_label();
                self.ticker.rearm(now);
                Some(self.ticker.period())
            }
            Tick::Wait(remaining) => Some(remaining),
            Tick::Stopped => None,
        }
    }

    fn refresh_label(&mut self) {
        self.label = self.source.current_age_string();
        tracing::trace!(label = %self.label, "tick");
        if let Some(tray) = &self.tray {
            tray.push_tooltip(&self.label);
        }
    }

    /// Tear everything down. Returns false if already torn down.
    pub fn quit(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        tracing::info!("quitting");
        self.phase = SurfacePhase::Destroyed;
        self.source.stop();
        self.ticker.cancel();
        if let Some(tray) = self.tray.take() {
            tray.stop();
        }
        self.details.clear();
        self.effects.push(SurfaceEffect::Close);
        true
    }
}

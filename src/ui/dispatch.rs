//! Posting work onto the UI thread from other threads.

use crate::ui::menu::MenuAction;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Cloneable, thread-safe handle for queueing actions onto the UI loop.
///
/// Queued actions run at the start of the next frame; posting wakes the
/// loop so that frame happens promptly.
#[derive(Clone)]
pub struct UiHandle {
    ctx: egui::Context,
    sender: Sender<MenuAction>,
}

impl UiHandle {
    /// Create a handle and the receiver the UI drains each frame.
    pub fn new(ctx: egui::Context) -> (Self, Receiver<MenuAction>) {
        let (sender, receiver) = channel();
        (Self { ctx, sender }, receiver)
    }

    /// Queue `action` for the UI thread. Returns false if the UI is gone.
    pub fn post(&self, action: MenuAction) -> bool {
        if self.sender.send(action).is_err() {
            return false;
        }
        self.ctx.request_repaint();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posted_actions_arrive_in_order() {
        let (handle, receiver) = UiHandle::new(egui::Context::default());
        let from_thread = handle.clone();
        std::thread::spawn(move || {
            from_thread.post(MenuAction::ReloadConfig);
            from_thread.post(MenuAction::ShowDetails);
        })
        .join()
        .unwrap();

        let received: Vec<_> = receiver.try_iter().collect();
        assert_eq!(received, vec![MenuAction::ReloadConfig, MenuAction::ShowDetails]);
    }

    #[test]
    fn post_after_ui_gone_is_harmless() {
        let (handle, receiver) = UiHandle::new(egui::Context::default());
        drop(receiver);
        assert!(!handle.post(MenuAction::Quit));
    }
}

//! Window dragging and placement math.

use eframe::egui::{Pos2, Vec2};

/// Gap between the overlay and the right screen edge.
pub const RIGHT_MARGIN: f32 = 20.0;

/// Gap between the overlay and the bottom screen edge.
pub const BOTTOM_MARGIN: f32 = 60.0;

/// Pointer offset captured when a drag starts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    offset: Option<Pos2>,
}

impl DragState {
    /// Remember where inside the window the pointer grabbed it.
    pub fn begin(&mut self, pointer_local: Pos2) {
        self.offset = Some(pointer_local);
    }

    pub fn end(&mut self) {
        self.offset = None;
    }

    pub fn is_active(&self) -> bool {
        self.offset.is_some()
    }

    /// New window top-left so the grabbed point follows the pointer.
    ///
    /// No clamping to screen bounds.
    pub fn target(&self, window_pos: Pos2, pointer_local: Pos2) -> Option<Pos2> {
        self.offset
            .map(|offset| window_pos + (pointer_local - offset))
    }
}

/// Bottom-right placement of a window of `window` size on a `screen`.
pub fn initial_position(screen: Vec2, window: Vec2) -> Pos2 {
    Pos2::new(
        screen.x - window.x - RIGHT_MARGIN,
        screen.y - window.y - BOTTOM_MARGIN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_moves_by_pointer_delta() {
        let mut drag = DragState::default();
        drag.begin(Pos2::new(10.0, 5.0));
        let moved = drag.target(Pos2::new(300.0, 400.0), Pos2::new(25.0, -3.0));
        assert_eq!(moved, Some(Pos2::new(315.0, 392.0)));
    }

    #[test]
    fn drag_does_not_clamp_to_screen() {
        let mut drag = DragState::default();
        drag.begin(Pos2::new(50.0, 50.0));
        let moved = drag.target(Pos2::new(0.0, 0.0), Pos2::new(0.0, 0.0));
        assert_eq!(moved, Some(Pos2::new(-50.0, -50.0)));
    }

    #[test]
    fn no_target_without_press() {
        let mut drag = DragState::default();
        assert_eq!(drag.target(Pos2::ZERO, Pos2::new(1.0, 1.0)), None);
        drag.begin(Pos2::ZERO);
        drag.end();
        assert!(!drag.is_active());
    }

    #[test]
    fn placement_uses_fixed_margins() {
        let pos = initial_position(Vec2::new(1920.0, 1080.0), Vec2::new(250.0, 40.0));
        assert_eq!(pos, Pos2::new(1650.0, 980.0));
    }
}

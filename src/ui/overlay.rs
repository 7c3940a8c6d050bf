//! Overlay window implementation using eframe/egui.
//!
//! A borderless, always-on-top, translucent label showing the age. Drag to
//! move, double-click for details, right-click for the menu.

use crate::app::{AppState, SurfaceEffect, SurfacePhase};
use crate::platform::icons;
use crate::ui::drag::{initial_position, DragState};
use crate::ui::menu::{ContextMenuState, MenuAction, MenuEntry, OVERLAY_MENU};
use crate::ui::theme::Theme;
use eframe::egui;
use std::sync::mpsc::Receiver;
use std::time::Instant;

pub const APP_NAME: &str = "Memento Mori";

/// Starting size; the window shrinks to the label after the first frame.
const INITIAL_SIZE: [f32; 2] = [260.0, 40.0];

const MENU_SIZE: [f32; 2] = [170.0, 150.0];

/// Viewport settings for the overlay's root window.
pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_decorations(false)
            .with_always_on_top()
            .with_transparent(true)
            .with_resizable(false)
            .with_taskbar(false)
            .with_inner_size(INITIAL_SIZE)
            .with_icon(icons::window_icon()),
        ..Default::default()
    }
}

/// The eframe application driving the overlay.
pub struct OverlayApp {
    state: AppState,
    actions: Receiver<MenuAction>,
    theme: Theme,
    drag: DragState,
    context_menu: ContextMenuState,
    placed: bool,
    content_size: Option<egui::Vec2>,
}

impl OverlayApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState, actions: Receiver<MenuAction>) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);
        Self {
            state,
            actions,
            theme,
            drag: DragState::default(),
            context_menu: ContextMenuState::default(),
            placed: false,
            content_size: None,
        }
    }

    fn drain_actions(&mut self) {
        while let Ok(action) = self.actions.try_recv() {
            self.state.handle_action(action);
        }
    }

    fn apply_effects(&mut self, ctx: &egui::Context) {
        for effect in self.state.take_effects() {
            match effect {
                SurfaceEffect::Show => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::MousePassthrough(false));
                    ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(
                        egui::WindowLevel::AlwaysOnTop,
                    ));
                }
                SurfaceEffect::Hide => {
                    // Kept alive but unpainted and click-through so ticks go on.
                    self.drag.end();
                    self.context_menu.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::MousePassthrough(true));
                }
                SurfaceEffect::Close => {
                    self.context_menu.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn show_label(&mut self, ctx: &egui::Context) {
        let frame = egui::Frame::none()
            .fill(self.theme.overlay_fill)
            .inner_margin(egui::Margin::symmetric(
                self.theme.label_padding.x,
                self.theme.label_padding.y,
            ));

        let response = egui::CentralPanel::default()
            .frame(frame)
            .show(ctx, |ui| {
                let text = egui::RichText::new(self.state.label())
                    .monospace()
                    .strong()
                    .size(self.theme.label_size)
                    .color(self.theme.text_primary);
                ui.add(
                    egui::Label::new(text)
                        .sense(egui::Sense::click_and_drag())
                        .selectable(false)
                        .wrap_mode(egui::TextWrapMode::Extend),
                )
            })
            .inner;

        self.fit_window(ctx, response.rect.size());
        self.handle_pointer(ctx, &response);
    }

    /// Size the window to the label, then place it bottom-right once.
    fn fit_window(&mut self, ctx: &egui::Context, label: egui::Vec2) {
        let size = (label + self.theme.label_padding * 2.0).ceil();
        if self.content_size.map_or(true, |old| (old - size).length() > 0.5) {
            self.content_size = Some(size);
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        }

        if !self.placed {
            if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
                let pos = initial_position(monitor, size);
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos));
                self.placed = true;
                tracing::debug!(x = pos.x, y = pos.y, "overlay placed");
            }
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response) {
        if response.hovered() || self.drag.is_active() {
            ctx.set_cursor_icon(egui::CursorIcon::Move);
        }

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.drag.begin(pointer);
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            let outer = ctx.input(|i| i.viewport().outer_rect);
            if let (Some(outer), Some(pointer)) = (outer, ctx.pointer_interact_pos()) {
                if let Some(target) = self.drag.target(outer.min, pointer) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(target));
                }
            }
        }
        if response.drag_stopped() {
            self.drag.end();
        }

        if response.double_clicked() {
            self.state.handle_action(MenuAction::ShowDetails);
        }

        if response.secondary_clicked() {
            let outer = ctx.input(|i| i.viewport().outer_rect);
            if let (Some(outer), Some(pointer)) = (outer, response.interact_pointer_pos()) {
                let screen = outer.min + pointer.to_vec2();
                self.context_menu.open([screen.x, screen.y]);
            }
        }
    }

    /// The context menu gets its own small window so it is not clipped by
    /// the overlay's bounds.
    fn show_context_menu(&mut self, ctx: &egui::Context) {
        let Some(position) = self.context_menu.position() else {
            return;
        };

        let builder = egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_decorations(false)
            .with_always_on_top()
            .with_resizable(false)
            .with_taskbar(false)
            .with_position(position)
            .with_inner_size(MENU_SIZE);

        let theme = &self.theme;
        let (chosen, focused, dismissed) = ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("memento_mori_context_menu"),
            builder,
            |ctx, _class| {
                let mut chosen = None;
                egui::CentralPanel::default()
                    .frame(
                        egui::Frame::none()
                            .fill(theme.menu)
                            .inner_margin(egui::Margin::same(4.0)),
                    )
                    .show(ctx, |ui| {
                        ui.spacing_mut().item_spacing.y = 2.0;
                        for entry in OVERLAY_MENU {
                            match entry {
                                MenuEntry::Item { label, action } => {
                                    let button = egui::Button::new(*label)
                                        .frame(false)
                                        .min_size(egui::vec2(ui.available_width(), 20.0));
                                    if ui.add(button).clicked() {
                                        chosen = Some(*action);
                                    }
                                }
                                MenuEntry::Separator => {
                                    ui.separator();
                                }
                            }
                        }
                    });
                let (focused, dismissed) = ctx.input(|i| {
                    (
                        i.viewport().focused,
                        i.viewport().close_requested() || i.key_pressed(egui::Key::Escape),
                    )
                });
                (chosen, focused, dismissed)
            },
        );

        if chosen.is_some() || dismissed {
            self.context_menu.close();
        } else {
            self.context_menu.observe_focus(focused);
        }
        if let Some(action) = chosen {
            self.state.handle_action(action);
        }
    }

    fn show_details(&mut self, ctx: &egui::Context) {
        let theme = &self.theme;
        for popup in self.state.details_mut() {
            popup.show(ctx, theme);
        }
        self.state.prune_details();
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_actions();

        if ctx.input(|i| i.viewport().close_requested()) {
            self.state.quit();
        }

        if let Some(wait) = self.state.tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }

        match self.state.phase() {
            SurfacePhase::Visible => self.show_label(ctx),
            SurfacePhase::Hidden => {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none())
                    .show(ctx, |_ui| {});
            }
            SurfacePhase::Destroyed => {}
        }

        if !self.state.is_destroyed() {
            self.show_context_menu(ctx);
            self.show_details(ctx);
        }

        self.apply_effects(ctx);
    }
}

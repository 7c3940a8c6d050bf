//! Details popup: a frozen snapshot of the age with totals.
//!
//! Each popup is its own native viewport; several may be open at once and
//! each closes on its own.

use crate::clock::age::{
    compute_age, group_thousands, total_elapsed, AgeBreakdown, ElapsedTotals, BIRTHDATE_FORMAT,
};
use crate::clock::AgeSource;
use crate::ui::theme::Theme;
use chrono::NaiveDateTime;
use eframe::egui;

pub const DETAILS_TITLE: &str = "Memento Mori - Details";

/// Caption closing every details popup.
pub const MEMENTO_CAPTION: &str = "Remember, you will die.";

/// Age figures captured when a popup is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsReport {
    pub age: AgeBreakdown,
    pub totals: ElapsedTotals,
    pub birthdate: NaiveDateTime,
}

impl DetailsReport {
    pub fn at(birthdate: NaiveDateTime, now: NaiveDateTime) -> Self {
        Self {
            age: compute_age(birthdate, now),
            totals: total_elapsed(birthdate, now),
            birthdate,
        }
    }

    pub fn capture(source: &AgeSource) -> Self {
        Self::at(source.birthdate(), source.now())
    }

    /// Popup body text.
    pub fn text(&self) -> String {
        let age = &self.age;
        format!(
            "Your Time on Earth:\n\n\
             Age: {}y {}d\n\
             Time: {:02}:{:02}:{:02}\n\n\
             Total Days: {}\n\
             Total Hours: {}\n\n\
             Birthdate: {}\n\n\
             {}",
            age.years,
            age.days,
            age.hours,
            age.minutes,
            age.seconds,
            group_thousands(self.totals.days),
            group_thousands(self.totals.hours),
            self.birthdate.format(BIRTHDATE_FORMAT),
            MEMENTO_CAPTION,
        )
    }
}

/// One open details popup.
#[derive(Debug, Clone)]
pub struct DetailsPopup {
    pub id: u64,
    pub report: DetailsReport,
    pub open: bool,
}

impl DetailsPopup {
    pub fn new(id: u64, report: DetailsReport) -> Self {
        Self {
            id,
            report,
            open: true,
        }
    }

    fn viewport_id(&self) -> egui::ViewportId {
        egui::ViewportId::from_hash_of(("memento_mori_details", self.id))
    }

    /// Render the popup in its own window; clears `open` when dismissed.
    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) {
        let builder = egui::ViewportBuilder::default()
            .with_title(DETAILS_TITLE)
            .with_always_on_top()
            .with_resizable(false)
            .with_inner_size([320.0, 330.0]);

        let text = self.report.text();
        let mut close = false;
        ctx.show_viewport_immediate(self.viewport_id(), builder, |ctx, _class| {
            egui::CentralPanel::default()
                .frame(
                    egui::Frame::none()
                        .fill(theme.background)
                        .inner_margin(egui::Margin::same(30.0)),
                )
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(&text)
                            .color(theme.text_primary)
                            .size(13.0),
                    );
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        let button = egui::Button::new(
                            egui::RichText::new("Close").color(theme.text_primary),
                        )
                        .fill(theme.button)
                        .min_size(egui::vec2(80.0, 26.0));
                        if ui.add(button).clicked() {
                            close = true;
                        }
                    });
                });

            if ctx.input(|i| i.viewport().close_requested()) {
                close = true;
            }
        });

        if close {
            self.open = false;
        }
    }
}

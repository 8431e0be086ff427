use egui::{
    Align, Color32, CornerRadius, Frame, Layout, Margin, Response, RichText, Sense, Stroke, Ui,
    Vec2, Widget,
};

use crate::alert::{AlertCategory, AlertPresenter};

/// Background and border colors of an alert box.
pub fn category_colors(category: AlertCategory) -> (Color32, Color32) {
    match category {
        AlertCategory::Info => (
            Color32::from_rgb(217, 237, 247),
            Color32::from_rgb(49, 112, 143),
        ),
        AlertCategory::Success => (
            Color32::from_rgb(223, 240, 216),
            Color32::from_rgb(60, 118, 61),
        ),
        AlertCategory::Warning => (
            Color32::from_rgb(252, 248, 227),
            Color32::from_rgb(138, 109, 59),
        ),
        AlertCategory::Danger => (
            Color32::from_rgb(242, 222, 222),
            Color32::from_rgb(169, 68, 66),
        ),
    }
}

/// Draws the alert while it is active. OK and Cancel buttons only show up for
/// actions the presenter was created with.
impl Widget for &mut AlertPresenter {
    fn ui(self, ui: &mut Ui) -> Response {
        if !self.is_active() {
            return ui.allocate_response(Vec2::ZERO, Sense::hover());
        }

        let (fill, accent) = category_colors(self.category.get());
        let (mut dismiss, mut ok, mut cancel) = (false, false, false);
        let has_ok = self.confirm.is_some();
        let has_cancel = self.cancel.is_some();

        let resp = Frame::new()
            .fill(fill)
            .stroke(Stroke::new(1., accent))
            .corner_radius(CornerRadius::same(4))
            .inner_margin(Margin::same(10))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(self.title.get()).strong().color(accent));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        dismiss = ui.small_button("×").clicked();
                    });
                });
                ui.label(RichText::new(self.message.get()).color(accent));

                if has_ok || has_cancel {
                    ui.add_space(4.);
                    ui.horizontal(|ui| {
                        if has_ok {
                            ok = ui.button("OK").clicked();
                        }
                        if has_cancel {
                            cancel = ui.button("Cancel").clicked();
                        }
                    });
                }
            })
            .response;

        if ok {
            self.confirm();
        } else if cancel {
            self.cancel();
        } else if dismiss {
            self.close();
        }

        resp
    }
}

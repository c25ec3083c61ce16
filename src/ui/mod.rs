mod layers_panel;
mod properties_panel;
mod status_bar;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::{EguiPrimaryContextPass, egui};

/// Add a field widget and note when an edit interaction begins on it (drag
/// start or focus gain). That is the frame a checkpoint must be taken: the
/// drag has produced no delta yet and a freshly focused field has received no
/// keystrokes, so the scene still holds the pre-edit values.
fn tracked(ui: &mut egui::Ui, begun: &mut bool, widget: impl egui::Widget) -> egui::Response {
    let response = ui.add(widget);
    *begun |= response.drag_started() || response.gained_focus();
    response
}

/// Transient status-bar message with a fade-out timer. Every subsystem that
/// wants to surface a toast goes through this resource.
#[derive(Resource)]
pub struct StatusMessage {
    pub text: Option<String>,
    pub is_error: bool,
    timer: Timer,
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self {
            text: None,
            is_error: false,
            timer: Timer::from_seconds(4.0, TimerMode::Once),
        }
    }
}

impl StatusMessage {
    pub fn info(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.is_error = false;
        self.timer.reset();
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.is_error = true;
        self.timer.reset();
    }
}

/// Expire the current status message after its display window.
fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.text.is_none() {
        return;
    }
    if status.timer.tick(time.delta()).is_finished() {
        status.text = None;
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatusMessage>()
            .add_systems(Update, tick_status_message)
            // Side panel first so the top and bottom panels fit beside it
            .add_systems(
                EguiPrimaryContextPass,
                (
                    layers_panel::layers_panel_ui,
                    toolbar::toolbar_ui,
                    status_bar::status_bar_ui,
                    properties_panel::properties_panel_ui,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_replaces_previous() {
        let mut status = StatusMessage::default();
        status.error("first");
        assert!(status.is_error);

        status.info("second");
        assert!(!status.is_error);
        assert_eq!(status.text.as_deref(), Some("second"));
    }
}

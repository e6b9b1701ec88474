//! Egui parameter panel
//!
//! Draws one slider per registered control, grouped under collapsible
//! headers. Slider edits go through [`ParamPanel::set`], which queues the
//! change for the frame driver. Edits the channel could not take are
//! retried on every pass until they get through.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use orbit::ParamPanel;

/// Whether the pointer is over (or dragging in) the panel
///
/// Camera controls stay idle while this is set.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PanelFocus(pub bool);

/// The panel model as an ECS resource
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct ControlPanel(pub ParamPanel);

/// Draw the panel and forward edits
pub fn draw_panel(
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlPanel>,
    mut focus: ResMut<PanelFocus>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    // Collect edits first; the layout is borrowed while drawing
    let mut edits = Vec::new();
    egui::Window::new(panel.title())
        .default_width(260.0)
        .resizable(false)
        .show(ctx, |ui| {
            for group in panel.groups() {
                egui::CollapsingHeader::new(group.name.as_str())
                    .default_open(true)
                    .show(ui, |ui| {
                        for control in &group.controls {
                            let mut value = panel.value(control.field);
                            let slider = egui::Slider::new(&mut value, control.min..=control.max)
                                .step_by(control.step as f64)
                                .text(control.label.as_str());
                            if ui.add(slider).changed() {
                                edits.push((control.field, value));
                            }
                        }
                    });
            }
        });

    for (field, value) in &edits {
        if let Err(err) = panel.set(*field, *value) {
            warn!("Deferred {:?} = {}: {}", field, value, err);
        }
    }
    if edits.is_empty() && panel.has_pending() {
        if let Err(err) = panel.flush() {
            debug!("Parameter edits still pending: {}", err);
        }
    }

    focus.0 = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    Ok(())
}

/// Registers egui and the panel system
pub struct ParamPanelPlugin;

impl Plugin for ParamPanelPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }
        app.init_resource::<PanelFocus>()
            .add_systems(EguiPrimaryContextPass, draw_panel);
    }
}

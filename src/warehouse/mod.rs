mod layer;
mod layout_data;
mod object;
pub mod persistence;
pub mod spawn;

pub use layer::Layer;
pub use layout_data::{
    LayerData, LayoutData, SavedLayout, SavedObject, SavedTravelPath, array_to_color,
    color_to_array,
};
pub use object::{
    AgvSimState, AgvStatus, AgvUnit, CargoIndicator, EquipmentShape, ObjectCounters, ObjectKind,
    PlacedObject, Selected, TravelPath, default_agv_kind,
};
pub use persistence::{
    LayoutLoadError, LoadLayoutRequest, NewLayoutRequest, SaveLayoutRequest, collect_saved_layout,
};

use bevy::prelude::*;

pub struct WarehousePlugin;

impl Plugin for WarehousePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LayoutData>()
            .init_resource::<LayoutLoadError>()
            .init_resource::<ObjectCounters>()
            .add_message::<SaveLayoutRequest>()
            .add_message::<LoadLayoutRequest>()
            .add_message::<NewLayoutRequest>()
            .add_systems(Startup, persistence::ensure_layouts_directory)
            .add_systems(
                Update,
                (
                    persistence::save_layout_system.run_if(on_message::<SaveLayoutRequest>),
                    persistence::load_layout_system.run_if(on_message::<LoadLayoutRequest>),
                    persistence::new_layout_system.run_if(on_message::<NewLayoutRequest>),
                ),
            );
    }
}

//! Components for everything placeable on the warehouse floor.
//!
//! Each object type is a variant of [`ObjectKind`] carrying only the fields
//! that type needs. AGVs additionally get an [`AgvUnit`] component holding
//! their live operating state, including the per-run simulation state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AGV_CAPACITY, DEFAULT_AGV_SPEED};

use super::Layer;

/// An object placed on the floor plan.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PlacedObject {
    pub name: String,
    pub layer: Layer,
    pub kind: ObjectKind,
}

/// Marker for the currently selected entity.
#[derive(Component)]
pub struct Selected;

/// Marker for the cargo box child entity spawned onto a loaded AGV.
#[derive(Component)]
pub struct CargoIndicator;

/// Tagged per-type attributes of a placed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    Shelf {
        width_m: f32,
        depth_m: f32,
        levels: u32,
    },
    Pallet,
    Shipping {
        width_cells: u32,
        depth_cells: u32,
    },
    Equipment {
        shape: EquipmentShape,
    },
    Restricted {
        width_cells: u32,
        depth_cells: u32,
    },
    AgvStation {
        station_id: String,
    },
    Agv {
        agv_id: String,
        capacity_kg: f32,
        max_speed: f32,
        battery: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EquipmentShape {
    Box {
        length_m: f32,
        width_m: f32,
        height_m: f32,
    },
    Cylinder {
        diameter_m: f32,
        height_m: f32,
    },
}

impl ObjectKind {
    /// The layer this kind of object belongs on.
    pub fn layer(&self) -> Layer {
        match self {
            ObjectKind::Shelf { .. } => Layer::Shelf,
            ObjectKind::Pallet => Layer::Pallet,
            ObjectKind::Shipping { .. } => Layer::Shipping,
            ObjectKind::Equipment { .. } => Layer::Equipment,
            ObjectKind::Restricted { .. } => Layer::Restricted,
            ObjectKind::AgvStation { .. } => Layer::AgvStation,
            ObjectKind::Agv { .. } => Layer::Agv,
        }
    }

    pub fn default_name(&self) -> String {
        match self {
            ObjectKind::Shelf { .. } => "Shelf".to_string(),
            ObjectKind::Pallet => "Pallet area".to_string(),
            ObjectKind::Shipping { .. } => "Shipping area".to_string(),
            ObjectKind::Equipment { .. } => "Equipment".to_string(),
            ObjectKind::Restricted { .. } => "Restricted zone".to_string(),
            ObjectKind::AgvStation { station_id } => station_id.clone(),
            ObjectKind::Agv { agv_id, .. } => agv_id.clone(),
        }
    }

    /// Floor footprint in meters, used for the sprite quad and hit testing.
    /// Cell-based kinds scale with the grid size.
    pub fn footprint(&self, grid_size: f32) -> Vec2 {
        match self {
            ObjectKind::Shelf {
                width_m, depth_m, ..
            } => Vec2::new(*width_m, *depth_m),
            ObjectKind::Pallet => Vec2::splat(2.0 * grid_size),
            ObjectKind::Shipping {
                width_cells,
                depth_cells,
            }
            | ObjectKind::Restricted {
                width_cells,
                depth_cells,
            } => Vec2::new(
                *width_cells as f32 * grid_size,
                *depth_cells as f32 * grid_size,
            ),
            ObjectKind::Equipment { shape } => match shape {
                EquipmentShape::Box {
                    length_m, width_m, ..
                } => Vec2::new(*length_m, *width_m),
                EquipmentShape::Cylinder { diameter_m, .. } => Vec2::splat(*diameter_m),
            },
            ObjectKind::AgvStation { .. } => Vec2::splat(2.0 * grid_size),
            ObjectKind::Agv { .. } => Vec2::new(0.9, 0.6),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ObjectKind::Shelf { .. } => crate::theme::SHELF_COLOR,
            ObjectKind::Pallet => crate::theme::PALLET_COLOR,
            ObjectKind::Shipping { .. } => crate::theme::SHIPPING_COLOR,
            ObjectKind::Equipment { .. } => crate::theme::EQUIPMENT_COLOR,
            ObjectKind::Restricted { .. } => crate::theme::RESTRICTED_COLOR,
            ObjectKind::AgvStation { .. } => crate::theme::AGV_STATION_COLOR,
            ObjectKind::Agv { .. } => crate::theme::AGV_COLOR,
        }
    }
}

/// Monotonic counters used to hand out readable AGV / station identifiers.
#[derive(Resource, Default)]
pub struct ObjectCounters {
    agvs: u32,
    stations: u32,
}

impl ObjectCounters {
    pub fn next_agv_id(&mut self) -> String {
        self.agvs += 1;
        format!("AGV-{:03}", self.agvs)
    }

    pub fn next_station_id(&mut self) -> String {
        self.stations += 1;
        format!("ST-{:03}", self.stations)
    }
}

/// AGV operating status, reflected in the status tint of the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgvStatus {
    #[default]
    Idle,
    Working,
    Charging,
    Error,
}

impl AgvStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            AgvStatus::Idle => "Idle",
            AgvStatus::Working => "Working",
            AgvStatus::Charging => "Charging",
            AgvStatus::Error => "Error",
        }
    }
}

/// Per-run path-following state. Reinitialized every time simulation starts.
#[derive(Debug, Clone, Default)]
pub struct AgvSimState {
    /// Index into the path list captured at simulation start, if any
    pub path_index: Option<usize>,
    /// Next waypoint to head for on the assigned path
    pub waypoint_index: usize,
    pub moving: bool,
    /// Pending re-think delay after task completion; checked against the
    /// playing-and-unpaused guard when it fires
    pub rethink: Option<Timer>,
}

/// Live operating state of one AGV.
#[derive(Component, Debug, Clone)]
pub struct AgvUnit {
    pub agv_id: String,
    pub capacity_kg: f32,
    pub max_speed: f32,
    /// Battery level, 0-100
    pub battery: f32,
    pub status: AgvStatus,
    pub has_cargo: bool,
    pub cargo_info: Option<String>,
    pub current_task: Option<String>,
    pub target_position: Option<Vec2>,
    pub sim: AgvSimState,
}

impl AgvUnit {
    pub fn new(agv_id: String, capacity_kg: f32, max_speed: f32, battery: f32) -> Self {
        Self {
            agv_id,
            capacity_kg,
            max_speed,
            battery,
            status: AgvStatus::Idle,
            has_cargo: false,
            cargo_info: None,
            current_task: None,
            target_position: None,
            sim: AgvSimState::default(),
        }
    }

    /// Hard reset back to an idle unit with no task, cargo, or path state.
    pub fn reset(&mut self) {
        self.status = AgvStatus::Idle;
        self.has_cargo = false;
        self.cargo_info = None;
        self.current_task = None;
        self.target_position = None;
        self.sim = AgvSimState::default();
    }
}

pub fn default_agv_kind(agv_id: String) -> ObjectKind {
    ObjectKind::Agv {
        agv_id,
        capacity_kg: DEFAULT_AGV_CAPACITY,
        max_speed: DEFAULT_AGV_SPEED,
        battery: 100.0,
    }
}

/// An operator-drawn AGV travel path: at least two floor-plane waypoints.
#[derive(Component, Debug, Clone)]
pub struct TravelPath {
    pub points: Vec<Vec2>,
    pub color: Color,
}

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GRID_SIZE;

use super::{Layer, ObjectKind, PlacedObject, TravelPath};

/// Live metadata for the open layout.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct LayoutData {
    pub name: String,
    /// Grid cell size in meters
    pub grid_size: f32,
    pub grid_visible: bool,
    /// Floor dimensions in meters
    pub floor_width: f32,
    pub floor_depth: f32,
    pub layers: Vec<LayerData>,
}

impl Default for LayoutData {
    fn default() -> Self {
        Self {
            name: "Untitled Layout".to_string(),
            grid_size: DEFAULT_GRID_SIZE,
            grid_visible: true,
            floor_width: 30.0,
            floor_depth: 20.0,
            layers: Layer::all()
                .iter()
                .map(|layer| LayerData {
                    layer_type: *layer,
                    visible: true,
                })
                .collect(),
        }
    }
}

impl LayoutData {
    pub fn layer_visible(&self, layer: Layer) -> bool {
        self.layers
            .iter()
            .find(|ld| ld.layer_type == layer)
            .map(|ld| ld.visible)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerData {
    pub layer_type: Layer,
    pub visible: bool,
}

/// One placed object as it appears in a saved layout or scene snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedObject {
    pub name: String,
    pub layer: Layer,
    pub position: Vec2,
    pub rotation: f32,
    pub kind: ObjectKind,
}

impl SavedObject {
    pub fn from_entity(object: &PlacedObject, transform: &Transform) -> Self {
        Self {
            name: object.name.clone(),
            layer: object.layer,
            position: transform.translation.truncate(),
            rotation: transform.rotation.to_euler(EulerRot::ZYX).0,
            kind: object.kind.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTravelPath {
    pub points: Vec<Vec2>,
    pub color: [f32; 4],
}

impl SavedTravelPath {
    pub fn from_path(path: &TravelPath) -> Self {
        Self {
            points: path.points.clone(),
            color: color_to_array(path.color),
        }
    }
}

/// The full serialized scene: layout metadata, placed objects, travel paths.
/// Doubles as the undo/redo snapshot payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLayout {
    pub layout: LayoutData,
    pub objects: Vec<SavedObject>,
    #[serde(default)]
    pub paths: Vec<SavedTravelPath>,
}

pub fn color_to_array(color: Color) -> [f32; 4] {
    let srgba = color.to_srgba();
    [srgba.red, srgba.green, srgba.blue, srgba.alpha]
}

pub fn array_to_color(arr: [f32; 4]) -> Color {
    Color::srgba(arr[0], arr[1], arr[2], arr[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_data_defaults() {
        let layout = LayoutData::default();
        assert_eq!(layout.name, "Untitled Layout");
        assert_eq!(layout.grid_size, DEFAULT_GRID_SIZE);
        assert!(layout.grid_visible);
        assert_eq!(layout.layers.len(), Layer::all().len());
        for layer_data in &layout.layers {
            assert!(layer_data.visible);
        }
    }

    #[test]
    fn test_layer_visible_defaults_true_for_unknown() {
        let layout = LayoutData {
            layers: vec![],
            ..LayoutData::default()
        };
        assert!(layout.layer_visible(Layer::Agv));
    }

    #[test]
    fn test_layout_serialization_roundtrip() {
        let layout = LayoutData::default();
        let json = serde_json::to_string(&layout).unwrap();
        let back: LayoutData = serde_json::from_str(&json).unwrap();
        assert_eq!(layout.name, back.name);
        assert_eq!(layout.grid_size, back.grid_size);
        assert_eq!(layout.layers.len(), back.layers.len());
    }

    #[test]
    fn test_saved_object_from_entity() {
        let object = PlacedObject {
            name: "Shelf".to_string(),
            layer: Layer::Shelf,
            kind: ObjectKind::Shelf {
                width_m: 2.4,
                depth_m: 0.6,
                levels: 5,
            },
        };
        let transform = Transform {
            translation: Vec3::new(3.0, 4.5, 40.0),
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            ..Default::default()
        };

        let saved = SavedObject::from_entity(&object, &transform);
        assert_eq!(saved.position, Vec2::new(3.0, 4.5));
        assert_eq!(saved.layer, Layer::Shelf);
        assert!((saved.rotation - std::f32::consts::FRAC_PI_2).abs() < 0.001);
    }

    #[test]
    fn test_saved_layout_serialization() {
        let saved = SavedLayout {
            layout: LayoutData::default(),
            objects: vec![SavedObject {
                name: "Pallet area".to_string(),
                layer: Layer::Pallet,
                position: Vec2::new(1.2, 1.2),
                rotation: 0.0,
                kind: ObjectKind::Pallet,
            }],
            paths: vec![SavedTravelPath {
                points: vec![Vec2::ZERO, Vec2::new(6.0, 0.0)],
                color: [0.02, 0.71, 0.83, 1.0],
            }],
        };

        let json = serde_json::to_string_pretty(&saved).unwrap();
        let back: SavedLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back.objects.len(), 1);
        assert_eq!(back.paths.len(), 1);
        assert_eq!(back.paths[0].points.len(), 2);
    }

    #[test]
    fn test_saved_layout_paths_default_when_missing() {
        // Older files without a paths field still load
        let json = r#"{
            "layout": {
                "name": "Old Layout",
                "grid_size": 0.6,
                "grid_visible": true,
                "floor_width": 30.0,
                "floor_depth": 20.0,
                "layers": []
            },
            "objects": []
        }"#;

        let back: SavedLayout = serde_json::from_str(json).unwrap();
        assert!(back.paths.is_empty());
    }

    #[test]
    fn test_color_array_roundtrip() {
        let color = Color::srgba(0.1, 0.2, 0.3, 0.4);
        let arr = color_to_array(color);
        let back = color_to_array(array_to_color(arr));
        assert_eq!(arr, back);
    }
}

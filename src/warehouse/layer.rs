use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Layer {
    Floor,
    #[default]
    Shelf,
    Pallet,
    Shipping,
    Equipment,
    Restricted,
    AgvStation,
    Agv,
    /// Operator-drawn AGV travel paths
    AgvPath,
}

impl Layer {
    pub fn z_base(&self) -> f32 {
        match self {
            Layer::Floor => 0.0,
            Layer::Restricted => 10.0,
            Layer::Shipping => 20.0,
            Layer::Pallet => 30.0,
            Layer::Shelf => 40.0,
            Layer::Equipment => 50.0,
            Layer::AgvStation => 60.0,
            Layer::AgvPath => 70.0,
            Layer::Agv => 80.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Layer::Floor => "Floor",
            Layer::Shelf => "Shelves",
            Layer::Pallet => "Pallets",
            Layer::Shipping => "Shipping",
            Layer::Equipment => "Equipment",
            Layer::Restricted => "Restricted",
            Layer::AgvStation => "AGV Stations",
            Layer::Agv => "AGVs",
            Layer::AgvPath => "AGV Paths",
        }
    }

    /// Returns all layers that hold placeable objects or paths
    pub fn all() -> &'static [Layer] {
        &[
            Layer::Shelf,
            Layer::Pallet,
            Layer::Shipping,
            Layer::Equipment,
            Layer::Restricted,
            Layer::AgvStation,
            Layer::Agv,
            Layer::AgvPath,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_base_ordering() {
        // AGVs must render above everything they drive over
        assert!(Layer::Floor.z_base() < Layer::Restricted.z_base());
        assert!(Layer::Restricted.z_base() < Layer::Shelf.z_base());
        assert!(Layer::Shelf.z_base() < Layer::AgvStation.z_base());
        assert!(Layer::AgvStation.z_base() < Layer::AgvPath.z_base());
        assert!(Layer::AgvPath.z_base() < Layer::Agv.z_base());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Layer::Shelf.display_name(), "Shelves");
        assert_eq!(Layer::Agv.display_name(), "AGVs");
        assert_eq!(Layer::AgvPath.display_name(), "AGV Paths");
        assert_eq!(Layer::AgvStation.display_name(), "AGV Stations");
    }

    #[test]
    fn test_all_excludes_floor() {
        assert!(!Layer::all().contains(&Layer::Floor));
    }

    #[test]
    fn test_all_has_correct_count() {
        assert_eq!(Layer::all().len(), 8);
    }

    #[test]
    fn test_default_is_shelf() {
        assert_eq!(Layer::default(), Layer::Shelf);
    }

    #[test]
    fn test_serialization_roundtrip() {
        for layer in [
            Layer::Floor,
            Layer::Shelf,
            Layer::Pallet,
            Layer::Shipping,
            Layer::Equipment,
            Layer::Restricted,
            Layer::AgvStation,
            Layer::Agv,
            Layer::AgvPath,
        ] {
            let json = serde_json::to_string(&layer).unwrap();
            let deserialized: Layer = serde_json::from_str(&json).unwrap();
            assert_eq!(layer, deserialized);
        }
    }
}

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::warehouse::{EquipmentShape, ObjectCounters, ObjectKind, Selected, default_agv_kind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTool {
    #[default]
    Select,
    Place,
    Path,
}

impl EditorTool {
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorTool::Select => "Select (V)",
            EditorTool::Place => "Place (P)",
            EditorTool::Path => "Path (T)",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            EditorTool::Select => CursorIcon::System(SystemCursorIcon::Default),
            EditorTool::Place => CursorIcon::System(SystemCursorIcon::Crosshair),
            EditorTool::Path => CursorIcon::System(SystemCursorIcon::Crosshair),
        }
    }

    pub fn all() -> &'static [EditorTool] {
        &[EditorTool::Select, EditorTool::Place, EditorTool::Path]
    }
}

#[derive(Resource, Default)]
pub struct CurrentTool {
    pub tool: EditorTool,
}

/// Whether the app is laying out the floor plan or running AGVs over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Edit,
    Simulate,
}

#[derive(Resource, Default)]
pub struct CurrentMode {
    pub mode: EditorMode,
}

/// What the Place tool drops on the next click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteItem {
    #[default]
    Shelf,
    Pallet,
    Shipping,
    Equipment,
    Restricted,
    AgvStation,
    Agv,
}

impl PaletteItem {
    pub fn display_name(&self) -> &'static str {
        match self {
            PaletteItem::Shelf => "Shelf",
            PaletteItem::Pallet => "Pallet area",
            PaletteItem::Shipping => "Shipping area",
            PaletteItem::Equipment => "Equipment",
            PaletteItem::Restricted => "Restricted zone",
            PaletteItem::AgvStation => "AGV station",
            PaletteItem::Agv => "AGV",
        }
    }

    pub fn all() -> &'static [PaletteItem] {
        &[
            PaletteItem::Shelf,
            PaletteItem::Pallet,
            PaletteItem::Shipping,
            PaletteItem::Equipment,
            PaletteItem::Restricted,
            PaletteItem::AgvStation,
            PaletteItem::Agv,
        ]
    }

    /// Build a concrete object kind with factory defaults. AGVs and stations
    /// draw a fresh identifier so every placement is unique.
    pub fn make_kind(&self, counters: &mut ObjectCounters) -> ObjectKind {
        match self {
            PaletteItem::Shelf => ObjectKind::Shelf {
                width_m: 2.4,
                depth_m: 0.6,
                levels: 5,
            },
            PaletteItem::Pallet => ObjectKind::Pallet,
            PaletteItem::Shipping => ObjectKind::Shipping {
                width_cells: 4,
                depth_cells: 3,
            },
            PaletteItem::Equipment => ObjectKind::Equipment {
                shape: EquipmentShape::Box {
                    length_m: 0.6,
                    width_m: 0.6,
                    height_m: 2.1,
                },
            },
            PaletteItem::Restricted => ObjectKind::Restricted {
                width_cells: 2,
                depth_cells: 2,
            },
            PaletteItem::AgvStation => ObjectKind::AgvStation {
                station_id: counters.next_station_id(),
            },
            PaletteItem::Agv => default_agv_kind(counters.next_agv_id()),
        }
    }
}

#[derive(Resource, Default)]
pub struct PlacementPalette {
    pub selection: PaletteItem,
}

pub fn handle_tool_shortcuts(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current_tool: ResMut<CurrentTool>,
    selected_query: Query<Entity, With<Selected>>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let new_tool = if keyboard.just_pressed(KeyCode::KeyV) || keyboard.just_pressed(KeyCode::KeyS) {
        Some(EditorTool::Select)
    } else if keyboard.just_pressed(KeyCode::KeyP) {
        Some(EditorTool::Place)
    } else if keyboard.just_pressed(KeyCode::KeyT) {
        Some(EditorTool::Path)
    } else {
        None
    };

    if let Some(tool) = new_tool {
        // Clear selection when switching tools
        if tool != current_tool.tool {
            for entity in selected_query.iter() {
                commands.entity(entity).remove::<Selected>();
            }
        }
        current_tool.tool = tool;
    }
}

pub fn update_cursor_icon(
    current_tool: Res<CurrentTool>,
    mut window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok((entity, _window)) = window_query.single_mut() else {
        return;
    };

    // Use default cursor over UI, tool cursor in editor space
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    commands
        .entity(entity)
        .insert(current_tool.tool.cursor_icon());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_contain_shortcuts() {
        for tool in EditorTool::all() {
            let name = tool.display_name();
            assert!(name.contains('('), "missing shortcut hint: {}", name);
            assert!(name.contains(')'), "missing shortcut hint: {}", name);
        }
    }

    #[test]
    fn test_default_tool_is_select() {
        assert_eq!(EditorTool::default(), EditorTool::Select);
        assert_eq!(CurrentTool::default().tool, EditorTool::Select);
    }

    #[test]
    fn test_default_mode_is_edit() {
        assert_eq!(CurrentMode::default().mode, EditorMode::Edit);
    }

    #[test]
    fn test_palette_covers_every_placeable_kind() {
        assert_eq!(PaletteItem::all().len(), 7);
    }

    #[test]
    fn test_palette_agv_ids_are_unique() {
        let mut counters = ObjectCounters::default();
        let a = PaletteItem::Agv.make_kind(&mut counters);
        let b = PaletteItem::Agv.make_kind(&mut counters);
        assert_ne!(a, b);
    }

    #[test]
    fn test_palette_kind_layers() {
        use crate::warehouse::Layer;

        let mut counters = ObjectCounters::default();
        assert_eq!(
            PaletteItem::Shelf.make_kind(&mut counters).layer(),
            Layer::Shelf
        );
        assert_eq!(
            PaletteItem::Agv.make_kind(&mut counters).layer(),
            Layer::Agv
        );
        assert_eq!(
            PaletteItem::AgvStation.make_kind(&mut counters).layer(),
            Layer::AgvStation
        );
    }
}

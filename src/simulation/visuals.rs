//! Status tints and cargo indicators for AGV sprites.

use bevy::prelude::*;

use crate::theme;
use crate::warehouse::{AgvUnit, CargoIndicator};

/// Tint each AGV sprite to match its operating status.
pub fn apply_status_tints(mut agvs: Query<(&AgvUnit, &mut Sprite), Changed<AgvUnit>>) {
    for (agv, mut sprite) in agvs.iter_mut() {
        sprite.color = theme::agv_status_color(agv.status);
    }
}

/// Keep the cargo indicator child in step with the `has_cargo` flag: spawn
/// one when cargo is picked up, despawn it when dropped.
pub fn sync_cargo_indicators(
    mut commands: Commands,
    agvs: Query<(Entity, &AgvUnit)>,
    indicators: Query<(Entity, &ChildOf), With<CargoIndicator>>,
) {
    for (entity, agv) in agvs.iter() {
        let indicator = indicators
            .iter()
            .find(|(_, child_of)| child_of.parent() == entity)
            .map(|(indicator, _)| indicator);

        match (agv.has_cargo, indicator) {
            (true, None) => {
                commands.entity(entity).with_children(|parent| {
                    parent.spawn((
                        Sprite::from_color(theme::CARGO_COLOR, Vec2::splat(0.3)),
                        Transform::from_xyz(0.0, 0.0, 1.0),
                        CargoIndicator,
                    ));
                });
            }
            (false, Some(indicator)) => {
                commands.entity(indicator).despawn();
            }
            _ => {}
        }
    }
}

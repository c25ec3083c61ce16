use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::MAX_RECENT_LAYOUTS;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_sim_speed() -> f32 {
    1.0
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Recently opened layout files for quick access
    #[serde(default)]
    pub recent_layouts: Vec<PathBuf>,

    /// Last opened layout file path (not auto-loaded, just remembered)
    #[serde(default)]
    pub last_layout_path: Option<PathBuf>,

    /// Speed multiplier preselected when entering simulation mode
    #[serde(default = "default_sim_speed")]
    pub default_sim_speed: f32,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            recent_layouts: Vec::new(),
            last_layout_path: None,
            default_sim_speed: default_sim_speed(),
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to add a layout to the recent list
#[derive(Message)]
pub struct AddRecentLayoutRequest {
    pub path: PathBuf,
}

/// Message to update the last layout path in config
#[derive(Message)]
pub struct UpdateLastLayoutPathRequest {
    pub path: PathBuf,
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = crate::paths::config_file();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(mut config: ResMut<AppConfig>, mut status: ResMut<crate::ui::StatusMessage>) {
    let result = load_config();
    config.data = result.config.data;
    config.config_path = result.config.config_path;
    config.dirty = result.config.dirty;

    if let Some(reason) = result.reset_reason {
        status.error(format!("Settings were reset to defaults: {}", reason));
    }
}

/// System to save config when requested
fn save_config_system(mut events: MessageReader<SaveConfigRequest>, mut config: ResMut<AppConfig>) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to add a layout to the recent list
fn add_recent_layout_system(
    mut events: MessageReader<AddRecentLayoutRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        // Remove if already in list (to move it to front)
        config.data.recent_layouts.retain(|p| p != &event.path);
        config.data.recent_layouts.insert(0, event.path.clone());
        config.data.recent_layouts.truncate(MAX_RECENT_LAYOUTS);

        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update last layout path
fn update_last_layout_path_system(
    mut events: MessageReader<UpdateLastLayoutPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_layout_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_message::<SaveConfigRequest>()
            .add_message::<AddRecentLayoutRequest>()
            .add_message::<UpdateLastLayoutPathRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                    add_recent_layout_system.run_if(on_message::<AddRecentLayoutRequest>),
                    update_last_layout_path_system
                        .run_if(on_message::<UpdateLastLayoutPathRequest>),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.recent_layouts.is_empty());
        assert!(data.last_layout_path.is_none());
        assert_eq!(data.default_sim_speed, 1.0);
    }

    #[test]
    fn test_app_config_data_round_trip() {
        let data = AppConfigData {
            recent_layouts: vec![PathBuf::from("/tmp/a.json"), PathBuf::from("/tmp/b.json")],
            last_layout_path: Some(PathBuf::from("/tmp/a.json")),
            default_sim_speed: 2.0,
        };
        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.recent_layouts.len(), 2);
        assert_eq!(parsed.default_sim_speed, 2.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: AppConfigData = serde_json::from_str("{}").unwrap();
        assert!(parsed.recent_layouts.is_empty());
        assert_eq!(parsed.default_sim_speed, 1.0);
    }
}

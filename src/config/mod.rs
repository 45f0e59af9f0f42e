// ClipGlow - Module config
// Lecture/ecriture des preferences utilisateur
//
// Les preferences sont stockees en JSON dans
// %APPDATA%\ClipGlow\config.json (serde + serde_json). Le repertoire
// est resolu par `dirs::config_dir()`.
//
// # Utilisation
// ```ignore
// let mut store = SettingsStore::load(&default_config_path());
// store.update(|s| s.icon_size = 40)?;
// ```

/// Structure de configuration, valeurs par defaut et persistance.
pub mod settings;

pub use settings::{app_data_dir, default_config_path, Settings, SettingsStore};

// ClipGlow - Structure de configuration et persistance JSON
//
// Ce module definit `Settings` (les preferences utilisateur) et
// `SettingsStore` qui les charge depuis et les ecrit dans
// %APPDATA%\ClipGlow\config.json.
//
// # Chargement
// `SettingsStore::load(path)` lit le fichier JSON. Un fichier absent
// donne les valeurs par defaut ; un fichier corrompu est loggue en
// erreur et remplace par les valeurs par defaut. Les champs manquants
// conservent leur defaut. `icon_size` est clampe dans [16, 64].
//
// # Compatibilite
// Les cles sont ecrites en camelCase. Les cles PascalCase ecrites par
// les anciennes versions sont acceptees en lecture.
//
// # Ecriture
// Chaque mutation passe par `SettingsStore::update` qui clampe puis
// sauvegarde immediatement (ecriture atomique : fichier temporaire + rename).

use crate::constants::{APP_DIR_NAME, CONFIG_FILENAME, DEFAULT_ICON_SIZE, ICON_SIZE_MAX, ICON_SIZE_MIN};
use crate::error::GlowResult;
use crate::icon::IconStyle;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Preferences utilisateur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(alias = "IconStyle")]
    pub icon_style: IconStyle,
    #[serde(alias = "IconSize", deserialize_with = "de_icon_size")]
    pub icon_size: u32,
    /// Icone personnalisee (prioritaire sur le style si chargeable)
    #[serde(alias = "CustomIconPath", deserialize_with = "de_optional_path")]
    pub custom_icon_path: Option<PathBuf>,
    #[serde(alias = "EnableTrayFlash")]
    pub enable_tray_flash: bool,
    #[serde(alias = "EnableIconFeedback")]
    pub enable_icon_feedback: bool,
    #[serde(alias = "EnableAutoStart")]
    pub enable_auto_start: bool,
    #[serde(alias = "EnableAutoUpdate")]
    pub enable_auto_update: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            icon_style: IconStyle::CatPaw,
            icon_size: DEFAULT_ICON_SIZE,
            custom_icon_path: None,
            enable_tray_flash: true,
            enable_icon_feedback: true,
            enable_auto_start: true,
            enable_auto_update: true,
        }
    }
}

impl Settings {
    /// Ramene les valeurs hors bornes dans leur plage.
    pub fn clamp(&mut self) {
        self.icon_size = clamp_icon_size(self.icon_size as i64);
    }
}

/// Clampe une taille d'icone dans [ICON_SIZE_MIN, ICON_SIZE_MAX].
pub fn clamp_icon_size(size: i64) -> u32 {
    size.clamp(ICON_SIZE_MIN as i64, ICON_SIZE_MAX as i64) as u32
}

fn de_icon_size<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(match value.as_i64() {
        Some(n) => clamp_icon_size(n),
        None => DEFAULT_ICON_SIZE,
    })
}

fn de_optional_path<'de, D: Deserializer<'de>>(d: D) -> Result<Option<PathBuf>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

/// Repertoire de donnees de l'application (%APPDATA%\ClipGlow).
pub fn app_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

/// Chemin par defaut du fichier de configuration.
pub fn default_config_path() -> PathBuf {
    app_data_dir().join(CONFIG_FILENAME)
}

/// Preferences + emplacement du fichier associe.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Charge les preferences depuis `path`. Ne retourne jamais d'erreur :
    /// toute anomalie donne les valeurs par defaut.
    pub fn load(path: &Path) -> Self {
        let settings = match read_settings(path) {
            Ok(Some(s)) => {
                debug!("settings loaded from {}", path.display());
                s
            }
            Ok(None) => {
                info!("no settings file at {}, using defaults", path.display());
                Settings::default()
            }
            Err(e) => {
                error!("failed to load settings, using defaults: {}", e);
                Settings::default()
            }
        };
        Self {
            path: path.to_path_buf(),
            settings,
        }
    }

    /// Store en memoire (non encore ecrit).
    pub fn with_settings(path: &Path, mut settings: Settings) -> Self {
        settings.clamp();
        Self {
            path: path.to_path_buf(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ecrit les preferences (JSON indente).
    pub fn save(&self) -> GlowResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("settings saved to {}", self.path.display());
        Ok(())
    }

    /// Applique `f`, clampe, puis sauvegarde. La modification en memoire
    /// est conservee meme si l'ecriture echoue.
    pub fn update<F: FnOnce(&mut Settings)>(&mut self, f: F) -> GlowResult<()> {
        f(&mut self.settings);
        self.settings.clamp();
        self.save()
    }
}

fn read_settings(path: &Path) -> GlowResult<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let mut settings: Settings = serde_json::from_str(&text)?;
    settings.clamp();
    Ok(Some(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert_eq!(s.icon_style, IconStyle::CatPaw);
        assert_eq!(s.icon_size, 32);
        assert!(s.custom_icon_path.is_none());
        assert!(s.enable_tray_flash && s.enable_icon_feedback);
        assert!(s.enable_auto_start && s.enable_auto_update);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let settings = Settings {
            icon_style: IconStyle::PixelSlime,
            icon_size: 48,
            custom_icon_path: Some(PathBuf::from("C:\\icons\\cat.png")),
            enable_tray_flash: false,
            enable_icon_feedback: true,
            enable_auto_start: false,
            enable_auto_update: false,
        };
        SettingsStore::with_settings(&path, settings.clone()).save().unwrap();
        let loaded = SettingsStore::load(&path);
        assert_eq!(loaded.settings(), &settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(&dir.path().join("absent.json"));
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(SettingsStore::load(&path).settings(), &Settings::default());
    }

    #[test]
    fn test_icon_size_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"iconSize": 500}"#).unwrap();
        assert_eq!(SettingsStore::load(&path).settings().icon_size, 64);
        fs::write(&path, r#"{"iconSize": -3}"#).unwrap();
        assert_eq!(SettingsStore::load(&path).settings().icon_size, 16);
    }

    #[test]
    fn test_pascal_case_keys_accepted() {
        let json = r#"{
            "IconStyle": 7,
            "IconSize": 40,
            "CustomIconPath": null,
            "EnableTrayFlash": false,
            "EnableIconFeedback": true,
            "EnableAutoStart": false,
            "EnableAutoUpdate": true
        }"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.icon_style, IconStyle::Moon);
        assert_eq!(s.icon_size, 40);
        assert!(!s.enable_tray_flash);
        assert!(!s.enable_auto_start);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{"enableTrayFlash": false}"#).unwrap();
        assert!(!s.enable_tray_flash);
        assert_eq!(s.icon_size, 32);
        assert!(s.enable_auto_update);
    }

    #[test]
    fn test_blank_custom_path_is_none() {
        let s: Settings = serde_json::from_str(r#"{"customIconPath": "  "}"#).unwrap();
        assert!(s.custom_icon_path.is_none());
    }

    #[test]
    fn test_written_keys_are_camel_case() {
        let json = serde_json::to_string_pretty(&Settings::default()).unwrap();
        assert!(json.contains("\"iconStyle\": 0"));
        assert!(json.contains("\"enableAutoUpdate\": true"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_update_clamps_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut store = SettingsStore::load(&path);
        store.update(|s| s.icon_size = 1000).unwrap();
        assert_eq!(store.settings().icon_size, 64);
        assert_eq!(SettingsStore::load(&path).settings().icon_size, 64);
    }
}

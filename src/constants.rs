// ClipGlow - Constantes globales
//
// Ce module centralise toutes les constantes de l'application :
// - Noms de fichiers et repertoires
// - Seuils de l'heuristique souris (pre-copie, glisser)
// - Cadence et duree de l'animation de retour visuel
// - Clignotement de l'icone de notification
// - Identifiants systeme (timers, messages Windows, mutex)
// - Point d'acces GitHub pour la verification de mise a jour
//
// Les constantes sont utilisees par les modules input, feedback, tray,
// update et system pour garantir la coherence des valeurs.

/// Nom affiche de l'application
pub const APP_NAME: &str = "ClipGlow";

/// Version courante (lue depuis Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nom du dossier application dans %APPDATA%
pub const APP_DIR_NAME: &str = "ClipGlow";

/// Nom du fichier de configuration
pub const CONFIG_FILENAME: &str = "config.json";

/// Nom du fichier de log
pub const LOG_FILENAME: &str = "clipglow.log";

/// Taille max du fichier de log avant troncature (1 Mo)
pub const LOG_MAX_BYTES: u64 = 1_048_576;

/// Variable d'environnement pour le filtre de log
pub const LOG_ENV_VAR: &str = "CLIPGLOW_LOG";

/// Delai apres relachement pendant lequel un glisser compte comme pre-copie (ms)
pub const PRE_COPY_THRESHOLD_MS: u64 = 80;

/// Deplacement minimal pour qualifier un geste de glisser (pixels)
pub const DRAG_DISTANCE_THRESHOLD: i32 = 10;

/// Nombre de frames de la phase d'apparition
pub const FADE_IN_FRAMES: u32 = 8;

/// Nombre de frames de la phase de maintien
pub const STAY_FRAMES: u32 = 30;

/// Nombre de frames de la phase de disparition
pub const FADE_OUT_FRAMES: u32 = 12;

/// Periode du timer d'animation (~60 Hz)
pub const ANIMATION_INTERVAL_MS: u32 = 16;

/// Decalage de l'overlay par rapport au curseur (pixels)
pub const FEEDBACK_CURSOR_OFFSET: i32 = 15;

/// Marge autour de l'icone dans l'overlay (pixels)
pub const FEEDBACK_MARGIN: u32 = 10;

/// Nombre de demi-periodes de clignotement
pub const FLASH_TICKS: u32 = 6;

/// Periode du timer de clignotement (ms)
pub const FLASH_INTERVAL_MS: u32 = 150;

/// Taille de l'icone de notification generee (pixels)
pub const TRAY_GLYPH_SIZE: u32 = 32;

/// Couleur normale de l'icone de notification (RGB)
pub const TRAY_NORMAL_COLOR: [u8; 3] = [100, 180, 255];

/// Couleur de clignotement de l'icone de notification (RGB)
pub const TRAY_ACCENT_COLOR: [u8; 3] = [255, 200, 100];

/// Tailles d'icone proposees dans le menu
pub const ICON_SIZE_CHOICES: [u32; 6] = [20, 24, 28, 32, 40, 48];

/// Taille d'icone minimale acceptee
pub const ICON_SIZE_MIN: u32 = 16;

/// Taille d'icone maximale acceptee
pub const ICON_SIZE_MAX: u32 = 64;

/// Taille d'icone par defaut
pub const DEFAULT_ICON_SIZE: u32 = 32;

/// Extensions acceptees pour une icone personnalisee
pub const CUSTOM_ICON_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "ico"];

/// URL de l'API GitHub pour la derniere release
pub const UPDATE_API_URL: &str = "https://api.github.com/repos/KFC444/ClipGlow/releases/latest";

/// Page web de la derniere release (fallback d'ouverture)
pub const RELEASES_PAGE_URL: &str = "https://github.com/KFC444/ClipGlow/releases/latest";

/// En-tete Accept de l'API GitHub
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Delai avant la premiere verification automatique (s)
pub const UPDATE_INITIAL_DELAY_SECS: u64 = 30;

/// Intervalle entre deux verifications automatiques (s)
pub const UPDATE_INTERVAL_SECS: u64 = 6 * 60 * 60;

/// Timeout des requetes HTTP (s)
pub const UPDATE_HTTP_TIMEOUT_SECS: u64 = 15;

/// Longueur max des notes de version affichees (caracteres)
pub const RELEASE_NOTES_MAX_CHARS: usize = 300;

/// Nom du mutex d'instance unique
pub const SINGLE_INSTANCE_MUTEX: &str = "ClipGlow_SingleInstance";

/// Nom de la valeur registre pour le demarrage automatique
pub const AUTOSTART_VALUE_NAME: &str = "ClipGlow";

/// ID de l'icone de notification
pub const TRAY_ICON_ID: u32 = 1;

/// Message custom pour l'icone tray (WM_APP + 1)
pub const WM_TRAY_CALLBACK: u32 = 0x8000 + 1;

/// Message custom : evenements souris en attente (WM_APP + 2)
pub const WM_APP_INPUT: u32 = 0x8000 + 2;

/// Message custom : resultat de verification de mise a jour (WM_APP + 3)
pub const WM_APP_UPDATE: u32 = 0x8000 + 3;

/// Timer ID de l'animation de retour visuel
pub const TIMER_ANIMATION: usize = 1;

/// Timer ID du clignotement de l'icone tray
pub const TIMER_FLASH: usize = 2;

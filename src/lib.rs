// ClipGlow - Arbre de modules (crate library)
//
// Point d'entree de la crate library. Le binaire et les tests
// d'integration passent par ici ; la partie portable (moteur,
// animation, preferences, mises a jour) compile sur toute plateforme,
// la couche Win32 uniquement sous Windows.
//
// # Modules
// - `app`       : orchestrateur, boucle de messages Win32 (Windows)
// - `clipboard` : detection des copies et filtrage des pre-copies
// - `config`    : preferences JSON
// - `constants` : constantes globales (delais, tailles, identifiants)
// - `engine`    : moteur d'evenements independant de la plateforme
// - `error`     : types d'erreur centralises (GlowError, GlowResult)
// - `feedback`  : animation au curseur et icone en cache
// - `icon`      : generation des icones pixel art
// - `input`     : suivi de la souris et classification des gestes
// - `logging`   : initialisation de tracing
// - `system`    : autostart, instance unique, hook, tray (Windows)
// - `tray`      : menu contextuel et clignotement de l'icone
// - `ui`        : fenetres, overlay, boites de dialogue (Windows)
// - `update`    : verification des releases GitHub

/// Orchestrateur principal de l'application.
#[cfg(windows)]
pub mod app;
/// Detection des copies.
pub mod clipboard;
/// Preferences utilisateur.
pub mod config;
/// Constantes globales de l'application.
pub mod constants;
/// Moteur d'evenements.
pub mod engine;
/// Types d'erreur centralises.
pub mod error;
/// Retour visuel au curseur.
pub mod feedback;
/// Icones generees.
pub mod icon;
/// Suivi de la souris.
pub mod input;
/// Initialisation du log.
pub mod logging;
/// Composants systeme.
pub mod system;
/// Menu et clignotement du tray.
pub mod tray;
/// Interface Win32.
#[cfg(windows)]
pub mod ui;
/// Mises a jour.
pub mod update;

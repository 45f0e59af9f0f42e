// ClipGlow - Module system
// Composants systeme specifiques a Windows
//
// Chaque sous-module isole ses appels Win32 (crate `windows`) dans des
// blocs unsafe locaux et expose une API safe en Rust.
//
// # Sous-modules
// - `win32`     : helpers communs (UTF-16, erreurs, DIB 32 bits)
// - `hook`      : hook souris bas niveau vers la file d'evenements
// - `tray`      : icone de notification et menu contextuel
// - `autostart` : cle registre HKCU\Run pour le demarrage automatique
// - `instance`  : mutex d'instance unique
//
// # Portabilite
// Seule la comparaison de chemins de `autostart` est compilee hors
// Windows (tests).

pub mod autostart;
#[cfg(windows)]
pub mod hook;
#[cfg(windows)]
pub mod instance;
#[cfg(windows)]
pub mod tray;
#[cfg(windows)]
pub mod win32;

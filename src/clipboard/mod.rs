// ClipGlow - Module clipboard
// Detection des copies dans le presse-papiers Windows
//
// - `watcher` : politique de traitement d'un changement (pre-copie,
//   lecture, texte vide), independante de la plateforme.
// - `monitor` : ecouteur Win32 (AddClipboardFormatListener) et lecture
//   du texte par clipboard-win.

/// Surveillance des changements du presse-papiers via Win32 API.
#[cfg(windows)]
pub mod monitor;
/// Filtrage des notifications de changement.
pub mod watcher;

pub use watcher::{ClipboardEvent, ClipboardSource, ClipboardWatcher, Rejection};

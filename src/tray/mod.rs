// ClipGlow - Module tray
// Logique de l'icone de notification, independante de Win32
//
// - `flash` : sequence de clignotement apres une copie
// - `menu`  : commandes et arbre du menu contextuel
//
// L'affichage effectif (Shell_NotifyIconW, TrackPopupMenu) est dans
// `system::tray`.

pub mod flash;
pub mod menu;

pub use flash::{FlashStep, TrayFlasher, TrayIconKind};
pub use menu::{apply_custom_icon, build_menu, Followup, MenuCommand, MenuItem};

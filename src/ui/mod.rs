// ClipGlow - Module ui
// Fenetres et dialogues Win32
//
// - `window`  : classes de fenetres, fenetre cachee, timers, curseur
// - `overlay` : fenetre layered de l'animation de copie
// - `dialogs` : boites de message, selecteur de fichier, navigateur
//
// # Portabilite
// Ce module est specifique a Windows.

pub mod dialogs;
pub mod overlay;
pub mod window;

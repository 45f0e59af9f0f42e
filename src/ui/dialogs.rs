// ClipGlow - Boites de dialogue et navigateur
//
// Messages (information, avertissement, erreur, question oui/non) et
// selecteur de fichier via rfd ; ouverture d'URL via opener. Tous les
// appels sont modaux et faits depuis le thread UI.
//
// # Portabilite
// Ce module est specifique a Windows.

use crate::constants::{APP_NAME, APP_VERSION, CUSTOM_ICON_EXTENSIONS};
use crate::error::{GlowError, GlowResult};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;

fn message(level: MessageLevel, title: &str, text: &str, buttons: MessageButtons) -> MessageDialogResult {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(text)
        .set_buttons(buttons)
        .show()
}

pub fn info(title: &str, text: &str) {
    message(MessageLevel::Info, title, text, MessageButtons::Ok);
}

pub fn warning(title: &str, text: &str) {
    message(MessageLevel::Warning, title, text, MessageButtons::Ok);
}

pub fn error(title: &str, text: &str) {
    message(MessageLevel::Error, title, text, MessageButtons::Ok);
}

/// Question oui/non ; true si l'utilisateur repond oui.
pub fn confirm(title: &str, text: &str) -> bool {
    matches!(
        message(MessageLevel::Info, title, text, MessageButtons::YesNo),
        MessageDialogResult::Yes
    )
}

/// Selecteur d'image pour l'icone personnalisee.
pub fn pick_image() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Choose an icon image")
        .add_filter("Images", &CUSTOM_ICON_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file()
}

/// Ouvre une URL dans le navigateur par defaut.
pub fn open_url(url: &str) -> GlowResult<()> {
    opener::open(url).map_err(|e| GlowError::Update(format!("cannot open {}: {}", url, e)))
}

/// Texte de la boite "A propos".
pub fn about_text() -> String {
    format!(
        "{} - Copy feedback\n\nVersion: {}\n\nFeatures:\n\
         - 14 built-in icon styles\n\
         - 4 cute pixel-art icons\n\
         - Custom icon support\n\
         - Adjustable icon size\n\
         - Tray flash notification\n\
         - Automatic update check",
        APP_NAME, APP_VERSION
    )
}

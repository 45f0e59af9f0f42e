// ClipGlow - Surveillance du presse-papiers
// Utilise AddClipboardFormatListener pour detecter les changements.
//
// La fenetre cachee recoit WM_CLIPBOARDUPDATE a chaque modification du
// presse-papiers par une application quelconque. `SystemClipboard`
// implemente `ClipboardSource` avec clipboard-win : une seule tentative
// d'ouverture, un presse-papiers verrouille par un autre processus est
// signale comme erreur (ignoree par le watcher).
//
// # Portabilite
// Ce module est specifique a Windows (Win32 API).

use crate::clipboard::watcher::ClipboardSource;
use crate::error::{GlowError, GlowResult};
use crate::system::win32::last_error;
use clipboard_win::{formats, Clipboard};
use windows::Win32::Foundation::HWND;
use windows::Win32::System::DataExchange::{AddClipboardFormatListener, RemoveClipboardFormatListener};

/// Enregistre la fenetre comme ecouteur du presse-papiers.
///
/// # Errors
/// Retourne `GlowError::Clipboard` si l'enregistrement echoue.
pub fn register_listener(hwnd: HWND) -> GlowResult<()> {
    // SAFETY: appel FFI Win32. hwnd doit etre un handle de fenetre valide.
    unsafe { AddClipboardFormatListener(hwnd) }.map_err(|e| {
        GlowError::Clipboard(format!("AddClipboardFormatListener failed: {} (code={})", e.message(), last_error()))
    })
}

/// Desenregistre l'ecouteur du presse-papiers.
pub fn unregister_listener(hwnd: HWND) {
    // SAFETY: appel FFI Win32.
    unsafe {
        let _ = RemoveClipboardFormatListener(hwnd);
    }
}

/// Presse-papiers Windows.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> GlowResult<Option<String>> {
        let _clip = Clipboard::new()
            .map_err(|e| GlowError::Clipboard(format!("OpenClipboard failed: {}", e)))?;
        if !clipboard_win::is_format_avail(formats::CF_UNICODETEXT) {
            return Ok(None);
        }
        clipboard_win::get::<String, _>(formats::Unicode)
            .map(Some)
            .map_err(|e| GlowError::Clipboard(format!("clipboard read failed: {}", e)))
    }
}

// ClipGlow - Creation et gestion des fenetres Win32
// Fenetre cachee pour la boucle de messages + utilitaires
//
// Ce module fournit :
// - l'enregistrement des classes de fenetres (RegisterClassW)
// - la fenetre cachee qui recoit les messages du tray, du presse-papiers,
//   des timers et du hook souris
// - le pointeur utilisateur GWLP_USERDATA vers l'application
// - la position du curseur et les timers
//
// # Safety
// Tous les appels Win32 sont isoles dans des blocs unsafe locaux.
// Les fonctions publiques retournent des GlowResult pour signaler les erreurs.
//
// # Portabilite
// Ce module est specifique a Windows (Win32 API).

use crate::error::GlowResult;
use crate::input::Point;
use crate::system::win32::win32_error;
use tracing::warn;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, GetCursorPos, GetWindowLongPtrW, KillTimer, RegisterClassW,
    SetTimer, SetWindowLongPtrW, GWLP_USERDATA, WINDOW_EX_STYLE, WINDOW_STYLE, WNDCLASSW,
};

/// Classe de la fenetre principale cachee.
pub const MAIN_CLASS: PCWSTR = w!("ClipGlowMain");

/// Classe de la fenetre d'animation.
pub const OVERLAY_CLASS: PCWSTR = w!("ClipGlowOverlay");

/// Procedure de fenetre.
pub type WndProc = unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT;

/// Enregistre une classe de fenetre Win32.
pub fn register_class(class_name: PCWSTR, wndproc: WndProc) -> GlowResult<()> {
    // SAFETY: appels FFI Win32 ; la structure est entierement initialisee.
    unsafe {
        let hinstance = GetModuleHandleW(PCWSTR::null())
            .map_err(|e| win32_error("GetModuleHandleW", &e))?;
        let wc = WNDCLASSW {
            lpfnWndProc: Some(wndproc),
            hInstance: hinstance.into(),
            lpszClassName: class_name,
            ..Default::default()
        };
        if RegisterClassW(&wc) == 0 {
            return Err(win32_error("RegisterClassW", &windows::core::Error::from_win32()));
        }
    }
    Ok(())
}

/// Cree une fenetre de la classe `class_name` avec les styles donnes.
pub fn create_window(
    class_name: PCWSTR,
    ex_style: WINDOW_EX_STYLE,
    style: WINDOW_STYLE,
) -> GlowResult<HWND> {
    // SAFETY: appels FFI Win32, classe enregistree au prealable.
    unsafe {
        let hinstance = GetModuleHandleW(PCWSTR::null())
            .map_err(|e| win32_error("GetModuleHandleW", &e))?;
        CreateWindowExW(
            ex_style,
            class_name,
            w!("ClipGlow"),
            style,
            0,
            0,
            0,
            0,
            None,
            None,
            hinstance,
            None,
        )
        .map_err(|e| win32_error("CreateWindowExW", &e))
    }
}

/// Cree la fenetre cachee (aucun style visible).
pub fn create_hidden_window() -> GlowResult<HWND> {
    create_window(MAIN_CLASS, WINDOW_EX_STYLE::default(), WINDOW_STYLE::default())
}

/// Detruit une fenetre.
pub fn destroy(hwnd: HWND) {
    // SAFETY: appel FFI Win32.
    if let Err(e) = unsafe { DestroyWindow(hwnd) } {
        warn!("DestroyWindow failed: {}", e);
    }
}

/// Stocke un pointeur dans GWLP_USERDATA.
///
/// # Safety
/// `ptr` doit rester valide tant que la fenetre peut recevoir des messages.
pub unsafe fn set_user_data<T>(hwnd: HWND, ptr: *mut T) {
    SetWindowLongPtrW(hwnd, GWLP_USERDATA, ptr as isize);
}

/// Lit le pointeur stocke dans GWLP_USERDATA (nul si absent).
///
/// # Safety
/// Le type `T` doit correspondre a celui passe a `set_user_data`.
pub unsafe fn get_user_data<T>(hwnd: HWND) -> *mut T {
    GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut T
}

/// Position courante du curseur (origine si indisponible).
pub fn cursor_pos() -> Point {
    let mut pt = POINT::default();
    // SAFETY: appel FFI Win32 avec une structure locale.
    match unsafe { GetCursorPos(&mut pt) } {
        Ok(()) => Point::new(pt.x, pt.y),
        Err(_) => Point::default(),
    }
}

/// Demarre (ou redemarre) le timer `id`.
pub fn start_timer(hwnd: HWND, id: usize, interval_ms: u32) {
    // SAFETY: appel FFI Win32, pas de callback (WM_TIMER).
    if unsafe { SetTimer(hwnd, id, interval_ms, None) } == 0 {
        warn!("SetTimer({}) failed", id);
    }
}

/// Arrete le timer `id`.
pub fn stop_timer(hwnd: HWND, id: usize) {
    // SAFETY: appel FFI Win32 ; un timer deja arrete n'est pas une erreur.
    unsafe {
        let _ = KillTimer(hwnd, id);
    }
}

// ClipGlow - Hook souris bas niveau
//
// WH_MOUSE_LL installe sur le thread UI : Windows appelle `mouse_proc`
// depuis la boucle de messages de ce thread. Le callback ne fait que
// traduire le message en `AppEvent` et l'empiler ; le thread UI est
// reveille par WM_APP_INPUT quand la file etait vide. Les deplacements
// ne sont transmis que pendant un appui du bouton gauche.
//
// # Safety
// Le hook est retire au drop de `MouseHook`. `lparam` pointe sur un
// MSLLHOOKSTRUCT valide pendant l'appel quand `code == HC_ACTION`.
//
// # Portabilite
// Ce module est specifique a Windows.

use crate::constants::WM_APP_INPUT;
use crate::engine::{enqueue, AppEvent};
use crate::error::GlowResult;
use crate::input::Point;
use crate::system::win32::win32_error;
use std::cell::Cell;
use std::time::Instant;
use tracing::{debug, warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, PostMessageW, SetWindowsHookExW, UnhookWindowsHookEx, HC_ACTION, HHOOK,
    MSLLHOOKSTRUCT, WH_MOUSE_LL, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE,
};

thread_local! {
    /// Fenetre a reveiller (HWND brut).
    static TARGET: Cell<isize> = const { Cell::new(0) };
    /// Bouton gauche enfonce, pour filtrer les deplacements.
    static LEFT_DOWN: Cell<bool> = const { Cell::new(false) };
}

/// Hook installe ; retire au drop.
pub struct MouseHook {
    hook: HHOOK,
}

impl MouseHook {
    /// Installe le hook et reveille `hwnd` a chaque nouvel evenement.
    pub fn install(hwnd: HWND) -> GlowResult<Self> {
        TARGET.with(|t| t.set(hwnd.0 as isize));
        // SAFETY: le callback est une fonction 'static ; hmod nul et
        // thread 0 sont requis pour un hook bas niveau.
        let hook = unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_proc), None, 0) }
            .map_err(|e| win32_error("SetWindowsHookExW", &e))?;
        debug!("mouse hook installed");
        Ok(Self { hook })
    }
}

impl Drop for MouseHook {
    fn drop(&mut self) {
        // SAFETY: handle obtenu par SetWindowsHookExW, retire une seule fois.
        if let Err(e) = unsafe { UnhookWindowsHookEx(self.hook) } {
            warn!("UnhookWindowsHookEx failed: {}", e);
        }
        TARGET.with(|t| t.set(0));
    }
}

/// Traduit un message souris en evenement applicatif.
fn translate(msg: u32, pt: Point) -> Option<AppEvent> {
    match msg {
        WM_LBUTTONDOWN => {
            LEFT_DOWN.with(|d| d.set(true));
            Some(AppEvent::ButtonDown { pos: pt })
        }
        WM_LBUTTONUP => {
            LEFT_DOWN.with(|d| d.set(false));
            Some(AppEvent::ButtonUp {
                pos: pt,
                at: Instant::now(),
            })
        }
        WM_MOUSEMOVE if LEFT_DOWN.with(|d| d.get()) => Some(AppEvent::Move { pos: pt }),
        _ => None,
    }
}

unsafe extern "system" fn mouse_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        let info = &*(lparam.0 as *const MSLLHOOKSTRUCT);
        if let Some(event) = translate(wparam.0 as u32, Point::new(info.pt.x, info.pt.y)) {
            if enqueue(event) {
                let target = TARGET.with(|t| t.get());
                if target != 0 {
                    let hwnd = HWND(target as *mut std::ffi::c_void);
                    let _ = PostMessageW(hwnd, WM_APP_INPUT, WPARAM(0), LPARAM(0));
                }
            }
        }
    }
    CallNextHookEx(None, code, wparam, lparam)
}

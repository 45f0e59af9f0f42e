// ClipGlow - Fenetre d'animation pres du curseur
//
// Fenetre popup layered, toujours au premier plan, absente de la barre
// des taches, qui ne prend jamais le focus ni les clics
// (WS_EX_TRANSPARENT | WS_EX_NOACTIVATE). Chaque frame est une image
// RGBA presentee par UpdateLayeredWindow avec alpha par pixel.
//
// # Safety
// Les DC et DIB temporaires d'une frame sont liberes avant le retour de
// `present`. La fenetre est detruite au drop.
//
// # Portabilite
// Ce module est specifique a Windows (GDI, UpdateLayeredWindow).

use crate::error::GlowResult;
use crate::icon;
use crate::input::Point;
use crate::system::win32::{create_dib, win32_error};
use crate::ui::window::{self, OVERLAY_CLASS};
use image::RgbaImage;
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject, AC_SRC_ALPHA,
    AC_SRC_OVER, BLENDFUNCTION, HGDIOBJ,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, ShowWindow, UpdateLayeredWindow, SW_HIDE, SW_SHOWNOACTIVATE, ULW_ALPHA, WS_EX_LAYERED,
    WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};

/// La fenetre ne traite aucun message.
unsafe extern "system" fn overlay_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    DefWindowProcW(hwnd, msg, wparam, lparam)
}

/// Enregistre la classe OVERLAY_CLASS.
pub fn register_class() -> GlowResult<()> {
    window::register_class(OVERLAY_CLASS, overlay_proc)
}

/// Fenetre d'animation.
pub struct Overlay {
    hwnd: HWND,
    origin: Point,
    visible: bool,
}

impl Overlay {
    /// Cree la fenetre (cachee). La classe OVERLAY_CLASS doit etre enregistree.
    pub fn create() -> GlowResult<Self> {
        let hwnd = window::create_window(
            OVERLAY_CLASS,
            WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE | WS_EX_TRANSPARENT,
            WS_POPUP,
        )?;
        Ok(Self {
            hwnd,
            origin: Point::default(),
            visible: false,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Place la fenetre en `origin` et l'affiche sans l'activer.
    pub fn show_at(&mut self, origin: Point) {
        self.origin = origin;
        // SAFETY: appel FFI Win32.
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
        self.visible = true;
    }

    /// Presente une frame (alpha par pixel).
    pub fn present(&self, frame: &RgbaImage) -> GlowResult<()> {
        let bgra = icon::to_bgra(frame, true);
        let size = SIZE {
            cx: frame.width() as i32,
            cy: frame.height() as i32,
        };
        let dst = POINT {
            x: self.origin.x,
            y: self.origin.y,
        };
        let src = POINT::default();
        let blend = BLENDFUNCTION {
            BlendOp: AC_SRC_OVER as u8,
            BlendFlags: 0,
            SourceConstantAlpha: 255,
            AlphaFormat: AC_SRC_ALPHA as u8,
        };

        // SAFETY: DC et DIB crees et liberes dans ce bloc ; l'ancien objet
        // selectionne est restaure avant DeleteDC.
        unsafe {
            let screen = GetDC(HWND::default());
            let mem_dc = CreateCompatibleDC(screen);
            let result = create_dib(mem_dc, frame, &bgra).and_then(|dib| {
                let old = SelectObject(mem_dc, HGDIOBJ(dib.0));
                let res = UpdateLayeredWindow(
                    self.hwnd,
                    screen,
                    Some(&dst as *const POINT),
                    Some(&size as *const SIZE),
                    mem_dc,
                    Some(&src as *const POINT),
                    COLORREF(0),
                    Some(&blend as *const BLENDFUNCTION),
                    ULW_ALPHA,
                )
                .map_err(|e| win32_error("UpdateLayeredWindow", &e));
                SelectObject(mem_dc, old);
                let _ = DeleteObject(HGDIOBJ(dib.0));
                res
            });
            let _ = DeleteDC(mem_dc);
            ReleaseDC(HWND::default(), screen);
            result
        }
    }

    /// Cache la fenetre.
    pub fn hide(&mut self) {
        // SAFETY: appel FFI Win32.
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
        self.visible = false;
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        window::destroy(self.hwnd);
    }
}

// ClipGlow - Icone de notification systeme (tray icon)
// Gestion de la zone de notification Windows
//
// Ce module affiche l'icone de ClipGlow dans la zone de notification :
// ajout, changement de variante (normale / accent pendant le
// clignotement), retrait et affichage du menu contextuel decrit par
// `tray::menu`.
//
// Les deux variantes sont generees au demarrage (`icon::tray_glyph`) et
// converties en HICON par CreateIconIndirect.
//
// # Safety
// Tous les appels Win32 (Shell_NotifyIconW, CreatePopupMenu, etc.)
// sont isoles dans des blocs unsafe locaux. Les handles de menu sont
// detruits dans le meme scope que leur creation, les HICON au drop.
//
// # Portabilite
// Ce module est specifique a Windows (Shell_NotifyIconW, TrackPopupMenu).

use crate::constants::{
    TRAY_ACCENT_COLOR, TRAY_GLYPH_SIZE, TRAY_ICON_ID, TRAY_NORMAL_COLOR, WM_TRAY_CALLBACK,
};
use crate::error::{GlowError, GlowResult};
use crate::icon;
use crate::system::win32::{create_dib, last_error, to_wstring, win32_error};
use crate::tray::{MenuCommand, MenuItem, TrayIconKind};
use image::RgbaImage;
use tracing::warn;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, LPARAM, POINT, WPARAM};
use windows::Win32::Graphics::Gdi::{CreateBitmap, DeleteObject, HDC, HGDIOBJ};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NIM_MODIFY,
    NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreateIconIndirect, CreatePopupMenu, DestroyIcon, DestroyMenu, GetCursorPos,
    PostMessageW, SetForegroundWindow, TrackPopupMenu, HICON, HMENU, ICONINFO, MF_CHECKED,
    MF_DISABLED, MF_GRAYED, MF_POPUP, MF_SEPARATOR, MF_STRING, TPM_BOTTOMALIGN, TPM_LEFTALIGN,
    TPM_NONOTIFY, TPM_RETURNCMD, WM_NULL,
};

/// Tooltip de l'icone.
pub const TRAY_TOOLTIP: &str = "ClipGlow - Copy feedback";

/// Icone de notification et ses deux variantes.
pub struct TrayIcon {
    hwnd: HWND,
    normal: HICON,
    accent: HICON,
    current: TrayIconKind,
    added: bool,
}

impl TrayIcon {
    /// Genere les variantes et ajoute l'icone a la zone de notification.
    ///
    /// # Errors
    /// Retourne `GlowError::Win32` si l'icone ne peut etre creee ou ajoutee.
    pub fn add(hwnd: HWND) -> GlowResult<Self> {
        let normal = create_icon(&icon::tray_glyph(TRAY_NORMAL_COLOR, TRAY_GLYPH_SIZE))?;
        let accent = match create_icon(&icon::tray_glyph(TRAY_ACCENT_COLOR, TRAY_GLYPH_SIZE)) {
            Ok(h) => h,
            Err(e) => {
                // SAFETY: HICON cree ci-dessus, detruit une seule fois.
                let _ = unsafe { DestroyIcon(normal) };
                return Err(e);
            }
        };
        let mut tray = Self {
            hwnd,
            normal,
            accent,
            current: TrayIconKind::Normal,
            added: false,
        };

        let mut nid = tray.nid(normal);
        set_tooltip(&mut nid, TRAY_TOOLTIP);
        // SAFETY: structure initialisee, hwnd valide.
        if !unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool() {
            return Err(GlowError::Win32("Shell_NotifyIconW NIM_ADD failed".into(), last_error()));
        }
        tray.added = true;
        Ok(tray)
    }

    pub fn current(&self) -> TrayIconKind {
        self.current
    }

    /// Affiche la variante `kind`.
    pub fn set(&mut self, kind: TrayIconKind) {
        if !self.added || kind == self.current {
            return;
        }
        let hicon = match kind {
            TrayIconKind::Normal => self.normal,
            TrayIconKind::Accent => self.accent,
        };
        let mut nid = self.nid(hicon);
        nid.uFlags = NIF_ICON;
        // SAFETY: appel FFI Win32.
        if unsafe { Shell_NotifyIconW(NIM_MODIFY, &nid) }.as_bool() {
            self.current = kind;
        } else {
            warn!("Shell_NotifyIconW NIM_MODIFY failed (code={})", last_error());
        }
    }

    /// Retire l'icone de la zone de notification.
    pub fn remove(&mut self) {
        if !self.added {
            return;
        }
        let nid = self.nid(self.normal);
        // SAFETY: appel FFI Win32.
        unsafe {
            let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
        }
        self.added = false;
    }

    fn nid(&self, hicon: HICON) -> NOTIFYICONDATAW {
        NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: TRAY_ICON_ID,
            uFlags: NIF_MESSAGE | NIF_ICON | NIF_TIP,
            uCallbackMessage: WM_TRAY_CALLBACK,
            hIcon: hicon,
            ..Default::default()
        }
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        self.remove();
        // SAFETY: HICON crees par `create_icon`, detruits une seule fois.
        unsafe {
            let _ = DestroyIcon(self.normal);
            let _ = DestroyIcon(self.accent);
        }
    }
}

/// Ecrit le tooltip dans la structure NOTIFYICONDATAW.
fn set_tooltip(nid: &mut NOTIFYICONDATAW, tooltip: &str) {
    let wtext = to_wstring(tooltip);
    let max = nid.szTip.len() - 1;
    let copy_len = wtext.len().min(max);
    nid.szTip[..copy_len].copy_from_slice(&wtext[..copy_len]);
    nid.szTip[copy_len] = 0;
}

/// Convertit une image RGBA en HICON (alpha non premultiplie).
pub fn create_icon(image: &RgbaImage) -> GlowResult<HICON> {
    let bgra = icon::to_bgra(image, false);
    let (w, h) = (image.width() as i32, image.height() as i32);
    // SAFETY: bitmaps temporaires detruits apres CreateIconIndirect, qui
    // en fait une copie.
    unsafe {
        let color = create_dib(HDC::default(), image, &bgra)?;
        let mask = CreateBitmap(w, h, 1, 1, None);
        let info = ICONINFO {
            fIcon: true.into(),
            xHotspot: 0,
            yHotspot: 0,
            hbmMask: mask,
            hbmColor: color,
        };
        let result = CreateIconIndirect(&info);
        let _ = DeleteObject(HGDIOBJ(color.0));
        let _ = DeleteObject(HGDIOBJ(mask.0));
        result.map_err(|e| win32_error("CreateIconIndirect", &e))
    }
}

/// Remplit `menu` avec `items` (sous-menus inclus).
unsafe fn append_items(menu: HMENU, items: &[MenuItem]) -> windows::core::Result<()> {
    for item in items {
        match item {
            MenuItem::Separator => AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null())?,
            MenuItem::Title(label) => {
                let w = to_wstring(label);
                AppendMenuW(menu, MF_STRING | MF_DISABLED | MF_GRAYED, 0, PCWSTR(w.as_ptr()))?;
            }
            MenuItem::Command {
                label,
                command,
                checked,
            } => {
                let w = to_wstring(label);
                let flags = if *checked { MF_STRING | MF_CHECKED } else { MF_STRING };
                AppendMenuW(menu, flags, command.id() as usize, PCWSTR(w.as_ptr()))?;
            }
            MenuItem::Submenu { label, items } => {
                let sub = CreatePopupMenu()?;
                let w = to_wstring(label);
                let attached = append_items(sub, items).and_then(|()| {
                    AppendMenuW(menu, MF_STRING | MF_POPUP, sub.0 as usize, PCWSTR(w.as_ptr()))
                });
                // Une fois attache, le sous-menu appartient au menu parent
                if let Err(e) = attached {
                    let _ = DestroyMenu(sub);
                    return Err(e);
                }
            }
        }
    }
    Ok(())
}

/// Affiche le menu contextuel a la position du curseur.
///
/// Le menu est modal (bloquant). Retourne la commande choisie, ou None
/// si l'utilisateur annule.
pub fn show_menu(hwnd: HWND, items: &[MenuItem]) -> Option<MenuCommand> {
    // SAFETY: appels FFI Win32 pour le menu popup ; le menu (et ses
    // sous-menus) est detruit avant le retour.
    unsafe {
        let menu = CreatePopupMenu().ok()?;
        if let Err(e) = append_items(menu, items) {
            warn!("cannot build tray menu: {}", e);
            let _ = DestroyMenu(menu);
            return None;
        }

        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);

        // Premier plan requis pour que le menu se ferme correctement
        let _ = SetForegroundWindow(hwnd);

        let cmd = TrackPopupMenu(
            menu,
            TPM_RETURNCMD | TPM_NONOTIFY | TPM_LEFTALIGN | TPM_BOTTOMALIGN,
            pt.x,
            pt.y,
            0,
            hwnd,
            None,
        );

        let _ = DestroyMenu(menu);
        let _ = PostMessageW(hwnd, WM_NULL, WPARAM(0), LPARAM(0));

        MenuCommand::from_id(cmd.0 as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::tray::build_menu;
    use windows::Win32::UI::WindowsAndMessaging::GetMenuItemCount;

    #[test]
    fn test_menu_with_submenus_is_built() {
        let items = build_menu(&Settings::default());
        unsafe {
            let menu = CreatePopupMenu().unwrap();
            append_items(menu, &items).unwrap();
            assert_eq!(GetMenuItemCount(menu), items.len() as i32);
            DestroyMenu(menu).unwrap();
        }
    }

    #[test]
    fn test_unattached_submenu_reports_error() {
        // Parent invalide : le sous-menu ne peut pas etre attache
        let items = vec![MenuItem::Submenu {
            label: "Icon size".into(),
            items: vec![MenuItem::Separator],
        }];
        let result = unsafe { append_items(HMENU::default(), &items) };
        assert!(result.is_err());
    }
}

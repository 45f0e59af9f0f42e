// ClipGlow - Helpers Win32 communs
//
// Conversions de chaines UTF-16, lecture de GetLastError et traduction
// des `windows::core::Error` en `GlowError`. Les bindings eux-memes
// viennent de la crate `windows` ; ce module ne declare aucun FFI.
//
// # Portabilite
// Ce module est specifique a Windows.

use crate::error::GlowError;
use image::RgbaImage;
use windows::Win32::Foundation::{GetLastError, HANDLE};
use windows::Win32::Graphics::Gdi::{
    CreateDIBSection, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC,
};

/// Convertit une chaine Rust en UTF-16 termine par un zero.
pub fn to_wstring(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convertit un buffer UTF-16 (zero final optionnel) en String.
pub fn from_wstring(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// Code GetLastError du thread courant.
pub fn last_error() -> u32 {
    // SAFETY: lecture de l'etat d'erreur du thread, sans effet de bord.
    unsafe { GetLastError().0 }
}

/// Traduit une erreur de la crate `windows` en `GlowError::Win32`.
pub fn win32_error(context: &str, e: &windows::core::Error) -> GlowError {
    GlowError::Win32(format!("{} failed: {}", context, e.message()), e.code().0 as u32)
}

/// Copie de l'en-tete d'une DIB 32 bits top-down.
pub fn dib_header(width: i32, height: i32) -> BITMAPINFO {
    BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height,
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Cree une DIB 32 bits contenant les pixels BGRA `bgra`.
///
/// # Safety
/// `hdc` doit etre un DC valide (ou nul pour le DC ecran).
pub unsafe fn create_dib(hdc: HDC, image: &RgbaImage, bgra: &[u8]) -> Result<HBITMAP, GlowError> {
    let (w, h) = (image.width() as i32, image.height() as i32);
    let bmi = dib_header(w, h);
    let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
    let dib = CreateDIBSection(hdc, &bmi, DIB_RGB_COLORS, &mut bits, HANDLE::default(), 0)
        .map_err(|e| win32_error("CreateDIBSection", &e))?;
    if bits.is_null() {
        return Err(GlowError::Win32("CreateDIBSection returned no bits".into(), last_error()));
    }
    let len = bgra.len().min((w * h * 4) as usize);
    std::ptr::copy_nonoverlapping(bgra.as_ptr(), bits as *mut u8, len);
    Ok(dib)
}

// ClipGlow - Demarrage automatique Windows
// Gestion de la cle registre HKCU\Software\Microsoft\Windows\CurrentVersion\Run
//
// La valeur "ClipGlow" contient le chemin de l'executable entre
// guillemets. Le demarrage automatique n'est considere actif que si ce
// chemin designe l'executable en cours (casse et guillemets ignores) :
// une entree laissee par une autre copie du programme ne compte pas.
//
// Au demarrage, `sync` aligne le registre sur `enable_auto_start`.
//
// # Safety
// Les appels advapi32 sont isoles dans des blocs unsafe locaux. La cle
// ouverte est encapsulee dans `RunKey`, fermee au drop.
//
// # Portabilite
// La comparaison de chemins est portable ; l'acces registre est
// specifique a Windows.

use std::path::Path;

/// Vrai si la valeur stockee designe l'executable `exe`.
pub fn run_value_matches(stored: &str, exe: &Path) -> bool {
    let stored = stored.trim().trim_matches('"');
    let exe = exe.to_string_lossy();
    !stored.is_empty() && stored.to_lowercase() == exe.trim_matches('"').to_lowercase()
}

#[cfg(windows)]
pub use registry::{is_enabled, set_enabled, sync};

#[cfg(windows)]
mod registry {
    use super::run_value_matches;
    use crate::constants::AUTOSTART_VALUE_NAME;
    use crate::error::{GlowError, GlowResult};
    use crate::system::win32::{from_wstring, to_wstring};
    use std::path::PathBuf;
    use tracing::{debug, info};
    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS, WIN32_ERROR};
    use windows::Win32::System::Registry::{
        RegCloseKey, RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW, HKEY,
        HKEY_CURRENT_USER, KEY_READ, KEY_WRITE, REG_SAM_FLAGS, REG_SZ, REG_VALUE_TYPE,
    };

    /// Cle Run ouverte.
    struct RunKey(HKEY);

    impl RunKey {
        fn open(access: REG_SAM_FLAGS) -> GlowResult<Self> {
            let mut hkey = HKEY::default();
            // SAFETY: appel FFI, hkey recoit un handle ferme au drop.
            let res = unsafe {
                RegOpenKeyExW(
                    HKEY_CURRENT_USER,
                    w!(r"Software\Microsoft\Windows\CurrentVersion\Run"),
                    0,
                    access,
                    &mut hkey,
                )
            };
            check(res, "RegOpenKeyExW")?;
            Ok(Self(hkey))
        }
    }

    impl Drop for RunKey {
        fn drop(&mut self) {
            // SAFETY: handle ouvert par RegOpenKeyExW.
            unsafe {
                let _ = RegCloseKey(self.0);
            }
        }
    }

    fn check(res: WIN32_ERROR, context: &str) -> GlowResult<()> {
        if res == ERROR_SUCCESS {
            Ok(())
        } else {
            Err(GlowError::Registry(format!("{} failed", context), res.0))
        }
    }

    fn exe_path() -> GlowResult<PathBuf> {
        Ok(std::env::current_exe()?)
    }

    /// Lit la valeur "ClipGlow" (None si absente).
    fn read_value() -> GlowResult<Option<String>> {
        let key = RunKey::open(KEY_READ)?;
        let name = to_wstring(AUTOSTART_VALUE_NAME);
        let mut buf = [0u16; 1024];
        let mut len = (buf.len() * 2) as u32;
        let mut ty = REG_VALUE_TYPE::default();
        // SAFETY: buffer de `len` octets.
        let res = unsafe {
            RegQueryValueExW(
                key.0,
                PCWSTR(name.as_ptr()),
                None,
                Some(&mut ty as *mut REG_VALUE_TYPE),
                Some(buf.as_mut_ptr() as *mut u8),
                Some(&mut len as *mut u32),
            )
        };
        if res == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        check(res, "RegQueryValueExW")?;
        if ty != REG_SZ {
            return Ok(None);
        }
        let chars = (len as usize / 2).min(buf.len());
        Ok(Some(from_wstring(&buf[..chars])))
    }

    /// Vrai si la cle Run pointe sur l'executable courant.
    pub fn is_enabled() -> bool {
        match (read_value(), exe_path()) {
            (Ok(Some(stored)), Ok(exe)) => run_value_matches(&stored, &exe),
            _ => false,
        }
    }

    fn enable() -> GlowResult<()> {
        let exe = exe_path()?;
        let quoted = format!("\"{}\"", exe.display());
        let key = RunKey::open(KEY_WRITE)?;
        let name = to_wstring(AUTOSTART_VALUE_NAME);
        let value = to_wstring(&quoted);
        // Taille en octets, zero final inclus
        let bytes: Vec<u8> = value.iter().flat_map(|c| c.to_le_bytes()).collect();
        // SAFETY: appel FFI, donnees REG_SZ valides.
        let res = unsafe { RegSetValueExW(key.0, PCWSTR(name.as_ptr()), 0, REG_SZ, Some(&bytes)) };
        check(res, "RegSetValueExW")?;
        info!("autostart enabled: {}", quoted);
        Ok(())
    }

    fn disable() -> GlowResult<()> {
        let key = RunKey::open(KEY_WRITE)?;
        let name = to_wstring(AUTOSTART_VALUE_NAME);
        // SAFETY: appel FFI.
        let res = unsafe { RegDeleteValueW(key.0, PCWSTR(name.as_ptr())) };
        // Valeur deja absente : succes
        if res != ERROR_FILE_NOT_FOUND {
            check(res, "RegDeleteValueW")?;
        }
        info!("autostart disabled");
        Ok(())
    }

    /// Active ou desactive le demarrage automatique.
    pub fn set_enabled(enabled: bool) -> GlowResult<()> {
        if enabled {
            enable()
        } else {
            disable()
        }
    }

    /// Aligne le registre sur la preference `desired`.
    pub fn sync(desired: bool) -> GlowResult<()> {
        let current = is_enabled();
        if current == desired {
            debug!("autostart already {}", if desired { "on" } else { "off" });
            return Ok(());
        }
        set_enabled(desired)
    }
}

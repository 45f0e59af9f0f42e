// ClipGlow - Instance unique
//
// Un mutex nomme (SINGLE_INSTANCE_MUTEX) est cree au lancement. S'il
// existait deja, une autre instance tourne : l'appelant affiche un
// message et quitte. Le handle est garde ouvert pendant toute la vie
// du processus et ferme au drop.
//
// # Portabilite
// Ce module est specifique a Windows.

use crate::constants::SINGLE_INSTANCE_MUTEX;
use crate::error::GlowResult;
use crate::system::win32::{to_wstring, win32_error};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS, HANDLE};
use windows::Win32::System::Threading::CreateMutexW;

/// Verrou d'instance unique.
pub struct InstanceGuard {
    handle: HANDLE,
}

impl InstanceGuard {
    /// Prend le verrou. `Ok(None)` si une autre instance le detient.
    pub fn acquire() -> GlowResult<Option<Self>> {
        let name = to_wstring(SINGLE_INSTANCE_MUTEX);
        // SAFETY: nom UTF-16 termine par zero, handle ferme au drop.
        unsafe {
            let handle = CreateMutexW(None, true, PCWSTR(name.as_ptr()))
                .map_err(|e| win32_error("CreateMutexW", &e))?;
            if GetLastError() == ERROR_ALREADY_EXISTS {
                let _ = CloseHandle(handle);
                return Ok(None);
            }
            Ok(Some(Self { handle }))
        }
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        // SAFETY: handle obtenu par CreateMutexW.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

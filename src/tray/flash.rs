// ClipGlow - Clignotement de l'icone de notification
//
// A chaque copie acceptee, l'icone du tray alterne brievement entre sa
// couleur normale et sa couleur d'accent. Le clignotement dure
// FLASH_TICKS ticks de FLASH_INTERVAL_MS : les ticks impairs affichent
// l'accent, les ticks pairs la couleur normale, et le dernier tick
// restaure toujours l'icone normale.
//
// Un clignotement deja en cours n'est pas redemarre.

use crate::constants::FLASH_TICKS;

/// Variante de l'icone a afficher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconKind {
    Normal,
    Accent,
}

/// Resultat d'un tick de clignotement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashStep {
    /// Afficher cette variante, le timer continue
    Show(TrayIconKind),
    /// Afficher l'icone normale et arreter le timer
    Finished,
    /// Aucun clignotement en cours
    Idle,
}

/// Compteur de clignotement.
#[derive(Debug, Clone, Default)]
pub struct TrayFlasher {
    count: u32,
    active: bool,
}

impl TrayFlasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_flashing(&self) -> bool {
        self.active
    }

    /// Demande un clignotement. Retourne true si le timer doit demarrer.
    pub fn flash(&mut self, enabled: bool) -> bool {
        if !enabled || self.active {
            return false;
        }
        self.active = true;
        self.count = 0;
        true
    }

    pub fn tick(&mut self) -> FlashStep {
        if !self.active {
            return FlashStep::Idle;
        }
        self.count += 1;
        if self.count >= FLASH_TICKS {
            self.active = false;
            return FlashStep::Finished;
        }
        let kind = if self.count % 2 == 1 {
            TrayIconKind::Accent
        } else {
            TrayIconKind::Normal
        };
        FlashStep::Show(kind)
    }
}

// ClipGlow - Classification des pre-copies
//
// Certains navigateurs ecrivent dans le presse-papiers pendant (ou juste
// apres) une selection de texte a la souris. Ces ecritures ne sont pas
// des copies volontaires et ne doivent pas declencher d'animation.
//
// Un changement est une pre-copie si :
// (a) le bouton gauche est enfonce et un glisser est en cours, ou
// (b) le dernier geste etait un glisser relache depuis moins de `threshold`.
//
// Les clics simples et les copies clavier (Ctrl+C) ne sont jamais classes
// comme pre-copie.

use crate::constants::PRE_COPY_THRESHOLD_MS;
use crate::input::tracker::MouseState;
use std::time::{Duration, Instant};

/// Predicat pur sur `MouseState` et l'instant courant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreCopyClassifier {
    threshold: Duration,
}

impl Default for PreCopyClassifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(PRE_COPY_THRESHOLD_MS))
    }
}

impl PreCopyClassifier {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Vrai si un changement survenu a `now` provient probablement d'une selection.
    pub fn is_possible_pre_copy(&self, state: &MouseState, now: Instant) -> bool {
        if state.left_button_down && state.was_dragging {
            return true;
        }
        if !state.was_dragging {
            return false;
        }
        match state.button_up_at {
            // saturating : une horloge anterieure au relachement compte comme 0
            Some(up_at) => now.saturating_duration_since(up_at) < self.threshold,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tracker::{InputTracker, Point};

    #[test]
    fn test_dragging_while_held() {
        let mut t = InputTracker::default();
        t.on_button_down(Point::new(0, 0));
        t.on_move(Point::new(30, 0));
        let c = PreCopyClassifier::default();
        // Aucun delai ne rend une selection en cours acceptable
        assert!(c.is_possible_pre_copy(t.state(), Instant::now() + Duration::from_secs(60)));
    }

    #[test]
    fn test_recent_drag_release() {
        let mut t = InputTracker::default();
        let up = Instant::now();
        t.on_button_down(Point::new(0, 0));
        t.on_move(Point::new(30, 0));
        t.on_button_up(Point::new(30, 0), up);
        let c = PreCopyClassifier::default();
        assert!(c.is_possible_pre_copy(t.state(), up + Duration::from_millis(20)));
        assert!(c.is_possible_pre_copy(t.state(), up + Duration::from_millis(79)));
        assert!(!c.is_possible_pre_copy(t.state(), up + Duration::from_millis(80)));
        assert!(!c.is_possible_pre_copy(t.state(), up + Duration::from_millis(500)));
    }

    #[test]
    fn test_click_never_pre_copy() {
        let mut t = InputTracker::default();
        let up = Instant::now();
        t.on_button_down(Point::new(100, 100));
        t.on_button_up(Point::new(100, 100), up);
        let c = PreCopyClassifier::default();
        assert!(!c.is_possible_pre_copy(t.state(), up));
        assert!(!c.is_possible_pre_copy(t.state(), up + Duration::from_millis(10)));
    }

    #[test]
    fn test_fresh_state_is_keyboard_copy() {
        let c = PreCopyClassifier::default();
        assert!(!c.is_possible_pre_copy(&MouseState::default(), Instant::now()));
    }

    #[test]
    fn test_custom_threshold() {
        let mut t = InputTracker::default();
        let up = Instant::now();
        t.on_button_down(Point::new(0, 0));
        t.on_button_up(Point::new(0, 40), up);
        let c = PreCopyClassifier::new(Duration::from_millis(50));
        assert_eq!(c.threshold(), Duration::from_millis(50));
        assert!(c.is_possible_pre_copy(t.state(), up + Duration::from_millis(49)));
        assert!(!c.is_possible_pre_copy(t.state(), up + Duration::from_millis(60)));
    }
}

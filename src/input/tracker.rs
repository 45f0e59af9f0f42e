// ClipGlow - Suivi de l'etat souris
//
// `InputTracker` maintient un `MouseState` a partir des evenements
// bouton gauche enfonce / relache et deplacement. Il determine si le
// geste courant (ou le dernier geste termine) est un glisser, c'est a
// dire si le curseur s'est eloigne du point d'appui au dela du seuil.
//
// # Regles
// - Appui : memorise la position, efface `was_dragging`.
// - Deplacement bouton enfonce : passe `was_dragging` a true des que le
//   deplacement depasse le seuil (jamais remis a false avant l'appui suivant).
// - Relachement : memorise position et instant ; si aucun glisser n'a
//   ete vu, le deplacement final est reverifie.
// - Les deplacements bouton relache sont ignores.

use crate::constants::DRAG_DISTANCE_THRESHOLD;
use std::time::Instant;

/// Position ecran absolue en pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Mesure de deplacement utilisee pour le seuil de glisser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMetric {
    /// max(|dx|, |dy|) : un axe suffit a depasser le seuil
    #[default]
    Chebyshev,
    /// sqrt(dx^2 + dy^2)
    Euclidean,
}

impl DragMetric {
    /// Vrai si le deplacement de `from` a `to` depasse strictement `threshold`.
    pub fn exceeds(self, from: Point, to: Point, threshold: i32) -> bool {
        let dx = (to.x as i64 - from.x as i64).abs();
        let dy = (to.y as i64 - from.y as i64).abs();
        let t = threshold as i64;
        match self {
            DragMetric::Chebyshev => dx > t || dy > t,
            DragMetric::Euclidean => dx * dx + dy * dy > t * t,
        }
    }
}

/// Etat courant du bouton gauche et du dernier geste.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MouseState {
    pub left_button_down: bool,
    pub button_down_position: Point,
    pub button_up_position: Point,
    /// Instant du dernier relachement (None avant le premier)
    pub button_up_at: Option<Instant>,
    pub was_dragging: bool,
}

/// Machine d'etat alimentee par le hook souris.
#[derive(Debug, Clone)]
pub struct InputTracker {
    state: MouseState,
    threshold: i32,
    metric: DragMetric,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(DRAG_DISTANCE_THRESHOLD, DragMetric::default())
    }
}

impl InputTracker {
    /// Cree un tracker avec un seuil de glisser et une metrique donnes.
    pub fn new(threshold: i32, metric: DragMetric) -> Self {
        Self {
            state: MouseState::default(),
            threshold: threshold.max(0),
            metric,
        }
    }

    /// Etat courant (lecture seule).
    pub fn state(&self) -> &MouseState {
        &self.state
    }

    /// Bouton gauche enfonce en `pos`.
    pub fn on_button_down(&mut self, pos: Point) {
        self.state.left_button_down = true;
        self.state.button_down_position = pos;
        self.state.was_dragging = false;
    }

    /// Deplacement du curseur en `pos`.
    pub fn on_move(&mut self, pos: Point) {
        if !self.state.left_button_down || self.state.was_dragging {
            return;
        }
        if self.metric.exceeds(self.state.button_down_position, pos, self.threshold) {
            self.state.was_dragging = true;
        }
    }

    /// Bouton gauche relache en `pos` a l'instant `at`.
    pub fn on_button_up(&mut self, pos: Point, at: Instant) {
        let was_down = self.state.left_button_down;
        self.state.left_button_down = false;
        self.state.button_up_position = pos;
        self.state.button_up_at = Some(at);

        // Relachement orphelin : pas de point d'appui de reference
        if was_down && !self.state.was_dragging {
            self.state.was_dragging =
                self.metric.exceeds(self.state.button_down_position, pos, self.threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_is_not_drag() {
        let mut t = InputTracker::default();
        t.on_button_down(Point::new(100, 100));
        t.on_move(Point::new(104, 97));
        t.on_button_up(Point::new(105, 100), Instant::now());
        assert!(!t.state().was_dragging);
        assert!(!t.state().left_button_down);
    }

    #[test]
    fn test_move_beyond_threshold_is_drag() {
        let mut t = InputTracker::default();
        t.on_button_down(Point::new(100, 100));
        t.on_move(Point::new(111, 100));
        assert!(t.state().was_dragging);
        assert!(t.state().left_button_down);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut t = InputTracker::default();
        t.on_button_down(Point::new(0, 0));
        t.on_move(Point::new(10, 10));
        assert!(!t.state().was_dragging);
    }

    #[test]
    fn test_drag_sticks_after_return() {
        let mut t = InputTracker::default();
        t.on_button_down(Point::new(0, 0));
        t.on_move(Point::new(0, 50));
        t.on_move(Point::new(0, 0));
        t.on_button_up(Point::new(0, 0), Instant::now());
        assert!(t.state().was_dragging);
    }

    #[test]
    fn test_release_far_without_moves() {
        // Le hook peut rater les WM_MOUSEMOVE intermediaires
        let mut t = InputTracker::default();
        t.on_button_down(Point::new(100, 100));
        t.on_button_up(Point::new(150, 100), Instant::now());
        assert!(t.state().was_dragging);
    }

    #[test]
    fn test_moves_ignored_when_up() {
        let mut t = InputTracker::default();
        t.on_move(Point::new(500, 500));
        assert!(!t.state().was_dragging);
    }

    #[test]
    fn test_new_press_clears_drag() {
        let mut t = InputTracker::default();
        t.on_button_down(Point::new(0, 0));
        t.on_move(Point::new(40, 0));
        t.on_button_up(Point::new(40, 0), Instant::now());
        t.on_button_down(Point::new(40, 0));
        assert!(!t.state().was_dragging);
    }

    #[test]
    fn test_orphan_release_records_position() {
        let mut t = InputTracker::default();
        let now = Instant::now();
        t.on_button_up(Point::new(7, 8), now);
        assert_eq!(t.state().button_up_position, Point::new(7, 8));
        assert_eq!(t.state().button_up_at, Some(now));
        assert!(!t.state().was_dragging);
    }

    #[test]
    fn test_extreme_coordinates() {
        let far = Point::new(i32::MAX, i32::MIN);
        let near = Point::new(i32::MIN, i32::MAX);
        assert!(DragMetric::Chebyshev.exceeds(far, near, 10));
        assert!(DragMetric::Euclidean.exceeds(far, near, 10));
        assert!(!DragMetric::Euclidean.exceeds(far, far, 0));
    }

    #[test]
    fn test_euclidean_metric() {
        // (8, 8) : Chebyshev 8 <= 10, Euclide ~11.3 > 10
        let from = Point::new(0, 0);
        let to = Point::new(8, 8);
        assert!(!DragMetric::Chebyshev.exceeds(from, to, 10));
        assert!(DragMetric::Euclidean.exceeds(from, to, 10));
    }
}

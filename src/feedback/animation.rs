// ClipGlow - Machine d'etat de l'animation de retour visuel
//
// Une animation se deroule en trois phases cadencees par un tick
// d'environ 16 ms :
//   Idle -> FadeIn (apparition + grossissement) -> Stay (leger battement)
//        -> FadeOut (disparition + retrecissement) -> Idle
//
// `frame_state` est une fonction pure (frame -> alpha, echelle) ;
// `FeedbackAnimator` ne fait que compter les frames et signaler le
// debut et la fin d'un cycle. Le dessin et le timer sont a la charge
// de l'appelant.
//
// # Invariants
// - Au plus une animation a la fois : `trigger` pendant un cycle est
//   sans effet (le cycle en cours n'est pas redemarre).
// - Un cycle dure exactement fade_in + stay + fade_out ticks.

use crate::constants::{FADE_IN_FRAMES, FADE_OUT_FRAMES, FEEDBACK_CURSOR_OFFSET, STAY_FRAMES};
use crate::input::tracker::Point;

/// Durees des phases, en frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub fade_in: u32,
    pub stay: u32,
    pub fade_out: u32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            fade_in: FADE_IN_FRAMES,
            stay: STAY_FRAMES,
            fade_out: FADE_OUT_FRAMES,
        }
    }
}

impl AnimationTiming {
    pub fn total(&self) -> u32 {
        self.fade_in + self.stay + self.fade_out
    }
}

/// Phase courante.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FadeIn,
    Stay,
    FadeOut,
}

impl Phase {
    /// Phase correspondant au numero de frame (frame 0 = debut du fondu).
    pub fn of_frame(frame: u32, timing: &AnimationTiming) -> Phase {
        if frame <= timing.fade_in {
            Phase::FadeIn
        } else if frame <= timing.fade_in + timing.stay {
            Phase::Stay
        } else if frame <= timing.total() {
            Phase::FadeOut
        } else {
            Phase::Idle
        }
    }
}

/// Opacite et echelle d'une frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub frame: u32,
    /// Opacite dans [0, 1]
    pub alpha: f32,
    /// Facteur d'echelle applique a l'icone
    pub scale: f32,
}

/// Calcule l'etat visuel de la frame `frame`.
pub fn frame_state(frame: u32, timing: &AnimationTiming) -> AnimationState {
    let (alpha, scale) = match Phase::of_frame(frame, timing) {
        Phase::FadeIn => {
            let p = ratio(frame, timing.fade_in);
            (p, 0.6 + 0.4 * p)
        }
        Phase::Stay => {
            let t = (frame - timing.fade_in) as f32;
            (1.0, 1.0 + 0.03 * (t * 0.25).sin())
        }
        Phase::FadeOut => {
            let p = ratio(frame - timing.fade_in - timing.stay, timing.fade_out);
            (1.0 - p, 1.0 - 0.15 * p)
        }
        Phase::Idle => (0.0, 0.85),
    };
    AnimationState {
        frame,
        alpha: alpha.clamp(0.0, 1.0),
        scale,
    }
}

fn ratio(n: u32, d: u32) -> f32 {
    if d == 0 {
        1.0
    } else {
        n as f32 / d as f32
    }
}

/// Resultat d'un tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Frame a afficher
    Frame(AnimationState),
    /// Derniere frame du cycle : l'afficher, puis cacher l'overlay et
    /// arreter le timer
    Finished(AnimationState),
    /// Aucun cycle en cours
    Idle,
}

/// Compteur de frames d'un cycle d'animation.
#[derive(Debug, Clone)]
pub struct FeedbackAnimator {
    timing: AnimationTiming,
    frame: u32,
    running: bool,
}

impl Default for FeedbackAnimator {
    fn default() -> Self {
        Self::new(AnimationTiming::default())
    }
}

impl FeedbackAnimator {
    pub fn new(timing: AnimationTiming) -> Self {
        Self {
            timing,
            frame: 0,
            running: false,
        }
    }

    pub fn timing(&self) -> &AnimationTiming {
        &self.timing
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::of_frame(self.frame, &self.timing)
        } else {
            Phase::Idle
        }
    }

    /// Demarre un cycle au curseur. Retourne l'origine de l'overlay, ou
    /// None si un cycle est deja en cours.
    pub fn trigger(&mut self, cursor: Point) -> Option<Point> {
        if self.running {
            return None;
        }
        self.running = true;
        self.frame = 0;
        Some(Point::new(
            cursor.x + FEEDBACK_CURSOR_OFFSET,
            cursor.y + FEEDBACK_CURSOR_OFFSET,
        ))
    }

    /// Etat de la frame courante (frame 0 juste apres `trigger`).
    pub fn current(&self) -> Option<AnimationState> {
        self.running.then(|| frame_state(self.frame, &self.timing))
    }

    /// Avance d'une frame.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.frame += 1;
        let total = self.timing.total();
        if self.frame >= total {
            self.running = false;
            self.frame = 0;
            return TickOutcome::Finished(frame_state(total, &self.timing));
        }
        TickOutcome::Frame(frame_state(self.frame, &self.timing))
    }

    /// Interrompt le cycle en cours (arret de l'application).
    pub fn cancel(&mut self) {
        self.running = false;
        self.frame = 0;
    }
}

// ClipGlow - Module feedback
// Animation affichee pres du curseur a chaque copie acceptee
//
// # Sous-modules
// - `animation` : machine d'etat Idle/FadeIn/Stay/FadeOut et calcul
//                 pur de l'opacite et de l'echelle par frame
// - `icon`      : bitmap de l'icone en cache et composition des frames
//
// La fenetre overlay (layered, transparente aux clics) qui affiche les
// frames vit dans `ui::overlay`.

/// Machine d'etat et courbes de l'animation.
pub mod animation;
/// Icone en cache (generee ou personnalisee) et composition des frames.
pub mod icon;

pub use animation::{frame_state, AnimationState, AnimationTiming, FeedbackAnimator, Phase, TickOutcome};
pub use icon::FeedbackIcon;

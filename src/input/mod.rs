// ClipGlow - Module input
// Suivi de l'etat souris et classification des pre-copies
//
// Ce module est independant de la plateforme : il consomme des
// evenements souris deja decodes (position ecran absolue + horodatage)
// et ne depend d'aucune API Windows. Le hook bas niveau qui produit
// ces evenements vit dans `system::hook`.
//
// # Sous-modules
// - `tracker` : machine d'etat bouton gauche / deplacement / glisser
// - `precopy` : predicat "ce changement de presse-papiers vient-il d'une
//               selection a la souris plutot que d'une copie volontaire ?"

/// Classification des changements de presse-papiers lies a une selection.
pub mod precopy;
/// Suivi de l'etat du bouton gauche et detection du glisser.
pub mod tracker;

pub use precopy::PreCopyClassifier;
pub use tracker::{DragMetric, InputTracker, MouseState, Point};

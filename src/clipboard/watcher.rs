// ClipGlow - Politique de traitement des changements du presse-papiers
//
// `ClipboardWatcher` decide si une notification de changement doit
// produire un `ClipboardEvent`. La lecture effective du texte passe par
// le trait `ClipboardSource`, implemente par `monitor::SystemClipboard`
// sous Windows et par des doubles en memoire dans les tests.
//
// # Ordre des verifications
// 1. Classifieur de pre-copie (si present) : rejet sans lecture.
// 2. Lecture du texte : une erreur (presse-papiers verrouille) est logguee
//    en debug et le changement est ignore, sans nouvelle tentative.
// 3. Texte absent ou vide : rejet.
//
// Aucune deduplication : copier deux fois le meme texte declenche deux
// evenements.

use crate::error::GlowResult;
use crate::input::precopy::PreCopyClassifier;
use crate::input::tracker::MouseState;
use std::time::Instant;
use tracing::debug;

/// Source de texte du presse-papiers.
pub trait ClipboardSource {
    /// Lit le texte courant. `Ok(None)` si aucun format texte n'est present.
    fn read_text(&mut self) -> GlowResult<Option<String>>;
}

/// Copie acceptee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEvent {
    pub text: String,
    pub timestamp: Instant,
}

/// Raison d'un rejet, exposee pour le log et les tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    PreCopy,
    ReadFailed,
    NoText,
    Empty,
}

/// Filtre les notifications de changement du presse-papiers.
pub struct ClipboardWatcher<C: ClipboardSource> {
    source: C,
    classifier: Option<PreCopyClassifier>,
}

impl<C: ClipboardSource> ClipboardWatcher<C> {
    pub fn new(source: C, classifier: Option<PreCopyClassifier>) -> Self {
        Self { source, classifier }
    }

    pub fn source_mut(&mut self) -> &mut C {
        &mut self.source
    }

    /// Traite une notification survenue a `now` avec l'etat souris courant.
    pub fn on_change(
        &mut self,
        mouse: &MouseState,
        now: Instant,
    ) -> Result<ClipboardEvent, Rejection> {
        if let Some(classifier) = &self.classifier {
            if classifier.is_possible_pre_copy(mouse, now) {
                debug!("clipboard change ignored: selection in progress");
                return Err(Rejection::PreCopy);
            }
        }

        let text = match self.source.read_text() {
            Ok(Some(text)) => text,
            Ok(None) => return Err(Rejection::NoText),
            Err(e) => {
                debug!("clipboard read failed: {}", e);
                return Err(Rejection::ReadFailed);
            }
        };

        if text.is_empty() {
            return Err(Rejection::Empty);
        }

        Ok(ClipboardEvent {
            text,
            timestamp: now,
        })
    }
}

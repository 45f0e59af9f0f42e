// ClipGlow - Types d'erreur centralises
//
// Ce module definit l'enumeration `GlowError` et le type alias
// `GlowResult<T>` utilises dans toute l'application.
//
// # Categories d'erreurs
// - `Clipboard` : echec d'acces au presse-papiers (verrouille par un autre processus)
// - `Config` : fichier de configuration illisible ou invalide
// - `Io` : erreur d'I/O disque (lecture/ecriture config, log)
// - `Image` : icone personnalisee impossible a decoder
// - `Update` : echec reseau ou reponse GitHub invalide
// - `Registry` : echec de lecture/ecriture de la cle Run
// - `Win32` : erreur API Windows generique (avec code GetLastError)
//
// Le `Display` genere par thiserror formate chaque variante avec un
// prefixe entre crochets pour faciliter le diagnostic dans les logs.

use thiserror::Error;

/// Enumeration de toutes les erreurs possibles dans ClipGlow.
#[derive(Debug, Error)]
pub enum GlowError {
    /// Erreur d'acces au presse-papiers
    #[error("[Clipboard] {0}")]
    Clipboard(String),
    /// Erreur de configuration
    #[error("[Config] {0}")]
    Config(String),
    /// Erreur de lecture/ecriture disque
    #[error("[Io] {0}")]
    Io(#[from] std::io::Error),
    /// Image impossible a charger
    #[error("[Image] {0}")]
    Image(String),
    /// Echec de la verification de mise a jour
    #[error("[Update] {0}")]
    Update(String),
    /// Erreur registre (demarrage automatique)
    #[error("[Registry] {0} (code={1})")]
    Registry(String, u32),
    /// Erreur Win32 API avec code d'erreur
    #[error("[Win32] {0} (code={1})")]
    Win32(String, u32),
}

impl From<serde_json::Error> for GlowError {
    fn from(e: serde_json::Error) -> Self {
        GlowError::Config(e.to_string())
    }
}

impl From<image::ImageError> for GlowError {
    fn from(e: image::ImageError) -> Self {
        GlowError::Image(e.to_string())
    }
}

impl From<reqwest::Error> for GlowError {
    fn from(e: reqwest::Error) -> Self {
        GlowError::Update(e.to_string())
    }
}

/// Type Result specialise pour ClipGlow.
pub type GlowResult<T> = Result<T, GlowError>;

// ClipGlow - Icone de retour visuel en cache
//
// `FeedbackIcon` garde le bitmap de l'icone a afficher, derive des
// preferences : image personnalisee redimensionnee a `icon_size`, ou
// style genere. Il est recalcule a chaque changement de preferences
// (style, taille, image) ; un recalcul pendant une animation est sans
// danger, la frame suivante utilise simplement le nouveau bitmap.
//
// `compose` produit l'image d'une frame : icone mise a l'echelle,
// centree dans un carre transparent de (taille + marge), opacite
// multipliee par l'alpha de la frame.

use crate::config::Settings;
use crate::constants::FEEDBACK_MARGIN;
use crate::error::GlowResult;
use crate::feedback::animation::AnimationState;
use crate::icon;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;
use tracing::{info, warn};

/// Origine du bitmap courant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    Generated(icon::IconStyle),
    Custom(std::path::PathBuf),
}

/// Bitmap de l'icone et sa provenance.
#[derive(Debug, Clone)]
pub struct FeedbackIcon {
    bitmap: RgbaImage,
    source: IconSource,
}

impl FeedbackIcon {
    /// Construit l'icone a partir des preferences.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut icon = Self {
            bitmap: RgbaImage::new(0, 0),
            source: IconSource::Generated(settings.icon_style),
        };
        icon.refresh(settings);
        icon
    }

    /// Recalcule le bitmap. Une image personnalisee illisible retombe
    /// sur le style genere (avertissement dans le log).
    pub fn refresh(&mut self, settings: &Settings) {
        let size = settings.icon_size;
        if let Some(path) = &settings.custom_icon_path {
            match load_custom_icon(path, size) {
                Ok(bitmap) => {
                    info!("using custom icon {}", path.display());
                    self.bitmap = bitmap;
                    self.source = IconSource::Custom(path.clone());
                    return;
                }
                Err(e) => warn!("custom icon {} unusable, falling back: {}", path.display(), e),
            }
        }
        self.bitmap = icon::generate(settings.icon_style, size);
        self.source = IconSource::Generated(settings.icon_style);
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub fn source(&self) -> &IconSource {
        &self.source
    }

    /// Cote du carre de l'overlay (icone + marge).
    pub fn canvas_size(&self) -> u32 {
        self.bitmap.width() + FEEDBACK_MARGIN
    }

    /// Image d'une frame, prete a etre presentee dans l'overlay.
    pub fn compose(&self, state: &AnimationState) -> RgbaImage {
        let side = self.canvas_size();
        let mut frame = RgbaImage::new(side, side);
        let base = self.bitmap.width();
        let drawn = (base as f32 * state.scale).max(0.0) as u32;
        if drawn == 0 || state.alpha <= 0.0 {
            return frame;
        }

        let mut scaled = imageops::resize(&self.bitmap, drawn, drawn, FilterType::Triangle);
        let alpha = state.alpha.clamp(0.0, 1.0);
        for px in scaled.pixels_mut() {
            px.0[3] = (px.0[3] as f32 * alpha).round() as u8;
        }

        let offset = (side as i64 - drawn as i64) / 2;
        imageops::overlay(&mut frame, &scaled, offset, offset);
        frame
    }
}

/// Charge et redimensionne une image personnalisee en `size` x `size`.
pub fn load_custom_icon(path: &Path, size: u32) -> GlowResult<RgbaImage> {
    let img = image::open(path)?;
    Ok(imageops::resize(&img.to_rgba8(), size, size, FilterType::Lanczos3))
}

/// Verifie qu'un fichier est une image decodable (import d'icone).
pub fn validate_custom_icon(path: &Path) -> GlowResult<()> {
    image::open(path).map(|_| ())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::animation::{frame_state, AnimationTiming};
    use crate::icon::IconStyle;
    use image::Rgba;

    fn settings(style: IconStyle, size: u32) -> Settings {
        Settings {
            icon_style: style,
            icon_size: size,
            ..Settings::default()
        }
    }

    #[test]
    fn test_generated_icon_size() {
        let icon = FeedbackIcon::from_settings(&settings(IconStyle::Bolt, 40));
        assert_eq!(icon.bitmap().dimensions(), (40, 40));
        assert_eq!(icon.canvas_size(), 50);
        assert_eq!(icon.source(), &IconSource::Generated(IconStyle::Bolt));
    }

    #[test]
    fn test_refresh_follows_settings() {
        let mut icon = FeedbackIcon::from_settings(&settings(IconStyle::Sun, 24));
        icon.refresh(&settings(IconStyle::Moon, 48));
        assert_eq!(icon.bitmap().width(), 48);
        assert_eq!(icon.source(), &IconSource::Generated(IconStyle::Moon));
    }

    #[test]
    fn test_custom_icon_loaded_and_resized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.png");
        RgbaImage::from_pixel(100, 60, Rgba([200, 10, 10, 255])).save(&path).unwrap();

        let mut s = settings(IconStyle::Star, 32);
        s.custom_icon_path = Some(path.clone());
        let icon = FeedbackIcon::from_settings(&s);
        assert_eq!(icon.bitmap().dimensions(), (32, 32));
        assert_eq!(icon.source(), &IconSource::Custom(path));
    }

    #[test]
    fn test_bad_custom_icon_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let mut s = settings(IconStyle::Leaf, 32);
        s.custom_icon_path = Some(path.clone());
        let icon = FeedbackIcon::from_settings(&s);
        assert_eq!(icon.source(), &IconSource::Generated(IconStyle::Leaf));
        assert!(validate_custom_icon(&path).is_err());
    }

    #[test]
    fn test_compose_scales_and_fades() {
        let icon = FeedbackIcon::from_settings(&settings(IconStyle::PixelHeart, 32));
        let timing = AnimationTiming::default();

        let full = icon.compose(&frame_state(timing.fade_in, &timing));
        assert_eq!(full.dimensions(), (42, 42));
        let max_alpha = full.pixels().map(|p| p.0[3]).max().unwrap();
        assert_eq!(max_alpha, 255);

        let half = icon.compose(&frame_state(timing.fade_in / 2, &timing));
        let max_alpha = half.pixels().map(|p| p.0[3]).max().unwrap();
        assert!(max_alpha > 100 && max_alpha < 150);

        let start = icon.compose(&frame_state(0, &timing));
        assert!(start.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_compose_is_centered() {
        let mut s = settings(IconStyle::CatPaw, 32);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("white.png");
        RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255])).save(&path).unwrap();
        s.custom_icon_path = Some(path);
        let icon = FeedbackIcon::from_settings(&s);
        let f = icon.compose(&frame_state(20, &AnimationTiming::default()));
        // Marges transparentes, centre opaque
        assert_eq!(f.get_pixel(0, 0).0[3], 0);
        assert_eq!(f.get_pixel(41, 41).0[3], 0);
        assert_eq!(f.get_pixel(21, 21).0[3], 255);
    }
}

// ClipGlow - Generateur d'icones procedurales
//
// Produit l'icone affichee pres du curseur (14 styles) et les deux
// variantes de l'icone de notification. Le rendu est deterministe :
// meme style + meme taille = memes pixels.
//
// # Sous-modules
// - `canvas` : rasterisation anticrenelee de formes simples
// - `styles` : 10 styles vectoriels en palette neon + glyphe du tray
// - `pixel`  : 4 styles pixel art sur grille 12x12
//
// # Persistance
// `IconStyle` est serialise par son index numerique (0..=13), comme dans
// les fichiers config.json existants. Un index inconnu retombe sur CatPaw.

/// Rasterisation anticrenelee (formes, degrades, composition).
pub mod canvas;
/// Styles pixel art.
pub mod pixel;
/// Styles vectoriels et glyphe de la zone de notification.
pub mod styles;

use crate::icon::canvas::{Canvas, Color};
use image::RgbaImage;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Style de l'icone de retour visuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconStyle {
    #[default]
    CatPaw,
    Snowflake,
    Bolt,
    Sun,
    Star,
    Hexagon,
    Leaf,
    Moon,
    Circuit,
    Diamond,
    PixelHeart,
    PixelRobot,
    PixelGhost,
    PixelSlime,
}

impl IconStyle {
    /// Tous les styles, dans l'ordre de leur index.
    pub const ALL: [IconStyle; 14] = [
        IconStyle::CatPaw,
        IconStyle::Snowflake,
        IconStyle::Bolt,
        IconStyle::Sun,
        IconStyle::Star,
        IconStyle::Hexagon,
        IconStyle::Leaf,
        IconStyle::Moon,
        IconStyle::Circuit,
        IconStyle::Diamond,
        IconStyle::PixelHeart,
        IconStyle::PixelRobot,
        IconStyle::PixelGhost,
        IconStyle::PixelSlime,
    ];

    /// Style a l'index donne, CatPaw si inconnu.
    pub fn from_index(index: i64) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    /// Index persistant du style.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Libelle du menu.
    pub fn display_name(self) -> &'static str {
        match self {
            IconStyle::CatPaw => "Cat paw",
            IconStyle::Snowflake => "Snowflake",
            IconStyle::Bolt => "Lightning bolt",
            IconStyle::Sun => "Sun",
            IconStyle::Star => "Star",
            IconStyle::Hexagon => "Hexagon",
            IconStyle::Leaf => "Leaf",
            IconStyle::Moon => "Moon",
            IconStyle::Circuit => "Circuit",
            IconStyle::Diamond => "Diamond",
            IconStyle::PixelHeart => "Pixel heart",
            IconStyle::PixelRobot => "Pixel robot",
            IconStyle::PixelGhost => "Pixel ghost",
            IconStyle::PixelSlime => "Pixel slime",
        }
    }

    /// Vrai pour les styles pixel art.
    pub fn is_pixel_art(self) -> bool {
        matches!(
            self,
            IconStyle::PixelHeart | IconStyle::PixelRobot | IconStyle::PixelGhost | IconStyle::PixelSlime
        )
    }
}

impl Serialize for IconStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index() as u64)
    }
}

impl<'de> Deserialize<'de> for IconStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_i64().map(IconStyle::from_index).unwrap_or_default())
    }
}

/// Genere l'icone `style` dans un carre de `size` pixels.
pub fn generate(style: IconStyle, size: u32) -> RgbaImage {
    let mut canvas = Canvas::new(size, size);
    match style {
        IconStyle::CatPaw => styles::cat_paw(&mut canvas, size),
        IconStyle::Snowflake => styles::snowflake(&mut canvas, size),
        IconStyle::Bolt => styles::bolt(&mut canvas, size),
        IconStyle::Sun => styles::sun(&mut canvas, size),
        IconStyle::Star => styles::star(&mut canvas, size),
        IconStyle::Hexagon => styles::hexagon(&mut canvas, size),
        IconStyle::Leaf => styles::leaf(&mut canvas, size),
        IconStyle::Moon => styles::moon(&mut canvas, size),
        IconStyle::Circuit => styles::circuit(&mut canvas, size),
        IconStyle::Diamond => styles::diamond(&mut canvas, size),
        IconStyle::PixelHeart => pixel::heart(&mut canvas, size),
        IconStyle::PixelRobot => pixel::robot(&mut canvas, size),
        IconStyle::PixelGhost => pixel::ghost(&mut canvas, size),
        IconStyle::PixelSlime => pixel::slime(&mut canvas, size),
    }
    canvas.into_image()
}

/// Genere l'icone de notification dans la couleur `rgb`.
pub fn tray_glyph(rgb: [u8; 3], size: u32) -> RgbaImage {
    let mut canvas = Canvas::new(size, size);
    styles::tray_glyph(&mut canvas, size, Color::rgb(rgb[0], rgb[1], rgb[2]));
    canvas.into_image()
}

/// Pixels BGRA (ordre GDI) d'une image RGBA. `premultiply` multiplie
/// les composantes par l'alpha, comme l'exige UpdateLayeredWindow ; les
/// icones (CreateIconIndirect) attendent un alpha non premultiplie.
pub fn to_bgra(image: &RgbaImage, premultiply: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.as_raw().len());
    for px in image.pixels() {
        let [r, g, b, a] = px.0;
        if premultiply {
            let m = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
            out.extend_from_slice(&[m(b), m(g), m(r), a]);
        } else {
            out.extend_from_slice(&[b, g, r, a]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_pixels(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn test_index_roundtrip_and_fallback() {
        for (i, style) in IconStyle::ALL.iter().enumerate() {
            assert_eq!(style.index(), i);
            assert_eq!(IconStyle::from_index(i as i64), *style);
        }
        assert_eq!(IconStyle::from_index(14), IconStyle::CatPaw);
        assert_eq!(IconStyle::from_index(-1), IconStyle::CatPaw);
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_string(&IconStyle::Moon).unwrap(), "7");
        let s: IconStyle = serde_json::from_str("12").unwrap();
        assert_eq!(s, IconStyle::PixelGhost);
        let s: IconStyle = serde_json::from_str("99").unwrap();
        assert_eq!(s, IconStyle::CatPaw);
        let s: IconStyle = serde_json::from_str("\"Moon\"").unwrap();
        assert_eq!(s, IconStyle::CatPaw);
    }

    #[test]
    fn test_every_style_draws_something() {
        for style in IconStyle::ALL {
            let img = generate(style, 32);
            assert_eq!(img.dimensions(), (32, 32));
            assert!(opaque_pixels(&img) > 40, "{:?} is nearly empty", style);
            // Un coin reste transparent : l'icone flotte sur le bureau
            assert_eq!(img.get_pixel(0, 31).0[3], 0, "{:?}", style);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate(IconStyle::Leaf, 40), generate(IconStyle::Leaf, 40));
    }

    #[test]
    fn test_scales_with_size() {
        let small = opaque_pixels(&generate(IconStyle::Star, 16));
        let large = opaque_pixels(&generate(IconStyle::Star, 64));
        assert!(large > small * 4);
    }

    #[test]
    fn test_pixel_art_has_hard_edges() {
        let img = generate(IconStyle::PixelHeart, 24);
        // Cellule (5, 5) pleine, rose opaque
        assert_eq!(img.get_pixel(11, 11).0, [255, 105, 180, 255]);
        assert!(IconStyle::PixelHeart.is_pixel_art());
        assert!(!IconStyle::Sun.is_pixel_art());
    }

    #[test]
    fn test_tray_glyph_colors() {
        let normal = tray_glyph([100, 180, 255], 32);
        let accent = tray_glyph([255, 200, 100], 32);
        assert_ne!(normal, accent);
        // Centre du porte-documents
        assert_eq!(normal.get_pixel(12, 22).0, [100, 180, 255, 255]);
    }

    #[test]
    fn test_to_bgra() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([255, 128, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([200, 100, 50, 128]));
        assert_eq!(to_bgra(&img, false), vec![0, 128, 255, 255, 50, 100, 200, 128]);
        assert_eq!(to_bgra(&img, true), vec![0, 128, 255, 255, 25, 50, 100, 128]);
    }
}

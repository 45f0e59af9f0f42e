// ClipGlow - Canevas de dessin vectoriel minimal
//
// Rasterise des formes simples (ellipses, polygones, traits, rectangles
// arrondis) dans un tampon RGBA premultiplie, avec anticrenelage par
// sur-echantillonnage 4x4 par pixel. Le resultat est converti en
// `image::RgbaImage` (alpha non premultiplie).
//
// # Composition
// Chaque remplissage est compose en "source over" sur le contenu
// existant. La couleur d'un pixel est evaluee une seule fois (au centre
// du pixel) ; seule la couverture est sur-echantillonnee.
//
// # Portabilite
// Pur Rust, aucune dependance systeme : les icones sont identiques sur
// toutes les plateformes, ce qui permet de les tester hors Windows.

use image::{Rgba, RgbaImage};

/// Nombre de sous-echantillons par axe et par pixel.
const SUBSAMPLES: u32 = 4;

/// Couleur RGBA 8 bits non premultipliee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Meme teinte avec une opacite differente.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Remplissage d'une forme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Degrade lineaire de `from` (c0) a `to` (c1), borne aux extremites
    Linear {
        from: (f32, f32),
        to: (f32, f32),
        c0: Color,
        c1: Color,
    },
}

impl Paint {
    /// Degrade oriente d'un angle (degres) a travers un rectangle.
    pub fn angled(rect: (f32, f32, f32, f32), c0: Color, c1: Color, angle_deg: f32) -> Paint {
        let (x, y, w, h) = rect;
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let half = (w * cos.abs() + h * sin.abs()) / 2.0;
        let (cx, cy) = (x + w / 2.0, y + h / 2.0);
        Paint::Linear {
            from: (cx - cos * half, cy - sin * half),
            to: (cx + cos * half, cy + sin * half),
            c0,
            c1,
        }
    }

    fn color_at(&self, x: f32, y: f32) -> Color {
        match *self {
            Paint::Solid(c) => c,
            Paint::Linear { from, to, c0, c1 } => {
                let (dx, dy) = (to.0 - from.0, to.1 - from.1);
                let len2 = dx * dx + dy * dy;
                if len2 <= f32::EPSILON {
                    return c0;
                }
                let t = ((x - from.0) * dx + (y - from.1) * dy) / len2;
                c0.lerp(c1, t)
            }
        }
    }
}

/// Forme geometrique en coordonnees pixels (flottantes).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    /// Contour d'ellipse d'epaisseur `width` centre sur le bord
    EllipseRing { cx: f32, cy: f32, rx: f32, ry: f32, width: f32 },
    /// Polygone plein (regle pair-impair)
    Polygon(Vec<(f32, f32)>),
    /// Polyligne epaisse a extremites et jointures rondes
    Stroke { points: Vec<(f32, f32)>, closed: bool, width: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32 },
    RoundedRect { x: f32, y: f32, w: f32, h: f32, r: f32 },
    Difference(Box<Shape>, Box<Shape>),
    Intersection(Box<Shape>, Box<Shape>),
    Translate(Box<Shape>, f32, f32),
}

impl Shape {
    /// Ellipse inscrite dans le rectangle (x, y, w, h).
    pub fn ellipse_in(x: f32, y: f32, w: f32, h: f32) -> Shape {
        Shape::Ellipse { cx: x + w / 2.0, cy: y + h / 2.0, rx: w / 2.0, ry: h / 2.0 }
    }

    /// Contour de l'ellipse inscrite dans le rectangle (x, y, w, h).
    pub fn ellipse_ring_in(x: f32, y: f32, w: f32, h: f32, width: f32) -> Shape {
        Shape::EllipseRing { cx: x + w / 2.0, cy: y + h / 2.0, rx: w / 2.0, ry: h / 2.0, width }
    }

    /// Segment epais a bouts ronds.
    pub fn line(x0: f32, y0: f32, x1: f32, y1: f32, width: f32) -> Shape {
        Shape::Stroke { points: vec![(x0, y0), (x1, y1)], closed: false, width }
    }

    pub fn translated(self, dx: f32, dy: f32) -> Shape {
        Shape::Translate(Box::new(self), dx, dy)
    }

    pub fn minus(self, other: Shape) -> Shape {
        Shape::Difference(Box::new(self), Box::new(other))
    }

    pub fn intersect(self, other: Shape) -> Shape {
        Shape::Intersection(Box::new(self), Box::new(other))
    }

    /// Vrai si le point (x, y) est dans la forme.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Shape::Ellipse { cx, cy, rx, ry } => in_ellipse(x, y, *cx, *cy, *rx, *ry),
            Shape::EllipseRing { cx, cy, rx, ry, width } => {
                let h = width / 2.0;
                in_ellipse(x, y, *cx, *cy, rx + h, ry + h)
                    && !in_ellipse(x, y, *cx, *cy, rx - h, ry - h)
            }
            Shape::Polygon(pts) => in_polygon(x, y, pts),
            Shape::Stroke { points, closed, width } => {
                near_polyline(x, y, points, *closed, width / 2.0)
            }
            Shape::Rect { x: rx, y: ry, w, h } => {
                x >= *rx && x < rx + w && y >= *ry && y < ry + h
            }
            Shape::RoundedRect { x: rx, y: ry, w, h, r } => in_rounded_rect(x, y, *rx, *ry, *w, *h, *r),
            Shape::Difference(a, b) => a.contains(x, y) && !b.contains(x, y),
            Shape::Intersection(a, b) => a.contains(x, y) && b.contains(x, y),
            Shape::Translate(s, dx, dy) => s.contains(x - dx, y - dy),
        }
    }

    /// Boite englobante (x0, y0, x1, y1), eventuellement trop large.
    fn bounds(&self) -> (f32, f32, f32, f32) {
        match self {
            Shape::Ellipse { cx, cy, rx, ry } => (cx - rx, cy - ry, cx + rx, cy + ry),
            Shape::EllipseRing { cx, cy, rx, ry, width } => {
                let (ex, ey) = (rx + width / 2.0, ry + width / 2.0);
                (cx - ex, cy - ey, cx + ex, cy + ey)
            }
            Shape::Polygon(pts) => points_bounds(pts, 0.0),
            Shape::Stroke { points, width, .. } => points_bounds(points, width / 2.0),
            Shape::Rect { x, y, w, h } | Shape::RoundedRect { x, y, w, h, .. } => {
                (*x, *y, x + w, y + h)
            }
            Shape::Difference(a, _) => a.bounds(),
            Shape::Intersection(a, b) => {
                let (a0, a1, a2, a3) = a.bounds();
                let (b0, b1, b2, b3) = b.bounds();
                (a0.max(b0), a1.max(b1), a2.min(b2), a3.min(b3))
            }
            Shape::Translate(s, dx, dy) => {
                let (x0, y0, x1, y1) = s.bounds();
                (x0 + dx, y0 + dy, x1 + dx, y1 + dy)
            }
        }
    }
}

fn in_ellipse(x: f32, y: f32, cx: f32, cy: f32, rx: f32, ry: f32) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = (x - cx) / rx;
    let ny = (y - cy) / ry;
    nx * nx + ny * ny <= 1.0
}

fn in_polygon(x: f32, y: f32, pts: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let n = pts.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = pts[i];
        let (xj, yj) = pts[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn dist2_to_segment(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 <= f32::EPSILON {
        0.0
    } else {
        (((px - a.0) * dx + (py - a.1) * dy) / len2).clamp(0.0, 1.0)
    };
    let (qx, qy) = (a.0 + t * dx, a.1 + t * dy);
    (px - qx) * (px - qx) + (py - qy) * (py - qy)
}

fn near_polyline(x: f32, y: f32, pts: &[(f32, f32)], closed: bool, half: f32) -> bool {
    let h2 = half * half;
    let segments = pts.windows(2).map(|w| (w[0], w[1]));
    let closing = match (closed, pts.first(), pts.last()) {
        (true, Some(&first), Some(&last)) if pts.len() > 2 => Some((last, first)),
        _ => None,
    };
    segments
        .chain(closing)
        .any(|(a, b)| dist2_to_segment(x, y, a, b) <= h2)
}

fn in_rounded_rect(x: f32, y: f32, rx: f32, ry: f32, w: f32, h: f32, r: f32) -> bool {
    if x < rx || x > rx + w || y < ry || y > ry + h {
        return false;
    }
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    // Distance au rectangle interieur (coins arrondis)
    let qx = (x - (rx + w / 2.0)).abs() - (w / 2.0 - r);
    let qy = (y - (ry + h / 2.0)).abs() - (h / 2.0 - r);
    if qx <= 0.0 || qy <= 0.0 {
        return true;
    }
    qx * qx + qy * qy <= r * r
}

fn points_bounds(pts: &[(f32, f32)], pad: f32) -> (f32, f32, f32, f32) {
    pts.iter().fold(
        (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
        |(x0, y0, x1, y1), &(x, y)| (x0.min(x - pad), y0.min(y - pad), x1.max(x + pad), y1.max(y + pad)),
    )
}

/// Aplatit une courbe de Bezier cubique en `steps` segments.
pub fn cubic_bezier(
    p0: (f32, f32),
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
    steps: usize,
) -> Vec<(f32, f32)> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            (
                a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
                a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
            )
        })
        .collect()
}

/// Points d'un arc d'ellipse inscrite dans (x, y, w, h).
/// Angles en degres, sens horaire a partir de l'axe x (convention ecran).
pub fn arc_points(x: f32, y: f32, w: f32, h: f32, start_deg: f32, sweep_deg: f32, steps: usize) -> Vec<(f32, f32)> {
    let steps = steps.max(1);
    let (cx, cy, rx, ry) = (x + w / 2.0, y + h / 2.0, w / 2.0, h / 2.0);
    (0..=steps)
        .map(|i| {
            let a = (start_deg + sweep_deg * i as f32 / steps as f32).to_radians();
            (cx + rx * a.cos(), cy + ry * a.sin())
        })
        .collect()
}

/// Tampon de dessin carre ou rectangulaire.
pub struct Canvas {
    width: u32,
    height: u32,
    /// RGBA premultiplie, composantes dans [0, 1]
    pixels: Vec<[f32; 4]>,
}

impl Canvas {
    /// Canevas transparent.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Remplit une forme avec anticrenelage.
    pub fn fill(&mut self, shape: &Shape, paint: &Paint) {
        self.fill_with(shape, paint, true);
    }

    /// Remplit une forme sans anticrenelage (un echantillon au centre du pixel).
    pub fn fill_crisp(&mut self, shape: &Shape, paint: &Paint) {
        self.fill_with(shape, paint, false);
    }

    fn fill_with(&mut self, shape: &Shape, paint: &Paint, antialias: bool) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (bx0, by0, bx1, by1) = shape.bounds();
        if bx1 < bx0 || by1 < by0 {
            return;
        }
        let x0 = (bx0.floor().max(0.0) as u32).min(self.width);
        let y0 = (by0.floor().max(0.0) as u32).min(self.height);
        let x1 = (bx1.ceil().max(0.0) as u32 + 1).min(self.width);
        let y1 = (by1.ceil().max(0.0) as u32 + 1).min(self.height);

        let n = if antialias { SUBSAMPLES } else { 1 };
        let total = (n * n) as f32;

        for py in y0..y1 {
            for px in x0..x1 {
                let mut hits = 0u32;
                for sy in 0..n {
                    for sx in 0..n {
                        let x = px as f32 + (sx as f32 + 0.5) / n as f32;
                        let y = py as f32 + (sy as f32 + 0.5) / n as f32;
                        if shape.contains(x, y) {
                            hits += 1;
                        }
                    }
                }
                if hits == 0 {
                    continue;
                }
                let coverage = hits as f32 / total;
                let color = paint.color_at(px as f32 + 0.5, py as f32 + 0.5);
                self.blend(px, py, color, coverage);
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, c: Color, coverage: f32) {
        let idx = (y * self.width + x) as usize;
        let sa = (c.a as f32 / 255.0) * coverage;
        let src = [
            c.r as f32 / 255.0 * sa,
            c.g as f32 / 255.0 * sa,
            c.b as f32 / 255.0 * sa,
            sa,
        ];
        let dst = &mut self.pixels[idx];
        for i in 0..4 {
            dst[i] = src[i] + dst[i] * (1.0 - sa);
        }
    }

    /// Convertit en image RGBA non premultipliee.
    pub fn into_image(self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (i, px) in self.pixels.iter().enumerate() {
            let a = px[3].clamp(0.0, 1.0);
            let rgba = if a <= f32::EPSILON {
                [0, 0, 0, 0]
            } else {
                let un = |v: f32| ((v / a).clamp(0.0, 1.0) * 255.0).round() as u8;
                [un(px[0]), un(px[1]), un(px[2]), (a * 255.0).round() as u8]
            };
            let x = i as u32 % self.width;
            let y = i as u32 / self.width;
            img.put_pixel(x, y, Rgba(rgba));
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_contains() {
        let e = Shape::ellipse_in(0.0, 0.0, 10.0, 10.0);
        assert!(e.contains(5.0, 5.0));
        assert!(!e.contains(0.5, 0.5));
    }

    #[test]
    fn test_polygon_contains() {
        let tri = Shape::Polygon(vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(tri.contains(2.0, 2.0));
        assert!(!tri.contains(8.0, 8.0));
    }

    #[test]
    fn test_difference() {
        let big = Shape::ellipse_in(0.0, 0.0, 20.0, 20.0);
        let hole = Shape::ellipse_in(5.0, 5.0, 10.0, 10.0);
        let ring = big.minus(hole);
        assert!(ring.contains(2.0, 10.0));
        assert!(!ring.contains(10.0, 10.0));
    }

    #[test]
    fn test_fill_solid_opaque_center() {
        let mut c = Canvas::new(8, 8);
        c.fill(&Shape::Rect { x: 0.0, y: 0.0, w: 8.0, h: 8.0 }, &Paint::Solid(Color::rgb(10, 20, 30)));
        let img = c.into_image();
        assert_eq!(img.get_pixel(4, 4).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_antialiased_edge_is_partial() {
        let mut c = Canvas::new(4, 1);
        c.fill(&Shape::Rect { x: 0.0, y: 0.0, w: 1.5, h: 1.0 }, &Paint::Solid(Color::WHITE));
        let img = c.into_image();
        assert_eq!(img.get_pixel(0, 0).0[3], 255);
        let a = img.get_pixel(1, 0).0[3];
        assert!(a > 0 && a < 255);
        assert_eq!(img.get_pixel(3, 0).0[3], 0);
    }

    #[test]
    fn test_linear_gradient_ends() {
        let p = Paint::Linear {
            from: (0.0, 0.0),
            to: (10.0, 0.0),
            c0: Color::BLACK,
            c1: Color::WHITE,
        };
        assert_eq!(p.color_at(-5.0, 0.0), Color::BLACK);
        assert_eq!(p.color_at(15.0, 0.0), Color::WHITE);
        assert_eq!(p.color_at(5.0, 0.0).r, 128);
    }

    #[test]
    fn test_source_over() {
        let mut c = Canvas::new(1, 1);
        let full = Shape::Rect { x: 0.0, y: 0.0, w: 1.0, h: 1.0 };
        c.fill(&full, &Paint::Solid(Color::rgb(255, 0, 0)));
        c.fill(&full, &Paint::Solid(Color::argb(128, 0, 0, 255)));
        let px = c.into_image().get_pixel(0, 0).0;
        assert_eq!(px[3], 255);
        assert!(px[0] > 100 && px[2] > 100);
    }

    #[test]
    fn test_bezier_endpoints() {
        let pts = cubic_bezier((0.0, 0.0), (1.0, 5.0), (9.0, 5.0), (10.0, 0.0), 8);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], (0.0, 0.0));
        assert_eq!(pts[8], (10.0, 0.0));
    }
}

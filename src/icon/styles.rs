// ClipGlow - Styles d'icones vectoriels (palette neon)
//
// Chaque fonction dessine un style dans un canevas carre de `size`
// pixels. Les coordonnees sont exprimees en fraction de la taille pour
// que le rendu reste proportionnel de 16 a 64 pixels.
//
// Elements communs : ombre portee decalee, remplissage en degrade,
// reflet blanc translucide, contour neon et petites etincelles.

use crate::icon::canvas::{arc_points, cubic_bezier, Canvas, Color, Paint, Shape};
use std::f32::consts::PI;

pub const NEON_CYAN: Color = Color::rgb(0, 255, 255);
pub const NEON_CYAN_DARK: Color = Color::rgb(0, 180, 200);
pub const NEON_BLUE: Color = Color::rgb(0, 150, 255);
pub const NEON_PURPLE: Color = Color::rgb(180, 100, 255);
pub const NEON_PURPLE_DARK: Color = Color::rgb(120, 60, 200);
pub const NEON_GREEN: Color = Color::rgb(0, 255, 150);
pub const NEON_GREEN_DARK: Color = Color::rgb(0, 180, 100);
pub const NEON_ORANGE: Color = Color::rgb(255, 150, 0);
pub const NEON_YELLOW: Color = Color::rgb(255, 255, 100);
pub const NEON_YELLOW_DARK: Color = Color::rgb(200, 200, 0);
const HIGHLIGHT: Color = Color::argb(120, 255, 255, 255);
const SHADOW: Color = Color::argb(80, 0, 0, 0);

/// Segments utilises pour aplatir les courbes.
const CURVE_STEPS: usize = 24;

type Rect = (f32, f32, f32, f32);

fn scaled(s: f32, x: f32, y: f32, w: f32, h: f32) -> Rect {
    (s * x, s * y, s * w, s * h)
}

fn ellipse(r: Rect) -> Shape {
    Shape::ellipse_in(r.0, r.1, r.2, r.3)
}

fn ellipse_shadow(c: &mut Canvas, r: Rect, offset: f32) {
    c.fill(&ellipse(r).translated(offset, offset), &Paint::Solid(SHADOW));
}

fn polygon_shadow(c: &mut Canvas, pts: &[(f32, f32)], offset: f32) {
    c.fill(&Shape::Polygon(pts.to_vec()).translated(offset, offset), &Paint::Solid(SHADOW));
}

/// Reflet elliptique place en fraction du rectangle parent.
fn ellipse_highlight(c: &mut Canvas, parent: Rect, xr: f32, yr: f32, wr: f32, hr: f32) {
    let r = (
        parent.0 + parent.2 * xr,
        parent.1 + parent.3 * yr,
        parent.2 * wr,
        parent.3 * hr,
    );
    c.fill(&ellipse(r), &Paint::Solid(HIGHLIGHT));
}

fn ellipse_gradient(c: &mut Canvas, r: Rect, c0: Color, c1: Color, angle: f32) {
    c.fill(&ellipse(r), &Paint::angled(r, c0, c1, angle));
}

fn ellipse_outline(c: &mut Canvas, r: Rect, color: Color, width: f32) {
    let ring = Shape::ellipse_ring_in(r.0, r.1, r.2, r.3, width);
    c.fill(&ring, &Paint::Solid(color.with_alpha(200)));
}

fn polygon_outline(c: &mut Canvas, pts: &[(f32, f32)], color: Color, width: f32) {
    let stroke = Shape::Stroke { points: pts.to_vec(), closed: true, width };
    c.fill(&stroke, &Paint::Solid(color.with_alpha(220)));
}

fn line(c: &mut Canvas, from: (f32, f32), to: (f32, f32), width: f32, paint: Paint) {
    c.fill(&Shape::line(from.0, from.1, to.0, to.1, width), &paint);
}

fn gradient_line(c: &mut Canvas, from: (f32, f32), to: (f32, f32), c0: Color, c1: Color, width: f32) {
    line(c, from, to, width, Paint::Linear { from, to, c0, c1 });
}

/// Petite croix lumineuse.
fn sparkle(c: &mut Canvas, x: f32, y: f32, size: f32, color: Color) {
    let w = (size * 0.3).max(1.5);
    let paint = Paint::Solid(color.with_alpha(180));
    line(c, (x - size, y), (x + size, y), w, paint);
    line(c, (x, y - size), (x, y + size), w, paint);
}

fn polar(cx: f32, cy: f32, angle: f32, r: f32) -> (f32, f32) {
    (cx + angle.cos() * r, cy + angle.sin() * r)
}

/// Hexagone pointe en haut.
fn hexagon_points(cx: f32, cy: f32, radius: f32) -> Vec<(f32, f32)> {
    (0..6)
        .map(|i| polar(cx, cy, PI / 3.0 * i as f32 - PI / 2.0, radius))
        .collect()
}

pub fn cat_paw(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let stroke = (s * 0.065).max(2.0);

    let main = scaled(s, 0.2, 0.42, 0.6, 0.48);
    ellipse_shadow(c, main, s * 0.02);
    ellipse_gradient(c, main, NEON_CYAN, NEON_CYAN_DARK, 45.0);
    ellipse_highlight(c, main, 0.15, 0.1, 0.4, 0.3);
    ellipse_outline(c, main, NEON_CYAN, stroke);

    // Coussinets : (x, y, diametre)
    let pads = [(0.13, 0.15, 0.22), (0.32, 0.05, 0.20), (0.52, 0.05, 0.20), (0.69, 0.15, 0.22)];
    for (x, y, d) in pads {
        let pad = scaled(s, x, y, d, d);
        ellipse_shadow(c, pad, s * 0.015);
        ellipse_gradient(c, pad, NEON_CYAN, NEON_CYAN_DARK, 45.0);
        ellipse_highlight(c, pad, 0.2, 0.15, 0.35, 0.25);
        ellipse_outline(c, pad, NEON_CYAN, stroke * 0.8);
    }
}

pub fn snowflake(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let center = s / 2.0;
    let stroke = (s * 0.06).max(2.0);

    for i in 0..6 {
        let angle = PI / 3.0 * i as f32;
        let tip = polar(center, center, angle, s * 0.4);
        gradient_line(c, (center, center), tip, NEON_CYAN, NEON_BLUE, stroke);

        let t = s * 0.04;
        c.fill(&ellipse((tip.0 - t, tip.1 - t, t * 2.0, t * 2.0)), &Paint::Solid(NEON_CYAN.with_alpha(180)));

        let base = polar(center, center, angle, s * 0.27);
        for offset in [55.0f32, -55.0] {
            let branch = polar(base.0, base.1, angle + offset.to_radians(), s * 0.13);
            gradient_line(c, base, branch, NEON_CYAN, NEON_CYAN_DARK, stroke * 0.6);
        }
    }

    let cr = s * 0.06;
    let core = (center - cr, center - cr, cr * 2.0, cr * 2.0);
    ellipse_gradient(c, core, NEON_CYAN, NEON_BLUE, 45.0);
    ellipse_highlight(c, core, 0.15, 0.1, 0.5, 0.35);
}

pub fn bolt(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let stroke = (s * 0.07).max(2.2);
    let pts = [
        (s * 0.55, s * 0.05),
        (s * 0.22, s * 0.48),
        (s * 0.45, s * 0.48),
        (s * 0.32, s * 0.95),
        (s * 0.78, s * 0.42),
        (s * 0.55, s * 0.42),
    ];

    polygon_shadow(c, &pts, s * 0.03);
    c.fill(
        &Shape::Polygon(pts.to_vec()),
        &Paint::Linear { from: pts[0], to: pts[3], c0: NEON_YELLOW, c1: NEON_ORANGE },
    );

    let streak = vec![
        (s * 0.52, s * 0.15),
        (s * 0.35, s * 0.48),
        (s * 0.42, s * 0.48),
        (s * 0.38, s * 0.75),
    ];
    c.fill(&Shape::Polygon(streak), &Paint::Solid(Color::argb(150, 255, 255, 255)));

    polygon_outline(c, &pts, NEON_YELLOW, stroke);
    sparkle(c, s * 0.2, s * 0.3, s * 0.06, NEON_YELLOW);
    sparkle(c, s * 0.75, s * 0.6, s * 0.07, NEON_YELLOW);
}

pub fn sun(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let center = s / 2.0;
    let stroke = (s * 0.065).max(2.2);

    for i in 0..8 {
        let angle = PI / 4.0 * i as f32;
        let inner = polar(center, center, angle, s * 0.28);
        let outer = polar(center, center, angle, s * 0.44);
        gradient_line(c, inner, outer, NEON_ORANGE, NEON_YELLOW, stroke);
    }

    let sr = s * 0.22;
    let disc = (center - sr, center - sr, sr * 2.0, sr * 2.0);
    ellipse_shadow(c, disc, s * 0.02);
    ellipse_gradient(c, disc, NEON_ORANGE, NEON_YELLOW, 135.0);
    ellipse_highlight(c, disc, 0.15, 0.1, 0.45, 0.35);
    ellipse_outline(c, disc, NEON_ORANGE, stroke * 0.8);
}

pub fn star(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let center = s / 2.0;
    let stroke = (s * 0.06).max(2.0);

    let pts: Vec<(f32, f32)> = (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { s * 0.42 } else { s * 0.18 };
            polar(center, center, PI / 5.0 * i as f32 - PI / 2.0, r)
        })
        .collect();

    polygon_shadow(c, &pts, s * 0.025);
    c.fill(
        &Shape::Polygon(pts.clone()),
        &Paint::Linear {
            from: (center, center - s * 0.42),
            to: (center, center + s * 0.42),
            c0: NEON_YELLOW,
            c1: NEON_YELLOW_DARK,
        },
    );

    let h = s * 0.15;
    c.fill(&ellipse((center - h / 2.0, center - s * 0.15, h, h)), &Paint::Solid(HIGHLIGHT));

    polygon_outline(c, &pts, NEON_YELLOW, stroke);
    sparkle(c, center + s * 0.35, center - s * 0.35, s * 0.08, NEON_YELLOW);
    sparkle(c, center - s * 0.38, center + s * 0.32, s * 0.06, NEON_YELLOW);
}

pub fn hexagon(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let center = s / 2.0;
    let stroke = (s * 0.06).max(2.0);

    let outer = hexagon_points(center, center, s * 0.42);
    polygon_shadow(c, &outer, s * 0.025);
    c.fill(
        &Shape::Polygon(outer.clone()),
        &Paint::Linear {
            from: (center, center - s * 0.42),
            to: (center, center + s * 0.42),
            c0: NEON_PURPLE,
            c1: NEON_PURPLE_DARK,
        },
    );

    let cap = vec![
        outer[0],
        outer[1],
        (center + s * 0.15, center - s * 0.05),
        (center - s * 0.15, center - s * 0.05),
        outer[5],
    ];
    c.fill(&Shape::Polygon(cap), &Paint::Solid(Color::argb(60, 255, 255, 255)));
    polygon_outline(c, &outer, NEON_PURPLE, stroke);

    let inner = hexagon_points(center, center, s * 0.22);
    c.fill(
        &Shape::Stroke { points: inner, closed: true, width: stroke * 0.6 },
        &Paint::Solid(NEON_CYAN.with_alpha(200)),
    );

    let cr = s * 0.04;
    c.fill(&ellipse((center - cr, center - cr, cr * 2.0, cr * 2.0)), &Paint::Solid(NEON_CYAN));
}

pub fn leaf(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let center = s / 2.0;
    let stroke = (s * 0.06).max(2.0);

    let mut outline = cubic_bezier(
        (center, s * 0.08),
        (s * 0.88, s * 0.2),
        (s * 0.88, s * 0.72),
        (center, s * 0.92),
        CURVE_STEPS,
    );
    outline.extend(cubic_bezier(
        (center, s * 0.92),
        (s * 0.12, s * 0.72),
        (s * 0.12, s * 0.2),
        (center, s * 0.08),
        CURVE_STEPS,
    ));

    let body = Shape::Polygon(outline.clone());
    c.fill(&body.clone().translated(s * 0.025, s * 0.025), &Paint::Solid(SHADOW));
    c.fill(
        &body,
        &Paint::Linear {
            from: (center, s * 0.08),
            to: (center, s * 0.92),
            c0: NEON_GREEN,
            c1: NEON_GREEN_DARK,
        },
    );

    let mut sheen = cubic_bezier(
        (center, s * 0.15),
        (s * 0.65, s * 0.25),
        (s * 0.55, s * 0.5),
        (center, s * 0.7),
        CURVE_STEPS,
    );
    sheen.push((center, s * 0.15));
    c.fill(&Shape::Polygon(sheen), &Paint::Solid(Color::argb(50, 255, 255, 255)));

    c.fill(
        &Shape::Stroke { points: outline, closed: true, width: stroke },
        &Paint::Solid(NEON_GREEN.with_alpha(220)),
    );

    line(c, (center, s * 0.18), (center, s * 0.82), stroke * 0.6, Paint::Solid(NEON_CYAN.with_alpha(180)));
    let vein = Paint::Solid(NEON_CYAN.with_alpha(120));
    for t in [0.3f32, 0.45, 0.6] {
        let y = s * (0.18 + t * 0.64);
        let off = s * 0.15;
        line(c, (center, y), (center + off, y + off * 0.5), stroke * 0.4, vein);
        line(c, (center, y), (center - off, y + off * 0.5), stroke * 0.4, vein);
    }
}

pub fn moon(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let stroke = (s * 0.06).max(2.0);

    let disc = scaled(s, 0.12, 0.08, 0.72, 0.84);
    let cut = scaled(s, 0.35, 0.02, 0.62, 0.72);
    let crescent = ellipse(disc).minus(ellipse(cut));

    c.fill(&crescent.clone().translated(s * 0.025, s * 0.025), &Paint::Solid(SHADOW));
    c.fill(&crescent, &Paint::angled(disc, NEON_BLUE, NEON_CYAN, 45.0));

    let glare = scaled(s, 0.18, 0.2, 0.25, 0.35);
    c.fill(&ellipse(glare).intersect(crescent), &Paint::Solid(HIGHLIGHT));

    let arc = arc_points(disc.0, disc.1, disc.2, disc.3, 45.0, 270.0, CURVE_STEPS * 2);
    c.fill(
        &Shape::Stroke { points: arc, closed: false, width: stroke },
        &Paint::Solid(NEON_BLUE.with_alpha(220)),
    );

    sparkle(c, s * 0.75, s * 0.25, s * 0.06, NEON_CYAN);
    sparkle(c, s * 0.82, s * 0.65, s * 0.05, NEON_BLUE);
}

pub fn circuit(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let center = s / 2.0;
    let stroke = (s * 0.055).max(2.0);

    let trace = Paint::Solid(NEON_CYAN.with_alpha(200));
    let segments = [
        ((0.15, 0.5), (0.35, 0.5)),
        ((0.35, 0.5), (0.35, 0.25)),
        ((0.35, 0.25), (0.65, 0.25)),
        ((0.65, 0.25), (0.65, 0.5)),
        ((0.65, 0.5), (0.85, 0.5)),
        ((0.35, 0.5), (0.35, 0.75)),
        ((0.35, 0.75), (0.65, 0.75)),
        ((0.65, 0.75), (0.65, 0.5)),
        ((0.5, 0.25), (0.5, 0.75)),
    ];
    for ((x0, y0), (x1, y1)) in segments {
        line(c, (s * x0, s * y0), (s * x1, s * y1), stroke, trace);
    }

    let nr = s * 0.055;
    let nodes = [
        (s * 0.35, center),
        (s * 0.65, center),
        (center, s * 0.25),
        (center, s * 0.75),
        (center, center),
    ];
    for (x, y) in nodes {
        let glow = (x - nr * 1.5, y - nr * 1.5, nr * 3.0, nr * 3.0);
        c.fill(&ellipse(glow), &Paint::Solid(NEON_GREEN.with_alpha(80)));
        let node = (x - nr, y - nr, nr * 2.0, nr * 2.0);
        ellipse_gradient(c, node, NEON_GREEN, NEON_CYAN, 45.0);
        ellipse_highlight(c, node, 0.1, 0.05, 0.4, 0.3);
    }
}

pub fn diamond(c: &mut Canvas, size: u32) {
    let s = size as f32;
    let center = s / 2.0;
    let stroke = (s * 0.06).max(2.0);

    let pts = [
        (center, s * 0.05),
        (s * 0.85, s * 0.35),
        (s * 0.75, s * 0.95),
        (s * 0.25, s * 0.95),
        (s * 0.15, s * 0.35),
    ];
    polygon_shadow(c, &pts, s * 0.03);
    c.fill(
        &Shape::Polygon(pts.to_vec()),
        &Paint::Linear {
            from: (center, s * 0.05),
            to: (center, s * 0.95),
            c0: NEON_PURPLE,
            c1: NEON_PURPLE_DARK,
        },
    );

    let facet = Paint::Solid(Color::argb(60, 255, 255, 255));
    c.fill(&Shape::Polygon(vec![(center, s * 0.05), (s * 0.15, s * 0.35), (s * 0.3, s * 0.35)]), &facet);
    c.fill(&Shape::Polygon(vec![(center, s * 0.05), (s * 0.7, s * 0.35), (center, s * 0.25)]), &facet);

    let cut = Paint::Solid(NEON_CYAN.with_alpha(150));
    let cuts = [
        ((0.5, 0.05), (0.3, 0.35)),
        ((0.5, 0.05), (0.7, 0.35)),
        ((0.15, 0.35), (0.85, 0.35)),
        ((0.3, 0.35), (0.25, 0.95)),
        ((0.7, 0.35), (0.75, 0.95)),
        ((0.3, 0.35), (0.5, 0.65)),
        ((0.7, 0.35), (0.5, 0.65)),
        ((0.5, 0.65), (0.25, 0.95)),
        ((0.5, 0.65), (0.75, 0.95)),
    ];
    for ((x0, y0), (x1, y1)) in cuts {
        line(c, (s * x0, s * y0), (s * x1, s * y1), stroke * 0.5, cut);
    }

    polygon_outline(c, &pts, NEON_PURPLE, stroke);
    c.fill(&ellipse((center - s * 0.08, s * 0.08, s * 0.16, s * 0.12)), &Paint::Solid(HIGHLIGHT));
}

/// Icone "presse-papiers" de la zone de notification.
///
/// Dessinee sur une grille de reference 32x32 puis mise a l'echelle.
pub fn tray_glyph(c: &mut Canvas, size: u32, main: Color) {
    let k = size as f32 / 32.0;
    let darker = Color::rgb(
        main.r.saturating_sub(30),
        main.g.saturating_sub(40),
        main.b.saturating_sub(55),
    );

    let board = Shape::RoundedRect { x: 5.0 * k, y: 6.0 * k, w: 22.0 * k, h: 23.0 * k, r: 3.0 * k };
    c.fill(&board, &Paint::Solid(main));
    let edge = 1.5 * k;
    let inner = Shape::RoundedRect {
        x: 5.0 * k + edge,
        y: 6.0 * k + edge,
        w: 22.0 * k - 2.0 * edge,
        h: 23.0 * k - 2.0 * edge,
        r: (3.0 * k - edge).max(0.0),
    };
    c.fill(&board.minus(inner), &Paint::Solid(darker));

    let clip = Shape::RoundedRect { x: 10.0 * k, y: 2.0 * k, w: 12.0 * k, h: 7.0 * k, r: 2.0 * k };
    c.fill(&clip, &Paint::Solid(Color::rgb(80, 80, 80)));

    let text = Paint::Solid(Color::argb(200, 255, 255, 255));
    for (x1, y) in [(22.0, 14.0), (19.0, 19.0), (17.0, 24.0)] {
        line(c, (9.0 * k, y * k), (x1 * k, y * k), 2.0 * k, text);
    }

    c.fill(&ellipse((22.0 * k, 3.0 * k, 7.0 * k, 7.0 * k)), &Paint::Solid(Color::rgb(255, 220, 100)));
}

// ClipGlow - Styles d'icones en pixel art
//
// Les quatre styles pixel sont dessines sur une grille logique 12x12 :
// une cellule mesure `size / 12` pixels. Les blocs sont remplis sans
// anticrenelage pour garder des bords nets.

use crate::icon::canvas::{Canvas, Color, Paint, Shape};
use crate::icon::styles::{NEON_CYAN, NEON_CYAN_DARK};

const PIXEL_PINK: Color = Color::rgb(255, 105, 180);
const PIXEL_BLUE: Color = Color::rgb(100, 180, 255);
const PIXEL_BLUE_DARK: Color = Color::rgb(60, 120, 200);
const PIXEL_GREEN: Color = Color::rgb(100, 255, 150);
const PIXEL_GREEN_DARK: Color = Color::rgb(50, 200, 100);
const PIXEL_ORANGE: Color = Color::rgb(255, 180, 100);
const GHOST_PUPIL: Color = Color::rgb(50, 50, 150);

/// Cellules de la grille.
const GRID: f32 = 12.0;

/// Pinceau sur la grille 12x12.
struct Grid<'a> {
    canvas: &'a mut Canvas,
    cell: f32,
}

impl<'a> Grid<'a> {
    fn new(canvas: &'a mut Canvas, size: u32) -> Self {
        Self { canvas, cell: size as f32 / GRID }
    }

    /// Bloc carre de `span` cellules a la position (x, y).
    fn block(&mut self, x: u32, y: u32, span: f32, color: Color) {
        let p = self.cell;
        let rect = Shape::Rect { x: x as f32 * p, y: y as f32 * p, w: p * span, h: p * span };
        self.canvas.fill_crisp(&rect, &Paint::Solid(color));
    }

    fn dot(&mut self, x: u32, y: u32, color: Color) {
        self.block(x, y, 1.0, color);
    }

    fn dots(&mut self, cells: &[(u32, u32)], color: Color) {
        for &(x, y) in cells {
            self.dot(x, y, color);
        }
    }

    /// Lignes horizontales : (y, x_debut, x_fin inclus).
    fn rows(&mut self, rows: &[(u32, u32, u32)], color: Color) {
        for &(y, x0, x1) in rows {
            for x in x0..=x1 {
                self.dot(x, y, color);
            }
        }
    }
}

pub fn heart(c: &mut Canvas, size: u32) {
    let mut g = Grid::new(c, size);
    g.dots(&[(2, 2), (3, 2), (8, 2), (9, 2)], PIXEL_PINK);
    g.rows(&[(3, 1, 4), (3, 7, 10), (4, 1, 10), (5, 1, 10), (6, 2, 9), (7, 3, 8), (8, 4, 7), (9, 5, 6)], PIXEL_PINK);
    g.dots(
        &[(2, 3), (3, 3), (8, 3), (9, 3), (2, 4), (8, 4), (9, 4)],
        Color::argb(180, 255, 255, 255),
    );
}

pub fn robot(c: &mut Canvas, size: u32) {
    let mut g = Grid::new(c, size);

    // Antenne
    g.dots(&[(5, 0), (6, 0)], PIXEL_BLUE_DARK);
    g.dots(&[(5, 1), (6, 1)], PIXEL_BLUE);

    // Tete : cadre puis interieur
    g.rows(&[(2, 3, 8), (6, 3, 8)], PIXEL_BLUE_DARK);
    g.dots(&[(3, 3), (3, 4), (3, 5), (8, 3), (8, 4), (8, 5)], PIXEL_BLUE_DARK);
    g.rows(&[(3, 4, 7), (4, 4, 7), (5, 4, 7)], PIXEL_BLUE);

    // Yeux
    g.dots(&[(4, 4), (7, 4)], Color::WHITE);
    g.block(4, 4, 0.6, Color::BLACK);
    g.block(7, 4, 0.6, Color::BLACK);

    // Corps
    g.rows(&[(7, 4, 7), (10, 4, 7)], PIXEL_BLUE_DARK);
    g.dots(&[(4, 8), (4, 9), (7, 8), (7, 9)], PIXEL_BLUE_DARK);
    g.rows(&[(8, 5, 6), (9, 5, 6)], PIXEL_BLUE);
    g.dots(&[(5, 8), (6, 8)], PIXEL_ORANGE);

    // Bras et jambes
    g.dots(&[(2, 8), (9, 8)], PIXEL_BLUE_DARK);
    g.dots(&[(3, 8), (8, 8)], PIXEL_BLUE);
    g.rows(&[(11, 4, 7)], PIXEL_BLUE_DARK);
}

pub fn ghost(c: &mut Canvas, size: u32) {
    let mut g = Grid::new(c, size);
    g.rows(
        &[(1, 4, 7), (2, 3, 8), (3, 2, 9), (4, 2, 9), (5, 2, 9), (6, 2, 9), (7, 2, 9), (8, 2, 9)],
        NEON_CYAN,
    );
    // Bas ondule
    g.dots(&[(2, 9), (3, 9), (5, 9), (6, 9), (8, 9), (9, 9)], NEON_CYAN);
    g.dots(&[(2, 10), (5, 10), (6, 10), (9, 10)], NEON_CYAN_DARK);

    g.block(3, 4, 2.0, Color::WHITE);
    g.block(7, 4, 2.0, Color::WHITE);
    g.dots(&[(4, 5), (8, 5)], GHOST_PUPIL);
    g.dot(3, 3, Color::argb(150, 255, 255, 255));
    g.dot(4, 3, Color::argb(100, 255, 255, 255));
}

pub fn slime(c: &mut Canvas, size: u32) {
    let mut g = Grid::new(c, size);
    g.rows(
        &[(3, 4, 7), (4, 3, 8), (5, 2, 9), (6, 2, 9), (7, 2, 9), (8, 2, 9), (9, 3, 8), (10, 4, 7)],
        PIXEL_GREEN,
    );
    g.dots(&[(2, 8), (9, 8), (3, 9), (8, 9), (4, 10), (7, 10)], PIXEL_GREEN_DARK);

    g.dots(&[(4, 6), (5, 6), (7, 6), (8, 6)], Color::WHITE);
    g.block(5, 6, 0.7, Color::BLACK);
    g.block(8, 6, 0.7, Color::BLACK);
    g.block(4, 6, 0.4, Color::WHITE);
    g.block(7, 6, 0.4, Color::WHITE);

    g.block(5, 8, 0.6, PIXEL_GREEN_DARK);
    g.block(6, 8, 0.6, PIXEL_GREEN_DARK);

    g.dot(4, 4, Color::argb(180, 255, 255, 255));
    g.dot(5, 4, Color::argb(120, 255, 255, 255));
}

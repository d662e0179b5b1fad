//! Character-grid drawing surface.
//!
//! Surface coordinates are scaled onto a `cols` x `rows` grid. Terminal
//! cells are roughly twice as tall as they are wide, so callers usually pick
//! `rows ≈ cols / 2` for a round-looking ring.

use std::f64::consts::TAU;

use sf_core::{OscillatorSnapshot, Phase, Point, PointerState, Ring, SurfaceSize};

/// One glyph per 60° hue bucket.
const GLYPHS: [char; 6] = ['o', '*', '+', 'x', '#', '@'];
const RING_GLYPH: char = '.';
const POINTER_GLYPH: char = 'X';
const BLANK: char = ' ';

pub struct TextSurface {
    cols: usize,
    rows: usize,
    size: SurfaceSize,
    cells: Vec<char>,
}

impl TextSurface {
    pub fn new(cols: usize, rows: usize, size: SurfaceSize) -> Self {
        Self {
            cols,
            rows,
            size,
            cells: vec![BLANK; cols * rows],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn cell_index(&self, p: Point) -> Option<usize> {
        if self.cols == 0 || self.rows == 0 || !(p.x >= 0.0 && p.y >= 0.0) {
            return None;
        }
        let col = (p.x / self.size.width * self.cols as f64) as usize;
        let row = (p.y / self.size.height * self.rows as f64) as usize;
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    fn plot(&mut self, p: Point, glyph: char) {
        if let Some(i) = self.cell_index(p) {
            self.cells[i] = glyph;
        }
    }

    pub fn glyph_for(phase: f64) -> char {
        let bucket = (Phase::new(phase).hue_degrees() / 60.0) as usize;
        GLYPHS[bucket.min(GLYPHS.len() - 1)]
    }

    pub fn draw_ring(&mut self, ring: Ring) {
        let samples = (self.cols + self.rows) * 4;
        for i in 0..samples {
            let theta = i as f64 / samples as f64 * TAU;
            self.plot(ring.position(Phase::new(theta)), RING_GLYPH);
        }
    }

    pub fn draw_oscillators(&mut self, snapshot: &[OscillatorSnapshot]) {
        for s in snapshot {
            self.plot(Point::new(s.x, s.y), Self::glyph_for(s.phase));
        }
    }

    pub fn draw_pointer(&mut self, pointer: PointerState) {
        if let Some(p) = pointer.inside(self.size) {
            self.plot(p, POINTER_GLYPH);
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Character-cell canvas for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use hullview_core::{Color as Rgb, Viewport};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Option<Rgb>,
}

const BLANK: Cell = Cell { ch: ' ', color: None };

/// A grid of colored characters that line segments and text are drawn into
pub struct CharCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CharCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as u32, self.height as u32)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![BLANK; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].ch)
    }

    fn plot(&mut self, x: i32, y: i32, ch: char, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Cell {
            ch,
            color: Some(color),
        };
    }

    /// Rasterize a segment with a character that follows its slope
    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb) {
        let Some((from, to)) = clip_segment(from, to, self.width as f32, self.height as f32) else {
            return;
        };

        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let ch = slope_char(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil() as usize;

        if steps == 0 {
            self.plot(from.0.floor() as i32, from.1.floor() as i32, ch, color);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = from.0 + dx * t;
            let y = from.1 + dy * t;
            self.plot(x.floor() as i32, y.floor() as i32, ch, color);
        }
    }

    /// Write text left to right starting at a cell; overflow is cut off
    pub fn put_text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            self.plot(x + i as i32, y, ch, color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                let color = match cell.color {
                    Some(c) => Color::Rgb {
                        r: c.r,
                        g: c.g,
                        b: c.b,
                    },
                    None => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(cell.ch))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Screen y grows downward, so a falling slope reads as a backslash
fn slope_char(dx: f32, dy: f32) -> char {
    if dx.abs() < f32::EPSILON {
        return '|';
    }
    let slope = dy / dx;
    if slope.abs() < 0.5 {
        '-'
    } else if slope.abs() > 2.0 {
        '|'
    } else if slope > 0.0 {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment against `[0, width) x [0, height)`
fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    height: f32,
) -> Option<((f32, f32), (f32, f32))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    let edges = [
        (-dx, from.0),
        (dx, width - 1e-3 - from.0),
        (-dy, from.1),
        (dy, height - 1e-3 - from.1),
    ];
    for (p, q) in edges {
        if p.abs() < f32::EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (from.0 + dx * t0, from.1 + dy * t0),
        (from.0 + dx * t1, from.1 + dy * t1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb::rgb(255, 255, 255);

    #[test]
    fn test_horizontal_line() {
        let mut canvas = CharCanvas::new(10, 3);
        canvas.draw_line((1.0, 1.0), (8.0, 1.0), WHITE);
        for x in 1..=8 {
            assert_eq!(canvas.get(x, 1), Some('-'));
        }
        assert_eq!(canvas.get(0, 1), Some(' '));
        assert_eq!(canvas.get(9, 1), Some(' '));
    }

    #[test]
    fn test_vertical_and_diagonal_chars() {
        assert_eq!(slope_char(0.0, 5.0), '|');
        assert_eq!(slope_char(3.0, 3.0), '\\');
        assert_eq!(slope_char(3.0, -3.0), '/');
        assert_eq!(slope_char(10.0, 1.0), '-');
    }

    #[test]
    fn test_offscreen_segment_is_clipped() {
        let mut canvas = CharCanvas::new(4, 4);
        canvas.draw_line((-1e6, 2.0), (1e6, 2.0), WHITE);
        assert_eq!(canvas.get(0, 2), Some('-'));
        assert_eq!(canvas.get(3, 2), Some('-'));
        assert!(clip_segment((-5.0, -5.0), (-1.0, -1.0), 4.0, 4.0).is_none());
    }

    #[test]
    fn test_text_cut_at_edge() {
        let mut canvas = CharCanvas::new(4, 1);
        canvas.put_text(2, 0, "hull", WHITE);
        assert_eq!(canvas.get(2, 0), Some('h'));
        assert_eq!(canvas.get(3, 0), Some('u'));
    }

    #[test]
    fn test_resize_and_clear() {
        let mut canvas = CharCanvas::new(2, 2);
        canvas.put_text(0, 0, "x", WHITE);
        canvas.clear();
        assert_eq!(canvas.get(0, 0), Some(' '));
        canvas.resize(5, 3);
        assert_eq!(canvas.viewport(), Viewport::new(5, 3));
        assert_eq!(canvas.get(4, 2), Some(' '));
    }
}

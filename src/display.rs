use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is used by the host loop to put the framebuffer on a screen. It
/// should abstract the implementation details, so a variety of kinds of
/// screen would work.
pub trait Display {
    /// paint the whole framebuffer
    fn draw(&mut self, frame: &Framebuffer) -> Result<(), io::Error>;
}

fn x_bounds() -> [f64; 2] {
    [0.0, (WIDTH - 1) as f64]
}

fn y_bounds() -> [f64; 2] {
    [-1.0 * (HEIGHT - 1) as f64, 0.0]
}

/// canvas coordinates of every pixel that is (or isn't) lit. y is flipped
/// because the canvas origin is bottom-left
fn bitplane(frame: &Framebuffer, lit: bool) -> Vec<(f64, f64)> {
    (0..HEIGHT)
        .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
        .filter(|&(x, y)| frame.pixel(x, y) == lit)
        .map(|(x, y)| (x as f64, -1.0 * y as f64))
        .collect()
}

/// where the bordered canvas goes: 1:1 terminal cells to chip8 pixels,
/// clipped to whatever the terminal actually has room for
fn canvas_area(available: Rect) -> Rect {
    Rect::new(0, 0, 2 + WIDTH as u16, 2 + HEIGHT as u16).intersection(available)
}

/// monochrome display in a terminal, rendered using TUI and crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(MonoTermDisplay { terminal })
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, frame: &Framebuffer) -> Result<(), io::Error> {
        let on = bitplane(frame, true);
        let off = bitplane(frame, false);

        self.terminal.draw(|f| {
            let size = canvas_area(f.size());

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(x_bounds())
                .y_bounds(y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &off,
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &on,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// useful for testing the host loop without a terminal. keeps the last
/// frame it was given
#[derive(Default)]
pub struct DummyDisplay {
    pub frames: usize,
    pub last: Option<Framebuffer>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, frame: &Framebuffer) -> Result<(), io::Error> {
        self.frames += 1;
        self.last = Some(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_bounds() {
        assert_eq!(x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        assert_eq!(y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_canvas_area_fits_terminal() {
        assert_eq!(canvas_area(Rect::new(0, 0, 120, 50)), Rect::new(0, 0, 66, 34));
        // the default 80x24 terminal is too short for the whole canvas
        assert_eq!(canvas_area(Rect::new(0, 0, 80, 24)), Rect::new(0, 0, 66, 24));
        assert_eq!(canvas_area(Rect::new(0, 0, 40, 10)), Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn test_bitplanes_split_pixels() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(62, 3, &[0xc0]);
        let on = bitplane(&fb, true);
        assert_eq!(on, vec![(62.0, -3.0), (63.0, -3.0)]);
        assert_eq!(bitplane(&fb, false).len(), WIDTH * HEIGHT - 2);
    }

    #[test]
    fn test_dummy_keeps_last_frame() -> Result<(), io::Error> {
        let mut d = DummyDisplay::new();
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0x80]);
        d.draw(&fb)?;
        assert_eq!(d.frames, 1);
        assert_eq!(d.last, Some(fb));
        Ok(())
    }

    #[test]
    #[ignore]
    // NB. figure out how to stop rendering during tests
    fn test_draw_on_terminal() -> Result<(), io::Error> {
        let mut d = MonoTermDisplay::new()?;
        d.draw(&Framebuffer::new())
    }
}

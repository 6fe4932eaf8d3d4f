//! Line-oriented rendering backend that draws the board with box-drawing glyphs.
//!
//! Every cell is three characters wide: the piece glyph flanked by its
//! horizontal stubs, or by brackets on the station.

use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};
use crossterm::{
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use glam::Vec2;
use light_em_all_core::{CellCoord, Connectors, Direction};
use light_em_all_rendering::{
    Color, FrameInput, Palette, PiecePresentation, PointerButton, Presentation, RenderingBackend,
    Scene,
};
use light_em_all_system_controls::direction_from_key;

/// Rendering backend that reads one input line per frame and prints the board.
#[derive(Debug)]
pub(crate) struct TextBackend<R, W> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R, W> TextBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a backend reading input from `reader` and drawing to `writer`.
    pub(crate) fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: false,
        }
    }

    /// Enables 24-bit terminal colors taken from the palette.
    pub(crate) fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn draw(&mut self, scene: &Scene, background: Color) -> Result<()> {
        for row in 0..scene.board.rows {
            for column in 0..scene.board.columns {
                match scene.piece(CellCoord::new(column, row)) {
                    Some(piece) => self.draw_piece(piece, background)?,
                    None => self.paint("   ", background, background)?,
                }
            }
            writeln!(self.writer).context("failed to draw board row")?;
        }

        let powered = scene.pieces.iter().filter(|piece| piece.powered).count();
        writeln!(self.writer, "powered {powered}/{}", scene.pieces.len())
            .context("failed to draw status line")?;
        if let Some(message) = scene.overlay_message() {
            self.paint(message, Palette::WIN_TEXT, background)?;
            writeln!(self.writer).context("failed to draw overlay")?;
        }
        self.writer.flush().context("failed to flush frame")
    }

    fn draw_piece(&mut self, piece: &PiecePresentation, background: Color) -> Result<()> {
        let wire = piece.wire_color();
        let stroke = if piece.powered { '━' } else { '─' };
        let stub = |present: bool| if present { stroke } else { ' ' };

        if piece.station {
            self.paint('[', Palette::STATION, background)?;
            self.paint(glyph(piece), wire, background)?;
            self.paint(']', Palette::STATION, background)
        } else {
            self.paint(stub(piece.connectors.left), wire, background)?;
            self.paint(glyph(piece), wire, background)?;
            self.paint(stub(piece.connectors.right), wire, background)
        }
    }

    fn paint<T>(&mut self, text: T, foreground: Color, background: Color) -> Result<()>
    where
        T: Display,
    {
        if !self.color {
            write!(self.writer, "{text}").context("failed to draw text")?;
            return Ok(());
        }

        let _ = self
            .writer
            .queue(SetForegroundColor(terminal_color(foreground)))?
            .queue(SetBackgroundColor(terminal_color(background)))?
            .queue(Print(text))?
            .queue(ResetColor)?;
        Ok(())
    }
}

fn terminal_color(color: Color) -> style::Color {
    let [r, g, b] = color.to_rgb_u8();
    style::Color::Rgb { r, g, b }
}

impl<R, W> RenderingBackend for TextBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            mut scene,
        } = presentation;

        writeln!(self.writer, "{window_title}").context("failed to write title")?;
        self.draw(&scene, clear_color)?;

        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .context("failed to read input line")?;
            if read == 0 {
                return Ok(());
            }

            let input = match parse_line(&line, &scene) {
                LineInput::Frame(input) => input,
                LineInput::Blank => continue,
                LineInput::Quit => return Ok(()),
                LineInput::Unrecognised => {
                    writeln!(self.writer, "unrecognised input: {}", line.trim())
                        .context("failed to report input")?;
                    continue;
                }
            };

            update_scene(input, &mut scene);
            self.draw(&scene, clear_color)?;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum LineInput {
    Frame(FrameInput),
    Blank,
    Quit,
    Unrecognised,
}

fn parse_line(line: &str, scene: &Scene) -> LineInput {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return LineInput::Blank;
    };
    let rest: Vec<&str> = words.collect();

    let key = match head {
        "w" => Some(Direction::Up),
        "s" => Some(Direction::Down),
        "a" => Some(Direction::Left),
        "d" => Some(Direction::Right),
        other => direction_from_key(other),
    };
    if let Some(direction) = key {
        return if rest.is_empty() {
            LineInput::Frame(FrameInput::key(direction))
        } else {
            LineInput::Unrecognised
        };
    }

    match (head, rest.as_slice()) {
        ("quit", []) => LineInput::Quit,
        ("click", [x, y]) => match (x.parse::<f32>(), y.parse::<f32>()) {
            (Ok(x), Ok(y)) => {
                LineInput::Frame(FrameInput::click(PointerButton::Primary, Vec2::new(x, y)))
            }
            _ => LineInput::Unrecognised,
        },
        ("rotate", [column, row]) => match (column.parse::<u32>(), row.parse::<u32>()) {
            (Ok(column), Ok(row)) => {
                let cell = CellCoord::new(column, row);
                LineInput::Frame(FrameInput::click(
                    PointerButton::Primary,
                    scene.board.cell_center(cell),
                ))
            }
            _ => LineInput::Unrecognised,
        },
        _ => LineInput::Unrecognised,
    }
}

/// Box-drawing glyph for a piece; heavy strokes mark powered wire.
fn glyph(piece: &PiecePresentation) -> char {
    let Connectors {
        up,
        down,
        left,
        right,
    } = piece.connectors;
    let (light, heavy) = match (up, down, left, right) {
        (false, false, false, false) => ('·', '·'),
        (true, false, false, false) => ('╵', '╹'),
        (false, true, false, false) => ('╷', '╻'),
        (false, false, true, false) => ('╴', '╸'),
        (false, false, false, true) => ('╶', '╺'),
        (true, true, false, false) => ('│', '┃'),
        (false, false, true, true) => ('─', '━'),
        (true, false, false, true) => ('└', '┗'),
        (true, false, true, false) => ('┘', '┛'),
        (false, true, false, true) => ('┌', '┏'),
        (false, true, true, false) => ('┐', '┓'),
        (true, true, false, true) => ('├', '┣'),
        (true, true, true, false) => ('┤', '┫'),
        (false, true, true, true) => ('┬', '┳'),
        (true, false, true, true) => ('┴', '┻'),
        (true, true, true, true) => ('┼', '╋'),
    };

    if piece.powered {
        heavy
    } else {
        light
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Light 'Em All adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use light_em_all_core::{BoardView, CellCoord, Connectors, Direction, PieceSnapshot, PlayState};

/// Text shown once every piece is lit.
pub const WIN_MESSAGE: &str = "You Win!";

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Byte RGB values, for backends that draw with 24-bit terminal colors.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Fixed colors used to draw the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette;

impl Palette {
    /// Fill behind every cell.
    pub const BACKGROUND: Color = Color::from_rgb_u8(64, 64, 64);
    /// Wire reached by the station.
    pub const POWERED_WIRE: Color = Color::from_rgb_u8(255, 255, 0);
    /// Wire cut off from the station.
    pub const UNPOWERED_WIRE: Color = Color::from_rgb_u8(192, 192, 192);
    /// Star drawn over the station cell.
    pub const STATION: Color = Color::from_rgb_u8(255, 200, 0);
    /// Win message text.
    pub const WIN_TEXT: Color = Color::from_rgb_u8(0, 255, 0);
}

/// Pointer button reported by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button on most mice.
    Primary,
    /// Right button on most mice.
    Secondary,
    /// Wheel or middle button.
    Middle,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Station move requested by an arrow key on this frame.
    pub key: Option<Direction>,
    /// Pixel position of a primary click on this frame.
    pub primary_click: Option<Vec2>,
}

impl FrameInput {
    /// Input carrying a single key press.
    #[must_use]
    pub const fn key(direction: Direction) -> Self {
        Self {
            key: Some(direction),
            primary_click: None,
        }
    }

    /// Input carrying a single click. Non-primary buttons are dropped.
    #[must_use]
    pub fn click(button: PointerButton, position: Vec2) -> Self {
        Self {
            key: None,
            primary_click: (button == PointerButton::Primary).then_some(position),
        }
    }

    /// Reports whether the frame carries nothing actionable.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.key.is_none() && self.primary_click.is_none()
    }
}

/// Describes the pixel geometry of the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of columns contained in the board.
    pub columns: u32,
    /// Number of rows contained in the board.
    pub rows: u32,
    /// Side length of a single cell in pixels.
    pub cell_length: f32,
}

impl BoardPresentation {
    /// Cell side length used when none is configured.
    pub const DEFAULT_CELL_LENGTH: f32 = 39.0;

    /// Creates a new board descriptor.
    ///
    /// Returns an error when `cell_length` is not a positive finite number.
    pub fn new(columns: u32, rows: u32, cell_length: f32) -> Result<Self, RenderingError> {
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
        })
    }

    /// Creates a board descriptor with the default cell length.
    #[must_use]
    pub const fn with_default_cell_length(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            cell_length: Self::DEFAULT_CELL_LENGTH,
        }
    }

    /// Maps a pixel position to the cell drawn under it.
    ///
    /// Returns `None` when the position lies outside the board.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        if !position.is_finite() || position.x < 0.0 || position.y < 0.0 {
            return None;
        }

        let column = (position.x / self.cell_length).floor();
        let row = (position.y / self.cell_length).floor();
        if column >= self.columns as f32 || row >= self.rows as f32 {
            return None;
        }

        Some(CellCoord::new(column as u32, row as u32))
    }

    /// Top-left pixel of the provided cell.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_length
    }

    /// Centre pixel of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length * 0.5)
    }
}

/// Single piece as drawn on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PiecePresentation {
    /// Cell occupied by the piece.
    pub cell: CellCoord,
    /// Wire stubs to draw from the cell centre.
    pub connectors: Connectors,
    /// Whether the wire is drawn lit.
    pub powered: bool,
    /// Whether the station star is drawn on top.
    pub station: bool,
}

impl PiecePresentation {
    /// Color of the piece's wire stubs.
    #[must_use]
    pub const fn wire_color(&self) -> Color {
        if self.powered {
            Palette::POWERED_WIRE
        } else {
            Palette::UNPOWERED_WIRE
        }
    }
}

impl From<&PieceSnapshot> for PiecePresentation {
    fn from(snapshot: &PieceSnapshot) -> Self {
        Self {
            cell: snapshot.cell,
            connectors: snapshot.connectors,
            powered: snapshot.powered,
            station: snapshot.station,
        }
    }
}

/// Scene description combining the board geometry and its pieces.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Geometry of the board.
    pub board: BoardPresentation,
    /// Pieces in row-major order.
    pub pieces: Vec<PiecePresentation>,
    /// Whether the session is still playing.
    pub play_state: PlayState,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        board: BoardPresentation,
        pieces: Vec<PiecePresentation>,
        play_state: PlayState,
    ) -> Self {
        Self {
            board,
            pieces,
            play_state,
        }
    }

    /// Builds a scene from a world snapshot.
    #[must_use]
    pub fn from_view(board: BoardPresentation, view: &BoardView) -> Self {
        Self::new(
            board,
            view.iter().map(PiecePresentation::from).collect(),
            view.play_state(),
        )
    }

    /// Replaces the pieces and play state with a newer snapshot.
    pub fn refresh(&mut self, view: &BoardView) {
        self.pieces.clear();
        self.pieces.extend(view.iter().map(PiecePresentation::from));
        self.play_state = view.play_state();
    }

    /// Piece drawn at the provided cell.
    #[must_use]
    pub fn piece(&self, cell: CellCoord) -> Option<&PiecePresentation> {
        if cell.column() >= self.board.columns || cell.row() >= self.board.rows {
            return None;
        }
        let index = cell.row() as usize * self.board.columns as usize + cell.column() as usize;
        self.pieces.get(index)
    }

    /// Message overlaid on the board, if any.
    #[must_use]
    pub const fn overlay_message(&self) -> Option<&'static str> {
        if self.play_state.is_won() {
            Some(WIN_MESSAGE)
        } else {
            None
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Light 'Em All scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the per-frame input
    /// captured by the adapter and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum RenderingError {
    /// Cells must have a positive, finite side length.
    #[error("cell length must be positive (received {cell_length})")]
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

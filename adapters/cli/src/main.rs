#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Light 'Em All experience.

mod text_backend;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use light_em_all_core::{Command, Event};
use light_em_all_rendering::{
    BoardPresentation, FrameInput, Palette, Presentation, RenderingBackend, Scene,
};
use light_em_all_system_bootstrap::Bootstrap;
use light_em_all_system_controls::{ControlInput, Controls};
use light_em_all_world::{self as world, query, World};

use crate::text_backend::TextBackend;

/// Command-line arguments for the Light 'Em All prototype.
#[derive(Debug, Parser)]
#[command(name = "light-em-all", about = "Rotate wires until every cell is lit.")]
struct CliArgs {
    /// Number of columns on the board.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    columns: u32,

    /// Number of rows on the board.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Seed for the scramble. A random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of a cell in pixels, used to map clicks to cells.
    #[arg(long, default_value_t = BoardPresentation::DEFAULT_CELL_LENGTH)]
    cell_length: f32,

    /// Prints every world event to stderr.
    #[arg(long)]
    trace_events: bool,

    /// Colors the board with 24-bit terminal colors.
    #[arg(long)]
    color: bool,
}

/// Entry point for the Light 'Em All command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let world = World::new(args.columns, args.rows, seed)
        .with_context(|| format!("failed to build a {}x{} board", args.columns, args.rows))?;
    let board = BoardPresentation::new(args.columns, args.rows, args.cell_length)
        .context("invalid --cell-length")?;

    let bootstrap = Bootstrap::default();
    let banner = bootstrap.welcome_banner(&world).to_owned();
    let scene = Scene::from_view(board, &bootstrap.board_view(&world));
    let presentation = Presentation::new(banner, Palette::BACKGROUND, scene);

    if args.trace_events {
        eprintln!("seed: {seed}");
    }

    let mut session = Session::new(world, args.trace_events);
    let backend = TextBackend::new(io::stdin().lock(), io::stdout()).with_color(args.color);
    backend.run(presentation, move |input, scene| session.advance(input, scene))
}

/// Host loop state shared across frames.
struct Session {
    world: World,
    controls: Controls,
    events: Vec<Event>,
    commands: Vec<Command>,
    trace_events: bool,
}

impl Session {
    fn new(world: World, trace_events: bool) -> Self {
        Self {
            controls: Controls::with_play_state(query::play_state(&world)),
            world,
            events: Vec::new(),
            commands: Vec::new(),
            trace_events,
        }
    }

    /// Runs one frame: input to commands, commands to events, events to scene.
    fn advance(&mut self, input: FrameInput, scene: &mut Scene) {
        let rotate = input
            .primary_click
            .and_then(|position| scene.board.cell_at(position));
        let control_input = ControlInput::new(input.key, rotate);

        self.commands.clear();
        self.controls
            .handle(&self.events, control_input, &mut self.commands);

        self.events.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        if self.trace_events {
            for event in &self.events {
                eprintln!("{event:?}");
            }
        }

        scene.refresh(&query::board_view(&self.world));
    }
}

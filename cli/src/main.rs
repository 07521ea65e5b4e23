use std::io::{self, IsTerminal};

use clap::Parser;
use tracing::{debug, info};

use crate::config::Args;
use crate::prompt::Prompter;
use crate::render::Palette;
use crate::session::Session;

mod config;
mod prompt;
mod render;
mod session;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // engine records arrive through the `log` bridge installed by `init`
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    debug!("{:?}", args);

    let palette = if args.no_color || !io::stdout().is_terminal() {
        Palette::Plain
    } else {
        Palette::Ansi
    };

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let difficulty = match args.resolve_difficulty()? {
        Some(difficulty) => difficulty,
        None => match config::choose_difficulty(&mut prompter)? {
            Some(difficulty) => difficulty,
            None => return Ok(()),
        },
    };
    info!(
        "Playing {} ({}x{}, {} mines)",
        difficulty.name(),
        difficulty.rows(),
        difficulty.cols(),
        difficulty.mines()
    );

    Session::new(prompter, palette, args.seed).run(difficulty)
}

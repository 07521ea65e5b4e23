use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sweeper_core::{CellCount, Coord, Difficulty};

use crate::prompt::Prompter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::BEGINNER,
            Preset::Intermediate => Difficulty::INTERMEDIATE,
            Preset::Expert => Difficulty::EXPERT,
        }
    }
}

/// Terminal minesweeper
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Play a preset board instead of choosing from the menu
    #[arg(short, long, value_enum, conflicts_with_all = ["rows", "config"])]
    pub difficulty: Option<Preset>,

    /// Rows of a custom board
    #[arg(long, requires_all = ["cols", "mines"], conflicts_with = "config")]
    pub rows: Option<Coord>,

    /// Columns of a custom board
    #[arg(long, requires_all = ["rows", "mines"])]
    pub cols: Option<Coord>,

    /// Mines on a custom board
    #[arg(long, requires_all = ["rows", "cols"])]
    pub mines: Option<CellCount>,

    /// TOML file with `rows`, `cols`, `mines` and an optional `name`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print the board without colours
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Difficulty picked on the command line, `None` when the menu should be shown.
    pub(crate) fn resolve_difficulty(&self) -> anyhow::Result<Option<Difficulty>> {
        if let Some(preset) = self.difficulty {
            return Ok(Some(preset.into()));
        }

        if let (Some(rows), Some(cols), Some(mines)) = (self.rows, self.cols, self.mines) {
            let difficulty = Difficulty::custom("Custom", rows, cols, mines)
                .context("Invalid custom board")?;
            return Ok(Some(difficulty));
        }

        if let Some(path) = &self.config {
            return load_difficulty(path).map(Some);
        }

        Ok(None)
    }
}

fn load_difficulty(path: &Path) -> anyhow::Result<Difficulty> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    parse_difficulty(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse_difficulty(text: &str) -> anyhow::Result<Difficulty> {
    Ok(toml::from_str(text)?)
}

/// Asks for a preset or a custom board until a valid one is given. `None` when input runs out.
pub(crate) fn choose_difficulty<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<Option<Difficulty>> {
    loop {
        prompter.say("Choose a difficulty:")?;
        for (index, preset) in Difficulty::PRESETS.iter().enumerate() {
            prompter.say(&format!(
                "  {}. {} ({}x{}, {} mines)",
                index + 1,
                preset.name(),
                preset.rows(),
                preset.cols(),
                preset.mines()
            ))?;
        }
        prompter.say(&format!("  {}. Custom", Difficulty::PRESETS.len() + 1))?;

        let Some(choice) = prompter.ask_number::<usize>("Choice: ")? else {
            return Ok(None);
        };

        match choice {
            1..=3 => return Ok(Some(Difficulty::PRESETS[choice - 1].clone())),
            4 => return choose_custom(prompter),
            _ => prompter.say("Unknown choice, pick 1-4.")?,
        }
    }
}

fn choose_custom<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<Option<Difficulty>> {
    loop {
        let Some(rows) = prompter.ask_number::<Coord>("Rows: ")? else {
            return Ok(None);
        };
        let Some(cols) = prompter.ask_number::<Coord>("Columns: ")? else {
            return Ok(None);
        };
        let Some(mines) = prompter.ask_number::<CellCount>("Mines: ")? else {
            return Ok(None);
        };

        match Difficulty::custom("Custom", rows, cols, mines) {
            Ok(difficulty) => return Ok(Some(difficulty)),
            Err(err) => prompter.say(&format!("{err}, try again."))?,
        }
    }
}

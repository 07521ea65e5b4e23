use std::io::{BufRead, Write};

use sweeper_core::{Board, Coord, Difficulty};
use tracing::{debug, info};

use crate::prompt::Prompter;
use crate::render::{Palette, render_board, render_status};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Action {
    Open,
    Flag,
    Chord,
}

impl Action {
    const fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Open),
            2 => Some(Self::Flag),
            3 => Some(Self::Chord),
            _ => None,
        }
    }
}

/// Plays games on one difficulty until the player stops or input runs out.
pub(crate) struct Session<R, W> {
    prompter: Prompter<R, W>,
    palette: Palette,
    seed: Option<u64>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) fn new(prompter: Prompter<R, W>, palette: Palette, seed: Option<u64>) -> Self {
        Self {
            prompter,
            palette,
            seed,
        }
    }

    pub(crate) fn run(mut self, difficulty: Difficulty) -> anyhow::Result<()> {
        let mut board = match self.seed {
            Some(seed) => Board::with_seed(difficulty, seed),
            None => Board::new(difficulty),
        };

        loop {
            board.reset();
            if !self.play(&mut board)? {
                return Ok(());
            }
            match self.prompter.ask_yes_no("Play again? (y/n) ")? {
                Some(true) => continue,
                _ => return Ok(()),
            }
        }
    }

    /// Runs one game to the end. `false` when input ran out first.
    fn play(&mut self, board: &mut Board) -> anyhow::Result<bool> {
        loop {
            let info = board.game_info();
            self.prompter.say(&render_status(&info))?;
            self.prompter.say(&render_board(&info, self.palette))?;

            if info.status.is_finished() {
                let seconds = info.stats.elapsed_seconds;
                let message = if info.status.is_won {
                    info!("Won in {seconds}s");
                    format!("You won in {seconds}s!")
                } else {
                    info!("Lost after {seconds}s");
                    format!("Boom! You hit a mine after {seconds}s.")
                };
                self.prompter.say(&message)?;
                return Ok(true);
            }

            let Some((row, col, action)) = self.ask_move()? else {
                return Ok(false);
            };
            debug!(row, col, ?action, "move");

            if board.state().is_configured() {
                if let Err(err) = board.start_game(row, col) {
                    self.prompter.say(&format!("{err}, try again."))?;
                    continue;
                }
            }

            let result = match action {
                Action::Open => board.open_cell(row, col).map(|outcome| outcome.has_update()),
                Action::Flag => board.toggle_flag(row, col).map(|outcome| outcome.has_update()),
                Action::Chord => board.chord(row, col).map(|outcome| outcome.has_update()),
            };
            match result {
                Ok(true) => {}
                Ok(false) => self.prompter.say("Nothing to do there.")?,
                Err(err) => self.prompter.say(&format!("{err}, try again."))?,
            }
        }
    }

    fn ask_move(&mut self) -> anyhow::Result<Option<(Coord, Coord, Action)>> {
        let Some(row) = self.prompter.ask_number::<Coord>("Row: ")? else {
            return Ok(None);
        };
        let Some(col) = self.prompter.ask_number::<Coord>("Column: ")? else {
            return Ok(None);
        };
        loop {
            let Some(choice) = self
                .prompter
                .ask_number::<u8>("Action (1 = open, 2 = flag, 3 = chord): ")?
            else {
                return Ok(None);
            };
            match Action::from_choice(choice) {
                Some(action) => return Ok(Some((row, col, action))),
                None => self.prompter.say("Unknown action, pick 1-3.")?,
            }
        }
    }
}

use crossterm::style::{Color, Stylize, style};
use sweeper_core::{DisplayValue, GameInfo};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Palette {
    Plain,
    Ansi,
}

impl Palette {
    fn paint(self, value: DisplayValue, text: String) -> String {
        use DisplayValue::*;

        if self == Palette::Plain {
            return text;
        }

        let color = match value {
            Unopened | Blank => return text,
            Flag => Color::Yellow,
            Mine => return style(text).with(Color::Red).bold().to_string(),
            Digit(1) => Color::Blue,
            Digit(2) => Color::Green,
            Digit(3) => Color::Red,
            Digit(4) => Color::DarkBlue,
            Digit(5) => Color::DarkRed,
            Digit(6) => Color::Cyan,
            Digit(7) => Color::Magenta,
            Digit(_) => Color::Grey,
        };
        style(text).with(color).to_string()
    }
}

const fn token(value: DisplayValue) -> char {
    use DisplayValue::*;
    match value {
        Unopened => '.',
        Flag => 'F',
        Mine => '*',
        Blank => ' ',
        Digit(count) => (b'0' + count) as char,
    }
}

fn digits(mut number: usize) -> usize {
    let mut width = 1;
    while number >= 10 {
        number /= 10;
        width += 1;
    }
    width
}

/// Grid with column indices on top and row indices on the left.
pub(crate) fn render_board(info: &GameInfo, palette: Palette) -> String {
    let (rows, cols) = info.board.dim();
    let row_width = digits(rows.saturating_sub(1));
    let col_width = digits(cols.saturating_sub(1));

    let mut out = format!("{:row_width$}", "");
    for col in 0..cols {
        out.push_str(&format!(" {col:>col_width$}"));
    }
    out.push('\n');

    for (row, cells) in info.board.rows().into_iter().enumerate() {
        out.push_str(&format!("{row:>row_width$}"));
        for &value in cells {
            let text = format!("{:>col_width$}", token(value));
            out.push(' ');
            out.push_str(&palette.paint(value, text));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn render_status(info: &GameInfo) -> String {
    format!(
        "{} | mines left: {} | opened: {} | time: {}s",
        info.difficulty_name,
        info.stats.remaining_mines,
        info.stats.opened_count,
        info.stats.elapsed_seconds
    )
}

#[cfg(test)]
mod tests {
    use sweeper_core::{Board, Difficulty, FixedLayout};

    use super::*;

    fn scripted(rows: u16, cols: u16, mines: &[(u16, u16)]) -> Board {
        let difficulty = Difficulty::custom("Scripted", rows, cols, mines.len() as u32).unwrap();
        let start = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .find(|coords| !mines.contains(coords))
            .unwrap();
        let mut board = Board::with_seed(difficulty, 0);
        board
            .start_game_with(start.0, start.1, &mut FixedLayout::new(mines))
            .unwrap();
        board
    }

    #[test]
    fn renders_plain_grid_with_indices() {
        let mut board = scripted(2, 3, &[(1, 2)]);
        board.toggle_flag(1, 2).unwrap();
        board.open_cell(0, 0).unwrap();

        let rendered = render_board(&board.game_info(), Palette::Plain);

        assert_eq!(rendered, "  0 1 2\n0   1 .\n1   1 F\n");
    }

    #[test]
    fn wide_boards_align_columns() {
        let board = scripted(1, 12, &[]);
        let rendered = render_board(&board.game_info(), Palette::Plain);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "   0  1  2  3  4  5  6  7  8  9 10 11");
        assert_eq!(lines[1], "0  .  .  .  .  .  .  .  .  .  .  .  .");
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn lost_board_shows_mines() {
        let mut board = scripted(1, 2, &[(0, 1)]);
        board.open_cell(0, 1).unwrap();

        let rendered = render_board(&board.game_info(), Palette::Plain);

        assert_eq!(rendered, "  0 1\n0 . *\n");
    }

    #[test]
    fn ansi_palette_styles_tokens() {
        let mut board = scripted(1, 2, &[(0, 1)]);
        board.open_cell(0, 1).unwrap();

        let plain = render_board(&board.game_info(), Palette::Plain);
        let ansi = render_board(&board.game_info(), Palette::Ansi);

        assert_ne!(plain, ansi);
        assert!(ansi.contains('\u{1b}'));
    }

    #[test]
    fn status_line() {
        let mut board = scripted(2, 2, &[(1, 1)]);
        board.toggle_flag(0, 1).unwrap();
        board.toggle_flag(1, 0).unwrap();

        assert_eq!(
            render_status(&board.game_info()),
            "Scripted | mines left: -1 | opened: 0 | time: 0s"
        );
    }
}

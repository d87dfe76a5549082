//! Output formatting for the CLI

use crate::tictactoe::{Board, Cell, Outcome};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn render_rows(symbol: impl Fn(usize) -> String) -> String {
    (0..3)
        .map(|row| {
            (0..3)
                .map(|col| symbol(row * 3 + col))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n---------\n")
}

/// Board as a 3x3 grid, X for the player and O for the opponent
pub fn render_board(board: &Board) -> String {
    render_rows(|idx| match board.get(idx) {
        Some(Cell::Player) => "X".to_string(),
        Some(Cell::Opponent) => "O".to_string(),
        Some(Cell::Empty) | None => " ".to_string(),
    })
}

/// Cell numbering shown before the first move
pub fn position_guide() -> String {
    render_rows(|idx| idx.to_string())
}

/// End-of-game message from the player's point of view
pub fn outcome_banner(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::PlayerWin => "Congratulations, you win!",
        Outcome::OpponentWin => "The machine wins. Better luck next time!",
        Outcome::Draw => "It's a draw!",
        Outcome::InProgress => "Game abandoned.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_board() {
        let board = Board::from_string("X...O....").unwrap();
        assert_eq!(
            render_board(&board),
            "X |   |  \n---------\n  | O |  \n---------\n  |   |  "
        );
    }

    #[test]
    fn test_position_guide() {
        assert_eq!(
            position_guide(),
            "0 | 1 | 2\n---------\n3 | 4 | 5\n---------\n6 | 7 | 8"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}

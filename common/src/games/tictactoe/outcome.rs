use super::board::is_valid_grid;
use super::types::{Mark, Position, WinningLine};

/// Every line that wins, in the order they are scanned: rows top to bottom,
/// columns left to right, main diagonal, anti-diagonal.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(WinningLine),
    Draw,
}

impl Outcome {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(line) => Some(line.mark),
            Outcome::Draw => None,
        }
    }

    pub fn winning_line(&self) -> Option<&WinningLine> {
        match self {
            Outcome::Win(line) => Some(line),
            Outcome::Draw => None,
        }
    }
}

/// Returns `None` while the game is still going, and also for grids that are not 3x3.
pub fn evaluate(grid: &[Vec<Mark>]) -> Option<Outcome> {
    if !is_valid_grid(grid) {
        return None;
    }

    if let Some(line) = find_winning_line(grid) {
        return Some(Outcome::Win(line));
    }

    let full = grid
        .iter()
        .all(|row| row.iter().all(|&cell| cell != Mark::Empty));
    if full { Some(Outcome::Draw) } else { None }
}

pub fn find_winning_line(grid: &[Vec<Mark>]) -> Option<WinningLine> {
    if !is_valid_grid(grid) {
        return None;
    }

    LINES.iter().find_map(|line| {
        let [a, b, c] = *line;
        let mark = grid[a.0][a.1];
        if mark != Mark::Empty && grid[b.0][b.1] == mark && grid[c.0][c.1] == mark {
            Some(WinningLine::new(
                mark,
                line.map(|(row, col)| Position::new(row, col)),
            ))
        } else {
            None
        }
    })
}

#[cfg(test)]
pub(crate) fn grid_from_rows(rows: [&str; 3]) -> Vec<Vec<Mark>> {
    rows.iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    'X' => Mark::X,
                    'O' => Mark::O,
                    _ => Mark::Empty,
                })
                .collect()
        })
        .collect()
}

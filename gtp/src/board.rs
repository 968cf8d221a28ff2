use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::Color;

/// A board diagram as rendered by the engine. The text is kept verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board(String);

impl Board {
    pub fn new(diagram: &str) -> Self {
        Self(diagram.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The stone grid, top row first, as far as the diagram follows the usual
    /// `<rank> <cells...> <rank>` layout. `X` is black and `O` is white.
    pub fn rows(&self) -> Vec<Vec<Option<Color>>> {
        self.ranked_rows().into_iter().map(|(_, row)| row).collect()
    }

    /// Looks up a vertex like "C3". Columns are lettered from A, skipping I.
    /// The outer `None` means the vertex isn't on the diagram.
    pub fn stone_at(&self, vertex: &str) -> Option<Option<Color>> {
        let mut chars = vertex.chars();
        let column = column_index(chars.next()?)?;
        let rank = chars.as_str().parse::<u32>().ok()?;

        self.ranked_rows()
            .into_iter()
            .find(|(r, _)| *r == rank)
            .and_then(|(_, row)| row.get(column).copied())
    }

    fn ranked_rows(&self) -> Vec<(u32, Vec<Option<Color>>)> {
        self.0
            .lines()
            .filter_map(|line| BOARD_ROW.captures(line))
            .filter_map(|c| {
                let rank = c.name("rank")?.as_str().parse::<u32>().ok()?;
                let row = c
                    .name("cells")?
                    .as_str()
                    .split_whitespace()
                    .map(|cell| match cell {
                        "X" => Some(Color::Black),
                        "O" => Some(Color::White),
                        _ => None,
                    })
                    .collect();
                Some((rank, row))
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn column_index(letter: char) -> Option<usize> {
    let letter = letter.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() || letter == 'I' {
        return None;
    }

    let index = letter as usize - 'A' as usize;
    Some(if letter > 'I' { index - 1 } else { index })
}

static BOARD_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?P<rank>\d+)(?P<cells>(?:\s+[.+XO])+)").unwrap());

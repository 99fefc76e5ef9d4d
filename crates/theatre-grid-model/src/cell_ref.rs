//! Cell reference parsing and formatting.
//!
//! Converts between spreadsheet-style references ("A1", "B2", "AA100") and
//! zero-indexed row/column positions, and parses "A1:C3" ranges.
//!
//! # Examples
//!
//! ```
//! use theatre_grid_model::CellRef;
//!
//! let cell: CellRef = "B3".parse().unwrap();
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use crate::rect::Rect;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A grid position by row and column (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn a1_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").unwrap())
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_regex().captures(name.trim())?;
        let col = Self::letters_to_col(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(row, col))
    }

    /// Convert column letters to an index ("A" -> 0, "AA" -> 26).
    pub fn letters_to_col(letters: &str) -> Option<usize> {
        if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        let mut col_acc = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        col_acc.checked_sub(1)
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

/// An inclusive range of cell references ("A1:C3"). A single reference is a
/// one-cell range.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn rect(&self) -> Rect {
        Rect::spanning(
            (self.start.row, self.start.col),
            (self.end.row, self.end.col),
        )
    }
}

impl std::str::FromStr for CellRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((a, b)) => Ok(CellRange {
                start: a.parse()?,
                end: b.parse()?,
            }),
            None => {
                let single: CellRef = s.parse()?;
                Ok(CellRange {
                    start: single,
                    end: single,
                })
            }
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_and_multi_letter_columns() {
        let a1: CellRef = "A1".parse().unwrap();
        assert_eq!((a1.row, a1.col), (0, 0));
        let z3: CellRef = "z3".parse().unwrap();
        assert_eq!((z3.row, z3.col), (2, 25));
        let ab10: CellRef = "AB10".parse().unwrap();
        assert_eq!((ab10.row, ab10.col), (9, 27));
    }

    #[test]
    fn test_parse_invalid_inputs() {
        for bad in ["", "123", "ABC", "A0", "1A", "A 1"] {
            assert!(bad.parse::<CellRef>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_parse_a1_overflow_is_rejected() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(huge.parse::<CellRef>().is_err());
    }

    #[test]
    fn test_col_to_letters() {
        assert_eq!(CellRef::col_to_letters(0), "A");
        assert_eq!(CellRef::col_to_letters(25), "Z");
        assert_eq!(CellRef::col_to_letters(26), "AA");
        assert_eq!(CellRef::letters_to_col("AA"), Some(26));
        assert_eq!(CellRef::letters_to_col("A1"), None);
    }

    #[test]
    fn test_range_parse_normalizes_rect() {
        let range: CellRange = "C3:A1".parse().unwrap();
        assert_eq!(range.rect(), Rect::new(0, 0, 3, 3));
        let single: CellRange = "B2".parse().unwrap();
        assert_eq!(single.rect(), Rect::new(1, 1, 1, 1));
        assert_eq!(single.to_string(), "B2");
    }
}

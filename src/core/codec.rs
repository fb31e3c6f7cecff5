//! Conversion between lattice positions and code strings.
//!
//! A position at internal precision `P = level + 2` is written as `P + 1`
//! balanced-ternary digits per axis, most significant first. Each x/y digit
//! pair forms one base-9 digit. The first three base-9 digits, read as a
//! decimal number `0..=888`, become two prefix letters; the rest are kept as
//! literal digit characters.

use crate::core::constants::{CODE_ALPHABET, MAX_LEVEL, PREFIX_RADIX};
use crate::core::grid::Position;
use crate::util::error::GeohexError;

/// Per-axis ternary digits (each 0, 1 or 2), most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digits {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

impl Digits {
    /// Base-9 digit at `index`.
    pub fn nonary(&self, index: usize) -> u8 {
        self.x[index] * 3 + self.y[index]
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

pub(crate) fn pow3(exp: usize) -> i64 {
    3_i64.pow(exp as u32)
}

fn ternary_digits(mut remainder: i64, precision: usize) -> Vec<u8> {
    let mut digits = Vec::with_capacity(precision + 1);

    for i in 0..=precision {
        let pow = pow3(precision - i);
        let half = (pow + 1) / 2;

        if remainder >= half {
            digits.push(2);
            remainder -= pow;
        } else if remainder <= -half {
            digits.push(0);
            remainder += pow;
        } else {
            digits.push(1);
        }
    }

    digits
}

/// Splits a lattice position into `precision + 1` ternary digits per axis.
pub fn xy_to_digits(position: Position, precision: usize) -> Digits {
    Digits {
        x: ternary_digits(position.x, precision),
        y: ternary_digits(position.y, precision),
    }
}

/// Renders digits as a code: two prefix letters followed by base-9 digits.
pub fn digits_to_code(digits: &Digits) -> String {
    let head = prefix_value(digits);

    let mut code = String::with_capacity(digits.len() - 1);
    code.push(CODE_ALPHABET[head / PREFIX_RADIX] as char);
    code.push(CODE_ALPHABET[head % PREFIX_RADIX] as char);
    for i in 3..digits.len() {
        code.push(char::from(b'0' + digits.nonary(i)));
    }

    code
}

fn prefix_value(digits: &Digits) -> usize {
    digits.nonary(0) as usize * 100 + digits.nonary(1) as usize * 10 + digits.nonary(2) as usize
}

/// Largest `|x|` or `|y|` that `level + 3` balanced-ternary digits can spell.
pub fn decodable_reach(level: u8) -> i64 {
    (pow3(level as usize + 3) - 1) / 2
}

fn prefix_index(c: char) -> Result<usize, GeohexError> {
    CODE_ALPHABET
        .iter()
        .position(|&b| b as char == c)
        .filter(|&idx| idx < PREFIX_RADIX)
        .ok_or(GeohexError::InvalidCodeCharacter(c))
}

/// Parses a code into its level and `level + 3` base-9 digits.
///
/// Codes whose first digit is 1 or 5 while the next two avoid 1, 2 and 5
/// name the same triangle as the 3/7 form; they are rewritten to that form
/// before padding.
pub fn parse_code(code: &str) -> Result<(u8, Vec<u8>), GeohexError> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 2 || chars.len() > MAX_LEVEL as usize + 2 {
        return Err(GeohexError::InvalidCodeLength(chars.len()));
    }
    let level = (chars.len() - 2) as u8;

    let head = prefix_index(chars[0])? * PREFIX_RADIX + prefix_index(chars[1])?;
    if head.to_string().contains('9') {
        return Err(GeohexError::MalformedCode(format!(
            "prefix {}{} does not encode base-9 digits",
            chars[0], chars[1]
        )));
    }

    let mut tail = Vec::with_capacity(chars.len() - 2);
    for &c in &chars[2..] {
        let d = c.to_digit(9).ok_or(GeohexError::InvalidCodeCharacter(c))?;
        tail.push(d as u8);
    }

    Ok((level, code_nonary(head, &tail, chars.len() + 1)))
}

/// The base-9 digits that [`parse_code`] reads back from the code of `digits`.
///
/// Differs from the digits themselves when the position lies beyond
/// [`decodable_reach`] or in an ambiguous boundary triangle.
pub fn reread_digits(digits: &Digits) -> Vec<u8> {
    let tail: Vec<u8> = (3..digits.len()).map(|i| digits.nonary(i)).collect();
    code_nonary(prefix_value(digits), &tail, digits.len())
}

fn code_nonary(head: usize, tail: &[u8], width: usize) -> Vec<u8> {
    let mut nonary: Vec<u8> = head.to_string().bytes().map(|b| b - b'0').collect();
    nonary.extend_from_slice(tail);

    let avoids = |d: Option<&u8>| matches!(d, Some(d) if ![1, 2, 5].contains(d));
    if matches!(nonary[0], 1 | 5) && avoids(nonary.get(1)) && avoids(nonary.get(2)) {
        nonary[0] = if nonary[0] == 5 { 7 } else { 3 };
    }

    let mut padded = vec![0u8; width - nonary.len()];
    padded.extend(nonary);
    padded
}

/// Rebuilds a lattice position from base-9 digits.
pub fn digits_to_xy(nonary: &[u8], precision: usize) -> Position {
    let step = |digit: u8, pow: i64| match digit {
        0 => -pow,
        2 => pow,
        _ => 0,
    };

    nonary
        .iter()
        .enumerate()
        .fold(Position::default(), |acc, (i, &d)| {
            let pow = pow3(precision - i);
            Position::new(acc.x + step(d / 3, pow), acc.y + step(d % 3, pow))
        })
}

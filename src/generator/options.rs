//! Generator Options
//!
//! Length bounds and character-class selection.

use std::num::IntErrorKind;

/// Smallest length a caller may request through [`GeneratorOptions`]
pub const MIN_LENGTH: usize = 4;
/// Largest length a caller may request through [`GeneratorOptions`]
pub const MAX_LENGTH: usize = 128;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Character class, in pool composition order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [Self::Lower, Self::Upper, Self::Digit, Self::Symbol];

    pub fn chars(&self) -> &'static str {
        match self {
            Self::Lower => LOWERCASE,
            Self::Upper => UPPERCASE,
            Self::Digit => DIGITS,
            Self::Symbol => SYMBOLS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lower => "a-z",
            Self::Upper => "A-Z",
            Self::Digit => "0-9",
            Self::Symbol => "!@#",
        }
    }
}

/// Set of selected character classes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClasses {
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl CharClasses {
    /// No class selected. Generates from the full pool.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            lower: true,
            upper: true,
            digit: true,
            symbol: true,
        }
    }

    pub fn only(class: CharClass) -> Self {
        Self::none().with(class, true)
    }

    pub fn with(mut self, class: CharClass, enabled: bool) -> Self {
        *self.flag_mut(class) = enabled;
        self
    }

    pub fn contains(&self, class: CharClass) -> bool {
        match class {
            CharClass::Lower => self.lower,
            CharClass::Upper => self.upper,
            CharClass::Digit => self.digit,
            CharClass::Symbol => self.symbol,
        }
    }

    pub fn toggle(&mut self, class: CharClass) {
        let flag = self.flag_mut(class);
        *flag = !*flag;
    }

    pub fn is_empty(&self) -> bool {
        !(self.lower || self.upper || self.digit || self.symbol)
    }

    /// Selected classes in composition order; all of them when none is set.
    pub fn effective(&self) -> Vec<CharClass> {
        if self.is_empty() {
            return CharClass::ALL.to_vec();
        }
        CharClass::ALL.into_iter().filter(|c| self.contains(*c)).collect()
    }

    fn flag_mut(&mut self, class: CharClass) -> &mut bool {
        match class {
            CharClass::Lower => &mut self.lower,
            CharClass::Upper => &mut self.upper,
            CharClass::Digit => &mut self.digit,
            CharClass::Symbol => &mut self.symbol,
        }
    }
}

/// User-facing generator settings with the length already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    length: usize,
    pub classes: CharClasses,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 20,
            classes: CharClasses::all(),
        }
    }
}

impl GeneratorOptions {
    /// Build options from raw input; `length` is clamped to
    /// `[MIN_LENGTH, MAX_LENGTH]`.
    pub fn new(length: i64, classes: CharClasses) -> Self {
        Self {
            length: clamp_length(length),
            classes,
        }
    }

    /// Parse a length typed by the user. Numbers out of range clamp, even
    /// past `i64`; anything else keeps the default.
    pub fn parse_length(raw: &str) -> usize {
        match raw.trim().parse::<i64>() {
            Ok(length) => clamp_length(length),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => MAX_LENGTH,
                IntErrorKind::NegOverflow => MIN_LENGTH,
                _ => Self::default().length,
            },
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn set_length(&mut self, length: i64) {
        self.length = clamp_length(length);
    }

    pub fn adjust_length(&mut self, delta: i64) {
        self.set_length(self.length as i64 + delta);
    }
}

pub fn clamp_length(length: i64) -> usize {
    length.clamp(MIN_LENGTH as i64, MAX_LENGTH as i64) as usize
}

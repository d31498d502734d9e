use crate::evaluator::Lookahead;

/// Single-character lookahead over one input string.
///
/// A cursor belongs to exactly one evaluation. It starts before the first
/// character and `new` performs the first advance, so `current` is always
/// the character at `position` (or `End` once the input is exhausted).
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    position: usize,
    current: Lookahead,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current = chars.first().copied().map_or(Lookahead::End, Lookahead::Char);
        Self {
            chars,
            position: 0,
            current,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Lookahead {
        self.current
    }

    pub fn at_end(&self) -> bool {
        self.current == Lookahead::End
    }

    /// Moves one character forward. Advancing past the end is a no-op beyond
    /// keeping `current` at `End`.
    pub fn advance(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
        self.current = self
            .chars
            .get(self.position)
            .copied()
            .map_or(Lookahead::End, Lookahead::Char);
    }

    /// Skips spaces, then consumes `expected` if it is next.
    ///
    /// Spaces are skipped only before a token, never inside one.
    pub fn consume_if_matches(&mut self, expected: char) -> bool {
        self.skip_spaces();
        if self.current.is_char(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn skip_spaces(&mut self) {
        while self.current.is_char(' ') {
            self.advance();
        }
    }

    /// Consumes the maximal run of characters accepted by `accept` and
    /// returns it.
    pub fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let start = self.position;
        while let Lookahead::Char(c) = self.current {
            if !accept(c) {
                break;
            }
            self.advance();
        }
        self.chars[start..self.position].iter().collect()
    }
}

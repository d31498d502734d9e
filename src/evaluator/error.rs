use std::fmt;
use thiserror::Error;

/// One character of lookahead, or the end of the input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lookahead {
    Char(char),
    End,
}

impl Lookahead {
    pub fn is_char(&self, expected: char) -> bool {
        *self == Lookahead::Char(expected)
    }

    pub fn is_number_start(&self) -> bool {
        matches!(self, Lookahead::Char(c) if c.is_ascii_digit() || *c == '.')
    }

    pub fn is_name_start(&self) -> bool {
        matches!(self, Lookahead::Char(c) if c.is_ascii_lowercase())
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::Char(c) => write!(f, "'{}'", c),
            Lookahead::End => write!(f, "end of input"),
        }
    }
}

/// Failure of a top-level evaluation.
///
/// `Syntax` covers malformed grammar, `Evaluation` covers input that parses
/// but cannot be resolved (an unknown function name). Numeric edge cases such
/// as division by zero are not errors: they surface as infinity or NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("{message}{}", describe_location(.found, .position))]
    Syntax {
        message: String,
        position: Option<usize>,
        found: Option<Lookahead>,
    },
    #[error("{message}")]
    Evaluation { message: String },
}

fn describe_location(found: &Option<Lookahead>, position: &Option<usize>) -> String {
    match (found, position) {
        (Some(Lookahead::End), Some(position)) => format!(" at position {}", position),
        (Some(found), Some(position)) => format!(": {} at position {}", found, position),
        (Some(found), None) => format!(": {}", found),
        (None, Some(position)) => format!(" at position {}", position),
        (None, None) => String::new(),
    }
}

impl EvalError {
    pub fn syntax(message: impl Into<String>) -> Self {
        EvalError::Syntax {
            message: message.into(),
            position: None,
            found: None,
        }
    }

    pub fn syntax_at(message: impl Into<String>, found: Lookahead, position: usize) -> Self {
        EvalError::Syntax {
            message: message.into(),
            position: Some(position),
            found: Some(found),
        }
    }

    pub fn unknown_function(name: &str) -> Self {
        EvalError::Evaluation {
            message: format!("unknown function: {}", name),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, EvalError::Syntax { .. })
    }

    pub fn is_evaluation(&self) -> bool {
        matches!(self, EvalError::Evaluation { .. })
    }

    /// The offending lookahead, when the failure is tied to one.
    pub fn found(&self) -> Option<Lookahead> {
        match self {
            EvalError::Syntax { found, .. } => *found,
            EvalError::Evaluation { .. } => None,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            EvalError::Syntax { position, .. } => *position,
            EvalError::Evaluation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_names_character_and_position() {
        let err = EvalError::syntax_at("unexpected character", Lookahead::Char('@'), 3);
        assert_eq!(err.to_string(), "unexpected character: '@' at position 3");
    }

    #[test]
    fn test_syntax_error_display_at_end_of_input() {
        let err = EvalError::syntax_at("unexpected end of input", Lookahead::End, 2);
        assert_eq!(err.to_string(), "unexpected end of input at position 2");
    }

    #[test]
    fn test_plain_syntax_error_display() {
        assert_eq!(
            EvalError::syntax("missing closing parenthesis").to_string(),
            "missing closing parenthesis"
        );
    }

    #[test]
    fn test_unknown_function_is_evaluation_error() {
        let err = EvalError::unknown_function("foo");
        assert!(err.is_evaluation());
        assert!(!err.is_syntax());
        assert_eq!(err.to_string(), "unknown function: foo");
        assert_eq!(err.found(), None);
    }
}

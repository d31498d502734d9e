use crate::evaluator::{Cursor, EvalError, Lookahead};
use crate::functions::{pow, MathFunction};
use log::trace;

/// Recursive-descent evaluator. Each rule returns the value of what it
/// consumed; no tree is built.
///
/// ```text
/// expression = term (('+' | '-') term)*
/// term       = factor (('*' | '/') factor)*
/// factor     = ('+' | '-') factor
///            | (group | number | call) ('^' factor)?
/// group      = '(' expression ')'
/// call       = name factor
///            | "pow" '(' expression ',' expression ')'
///            | "pow" factor '(' expression ')'
/// ```
pub(crate) struct Descent {
    cursor: Cursor,
    depth: usize,
}

/// Deepest chain of nested factors (parentheses, signs, function arguments,
/// exponents) accepted before evaluation gives up.
pub(crate) const MAX_DEPTH: usize = 500;

impl Descent {
    pub fn new(input: &str) -> Self {
        Self {
            cursor: Cursor::new(input),
            depth: 0,
        }
    }

    /// Evaluates the whole input; anything left after the top-level
    /// expression is an error.
    pub fn evaluate(mut self) -> Result<f64, EvalError> {
        let value = self.expression()?;
        if !self.cursor.at_end() {
            return Err(EvalError::syntax_at(
                "unexpected trailing input",
                self.cursor.current(),
                self.cursor.position(),
            ));
        }
        Ok(value)
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            if self.cursor.consume_if_matches('+') {
                value += self.term()?;
            } else if self.cursor.consume_if_matches('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        loop {
            if self.cursor.consume_if_matches('*') {
                value *= self.factor()?;
            } else if self.cursor.consume_if_matches('/') {
                // IEEE-754 semantics: x/0 is infinite or NaN.
                value /= self.factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            self.cursor.skip_spaces();
            return Err(EvalError::syntax_at(
                "expression nested too deeply",
                self.cursor.current(),
                self.cursor.position(),
            ));
        }
        self.depth += 1;
        let value = self.signed_factor();
        self.depth -= 1;
        value
    }

    fn signed_factor(&mut self) -> Result<f64, EvalError> {
        if self.cursor.consume_if_matches('+') {
            return self.factor();
        }
        if self.cursor.consume_if_matches('-') {
            return Ok(-self.factor()?);
        }

        let start = self.cursor.position();
        let base = if self.cursor.consume_if_matches('(') {
            let inner = self.expression()?;
            self.expect_closing_paren()?;
            inner
        } else if self.cursor.current().is_number_start() {
            self.number(start)?
        } else if self.cursor.current().is_name_start() {
            self.call()?
        } else {
            return Err(self.unexpected());
        };

        if self.cursor.consume_if_matches('^') {
            let exponent = self.factor()?;
            trace!("{} ^ {}", base, exponent);
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn number(&mut self, start: usize) -> Result<f64, EvalError> {
        let literal = self.cursor.take_while(|c| c.is_ascii_digit() || c == '.');
        literal.parse::<f64>().map_err(|_| EvalError::Syntax {
            message: format!("malformed number '{}'", literal),
            position: Some(start),
            found: None,
        })
    }

    fn call(&mut self) -> Result<f64, EvalError> {
        let name = self.cursor.take_while(|c| c.is_ascii_lowercase());
        trace!("calling {}", name);
        match MathFunction::try_from(name.as_str()) {
            Ok(MathFunction::Pow) => self.pow_arguments(),
            Ok(MathFunction::Unary(function)) => Ok(function.apply(self.factor()?)),
            Err(unknown) => {
                // The argument is still consumed so its syntax errors win.
                self.factor()?;
                Err(unknown)
            }
        }
    }

    /// `pow(x, y)`, or `pow x (y)` where `x` is any factor, e.g. `pow(2)(3)`
    /// or `pow(2)^2(3)`.
    fn pow_arguments(&mut self) -> Result<f64, EvalError> {
        self.cursor.skip_spaces();
        let base = if self.cursor.current().is_char('(') {
            match self.pow_parenthesized()? {
                PowArgs::Both(base, exponent) => return Ok(pow(base, exponent)),
                PowArgs::Base(base) => base,
            }
        } else {
            self.factor()?
        };

        if !self.cursor.consume_if_matches('(') {
            return Err(EvalError::syntax("expected '(' after pow"));
        }
        let exponent = self.expression()?;
        if !self.cursor.consume_if_matches(')') {
            return Err(EvalError::syntax("expected ')' after pow arguments"));
        }
        Ok(pow(base, exponent))
    }

    /// Reads `(x, y)` or the factor `(x)` with its optional `^` tail.
    fn pow_parenthesized(&mut self) -> Result<PowArgs, EvalError> {
        self.cursor.consume_if_matches('(');
        let first = self.expression()?;
        if self.cursor.consume_if_matches(',') {
            let exponent = self.expression()?;
            if !self.cursor.consume_if_matches(')') {
                return Err(EvalError::syntax("expected ')' after pow arguments"));
            }
            return Ok(PowArgs::Both(first, exponent));
        }
        self.expect_closing_paren()?;
        if self.cursor.consume_if_matches('^') {
            let exponent = self.factor()?;
            return Ok(PowArgs::Base(first.powf(exponent)));
        }
        Ok(PowArgs::Base(first))
    }

    fn expect_closing_paren(&mut self) -> Result<(), EvalError> {
        if self.cursor.consume_if_matches(')') {
            Ok(())
        } else {
            Err(EvalError::syntax_at(
                "missing closing parenthesis",
                self.cursor.current(),
                self.cursor.position(),
            ))
        }
    }

    fn unexpected(&self) -> EvalError {
        let found = self.cursor.current();
        let message = match found {
            Lookahead::End => "unexpected end of input",
            Lookahead::Char(_) => "unexpected character",
        };
        EvalError::syntax_at(message, found, self.cursor.position())
    }
}

enum PowArgs {
    Both(f64, f64),
    Base(f64),
}

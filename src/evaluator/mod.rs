use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::*;
use grammar::Descent;

/// Evaluates one expression. Every call gets its own cursor, so calls never
/// observe each other.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    debug!("Evaluating expression: {}", input);
    let result = Descent::new(input).evaluate();
    debug!("Evaluation result: {:?}", result);
    result
}

/// Renders a result the way the calculator prints and records it.
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        let shortest = format!("{:?}", value);
        match shortest.split_once('e') {
            // Exponent forms keep a fractional mantissa: 1e16 -> 1.0e16.
            Some((mantissa, exponent)) if !mantissa.contains('.') => {
                format!("{}.0e{}", mantissa, exponent)
            }
            _ => shortest,
        }
    }
}

/// Session evaluator that remembers recent successful results.
pub struct Evaluator {
    cache: Option<LruCache<String, f64>>,
}

impl Evaluator {
    /// Creates a new `Evaluator` with a given maximum cache size. A size of
    /// zero disables caching.
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(max_cache_size).map(LruCache::new),
        }
    }

    /// Evaluates a given expression string, reusing a cached result when the
    /// same (trimmed) expression was evaluated before.
    ///
    /// # Arguments
    ///
    /// * `expression` - A string slice that holds the expression to be evaluated.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the evaluation succeeds.
    /// * `Err(EvalError)` if parsing or evaluation fails. Failures are not cached.
    pub fn evaluate_expression(&mut self, expression: &str) -> Result<f64, EvalError> {
        let expression = expression.trim();
        if let Some(cache) = self.cache.as_mut() {
            if let Some(value) = cache.get(expression) {
                debug!("Cache hit: {}", expression);
                return Ok(*value);
            }
        }

        let value = evaluate(expression)?;
        if let Some(cache) = self.cache.as_mut() {
            cache.put(expression.to_string(), value);
        }
        Ok(value)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(100)
    }
}

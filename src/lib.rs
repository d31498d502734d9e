pub mod evaluator;
pub mod functions;
pub mod history;
pub mod monitor;
pub mod repl;

use rayon::prelude::*;

pub use evaluator::{evaluate, format_result, EvalError, Evaluator};
pub use functions::MathFunction;

pub fn evaluate_expression(expression: &str) -> Result<f64, EvalError> {
    evaluate(expression.trim())
}

/// Evaluates independent expressions in parallel. Results come back in input
/// order.
pub fn evaluate_batch<S>(expressions: &[S]) -> Vec<Result<f64, EvalError>>
where
    S: AsRef<str> + Sync,
{
    expressions
        .par_iter()
        .map(|expression| evaluate_expression(expression.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_arithmetic<R: Rng>(rng: &mut R, depth: u32) -> String {
        if depth == 0 || rng.random_bool(0.3) {
            return rng.random_range(1..100).to_string();
        }
        let left = random_arithmetic(rng, depth - 1);
        let right = random_arithmetic(rng, depth - 1);
        match rng.random_range(0..5) {
            0 => format!("{} + {}", left, right),
            1 => format!("{}-{}", left, right),
            2 => format!("{} * {}", left, right),
            3 => format!("{}/{}", left, right),
            _ => format!("({})", left),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a.is_nan() && b.is_nan()) || a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
    }

    #[test]
    fn test_matches_meval_on_plain_arithmetic() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let expression = random_arithmetic(&mut rng, 4);
            let ours = evaluate_expression(&expression).unwrap();
            let theirs = meval::eval_str(&expression).unwrap();
            assert!(
                close(ours, theirs),
                "{} evaluated to {} but meval gave {}",
                expression,
                ours,
                theirs
            );
        }
    }

    #[test]
    fn test_fixed_expressions_against_meval() {
        for expression in ["2+3*4", "2*3+4", "10-2-3", "10/2/5", "(1+2)*3", "-5+3"] {
            assert_eq!(
                evaluate_expression(expression).unwrap(),
                meval::eval_str(expression).unwrap(),
                "{}",
                expression
            );
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let results = evaluate_batch(&["2+3*4", "foo(1)", "pow(2,3)", "abs(-5)"]);
        assert_eq!(results[0], Ok(14.0));
        assert_eq!(results[1], Err(EvalError::unknown_function("foo")));
        assert_eq!(results[2], Ok(8.0));
        assert_eq!(results[3], Ok(5.0));
    }

    #[test]
    fn test_batch_agrees_with_sequential_evaluation() {
        let expressions: Vec<String> = (0..200)
            .map(|i| format!("{}*{}+sqrt({})", i, i, i))
            .collect();
        let sequential: Vec<_> = expressions.iter().map(|e| evaluate_expression(e)).collect();
        assert_eq!(evaluate_batch(&expressions), sequential);
    }

    #[test]
    fn test_hostile_nesting_fails_in_batch_workers() {
        let deep = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
        let signs = format!("{}1", "-".repeat(200_000));
        for result in evaluate_batch(&[deep, signs]) {
            let err = result.unwrap_err();
            assert!(err.to_string().starts_with("expression nested too deeply"));
        }
    }

    #[test]
    fn test_evaluate_expression_trims() {
        assert_eq!(evaluate_expression(" 2 + 3 ").unwrap(), 5.0);
    }
}

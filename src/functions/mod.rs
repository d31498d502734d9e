use crate::evaluator::EvalError;
use std::fmt;

/// Single-argument functions. Out-of-domain arguments yield NaN or infinity,
/// never an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    Sqrt,
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    Abs,
}

impl UnaryFunction {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Log => "log",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Abs => "abs",
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            UnaryFunction::Sqrt => x.sqrt(),
            UnaryFunction::Sin => x.sin(),
            UnaryFunction::Cos => x.cos(),
            UnaryFunction::Tan => x.tan(),
            UnaryFunction::Log => x.log10(),
            UnaryFunction::Ln => x.ln(),
            UnaryFunction::Abs => x.abs(),
        }
    }
}

/// `pow(base, exponent)`.
pub fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// The fixed table of named functions an expression may call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Unary(UnaryFunction),
    Pow,
}

impl MathFunction {
    pub const ALL: [MathFunction; 8] = [
        MathFunction::Unary(UnaryFunction::Sqrt),
        MathFunction::Unary(UnaryFunction::Sin),
        MathFunction::Unary(UnaryFunction::Cos),
        MathFunction::Unary(UnaryFunction::Tan),
        MathFunction::Unary(UnaryFunction::Log),
        MathFunction::Unary(UnaryFunction::Ln),
        MathFunction::Unary(UnaryFunction::Abs),
        MathFunction::Pow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Unary(function) => function.name(),
            MathFunction::Pow => "pow",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            MathFunction::Unary(_) => 1,
            MathFunction::Pow => 2,
        }
    }
}

impl TryFrom<&str> for MathFunction {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MathFunction::ALL
            .iter()
            .copied()
            .find(|function| function.name() == value)
            .ok_or_else(|| EvalError::unknown_function(value))
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_names() {
        for function in MathFunction::ALL {
            assert_eq!(MathFunction::try_from(function.name()), Ok(function));
        }
        assert_eq!(MathFunction::try_from("pow"), Ok(MathFunction::Pow));
        assert_eq!(
            MathFunction::try_from("ln"),
            Ok(MathFunction::Unary(UnaryFunction::Ln))
        );
    }

    #[test]
    fn test_lookup_unknown_name() {
        let err = MathFunction::try_from("foo").unwrap_err();
        assert!(err.is_evaluation());
        assert_eq!(err.to_string(), "unknown function: foo");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(MathFunction::try_from("SQRT").is_err());
    }

    #[test]
    fn test_unary_functions() {
        assert_eq!(UnaryFunction::Sqrt.apply(16.0), 4.0);
        assert_eq!(UnaryFunction::Abs.apply(-5.0), 5.0);
        assert_eq!(UnaryFunction::Log.apply(100.0), 2.0);
        assert_eq!(UnaryFunction::Ln.apply(1.0), 0.0);
        assert_eq!(UnaryFunction::Sin.apply(0.0), 0.0);
        assert_eq!(UnaryFunction::Cos.apply(0.0), 1.0);
        assert_eq!(UnaryFunction::Tan.apply(0.0), 0.0);
    }

    #[test]
    fn test_out_of_domain_is_not_an_error() {
        assert!(UnaryFunction::Sqrt.apply(-1.0).is_nan());
        assert!(UnaryFunction::Log.apply(-1.0).is_nan());
        assert_eq!(UnaryFunction::Ln.apply(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_arity() {
        assert_eq!(MathFunction::Pow.arity(), 2);
        assert_eq!(MathFunction::Unary(UnaryFunction::Abs).arity(), 1);
        assert_eq!(pow(2.0, 3.0), 8.0);
    }
}

use log::debug;
use scicalc_rs::evaluator::{evaluate, format_result, EvalError};

fn main() {
    pretty_env_logger::init();

    let expressions = [
        "2+3*4", "(1+2)*3", "2^3^2", "pow(2,3)", "sqrt(16)^2", "1/0", "(1+2", "foo(1)",
    ];

    for expr in expressions {
        let result = evaluate(expr);
        debug!("{expr}: {result:?}");

        match result {
            Ok(value) => println!("{expr} = {}", format_result(value)),
            Err(err @ EvalError::Syntax { .. }) => println!("{expr}: syntax error: {err}"),
            Err(err @ EvalError::Evaluation { .. }) => println!("{expr}: evaluation error: {err}"),
        }
    }
}

use scicalc_rs::{evaluate_batch, format_result, Evaluator};

fn main() {
    pretty_env_logger::init();

    let expressions: Vec<String> = (1..=10).map(|i| format!("sqrt({i})*pow({i},2)")).collect();

    for (i, result) in evaluate_batch(&expressions).into_iter().enumerate() {
        match result {
            Ok(value) => println!("Result {}: {}", i, format_result(value)),
            Err(err) => println!("Result {}: Error: {}", i, err),
        }
    }

    let mut evaluator = Evaluator::new(16);
    for expression in expressions.iter().chain(expressions.iter()) {
        evaluator.evaluate_expression(expression).unwrap();
    }
    println!("cached results: {}", evaluator.cached_len());
}

use clap::Parser;
use log::debug;
use scicalc_rs::history::{
    CalculationLog, History, HistoryRecord, DEFAULT_LOG_FILE, DEFAULT_RECENT_CAPACITY,
};
use scicalc_rs::repl::Repl;
use scicalc_rs::{evaluate_batch, format_result, Evaluator};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scicalc", about = "Scientific calculator", version)]
struct Cli {
    /// File that every successful calculation is appended to
    #[arg(long, env = "SCICALC_HISTORY_FILE", default_value = DEFAULT_LOG_FILE)]
    history_file: PathBuf,
    /// Number of calculations kept for the `history` command
    #[arg(long, default_value_t = DEFAULT_RECENT_CAPACITY)]
    recent: usize,
    /// Results remembered per session (0 disables the cache)
    #[arg(long, default_value_t = 100)]
    cache_size: usize,
    /// Skip the usage banner
    #[arg(long)]
    no_banner: bool,
    /// Evaluate these expressions and exit instead of starting a session
    expressions: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    let history = History::new(CalculationLog::new(&cli.history_file), cli.recent);

    if !cli.expressions.is_empty() {
        let failed = run_batch(&cli.expressions, history);
        std::process::exit(if failed { 1 } else { 0 });
    }

    let stdin = io::stdin();
    let mut repl = Repl::new(
        stdin.lock(),
        io::stdout(),
        Evaluator::new(cli.cache_size),
        history,
    );
    repl.run(!cli.no_banner)?;
    Ok(())
}

/// Returns whether any expression failed.
fn run_batch(expressions: &[String], mut history: History) -> bool {
    let mut failed = false;
    for (expression, result) in expressions.iter().zip(evaluate_batch(expressions)) {
        match result {
            Ok(value) => {
                println!("{} = {}", expression.trim(), format_result(value));
                let record = HistoryRecord::new(expression.trim(), value);
                if let Err(err) = history.record(record.to_string()) {
                    eprintln!("Error writing to file: {}", err);
                }
            }
            Err(err) => {
                failed = true;
                eprintln!("{}: Error: {}", expression.trim(), err);
            }
        }
    }
    failed
}

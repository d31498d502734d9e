use crate::evaluator::{format_result, Evaluator};
use crate::history::{History, HistoryRecord};
use log::warn;
use std::io::{self, BufRead, Write};

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    History,
    ClearHistory,
    Load,
    Empty,
    Evaluate(String),
}

impl Command {
    /// Commands are matched case-insensitively; anything else is an
    /// expression.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => Command::Empty,
            "exit" | "quit" => Command::Exit,
            "history" => Command::History,
            "clear history" => Command::ClearHistory,
            "load" => Command::Load,
            _ => Command::Evaluate(line.to_string()),
        }
    }
}

pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Scientific Calculator")?;
    writeln!(out, "Supported operations:")?;
    writeln!(out, "  +  -  *  /  ^  ( )")?;
    writeln!(out, "Supported functions:")?;
    writeln!(out, "  sin(x)   cos(x)   tan(x)")?;
    writeln!(out, "  log(x) - base 10 logarithm")?;
    writeln!(out, "  ln(x)  - natural logarithm")?;
    writeln!(out, "  sqrt(x)  abs(x)")?;
    writeln!(out, "  pow(base, exponent)")?;
    writeln!(out)?;
    writeln!(out, "Examples:")?;
    for example in ["2+3*4", "sin(0.5)", "pow(2,3)", "(1+2)*3", "sqrt(16)"] {
        writeln!(out, "  {}", example)?;
    }
    writeln!(out)?;
    writeln!(out, "Special commands:")?;
    writeln!(out, "  history         - Show recent calculations")?;
    writeln!(out, "  clear history   - Clear calculation history")?;
    writeln!(out, "  load            - Load previous calculations from file")?;
    writeln!(out, "  exit / quit     - Exit the program")?;
    writeln!(out)
}

/// Interactive read-eval-print loop over any line source and sink.
pub struct Repl<R, W> {
    input: R,
    output: W,
    evaluator: Evaluator,
    history: History,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, evaluator: Evaluator, history: History) -> Self {
        Self {
            input,
            output,
            evaluator,
            history,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `exit`/`quit` or end of input. Evaluation failures are
    /// printed and never end the loop.
    pub fn run(&mut self, show_banner: bool) -> io::Result<()> {
        if show_banner {
            write_usage(&mut self.output)?;
            writeln!(self.output, "Enter expression (or type 'exit' to quit):")?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            match Command::parse(&line) {
                Command::Exit => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                Command::History => self.show_history()?,
                Command::ClearHistory => {
                    self.history.clear();
                    writeln!(self.output, "History cleared.")?;
                }
                Command::Load => self.show_saved()?,
                Command::Empty => {}
                Command::Evaluate(expression) => self.evaluate(&expression)?,
            }
        }
    }

    /// Evaluates one expression, prints the outcome and records successes.
    pub fn evaluate(&mut self, expression: &str) -> io::Result<()> {
        match self.evaluator.evaluate_expression(expression) {
            Ok(value) => {
                writeln!(self.output, "Result = {}", format_result(value))?;
                self.record(HistoryRecord::new(expression, value))
            }
            Err(err) => writeln!(self.output, "Error: {}", err),
        }
    }

    fn record(&mut self, record: HistoryRecord) -> io::Result<()> {
        if let Err(err) = self.history.record(record.to_string()) {
            warn!("Failed to persist calculation: {}", err);
            writeln!(self.output, "Error writing to file: {}", err)?;
        }
        Ok(())
    }

    fn show_history(&mut self) -> io::Result<()> {
        if self.history.is_empty() {
            return writeln!(self.output, "History is empty.");
        }
        writeln!(
            self.output,
            "Last {} calculations:",
            self.history.capacity()
        )?;
        for entry in self.history.recent() {
            writeln!(self.output, "{}", entry)?;
        }
        Ok(())
    }

    fn show_saved(&mut self) -> io::Result<()> {
        match self.history.load() {
            Ok(None) => writeln!(self.output, "No saved calculations found."),
            Ok(Some(records)) => {
                writeln!(self.output, "Saved Calculations:")?;
                for record in records {
                    writeln!(self.output, "{}", record)?;
                }
                Ok(())
            }
            Err(err) => {
                warn!("Failed to load calculations: {}", err);
                writeln!(self.output, "Error reading from file: {}", err)
            }
        }
    }
}

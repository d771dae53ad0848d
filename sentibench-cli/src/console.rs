//! Interactive analyze console
//!
//! A readline loop over an [`AnalyzeSession`]: free text is sent to the
//! service, a few keywords inspect the session. The terminal counterpart of
//! a submit-box front end.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sentibench_client::{AnalyzeSession, SentimentService, SubmitError};

pub async fn run<S: SentimentService>(mut session: AnalyzeSession<S>) -> Result<()> {
    println!("{}", "Sentibench analyze console".bold());
    println!("Type text to analyze it. Commands: history, clear, exit");

    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("sentiment> ") {
            Ok(line) => {
                let input = line.trim();
                match input {
                    "" => continue,
                    "exit" | "quit" => break,
                    "history" => print_history(&session),
                    "clear" => {
                        session.clear_history();
                        println!("History cleared");
                    }
                    _ => {
                        let _ = editor.add_history_entry(input);
                        analyze_line(&mut session, input).await;
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

async fn analyze_line<S: SentimentService>(session: &mut AnalyzeSession<S>, input: &str) {
    match session.submit(input).await {
        Ok(result) if result.is_failure() => {
            println!("{}", "Analysis failed; is the service reachable?".red());
        }
        Ok(result) => {
            println!(
                "Sentiment: {} (confidence: {:.1}%)",
                result.label.bold(),
                result.confidence * 100.0
            );
        }
        // Blank lines are filtered above; this covers whitespace-only input
        Err(SubmitError::EmptyText) => {}
        Err(SubmitError::RequestInFlight) => {
            println!("{}", "Previous analysis still running".yellow());
        }
    }
}

fn print_history<S: SentimentService>(session: &AnalyzeSession<S>) {
    let history = session.history();
    if history.is_empty() {
        println!("No analyses yet");
        return;
    }

    for entry in history {
        println!(
            "{}  {}  {}",
            entry.timestamp.dimmed(),
            entry.label.bold(),
            entry.text
        );
    }
}

//! Interactive play loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use delve_engine::{GameSession, Outcome, RenderedResult, SessionConfig};

/// Commands handled here rather than by the engine.
#[derive(Debug, PartialEq, Eq)]
enum OutOfBand {
    Quit,
    Narration(bool),
}

fn out_of_band(input: &str) -> Option<OutOfBand> {
    let words: Vec<String> = input.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    match words.as_slice() {
        ["quit"] | ["exit"] => Some(OutOfBand::Quit),
        ["narrate", "on"] => Some(OutOfBand::Narration(true)),
        ["narrate", "off"] => Some(OutOfBand::Narration(false)),
        _ => None,
    }
}

pub fn run(path: &Path, config: SessionConfig) -> Result<(), String> {
    let world = super::load_world(path)?;
    let mut session =
        GameSession::new(world, config).map_err(|e| format!("failed to start session: {e}"))?;

    println!("  {} {}", "Playing".bold(), session.world().meta().title);
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", session.look().text);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match out_of_band(input) {
            Some(OutOfBand::Quit) => break,
            Some(OutOfBand::Narration(on)) => {
                if session.has_narrator() {
                    session.set_narration(on);
                    println!("Narration {}.\n", if on { "on" } else { "off" });
                } else {
                    let note = "Narration is not available: no narrator is installed.";
                    println!("{}\n", note.yellow());
                }
                continue;
            }
            None => {}
        }

        let result = session.submit_command(input);
        print_result(&result);
        if result.game_over {
            println!("  {}", "The End.".bold());
            break;
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_result(result: &RenderedResult) {
    if result.text.is_empty() {
        return;
    }
    match result.outcome {
        Outcome::Success => println!("{}\n", result.text),
        Outcome::NotUnderstood => println!("{}\n", result.text.yellow()),
        Outcome::NotFound | Outcome::NotPossible | Outcome::NoEffect => {
            println!("{}\n", result.text.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_band_commands() {
        assert_eq!(out_of_band("quit"), Some(OutOfBand::Quit));
        assert_eq!(out_of_band(" EXIT "), Some(OutOfBand::Quit));
        assert_eq!(out_of_band("narrate off"), Some(OutOfBand::Narration(false)));
        assert_eq!(out_of_band("Narrate On"), Some(OutOfBand::Narration(true)));
        assert_eq!(out_of_band("look"), None);
        assert_eq!(out_of_band("quit now"), None);
    }
}

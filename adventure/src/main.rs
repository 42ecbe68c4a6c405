//! Interactive adventure REPL.
//!
//! Prints the opening scene, then loops: read a player action, run one turn
//! through the pipeline, print the narrative and the updated history, and
//! carry that history into the next turn. The loop owns the cross-turn
//! state; the pipeline itself is stateless.

use adventure_core::{OllamaBackend, Session, TurnPipeline};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let mut client = ollama::Ollama::from_env();
    if let Ok(model) = std::env::var("ADVENTURE_MODEL") {
        client = client.with_model(model);
    }

    let backend = Arc::new(OllamaBackend::new(client));
    let mut session = Session::new(TurnPipeline::new(backend));

    println!("{}", session.history());
    println!();
    println!("(Type #quit to leave, #history to reread the story so far.)");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("What do you do?: ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let action = line.trim();
        if action.is_empty() {
            continue;
        }

        if action.starts_with('#') {
            match action {
                "#quit" | "#exit" => {
                    println!("Goodbye!");
                    break;
                }
                "#history" => {
                    println!();
                    println!("<history>");
                    println!("{}", session.history());
                    println!("</history>");
                    println!();
                }
                "#help" => {
                    print_help();
                }
                _ => {
                    println!("[ERROR] Unknown command. Type #help for help.");
                }
            }
            continue;
        }

        match session.play(action).await {
            Ok(output) => {
                println!();
                println!("{}", output.narrative);
                println!();

                if let Some(warning) = output.compaction_error {
                    println!("[WARN] History was not updated this turn: {warning}");
                    println!();
                }
            }
            Err(e) => {
                println!("[ERROR] {e}");
                println!("[ERROR] Nothing happened; try again.");
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("adventure - AI-driven text adventure");
    println!();
    println!("USAGE:");
    println!("  adventure [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help   Show this help message");
    println!();
    println!("COMMANDS (at the prompt):");
    println!("  #quit        Exit the game");
    println!("  #history     Show the story summary so far");
    println!("  #help        Show this help");
    println!("  (anything else is your next action)");
    println!();
    println!("ENVIRONMENT:");
    println!("  OLLAMA_HOST       Ollama base URL (default http://localhost:11434)");
    println!("  ADVENTURE_MODEL   Model name (default llama3.2:3b)");
}

//! Desktop answer assistant core
//!
//! CLI front end over the provider gateway: resolves public-IP geolocation
//! with provider fallback, forwards questions to one of three chat
//! providers, and extracts text from images via OCR.space. The desktop
//! product wraps this same surface in a tray GUI; the CLI exercises it end
//! to end.

mod core;
mod gateway;
mod geo;
mod models;
#[cfg(test)]
mod testutil;

use crate::core::config::ConfigStore;
use crate::core::logging::init_logging;
use crate::gateway::Gateway;
use std::path::Path;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "--help" {
        print_help();
        return;
    }

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let store = match ConfigStore::load(&config_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Configuration Error: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&store.snapshot().log_level);

    let gateway = Gateway::new(store.clone());

    match args[0].as_str() {
        "ask" if args.len() >= 3 => {
            let prompt = args[2..].join(" ");
            let answer = gateway.generate_text(&prompt, &args[1]).await;
            if answer.is_empty() {
                println!("No answer available.");
            } else {
                println!("{answer}");
            }
        }
        "ocr" if args.len() >= 2 => {
            let provider = args.get(2).map(String::as_str).unwrap_or("ocrspace");
            match gateway.ocr_extract(Path::new(&args[1]), provider).await {
                Ok(text) if text.is_empty() => println!("No text recognized."),
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        "session" if args.len() == 2 => {
            // One question per stdin line, like the desktop window's
            // ask-and-review loop.
            let stdin = std::io::stdin();
            let mut line = String::new();
            loop {
                line.clear();
                if stdin.read_line(&mut line).unwrap_or(0) == 0 {
                    break;
                }
                let prompt = line.trim();
                if prompt.is_empty() {
                    continue;
                }
                let answer = gateway.generate_text(prompt, &args[1]).await;
                if answer.is_empty() {
                    println!("No answer available.");
                } else {
                    println!("{answer}");
                }
                println!("Recent: {}", gateway.recent_questions().join(" | "));
            }
        }
        "location" => {
            println!("{}", gateway.resolve_location().await.summary());
        }
        "set-key" if args.len() == 3 => {
            let result = store
                .set_api_key(&args[1], &args[2])
                .and_then(|_| store.reload());
            match result {
                Ok(()) => println!("Saved API key for {}", args[1]),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        _ => print_help(),
    }
}

/// Print help message
fn print_help() {
    println!("answerdesk v0.1.0");
    println!();
    println!("Usage: answerdesk <COMMAND> [ARGS]");
    println!();
    println!("Commands:");
    println!("  ask <provider> <prompt...>   Generate an answer (openrouter, gemini, cerebras)");
    println!("  session <provider>           Interactive question loop over stdin");
    println!("  ocr <image> [provider]       Extract text from an image (ocrspace)");
    println!("  location                     Show public-IP geolocation");
    println!("  set-key <provider> <key>     Store an API key in the config file");
    println!("  --help                       Display this help message");
    println!();
    println!("Environment variables:");
    println!("  CONFIG_PATH - Path to the TOML config file (default: config.toml)");
    println!("  RUST_LOG    - Override the configured log level");
}

use crate::{chat::ChatSession, llm, store};
use anyhow::Result;
use chrono::Utc;
use std::io::Write;
use std::time::Duration;
use tokio::io::{self, AsyncBufReadExt};
use tracing::{info, warn};

use super::shared::load_chat_cfg;

/// What the user typed, once slash commands are recognized.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Clear,
    Location(&'a str),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => Input::Quit,
        "/clear" => Input::Clear,
        _ => match trimmed.strip_prefix("/location") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                Input::Location(rest.trim())
            }
            _ => Input::Message(line),
        },
    }
}

fn print_bubble(text: &str) {
    println!("\n🤖 {text}\n");
    std::io::stdout().flush().ok();
}

pub(super) async fn run() -> Result<()> {
    let cfg = load_chat_cfg();
    let llm = llm::CompletionClient::from_env();
    let mut chat = ChatSession::from_env();
    info!("Chat config: {chat}");
    info!("LLM: {llm}");

    let db = if cfg.transcript.enabled {
        Some(store::open_db(&cfg.transcript.db_path)?)
    } else {
        None
    };
    let session_id = format!("chat-{}", Utc::now().timestamp_millis());
    let mut saved = 0usize;

    print_bubble(&chat.welcome());
    println!("(commands: /location NAME, /clear, /quit)");

    let mut stdin = io::BufReader::new(io::stdin());
    loop {
        print!("🧑 ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.read_line(&mut line).await? == 0 {
            info!("stdin closed.");
            break;
        }

        let reply = match parse_input(&line) {
            Input::Quit => break,
            Input::Clear => {
                chat.clear();
                saved = 0;
                println!("(transcript cleared)");
                continue;
            }
            Input::Location(loc) => {
                chat.set_location(loc);
                info!("Location set to {:?}", chat.location());
                continue;
            }
            Input::Message(text) => {
                let text = text.trim_end_matches(['\r', '\n']);
                match chat.respond_with_llm(text, &llm).await {
                    Some(reply) => reply,
                    None => continue,
                }
            }
        };

        if cfg.typing_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(cfg.typing_delay_ms)).await;
        }
        print_bubble(&reply);

        if let Some(db) = &db {
            for turn in &chat.transcript()[saved..] {
                if let Err(e) = store::save_turn(db, &session_id, turn) {
                    warn!("Failed to save transcript turn: {e}");
                }
            }
        }
        saved = chat.transcript().len();
    }

    info!("Chat ended after {} bubbles.", chat.transcript().len());
    Ok(())
}

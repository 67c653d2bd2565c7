use crate::{chat::ChatSession, dispatch::Category, llm};
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::info;

use super::shared::{load_replay_cfg, load_replay_events};

/// Answer one recorded utterance.  Each event is its own exchange, so the
/// transcript is emptied once the category has been read back.
async fn replay_utterance(
    chat: &mut ChatSession,
    llm: &llm::CompletionClient,
    text: &str,
) -> Option<(Category, String)> {
    let reply = chat.respond_with_llm(text, llm).await?;
    let category = chat
        .transcript()
        .last()
        .and_then(|t| t.category)
        .unwrap_or(Category::Unmatched);
    chat.clear();
    Some((category, reply))
}

pub(super) async fn run() -> Result<()> {
    let replay = load_replay_cfg()?;
    let events = load_replay_events(&replay.input_path)?;
    if events.is_empty() {
        return Err(anyhow!("Replay input is empty: {}", replay.input_path));
    }

    let llm = llm::CompletionClient::from_env();
    let mut chat = ChatSession::from_env();
    info!(
        "Replay started: {} utterances from {}",
        events.len(),
        replay.input_path
    );
    info!("Chat config: {chat}");
    info!("LLM: {llm}");

    let mut tally: BTreeMap<Category, usize> = Category::ALL.iter().map(|&c| (c, 0)).collect();
    let mut skipped = 0usize;

    for (idx, event) in events.iter().enumerate() {
        if idx > 0 {
            let delay_ms = replay.delay_ms(event.timestamp - events[idx - 1].timestamp);
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }

        if let Some(location) = &event.location {
            chat.set_location(location.as_str());
        }

        match replay_utterance(&mut chat, &llm, &event.text).await {
            Some((category, reply)) => {
                *tally.entry(category).or_default() += 1;
                println!(
                    "\n[REPLAY {} · {} {}] 🧑 {}\n🤖 {}\n",
                    idx + 1,
                    category.emoji(),
                    category.label(),
                    event.text,
                    reply
                );
            }
            None => skipped += 1,
        }
    }

    let summary = tally
        .iter()
        .map(|(c, n)| format!("{}={n}", c.variant_name()))
        .collect::<Vec<_>>()
        .join(", ");
    info!(
        "Replay complete: total={}, skipped={}, categories: {}",
        events.len(),
        skipped,
        summary
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn each_utterance_starts_from_an_empty_transcript() {
        let llm = llm::CompletionClient::disabled();
        let mut chat = ChatSession::new("Cebu");

        let (category, _) = replay_utterance(&mut chat, &llm, "may baha dito")
            .await
            .unwrap();
        assert_eq!(category, Category::Flood);
        assert!(chat.transcript().is_empty());

        let (category, _) = replay_utterance(&mut chat, &llm, "xyzzy").await.unwrap();
        assert_eq!(category, Category::Unmatched);
        assert!(chat.transcript().is_empty());

        assert!(replay_utterance(&mut chat, &llm, "   ").await.is_none());
    }
}

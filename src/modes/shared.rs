use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};

#[derive(Clone)]
pub(super) struct TranscriptCfg {
    pub enabled: bool,
    pub db_path: String,
}

#[derive(Clone)]
pub(super) struct ChatCfg {
    pub typing_delay_ms: u64,
    pub transcript: TranscriptCfg,
}

#[derive(Clone)]
pub(super) struct ReplayCfg {
    pub input_path: String,
    pub speed: f64,
    pub fixed_step_ms: Option<u64>,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

/// One recorded utterance in a replay file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ReplayEvent {
    pub timestamp: i64,
    #[serde(default)]
    pub location: Option<String>,
    pub text: String,
}

pub(super) fn must_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("Missing env var {key}"))
}

pub(super) fn parse_bool_env(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

fn parse_u64_env(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

pub(super) fn load_transcript_cfg() -> TranscriptCfg {
    TranscriptCfg {
        enabled: parse_bool_env("TRANSCRIPT_ENABLED", true),
        db_path: std::env::var("TRANSCRIPT_DB_PATH")
            .unwrap_or_else(|_| "./chat_transcript.sqlite".into()),
    }
}

pub(super) fn load_chat_cfg() -> ChatCfg {
    ChatCfg {
        typing_delay_ms: parse_u64_env("TYPING_DELAY_MS").unwrap_or(1000),
        transcript: load_transcript_cfg(),
    }
}

pub(super) fn load_replay_cfg() -> Result<ReplayCfg> {
    let input_path = must_env("REPLAY_INPUT_PATH")?;
    let speed = std::env::var("REPLAY_SPEED")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| *v > 0.0)
        .unwrap_or(1.0);
    let fixed_step_ms = parse_u64_env("REPLAY_STEP_MS").filter(|v| *v > 0);

    Ok(ReplayCfg {
        input_path,
        speed,
        fixed_step_ms,
        min_delay_ms: parse_u64_env("REPLAY_MIN_DELAY_MS").unwrap_or(0),
        max_delay_ms: parse_u64_env("REPLAY_MAX_DELAY_MS").unwrap_or(10_000),
    })
}

impl ReplayCfg {
    /// Pause before replaying an event `delta_s` seconds after the previous
    /// one.
    pub(super) fn delay_ms(&self, delta_s: i64) -> u64 {
        if let Some(step_ms) = self.fixed_step_ms {
            return step_ms;
        }
        let delta_s = delta_s.max(0) as f64;
        let scaled = (delta_s * 1000.0 / self.speed).round() as u64;
        scaled.clamp(self.min_delay_ms, self.max_delay_ms.max(self.min_delay_ms))
    }
}

pub(super) fn start_of_today_utc_from_offset(offset_minutes: i32) -> Result<i64> {
    let offset_secs = offset_minutes
        .checked_mul(60)
        .ok_or_else(|| anyhow!("DUMP_TZ_OFFSET_MINUTES is too large"))?;
    let offset =
        FixedOffset::east_opt(offset_secs).ok_or_else(|| anyhow!("Invalid timezone offset"))?;

    let now_local = Utc::now().with_timezone(&offset);
    let midnight = now_local
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Failed to build local midnight"))?;
    let local_start = offset
        .from_local_datetime(&midnight)
        .single()
        .ok_or_else(|| anyhow!("Failed to build local midnight timestamp"))?;
    Ok(local_start.with_timezone(&Utc).timestamp())
}

pub(super) fn load_replay_events(path: &str) -> Result<Vec<ReplayEvent>> {
    let file = File::open(path).with_context(|| format!("failed to open replay file {path}"))?;
    parse_replay_events(BufReader::new(file))
}

fn parse_replay_events(reader: impl BufRead) -> Result<Vec<ReplayEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let event: ReplayEvent = serde_json::from_str(&line)
            .with_context(|| format!("invalid JSON at line {}", idx + 1))?;
        events.push(event);
    }

    events.sort_by_key(|e| e.timestamp);
    Ok(events)
}

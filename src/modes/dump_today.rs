use crate::store::{self, StoredTurn};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::shared::{load_transcript_cfg, start_of_today_utc_from_offset};

pub(super) async fn run() -> Result<()> {
    let transcript = load_transcript_cfg();
    let output_path =
        std::env::var("DUMP_OUTPUT_PATH").unwrap_or_else(|_| "./dump_today.jsonl".into());
    let offset_minutes = std::env::var("DUMP_TZ_OFFSET_MINUTES")
        .ok()
        .and_then(|v| v.parse::<i32>().ok())
        .unwrap_or(0);
    let since_ts = start_of_today_utc_from_offset(offset_minutes)?;

    let db = store::open_db(&transcript.db_path)?;
    info!(
        "Dumping transcript turns since UTC timestamp={} (tz offset {} min)",
        since_ts, offset_minutes
    );
    let turns = store::turns_since(&db, since_ts)?;
    info!(
        "{} of {} stored turns are from today",
        turns.len(),
        store::count_turns(&db)?
    );

    if let Some(parent) = Path::new(&output_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create parent directory for output dump file {}",
                    output_path
                )
            })?;
        }
    }

    let file = File::create(&output_path)
        .with_context(|| format!("failed to create output dump file {output_path}"))?;
    let mut writer = BufWriter::new(file);
    write_jsonl(&mut writer, &turns)?;
    writer.flush()?;

    info!(
        "Dump complete: {} turns written to {}",
        turns.len(),
        output_path
    );

    Ok(())
}

fn write_jsonl(writer: &mut impl Write, turns: &[StoredTurn]) -> Result<()> {
    for turn in turns {
        let line = serde_json::to_string(turn)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_json_object_per_line() {
        let turns = vec![
            StoredTurn {
                session: "s1".into(),
                role: "user".into(),
                category: "Flood".into(),
                source: String::new(),
                text: "baha\nsa amin".into(),
                created_at: 10,
            },
            StoredTurn {
                session: "s1".into(),
                role: "bot".into(),
                category: "Flood".into(),
                source: "matcher".into(),
                text: "## 🌊 Flood Safety Guide".into(),
                created_at: 11,
            },
        ];
        let mut out = Vec::new();
        write_jsonl(&mut out, &turns).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let back: StoredTurn = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(back, turns[0]);
    }
}

//! Batch rendering of lexeme records.
//!
//! Input is JSONL, one [`Lexeme`] per line. Records sharing a dictionary and
//! (NFC-normalised) primary headword form a homograph group, in input order.
//! Rendering is spread over scoped threads in contiguous chunks, so output
//! order always matches input order.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{RenderError, Result};
use crate::headword::{title_at, GroupSlot, Lexeme};
use crate::locale::Locale;
use crate::markup::translate;
use crate::summary::summarize;

/// Configuration for batch rendering
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of rendering threads
    pub num_threads: usize,
    /// Stop reading after this many records
    pub limit: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self {
            num_threads: cpus,
            limit: None,
        }
    }
}

/// Display strings for one lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedLexeme {
    pub id: u64,
    pub title: String,
    pub headwords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_html: Option<String>,
}

#[derive(Debug, Default)]
pub struct Stats {
    pub records_read: usize,
    pub records_written: usize,
    /// Groups with more than one member
    pub homograph_groups: usize,
    /// Records that could not be rendered and were skipped
    pub failed: usize,
    pub elapsed: Duration,
}

/// Parse JSONL lexeme records, skipping blank lines.
pub fn read_lexemes(reader: impl BufRead, limit: Option<usize>) -> Result<Vec<Lexeme>> {
    let mut lexemes = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if limit.is_some_and(|limit| lexemes.len() >= limit) {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let lexeme = serde_json::from_str(&line).map_err(|source| RenderError::Json {
            line: index + 1,
            source,
        })?;
        lexemes.push(lexeme);
    }
    Ok(lexemes)
}

fn group_key(lexeme: &Lexeme) -> Option<(String, String)> {
    let form = lexeme.primary_form()?;
    Some((lexeme.dictionary.clone(), form.nfc().collect()))
}

/// Each record's slot in its homograph group, in input order.
///
/// Positions come from record order alone, so repeated ids still get
/// distinct, contiguous ordinals. Records without a headword form are alone.
pub fn homograph_slots(lexemes: &[Lexeme]) -> Vec<GroupSlot> {
    let keys: Vec<Option<(String, String)>> = lexemes.iter().map(group_key).collect();

    let mut sizes: HashMap<&(String, String), usize> = HashMap::new();
    for key in keys.iter().flatten() {
        *sizes.entry(key).or_default() += 1;
    }

    let mut seen: HashMap<&(String, String), usize> = HashMap::new();
    keys.iter()
        .map(|key| match key {
            Some(key) => {
                let index = seen.entry(key).or_default();
                let slot = GroupSlot { index: *index, count: sizes[key] };
                *index += 1;
                slot
            }
            None => GroupSlot::ALONE,
        })
        .collect()
}

/// Title, headword summary and notes for one lexeme.
pub fn render_lexeme(lexeme: &Lexeme, slot: GroupSlot, locale: &Locale) -> Result<RenderedLexeme> {
    Ok(RenderedLexeme {
        id: lexeme.id,
        title: title_at(lexeme, slot, locale)?,
        headwords: summarize(&lexeme.headwords, locale),
        notes_html: lexeme.notes.as_deref().map(translate),
    })
}

/// Render every lexeme, in input order, on up to `num_threads` threads.
pub fn render_all(lexemes: &[Lexeme], locale: &Locale, num_threads: usize) -> Vec<Result<RenderedLexeme>> {
    if lexemes.is_empty() {
        return vec![];
    }

    let slots = homograph_slots(lexemes);

    let num_threads = num_threads.min(lexemes.len()).max(1);
    let chunk_size = lexemes.len().div_ceil(num_threads);
    debug!("rendering {} lexemes on {} threads", lexemes.len(), num_threads);

    thread::scope(|scope| {
        let handles: Vec<_> = lexemes
            .chunks(chunk_size)
            .zip(slots.chunks(chunk_size))
            .map(|(chunk, chunk_slots)| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .zip(chunk_slots)
                        .map(|(lexeme, &slot)| render_lexeme(lexeme, slot, locale))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut results = Vec::with_capacity(lexemes.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk_results) => results.extend(chunk_results),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        results
    })
}

/// Read JSONL records, render them and write JSONL output.
///
/// Records that cannot be rendered are logged and skipped; malformed input
/// lines abort the run.
pub fn render_stream<W: Write>(
    reader: impl BufRead,
    mut writer: W,
    locale: &Locale,
    config: &BatchConfig,
) -> Result<Stats> {
    let start_time = Instant::now();
    let mut stats = Stats::default();

    let lexemes = read_lexemes(reader, config.limit)?;
    stats.records_read = lexemes.len();
    stats.homograph_groups = count_homograph_groups(&lexemes);
    info!(
        "read {} records, {} homograph groups",
        stats.records_read, stats.homograph_groups
    );

    for (lexeme, result) in lexemes.iter().zip(render_all(&lexemes, locale, config.num_threads)) {
        match result {
            Ok(rendered) => {
                serde_json::to_writer(&mut writer, &rendered).map_err(std::io::Error::from)?;
                writer.write_all(b"\n")?;
                stats.records_written += 1;
            }
            Err(e) => {
                error!("skipping lexeme {}: {}", lexeme.id, e);
                stats.failed += 1;
            }
        }
    }

    writer.flush()?;
    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

fn count_homograph_groups(lexemes: &[Lexeme]) -> usize {
    homograph_slots(lexemes)
        .iter()
        .filter(|slot| slot.index == 0 && slot.count > 1)
        .count()
}

use crate::checks::Category;
use crate::validator::{check_opt, Identifier, ValidationError};
use anyhow::{Context, Result};
use csv::{Reader, Writer};
use encoding_rs::WINDOWS_1252;
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Number of per-identifier warnings logged before the rest are suppressed.
const WARNING_LIMIT: usize = 25;

/// Decodes file contents as UTF-8, falling back to Windows-1252 for legacy exports.
fn decode_input(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

fn read_decoded(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    Ok(decode_input(&bytes))
}

fn normalize_cell(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Collects candidate identifiers from several sources and validates them in order.
///
/// `None` entries stand for missing values (an empty CSV cell) and are reported as
/// [`ValidationError::NullInput`].
#[derive(Debug, Default)]
pub struct BatchRunner {
    candidates: Vec<Option<String>>,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_candidate(&mut self, value: impl Into<String>) {
        self.candidates.push(Some(value.into()));
    }

    pub fn add_candidates<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates
            .extend(values.into_iter().map(|value| Some(value.into())));
    }

    pub fn add_missing(&mut self) {
        self.candidates.push(None);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Reads one identifier per line. Blank lines and `#` comments are skipped.
    pub fn read_list_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let text = read_decoded(path)?;
        let added = self.read_list(&text);
        info!("Read {} identifiers from {}", added, path.display());
        Ok(added)
    }

    pub fn read_list(&mut self, text: &str) -> usize {
        let before = self.candidates.len();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.add_candidate(line);
        }
        self.candidates.len() - before
    }

    /// Reads identifiers from `column` of a CSV file with a header row.
    pub fn read_csv_file<P: AsRef<Path>>(&mut self, path: P, column: &str) -> Result<usize> {
        let path = path.as_ref();
        let text = read_decoded(path)?;
        let mut reader = Reader::from_reader(text.as_bytes());
        let added = self
            .read_csv_reader(&mut reader, column)
            .with_context(|| format!("Failed to read identifiers from {}", path.display()))?;
        info!(
            "Read {} identifiers from column '{}' of {}",
            added,
            column,
            path.display()
        );
        Ok(added)
    }

    pub fn read_csv_reader<R: std::io::Read>(
        &mut self,
        reader: &mut Reader<R>,
        column: &str,
    ) -> Result<usize> {
        let headers = reader.headers()?.clone();
        let Some(col_index) = headers.iter().position(|h| h.trim() == column) else {
            anyhow::bail!(
                "Column '{}' not found. Available columns: {}",
                column,
                headers.iter().collect::<Vec<_>>().join(", ")
            );
        };

        let before = self.candidates.len();
        for result in reader.records() {
            let record = result?;
            match record.get(col_index).and_then(normalize_cell) {
                Some(value) => self.add_candidate(value),
                None => self.add_missing(),
            }
        }
        Ok(self.candidates.len() - before)
    }

    /// Validates every candidate. Failures never stop the run.
    pub fn run(&self) -> BatchOutcome {
        let mut stats = BatchStats::new();
        let mut results = Vec::with_capacity(self.candidates.len());
        let mut warning_logging_suppressed = false;

        for (idx, candidate) in self.candidates.iter().enumerate() {
            let result = check_opt(candidate.as_deref());
            stats.record(&result);

            if let Err(e) = &result {
                if stats.invalid <= WARNING_LIMIT {
                    warn!(
                        "Identifier {} '{}' is invalid ({}): {}",
                        idx + 1,
                        candidate.as_deref().unwrap_or(""),
                        e.kind(),
                        e
                    );
                } else if !warning_logging_suppressed {
                    warn!(
                        "More than {} invalid identifiers encountered. Suppressing additional warnings.",
                        WARNING_LIMIT
                    );
                    warning_logging_suppressed = true;
                }
            }

            results.push(Outcome {
                input: candidate.clone(),
                result,
            });
        }

        BatchOutcome { results, stats }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub input: Option<String>,
    pub result: Result<Identifier, ValidationError>,
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    pub fn input_or_empty(&self) -> &str {
        self.input.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    identifier: &'a str,
    valid: bool,
    category: Option<Category>,
    reason: Option<&'static str>,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<Outcome>,
    pub stats: BatchStats,
}

impl BatchOutcome {
    pub fn invalid(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|outcome| !outcome.is_valid())
            .map(Outcome::input_or_empty)
            .collect()
    }

    /// The invalid inputs as a bracketed list, e.g. `[201701272394, 190302299813]`.
    pub fn format_invalid_list(&self) -> String {
        format!("[{}]", self.invalid().join(", "))
    }

    pub fn write_report<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        self.write_report_to(file)
    }

    /// Writes `identifier,valid,category,reason` rows in input order.
    pub fn write_report_to<W: Write>(&self, output: W) -> Result<()> {
        let mut writer = Writer::from_writer(output);
        for outcome in &self.results {
            let (category, reason) = match &outcome.result {
                Ok(identifier) => (Some(identifier.category), None),
                Err(e) => (None, Some(e.kind())),
            };
            writer.serialize(ReportRow {
                identifier: outcome.input_or_empty(),
                valid: outcome.is_valid(),
                category,
                reason,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_failure: BTreeMap<&'static str, usize>,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, result: &Result<Identifier, ValidationError>) {
        self.total += 1;
        match result {
            Ok(identifier) => {
                self.valid += 1;
                *self.by_category.entry(identifier.category).or_insert(0) += 1;
            }
            Err(e) => {
                self.invalid += 1;
                *self.by_failure.entry(e.kind()).or_insert(0) += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_windows_1252_fallback() {
        let bytes = b"nummer,namn\n141206-2380,G\xf6ran\n";
        let text = decode_input(bytes);
        assert!(text.contains("Göran"));
    }

    #[test]
    fn strips_utf8_bom() {
        let text = decode_input("\u{feff}number\n".as_bytes());
        assert_eq!(text, "number\n");
    }

    #[test]
    fn list_skips_blanks_and_comments() {
        let mut runner = BatchRunner::new();
        let added = runner.read_list("# header\n141206-2380\n\n  7101169295  \n");
        assert_eq!(added, 2);
        assert_eq!(runner.len(), 2);
    }

    #[test]
    fn empty_csv_cell_is_missing() {
        let data = "number,name\n141206-2380,a\n,b\n";
        let mut reader = Reader::from_reader(data.as_bytes());
        let mut runner = BatchRunner::new();
        assert_eq!(runner.read_csv_reader(&mut reader, "number").unwrap(), 2);

        let outcome = runner.run();
        assert_eq!(outcome.results[1].result, Err(ValidationError::NullInput));
        assert_eq!(outcome.stats.by_failure.get("null-input"), Some(&1));
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = "id,name\n141206-2380,a\n";
        let mut reader = Reader::from_reader(data.as_bytes());
        let mut runner = BatchRunner::new();
        let err = runner.read_csv_reader(&mut reader, "number").unwrap_err();
        assert!(err.to_string().contains("Column 'number' not found"));
    }

    #[test]
    fn stats_count_categories_and_failures() {
        let mut runner = BatchRunner::new();
        runner.add_candidates([
            "141206-2380",
            "190910799824",
            "556614-3185",
            "201701272394",
            "190302299813",
        ]);
        let outcome = runner.run();

        assert_eq!(outcome.stats.total, 5);
        assert_eq!(outcome.stats.valid, 3);
        assert_eq!(outcome.stats.invalid, 2);
        assert_eq!(outcome.stats.by_category.get(&Category::Personal), Some(&1));
        assert_eq!(outcome.stats.by_category.get(&Category::Coordination), Some(&1));
        assert_eq!(outcome.stats.by_category.get(&Category::Organisation), Some(&1));
        assert_eq!(outcome.stats.by_failure.get("checksum"), Some(&1));
        assert_eq!(outcome.stats.by_failure.get("invalid-date"), Some(&1));
        assert_eq!(
            outcome.format_invalid_list(),
            "[201701272394, 190302299813]"
        );
    }

    #[test]
    fn all_valid_prints_empty_list() {
        let mut runner = BatchRunner::new();
        runner.add_candidate("141206-2380");
        assert_eq!(runner.run().format_invalid_list(), "[]");
    }
}

// ============================================================
// Layer 5 - Hypothesis Parser
// ============================================================
// Reads the generation log the external decoder writes for one
// model run. Among lots of other output it contains one line per
// n-best hypothesis:
//
//   S-12    <source tokens>
//   H-12    -0.2871    [ S T E M ] - P L
//   P-12    -0.1 -0.3 ...
//
// Only the `H-<row>` lines matter here. `<row>` is the 0-based
// line of the source file fed to the decoder and `<score>` is a
// log-likelihood (higher is better). The n-best hypotheses of a
// row appear best first.
//
// The log is indexed once; querying a row is then a map lookup
// instead of a regex scan over the whole text per word.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HYPOTHESIS_LINE: Regex =
        Regex::new(r"^H-(\d+)\s+([-.\d]+)(?:\s+(.*))?$").unwrap();
}

// ─── HypothesisSet ────────────────────────────────────────────────────────────
/// Candidate text -> score for one row of one model run.
///
/// Insertion order is kept: the voter breaks ties by first-seen
/// order, so iteration must be deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HypothesisSet {
    entries: Vec<(String, f64)>,
}

impl HypothesisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a candidate. An overwritten candidate
    /// keeps its original position.
    pub fn insert(&mut self, candidate: impl Into<String>, score: f64) {
        let candidate = candidate.into();
        match self.entries.iter_mut().find(|(c, _)| *c == candidate) {
            Some(entry) => entry.1 = score,
            None        => self.entries.push((candidate, score)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, s)| (c.as_str(), *s))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for HypothesisSet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut set = HypothesisSet::new();
        for (candidate, score) in iter {
            set.insert(candidate, score);
        }
        set
    }
}

// ─── GenerationLog ────────────────────────────────────────────────────────────
/// All `H-` lines of one generation log, grouped by row.
#[derive(Debug, Clone, Default)]
pub struct GenerationLog {
    rows: BTreeMap<usize, Vec<(String, f64)>>,
}

impl GenerationLog {
    pub fn parse(text: &str) -> Self {
        let mut rows: BTreeMap<usize, Vec<(String, f64)>> = BTreeMap::new();
        let mut skipped = 0usize;

        for line in text.lines() {
            let Some(caps) = HYPOTHESIS_LINE.captures(line) else {
                continue;
            };

            let row   = caps[1].parse::<usize>();
            let score = caps[2].parse::<f64>();
            match (row, score) {
                (Ok(row), Ok(score)) => {
                    let candidate = caps.get(3).map_or("", |m| m.as_str()).to_string();
                    rows.entry(row).or_default().push((candidate, score));
                }
                _ => {
                    tracing::warn!("Skipping unparsable hypothesis line: {}", line);
                    skipped += 1;
                }
            }
        }

        tracing::debug!(
            "Parsed generation log: {} rows, {} unparsable lines",
            rows.len(),
            skipped
        );
        Self { rows }
    }

    /// Scored candidates for a row; empty when the row is absent
    pub fn hypotheses(&self, row: usize) -> HypothesisSet {
        self.rows
            .get(&row)
            .map(|hyps| hyps.iter().map(|(c, s)| (c.as_str(), *s)).collect())
            .unwrap_or_default()
    }

    /// Top-ranked candidate of a row (the first `H-<row>` line)
    pub fn best(&self, row: usize) -> Option<&str> {
        self.rows.get(&row).and_then(|h| h.first()).map(|(c, _)| c.as_str())
    }
}

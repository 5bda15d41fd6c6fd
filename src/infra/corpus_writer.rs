// ============================================================
// Layer 6 - Corpus Writer
// ============================================================
// Splices sentence predictions back into the covered corpus.
//
// Everything else in the covered file is kept as it was: the
// source line, any translation line, record order and the blank
// line between records. Only the gloss line changes:
//
//   \t Kidbą rokʼo.           \t Kidbą rokʼo.
//   \g                  ->    \g girl-ERG look-PST
//   \l The girl looked.       \l The girl looked.
//
// If a record has no `\g` line at all, one is inserted right
// after the source line.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::data::parser::{normalise_newlines, split_records, strip_field};
use crate::domain::error::{GlossError, GlossResult};
use crate::domain::record::{GLOSS_TAG, SOURCE_TAG};

/// Record separator in corpus files
const RECORD_SEPARATOR: &str = "\n\n";

/// Return the covered corpus text with one prediction per record.
pub fn splice_predictions<S: AsRef<str>>(covered_text: &str, predictions: &[S]) -> GlossResult<String> {
    let text    = normalise_newlines(covered_text);
    let records = split_records(&text);

    if records.len() != predictions.len() {
        return Err(GlossError::RecordCountMismatch {
            expected: records.len(),
            actual:   predictions.len(),
        });
    }

    let spliced = records
        .iter()
        .zip(predictions)
        .enumerate()
        .map(|(index, (record, prediction))| splice_record(index, record, prediction.as_ref()))
        .collect::<GlossResult<Vec<_>>>()?;

    Ok(spliced.join(RECORD_SEPARATOR))
}

fn splice_record(index: usize, record: &str, prediction: &str) -> GlossResult<String> {
    let gloss_line = format!("{} {}", GLOSS_TAG, prediction);
    let mut lines: Vec<String> = record.lines().map(str::to_string).collect();

    match lines.iter().position(|l| strip_field(l, GLOSS_TAG).is_some()) {
        Some(pos) => lines[pos] = gloss_line,
        None => {
            let source_pos = lines
                .iter()
                .position(|l| strip_field(l, SOURCE_TAG).is_some())
                .ok_or_else(|| GlossError::MalformedRecord {
                    index,
                    reason: format!("no '{}' source line to attach a gloss to", SOURCE_TAG),
                })?;
            lines.insert(source_pos + 1, gloss_line);
        }
    }

    Ok(lines.join("\n"))
}

/// Read the covered corpus, splice predictions and write the result
pub fn write_predictions<S: AsRef<str>>(
    covered_path: &Path,
    output_path:  &Path,
    predictions:  &[S],
) -> Result<()> {
    let covered = fs::read_to_string(covered_path)
        .with_context(|| format!("Cannot read covered corpus '{}'", covered_path.display()))?;

    let spliced = splice_predictions(&covered, predictions)
        .with_context(|| format!("Cannot merge predictions into '{}'", covered_path.display()))?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create output folder '{}'", parent.display()))?;
    }
    fs::write(output_path, spliced)
        .with_context(|| format!("Cannot write predictions to '{}'", output_path.display()))?;

    tracing::info!(
        "Wrote {} predictions to '{}'",
        predictions.len(),
        output_path.display()
    );
    Ok(())
}

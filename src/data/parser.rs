// ============================================================
// Layer 4 - Record Parser
// ============================================================
// Turns raw corpus text into ordered Records.
//
// Format recap:
//   - records are separated by one blank line
//   - each line starts with a tag and a space: `\t `, `\g `, `\l `
//   - uncovered records are positional: line 0 source,
//     line 1 gloss, line 2 translation
//   - covered records only promise the source line; a blank
//     `\g` line and a `\l` line may follow
//
// Any structural problem is a MalformedRecord error carrying
// the 0-based record index. Nothing is skipped silently.

use crate::domain::error::{GlossError, GlossResult};
use crate::domain::record::{Record, RecordKind, GLOSS_TAG, SOURCE_TAG, TRANSLATION_TAG};

/// Split corpus text into raw record blocks, in file order.
/// Windows line endings are expected to be normalised first
/// (see `normalise_newlines`).
pub fn split_records(text: &str) -> Vec<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    text.split("\n\n").collect()
}

/// Corpus files from Windows editors use CRLF; the blank-line
/// separator only works on LF.
pub fn normalise_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Parse every record of a corpus.
pub fn parse_corpus(text: &str, kind: RecordKind) -> GlossResult<Vec<Record>> {
    let text = normalise_newlines(text);
    let records = split_records(&text)
        .into_iter()
        .enumerate()
        .map(|(index, raw)| parse_record(index, raw, kind))
        .collect::<GlossResult<Vec<_>>>()?;

    tracing::debug!("Parsed {} {:?} records", records.len(), kind);
    Ok(records)
}

/// Parse one raw record block.
pub fn parse_record(index: usize, raw: &str, kind: RecordKind) -> GlossResult<Record> {
    // Stray blank lines inside a block (three newlines in a row
    // in the file) carry no field and are ignored
    let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();

    let required = kind.required_lines();
    if lines.len() < required {
        return Err(GlossError::MalformedRecord {
            index,
            reason: format!("expected at least {} lines, found {}", required, lines.len()),
        });
    }

    let source = expect_field(index, lines[0], SOURCE_TAG)?;

    match kind {
        RecordKind::Uncovered => {
            let gloss       = expect_field(index, lines[1], GLOSS_TAG)?;
            let translation = expect_field(index, lines[2], TRANSLATION_TAG)?;
            Ok(Record::new(source, Some(gloss.to_string()), Some(translation.to_string())))
        }
        RecordKind::Covered => {
            let mut gloss       = None;
            let mut translation = None;

            for line in &lines[1..] {
                if let Some(g) = strip_field(line, GLOSS_TAG) {
                    // The withheld gloss line is present but empty
                    if !g.trim().is_empty() {
                        gloss = Some(g.to_string());
                    }
                } else if let Some(l) = strip_field(line, TRANSLATION_TAG) {
                    translation = Some(l.to_string());
                } else {
                    return Err(GlossError::MalformedRecord {
                        index,
                        reason: format!(
                            "expected line starting with '{} ' or '{} ', found '{}'",
                            GLOSS_TAG, TRANSLATION_TAG, line
                        ),
                    });
                }
            }

            Ok(Record::new(source, gloss, translation))
        }
    }
}

/// Strip `tag` plus the single space after it. A bare tag with
/// nothing after it (trailing space trimmed by an editor) yields "".
pub fn strip_field<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(tag)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix(' ')
}

fn expect_field<'a>(index: usize, line: &'a str, tag: &str) -> GlossResult<&'a str> {
    strip_field(line, tag).ok_or_else(|| GlossError::MalformedRecord {
        index,
        reason: format!("expected line starting with '{} ', found '{}'", tag, line),
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const UNCOVERED: &str = "\\t Kid-bą rokʼo.\n\\g girl-ERG look-PST\n\\l The girl looked.\n\n\\t Sis\n\\g one\n\\l One.\n";

    #[test]
    fn test_parses_uncovered_records_in_order() {
        let records = parse_corpus(UNCOVERED, RecordKind::Uncovered).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "Kid-bą rokʼo.");
        assert_eq!(records[0].gloss.as_deref(), Some("girl-ERG look-PST"));
        assert_eq!(records[0].translation.as_deref(), Some("The girl looked."));
        assert_eq!(records[1].source, "Sis");
    }

    #[test]
    fn test_covered_record_needs_only_source() {
        let records = parse_corpus("\\t abc def\n\n\\t ghi", RecordKind::Covered).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].gloss.is_none());
        assert_eq!(records[1].source, "ghi");
    }

    #[test]
    fn test_covered_record_keeps_translation_and_skips_empty_gloss() {
        let records = parse_corpus("\\t abc\n\\g \n\\l A B C.", RecordKind::Covered).unwrap();
        assert!(records[0].gloss.is_none());
        assert_eq!(records[0].translation.as_deref(), Some("A B C."));
    }

    #[test]
    fn test_short_uncovered_record_is_malformed() {
        let text = "\\t a\n\\g b\n\\l c\n\n\\t d";
        let err  = parse_corpus(text, RecordKind::Uncovered).unwrap_err();
        assert!(matches!(err, GlossError::MalformedRecord { index: 1, .. }));
    }

    #[test]
    fn test_missing_prefix_is_malformed() {
        let err = parse_corpus("\\t a\nb\n\\l c", RecordKind::Uncovered).unwrap_err();
        assert!(matches!(err, GlossError::MalformedRecord { index: 0, .. }));
    }

    #[test]
    fn test_untagged_line_in_covered_record_is_malformed() {
        let err = parse_corpus("\\t a b\n\\l A B.\n\n\\t c\nstray line", RecordKind::Covered).unwrap_err();
        assert!(matches!(err, GlossError::MalformedRecord { index: 1, .. }));
    }

    #[test]
    fn test_crlf_and_trailing_whitespace() {
        let text = "\r\n\\t a\r\n\\g b\r\n\\l c\r\n\r\n\\t d\r\n\\g e\r\n\\l f\r\n\r\n";
        let records = parse_corpus(text, RecordKind::Uncovered).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].gloss.as_deref(), Some("e"));
    }

    #[test]
    fn test_empty_corpus_has_no_records() {
        assert!(parse_corpus("  \n\n ", RecordKind::Covered).unwrap().is_empty());
    }

    #[test]
    fn test_strip_field_accepts_bare_tag() {
        assert_eq!(strip_field("\\g", GLOSS_TAG), Some(""));
        assert_eq!(strip_field("\\g x", GLOSS_TAG), Some("x"));
        assert_eq!(strip_field("\\gx", GLOSS_TAG), None);
    }
}

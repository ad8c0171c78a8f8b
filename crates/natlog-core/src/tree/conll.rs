//! CoNLL-like tree block parser.
//!
//! One token per line, tab-separated, blank-line terminated:
//!
//! ```text
//! word-id <TAB> governor <TAB> relation [<TAB> sense [<TAB> pos
//!     [<TAB> subj-quantifier [<TAB> obj-quantifier [<TAB> flags]]]]]
//! ```
//!
//! - `governor` is 1-indexed; 0 marks the root.
//! - quantifier fields are `-` or `<monotonicity>:<begin>-<end>` with a
//!   1-indexed inclusive-begin / exclusive-end token span, e.g.
//!   `anti-additive:1-2`;
//! - `flags` is a character set; `l` marks a location-capable token.
//!
//! `%`-prefixed metadata lines are a REPL concern and must be stripped by
//! the caller; here they are a parse error like any other malformed line.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{
    parse_monotonicity_spec, Monotonicity, QuantifierType, MAX_QUERY_LENGTH, MAX_SENSE,
    MAX_WORD_ID,
};

use super::relations::relation_index;
use super::{DependencyTree, QuantifierSpan, Token, ROOT};

/// Parse one blank-line-terminated tree block.
pub fn parse(block: &str) -> CoreResult<DependencyTree> {
    let mut tokens = Vec::new();
    let mut quantifiers = Vec::new();

    for (line_no, line) in block.lines().enumerate() {
        if line.trim().is_empty() {
            break;
        }
        let line_no = line_no + 1;
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(CoreError::TreeParse {
                line: line_no,
                message: format!("expected at least 3 tab-separated fields, got {}", fields.len()),
            });
        }

        let word: u32 = fields[0].parse().map_err(|_| CoreError::TreeParse {
            line: line_no,
            message: format!("bad word id: {:?}", fields[0]),
        })?;
        if word >= MAX_WORD_ID {
            return Err(CoreError::WordIdOverflow { word: word as u64 });
        }

        let governor_raw: usize = fields[1].parse().map_err(|_| CoreError::TreeParse {
            line: line_no,
            message: format!("bad governor: {:?}", fields[1]),
        })?;
        // The cast below must never land on the ROOT sentinel (31).
        if governor_raw > MAX_QUERY_LENGTH {
            return Err(CoreError::TreeParse {
                line: line_no,
                message: format!("governor {governor_raw} exceeds the {MAX_QUERY_LENGTH}-token limit"),
            });
        }
        let governor = if governor_raw == 0 {
            ROOT
        } else {
            (governor_raw - 1) as u8
        };

        let relation = relation_index(fields[2])?;

        let sense = match fields.get(3) {
            None | Some(&"-") | Some(&"") => 0,
            Some(raw) => {
                let sense: u8 = raw.parse().map_err(|_| CoreError::TreeParse {
                    line: line_no,
                    message: format!("bad sense: {raw:?}"),
                })?;
                if sense > MAX_SENSE {
                    return Err(CoreError::SenseOverflow { sense: sense as u64 });
                }
                sense
            }
        };

        let pos = match fields.get(4) {
            None | Some(&"-") | Some(&"") => 0,
            Some(raw) => raw.as_bytes()[0].to_ascii_lowercase(),
        };

        let subject = parse_quantifier_field(fields.get(5), line_no)?;
        let object = parse_quantifier_field(fields.get(6), line_no)?;
        if subject.is_some() || object.is_some() {
            let (subject_type, subject_mono, subject_begin, subject_end) =
                subject.unwrap_or((QuantifierType::None, Monotonicity::Invalid, 0, 0));
            let (object_type, object_mono, object_begin, object_end) =
                object.unwrap_or((QuantifierType::None, Monotonicity::Invalid, 0, 0));
            quantifiers.push(QuantifierSpan {
                token_index: tokens.len() as u8,
                subject_type,
                subject_mono,
                subject_begin,
                subject_end,
                object_type,
                object_mono,
                object_begin,
                object_end,
            });
        }

        let is_location = fields.get(7).is_some_and(|f| f.contains('l'));

        tokens.push(Token {
            word,
            sense,
            pos,
            governor,
            relation,
            is_location,
        });
    }

    debug!(
        tokens = tokens.len(),
        quantifiers = quantifiers.len(),
        "parsed tree block"
    );
    DependencyTree::new(tokens, quantifiers)
}

type QuantifierField = (QuantifierType, Monotonicity, u8, u8);

/// Parse `<monotonicity>:<begin>-<end>` (1-indexed begin) or `-` / absent.
fn parse_quantifier_field(
    field: Option<&&str>,
    line_no: usize,
) -> CoreResult<Option<QuantifierField>> {
    let raw = match field {
        None | Some(&"-") | Some(&"") => return Ok(None),
        Some(raw) => *raw,
    };
    let (spec, span) = raw.rsplit_once(':').ok_or_else(|| CoreError::TreeParse {
        line: line_no,
        message: format!("bad quantifier field: {raw:?}"),
    })?;
    let (qtype, mono) = parse_monotonicity_spec(spec)?;
    let (begin_raw, end_raw) = span.split_once('-').ok_or_else(|| CoreError::TreeParse {
        line: line_no,
        message: format!("bad quantifier span: {span:?}"),
    })?;
    let begin: usize = begin_raw.parse().map_err(|_| CoreError::TreeParse {
        line: line_no,
        message: format!("bad span begin: {begin_raw:?}"),
    })?;
    let end: usize = end_raw.parse().map_err(|_| CoreError::TreeParse {
        line: line_no,
        message: format!("bad span end: {end_raw:?}"),
    })?;
    if begin == 0 || begin > end {
        return Err(CoreError::TreeParse {
            line: line_no,
            message: format!("bad span {begin}-{end}"),
        });
    }
    // Convert to 0-indexed half-open.
    Ok(Some((qtype, mono, (begin - 1) as u8, (end - 1) as u8)))
}

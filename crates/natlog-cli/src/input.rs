//! Query stream segmentation.
//!
//! An input stream interleaves three kinds of lines: `%` directives, tree
//! token lines, and blank separators. A tree block is a maximal run of
//! token lines; directives take effect at the point they appear.

use std::io::Read;
use std::path::Path;

/// One parsed element of the input stream, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputItem {
    /// A `%` line, with its 1-indexed line number for error reporting.
    Directive { line: usize, text: String },
    /// A blank-line-delimited tree block, with its starting line number.
    Block { line: usize, text: String },
}

/// Split an input stream into directives and tree blocks.
pub fn parse_items(input: &str) -> Vec<InputItem> {
    let mut items = Vec::new();
    let mut block = String::new();
    let mut block_start = 0;

    let mut flush = |block: &mut String, block_start: usize, items: &mut Vec<InputItem>| {
        if !block.is_empty() {
            items.push(InputItem::Block {
                line: block_start,
                text: std::mem::take(block),
            });
        }
    };

    for (line_no, line) in input.lines().enumerate() {
        let line_no = line_no + 1;
        if line.trim().is_empty() {
            flush(&mut block, block_start, &mut items);
        } else if line.starts_with('%') {
            flush(&mut block, block_start, &mut items);
            items.push(InputItem::Directive {
                line: line_no,
                text: line.to_string(),
            });
        } else {
            if block.is_empty() {
                block_start = line_no;
            }
            block.push_str(line);
            block.push('\n');
        }
    }
    flush(&mut block, block_start, &mut items);
    items
}

/// Read the whole query stream from a file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#![allow(clippy::module_inception)]

use std::{fmt::Write, path::Path, rc::Rc};

use log::{debug, info};

use crate::{
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Lexer,
    parser::{lookups::GrammarTables, parser::parse},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within the line. A position at the very end of the source
/// (where `eof` is reported) maps to the end of the last line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    if content.ends_with('\n') || content.is_empty() {
        Some((line_number, String::new(), 0))
    } else {
        let last = content.rsplit('\n').next().unwrap_or("");
        Some((line_number - 1, last.to_string(), last.len()))
    }
}

/// Renders a diagnostic with the offending source line underneath.
///
/// ```text
/// Error: found syntax error at match for the current token 3
/// -> stdin:2
///   |
/// 2 | int x 3;
///   | ------^
/// ```
pub fn render_error(error: &Error, source: &str) -> Option<String> {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0)?;

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    let mut rendered = String::new();

    // Some diagnostics already carry the prefix in their text.
    let message = error.to_string();
    let message = message.strip_prefix("Error: ").unwrap_or(&message);

    if let ErrorTip::None = error.get_tip() {
        writeln!(rendered, "Error: {}", message).ok()?;
    } else {
        writeln!(rendered, "Error: {} ({})", message, error.get_tip()).ok()?;
    }
    writeln!(rendered, "-> {}:{}", position.1, line).ok()?;
    writeln!(rendered, "{:>padding$}", "|").ok()?;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    writeln!(rendered, "{} | {}", line_string, line_text_removed.trim_end()).ok()?;

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    write!(rendered, "{:>padding$} {:->arrows$}", "|", "^").ok()?;

    Some(rendered)
}

/// Name reported in positions for a source read from `path`: its final
/// component.
pub fn source_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (String::from(&string[start..]), start)
}

/// Result of running the front end over one program.
#[derive(Debug, Clone)]
pub struct Translation {
    /// Every diagnostic, lexical and syntactic, in the order it was found.
    pub diagnostics: Vec<Error>,
    /// The serialized tree; `None` whenever any diagnostic was recorded.
    pub tree: Option<String>,
}

impl Translation {
    /// The exact text written to standard output: one line per
    /// diagnostic, then the tree (or an empty line).
    pub fn render(&self) -> String {
        let mut output = String::new();
        for diagnostic in &self.diagnostics {
            output.push_str(&diagnostic.to_string());
            output.push('\n');
        }
        if let Some(tree) = &self.tree {
            output.push_str(tree);
        }
        output.push('\n');
        output
    }

    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Scans and parses `source`, producing the serialized tree or the
/// diagnostics that suppressed it.
///
/// # Arguments
///
/// * `source` - Program text
/// * `file` - Name reported in positions (`stdin` when `None`)
pub fn translate(source: &str, file: Option<String>) -> Translation {
    let tables = GrammarTables::new();
    let lexer = Lexer::new(source.to_string(), file);

    let result = parse(lexer, &tables);

    match result {
        Ok(program) => {
            info!("parsed {} top-level statements", program.body.len());
            Translation {
                diagnostics: vec![],
                tree: Some(program.to_string()),
            }
        }
        Err(diagnostics) => {
            info!("suppressing tree: {} diagnostics", diagnostics.len());
            for diagnostic in &diagnostics {
                if let Some(rendered) = render_error(diagnostic, source) {
                    debug!("{}\n{}", diagnostic.get_error_name(), rendered);
                }
            }
            Translation {
                diagnostics,
                tree: None,
            }
        }
    }
}

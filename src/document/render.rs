// src/document/render.rs
// =============================================================================
// Builds the markdown text. This is the only place skip reasons stop being
// an enum and the only place the output layout is spelled out:
//
//   # Codebase for owner/repo
//
//
//   ## `path/to/file`
//
//   ```
//   file content without blank lines
//   ```
//
//   ---
//
// Skipped files get the same heading and separator with a fixed notice
// instead of the code block, whatever the reason was.
// =============================================================================

use crate::github::{FetchedContent, RepositoryRef, SkipReason};

pub const SKIP_NOTICE: &str = "*Content skipped (binary, non-UTF8, or error fetching).*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Code(String),
    Skipped(SkipReason),
}

/// One file's part of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    pub path: String,
    pub body: SectionBody,
}

impl DocumentSection {
    pub fn new(path: impl Into<String>, content: FetchedContent) -> Self {
        let body = match content {
            FetchedContent::Text(text) => SectionBody::Code(strip_blank_lines(&text)),
            FetchedContent::Skipped(reason) => SectionBody::Skipped(reason),
        };
        Self {
            path: path.into(),
            body,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.body, SectionBody::Skipped(_))
    }
}

/// Drops every line that is empty or only whitespace.
///
/// "a\n\n  \nb\n" -> "a\nb". Lines are rejoined with "\n"; no other
/// change is made to the content.
pub fn strip_blank_lines(content: &str) -> String {
    // "\r\n" splits into a line and an empty piece, which the filter drops
    content
        .split(is_line_break)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// Lone CR (classic Mac files), vertical tab, form feed, the ASCII record
// separators, NEL and the Unicode line/paragraph separators all end a line
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Renders the title and all sections, in the order given.
pub fn render_document(repo: &RepositoryRef, sections: &[DocumentSection]) -> String {
    // Pieces are joined with "\n", so a piece ending in "\n" yields a blank line
    let mut parts: Vec<String> = Vec::with_capacity(sections.len() * 5 + 1);
    parts.push(format!("# Codebase for {}\n\n", repo));

    for section in sections {
        parts.push(format!("## `{}`\n", section.path));
        match &section.body {
            SectionBody::Code(code) => {
                parts.push("```".to_string());
                parts.push(code.clone());
                parts.push("```\n".to_string());
            }
            SectionBody::Skipped(_) => parts.push(format!("{}\n", SKIP_NOTICE)),
        }
        parts.push("---\n".to_string());
    }

    parts.join("\n")
}

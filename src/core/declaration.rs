//! Scanner for the `project(...)` declaration in a CMakeLists.txt
//!
//! Locates the first `project` call and tokenizes its body. The body ends at the
//! first `)`: the scanner is not nested-paren aware, so a literal `)` inside a
//! quoted argument truncates the body. Quoted strings are tokenized on whitespace
//! like everything else, so a quoted multi-word value splits into several tokens.
//! Both limitations are long-standing behavior; callers rely on the first-`)`
//! contract, so fixing them would change what gets rewritten.

use crate::core::error::ScanError;
use std::ops::Range;

const KEYWORD: &str = "project";
const VERSION_KEY: &str = "VERSION";

/// Parse result for one `project(<name> ... VERSION <value> ...)` call
///
/// `version_span` is the byte range of the version value token within the
/// scanned text, so a rewrite can splice a new value in place and leave every
/// other byte untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  pub name: String,
  pub version: String,
  pub version_span: Range<usize>,
}

impl Declaration {
  /// Scan `text` for the first project declaration
  ///
  /// Whitespace (including newlines) may appear before the `(`, and anywhere
  /// inside the body. The first body token is the project name; the version is
  /// the token immediately following the first token equal to `VERSION`
  /// (exact, case-sensitive).
  pub fn scan(text: &str) -> Result<Declaration, ScanError> {
    let body_span = find_call_body(text)?;
    let tokens = tokenize(text, body_span);

    let name = match tokens.first() {
      Some(tok) => tok.text.to_string(),
      None => return Err(ScanError::EmptyCall),
    };

    let key_index = tokens
      .iter()
      .position(|tok| tok.text == VERSION_KEY)
      .ok_or(ScanError::VersionKeyMissing)?;

    let value = tokens.get(key_index + 1).ok_or(ScanError::VersionValueMissing)?;

    Ok(Declaration {
      name,
      version: value.text.to_string(),
      version_span: value.span.clone(),
    })
  }
}

/// A whitespace-delimited body token with its byte span in the scanned text
struct Token<'a> {
  text: &'a str,
  span: Range<usize>,
}

/// Locate the body span of the first `project ( ... )` call
///
/// Occurrences of the keyword not followed by `(` (after optional whitespace)
/// are skipped and the search continues.
fn find_call_body(text: &str) -> Result<Range<usize>, ScanError> {
  let mut search_from = 0;

  while let Some(found) = text[search_from..].find(KEYWORD) {
    let after_keyword = search_from + found + KEYWORD.len();
    let rest = &text[after_keyword..];
    let trimmed = rest.trim_start();

    if trimmed.starts_with('(') {
      let body_start = after_keyword + (rest.len() - trimmed.len()) + 1;
      return match text[body_start..].find(')') {
        Some(close) => Ok(body_start..body_start + close),
        None => Err(ScanError::UnterminatedCall),
      };
    }

    search_from = after_keyword;
  }

  Err(ScanError::NoDeclaration)
}

/// Split the body on whitespace, keeping absolute byte spans
fn tokenize(text: &str, body: Range<usize>) -> Vec<Token<'_>> {
  let offset = body.start;
  let body_text = &text[body];
  let mut tokens = Vec::new();
  let mut start = None;

  for (i, ch) in body_text.char_indices() {
    if ch.is_whitespace() {
      if let Some(s) = start.take() {
        tokens.push(Token {
          text: &body_text[s..i],
          span: offset + s..offset + i,
        });
      }
    } else if start.is_none() {
      start = Some(i);
    }
  }

  if let Some(s) = start {
    tokens.push(Token {
      text: &body_text[s..],
      span: offset + s..offset + body_text.len(),
    });
  }

  tokens
}

//! Parsing of the line-oriented bootstrap source.
//!
//! The source is CSV-shaped; only the first field of each line is used.
//! Quoted fields follow the usual `""` escape but may not span lines.

use std::path::Path;

use crate::{Error, Result};

/// Read and parse the bootstrap file at `path`.
pub fn read_source(path: &Path) -> Result<Vec<String>> {
  let raw = std::fs::read_to_string(path).map_err(|source| Error::Bootstrap {
    path: path.to_path_buf(),
    source,
  })?;
  parse(&raw)
}

/// Extract the first field of every non-blank line.
pub fn parse(raw: &str) -> Result<Vec<String>> {
  let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

  raw
    .lines()
    .enumerate()
    .filter(|(_, line)| !line.trim().is_empty())
    .map(|(idx, line)| first_field(line, idx + 1))
    .collect()
}

fn first_field(line: &str, line_no: usize) -> Result<String> {
  let Some(rest) = line.strip_prefix('"') else {
    let end = line.find(',').unwrap_or(line.len());
    return Ok(line[..end].to_string());
  };

  let mut field = String::with_capacity(rest.len());
  let mut chars = rest.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '"' {
      field.push(c);
      continue;
    }
    if chars.peek() == Some(&'"') {
      chars.next();
      field.push('"');
      continue;
    }
    return match chars.next() {
      None | Some(',') => Ok(field),
      Some(other) => Err(Error::MalformedSource {
        line:   line_no,
        reason: format!("unexpected {other:?} after closing quote"),
      }),
    };
  }

  Err(Error::MalformedSource {
    line:   line_no,
    reason: "unterminated quoted field".to_string(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_lines_take_first_field() {
    let texts = parse("Stay hungry\nKnow thyself,Socrates\n").unwrap();
    assert_eq!(texts, vec!["Stay hungry", "Know thyself"]);
  }

  #[test]
  fn quoted_field_keeps_commas_and_escaped_quotes() {
    let texts = parse("\"Hello, \"\"world\"\"\",author\n").unwrap();
    assert_eq!(texts, vec!["Hello, \"world\""]);
  }

  #[test]
  fn crlf_bom_and_blank_lines() {
    let texts = parse("\u{feff}one\r\n\r\ntwo\r\n").unwrap();
    assert_eq!(texts, vec!["one", "two"]);
  }

  #[test]
  fn unterminated_quote_is_malformed() {
    let err = parse("ok\n\"never closed\n").unwrap_err();
    assert!(matches!(err, Error::MalformedSource { line: 2, .. }));
  }

  #[test]
  fn garbage_after_closing_quote_is_malformed() {
    let err = parse("\"a\"b\n").unwrap_err();
    assert!(matches!(err, Error::MalformedSource { line: 1, .. }));
  }

  #[test]
  fn missing_file_is_bootstrap_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_source(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, Error::Bootstrap { .. }));
  }

  #[test]
  fn read_source_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotes.csv");
    std::fs::write(&path, "first\nsecond,x\n").unwrap();
    assert_eq!(read_source(&path).unwrap(), vec!["first", "second"]);
  }
}

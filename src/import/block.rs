//! Block-style metadata dialect (`+++` marker, TOML-like).
//!
//! Scalars are unwrapped by stripping the fixed `field = "` prefix and
//! unescaping quotes. Arrays come single-line (bracket-delimited) or
//! multi-line (opened by `field = [`, one quoted comma-terminated entry per
//! line, closed by a bare `]`). Multi-line free text is fenced by `"""`.

use crate::error::{RecueilError, Result};
use crate::import::dialect::{
    Accumulated, FIELD_KEYWORDS, FieldKind, FieldOutcome, MetadataDialect, MultilineMode,
};

const TEXT_FENCE: &str = "\"\"\"";

#[derive(Debug, Default)]
pub(crate) struct BlockDialect {
    mode: MultilineMode,
    acc: Accumulated,
}

impl BlockDialect {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl MetadataDialect for BlockDialect {
    fn field_kind(&self, line: &str) -> Option<FieldKind> {
        if line.starts_with(char::is_whitespace) {
            return None;
        }
        FIELD_KEYWORDS.iter().find_map(|(keyword, kind)| {
            line.strip_prefix(keyword)
                .filter(|rest| rest.starts_with(" = "))
                .map(|_| *kind)
        })
    }

    fn parse_field(&mut self, kind: FieldKind, line: &str) -> Result<FieldOutcome> {
        // a new field always closes whatever accumulation was running
        self.mode = MultilineMode::None;
        let keyword = keyword_of(kind);
        // everything after `field = `
        let value = line[keyword.len() + 3..].trim_end();

        if kind.is_list() {
            if value == "[" {
                self.mode = MultilineMode::for_list(kind);
                return Ok(FieldOutcome::Consumed);
            }
            let items = parse_inline_array(value, line)?;
            if let Some(list) = self.acc.list_for(MultilineMode::for_list(kind)) {
                list.extend(items);
            }
            return Ok(FieldOutcome::Consumed);
        }

        match kind {
            FieldKind::Info if value == TEXT_FENCE => {
                self.mode = MultilineMode::Info;
                Ok(FieldOutcome::Consumed)
            }
            FieldKind::Weight => Ok(FieldOutcome::Scalar(value.trim_matches('"').to_string())),
            _ => Ok(FieldOutcome::Scalar(unwrap_quoted(value, line)?)),
        }
    }

    fn continuation(&mut self, line: &str) {
        match self.mode {
            MultilineMode::None => {}
            MultilineMode::Info => {
                let trimmed = line.trim_end();
                if let Some(head) = trimmed.strip_suffix(TEXT_FENCE) {
                    if !head.trim().is_empty() {
                        self.acc.info_lines.push(head.trim_end().to_string());
                    }
                    self.mode = MultilineMode::None;
                } else {
                    self.acc.info_lines.push(trimmed.to_string());
                }
            }
            mode => {
                let trimmed = line.trim();
                if trimmed == "]" {
                    self.mode = MultilineMode::None;
                } else if !trimmed.is_empty() {
                    let entry = trimmed.trim_end_matches(',').trim();
                    if let Some(list) = self.acc.list_for(mode) {
                        list.push(unquote_lenient(entry));
                    }
                }
            }
        }
    }

    fn finish(self: Box<Self>) -> Accumulated {
        self.acc
    }
}

fn keyword_of(kind: FieldKind) -> &'static str {
    FIELD_KEYWORDS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|(keyword, _)| *keyword)
        .unwrap_or_default()
}

/// Strips the surrounding double quotes of a scalar and unescapes `\"`.
fn unwrap_quoted(value: &str, line: &str) -> Result<String> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| RecueilError::Parse(format!("Expected quoted value in line: {line}")))?;
    Ok(inner.replace("\\\"", "\""))
}

fn unquote_lenient(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .map(|inner| inner.replace("\\\"", "\""))
        .unwrap_or_else(|| value.to_string())
}

/// Splits a single-line `[ "a", "b" ]` array, honoring quotes around commas.
fn parse_inline_array(value: &str, line: &str) -> Result<Vec<String>> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| RecueilError::Parse(format!("Expected array value in line: {line}")))?;

    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escaped = false;
    for c in inner.chars() {
        match c {
            '\\' if in_string && !escaped => escaped = true,
            '"' if !escaped => {
                in_string = !in_string;
                current.push(c);
            }
            ',' if !in_string => {
                if !current.trim().is_empty() {
                    items.push(unquote_lenient(current.trim()));
                }
                current.clear();
            }
            _ => {
                if escaped {
                    current.push('\\');
                    escaped = false;
                }
                current.push(c);
            }
        }
    }
    if !current.trim().is_empty() {
        items.push(unquote_lenient(current.trim()));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(dialect: &mut BlockDialect, line: &str) -> Option<FieldOutcome> {
        let kind = dialect.field_kind(line)?;
        Some(dialect.parse_field(kind, line).unwrap())
    }

    #[test]
    fn test_scalar_unwrap_and_unescape() {
        let mut d = BlockDialect::new();
        let outcome = feed(&mut d, r#"title = "L'\"hiver\" venu""#).unwrap();
        assert_eq!(
            outcome,
            FieldOutcome::Scalar(r#"L'"hiver" venu"#.to_string())
        );
    }

    #[test]
    fn test_unquoted_scalar_is_a_parse_error() {
        let mut d = BlockDialect::new();
        let kind = d.field_kind("date = 01.01.2023").unwrap();
        assert!(d.parse_field(kind, "date = 01.01.2023").is_err());
    }

    #[test]
    fn test_weight_is_unquoted() {
        let mut d = BlockDialect::new();
        let outcome = feed(&mut d, "weight = 3").unwrap();
        assert_eq!(outcome, FieldOutcome::Scalar("3".to_string()));
    }

    #[test]
    fn test_single_line_array() {
        let mut d = BlockDialect::new();
        let outcome = feed(&mut d, r#"categories = ["Automne", "Hiver, doux"]"#).unwrap();
        assert_eq!(outcome, FieldOutcome::Consumed);
        let acc = Box::new(d).finish();
        assert_eq!(acc.categories, vec!["Automne", "Hiver, doux"]);
    }

    #[test]
    fn test_multi_line_array() {
        let mut d = BlockDialect::new();
        assert_eq!(feed(&mut d, "tags = [").unwrap(), FieldOutcome::Consumed);
        d.continuation(r#"  "2023","#);
        d.continuation(r#"  "octosyllabe","#);
        d.continuation("]");
        d.continuation(r#"  "ignored after close","#);
        let acc = Box::new(d).finish();
        assert_eq!(acc.tags, vec!["2023", "octosyllabe"]);
    }

    #[test]
    fn test_multi_line_info_fence() {
        let mut d = BlockDialect::new();
        assert_eq!(
            feed(&mut d, r#"info = """"#).unwrap(),
            FieldOutcome::Consumed
        );
        d.continuation("Première ligne.");
        d.continuation(r#"Dernière ligne.""""#);
        d.continuation("après la clôture");
        let acc = Box::new(d).finish();
        assert_eq!(
            acc.info().unwrap(),
            "Première ligne.\nDernière ligne."
        );
    }

    #[test]
    fn test_single_line_info_is_scalar() {
        let mut d = BlockDialect::new();
        let outcome = feed(&mut d, r#"info = "Métrique variable : 6, 3.""#).unwrap();
        assert_eq!(
            outcome,
            FieldOutcome::Scalar("Métrique variable : 6, 3.".to_string())
        );
    }

    #[test]
    fn test_field_detection_requires_column_zero() {
        let d = BlockDialect::new();
        assert!(d.field_kind(r#"  title = "indented""#).is_none());
        assert!(d.field_kind(r#"title = "ok""#).is_some());
        assert_eq!(
            d.field_kind(r#"doubleAcrostiche = "a | b""#),
            Some(FieldKind::DoubleAcrostiche)
        );
    }
}

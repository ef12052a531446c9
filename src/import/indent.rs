//! Indent-style metadata dialect (`---` marker, YAML-like).
//!
//! Scalars are unwrapped by stripping the fixed `field: ` prefix with
//! optional quote unwrapping. List fields with no inline value switch to an
//! accumulation mode where each continuation line is one `- ` entry. Info
//! may be a block scalar (`|-`) continuing while the indentation test holds,
//! with two known boilerplate lines silently dropped.

use crate::error::{RecueilError, Result};
use crate::import::dialect::{
    Accumulated, FIELD_KEYWORDS, FieldKind, FieldOutcome, MetadataDialect, MultilineMode,
};

const BLOCK_INDENT: &str = "  ";
const NOTICE_MARKER: &str = "{{% notice";
const ACROSTICHE_HEADING: &str = "Acrostiche :";

#[derive(Debug, Default)]
pub(crate) struct IndentDialect {
    mode: MultilineMode,
    acc: Accumulated,
}

impl IndentDialect {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl MetadataDialect for IndentDialect {
    fn field_kind(&self, line: &str) -> Option<FieldKind> {
        if line.starts_with(char::is_whitespace) {
            return None;
        }
        FIELD_KEYWORDS.iter().find_map(|(keyword, kind)| {
            line.strip_prefix(keyword)
                .filter(|rest| rest.starts_with(':'))
                .map(|_| *kind)
        })
    }

    fn parse_field(&mut self, kind: FieldKind, line: &str) -> Result<FieldOutcome> {
        // a new field always closes whatever accumulation was running
        self.mode = MultilineMode::None;
        let keyword = keyword_of(kind);
        // everything after `field:`
        let value = line[keyword.len() + 1..].trim();

        if kind.is_list() {
            if !value.is_empty() {
                return Err(RecueilError::Parse(format!(
                    "Expected block sequence for '{keyword}', got inline value: {line}"
                )));
            }
            self.mode = MultilineMode::for_list(kind);
            return Ok(FieldOutcome::Consumed);
        }

        match kind {
            FieldKind::Info if value.starts_with('|') => {
                self.mode = MultilineMode::Info;
                Ok(FieldOutcome::Consumed)
            }
            _ => Ok(FieldOutcome::Scalar(unquote(value))),
        }
    }

    fn continuation(&mut self, line: &str) {
        match self.mode {
            MultilineMode::None => {}
            MultilineMode::Info => {
                if line.trim().is_empty() {
                    return;
                }
                let Some(content) = line.strip_prefix(BLOCK_INDENT) else {
                    // indentation test failed: the block scalar is over
                    self.mode = MultilineMode::None;
                    return;
                };
                let trimmed = content.trim_end();
                if trimmed.trim_start().starts_with(NOTICE_MARKER)
                    || trimmed.trim() == ACROSTICHE_HEADING
                {
                    return;
                }
                self.acc.info_lines.push(trimmed.to_string());
            }
            mode => {
                let trimmed = line.trim_start();
                let Some(entry) = trimmed.strip_prefix("- ") else {
                    self.mode = MultilineMode::None;
                    return;
                };
                if let Some(list) = self.acc.list_for(mode) {
                    list.push(unquote(entry.trim()));
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

/// Unwraps an optionally quoted value; unquoted values are taken literally.
fn unquote(value: &str) -> String {
    let value = value.trim();
    if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return inner.replace("\\\"", "\"");
    }
    if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
        return inner.replace("''", "'");
    }
    value.to_string()
}

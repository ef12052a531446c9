//! Content body segmentation.
//!
//! After the metadata block closes, the remaining lines are verses grouped
//! into paragraphs. A lone backslash line separates paragraphs; a terminal
//! marker (notice shortcode, image embed, HTML snippet, footnote or raw
//! shortcode) ends the poem body for good.

use crate::model::Paragraph;

/// Line prefixes that terminate the body; everything after them belongs to
/// page furniture, not to the poem.
const TERMINAL_MARKERS: &[&str] = &["{{% notice", "{{<", "![", "[^", "<"];

/// Paragraph separator line.
const PARAGRAPH_BREAK: &str = "\\";

/// One instance per file import; [`BodySegmenter::finish`] consumes it so a
/// segmenter can never leak state into the next file.
#[derive(Debug, Default)]
pub(crate) struct BodySegmenter {
    paragraphs: Vec<Paragraph>,
    current: Vec<String>,
    done: bool,
}

impl BodySegmenter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn feed(&mut self, line: &str) {
        if self.done {
            return;
        }
        let trimmed = line.trim();
        if TERMINAL_MARKERS
            .iter()
            .any(|marker| trimmed.starts_with(marker))
        {
            self.done = true;
            return;
        }
        if trimmed == PARAGRAPH_BREAK {
            self.flush();
            return;
        }
        if trimmed.is_empty() {
            return;
        }
        self.current.push(trimmed.to_string());
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.paragraphs.push(Paragraph {
                verses: std::mem::take(&mut self.current),
            });
        }
    }

    pub(crate) fn finish(mut self) -> Vec<Paragraph> {
        self.flush();
        self.paragraphs
    }
}

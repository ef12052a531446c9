//! Shared capability contract for the two metadata dialects.
//!
//! The state machine depends only on [`MetadataDialect`]; the block-style and
//! indent-style processors each implement it with their own unwrapping and
//! continuation rules.

use crate::error::Result;

/// Metadata fields recognized at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Title,
    Id,
    Date,
    Categories,
    Tags,
    Pictures,
    Info,
    Description,
    Acrostiche,
    DoubleAcrostiche,
    VerseLength,
    PoemType,
    Weight,
    Locations,
}

impl FieldKind {
    pub(crate) fn is_list(self) -> bool {
        matches!(
            self,
            FieldKind::Categories | FieldKind::Tags | FieldKind::Pictures | FieldKind::Locations
        )
    }
}

/// Keyword table driving the fixed-prefix field match. Longer keywords first
/// so `doubleAcrostiche` wins over `acrostiche` would-be prefixes.
pub(crate) const FIELD_KEYWORDS: &[(&str, FieldKind)] = &[
    ("doubleAcrostiche", FieldKind::DoubleAcrostiche),
    ("acrostiche", FieldKind::Acrostiche),
    ("description", FieldKind::Description),
    ("verseLength", FieldKind::VerseLength),
    ("categories", FieldKind::Categories),
    ("locations", FieldKind::Locations),
    ("poemType", FieldKind::PoemType),
    ("pictures", FieldKind::Pictures),
    ("weight", FieldKind::Weight),
    ("title", FieldKind::Title),
    ("tags", FieldKind::Tags),
    ("date", FieldKind::Date),
    ("info", FieldKind::Info),
    ("id", FieldKind::Id),
];

/// Which multi-line accumulator continuation lines currently feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum MultilineMode {
    #[default]
    None,
    Tags,
    Categories,
    Pictures,
    Locations,
    Info,
}

impl MultilineMode {
    pub(crate) fn for_list(kind: FieldKind) -> MultilineMode {
        match kind {
            FieldKind::Tags => MultilineMode::Tags,
            FieldKind::Categories => MultilineMode::Categories,
            FieldKind::Pictures => MultilineMode::Pictures,
            FieldKind::Locations => MultilineMode::Locations,
            _ => MultilineMode::None,
        }
    }
}

/// Accumulators filled while metadata lines stream through a processor.
/// One instance per file import, discarded afterwards.
#[derive(Debug, Default)]
pub(crate) struct Accumulated {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub pictures: Vec<String>,
    pub locations: Vec<String>,
    pub info_lines: Vec<String>,
}

impl Accumulated {
    pub(crate) fn list_for(&mut self, mode: MultilineMode) -> Option<&mut Vec<String>> {
        match mode {
            MultilineMode::Tags => Some(&mut self.tags),
            MultilineMode::Categories => Some(&mut self.categories),
            MultilineMode::Pictures => Some(&mut self.pictures),
            MultilineMode::Locations => Some(&mut self.locations),
            MultilineMode::Info | MultilineMode::None => None,
        }
    }

    /// Multi-line info joined back into one text, if any was accumulated.
    pub(crate) fn info(&self) -> Option<String> {
        if self.info_lines.is_empty() {
            None
        } else {
            Some(self.info_lines.join("\n"))
        }
    }
}

/// Result of feeding a recognized field line to a processor.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FieldOutcome {
    /// A scalar value, unwrapped and unescaped, for the state machine to keep.
    Scalar(String),
    /// The line was consumed internally (list entries appended or a
    /// multi-line accumulation mode opened).
    Consumed,
}

pub(crate) trait MetadataDialect {
    /// Classifies a line by fixed-prefix keyword match, if it starts a field.
    fn field_kind(&self, line: &str) -> Option<FieldKind>;

    /// Parses a field-starting line: returns its scalar value or switches
    /// into a named multi-line accumulation mode.
    fn parse_field(&mut self, kind: FieldKind, line: &str) -> Result<FieldOutcome>;

    /// Feeds a non-field line to whichever accumulator is currently active.
    fn continuation(&mut self, line: &str);

    /// Hands over everything accumulated during the import.
    fn finish(self: Box<Self>) -> Accumulated;
}

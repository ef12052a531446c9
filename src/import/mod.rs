//! Poem file import.
//!
//! A poem file is a metadata block delimited by one of two marker pairs
//! (`+++` block-style, `---` indent-style) followed by a body of verse
//! lines. The importer reads the file line by line: the first marker fixes
//! the dialect and instantiates the matching processor, subsequent markers
//! toggle between metadata and body mode, and end of input triggers assembly
//! into a [`Poem`] plus its declared position within a season.
//!
//! Processor errors are not caught here; a malformed file is a fatal,
//! caller-visible error for that file only.

mod block;
mod body;
mod dialect;
mod indent;

use crate::config::{CorpusSettings, Metrics, Taxonomy};
use crate::error::{RecueilError, Result};
use crate::metric;
use crate::model::{Acrostiche, Paragraph, PartialImport, Poem, parse_poem_date};
use crate::tags;
use crate::taxonomy;
use block::BlockDialect;
use body::BodySegmenter;
use chrono::Datelike;
use dialect::{Accumulated, FieldKind, FieldOutcome, MetadataDialect};
use indent::IndentDialect;
use slug::slugify;
use std::path::Path;

/// Metadata delimiter of the block-style dialect.
pub const BLOCK_MARKER: &str = "+++";
/// Metadata delimiter of the indent-style dialect.
pub const INDENT_MARKER: &str = "---";

/// A successfully imported poem and its 0-based ordinal within its season.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub poem: Poem,
    pub position: usize,
}

/// File-at-a-time poem importer.
///
/// Holds explicit references to the taxonomy, metric table and corpus
/// settings; allocates fresh processor and segmenter instances per file, so
/// independent importers can run in parallel with zero coordination.
pub struct Importer<'a> {
    taxonomy: &'a Taxonomy,
    metrics: &'a Metrics,
    settings: &'a CorpusSettings,
    resolve_by_alias: bool,
}

impl<'a> Importer<'a> {
    pub fn new(taxonomy: &'a Taxonomy, metrics: &'a Metrics, settings: &'a CorpusSettings) -> Self {
        Self {
            taxonomy,
            metrics,
            settings,
            resolve_by_alias: false,
        }
    }

    /// Resolve category labels through subcategory aliases instead of names
    /// (secondary-language corpus).
    pub fn with_alias_resolution(mut self) -> Self {
        self.resolve_by_alias = true;
        self
    }

    pub fn import_file(&self, path: &Path, season_id: &str) -> Result<ImportOutcome> {
        tracing::info!(path = %path.display(), season_id, "Importing poem file");
        let content = std::fs::read_to_string(path)?;
        self.import_str(&content, season_id)
    }

    pub fn import_str(&self, content: &str, season_id: &str) -> Result<ImportOutcome> {
        let raw = scan(content, false)?;
        self.assemble(raw, season_id)
    }

    /// Metadata-only scan producing a [`PartialImport`] for anomaly checking,
    /// without assembling categories or paragraphs.
    pub fn scan_partial_file(&self, path: &Path, season_id: &str) -> Result<PartialImport> {
        let content = std::fs::read_to_string(path)?;
        self.scan_partial(&content, season_id)
    }

    pub fn scan_partial(&self, content: &str, season_id: &str) -> Result<PartialImport> {
        let raw = scan(content, true)?;
        let title = required(raw.meta.title, "title")?;
        let date = required(raw.meta.date, "date")?;
        let id = poem_id(raw.meta.id, &title, season_id);
        let verse_length = raw.meta.verse_length.unwrap_or_default();
        let info = raw.meta.info.or_else(|| raw.acc.info());
        // Lenient here: anomaly scanning must still see poems whose info is
        // missing or malformed; the validator reports the gap as an anomaly.
        let detailed_metric = metric::detailed_metric(&id, &verse_length, info.as_deref())
            .unwrap_or_default();
        Ok(PartialImport {
            poem_id: id,
            year: parse_poem_date(&date)?.year(),
            tags: raw.acc.tags,
            variable: metric::is_variable(&verse_length),
            detailed_metric,
            info,
            description: raw.meta.description,
        })
    }

    fn assemble(&self, raw: RawImport, season_id: &str) -> Result<ImportOutcome> {
        let RawImport {
            meta,
            acc,
            paragraphs,
        } = raw;
        let title = required(meta.title, "title")?;
        let date = required(meta.date, "date")?;
        let id = poem_id(meta.id, &title, season_id);
        let verse_length = meta.verse_length.unwrap_or_default();
        let info = meta.info.or_else(|| acc.info());
        let detailed_metric = metric::detailed_metric(&id, &verse_length, info.as_deref())?;

        let categories = if self.resolve_by_alias {
            taxonomy::map_categories_by_alias(&acc.categories, self.taxonomy, &id)?
        } else {
            taxonomy::map_categories(&acc.categories, self.taxonomy, &id)?
        };
        let extra_tags = tags::extra_tags(
            &acc.tags,
            self.taxonomy,
            self.metrics,
            self.settings.year_range(),
        );
        let position = meta.weight.map(|w| w.saturating_sub(1)).unwrap_or(0);

        tracing::debug!(id = %id, position, "Assembled poem");

        let poem = Poem {
            id,
            title,
            date,
            poem_type: meta.poem_type,
            // always the expanded form, never the -1 sentinel
            verse_length: detailed_metric,
            info,
            description: meta.description,
            categories,
            paragraphs,
            pictures: acc.pictures,
            locations: acc.locations,
            extra_tags,
            acrostiche: meta.acrostiche,
        };
        Ok(ImportOutcome { poem, position })
    }
}

/// Scalar metadata collected by the state machine.
#[derive(Debug, Default)]
struct MetaFields {
    title: Option<String>,
    id: Option<String>,
    date: Option<String>,
    verse_length: Option<String>,
    poem_type: Option<String>,
    info: Option<String>,
    description: Option<String>,
    acrostiche: Option<Acrostiche>,
    weight: Option<usize>,
}

impl MetaFields {
    fn set(&mut self, kind: FieldKind, value: String) -> Result<()> {
        match kind {
            FieldKind::Title => self.title = Some(value),
            FieldKind::Id => self.id = Some(value),
            FieldKind::Date => {
                parse_poem_date(&value)?;
                self.date = Some(value);
            }
            FieldKind::VerseLength => self.verse_length = Some(value),
            FieldKind::PoemType => self.poem_type = Some(value),
            FieldKind::Info => self.info = Some(value),
            FieldKind::Description => self.description = Some(value),
            FieldKind::Acrostiche => self.acrostiche = Some(Acrostiche::Simple(value)),
            FieldKind::DoubleAcrostiche => {
                self.acrostiche = Some(parse_double_acrostiche(&value)?);
            }
            FieldKind::Weight => {
                let weight = value.trim().parse::<usize>().map_err(|_| {
                    RecueilError::Format {
                        field: "weight",
                        value: value.clone(),
                    }
                })?;
                self.weight = Some(weight);
            }
            // list fields never surface as scalars
            FieldKind::Categories
            | FieldKind::Tags
            | FieldKind::Pictures
            | FieldKind::Locations => {}
        }
        Ok(())
    }
}

/// Both dialects must carry the ` | ` separator; a value without it is a
/// malformed acrostiche in either one.
fn parse_double_acrostiche(value: &str) -> Result<Acrostiche> {
    let (first, second) = value
        .split_once('|')
        .ok_or_else(|| RecueilError::MalformedAcrostiche(value.to_string()))?;
    Ok(Acrostiche::Double {
        first: first.trim().to_string(),
        second: second.trim().to_string(),
    })
}

fn poem_id(explicit: Option<String>, title: &str, season_id: &str) -> String {
    explicit.unwrap_or_else(|| format!("{}_{}", slugify(title), season_id))
}

fn required(field: Option<String>, name: &str) -> Result<String> {
    field.ok_or_else(|| RecueilError::Parse(format!("Missing required metadata field '{name}'")))
}

#[derive(Debug, Default)]
struct RawImport {
    meta: MetaFields,
    acc: Accumulated,
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    InMetadata,
    Body,
}

/// The per-line state machine. The first marker line fixes the dialect for
/// the whole file; the same marker toggles metadata and body mode afterwards.
fn scan(content: &str, metadata_only: bool) -> Result<RawImport> {
    let mut stage = Stage::Start;
    let mut marker = "";
    let mut processor: Option<Box<dyn MetadataDialect>> = None;
    let mut meta = MetaFields::default();
    let mut segmenter = BodySegmenter::new();

    for raw_line in content.lines() {
        let line = raw_line.trim_end_matches('\r');
        match stage {
            Stage::Start => {
                if line.trim_end() == BLOCK_MARKER {
                    processor = Some(Box::new(BlockDialect::new()));
                    marker = BLOCK_MARKER;
                    stage = Stage::InMetadata;
                } else if line.trim_end() == INDENT_MARKER {
                    processor = Some(Box::new(IndentDialect::new()));
                    marker = INDENT_MARKER;
                    stage = Stage::InMetadata;
                }
                // anything before the first marker is not part of the poem
            }
            Stage::InMetadata => {
                if line.trim_end() == marker {
                    if metadata_only {
                        break;
                    }
                    stage = Stage::Body;
                    continue;
                }
                let Some(processor) = processor.as_mut() else {
                    continue;
                };
                match processor.field_kind(line) {
                    Some(kind) => match processor.parse_field(kind, line)? {
                        FieldOutcome::Scalar(value) => meta.set(kind, value)?,
                        FieldOutcome::Consumed => {}
                    },
                    None => processor.continuation(line),
                }
            }
            Stage::Body => {
                if line.trim_end() == marker {
                    stage = Stage::InMetadata;
                    continue;
                }
                segmenter.feed(line);
            }
        }
    }

    let acc = processor.map(|p| p.finish()).unwrap_or_default();
    Ok(RawImport {
        meta,
        acc,
        paragraphs: segmenter.finish(),
    })
}

//! MODS -> flat worksheet record.
//!
//! [`Extractor::extract`] parses one MODS document and walks a fixed allowlist
//! of elements. The steps run in a fixed order and later steps may overwrite
//! keys set by earlier ones:
//!
//! 1. top-level leaf elements, through the field-name table
//! 2. `originInfo` children, through the same table (last occurrence wins)
//! 3. `subject` topics and geographic terms
//! 4. `relatedItem` titles
//! 5. `titleInfo` title, subtitle and alternative title
//! 6. `location` shelf locations
//! 7. `physicalDescription` form and extent
//! 8. `typeOfResource`
//! 9. `name` entries as linked agents
//! 10. date normalization of every EDTF column

pub mod name;
pub mod tree;

use std::collections::BTreeMap;

use tracing::debug;

use crate::date::{edtf, DateNormalizer, UnknownMonthPolicy};
use crate::error::{ExtractError, Result};
use crate::models::{Diagnostic, Extraction, Field, NormalizedRecord};
use crate::vocab::relators::DEFAULT_ROLE;
use name::ParsedName;
use tree::{as_list, collapse_whitespace, Element, Node};

/// Structured elements with a dedicated step; leaf elements are harvested
/// through [`Field::from_mods_element`].
const STRUCTURED: [&str; 8] = [
    "titleInfo",
    "originInfo",
    "subject",
    "relatedItem",
    "location",
    "physicalDescription",
    "typeOfResource",
    "name",
];

/// Knobs for an [`Extractor`].
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub unknown_month: UnknownMonthPolicy,
    /// Extra literal date corrections, applied over the built-in ones.
    pub date_corrections: BTreeMap<String, String>,
    /// Fail records without `<titleInfo>` instead of producing no title.
    pub require_title_info: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            unknown_month: UnknownMonthPolicy::default(),
            date_corrections: BTreeMap::new(),
            require_title_info: true,
        }
    }
}

/// Flattens MODS documents. Holds configuration only, so one instance can be
/// shared by any number of callers.
#[derive(Debug, Clone)]
pub struct Extractor {
    dates: DateNormalizer,
    require_title_info: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new(ExtractOptions::default())
    }
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Extractor {
            dates: DateNormalizer::new(options.unknown_month, &options.date_corrections),
            require_title_info: options.require_title_info,
        }
    }

    /// Parse and flatten one MODS document.
    pub fn extract(&self, mods_xml: &str) -> Result<Extraction> {
        let (root_name, root) = tree::parse(mods_xml)?;
        if root_name != "mods" {
            return Err(ExtractError::MissingRequiredField("mods"));
        }
        let empty = Element::default();
        let mods = root.as_element().unwrap_or(&empty);

        for (key, _) in mods.children() {
            if !STRUCTURED.contains(&key) && Field::from_mods_element(key).is_none() {
                debug!(element = key, "ignoring unharvested MODS element");
            }
        }

        let mut builder = RecordBuilder::default();

        copy_leaf_fields(mods, &mut builder);
        copy_origin_info(mods, &mut builder);
        copy_subjects(mods, &mut builder);
        copy_related_items(mods, &mut builder);
        self.copy_titles(mods, &mut builder)?;
        copy_locations(mods, &mut builder);
        copy_physical_description(mods, &mut builder);
        copy_resource_type(mods, &mut builder);
        copy_names(mods, &mut builder);
        self.normalize_dates(&mut builder);

        Ok(builder.finish())
    }

    fn copy_titles(&self, mods: &Element, builder: &mut RecordBuilder) -> Result<()> {
        let infos = match mods.get("titleInfo") {
            Some(node) => as_list(Some(node)),
            None if self.require_title_info => {
                return Err(ExtractError::MissingRequiredField("titleInfo"))
            }
            None => Vec::new(),
        };

        for info in infos {
            let title = info.get("title").map(Node::text_content).unwrap_or_default();
            if !title.is_empty() && !builder.contains(Field::Title) {
                builder.set(Field::Title, title.clone());
            }

            let subtitle = info
                .get("subTitle")
                .map(Node::text_content)
                .unwrap_or_default();
            if !subtitle.is_empty() && !builder.contains(Field::Subtitle) {
                builder.set(Field::Subtitle, subtitle);
            }

            if info.attr("type") == Some("alternative") && !title.is_empty() {
                builder.set(Field::AlternativeTitle, title);
            }
        }
        Ok(())
    }

    /// Repeated date elements were joined with `|`; each one is normalized on its own.
    fn normalize_dates(&self, builder: &mut RecordBuilder) {
        for (field, value) in builder.fields.iter_mut().filter(|(f, _)| f.is_edtf()) {
            let mut parts = Vec::new();
            for part in value.split('|') {
                match self.dates.normalize(part) {
                    Ok(normalized) => {
                        if !edtf::is_valid(&normalized) {
                            builder.diagnostics.push(Diagnostic::NonConformingDate {
                                field: *field,
                                value: normalized.clone(),
                            });
                        }
                        parts.push(normalized);
                    }
                    Err(e) => {
                        builder.diagnostics.push(Diagnostic::UnrecognizedDate {
                            field: *field,
                            value: part.to_string(),
                            reason: e.to_string(),
                        });
                        parts.push(part.to_string());
                    }
                }
            }
            *value = parts.join("|");
        }
    }
}

/// Accumulates one record; owned by a single [`Extractor::extract`] call.
#[derive(Debug, Default)]
struct RecordBuilder {
    fields: BTreeMap<Field, String>,
    diagnostics: Vec<Diagnostic>,
}

impl RecordBuilder {
    fn set(&mut self, field: Field, value: String) {
        self.fields.insert(field, value);
    }

    fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    fn finish(self) -> Extraction {
        Extraction {
            record: NormalizedRecord::from(self.fields),
            diagnostics: self.diagnostics,
        }
    }
}

/// Plain-string top-level elements (or lists of plain strings) in the field-name table.
fn copy_leaf_fields(mods: &Element, builder: &mut RecordBuilder) {
    for (key, node) in mods.children() {
        let Some(field) = Field::from_mods_element(key) else {
            continue;
        };
        let value = match node {
            Node::Text(text) => collapse_whitespace(text),
            Node::List(items) if items.iter().all(|i| matches!(i, Node::Text(_))) => items
                .iter()
                .map(Node::text_content)
                .collect::<Vec<_>>()
                .join("|"),
            _ => continue,
        };
        if !value.is_empty() {
            builder.set(field, value);
        }
    }
}

fn copy_origin_info(mods: &Element, builder: &mut RecordBuilder) {
    for info in as_list(mods.get("originInfo")) {
        let Some(info) = info.as_element() else {
            continue;
        };
        for (key, node) in info.children() {
            let Some(field) = Field::from_mods_element(key) else {
                continue;
            };
            let value = if field.is_edtf() {
                date_range(node).unwrap_or_else(|| node.text_content())
            } else {
                node.text_content()
            };
            if !value.is_empty() {
                builder.set(field, value);
            }
        }
    }
}

/// `<dateIssued point="start">` / `point="end"` pairs as an EDTF interval.
fn date_range(node: &Node) -> Option<String> {
    let Node::List(items) = node else {
        return None;
    };
    let point = |name: &str| {
        items
            .iter()
            .find(|i| i.attr("point") == Some(name))
            .map(Node::text_content)
    };
    let start = point("start").unwrap_or_default();
    let end = point("end").unwrap_or_default();
    if start.is_empty() && end.is_empty() {
        return None;
    }
    let side = |s: String| if s.is_empty() { "..".to_string() } else { s };
    Some(format!("{}/{}", side(start), side(end)))
}

fn copy_subjects(mods: &Element, builder: &mut RecordBuilder) {
    let mut topics = Vec::new();
    let mut places = Vec::new();
    let mut hierarchy: Option<String> = None;

    for subject in as_list(mods.get("subject")) {
        let Some(subject) = subject.as_element() else {
            continue;
        };
        for (key, node) in subject.children() {
            match key {
                "topic" => topics.extend(texts_of(node)),
                "geographic" => places.extend(texts_of(node)),
                "hierarchicalGeographic" => hierarchy = Some(node.descendant_texts().join(",")),
                _ => {}
            }
        }
    }

    if !topics.is_empty() {
        builder.set(Field::Subject, topics.join("|"));
    }
    if !places.is_empty() {
        builder.set(Field::GeographicSubject, places.join("|"));
    }
    if let Some(hierarchy) = hierarchy {
        builder.set(Field::GeographicSubject, hierarchy);
    }
}

fn texts_of(node: &Node) -> Vec<String> {
    as_list(Some(node))
        .into_iter()
        .map(Node::text_content)
        .filter(|t| !t.is_empty())
        .collect()
}

fn copy_related_items(mods: &Element, builder: &mut RecordBuilder) {
    let titles: Vec<String> = as_list(mods.get("relatedItem"))
        .into_iter()
        .map(|item| {
            as_list(item.get("titleInfo"))
                .first()
                .and_then(|info| info.get("title"))
                .map(Node::text_content)
                .unwrap_or_default()
        })
        .collect();
    builder.set(Field::RelatedItem, titles.join("|"));
}

fn copy_locations(mods: &Element, builder: &mut RecordBuilder) {
    let Some(node) = mods.get("location") else {
        return;
    };
    let shelves: Vec<String> = as_list(Some(node))
        .into_iter()
        .map(|location| {
            location
                .get("physicalLocation")
                .map(Node::text_content)
                .unwrap_or_default()
        })
        .collect();
    builder.set(Field::Location, shelves.join("|"));
}

fn copy_physical_description(mods: &Element, builder: &mut RecordBuilder) {
    let descriptions = as_list(mods.get("physicalDescription"));
    let first = descriptions.first();
    let part = |key: &str| {
        first
            .and_then(|d| d.get(key))
            .map(Node::text_content)
            .unwrap_or_default()
    };
    builder.set(Field::PhysicalDescription, part("form"));
    builder.set(Field::Extent, part("extent"));
}

fn copy_resource_type(mods: &Element, builder: &mut RecordBuilder) {
    let value = mods
        .get("typeOfResource")
        .map(Node::text_content)
        .unwrap_or_default();
    builder.set(Field::ResourceType, value);
}

fn copy_names(mods: &Element, builder: &mut RecordBuilder) {
    let mut agents = Vec::new();
    for node in as_list(mods.get("name")) {
        let parsed = ParsedName::from_node(node);
        if !parsed.role.is_empty() && !parsed.role_term().matched {
            builder.diagnostics.push(Diagnostic::UnrecognizedRole {
                role: parsed.role.clone(),
                fallback: DEFAULT_ROLE.to_string(),
            });
        }
        agents.push(parsed.to_agent());
    }
    builder.set(Field::LinkedAgent, agents.join("|"));
}

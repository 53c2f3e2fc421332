use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// A target worksheet column produced by the extractor.
///
/// The set is closed: every key of a [`NormalizedRecord`] is one of these, so
/// unknown source elements can never leak into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Subtitle,
    AlternativeTitle,
    Abstract,
    EdtfDateIssued,
    EdtfDateCreated,
    EdtfDateOther,
    EdtfCopyrightDate,
    Publisher,
    Genre,
    ResourceType,
    AccessCondition,
    Location,
    Issuance,
    Edition,
    Identifier,
    Subject,
    GeographicSubject,
    RelatedItem,
    PhysicalDescription,
    Extent,
    LinkedAgent,
}

impl Field {
    /// Worksheet column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Subtitle => "field_subtitle",
            Field::AlternativeTitle => "field_alternative_title",
            Field::Abstract => "field_abstract",
            Field::EdtfDateIssued => "field_edtf_date_issued",
            Field::EdtfDateCreated => "field_edtf_date_created",
            Field::EdtfDateOther => "field_edtf_date_other",
            Field::EdtfCopyrightDate => "field_edtf_copyright_date",
            Field::Publisher => "field_publisher",
            Field::Genre => "field_genre",
            Field::ResourceType => "field_resource_type",
            Field::AccessCondition => "field_access_condition",
            Field::Location => "field_location",
            Field::Issuance => "field_issuance",
            Field::Edition => "field_edition",
            Field::Identifier => "field_identifier",
            Field::Subject => "field_subject",
            Field::GeographicSubject => "field_geographic_subject",
            Field::RelatedItem => "field_related_item",
            Field::PhysicalDescription => "field_physical_description",
            Field::Extent => "field_extent",
            Field::LinkedAgent => "field_linked_agent",
        }
    }

    /// The field-name table: MODS element name -> target column.
    ///
    /// Used both for top-level leaf elements and for the children of
    /// `<originInfo>`.
    pub fn from_mods_element(name: &str) -> Option<Field> {
        let field = match name {
            "note" | "abstract" => Field::Abstract,
            "dateIssued" => Field::EdtfDateIssued,
            "dateCreated" => Field::EdtfDateCreated,
            "dateOther" => Field::EdtfDateOther,
            "copyrightDate" => Field::EdtfCopyrightDate,
            "publisher" => Field::Publisher,
            "title" => Field::Title,
            "genre" => Field::Genre,
            "typeOfResource" => Field::ResourceType,
            "accessCondition" => Field::AccessCondition,
            "place" => Field::Location,
            "issuance" => Field::Issuance,
            "edition" => Field::Edition,
            "identifier" => Field::Identifier,
            "sub_title" => Field::Subtitle,
            _ => return None,
        };
        Some(field)
    }

    /// Columns holding extended date/time values; these go through the date normalizer.
    pub fn is_edtf(&self) -> bool {
        self.as_str().contains("edtf")
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The flattened bibliographic record for one object.
///
/// Multi-valued columns are joined with `|`; a value that itself contains `|`
/// cannot be told apart from two values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord(BTreeMap<Field, String>);

impl NormalizedRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl From<BTreeMap<Field, String>> for NormalizedRecord {
    fn from(fields: BTreeMap<Field, String>) -> Self {
        NormalizedRecord(fields)
    }
}

/// A non-fatal problem found while normalizing a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No date rule matched and the value is not valid EDTF; the raw value was kept.
    UnrecognizedDate {
        field: Field,
        value: String,
        reason: String,
    },
    /// A date rule produced a value that is not valid EDTF (the legacy `YYYY-??` sentinel).
    NonConformingDate { field: Field, value: String },
    /// A contributor role missing from the relator table; the fallback code was used.
    UnrecognizedRole { role: String, fallback: String },
}

impl Diagnostic {
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::UnrecognizedDate { .. } => "unrecognized date",
            Diagnostic::NonConformingDate { .. } => "non-conforming date",
            Diagnostic::UnrecognizedRole { .. } => "unrecognized role",
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnrecognizedDate { field, reason, .. } => {
                write!(f, "{}: {}", field, reason)
            }
            Diagnostic::NonConformingDate { field, value } => {
                write!(f, "{}: '{}' is not valid EDTF", field, value)
            }
            Diagnostic::UnrecognizedRole { role, fallback } => {
                write!(f, "role '{}' not in relator table, using {}", role, fallback)
            }
        }
    }
}

/// Result of a successful extraction: the record plus anything worth a second look.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub record: NormalizedRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Per-object outcome of a batch run, as rendered by the reports.
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub pid: String,
    #[serde(flatten)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecordStatus {
    Extracted {
        fields: NormalizedRecord,
        diagnostics: Vec<Diagnostic>,
    },
    /// Stub datastream too short to be a MODS document.
    Skipped,
    Failed {
        error: String,
    },
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatus::Extracted { .. } => write!(f, "extracted"),
            RecordStatus::Skipped => write!(f, "skipped"),
            RecordStatus::Failed { .. } => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_table() {
        assert_eq!(Field::from_mods_element("note"), Some(Field::Abstract));
        assert_eq!(Field::from_mods_element("abstract"), Some(Field::Abstract));
        assert_eq!(Field::from_mods_element("place"), Some(Field::Location));
        assert_eq!(Field::from_mods_element("extension"), None);
    }

    #[test]
    fn test_edtf_fields() {
        assert!(Field::EdtfDateIssued.is_edtf());
        assert!(Field::EdtfCopyrightDate.is_edtf());
        assert!(!Field::Title.is_edtf());
        assert!(!Field::RelatedItem.is_edtf());
    }

    #[test]
    fn test_record_serializes_with_column_names() {
        let mut fields = BTreeMap::new();
        fields.insert(Field::Title, "A title".to_string());
        fields.insert(Field::RelatedItem, String::new());
        let record = NormalizedRecord::from(fields);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "A title");
        assert_eq!(json["field_related_item"], "");
    }

    #[test]
    fn test_report_status_tag() {
        let report = RecordReport {
            pid: "demo:1".to_string(),
            status: RecordStatus::Failed {
                error: "boom".to_string(),
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pid"], "demo:1");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
    }
}

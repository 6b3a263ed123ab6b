//! Record shapes exchanged with the extraction engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Class name marking a relation-kind record.
pub const RELATIONSHIP_CLASS: &str = "relationship";

/// Document id used when the engine output carries none.
pub const UNKNOWN_DOCUMENT_ID: &str = "unknown_doc";

/// Character span of an extraction in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharInterval {
    #[serde(default)]
    pub start_pos: Option<u64>,
    #[serde(default)]
    pub end_pos: Option<u64>,
}

impl CharInterval {
    /// Create a span
    pub fn new(start_pos: u64, end_pos: u64) -> Self {
        Self {
            start_pos: Some(start_pos),
            end_pos: Some(end_pos),
        }
    }
}

/// Which side of the tagged union a record falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Entity mention: any non-empty class other than `relationship`
    Entity,
    /// Relation trigger: class `relationship`
    Relation,
    /// No class at all; ignored by normalization
    Unclassified,
}

/// One span-level finding produced by the extraction engine.
///
/// Every field is optional on the wire; engine output is noisy and the
/// normalizer tolerates gaps rather than rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRecord {
    pub extraction_class: String,
    pub extraction_text: String,
    /// Usually a mapping of scalar values; anything else is treated as absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_interval: Option<CharInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_status: Option<String>,
}

impl ExtractionRecord {
    /// Create a record of `class` covering `text`
    pub fn new(class: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            extraction_class: class.into(),
            extraction_text: text.into(),
            ..Default::default()
        }
    }

    /// Create a relation-kind record linking `head` to `tail`.
    pub fn relation(
        trigger: impl Into<String>,
        (head_text, head_class): (&str, &str),
        relation_type: &str,
        (tail_text, tail_class): (&str, &str),
    ) -> Self {
        Self::new(RELATIONSHIP_CLASS, trigger)
            .with_attribute("head_text", head_text)
            .with_attribute("head_class", head_class)
            .with_attribute("relation_type", relation_type)
            .with_attribute("tail_text", tail_text)
            .with_attribute("tail_class", tail_class)
    }

    /// Add an attribute, turning `attributes` into a mapping if needed
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = match self.attributes.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        map.insert(key.into(), value.into());
        self.attributes = Some(Value::Object(map));
        self
    }

    /// Set the character span
    pub fn with_interval(mut self, start_pos: u64, end_pos: u64) -> Self {
        self.char_interval = Some(CharInterval::new(start_pos, end_pos));
        self
    }

    /// Set the extraction index
    pub fn with_index(mut self, index: i64) -> Self {
        self.extraction_index = Some(index);
        self
    }

    /// Set the alignment status
    pub fn with_alignment(mut self, status: impl Into<String>) -> Self {
        self.alignment_status = Some(status.into());
        self
    }

    /// Classify this record.
    pub fn kind(&self) -> RecordKind {
        match self.extraction_class.as_str() {
            "" => RecordKind::Unclassified,
            RELATIONSHIP_CLASS => RecordKind::Relation,
            _ => RecordKind::Entity,
        }
    }

    /// Attributes as a mapping; `None` when absent or not a mapping.
    pub fn attribute_map(&self) -> Option<&Map<String, Value>> {
        self.attributes.as_ref().and_then(Value::as_object)
    }

    /// Start offset, when the record is aligned to the source text
    pub fn start_pos(&self) -> Option<u64> {
        self.char_interval.and_then(|interval| interval.start_pos)
    }

    /// End offset, when the record is aligned to the source text
    pub fn end_pos(&self) -> Option<u64> {
        self.char_interval.and_then(|interval| interval.end_pos)
    }
}

/// Engine output for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatedDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub text: String,
    pub extractions: Vec<ExtractionRecord>,
}

impl AnnotatedDocument {
    /// Create a document from its text and records
    pub fn new(text: impl Into<String>, extractions: Vec<ExtractionRecord>) -> Self {
        Self {
            document_id: None,
            text: text.into(),
            extractions,
        }
    }

    /// Set the document id
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// The document id, or `unknown_doc` when the engine gave none.
    pub fn document_id_or_default(&self) -> &str {
        self.document_id.as_deref().unwrap_or(UNKNOWN_DOCUMENT_ID)
    }
}

/// A few-shot example handed to the engine alongside the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleData {
    pub text: String,
    pub extractions: Vec<ExtractionRecord>,
}

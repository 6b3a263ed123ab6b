use crate::args::PlanArgs;
use graphweave::GraphweaveError;
use graphweave::extraction::{AnnotatedDocument, ExtractionRecord, ExtractionRequest};
use serde_json::Value;
use std::path::Path;

/// Read an engine result file.
///
/// Accepts either a full document object or a bare array of records.
pub fn read_document(path: &Path) -> graphweave::Result<AnnotatedDocument> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| GraphweaveError::Parse(format!("{}: {}", path.display(), e)))?;

    let parsed = if value.is_array() {
        serde_json::from_value::<Vec<ExtractionRecord>>(value)
            .map(|records| AnnotatedDocument::new(String::new(), records))
    } else {
        serde_json::from_value::<AnnotatedDocument>(value)
    };
    parsed.map_err(|e| GraphweaveError::Parse(format!("{}: {}", path.display(), e)))
}

/// Split `key=value`, parsing the value as JSON and falling back to a string.
pub fn parse_assignment(raw: &str) -> graphweave::Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| GraphweaveError::Other(format!("Expected KEY=VALUE, got '{}'", raw)))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(GraphweaveError::Other(format!("Missing key in '{}'", raw)));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Build an extraction request from `plan` arguments.
pub fn build_request(args: &PlanArgs) -> graphweave::Result<ExtractionRequest> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err(GraphweaveError::Other("No input text given".to_string())),
    };

    let mut request = ExtractionRequest::new(text);
    if let Some(strategy) = &args.strategy {
        request = request.with_strategy(strategy.as_str());
    }
    if !args.entities.is_empty() {
        request = request.with_entities(args.entities.iter().cloned());
    }
    if !args.relations.is_empty() {
        request = request.with_relations(args.relations.iter().cloned());
    }
    if let Some(breadth) = &args.breadth {
        request = request.with_breadth(breadth.as_str());
    }
    if let Some(depth) = &args.depth {
        request = request.with_depth(depth.as_str());
    }
    if let Some(confidence) = &args.confidence {
        request = request.with_confidence(confidence.as_str());
    }
    if let Some(scope) = &args.context_scope {
        request = request.with_context_scope(scope.as_str());
    }
    for raw in &args.overrides {
        let (key, value) = parse_assignment(raw)?;
        request = request.with_engine_override(key, value);
    }
    Ok(request)
}

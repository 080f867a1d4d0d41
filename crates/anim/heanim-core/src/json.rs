//! JSON debug export of parsed documents (stable schema for diffing and
//! external tooling). There is no JSON import path; XML is the only wire
//! format.

use crate::model::AnimationDocument;

/// Render a document as `serde_json::Value`.
pub fn document_to_json(doc: &AnimationDocument) -> serde_json::Value {
    serde_json::to_value(doc).unwrap_or(serde_json::Value::Null)
}

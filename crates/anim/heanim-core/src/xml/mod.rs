//! XML codec for the engine's animation keyframe documents.
//!
//! Encode and decode are symmetric over the model in `crate::model`; neither
//! side performs unit conversion. Output is UTF-8, tab-indented, one element
//! per line.

mod decode;
mod encode;

pub use decode::decode_document;
pub use encode::{encode_camera, encode_document, encode_uv};

use crate::error::CodecError;

fn xml_err<E: std::fmt::Display>(e: E) -> CodecError {
    CodecError::Malformed(format!("xml error: {e}"))
}

//! Hedgehog Engine animation XML interchange (host-agnostic core).
//!
//! This crate owns the animation curve model, the per-kind channel
//! registries, the numeric conversions crossing the host/engine boundary,
//! and the XML codec for the three documented schema variants
//! (`CAMAnimation` v2, `UVAnimation` v2 legacy, `UVAnimation` v3). It never
//! touches a host application; the companion `heanim-host` crate defines the
//! adapter boundary.

pub mod channels;
pub mod convert;
pub mod error;
pub mod json;
pub mod model;
pub mod xml;

// Re-exports for consumers (adapters, drivers)
pub use channels::{CameraChannel, ChannelTag, LegacyUvChannel, UvChannel};
pub use convert::{aggregate_frame_range, angle_to_fov, flip_axis, fov_to_angle};
pub use error::{CodecError, ConvertError};
pub use json::document_to_json;
pub use model::{
    AnimationDocument, CameraClip, CameraDocument, Channel, FrameSpan, Keyframe, UvClip,
    UvDocument, Vec3,
};
pub use xml::{decode_document, encode_camera, encode_document, encode_uv};

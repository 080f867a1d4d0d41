//! Host curve adapter boundary and import/export drivers.
//!
//! `heanim-core` owns the model and the XML codec; this crate owns the seam
//! to a live host application. Adapters implement the traits in `adapter`;
//! the drivers in `export` and `import` orchestrate them and apply the
//! host↔engine unit conversions. `memory` ships an in-memory reference host
//! for tests and examples.

pub mod adapter;
pub mod export;
pub mod import;
pub mod memory;

pub use adapter::{CameraAdapter, CameraRigState, HostAdapter, HostError, UvAdapter, UvTarget};
pub use export::{
    export_camera_document, export_camera_xml, export_uv_document, export_uv_xml, ExportError,
};
pub use import::{
    import_bytes, import_camera_document, import_document, import_uv_document, ImportError,
};
pub use memory::{Curve, Interpolation, MemoryHost};

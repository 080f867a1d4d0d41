//! Host curve adapter boundary.
//!
//! The core never touches a live scene; everything host-specific — property
//! path strings, object creation, keyframe insertion — sits behind these
//! traits. Adapters hand channels over already mapped to the registry enums
//! and in host units; the drivers in `export`/`import` own the unit
//! conversion between host and engine space.

use thiserror::Error;

use heanim_core::{CameraChannel, CameraClip, Channel, UvChannel, UvClip, Vec3};

/// Errors reported by a host adapter. The drivers never retry on these; a
/// missing target is the caller's problem to fix, not the core's to recover.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no camera rig named `{0}` in the scene")]
    MissingRig(String),
    #[error("no material named `{0}` in the scene")]
    MissingMaterial(String),
    #[error("no active material selected")]
    NoActiveMaterial,
    #[error("material `{material}` has no texture `{texture}`")]
    MissingTexture { material: String, texture: String },
    #[error("rig `{rig}` has no `{property}` to evaluate")]
    MissingProperty { rig: String, property: String },
}

/// Environment queries every adapter provides, used when a document omits a
/// value or when an imported document should reconfigure the scene.
pub trait HostAdapter {
    fn scene_fps(&self) -> u32;

    fn aspect_ratio(&self) -> f64;

    /// Current scene frame extent, used as the clip extent on UV export.
    fn scene_frames(&self) -> (i32, i32);

    /// Apply an imported document's frame rate and aggregated frame range.
    fn configure_scene(&mut self, fps: u32, start: i32, end: i32);
}

/// Baseline scalar state of a camera rig, in host units, sampled at the
/// rig's action start frame. Rotation is absent: the rig's orientation rides
/// on its aim constraint, so the wire rotation fields are always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRigState {
    pub start_frame: i32,
    pub end_frame: i32,
    pub position: Vec3,
    pub aim_position: Vec3,
    pub aim_roll: f64,
    pub near_clip: f64,
    pub far_clip: f64,
    /// Vertical view angle (the host-side projection quantity).
    pub view_angle: f64,
}

/// Read/write access to camera rigs.
pub trait CameraAdapter: HostAdapter {
    /// Rig names that currently carry authored animation.
    fn animated_rigs(&self) -> Vec<String>;

    fn rig_state(&self, rig: &str) -> Result<CameraRigState, HostError>;

    /// Authored channels of the rig, already mapped to the camera registry.
    /// The adapter owns the host property-path knowledge needed for this.
    fn rig_channels(&self, rig: &str) -> Vec<Channel<CameraChannel>>;

    /// Evaluate the rig's derived vertical view angle at one frame. This is
    /// an explicit per-frame request; adapters must not move any shared
    /// playback cursor to answer it.
    fn evaluate_view_angle(&self, rig: &str, frame: u32) -> Result<f64, HostError>;

    /// Create or locate the rig for `clip` (host units), write its baseline
    /// state, insert one key per sample, then force every touched curve's
    /// interpolation to linear.
    fn write_camera_clip(&mut self, clip: &CameraClip) -> Result<(), HostError>;
}

/// One authored UV animator: a node-group instance driving one texture.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UvTarget {
    pub node_group: String,
    pub texture: String,
}

/// Read/write access to material UV animators.
pub trait UvAdapter: HostAdapter {
    /// Material the export targets.
    fn active_material(&self) -> Result<String, HostError>;

    /// Every node-group instance with authored samples, one entry per
    /// instance even when two instances drive the same texture.
    fn animated_textures(&self) -> Vec<UvTarget>;

    fn texture_channels(&self, target: &UvTarget) -> Vec<Channel<UvChannel>>;

    /// Texture names carried by the material.
    fn material_textures(&self, material: &str) -> Result<Vec<String>, HostError>;

    /// Create or locate the animator for the clip's texture in `material`,
    /// insert one key per sample, then force the touched curves to linear.
    fn write_uv_clip(&mut self, material: &str, clip: &UvClip) -> Result<(), HostError>;
}

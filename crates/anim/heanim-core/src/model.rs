//! Canonical animation curve model.
//!
//! One decoded or to-be-encoded document is a set of clips; each clip owns a
//! set of typed channels; each channel is a sparse, frame-sorted sample list.
//! Values inside the model are always raw engine units — axis flips and FOV
//! reprojection happen at the host boundary, never here.

use serde::{Deserialize, Serialize};

use crate::channels::{CameraChannel, ChannelTag, UvChannel};

/// 3D vector for baseline scalar state (engine axis convention).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A single sample: integer frame, float value. Immutable once written.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub frame: u32,
    pub value: f64,
}

impl Keyframe {
    pub fn new(frame: u32, value: f64) -> Self {
        Self { frame, value }
    }
}

/// One animated scalar property of a clip, tagged with its registry kind.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Channel<K> {
    pub kind: K,
    pub samples: Vec<Keyframe>,
}

impl<K: ChannelTag> Channel<K> {
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            samples: Vec::new(),
        }
    }

    pub fn with_samples(kind: K, samples: Vec<Keyframe>) -> Self {
        Self { kind, samples }
    }

    /// Sort samples by frame and collapse duplicate frames, keeping the last
    /// occurrence (matches the engine's insert-overwrite application order).
    pub fn normalize(&mut self) {
        self.samples.sort_by_key(|kf| kf.frame);
        let mut out: Vec<Keyframe> = Vec::with_capacity(self.samples.len());
        for kf in self.samples.drain(..) {
            match out.last_mut() {
                Some(last) if last.frame == kf.frame => *last = kf,
                _ => out.push(kf),
            }
        }
        self.samples = out;
    }

    /// True when samples are strictly increasing by frame.
    pub fn is_sorted(&self) -> bool {
        self.samples.windows(2).all(|w| w[0].frame < w[1].frame)
    }
}

/// Frame extent shared by every clip kind; lets frame-range aggregation stay
/// generic over camera and UV clips.
pub trait FrameSpan {
    fn start_frame(&self) -> i32;
    fn end_frame(&self) -> i32;
}

/// One camera rig animation: baseline scalar state snapshotted at
/// `start_frame` plus per-property keyframe channels.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CameraClip {
    pub name: String,
    /// Wire boilerplate; `flag1` is the rotation-or-aim selector (1 = aim).
    pub flag1: u32,
    pub flag2: u32,
    pub flag3: u32,
    pub flag4: u32,
    pub frame_rate: u32,
    pub start_frame: i32,
    pub end_frame: i32,
    pub cam_pos: Vec3,
    pub cam_rot: Vec3,
    pub aim_pos: Vec3,
    pub aim_z_rotation: f64,
    pub z_near: f64,
    pub z_far: f64,
    pub fov: f64,
    pub aspect_ratio: f64,
    pub channels: Vec<Channel<CameraChannel>>,
}

impl CameraClip {
    /// Look up the channel of a given kind, if the clip carries one.
    pub fn channel(&self, kind: CameraChannel) -> Option<&Channel<CameraChannel>> {
        self.channels.iter().find(|c| c.kind == kind)
    }

    /// Basic invariants: frame extent ordered, positive frame rate, channels
    /// unique per kind and strictly frame-sorted.
    pub fn validate(&self) -> Result<(), String> {
        if self.frame_rate == 0 {
            return Err(format!("clip `{}`: frame_rate must be positive", self.name));
        }
        if self.start_frame > self.end_frame {
            return Err(format!(
                "clip `{}`: start_frame {} exceeds end_frame {}",
                self.name, self.start_frame, self.end_frame
            ));
        }
        validate_channels(&self.name, &self.channels)
    }
}

impl FrameSpan for CameraClip {
    fn start_frame(&self) -> i32 {
        self.start_frame
    }

    fn end_frame(&self) -> i32 {
        self.end_frame
    }
}

/// One texture's UV transform animation. `name` is a single texture after
/// decode fan-out; an encoder input may legitimately repeat texture names
/// (one clip per authored node-group instance).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UvClip {
    pub name: String,
    pub frame_rate: u32,
    pub start_frame: i32,
    pub end_frame: i32,
    pub channels: Vec<Channel<UvChannel>>,
}

impl UvClip {
    pub fn channel(&self, kind: UvChannel) -> Option<&Channel<UvChannel>> {
        self.channels.iter().find(|c| c.kind == kind)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("UV clip: texture name must not be empty".into());
        }
        if self.frame_rate == 0 {
            return Err(format!("clip `{}`: frame_rate must be positive", self.name));
        }
        if self.start_frame > self.end_frame {
            return Err(format!(
                "clip `{}`: start_frame {} exceeds end_frame {}",
                self.name, self.start_frame, self.end_frame
            ));
        }
        validate_channels(&self.name, &self.channels)
    }
}

impl FrameSpan for UvClip {
    fn start_frame(&self) -> i32 {
        self.start_frame
    }

    fn end_frame(&self) -> i32 {
        self.end_frame
    }
}

fn validate_channels<K: ChannelTag>(clip: &str, channels: &[Channel<K>]) -> Result<(), String> {
    for (i, ch) in channels.iter().enumerate() {
        if !ch.is_sorted() {
            return Err(format!(
                "clip `{clip}`: channel {:?} has unsorted or duplicate frames",
                ch.kind
            ));
        }
        if channels[..i].iter().any(|prev| prev.kind == ch.kind) {
            return Err(format!("clip `{clip}`: duplicate channel {:?}", ch.kind));
        }
    }
    Ok(())
}

/// A full camera animation document (`CAMAnimation`, schema version 2).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CameraDocument {
    pub clips: Vec<CameraClip>,
}

/// A multi-texture UV animation document (`UVAnimation`, schema version 3).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UvDocument {
    pub material_name: String,
    pub clips: Vec<UvClip>,
}

/// Any decoded document. The legacy single-texture UV schema (version 2) is
/// recognized but carries no data; see the decoder for details.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum AnimationDocument {
    Camera(CameraDocument),
    Uv(UvDocument),
    UvLegacy,
}

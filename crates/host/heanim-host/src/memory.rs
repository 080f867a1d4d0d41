//! In-memory reference host.
//!
//! A minimal scene model implementing the adapter traits over plain maps,
//! used by the integration tests and the example. Curves record their
//! interpolation mode, so the import contract (every touched curve forced to
//! linear) is observable. Handles follow the `{owner}/{object}.{property}`
//! shape a real adapter would address.

use hashbrown::HashMap;

use heanim_core::{CameraChannel, CameraClip, Channel, Keyframe, UvChannel, UvClip};

use crate::adapter::{
    CameraAdapter, CameraRigState, HostAdapter, HostError, UvAdapter, UvTarget,
};

/// Per-curve interpolation mode. New curves default to the host's bezier;
/// imports must end with every touched curve linear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    #[default]
    Bezier,
    Linear,
}

/// One animation curve: frame-sorted samples plus interpolation mode.
#[derive(Clone, Debug, Default)]
pub struct Curve {
    pub samples: Vec<Keyframe>,
    pub interpolation: Interpolation,
}

impl Curve {
    fn insert(&mut self, frame: u32, value: f64) {
        match self.samples.binary_search_by_key(&frame, |kf| kf.frame) {
            Ok(i) => self.samples[i].value = value,
            Err(i) => self.samples.insert(i, Keyframe::new(frame, value)),
        }
    }

    /// Evaluate at `frame` with linear interpolation, clamped to the curve's
    /// extent. `None` for an empty curve.
    pub fn sample(&self, frame: u32) -> Option<f64> {
        let first = self.samples.first()?;
        if frame <= first.frame {
            return Some(first.value);
        }
        let last = self.samples.last()?;
        if frame >= last.frame {
            return Some(last.value);
        }
        let i = match self.samples.binary_search_by_key(&frame, |kf| kf.frame) {
            Ok(i) => return Some(self.samples[i].value),
            Err(i) => i,
        };
        let (a, b) = (self.samples[i - 1], self.samples[i]);
        let t = (frame - a.frame) as f64 / (b.frame - a.frame) as f64;
        Some(a.value + (b.value - a.value) * t)
    }
}

#[derive(Clone, Debug)]
struct UvAnimator {
    material: String,
    target: UvTarget,
}

/// The reference host scene.
#[derive(Debug)]
pub struct MemoryHost {
    fps: u32,
    aspect: f64,
    frame_start: i32,
    frame_end: i32,
    active_material: Option<String>,
    rigs: HashMap<String, CameraRigState>,
    materials: HashMap<String, Vec<String>>,
    animators: Vec<UvAnimator>,
    curves: HashMap<String, Curve>,
}

impl MemoryHost {
    pub fn new(fps: u32, aspect: f64) -> Self {
        Self {
            fps,
            aspect,
            frame_start: 0,
            frame_end: 0,
            active_material: None,
            rigs: HashMap::new(),
            materials: HashMap::new(),
            animators: Vec::new(),
            curves: HashMap::new(),
        }
    }

    pub fn set_scene_frames(&mut self, start: i32, end: i32) {
        self.frame_start = start;
        self.frame_end = end;
    }

    /// Current scene settings, for assertions: (fps, start, end).
    pub fn scene(&self) -> (u32, i32, i32) {
        (self.fps, self.frame_start, self.frame_end)
    }

    pub fn add_rig(&mut self, name: &str, state: CameraRigState) {
        self.rigs.insert(name.to_string(), state);
    }

    pub fn rig(&self, name: &str) -> Option<&CameraRigState> {
        self.rigs.get(name)
    }

    /// Author a camera curve with the host's default interpolation.
    pub fn author_camera_curve(&mut self, rig: &str, kind: CameraChannel, samples: &[(u32, f64)]) {
        let curve = self.curves.entry(camera_handle(rig, kind)).or_default();
        for &(frame, value) in samples {
            curve.insert(frame, value);
        }
    }

    pub fn add_material(&mut self, name: &str, textures: &[&str]) {
        self.materials
            .insert(name.to_string(), textures.iter().map(|t| t.to_string()).collect());
    }

    pub fn set_active_material(&mut self, name: &str) {
        self.active_material = Some(name.to_string());
    }

    /// Author a UV animator (node-group instance) driving `texture`.
    pub fn author_uv_curve(
        &mut self,
        material: &str,
        node_group: &str,
        texture: &str,
        kind: UvChannel,
        samples: &[(u32, f64)],
    ) {
        let target = UvTarget {
            node_group: node_group.to_string(),
            texture: texture.to_string(),
        };
        if !self
            .animators
            .iter()
            .any(|a| a.material == material && a.target == target)
        {
            self.animators.push(UvAnimator {
                material: material.to_string(),
                target: target.clone(),
            });
        }
        let curve = self
            .curves
            .entry(uv_handle(material, node_group, kind))
            .or_default();
        for &(frame, value) in samples {
            curve.insert(frame, value);
        }
    }

    pub fn curve(&self, handle: &str) -> Option<&Curve> {
        self.curves.get(handle)
    }

    pub fn camera_curve(&self, rig: &str, kind: CameraChannel) -> Option<&Curve> {
        self.curves.get(&camera_handle(rig, kind))
    }

    pub fn uv_curve(&self, material: &str, node_group: &str, kind: UvChannel) -> Option<&Curve> {
        self.curves.get(&uv_handle(material, node_group, kind))
    }
}

impl HostAdapter for MemoryHost {
    fn scene_fps(&self) -> u32 {
        self.fps
    }

    fn aspect_ratio(&self) -> f64 {
        self.aspect
    }

    fn scene_frames(&self) -> (i32, i32) {
        (self.frame_start, self.frame_end)
    }

    fn configure_scene(&mut self, fps: u32, start: i32, end: i32) {
        self.fps = fps;
        self.frame_start = start;
        self.frame_end = end;
    }
}

impl CameraAdapter for MemoryHost {
    fn animated_rigs(&self) -> Vec<String> {
        let mut rigs: Vec<String> = self
            .rigs
            .keys()
            .filter(|rig| {
                CameraChannel::ALL
                    .iter()
                    .any(|kind| self.curves.contains_key(&camera_handle(rig, *kind)))
            })
            .cloned()
            .collect();
        rigs.sort();
        rigs
    }

    fn rig_state(&self, rig: &str) -> Result<CameraRigState, HostError> {
        self.rigs
            .get(rig)
            .cloned()
            .ok_or_else(|| HostError::MissingRig(rig.to_string()))
    }

    fn rig_channels(&self, rig: &str) -> Vec<Channel<CameraChannel>> {
        CameraChannel::ALL
            .iter()
            .filter_map(|kind| {
                self.curves
                    .get(&camera_handle(rig, *kind))
                    .map(|curve| Channel::with_samples(*kind, curve.samples.clone()))
            })
            .collect()
    }

    fn evaluate_view_angle(&self, rig: &str, frame: u32) -> Result<f64, HostError> {
        if let Some(curve) = self.curves.get(&camera_handle(rig, CameraChannel::Fov)) {
            if let Some(value) = curve.sample(frame) {
                return Ok(value);
            }
        }
        let state = self.rig_state(rig)?;
        Ok(state.view_angle)
    }

    fn write_camera_clip(&mut self, clip: &CameraClip) -> Result<(), HostError> {
        self.rigs.insert(
            clip.name.clone(),
            CameraRigState {
                start_frame: clip.start_frame,
                end_frame: clip.end_frame,
                position: clip.cam_pos,
                aim_position: clip.aim_pos,
                aim_roll: clip.aim_z_rotation,
                near_clip: clip.z_near,
                far_clip: clip.z_far,
                view_angle: clip.fov,
            },
        );

        let baseline_frame = clip.start_frame.max(0) as u32;
        let baseline = [
            (CameraChannel::CamPosX, clip.cam_pos.x),
            (CameraChannel::CamPosY, clip.cam_pos.y),
            (CameraChannel::CamPosZ, clip.cam_pos.z),
            (CameraChannel::AimPosX, clip.aim_pos.x),
            (CameraChannel::AimPosY, clip.aim_pos.y),
            (CameraChannel::AimPosZ, clip.aim_pos.z),
            (CameraChannel::Twist, clip.aim_z_rotation),
            (CameraChannel::ZNear, clip.z_near),
            (CameraChannel::ZFar, clip.z_far),
            (CameraChannel::Fov, clip.fov),
        ];

        let mut touched = Vec::new();
        for (kind, value) in baseline {
            let handle = camera_handle(&clip.name, kind);
            self.curves
                .entry(handle.clone())
                .or_default()
                .insert(baseline_frame, value);
            touched.push(handle);
        }
        for channel in &clip.channels {
            let handle = camera_handle(&clip.name, channel.kind);
            let curve = self.curves.entry(handle.clone()).or_default();
            for kf in &channel.samples {
                curve.insert(kf.frame, kf.value);
            }
            touched.push(handle);
        }
        for handle in touched {
            if let Some(curve) = self.curves.get_mut(&handle) {
                curve.interpolation = Interpolation::Linear;
            }
        }
        Ok(())
    }
}

impl UvAdapter for MemoryHost {
    fn active_material(&self) -> Result<String, HostError> {
        self.active_material
            .clone()
            .ok_or(HostError::NoActiveMaterial)
    }

    fn animated_textures(&self) -> Vec<UvTarget> {
        self.animators.iter().map(|a| a.target.clone()).collect()
    }

    fn texture_channels(&self, target: &UvTarget) -> Vec<Channel<UvChannel>> {
        let Some(animator) = self.animators.iter().find(|a| &a.target == target) else {
            return Vec::new();
        };
        UvChannel::ALL
            .iter()
            .filter_map(|kind| {
                self.curves
                    .get(&uv_handle(&animator.material, &target.node_group, *kind))
                    .map(|curve| Channel::with_samples(*kind, curve.samples.clone()))
            })
            .collect()
    }

    fn material_textures(&self, material: &str) -> Result<Vec<String>, HostError> {
        self.materials
            .get(material)
            .cloned()
            .ok_or_else(|| HostError::MissingMaterial(material.to_string()))
    }

    fn write_uv_clip(&mut self, material: &str, clip: &UvClip) -> Result<(), HostError> {
        let textures = self
            .materials
            .get(material)
            .ok_or_else(|| HostError::MissingMaterial(material.to_string()))?;
        if !textures.iter().any(|t| t == &clip.name) {
            return Err(HostError::MissingTexture {
                material: material.to_string(),
                texture: clip.name.clone(),
            });
        }

        let target = UvTarget {
            node_group: clip.name.clone(),
            texture: clip.name.clone(),
        };
        if !self
            .animators
            .iter()
            .any(|a| a.material == material && a.target.texture == target.texture)
        {
            self.animators.push(UvAnimator {
                material: material.to_string(),
                target: target.clone(),
            });
        }

        for channel in &clip.channels {
            let handle = uv_handle(material, &target.node_group, channel.kind);
            let curve = self.curves.entry(handle).or_default();
            for kf in &channel.samples {
                curve.insert(kf.frame, kf.value);
            }
            curve.interpolation = Interpolation::Linear;
        }
        Ok(())
    }
}

fn camera_handle(rig: &str, kind: CameraChannel) -> String {
    let prop = match kind {
        CameraChannel::CamPosX => "Camera.location.x",
        CameraChannel::CamPosY => "Camera.location.y",
        CameraChannel::CamPosZ => "Camera.location.z",
        CameraChannel::CamRotX => "Camera.rotation.x",
        CameraChannel::CamRotY => "Camera.rotation.y",
        CameraChannel::CamRotZ => "Camera.rotation.z",
        CameraChannel::AimPosX => "Tracker.location.x",
        CameraChannel::AimPosY => "Tracker.location.y",
        CameraChannel::AimPosZ => "Tracker.location.z",
        CameraChannel::Twist => "Tracker.rotation.z",
        CameraChannel::ZNear => "Camera.clip_start",
        CameraChannel::ZFar => "Camera.clip_end",
        CameraChannel::Fov => "Camera.angle_y",
        CameraChannel::Aspect => "Camera.aspect",
    };
    format!("{rig}/{prop}")
}

fn uv_handle(material: &str, node_group: &str, kind: UvChannel) -> String {
    let prop = match kind {
        UvChannel::PosX => "pos_x",
        UvChannel::PosY => "pos_y",
        UvChannel::Rot => "rot",
        UvChannel::ScaleX => "scale_x",
        UvChannel::ScaleY => "scale_y",
    };
    format!("{material}/{node_group}.{prop}")
}

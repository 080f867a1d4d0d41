//! Export drivers: live host curves → engine-unit model → XML bytes.
//!
//! The drivers read through the adapter traits and apply the host→engine
//! conversions: the depth axis is negated on the camera/aim position
//! channels that carry it, and the host's vertical view angle is reprojected
//! into the engine FOV through the aspect ratio, per keyframe via an
//! explicit evaluation request.

use thiserror::Error;

use heanim_core::{
    angle_to_fov, encode_camera, encode_uv, flip_axis, CameraChannel, CameraClip, CameraDocument,
    CodecError, ConvertError, UvClip, UvDocument, Vec3,
};

use crate::adapter::{CameraAdapter, HostError, UvAdapter};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Build a camera document from every animated rig in the scene. Clip order
/// follows the adapter's rig order; the camera schema does not sort.
pub fn export_camera_document<A: CameraAdapter>(adapter: &A) -> Result<CameraDocument, ExportError> {
    let fps = adapter.scene_fps();
    let aspect = adapter.aspect_ratio();

    let mut clips = Vec::new();
    for rig in adapter.animated_rigs() {
        let state = adapter.rig_state(&rig)?;
        let mut channels = adapter.rig_channels(&rig);

        for channel in &mut channels {
            match channel.kind {
                CameraChannel::CamPosY | CameraChannel::AimPosY => {
                    for kf in &mut channel.samples {
                        kf.value = flip_axis(kf.value);
                    }
                }
                CameraChannel::Fov => {
                    for kf in &mut channel.samples {
                        let angle = adapter.evaluate_view_angle(&rig, kf.frame)?;
                        kf.value = angle_to_fov(angle, aspect)?;
                    }
                }
                _ => {}
            }
        }

        clips.push(CameraClip {
            name: rig,
            flag1: 1,
            flag2: 0,
            flag3: 0,
            flag4: 0,
            frame_rate: fps,
            start_frame: state.start_frame,
            end_frame: state.end_frame,
            cam_pos: Vec3::new(
                state.position.x,
                flip_axis(state.position.y),
                state.position.z,
            ),
            // Orientation rides on the aim constraint; the rotation fields
            // are boilerplate zeros on this path (flag1 = 1 selects aim).
            cam_rot: Vec3::ZERO,
            aim_pos: Vec3::new(
                state.aim_position.x,
                flip_axis(state.aim_position.y),
                state.aim_position.z,
            ),
            aim_z_rotation: state.aim_roll,
            z_near: state.near_clip,
            z_far: state.far_clip,
            fov: angle_to_fov(state.view_angle, aspect)?,
            aspect_ratio: aspect,
            channels,
        });
    }

    Ok(CameraDocument { clips })
}

/// Build a UV v3 document from every animated texture node-group instance of
/// the active material. One clip per instance; the encoder sorts by texture
/// name, never collapsing instances that happen to share one.
pub fn export_uv_document<A: UvAdapter>(adapter: &A) -> Result<UvDocument, ExportError> {
    let material_name = adapter.active_material()?;
    let fps = adapter.scene_fps();
    let (start_frame, end_frame) = adapter.scene_frames();

    let mut clips = Vec::new();
    for target in adapter.animated_textures() {
        let channels = adapter.texture_channels(&target);
        clips.push(UvClip {
            name: target.texture,
            frame_rate: fps,
            start_frame,
            end_frame,
            channels,
        });
    }

    Ok(UvDocument {
        material_name,
        clips,
    })
}

/// Convenience: export and serialize in one call.
pub fn export_camera_xml<A: CameraAdapter>(adapter: &A) -> Result<Vec<u8>, ExportError> {
    Ok(encode_camera(&export_camera_document(adapter)?)?)
}

/// Convenience: export and serialize in one call.
pub fn export_uv_xml<A: UvAdapter>(adapter: &A) -> Result<Vec<u8>, ExportError> {
    Ok(encode_uv(&export_uv_document(adapter)?)?)
}

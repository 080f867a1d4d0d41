//! Import drivers: XML bytes → engine-unit model → live host curves.
//!
//! Conversion back into host units happens once per clip before the adapter
//! sees it: depth-axis flip on the channels and baselines that carry it, FOV
//! reprojection through the clip's own aspect ratio. An invalid aspect ratio
//! costs that clip its FOV channel and nothing else.

use thiserror::Error;

use heanim_core::{
    aggregate_frame_range, decode_document, flip_axis, fov_to_angle, AnimationDocument,
    CameraChannel, CameraClip, CameraDocument, CodecError, ConvertError, UvDocument,
};

use crate::adapter::{CameraAdapter, HostError, UvAdapter};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Decode raw bytes and apply the result to the host.
pub fn import_bytes<A>(bytes: &[u8], adapter: &mut A) -> Result<AnimationDocument, ImportError>
where
    A: CameraAdapter + UvAdapter,
{
    let doc = decode_document(bytes)?;
    import_document(&doc, adapter)?;
    Ok(doc)
}

/// Apply a decoded document to the host. The legacy single-texture UV
/// variant is a recognized no-op.
pub fn import_document<A>(doc: &AnimationDocument, adapter: &mut A) -> Result<(), ImportError>
where
    A: CameraAdapter + UvAdapter,
{
    match doc {
        AnimationDocument::Camera(cam) => import_camera_document(cam, adapter),
        AnimationDocument::Uv(uv) => import_uv_document(uv, adapter),
        AnimationDocument::UvLegacy => {
            log::info!("legacy single-texture UV document: nothing to import");
            Ok(())
        }
    }
}

/// Write every camera clip into the host: scene configuration from the
/// aggregated frame range, then one rig per clip via the adapter.
pub fn import_camera_document<A: CameraAdapter>(
    doc: &CameraDocument,
    adapter: &mut A,
) -> Result<(), ImportError> {
    if !doc.clips.is_empty() {
        let (start, end) = aggregate_frame_range(&doc.clips)?;
        adapter.configure_scene(doc.clips[0].frame_rate, start, end);
    }
    for clip in &doc.clips {
        let host_clip = camera_clip_to_host(clip);
        adapter.write_camera_clip(&host_clip)?;
    }
    Ok(())
}

/// Convert one camera clip from engine units into host units.
fn camera_clip_to_host(clip: &CameraClip) -> CameraClip {
    let mut out = clip.clone();
    out.cam_pos.y = flip_axis(out.cam_pos.y);
    out.aim_pos.y = flip_axis(out.aim_pos.y);

    let aspect = clip.aspect_ratio;
    let mut aspect_ok = true;
    match fov_to_angle(clip.fov, aspect) {
        Ok(angle) => out.fov = angle,
        Err(e) => {
            aspect_ok = false;
            log::warn!(
                "clip `{}`: {e}; leaving FOV unconverted and dropping its channel",
                clip.name
            );
        }
    }

    for channel in &mut out.channels {
        match channel.kind {
            CameraChannel::CamPosY | CameraChannel::AimPosY => {
                for kf in &mut channel.samples {
                    kf.value = flip_axis(kf.value);
                }
            }
            CameraChannel::Fov if aspect_ok => {
                for kf in &mut channel.samples {
                    // aspect already validated above
                    kf.value = fov_to_angle(kf.value, aspect).unwrap_or(kf.value);
                }
            }
            _ => {}
        }
    }
    if !aspect_ok {
        out.channels.retain(|c| c.kind != CameraChannel::Fov);
    }
    out
}

/// Apply every fanned-out UV clip to the textures the target material
/// actually carries; names the material lacks are skipped, not errors.
pub fn import_uv_document<A: UvAdapter>(
    doc: &UvDocument,
    adapter: &mut A,
) -> Result<(), ImportError> {
    if !doc.clips.is_empty() {
        let (start, end) = aggregate_frame_range(&doc.clips)?;
        adapter.configure_scene(doc.clips[0].frame_rate, start, end);
    }
    let present = adapter.material_textures(&doc.material_name)?;
    for clip in &doc.clips {
        if !present.iter().any(|t| t == &clip.name) {
            log::warn!(
                "texture `{}` not present in material `{}`; skipping",
                clip.name,
                doc.material_name
            );
            continue;
        }
        adapter.write_uv_clip(&doc.material_name, clip)?;
    }
    Ok(())
}

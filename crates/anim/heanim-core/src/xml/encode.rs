//! Model → XML serialization.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use super::xml_err;
use crate::channels::ChannelTag;
use crate::error::CodecError;
use crate::model::{AnimationDocument, CameraDocument, Channel, UvClip, UvDocument, Vec3};

/// Serialize any encodable document. The legacy single-texture UV schema has
/// no authoring path and therefore no encoder.
pub fn encode_document(doc: &AnimationDocument) -> Result<Vec<u8>, CodecError> {
    match doc {
        AnimationDocument::Camera(cam) => encode_camera(cam),
        AnimationDocument::Uv(uv) => encode_uv(uv),
        AnimationDocument::UvLegacy => Err(CodecError::malformed(
            "legacy single-texture UV documents cannot be encoded",
        )),
    }
}

/// Serialize a `CAMAnimation` (version 2) document. Clips are emitted in
/// input order.
pub fn encode_camera(doc: &CameraDocument) -> Result<Vec<u8>, CodecError> {
    for clip in &doc.clips {
        clip.validate().map_err(CodecError::Malformed)?;
    }

    let mut writer = tab_writer();
    let mut root = BytesStart::new("CAMAnimation");
    root.push_attribute(("root_node_type", "2"));
    writer.write_event(Event::Start(root)).map_err(xml_err)?;

    for clip in &doc.clips {
        let mut anim = BytesStart::new("Animation");
        anim.push_attribute(("name", clip.name.as_str()));
        push_u32(&mut anim, "flag1", clip.flag1);
        push_u32(&mut anim, "flag2", clip.flag2);
        push_u32(&mut anim, "flag3", clip.flag3);
        push_u32(&mut anim, "flag4", clip.flag4);
        push_u32(&mut anim, "frame_rate", clip.frame_rate);
        push_i32(&mut anim, "start_frame", clip.start_frame);
        push_i32(&mut anim, "end_frame", clip.end_frame);
        push_vec3(&mut anim, "cam_pos", clip.cam_pos);
        push_vec3(&mut anim, "cam_rot", clip.cam_rot);
        push_vec3(&mut anim, "aim_pos", clip.aim_pos);
        push_f64(&mut anim, "aim_z_rotation", clip.aim_z_rotation);
        push_f64(&mut anim, "z_near", clip.z_near);
        push_f64(&mut anim, "z_far", clip.z_far);
        push_f64(&mut anim, "fov", clip.fov);
        push_f64(&mut anim, "aspect_ratio", clip.aspect_ratio);

        write_animation_body(&mut writer, anim, &clip.channels)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("CAMAnimation")))
        .map_err(xml_err)?;
    Ok(writer.into_inner())
}

/// Serialize a `UVAnimation` (version 3) document. Animation elements are
/// sorted lexicographically by texture name; the root carries the material
/// name and the historical `texture_name="none"` placeholder.
pub fn encode_uv(doc: &UvDocument) -> Result<Vec<u8>, CodecError> {
    for clip in &doc.clips {
        clip.validate().map_err(CodecError::Malformed)?;
    }

    let mut order: Vec<&UvClip> = doc.clips.iter().collect();
    order.sort_by(|a, b| a.name.cmp(&b.name));

    let mut writer = tab_writer();
    let mut root = BytesStart::new("UVAnimation");
    root.push_attribute(("root_node_type", "3"));
    root.push_attribute(("material_name", doc.material_name.as_str()));
    root.push_attribute(("texture_name", "none"));
    writer.write_event(Event::Start(root)).map_err(xml_err)?;

    for clip in order {
        let mut anim = BytesStart::new("Animation");
        anim.push_attribute(("name", clip.name.as_str()));
        push_u32(&mut anim, "frame_rate", clip.frame_rate);
        push_i32(&mut anim, "start_frame", clip.start_frame);
        push_i32(&mut anim, "end_frame", clip.end_frame);

        write_animation_body(&mut writer, anim, &clip.channels)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("UVAnimation")))
        .map_err(xml_err)?;
    Ok(writer.into_inner())
}

fn tab_writer() -> Writer<Vec<u8>> {
    Writer::new_with_indent(Vec::new(), b'\t', 1)
}

fn write_animation_body<W: Write, K: ChannelTag>(
    writer: &mut Writer<W>,
    anim: BytesStart<'_>,
    channels: &[Channel<K>],
) -> Result<(), CodecError> {
    if channels.is_empty() {
        writer.write_event(Event::Empty(anim)).map_err(xml_err)?;
        return Ok(());
    }
    writer.write_event(Event::Start(anim)).map_err(xml_err)?;
    for channel in channels {
        write_keyframe_set(writer, channel)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("Animation")))
        .map_err(xml_err)?;
    Ok(())
}

fn write_keyframe_set<W: Write, K: ChannelTag>(
    writer: &mut Writer<W>,
    channel: &Channel<K>,
) -> Result<(), CodecError> {
    let mut kfs = BytesStart::new("KeyframeSet");
    push_u32(&mut kfs, "type", channel.kind.tag());
    // Fixed boilerplate of the format; written, never interpreted.
    kfs.push_attribute(("flag2", "0"));
    kfs.push_attribute(("interpolation", "0"));
    kfs.push_attribute(("flag4", "0"));

    if channel.samples.is_empty() {
        writer.write_event(Event::Empty(kfs)).map_err(xml_err)?;
        return Ok(());
    }
    writer.write_event(Event::Start(kfs)).map_err(xml_err)?;
    for kf in &channel.samples {
        let mut elem = BytesStart::new("Keyframe");
        push_u32(&mut elem, "index", kf.frame);
        push_f64(&mut elem, "value", kf.value);
        writer.write_event(Event::Empty(elem)).map_err(xml_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("KeyframeSet")))
        .map_err(xml_err)?;
    Ok(())
}

fn push_u32(elem: &mut BytesStart<'_>, key: &str, value: u32) {
    elem.push_attribute((key, value.to_string().as_str()));
}

fn push_i32(elem: &mut BytesStart<'_>, key: &str, value: i32) {
    elem.push_attribute((key, value.to_string().as_str()));
}

fn push_f64(elem: &mut BytesStart<'_>, key: &str, value: f64) {
    // Shortest decimal form that parses back to the same double.
    elem.push_attribute((key, format!("{value}").as_str()));
}

fn push_vec3(elem: &mut BytesStart<'_>, prefix: &str, v: Vec3) {
    push_f64(elem, &format!("{prefix}_x"), v.x);
    push_f64(elem, &format!("{prefix}_y"), v.y);
    push_f64(elem, &format!("{prefix}_z"), v.z);
}

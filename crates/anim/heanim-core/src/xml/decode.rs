//! XML → model parsing.
//!
//! The decoder is lenient where the format's history demands it: unknown
//! keyframe-set ordinals are skipped, unknown child elements are ignored,
//! attribute aliases from the two known producers are accepted, and the
//! legacy single-texture UV schema is recognized without being interpreted.
//! Everything else that deviates from the documented shape is malformed and
//! yields no partial result.

use std::str::FromStr;

use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::xml_err;
use crate::channels::{CameraChannel, ChannelTag, UvChannel};
use crate::error::CodecError;
use crate::model::{
    AnimationDocument, CameraClip, CameraDocument, Channel, Keyframe, UvClip, UvDocument, Vec3,
};

/// Parse a full document from raw bytes. The root element name and its
/// `root_node_type` attribute select the schema variant.
pub fn decode_document(bytes: &[u8]) -> Result<AnimationDocument, CodecError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CodecError::Malformed(format!("document is not valid UTF-8: {e}")))?;
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => return decode_root(&mut reader, &e, false),
            Event::Empty(e) => return decode_root(&mut reader, &e, true),
            Event::Eof => return Err(CodecError::malformed("document has no root element")),
            _ => {}
        }
    }
}

fn decode_root(
    reader: &mut Reader<&[u8]>,
    root: &BytesStart<'_>,
    is_empty: bool,
) -> Result<AnimationDocument, CodecError> {
    let attrs = Attrs::collect(root, "root")?;
    match root.name().as_ref() {
        b"CAMAnimation" => {
            let version: u32 = attrs.parse("root_node_type")?;
            if version != 2 {
                return Err(CodecError::Malformed(format!(
                    "unsupported CAMAnimation root_node_type {version}"
                )));
            }
            let clips = if is_empty {
                Vec::new()
            } else {
                decode_camera_clips(reader)?
            };
            Ok(AnimationDocument::Camera(CameraDocument { clips }))
        }
        b"UVAnimation" => {
            let version: u32 = attrs.parse("root_node_type")?;
            match version {
                2 => {
                    log::info!("legacy single-texture UV document recognized; not decoded");
                    Ok(AnimationDocument::UvLegacy)
                }
                3 => {
                    let material_name = attrs.required("material_name")?.to_string();
                    // The root-level `texture_name` is a historical
                    // placeholder; the real texture names live on each
                    // Animation element.
                    let clips = if is_empty {
                        Vec::new()
                    } else {
                        decode_uv_clips(reader)?
                    };
                    Ok(AnimationDocument::Uv(UvDocument {
                        material_name,
                        clips,
                    }))
                }
                v => Err(CodecError::Malformed(format!(
                    "unsupported UVAnimation root_node_type {v}"
                ))),
            }
        }
        other => Err(CodecError::Malformed(format!(
            "unrecognized root element `{}`",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn decode_camera_clips(reader: &mut Reader<&[u8]>) -> Result<Vec<CameraClip>, CodecError> {
    let mut clips = Vec::new();
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) if e.name().as_ref() == b"Animation" => {
                let attrs = Attrs::collect(&e, "Animation")?;
                let mut clip = camera_clip_from_attrs(&attrs)?;
                clip.channels = decode_keyframe_sets::<CameraChannel>(reader, &clip.name)?;
                clip.validate().map_err(CodecError::Malformed)?;
                clips.push(clip);
            }
            Event::Empty(e) if e.name().as_ref() == b"Animation" => {
                let clip = camera_clip_from_attrs(&Attrs::collect(&e, "Animation")?)?;
                clip.validate().map_err(CodecError::Malformed)?;
                clips.push(clip);
            }
            Event::Start(_) => skip_element(reader)?,
            Event::End(_) => break,
            Event::Eof => return Err(CodecError::malformed("unexpected end of document")),
            _ => {}
        }
    }
    Ok(clips)
}

fn camera_clip_from_attrs(attrs: &Attrs) -> Result<CameraClip, CodecError> {
    Ok(CameraClip {
        name: attrs.required("name")?.to_string(),
        // One producer writes `flag1`, the other `rot_or_aim`.
        flag1: attrs.parse_any_or(&["flag1", "rot_or_aim"], 0)?,
        flag2: attrs.parse_or("flag2", 0)?,
        flag3: attrs.parse_or("flag3", 0)?,
        flag4: attrs.parse_or("flag4", 0)?,
        frame_rate: attrs.parse("frame_rate")?,
        start_frame: attrs.parse("start_frame")?,
        end_frame: attrs.parse("end_frame")?,
        cam_pos: Vec3::new(
            attrs.parse("cam_pos_x")?,
            attrs.parse("cam_pos_y")?,
            attrs.parse("cam_pos_z")?,
        ),
        cam_rot: Vec3::new(
            attrs.parse_or("cam_rot_x", 0.0)?,
            attrs.parse_or("cam_rot_y", 0.0)?,
            attrs.parse_or("cam_rot_z", 0.0)?,
        ),
        aim_pos: Vec3::new(
            attrs.parse("aim_pos_x")?,
            attrs.parse("aim_pos_y")?,
            attrs.parse("aim_pos_z")?,
        ),
        aim_z_rotation: attrs.parse_any_or(&["aim_z_rotation", "twist"], 0.0)?,
        z_near: attrs.parse("z_near")?,
        z_far: attrs.parse("z_far")?,
        fov: attrs.parse("fov")?,
        aspect_ratio: attrs.parse("aspect_ratio")?,
        channels: Vec::new(),
    })
}

fn decode_uv_clips(reader: &mut Reader<&[u8]>) -> Result<Vec<UvClip>, CodecError> {
    let mut clips = Vec::new();
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) if e.name().as_ref() == b"Animation" => {
                let attrs = Attrs::collect(&e, "Animation")?;
                let name = attrs.required("name")?.to_string();
                let frame_rate = attrs.parse("frame_rate")?;
                let start_frame = attrs.parse("start_frame")?;
                let end_frame = attrs.parse("end_frame")?;
                let channels = decode_keyframe_sets::<UvChannel>(reader, &name)?;
                fan_out_uv_clip(
                    &mut clips,
                    &name,
                    frame_rate,
                    start_frame,
                    end_frame,
                    channels,
                )?;
            }
            Event::Empty(e) if e.name().as_ref() == b"Animation" => {
                let attrs = Attrs::collect(&e, "Animation")?;
                let name = attrs.required("name")?.to_string();
                fan_out_uv_clip(
                    &mut clips,
                    &name,
                    attrs.parse("frame_rate")?,
                    attrs.parse("start_frame")?,
                    attrs.parse("end_frame")?,
                    Vec::new(),
                )?;
            }
            Event::Start(_) => skip_element(reader)?,
            Event::End(_) => break,
            Event::Eof => return Err(CodecError::malformed("unexpected end of document")),
            _ => {}
        }
    }
    Ok(clips)
}

/// Expand a `/`-joined texture name list into independent clips sharing the
/// same curve data. The expansion happens here, right after the Animation
/// element is parsed; downstream consumers only ever see single-texture
/// clips.
fn fan_out_uv_clip(
    clips: &mut Vec<UvClip>,
    name: &str,
    frame_rate: u32,
    start_frame: i32,
    end_frame: i32,
    channels: Vec<Channel<UvChannel>>,
) -> Result<(), CodecError> {
    let textures: Vec<&str> = name.split('/').filter(|t| !t.is_empty()).collect();
    if textures.is_empty() {
        return Err(CodecError::malformed("Animation has an empty texture name"));
    }
    if textures.len() > 1 {
        log::debug!("fanning `{name}` out into {} texture clips", textures.len());
    }
    for texture in textures {
        let clip = UvClip {
            name: texture.to_string(),
            frame_rate,
            start_frame,
            end_frame,
            channels: channels.clone(),
        };
        clip.validate().map_err(CodecError::Malformed)?;
        clips.push(clip);
    }
    Ok(())
}

fn decode_keyframe_sets<K: ChannelTag>(
    reader: &mut Reader<&[u8]>,
    clip: &str,
) -> Result<Vec<Channel<K>>, CodecError> {
    let mut channels: Vec<Channel<K>> = Vec::new();
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) if e.name().as_ref() == b"KeyframeSet" => {
                let tag: u32 = Attrs::collect(&e, "KeyframeSet")?.parse("type")?;
                match K::from_tag(tag) {
                    Some(kind) if !channels.iter().any(|c| c.kind == kind) => {
                        let mut channel = Channel::with_samples(kind, decode_keyframes(reader)?);
                        channel.normalize();
                        channels.push(channel);
                    }
                    Some(kind) => {
                        log::debug!("clip `{clip}`: repeated keyframe set {kind:?}, keeping the first");
                        skip_element(reader)?;
                    }
                    None => {
                        log::debug!("clip `{clip}`: skipping unknown keyframe set type {tag}");
                        skip_element(reader)?;
                    }
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"KeyframeSet" => {
                let tag: u32 = Attrs::collect(&e, "KeyframeSet")?.parse("type")?;
                match K::from_tag(tag) {
                    Some(kind) if !channels.iter().any(|c| c.kind == kind) => {
                        channels.push(Channel::new(kind));
                    }
                    Some(kind) => {
                        log::debug!("clip `{clip}`: repeated keyframe set {kind:?}, keeping the first");
                    }
                    None => {
                        log::debug!("clip `{clip}`: skipping unknown keyframe set type {tag}");
                    }
                }
            }
            Event::Start(_) => skip_element(reader)?,
            Event::End(_) => break,
            Event::Eof => return Err(CodecError::malformed("unexpected end of document")),
            _ => {}
        }
    }
    Ok(channels)
}

fn decode_keyframes(reader: &mut Reader<&[u8]>) -> Result<Vec<Keyframe>, CodecError> {
    let mut samples = Vec::new();
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Empty(e) if e.name().as_ref() == b"Keyframe" => {
                samples.push(keyframe_from_attrs(&e)?);
            }
            Event::Start(e) if e.name().as_ref() == b"Keyframe" => {
                samples.push(keyframe_from_attrs(&e)?);
                skip_element(reader)?;
            }
            Event::Start(_) => skip_element(reader)?,
            Event::End(_) => break,
            Event::Eof => return Err(CodecError::malformed("unexpected end of document")),
            _ => {}
        }
    }
    Ok(samples)
}

fn keyframe_from_attrs(e: &BytesStart<'_>) -> Result<Keyframe, CodecError> {
    let attrs = Attrs::collect(e, "Keyframe")?;
    Ok(Keyframe {
        frame: attrs.parse("index")?,
        value: attrs.parse("value")?,
    })
}

/// Consume events until the element whose Start was just read is closed.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), CodecError> {
    let mut depth = 1usize;
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(CodecError::malformed("unexpected end of document")),
            _ => {}
        }
    }
}

/// Attribute bag for one element, with parse helpers that name the element
/// in their error messages.
struct Attrs {
    element: &'static str,
    pairs: Vec<(String, String)>,
}

impl Attrs {
    fn collect(e: &BytesStart<'_>, element: &'static str) -> Result<Self, CodecError> {
        let mut pairs = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(xml_err)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(xml_err)?.into_owned();
            pairs.push((key, value));
        }
        Ok(Self { element, pairs })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn required(&self, key: &str) -> Result<&str, CodecError> {
        self.get(key).ok_or_else(|| {
            CodecError::Malformed(format!("{}: missing attribute `{key}`", self.element))
        })
    }

    fn parse<T: FromStr>(&self, key: &str) -> Result<T, CodecError>
    where
        T::Err: std::fmt::Display,
    {
        self.parse_value(key, self.required(key)?)
    }

    fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, CodecError>
    where
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => self.parse_value(key, raw),
            None => Ok(default),
        }
    }

    /// Parse the first present key of an alias list, or return the default.
    fn parse_any_or<T: FromStr>(&self, keys: &[&str], default: T) -> Result<T, CodecError>
    where
        T::Err: std::fmt::Display,
    {
        for key in keys {
            if self.get(key).is_some() {
                return self.parse(key);
            }
        }
        Ok(default)
    }

    fn parse_value<T: FromStr>(&self, key: &str, raw: &str) -> Result<T, CodecError>
    where
        T::Err: std::fmt::Display,
    {
        raw.parse().map_err(|e| {
            CodecError::Malformed(format!(
                "{}: attribute `{key}` has unparsable value `{raw}`: {e}",
                self.element
            ))
        })
    }
}

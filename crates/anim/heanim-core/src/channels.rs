//! Channel type registries: the closed integer→semantic tables of the wire
//! format, one per animation kind.
//!
//! The tables exist so the codec and the host adapter agree on meaning
//! without either side hardcoding wire ordinals. Decoding an out-of-range
//! ordinal yields `None`; encoding an unlisted ordinal is unrepresentable
//! because the variant type is the only way to name a channel.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Common surface of the three registries.
pub trait ChannelTag: Copy + Eq + Debug {
    /// Wire ordinal of this channel.
    fn tag(self) -> u32;

    /// Resolve a wire ordinal; `None` for ordinals outside the registry.
    fn from_tag(tag: u32) -> Option<Self>
    where
        Self: Sized;
}

/// Camera animation channels (`CAMAnimation`, ordinals 0..=13).
///
/// Ordinals 1 and 2 are swapped relative to the host's axis order: the wire
/// puts the host's vertical axis at 1 and the negated depth axis at 2, for
/// both the camera and the aim target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraChannel {
    CamPosX,
    CamPosZ,
    CamPosY,
    CamRotX,
    CamRotZ,
    CamRotY,
    AimPosX,
    AimPosZ,
    AimPosY,
    Twist,
    ZNear,
    ZFar,
    Fov,
    Aspect,
}

impl CameraChannel {
    pub const ALL: [CameraChannel; 14] = [
        CameraChannel::CamPosX,
        CameraChannel::CamPosZ,
        CameraChannel::CamPosY,
        CameraChannel::CamRotX,
        CameraChannel::CamRotZ,
        CameraChannel::CamRotY,
        CameraChannel::AimPosX,
        CameraChannel::AimPosZ,
        CameraChannel::AimPosY,
        CameraChannel::Twist,
        CameraChannel::ZNear,
        CameraChannel::ZFar,
        CameraChannel::Fov,
        CameraChannel::Aspect,
    ];
}

impl ChannelTag for CameraChannel {
    fn tag(self) -> u32 {
        match self {
            CameraChannel::CamPosX => 0,
            CameraChannel::CamPosZ => 1,
            CameraChannel::CamPosY => 2,
            CameraChannel::CamRotX => 3,
            CameraChannel::CamRotZ => 4,
            CameraChannel::CamRotY => 5,
            CameraChannel::AimPosX => 6,
            CameraChannel::AimPosZ => 7,
            CameraChannel::AimPosY => 8,
            CameraChannel::Twist => 9,
            CameraChannel::ZNear => 10,
            CameraChannel::ZFar => 11,
            CameraChannel::Fov => 12,
            CameraChannel::Aspect => 13,
        }
    }

    fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(CameraChannel::CamPosX),
            1 => Some(CameraChannel::CamPosZ),
            2 => Some(CameraChannel::CamPosY),
            3 => Some(CameraChannel::CamRotX),
            4 => Some(CameraChannel::CamRotZ),
            5 => Some(CameraChannel::CamRotY),
            6 => Some(CameraChannel::AimPosX),
            7 => Some(CameraChannel::AimPosZ),
            8 => Some(CameraChannel::AimPosY),
            9 => Some(CameraChannel::Twist),
            10 => Some(CameraChannel::ZNear),
            11 => Some(CameraChannel::ZFar),
            12 => Some(CameraChannel::Fov),
            13 => Some(CameraChannel::Aspect),
            _ => None,
        }
    }
}

/// Legacy single-texture UV scroll channels (`UVAnimation` version 2,
/// ordinals 0..=3). The schema is recognized but not decoded; the registry
/// is kept so the two known ordinal meanings stay documented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegacyUvChannel {
    U,
    V,
    Unk1,
    Unk2,
}

impl LegacyUvChannel {
    pub const ALL: [LegacyUvChannel; 4] = [
        LegacyUvChannel::U,
        LegacyUvChannel::V,
        LegacyUvChannel::Unk1,
        LegacyUvChannel::Unk2,
    ];
}

impl ChannelTag for LegacyUvChannel {
    fn tag(self) -> u32 {
        match self {
            LegacyUvChannel::U => 0,
            LegacyUvChannel::V => 1,
            LegacyUvChannel::Unk1 => 2,
            LegacyUvChannel::Unk2 => 3,
        }
    }

    fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(LegacyUvChannel::U),
            1 => Some(LegacyUvChannel::V),
            2 => Some(LegacyUvChannel::Unk1),
            3 => Some(LegacyUvChannel::Unk2),
            _ => None,
        }
    }
}

/// Multi-texture UV transform channels (`UVAnimation` version 3,
/// ordinals 0..=4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UvChannel {
    PosX,
    PosY,
    Rot,
    ScaleX,
    ScaleY,
}

impl UvChannel {
    pub const ALL: [UvChannel; 5] = [
        UvChannel::PosX,
        UvChannel::PosY,
        UvChannel::Rot,
        UvChannel::ScaleX,
        UvChannel::ScaleY,
    ];
}

impl ChannelTag for UvChannel {
    fn tag(self) -> u32 {
        match self {
            UvChannel::PosX => 0,
            UvChannel::PosY => 1,
            UvChannel::Rot => 2,
            UvChannel::ScaleX => 3,
            UvChannel::ScaleY => 4,
        }
    }

    fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(UvChannel::PosX),
            1 => Some(UvChannel::PosY),
            2 => Some(UvChannel::Rot),
            3 => Some(UvChannel::ScaleX),
            4 => Some(UvChannel::ScaleY),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_tags_roundtrip() {
        for (i, kind) in CameraChannel::ALL.iter().enumerate() {
            assert_eq!(kind.tag(), i as u32);
            assert_eq!(CameraChannel::from_tag(i as u32), Some(*kind));
        }
        assert_eq!(CameraChannel::from_tag(14), None);
        assert_eq!(CameraChannel::from_tag(99), None);
    }

    #[test]
    fn legacy_uv_tags_roundtrip() {
        for (i, kind) in LegacyUvChannel::ALL.iter().enumerate() {
            assert_eq!(kind.tag(), i as u32);
            assert_eq!(LegacyUvChannel::from_tag(i as u32), Some(*kind));
        }
        assert_eq!(LegacyUvChannel::from_tag(4), None);
    }

    #[test]
    fn uv_tags_roundtrip() {
        for (i, kind) in UvChannel::ALL.iter().enumerate() {
            assert_eq!(kind.tag(), i as u32);
            assert_eq!(UvChannel::from_tag(i as u32), Some(*kind));
        }
        assert_eq!(UvChannel::from_tag(5), None);
    }
}

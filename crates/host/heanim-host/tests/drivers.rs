use heanim_core::{
    angle_to_fov, decode_document, encode_camera, fov_to_angle, AnimationDocument, CameraChannel,
    CameraClip, CameraDocument, Channel, Keyframe, UvChannel, Vec3,
};
use heanim_host::{
    export_camera_document, export_uv_document, import_camera_document, import_document,
    import_uv_document, CameraAdapter, CameraRigState, Interpolation, MemoryHost,
};

const WIDESCREEN: f64 = 16.0 / 9.0;

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn engine_clip(name: &str) -> CameraClip {
    CameraClip {
        name: name.to_string(),
        flag1: 1,
        flag2: 0,
        flag3: 0,
        flag4: 0,
        frame_rate: 60,
        start_frame: 0,
        end_frame: 30,
        cam_pos: Vec3::new(1.0, -2.5, 0.75),
        cam_rot: Vec3::ZERO,
        aim_pos: Vec3::new(0.0, 1.0, 0.0),
        aim_z_rotation: 0.25,
        z_near: 0.1,
        z_far: 1000.0,
        fov: 0.75,
        aspect_ratio: WIDESCREEN,
        channels: vec![
            Channel::with_samples(
                CameraChannel::CamPosY,
                vec![Keyframe::new(0, -2.5), Keyframe::new(30, -4.0)],
            ),
            Channel::with_samples(
                CameraChannel::Fov,
                vec![Keyframe::new(0, 0.75), Keyframe::new(30, 0.9)],
            ),
        ],
    }
}

#[test]
fn camera_import_converts_baselines_and_channels() {
    let doc = CameraDocument {
        clips: vec![engine_clip("cam0")],
    };
    let mut host = MemoryHost::new(24, WIDESCREEN);
    import_camera_document(&doc, &mut host).expect("import");

    // Scene picks up the document's frame rate and aggregated range.
    assert_eq!(host.scene(), (60, 0, 30));

    // Baseline state lands in host units: depth axis unflipped, FOV
    // reprojected into the vertical view angle.
    let rig = host.rig("cam0").expect("rig created");
    assert_eq!(rig.position, Vec3::new(1.0, 2.5, 0.75));
    assert_eq!(rig.aim_position, Vec3::new(0.0, -1.0, 0.0));
    approx(rig.view_angle, fov_to_angle(0.75, WIDESCREEN).unwrap(), 1e-12);

    // Channel samples are converted the same way.
    let pos_y = host.camera_curve("cam0", CameraChannel::CamPosY).unwrap();
    assert_eq!(
        pos_y.samples,
        vec![Keyframe::new(0, 2.5), Keyframe::new(30, 4.0)]
    );
    let fov = host.camera_curve("cam0", CameraChannel::Fov).unwrap();
    approx(fov.samples[1].value, fov_to_angle(0.9, WIDESCREEN).unwrap(), 1e-12);

    // Every touched curve ends up linear, baseline-only ones included.
    for kind in [
        CameraChannel::CamPosX,
        CameraChannel::CamPosY,
        CameraChannel::ZNear,
        CameraChannel::Fov,
    ] {
        let curve = host.camera_curve("cam0", kind).unwrap();
        assert_eq!(curve.interpolation, Interpolation::Linear);
    }
}

#[test]
fn invalid_aspect_costs_only_the_fov_channel() {
    let mut clip = engine_clip("cam0");
    clip.aspect_ratio = 0.0;
    let doc = CameraDocument { clips: vec![clip] };

    let mut host = MemoryHost::new(24, WIDESCREEN);
    import_camera_document(&doc, &mut host).expect("import still succeeds");

    // Position channel imported and converted.
    let pos_y = host.camera_curve("cam0", CameraChannel::CamPosY).unwrap();
    assert_eq!(pos_y.samples.len(), 2);
    assert_eq!(pos_y.samples[1].value, 4.0);

    // The FOV curve holds only the baseline snapshot; the per-frame channel
    // was dropped, and the baseline stayed in engine units.
    let fov = host.camera_curve("cam0", CameraChannel::Fov).unwrap();
    assert_eq!(fov.samples, vec![Keyframe::new(0, 0.75)]);
}

#[test]
fn camera_export_flips_and_reprojects() {
    let mut host = MemoryHost::new(60, 2.0);
    host.set_scene_frames(0, 10);
    host.add_rig(
        "cam0",
        CameraRigState {
            start_frame: 0,
            end_frame: 10,
            position: Vec3::new(1.0, 2.0, 3.0),
            aim_position: Vec3::new(0.0, -1.0, 0.5),
            aim_roll: 0.1,
            near_clip: 0.1,
            far_clip: 500.0,
            view_angle: 1.0,
        },
    );
    host.author_camera_curve("cam0", CameraChannel::CamPosY, &[(0, 2.0), (10, 4.0)]);
    host.author_camera_curve("cam0", CameraChannel::Fov, &[(0, 1.0), (10, 1.2)]);

    let doc = export_camera_document(&host).expect("export");
    assert_eq!(doc.clips.len(), 1);
    let clip = &doc.clips[0];

    assert_eq!(clip.name, "cam0");
    assert_eq!(clip.flag1, 1);
    assert_eq!(clip.frame_rate, 60);
    assert_eq!(clip.aspect_ratio, 2.0);
    assert_eq!(clip.cam_pos, Vec3::new(1.0, -2.0, 3.0));
    assert_eq!(clip.aim_pos, Vec3::new(0.0, 1.0, 0.5));
    assert_eq!(clip.cam_rot, Vec3::ZERO);
    approx(clip.fov, angle_to_fov(1.0, 2.0).unwrap(), 1e-12);

    let pos_y = clip.channel(CameraChannel::CamPosY).unwrap();
    assert_eq!(
        pos_y.samples,
        vec![Keyframe::new(0, -2.0), Keyframe::new(10, -4.0)]
    );
    let fov = clip.channel(CameraChannel::Fov).unwrap();
    approx(fov.samples[0].value, angle_to_fov(1.0, 2.0).unwrap(), 1e-12);
    approx(fov.samples[1].value, angle_to_fov(1.2, 2.0).unwrap(), 1e-12);
}

#[test]
fn camera_export_import_roundtrips_on_the_reference_host() {
    let mut source = MemoryHost::new(60, WIDESCREEN);
    source.set_scene_frames(0, 20);
    source.add_rig(
        "cam0",
        CameraRigState {
            start_frame: 0,
            end_frame: 20,
            position: Vec3::new(1.0, 2.0, 3.0),
            aim_position: Vec3::new(0.5, 0.5, 0.5),
            aim_roll: 0.0,
            near_clip: 0.1,
            far_clip: 1000.0,
            view_angle: 1.1,
        },
    );
    // Curves carry a key at the start frame matching the baseline, so the
    // reimported curves compare sample-for-sample.
    source.author_camera_curve("cam0", CameraChannel::CamPosX, &[(0, 1.0), (20, -1.0)]);
    source.author_camera_curve("cam0", CameraChannel::CamPosY, &[(0, 2.0), (20, 6.5)]);
    source.author_camera_curve("cam0", CameraChannel::Fov, &[(0, 1.1), (20, 0.9)]);

    let doc = export_camera_document(&source).expect("export");
    let bytes = encode_camera(&doc).expect("encode");
    let decoded = match decode_document(&bytes).expect("decode") {
        AnimationDocument::Camera(doc) => doc,
        other => panic!("expected camera document, got {other:?}"),
    };

    let mut target = MemoryHost::new(24, WIDESCREEN);
    import_camera_document(&decoded, &mut target).expect("import");

    for kind in [
        CameraChannel::CamPosX,
        CameraChannel::CamPosY,
        CameraChannel::Fov,
    ] {
        let authored = source.camera_curve("cam0", kind).unwrap();
        let imported = target.camera_curve("cam0", kind).unwrap();
        assert_eq!(authored.samples.len(), imported.samples.len(), "{kind:?}");
        for (a, b) in authored.samples.iter().zip(&imported.samples) {
            assert_eq!(a.frame, b.frame, "{kind:?}");
            approx(a.value, b.value, 1e-9);
        }
    }
    let rig = target.rig("cam0").unwrap();
    approx(rig.position.y, 2.0, 1e-12);
    approx(rig.view_angle, 1.1, 1e-9);
}

#[test]
fn uv_import_applies_only_textures_the_material_carries() {
    let xml = heanim_test_fixtures::animations::xml("uv-scroll").expect("load fixture");
    let doc = match decode_document(xml.as_bytes()).expect("decode") {
        AnimationDocument::Uv(doc) => doc,
        other => panic!("expected UV document, got {other:?}"),
    };

    // The material knows eye_base and eye_alpha; the fanned-out eye_glow
    // clip has nowhere to land and is skipped.
    let mut host = MemoryHost::new(60, WIDESCREEN);
    host.add_material("chr_eye", &["eye_base", "eye_alpha"]);
    import_uv_document(&doc, &mut host).expect("import");

    assert_eq!(host.scene(), (30, 0, 120));
    let base = host
        .uv_curve("chr_eye", "eye_base", UvChannel::PosX)
        .expect("eye_base imported");
    assert_eq!(
        base.samples,
        vec![Keyframe::new(0, 0.0), Keyframe::new(120, 1.0)]
    );
    assert_eq!(base.interpolation, Interpolation::Linear);
    assert!(host
        .uv_curve("chr_eye", "eye_alpha", UvChannel::PosY)
        .is_some());
    assert!(host
        .uv_curve("chr_eye", "eye_glow", UvChannel::PosX)
        .is_none());
}

#[test]
fn uv_import_into_missing_material_is_a_host_error() {
    let xml = heanim_test_fixtures::animations::xml("uv-scroll").expect("load fixture");
    let doc = match decode_document(xml.as_bytes()).expect("decode") {
        AnimationDocument::Uv(doc) => doc,
        other => panic!("expected UV document, got {other:?}"),
    };
    let mut host = MemoryHost::new(60, WIDESCREEN);
    assert!(import_uv_document(&doc, &mut host).is_err());
}

#[test]
fn uv_export_import_roundtrips_exactly() {
    let mut source = MemoryHost::new(30, WIDESCREEN);
    source.set_scene_frames(0, 120);
    source.add_material("chr_eye", &["eye_base", "eye_alpha"]);
    source.set_active_material("chr_eye");
    source.author_uv_curve(
        "chr_eye",
        "eye_base",
        "eye_base",
        UvChannel::PosX,
        &[(0, 0.0), (120, 1.0)],
    );
    source.author_uv_curve(
        "chr_eye",
        "eye_alpha",
        "eye_alpha",
        UvChannel::ScaleY,
        &[(0, 1.0), (60, 2.0)],
    );

    let doc = export_uv_document(&source).expect("export");
    let mut target = MemoryHost::new(60, WIDESCREEN);
    target.add_material("chr_eye", &["eye_base", "eye_alpha"]);
    import_uv_document(&doc, &mut target).expect("import");

    // No unit conversion on the UV path: samples survive bit-for-bit.
    assert_eq!(
        target
            .uv_curve("chr_eye", "eye_base", UvChannel::PosX)
            .unwrap()
            .samples,
        source
            .uv_curve("chr_eye", "eye_base", UvChannel::PosX)
            .unwrap()
            .samples
    );
    assert_eq!(
        target
            .uv_curve("chr_eye", "eye_alpha", UvChannel::ScaleY)
            .unwrap()
            .samples,
        source
            .uv_curve("chr_eye", "eye_alpha", UvChannel::ScaleY)
            .unwrap()
            .samples
    );
}

#[test]
fn legacy_document_import_is_a_no_op() {
    let xml = heanim_test_fixtures::animations::xml("uv-legacy").expect("load fixture");
    let doc = decode_document(xml.as_bytes()).expect("decode");
    assert_eq!(doc, AnimationDocument::UvLegacy);

    let mut host = MemoryHost::new(24, WIDESCREEN);
    import_document(&doc, &mut host).expect("no-op import");
    assert_eq!(host.scene(), (24, 0, 0));
    assert!(host.animated_rigs().is_empty());
}

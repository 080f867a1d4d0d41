use criterion::{black_box, criterion_group, criterion_main, Criterion};

use heanim_core::{
    decode_document, encode_camera, CameraChannel, CameraClip, CameraDocument, Channel, Keyframe,
    Vec3,
};

fn synthetic_document(clips: usize, keys: u32) -> CameraDocument {
    let channel_kinds = [
        CameraChannel::CamPosX,
        CameraChannel::CamPosZ,
        CameraChannel::CamPosY,
        CameraChannel::AimPosX,
        CameraChannel::Twist,
        CameraChannel::Fov,
    ];
    let clips = (0..clips)
        .map(|i| CameraClip {
            name: format!("event_cam{i}"),
            flag1: 1,
            flag2: 0,
            flag3: 0,
            flag4: 0,
            frame_rate: 60,
            start_frame: 0,
            end_frame: keys as i32,
            cam_pos: Vec3::new(1.0, -2.0, 3.0),
            cam_rot: Vec3::ZERO,
            aim_pos: Vec3::ZERO,
            aim_z_rotation: 0.0,
            z_near: 0.1,
            z_far: 1000.0,
            fov: 0.75,
            aspect_ratio: 16.0 / 9.0,
            channels: channel_kinds
                .iter()
                .map(|kind| {
                    Channel::with_samples(
                        *kind,
                        (0..keys)
                            .map(|f| Keyframe::new(f, (f as f64 * 0.37).sin()))
                            .collect(),
                    )
                })
                .collect(),
        })
        .collect();
    CameraDocument { clips }
}

fn bench_encode(c: &mut Criterion) {
    let doc = synthetic_document(4, 250);
    c.bench_function("encode_camera_4x6x250", |b| {
        b.iter(|| encode_camera(black_box(&doc)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let bytes = encode_camera(&synthetic_document(4, 250)).unwrap();
    c.bench_function("decode_camera_4x6x250", |b| {
        b.iter(|| decode_document(black_box(&bytes)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);

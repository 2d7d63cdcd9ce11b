use std::path::PathBuf;

use apriltag_locate::{
    hud::{hud_lines, Renderer, TextHud},
    replay::{ReplayDetector, Scene},
    CameraConstants, ConfigError, LoadError, LocatorConfig, Resolution, StaticBlobSource,
};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("apriltag-locate-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_from_file() {
    let path = temp_file("config.json", r#"{
        "camera": {"lens_focal_length_mm": 3.6, "sensor_width_mm": 5.37, "sensor_height_mm": 4.04, "resolution": "qqvga"},
        "tags": [
            {"id": 3, "name": "Origin", "size_mm": 20, "origin": true},
            {"id": 0, "name": "Pink", "size_mm": 10, "color_threshold": [[30, 77, -1, 57, 11, 59]]}
        ]
    }"#);
    let config = LocatorConfig::load(&path).unwrap();
    assert_eq!(config.camera.resolution, Resolution::Qqvga);

    let pipeline = config.build().unwrap();
    assert_eq!((pipeline.intrinsics().cx, pipeline.intrinsics().cy), (80., 60.));
    assert_eq!(pipeline.registry().origin().map(|e| e.name.as_str()), Some("Origin"));
    assert!(pipeline.registry().lookup(0).unwrap().color_threshold.is_some());
}

#[test]
fn missing_file() {
    let res = LocatorConfig::load(&std::env::temp_dir().join("apriltag-locate-missing.json"));
    assert!(matches!(res, Err(LoadError::Io(_))));
}

#[test]
fn rejects_bad_tag_size() {
    let config = LocatorConfig::from_json(r#"{"tags": [{"id": 9, "name": "Flat", "size_mm": 0}]}"#).unwrap();
    assert!(matches!(config.build(), Err(LoadError::Registry(ConfigError::NonPositiveSize { id: 9, .. }))));
}

#[test]
fn rejects_bad_camera() {
    let config = LocatorConfig {
        camera: CameraConstants {
            resolution: Resolution::Custom { width: 0, height: 240 },
            ..CameraConstants::default()
        },
        ..LocatorConfig::default()
    };
    assert!(matches!(config.build(), Err(LoadError::Camera(_))));
}

#[test]
fn replay_scene_through_default_config() {
    let path = temp_file("scene.json", r#"{"frames": [
        {
            "markers": [
                {"id": 3, "translation": [0.0, 0.0, 5.0], "center": [30.0, 30.0]},
                {"id": 0, "translation": [0.5, 0.0, 10.0], "center": [100.0, 80.0]}
            ],
            "blobs": [{"threshold": [[30, 77, -1, 57, 11, 59]], "blobs": [{"rect": [90, 70, 30, 20]}]}]
        },
        {"markers": [{"id": 0, "translation": [0.0, 0.0, 10.0], "center": [5.0, 5.0]}]}
    ]}"#);
    let scene = Scene::load(&path).unwrap();
    let pipeline = LocatorConfig::default().build().unwrap();
    let base = path.parent().unwrap();

    let mut detector = ReplayDetector;
    let reports = scene.frames.iter()
        .map(|frame| {
            let blobs = frame.blob_source(base).unwrap();
            pipeline.process_frame(&mut detector, frame, &blobs)
        })
        .collect::<Vec<_>>();

    assert!(reports[0].origin_found());
    assert_eq!(reports[0].results[0].distance_mm, (5f64 * 5. + 100. * 100.).sqrt());
    assert!(reports[0].results[0].blob.is_some());
    assert!(!reports[1].origin_found());
    assert_eq!(reports[1].results[0].blob, None);

    let lines = hud_lines(&reports[1]);
    assert_eq!(lines[0].text, "[Pink]");
    assert_eq!(lines[1].text, "Dist: 100mm");
    assert_eq!(lines[2].text, "Size: 0x0mm");
    assert_eq!(lines[3].text, "Pos: Origin not found");

    let mut hud = TextHud::new(Vec::new());
    hud.render(&reports[0]).unwrap();
    let text = String::from_utf8(hud.into_inner()).unwrap();
    assert!(text.contains("Pos: P:X5.0 Y0.0 Z0.0"));

    let empty = pipeline.process(&[], &StaticBlobSource::new());
    assert!(hud_lines(&empty).is_empty());
}

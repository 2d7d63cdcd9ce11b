use apriltag_locate::{
    util::{PixelRect, Point2D, Vec3},
    Blob, BlobParams, CameraIntrinsics, ColorThreshold, FramePipeline, LabRange, MarkerDetection,
    MetricPose, RelativePosition, StaticBlobSource, TagEntry, TagRegistry,
};
use float_cmp::approx_eq;

fn pink() -> ColorThreshold {
    ColorThreshold::single(LabRange::new(30, 77, -1, 57, 11, 59))
}

fn green() -> ColorThreshold {
    ColorThreshold::single(LabRange::new(10, 32, -22, -5, -5, 19))
}

fn registry() -> TagRegistry {
    TagRegistry::new([
        TagEntry::origin(3, "Origin", 20.),
        TagEntry::object(0, "Pink", 10., pink()),
        TagEntry::object(1, "Green", 20., green()),
    ]).unwrap()
}

fn pipeline() -> FramePipeline {
    FramePipeline::new(registry(), CameraIntrinsics::derive(3.6, 5.37, 4.04, 320, 240), BlobParams::default())
}

#[test]
fn intrinsics_qvga() {
    let intr = CameraIntrinsics::derive(3.6, 5.37, 4.04, 320, 240);
    assert!((intr.fx - 214.7).abs() < 0.5);
    assert!((intr.fy - 213.7).abs() < 0.5);
    assert_eq!((intr.cx, intr.cy), (160., 120.));
}

#[test]
fn metric_pose_scaling() {
    let pose = MetricPose::from_raw(Vec3::of(0.1, 0.2, 1.0), 20.);
    assert_eq!(pose, MetricPose::of(2., 4., 20.));
}

#[test]
fn distance_ignores_axis_signs_and_order() {
    let base = MetricPose::of(3., -4., 12.);
    assert!(approx_eq!(f64, base.distance(), 13., ulps = 2));
    for pose in [
        MetricPose::of(-3., 4., -12.),
        MetricPose::of(12., 3., -4.),
        MetricPose::of(-4., -12., 3.),
    ] {
        assert!(approx_eq!(f64, pose.distance(), base.distance(), ulps = 2));
    }
    assert_eq!(MetricPose::of(0., 0., 0.).distance(), 0.);
}

#[test]
fn end_to_end_frame() {
    let detections = [
        // origin at (1, 1, 1) mm
        MarkerDetection::new(3, Vec3::of(0.05, 0.05, 0.05), Point2D::of(30., 30.)),
        // pink at (4, 5, 6) mm
        MarkerDetection::new(0, Vec3::of(0.4, 0.5, 0.6), Point2D::of(100., 80.)),
        // green, no blob contains it
        MarkerDetection::new(1, Vec3::of(0., 0., 10.), Point2D::of(300., 200.)),
    ];
    let blobs = StaticBlobSource::new()
        .with(pink(), [
            Blob::new(PixelRect::new(0, 0, 50, 50)),
            Blob::new(PixelRect::new(90, 70, 30, 20)),
        ])
        .with(green(), [Blob::new(PixelRect::new(0, 0, 50, 50))]);

    let report = pipeline().process(&detections, &blobs);
    assert!(report.origin_found());
    assert_eq!(report.results.len(), 2);

    let pink = &report.results[0];
    assert_eq!(pink.name, "Pink");
    assert!(approx_eq!(f64, pink.distance_mm, 77f64.sqrt(), epsilon = 1e-9));
    assert!(pink.width_mm > 0. && pink.height_mm > 0.);
    let offset = pink.relative_position.offset().unwrap();
    assert!(approx_eq!(f64, offset.x(), 3., epsilon = 1e-9));
    assert!(approx_eq!(f64, offset.y(), 4., epsilon = 1e-9));
    assert!(approx_eq!(f64, offset.z(), 5., epsilon = 1e-9));

    let green = &report.results[1];
    assert_eq!(green.name, "Green");
    assert_eq!(green.distance_mm, 200.);
    assert_eq!(green.blob, None);
    assert_eq!((green.width_mm, green.height_mm), (0., 0.));
}

#[test]
fn missing_origin_is_reported() {
    let detections = [MarkerDetection::new(0, Vec3::of(0.4, 0.5, 0.6), Point2D::of(100., 80.))];
    let report = pipeline().process(&detections, &StaticBlobSource::new());
    assert!(!report.origin_found());
    assert_eq!(report.results[0].relative_position, RelativePosition::OriginNotFound);
    assert_eq!(report.results[0].relative_position.offset(), None);
}

#[test]
fn blob_selection_ignores_list_order() {
    let inside = Blob::new(PixelRect::new(90, 70, 30, 20));
    let outside = Blob::new(PixelRect::new(200, 150, 30, 20));
    let detections = [MarkerDetection::new(0, Vec3::of(0., 0., 10.), Point2D::of(100., 80.))];

    for blobs in [[inside, outside], [outside, inside]] {
        let source = StaticBlobSource::new().with(pink(), blobs);
        let report = pipeline().process(&detections, &source);
        let blob = report.results[0].blob.unwrap();
        assert_eq!((blob.pixel_width, blob.pixel_height), (30, 20));
    }
}

#[test]
fn unknown_markers_do_not_disturb_frame() {
    let registered = [
        MarkerDetection::new(3, Vec3::of(0., 0., 1.), Point2D::of(30., 30.)),
        MarkerDetection::new(0, Vec3::of(0.4, 0.5, 0.6), Point2D::of(100., 80.)),
    ];
    let mut with_unknown = registered.to_vec();
    with_unknown.insert(1, MarkerDetection::new(77, Vec3::of(1., 1., 1.), Point2D::of(100., 80.)));

    let pipeline = pipeline();
    let blobs = StaticBlobSource::new();
    let clean = pipeline.process(&registered, &blobs);
    let noisy = pipeline.process(&with_unknown, &blobs);
    assert_eq!(clean.results, noisy.results);
    assert_eq!(noisy.unknown_markers, 1);
}

#[test]
fn identical_input_identical_output() {
    let detections = [
        MarkerDetection::new(3, Vec3::of(0.1, 0.2, 1.0), Point2D::of(30., 30.)),
        MarkerDetection::new(0, Vec3::of(0.3, -0.1, 2.5), Point2D::of(100., 80.)),
        MarkerDetection::new(1, Vec3::of(-0.2, 0.1, 1.5), Point2D::of(210., 60.)),
    ];
    let blobs = StaticBlobSource::new()
        .with(pink(), [Blob::new(PixelRect::new(90, 70, 30, 20))])
        .with(green(), [Blob::new(PixelRect::new(200, 50, 25, 25))]);

    let pipeline = pipeline();
    let first = pipeline.process(&detections, &blobs);
    let second = pipeline.process(&detections, &blobs);
    assert_eq!(first.results, second.results);
    for (a, b) in first.results.iter().zip(second.results.iter()) {
        assert_eq!(a.distance_mm.to_bits(), b.distance_mm.to_bits());
        assert_eq!(a.width_mm.to_bits(), b.width_mm.to_bits());
    }

    let parallel = pipeline.with_parallel(true).process(&detections, &blobs);
    assert_eq!(first.results, parallel.results);
}

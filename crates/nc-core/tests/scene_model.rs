//! Integration tests: scene model value semantics (nc-core).
//!
//! Exercises entity construction, value updates and the serialized shape
//! consumed by render layers.

use nc_core::*;
use pretty_assertions::assert_eq;

fn src(tag: &str) -> ImageSource {
    ImageSource::new(format!("data:image/png;base64,{tag}"))
}

fn place(name: &str, center: Point, aspect: f32, z: u64) -> PlacedImage {
    PlacedImage::centered(EntityId::intern(name), src(name), center, aspect, DEFAULT_WIDTH, z)
        .expect("valid aspect ratio")
}

// ─── Construction ───────────────────────────────────────────────────────

#[test]
fn portrait_image_is_centered_on_drop_point() {
    let img = place("portrait", Point::new(100.0, 100.0), 0.5, 1);
    assert_eq!(img.width, 250.0);
    assert_eq!(img.height, 500.0);
    assert_eq!(img.x, -25.0);
    assert_eq!(img.y, -150.0);
}

#[test]
fn placement_at_canvas_center() {
    let vp = Viewport::for_aspect(1000.0, AspectRatio::Classic);
    let img = place("centered", vp.center(), 1.0, 1);
    assert_eq!(img.x + img.width / 2.0, 500.0);
    assert_eq!(img.y + img.height / 2.0, 375.0);
}

// ─── Value updates ──────────────────────────────────────────────────────

#[test]
fn scene_updates_produce_new_snapshots() {
    let a = place("snap_a", Point::new(0.0, 0.0), 1.0, 1);
    let b = place("snap_b", Point::new(10.0, 10.0), 1.0, 2);
    let before: Scene = [a.clone(), b.clone()].into_iter().collect();

    let after = before
        .with_updated(a.id, |img| img.raised(7))
        .with_updated(b.id, |img| img.moved_to(Point::new(1.0, 2.0)));

    assert_eq!(before.get(a.id).unwrap().z_index, 1);
    assert_eq!(after.get(a.id).unwrap().z_index, 7);
    assert_eq!(after.get(b.id).unwrap().position(), Point::new(1.0, 2.0));
    assert_ne!(before, after);
}

#[test]
fn without_drops_only_named_entities() {
    let scene: Scene = (0..5)
        .map(|i| place(&format!("drop_{i}"), Point::ZERO, 1.0, i))
        .collect();
    let gone = [
        EntityId::intern("drop_1"),
        EntityId::intern("drop_3"),
        EntityId::intern("missing"),
    ];
    let kept: Vec<String> = scene.without(&gone).ids().map(|id| id.as_str().to_owned()).collect();
    assert_eq!(kept, ["drop_0", "drop_2", "drop_4"]);
}

#[test]
fn with_each_applies_to_selected_entities() {
    let scene: Scene = (0..3)
        .map(|i| place(&format!("each_{i}"), Point::ZERO, 1.0, 1))
        .collect();
    let shifted = scene.with_each(|img| {
        (img.id != EntityId::intern("each_1")).then(|| img.moved_to(Point::new(9.0, 9.0)))
    });
    let xs: Vec<f32> = shifted.iter().map(|img| img.x).collect();
    let untouched = scene.get(EntityId::intern("each_1")).unwrap().x;
    assert_eq!(xs, [9.0, untouched, 9.0]);
}

// ─── Serialized shape ───────────────────────────────────────────────────

#[test]
fn scene_serializes_as_entity_array() {
    let img = PlacedImage {
        id: EntityId::intern("json_img"),
        source: ImageSource::new("data:image/png;base64,AA"),
        x: 1.0,
        y: 2.0,
        width: 300.0,
        height: 150.0,
        z_index: 4,
    };
    let scene: Scene = [img].into_iter().collect();
    let value = serde_json::to_value(&scene).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": "json_img",
            "source": "data:image/png;base64,AA",
            "x": 1.0,
            "y": 2.0,
            "width": 300.0,
            "height": 150.0,
            "zIndex": 4
        }])
    );

    let back: Scene = serde_json::from_value(value).unwrap();
    assert_eq!(back, scene);
}

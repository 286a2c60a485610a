use super::*;
use crate::doc::SceneObject;
use crate::surface::SceneSurface;

fn store(objects: Vec<SceneObject>) -> SceneSurface {
    let mut surface = SceneSurface::new(800.0, 600.0);
    for obj in objects {
        surface.add(obj);
    }
    surface
}

#[test]
fn empty_store_has_no_hit() {
    assert!(hit_test(Point::new(0.0, 0.0), &SceneSurface::new(800.0, 600.0)).is_none());
}

#[test]
fn point_inside_rect_hits() {
    let rect = SceneObject::rect(10.0, 10.0, 100.0, 100.0);
    let id = rect.id;
    let hit = hit_test(Point::new(50.0, 50.0), &store(vec![rect])).unwrap();
    assert_eq!(hit.object_id, id);
    assert!(hit.selectable);
}

#[test]
fn point_on_edge_hits() {
    let rect = SceneObject::rect(10.0, 10.0, 100.0, 100.0);
    assert!(hit_test(Point::new(110.0, 110.0), &store(vec![rect])).is_some());
}

#[test]
fn point_outside_misses() {
    let rect = SceneObject::rect(10.0, 10.0, 100.0, 100.0);
    assert!(hit_test(Point::new(5.0, 50.0), &store(vec![rect])).is_none());
}

#[test]
fn topmost_object_wins() {
    let below = SceneObject::rect(0.0, 0.0, 100.0, 100.0);
    let above = SceneObject::circle(20.0, 20.0, 50.0);
    let above_id = above.id;
    let hit = hit_test(Point::new(50.0, 50.0), &store(vec![below, above])).unwrap();
    assert_eq!(hit.object_id, above_id);
}

#[test]
fn non_selectable_object_shields_lower_objects() {
    let below = SceneObject::rect(0.0, 0.0, 100.0, 100.0);
    let cover = SceneObject::rect(0.0, 0.0, 100.0, 100.0).with_selectable(false);
    let cover_id = cover.id;
    let hit = hit_test(Point::new(50.0, 50.0), &store(vec![below, cover])).unwrap();
    assert_eq!(hit.object_id, cover_id);
    assert!(!hit.selectable);
}

#[test]
fn circle_hit_uses_bounding_box() {
    let circle = SceneObject::circle(0.0, 0.0, 50.0);
    let doc = store(vec![circle]);
    assert!(hit_test(Point::new(99.0, 99.0), &doc).is_some());
    assert!(hit_test(Point::new(101.0, 50.0), &doc).is_none());
}

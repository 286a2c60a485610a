#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

// =============================================================
// Shape sizes and bounds
// =============================================================

#[test]
fn rect_size_is_its_dimensions() {
    let obj = SceneObject::rect(5.0, 6.0, 100.0, 40.0);
    assert_eq!(obj.size(), (100.0, 40.0));
    assert_eq!(obj.bounds(), Bounds { left: 5.0, top: 6.0, width: 100.0, height: 40.0 });
}

#[test]
fn circle_size_is_diameter() {
    assert_eq!(SceneObject::circle(0.0, 0.0, 50.0).size(), (100.0, 100.0));
}

#[test]
fn stroke_widens_bounds_only_when_stroked() {
    let plain = SceneObject::rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(plain.size(), (10.0, 10.0));
    let stroked = plain.with_stroke("red", 4.0);
    assert_eq!(stroked.size(), (14.0, 14.0));
}

#[test]
fn text_size_scales_with_length_and_font() {
    let obj = SceneObject::text(0.0, 0.0, "abcd").with_font(10.0, "monospace");
    let (w, h) = obj.size();
    assert!((w - 24.0).abs() < 1e-9);
    assert!((h - 11.6).abs() < 1e-9);
}

#[test]
fn empty_group_has_zero_size() {
    assert_eq!(SceneObject::group(Vec::new()).size(), (0.0, 0.0));
}

#[test]
fn group_size_covers_children() {
    let a = SceneObject::rect(-50.0, -10.0, 20.0, 20.0);
    let b = SceneObject::rect(10.0, -30.0, 40.0, 10.0);
    let group = SceneObject::group(vec![a, b]);
    assert_eq!(group.size(), (100.0, 40.0));
}

#[test]
fn center_at_moves_bounds_centre() {
    let mut obj = SceneObject::rect(0.0, 0.0, 100.0, 50.0);
    obj.center_at(Point::new(200.0, 100.0));
    assert_eq!(obj.left, 150.0);
    assert_eq!(obj.top, 75.0);
    assert_eq!(obj.bounds().center(), Point::new(200.0, 100.0));
}

#[test]
fn bounds_union_and_contains() {
    let a = Bounds { left: 0.0, top: 0.0, width: 10.0, height: 10.0 };
    let b = Bounds { left: 20.0, top: 5.0, width: 10.0, height: 10.0 };
    let u = a.union(&b);
    assert_eq!(u, Bounds { left: 0.0, top: 0.0, width: 30.0, height: 15.0 });
    assert!(u.contains(Point::new(15.0, 7.0)));
    assert!(!a.contains(Point::new(15.0, 7.0)));
}

// =============================================================
// Builders and properties
// =============================================================

#[test]
fn builders_set_style_and_flags() {
    let obj = SceneObject::rect(0.0, 0.0, 1.0, 1.0)
        .with_fill("hsl(10, 70%, 60%)")
        .with_opacity(1.5)
        .with_selectable(false);
    assert_eq!(obj.style.fill.as_deref(), Some("hsl(10, 70%, 60%)"));
    assert_eq!(obj.opacity, 1.0);
    assert!(!obj.selectable);
    assert!(obj.without_fill().style.fill.is_none());
}

#[test]
fn with_font_ignores_non_text() {
    let obj = SceneObject::rect(0.0, 0.0, 1.0, 1.0).with_font(99.0, "serif");
    assert_eq!(obj.shape, Shape::Rect { width: 1.0, height: 1.0 });
}

#[test]
fn new_objects_get_distinct_ids() {
    let a = SceneObject::rect(0.0, 0.0, 1.0, 1.0);
    let b = SceneObject::rect(0.0, 0.0, 1.0, 1.0);
    assert_ne!(a.id, b.id);
}

#[test]
fn animatable_round_trips_each_property() {
    let mut obj = SceneObject::rect(0.0, 0.0, 1.0, 1.0);
    for (property, value) in [(Property::Left, 3.0), (Property::Top, -50.0), (Property::Angle, 360.0)] {
        obj.set_property(property, value);
        assert_eq!(obj.property(property), value);
    }
}

#[test]
fn opacity_property_is_clamped() {
    let mut obj = SceneObject::rect(0.0, 0.0, 1.0, 1.0);
    obj.set_property(Property::Opacity, -1.0);
    assert_eq!(obj.opacity, 0.0);
}

#[test]
fn shape_serializes_with_type_tag() {
    let value = serde_json::to_value(Shape::Circle { radius: 50.0, start_angle: 0.0, end_angle: 360.0 }).unwrap();
    assert_eq!(value["type"], "circle");
    assert_eq!(value["radius"], 50.0);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn aggregate_of_nothing_is_none() {
    assert_eq!(Selection::aggregate(Vec::new()), Selection::None);
}

#[test]
fn selection_len_and_members() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    assert_eq!(Selection::None.len(), 0);
    assert_eq!(Selection::Single(a).members(), vec![a]);
    let agg = Selection::Aggregate(vec![a, b]);
    assert_eq!(agg.len(), 2);
    assert!(agg.contains(&b));
}

#[test]
fn without_prunes_members() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    assert_eq!(Selection::Single(a).without(&a), Selection::None);
    assert_eq!(Selection::Single(a).without(&b), Selection::Single(a));
    assert_eq!(Selection::Aggregate(vec![a, b]).without(&a), Selection::Aggregate(vec![b]));
    assert_eq!(Selection::Aggregate(vec![a]).without(&a), Selection::None);
}

#[test]
fn toggled_grows_and_shrinks() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let sel = Selection::None.toggled(a);
    assert_eq!(sel, Selection::Single(a));
    let sel = sel.toggled(b);
    assert_eq!(sel, Selection::Aggregate(vec![a, b]));
    let sel = sel.toggled(a);
    assert_eq!(sel, Selection::Aggregate(vec![b]));
}

// =============================================================
// DocStore
// =============================================================

#[test]
fn store_keeps_insertion_order() {
    let mut doc = DocStore::new();
    let objs: Vec<SceneObject> = (0..5).map(|i| SceneObject::rect(f64::from(i), 0.0, 1.0, 1.0)).collect();
    let ids: Vec<ObjectId> = objs.iter().map(|o| o.id).collect();
    for obj in objs {
        doc.insert(obj);
    }
    assert_eq!(doc.ids(), ids);
    assert_eq!(doc.len(), 5);
}

#[test]
fn insert_same_id_replaces_in_place() {
    let mut doc = DocStore::new();
    let a = SceneObject::rect(0.0, 0.0, 1.0, 1.0);
    let b = SceneObject::rect(0.0, 0.0, 1.0, 1.0);
    let (a_id, b_id) = (a.id, b.id);
    doc.insert(a.clone());
    doc.insert(b);
    let mut moved = a;
    moved.left = 42.0;
    doc.insert(moved);
    assert_eq!(doc.ids(), vec![a_id, b_id]);
    assert_eq!(doc.get(&a_id).unwrap().left, 42.0);
}

#[test]
fn remove_returns_object_and_preserves_order() {
    let mut doc = DocStore::new();
    let objs: Vec<SceneObject> = (0..3).map(|_| SceneObject::rect(0.0, 0.0, 1.0, 1.0)).collect();
    let ids: Vec<ObjectId> = objs.iter().map(|o| o.id).collect();
    for obj in objs {
        doc.insert(obj);
    }
    assert_eq!(doc.remove(&ids[1]).map(|o| o.id), Some(ids[1]));
    assert_eq!(doc.ids(), vec![ids[0], ids[2]]);
    assert!(doc.remove(&ids[1]).is_none());
}

#[test]
fn clear_empties_store() {
    let mut doc = DocStore::new();
    doc.insert(SceneObject::rect(0.0, 0.0, 1.0, 1.0));
    doc.clear();
    assert!(doc.is_empty());
}

//! Integration tests for spincube-core
//!
//! These tests drive the drag state machine, the trackball math, and the
//! face hit-tester together, the way the viewer wires them at runtime.

use approx::assert_relative_eq;
use instant::Instant;
use nalgebra::{UnitQuaternion, Vector2};
use spincube_core::*;
use std::time::Duration;

fn viewport() -> Viewport {
    Viewport::new(800, 600)
}

/// Camera matching the scene defaults: at (0, 0, 100) looking down -Z
fn create_scene_camera() -> Camera {
    let mut camera = Camera::default();
    camera.set_viewport(viewport());
    camera
}

/// Run a full drag gesture and release within the flick window
fn drag(spin: &mut Spinnable, from: Vector2<f32>, to: Vector2<f32>) {
    let t0 = Instant::now();
    spin.begin_drag(from, viewport());
    spin.drag_move(to, viewport(), t0);
    spin.end_drag(to, t0 + Duration::from_millis(1));
}

#[test]
fn test_horizontal_drag_rotates_about_vertical_axis() {
    let mut spin = Spinnable::default();
    drag(&mut spin, Vector2::zeros(), Vector2::new(50.0, 0.0));

    let (axis, angle) = spin
        .orientation()
        .axis_angle()
        .expect("a 50 pixel drag must produce a rotation");
    assert_relative_eq!(axis.into_inner(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    assert!(angle > 0.0);
}

#[test]
fn test_drag_angle_scales_with_sensitivity() {
    let to = Vector2::new(50.0, 0.0);

    let mut single = Spinnable::new(SpinConfig {
        sensitivity: 1.0,
        ..SpinConfig::default()
    });
    drag(&mut single, Vector2::zeros(), to);

    let mut double = Spinnable::new(SpinConfig {
        sensitivity: 2.0,
        ..SpinConfig::default()
    });
    drag(&mut double, Vector2::zeros(), to);

    let single_angle = single.orientation().angle();
    let double_angle = double.orientation().angle();
    assert!(single_angle > 0.0);
    assert_relative_eq!(double_angle, single_angle * 2.0, epsilon = 1e-4);
}

#[test]
fn test_vertical_drag_rotates_about_horizontal_axis() {
    let mut spin = Spinnable::default();
    // Screen-down drag tips the top of the cube toward the viewer.
    drag(&mut spin, Vector2::zeros(), Vector2::new(0.0, 40.0));

    let (axis, angle) = spin.orientation().axis_angle().unwrap();
    assert_relative_eq!(axis.into_inner(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    assert!(angle > 0.0);
}

#[test]
fn test_spin_down_comes_to_rest_and_orientation_settles() {
    let mut spin = Spinnable::default();
    drag(&mut spin, Vector2::zeros(), Vector2::new(120.0, -60.0));
    assert!(spin.delta().norm() > 0.0);

    for _ in 0..400 {
        spin.tick(viewport());
    }
    assert_eq!(spin.delta(), Vector2::zeros());

    // At rest, further ticks must not move the orientation.
    let settled = spin.orientation();
    for _ in 0..10 {
        spin.tick(viewport());
    }
    assert_eq!(spin.orientation(), settled);
}

#[test]
fn test_dragged_cube_reports_rotated_face_under_cursor() {
    let camera = create_scene_camera();
    let cube = Cuboid::cube(15.5);
    let center = Vector2::new(400.0, 300.0);

    // Untouched cube shows +Z to the camera.
    let before = hit_test(
        center,
        &camera,
        viewport(),
        &UnitQuaternion::identity(),
        &cube,
    )
    .unwrap();
    assert_eq!(before.face, FaceIndex::PosZ);

    // A quarter turn about +Y swings -X into view.
    let orientation =
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f32::consts::FRAC_PI_2);
    let after = hit_test(center, &camera, viewport(), &orientation, &cube).unwrap();
    assert_eq!(after.face, FaceIndex::NegX);
}

#[test]
fn test_drag_then_pick_pipeline() {
    let camera = create_scene_camera();
    let cube = Cuboid::cube(15.5);
    let center = Vector2::new(400.0, 300.0);

    let mut spin = Spinnable::default();
    drag(&mut spin, Vector2::zeros(), Vector2::new(35.0, -20.0));
    for _ in 0..250 {
        spin.tick(viewport());
    }

    // Whatever face ended up in front, the center of the screen must report
    // one, and its distance puts it on the near side of the cube.
    let hit = hit_test(center, &camera, viewport(), &spin.orientation(), &cube)
        .expect("the cube still covers the screen center after a drag");
    assert!(hit.distance < 100.0);
    assert!(hit.distance > 100.0 - 15.5 * 2.0);
}

#[test]
fn test_flick_release_keeps_cube_spinning() {
    let mut spin = Spinnable::default();
    let t0 = Instant::now();
    spin.begin_drag(Vector2::zeros(), viewport());
    spin.drag_move(Vector2::new(30.0, 0.0), viewport(), t0);
    // The pointer rests, then flicks to 55 on the way out.
    spin.end_drag(Vector2::new(55.0, 0.0), t0 + Duration::from_millis(120));
    assert_eq!(spin.delta(), Vector2::new(25.0, 0.0));

    let before = spin.orientation();
    spin.tick(viewport());
    assert_ne!(spin.orientation(), before);
}

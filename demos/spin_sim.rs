//! Spin-down simulation
//!
//! Drives the trackball state without a window: one drag followed by a
//! release, then the leftover delta coasts and decays until it snaps to
//! rest. Prints the orientation as it settles.

use instant::Instant;
use nalgebra::{Vector2, Vector3};
use spincube_core::{SpinConfig, Spinnable, Viewport};
use std::time::Duration;

fn main() {
    println!("Spincube Spin-Down Simulation");
    println!("=============================");

    let viewport = Viewport::new(800, 600);
    let mut spin = Spinnable::new(SpinConfig::default());

    let t0 = Instant::now();
    spin.begin_drag(Vector2::new(400.0, 300.0), viewport);
    spin.drag_move(Vector2::new(520.0, 260.0), viewport, t0);
    spin.end_drag(Vector2::new(520.0, 260.0), t0 + Duration::from_millis(10));

    println!(
        "Released with delta ({:.1}, {:.1})",
        spin.delta().x,
        spin.delta().y
    );

    let mut frame = 0u32;
    while spin.delta() != Vector2::zeros() {
        spin.tick(viewport);
        frame += 1;
        if frame % 20 == 0 {
            report(frame, &spin);
        }
    }
    report(frame, &spin);
    println!("Settled after {} frames", frame);
}

fn report(frame: u32, spin: &Spinnable) {
    let (axis, angle) = spin
        .orientation()
        .axis_angle()
        .map(|(axis, angle)| (axis.into_inner(), angle))
        .unwrap_or((Vector3::zeros(), 0.0));
    println!(
        "frame {:4}: delta ({:7.3}, {:7.3})  angle {:.3} rad about ({:+.2}, {:+.2}, {:+.2})",
        frame,
        spin.delta().x,
        spin.delta().y,
        angle,
        axis.x,
        axis.y,
        axis.z
    );
}

//! Vehicle motion along precomputed paths.
//!
//! Each tick advances every vehicle's path parameter by `speed * dt` and
//! wraps it with exact modulo arithmetic, so a vehicle that completes a full
//! cycle lands back on its starting waypoint. Position is arc-length
//! interpolated between the two waypoints bracketing the parameter.

use bevy::prelude::*;

use crate::procgen::layout::{CityLayout, VehicleSpec};
use crate::simulation::{SimulationSpeed, VehicleTransform, VehicleTransforms};

/// Floor for vehicle speeds. Zero, negative, and NaN speeds clamp here so a
/// vehicle can never become permanently motionless.
pub const MIN_SPEED: f32 = 1e-3;

/// Ride height of the vehicle body center.
const BODY_HEIGHT: f32 = 0.65;

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (advance_vehicle_motion, sync_vehicle_transforms).chain());
    }
}

fn advance_vehicle_motion(
    time: Res<Time>,
    speed: Res<SimulationSpeed>,
    mut layout: ResMut<CityLayout>,
) {
    if speed.paused {
        return;
    }
    advance_vehicles(&mut layout.vehicles, time.delta_secs() * speed.speed);
}

fn sync_vehicle_transforms(layout: Res<CityLayout>, mut transforms: ResMut<VehicleTransforms>) {
    transforms.0.clear();
    transforms
        .0
        .extend(layout.vehicles.iter().map(vehicle_transform));
}

/// Clamp a configured speed to something that always moves the vehicle.
pub fn effective_speed(speed: f32) -> f32 {
    if speed.is_finite() && speed > MIN_SPEED {
        speed
    } else {
        MIN_SPEED
    }
}

/// Advance every vehicle's path parameter by one tick. Never panics:
/// degenerate speeds are clamped, degenerate paths are skipped.
pub fn advance_vehicles(vehicles: &mut [VehicleSpec], dt: f32) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    for vehicle in vehicles {
        if vehicle.path_len <= 0.0 {
            continue;
        }
        let distance = effective_speed(vehicle.speed) * dt;
        vehicle.path_param = (vehicle.path_param + distance).rem_euclid(vehicle.path_len);
    }
}

/// Position and travel direction at an arc-length parameter along a path.
pub fn sample_path(path: &[Vec2], param: f32) -> (Vec2, Vec2) {
    match path {
        [] => return (Vec2::ZERO, Vec2::X),
        [only] => return (*only, Vec2::X),
        _ => {}
    }

    let mut remaining = param.max(0.0);

    for window in path.windows(2) {
        let segment_len = window[0].distance(window[1]);
        if remaining <= segment_len && segment_len > 0.0 {
            let t = remaining / segment_len;
            let position = window[0].lerp(window[1], t);
            let direction = (window[1] - window[0]).normalize_or_zero();
            return (position, direction);
        }
        remaining -= segment_len;
    }

    // Parameter past the end: clamp to the final waypoint.
    let last = path[path.len() - 1];
    let direction = (last - path[path.len() - 2]).normalize_or_zero();
    (last, direction)
}

/// The renderer-facing transform for a vehicle at its current parameter.
pub fn vehicle_transform(vehicle: &VehicleSpec) -> VehicleTransform {
    let (position, direction) = sample_path(&vehicle.path, vehicle.path_param);
    VehicleTransform {
        position: Vec3::new(position.x, BODY_HEIGHT, position.y),
        yaw: direction.x.atan2(direction.y),
    }
}

use std::f32::consts::TAU;

use orrery_engine::systems::billboard;
use orrery_engine::{EngineContext, EntityId, Scene};

use crate::bodies::EARTH;
use crate::builder::SystemGraph;

/// Axial spin per frame, radians.
pub const PLANET_SPIN: f32 = 0.01;
pub const MOON_SPIN: f32 = 0.005;
pub const RING_SPIN: f32 = 0.002;

fn wrap(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

fn spin(scene: &mut Scene, id: EntityId, delta: f32) {
    if let Some(entity) = scene.get_mut(id) {
        entity.rotation.y = wrap(entity.rotation.y + delta);
    }
}

/// Advance every orbit by one frame.
///
/// Planets circle the origin; moons circle their planet's current position
/// (the transform graph adds the planet position to the moon's offset);
/// rings are snapped onto their planet.
pub fn advance(graph: &mut SystemGraph, ctx: &mut EngineContext) {
    for (index, planet) in graph.planets.iter_mut().enumerate() {
        planet.angle = wrap(planet.angle + planet.orbit_speed);
        let pos = planet.orbit_offset();
        if let Some(entity) = ctx.scene.get_mut(planet.entity) {
            entity.pos = pos;
        }
        spin(&mut ctx.scene, planet.entity, PLANET_SPIN);

        if let Some(moons) = graph.moons.get_mut(index) {
            for moon in moons.iter_mut() {
                moon.angle = wrap(moon.angle + moon.orbit_speed);
                graph.transforms.set_offset(moon.entity, moon.orbit_offset());
                spin(&mut ctx.scene, moon.entity, MOON_SPIN);
            }
        }

        if let Some(ring) = planet.ring {
            if let Some(entity) = ctx.scene.get_mut(ring) {
                entity.pos = pos;
            }
            spin(&mut ctx.scene, ring, RING_SPIN);
        }
    }

    graph.transforms.propagate(&mut ctx.scene);
}

/// Turn all labels toward the camera. Run after the camera has moved.
pub fn orient_labels(ctx: &mut EngineContext) {
    let eye = ctx.camera.position;
    billboard::orient_labels(&mut ctx.scene, eye);
}

/// Longitude (degrees) where the sun is overhead at `utc_hours`.
pub fn subsolar_longitude_deg(utc_hours: f32) -> f32 {
    (180.0 - 15.0 * (utc_hours - 12.0)) % 360.0 - 180.0
}

/// Turn Earth so its day side matches the given UTC time.
pub fn sync_earth_to_clock(graph: &SystemGraph, ctx: &mut EngineContext, utc_hours: f32) {
    let Some(earth) = graph.planet(EARTH) else {
        return;
    };
    if let Some(entity) = ctx.scene.get_mut(earth.entity) {
        entity.rotation.y = subsolar_longitude_deg(utc_hours).to_radians();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, JUPITER, PLANETS, SATURN};
    use crate::builder::{build_system, SystemOptions};
    use glam::Vec3;

    fn setup() -> (EngineContext, SystemGraph) {
        let mut ctx = EngineContext::new();
        let graph = build_system(&mut ctx, &PLANETS, &SystemOptions::default());
        (ctx, graph)
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn planet_follows_circular_orbit() {
        let (mut ctx, mut graph) = setup();
        for _ in 0..1000 {
            advance(&mut graph, &mut ctx);
        }
        let earth = graph.planet(EARTH).unwrap();
        let a = 1000.0 * 0.0003_f32;
        assert!((earth.angle - a).abs() < 1e-4);
        let pos = ctx.scene.position(earth.entity).unwrap();
        assert!(close(pos, Vec3::new(a.cos() * 20.0, 0.0, a.sin() * 20.0)));
        assert!((pos.length() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn moon_is_parent_position_plus_offset() {
        let (mut ctx, mut graph) = setup();
        for _ in 0..500 {
            advance(&mut graph, &mut ctx);
        }
        for (index, moon) in graph.moons[JUPITER].iter().enumerate() {
            let parent = ctx.scene.position(graph.planets[JUPITER].entity).unwrap();
            let a = 500.0 * PLANETS[JUPITER].moons[index].orbit_speed;
            let r = PLANETS[JUPITER].moons[index].orbit_radius;
            let expected = parent + Vec3::new(a.cos() * r, 0.0, a.sin() * r);
            assert!(close(ctx.scene.position(moon.entity).unwrap(), expected));
            assert_eq!(ctx.scene.position(moon.entity).unwrap().y, 0.0);
        }
    }

    #[test]
    fn moon_position_ignores_planet_spin() {
        let (mut ctx, mut graph) = setup();
        advance(&mut graph, &mut ctx);
        let moon = graph.moon(EARTH, 0).unwrap().entity;
        let before = ctx.scene.position(moon).unwrap();
        // Spinning the planet must not drag the moon around.
        ctx.scene.get_mut(graph.planets[EARTH].entity).unwrap().rotation.y += 1.0;
        graph.transforms.propagate(&mut ctx.scene);
        assert_eq!(ctx.scene.position(moon).unwrap(), before);
    }

    #[test]
    fn ring_tracks_planet_and_spins() {
        let (mut ctx, mut graph) = setup();
        for _ in 0..10 {
            advance(&mut graph, &mut ctx);
        }
        let saturn = graph.planet(SATURN).unwrap();
        let ring = ctx.scene.get(saturn.ring.unwrap()).unwrap();
        assert_eq!(ring.pos, ctx.scene.position(saturn.entity).unwrap());
        assert!((ring.rotation.y - 10.0 * RING_SPIN).abs() < 1e-5);
        assert!((ring.rotation.x - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn planet_spin_accumulates() {
        let (mut ctx, mut graph) = setup();
        for _ in 0..3 {
            advance(&mut graph, &mut ctx);
        }
        let earth = ctx.scene.get(graph.planets[EARTH].entity).unwrap();
        assert!((earth.rotation.y - 0.03).abs() < 1e-6);
        let moon = ctx.scene.get(graph.moons[EARTH][0].entity).unwrap();
        assert!((moon.rotation.y - 0.015).abs() < 1e-6);
    }

    #[test]
    fn angles_stay_wrapped() {
        let (mut ctx, mut graph) = setup();
        graph.planets[EARTH].angle = TAU - 0.0001;
        advance(&mut graph, &mut ctx);
        let angle = graph.planets[EARTH].angle;
        assert!((0.0..TAU).contains(&angle));
        assert!((angle - 0.0002).abs() < 1e-4);
    }

    #[test]
    fn labels_follow_their_body() {
        let (mut ctx, mut graph) = setup();
        for _ in 0..50 {
            advance(&mut graph, &mut ctx);
        }
        let mars = &graph.planets[crate::bodies::MARS];
        let label = ctx.scene.position(mars.label.unwrap()).unwrap();
        let body = ctx.scene.position(mars.entity).unwrap();
        assert!(close(label, body + Vec3::new(0.0, 0.3 + 0.5, 0.0)));
    }

    #[test]
    fn labels_face_the_camera() {
        let (mut ctx, mut graph) = setup();
        advance(&mut graph, &mut ctx);
        orient_labels(&mut ctx);
        let label = ctx.scene.get(graph.planets[EARTH].label.unwrap()).unwrap();
        let to_eye = (ctx.camera.position - label.pos).normalize();
        assert!((label.orientation() * Vec3::Z - to_eye).length() < 1e-3);
    }

    #[test]
    fn subsolar_longitude_at_known_times() {
        assert_eq!(subsolar_longitude_deg(12.0), 0.0);
        assert_eq!(subsolar_longitude_deg(0.0), -180.0);
        assert_eq!(subsolar_longitude_deg(18.0), -90.0);
        assert_eq!(subsolar_longitude_deg(6.0), 90.0);
    }

    #[test]
    fn clock_sync_sets_earth_spin() {
        let (mut ctx, graph) = setup();
        sync_earth_to_clock(&graph, &mut ctx, 18.0);
        let earth = ctx.scene.get(graph.planets[EARTH].entity).unwrap();
        assert!((earth.rotation.y - (-90.0_f32).to_radians()).abs() < 1e-6);
    }
}

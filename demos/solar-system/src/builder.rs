use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use serde::Deserialize;
use orrery_engine::{
    EngineContext, Entity, EntityId, LabelComponent, Material, MeshComponent,
    OrbitPathComponent, PointLight, Rgb, TextureId, TransformGraph,
};

use crate::bodies::{PlanetDef, SUN};

pub const PLANET_PATH_COLOR: u32 = 0x888888;
pub const MOON_PATH_COLOR: u32 = 0x666666;
pub const PATH_SEGMENTS: u32 = 64;
pub const PATH_OPACITY: f32 = 0.3;
pub const LABEL_SIZE: Vec2 = Vec2::new(2.0, 0.5);
/// Gap between a body's surface and its label.
pub const PLANET_LABEL_GAP: f32 = 0.5;
pub const MOON_LABEL_GAP: f32 = 0.3;
pub const RING_ALPHA_TEST: f32 = 0.5;

/// What a body is, and for moons which planet it circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon { parent: usize },
}

/// Runtime state of one sun, planet or moon.
#[derive(Debug, Clone)]
pub struct BodyInstance {
    pub entity: EntityId,
    pub name: &'static str,
    pub kind: BodyKind,
    /// Current orbital angle in radians, kept in [0, 2π).
    pub angle: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    /// Display radius.
    pub radius: f32,
    pub ring: Option<EntityId>,
    pub orbit_path: Option<EntityId>,
    pub label: Option<EntityId>,
}

impl BodyInstance {
    fn new(entity: EntityId, name: &'static str, kind: BodyKind, radius: f32) -> Self {
        Self {
            entity,
            name,
            kind,
            angle: 0.0,
            orbit_radius: 0.0,
            orbit_speed: 0.0,
            radius,
            ring: None,
            orbit_path: None,
            label: None,
        }
    }

    /// Offset from the orbit center for the current angle.
    pub fn orbit_offset(&self) -> Vec3 {
        Vec3::new(self.angle.cos() * self.orbit_radius, 0.0, self.angle.sin() * self.orbit_radius)
    }
}

/// A clickable body, as the selection controller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Planet(usize),
    /// `moon` indexes the parent planet's moon list.
    Moon { planet: usize, moon: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clickable {
    pub entity: EntityId,
    pub target: Pick,
}

/// Which optional decorations to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemOptions {
    pub orbit_paths: bool,
    pub labels: bool,
}

impl Default for SystemOptions {
    fn default() -> Self {
        Self {
            orbit_paths: true,
            labels: true,
        }
    }
}

impl SystemOptions {
    pub fn from_json(json: &str) -> orrery_engine::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Everything the builder created, owned by the game for the whole session.
#[derive(Debug, Default)]
pub struct SystemGraph {
    pub sun: Option<BodyInstance>,
    pub planets: Vec<BodyInstance>,
    /// Per planet, its moons in declaration order.
    pub moons: Vec<Vec<BodyInstance>>,
    pub transforms: TransformGraph,
    /// Planets first, then moons.
    pub clickable: Vec<Clickable>,
}

impl SystemGraph {
    pub fn planet(&self, index: usize) -> Option<&BodyInstance> {
        self.planets.get(index)
    }

    pub fn moon(&self, planet: usize, moon: usize) -> Option<&BodyInstance> {
        self.moons.get(planet).and_then(|m| m.get(moon))
    }

    pub fn body(&self, pick: Pick) -> Option<&BodyInstance> {
        match pick {
            Pick::Planet(i) => self.planet(i),
            Pick::Moon { planet, moon } => self.moon(planet, moon),
        }
    }

    /// Map a hit entity back to the body it belongs to.
    pub fn pick_for(&self, entity: EntityId) -> Option<Pick> {
        self.clickable.iter().find(|c| c.entity == entity).map(|c| c.target)
    }

    pub fn clickable_entities(&self) -> Vec<EntityId> {
        self.clickable.iter().map(|c| c.entity).collect()
    }

    fn all_bodies(&self) -> impl Iterator<Item = &BodyInstance> {
        self.sun.iter().chain(self.planets.iter()).chain(self.moons.iter().flatten())
    }

    pub fn orbit_path_entities(&self) -> Vec<EntityId> {
        self.all_bodies().filter_map(|b| b.orbit_path).collect()
    }

    pub fn label_entities(&self) -> Vec<EntityId> {
        self.all_bodies().filter_map(|b| b.label).collect()
    }
}

/// Register an image texture; failures leave the material untextured.
fn register_texture(ctx: &mut EngineContext, path: &str) -> Option<TextureId> {
    match ctx.textures.register_image(path) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("builder: {}", e);
            None
        }
    }
}

fn spawn_path(ctx: &mut EngineContext, tag: String, radius: f32, color: u32) -> EntityId {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id).with_tag(tag).with_path(
            OrbitPathComponent::new(radius, Rgb::from_hex(color))
                .with_segments(PATH_SEGMENTS)
                .with_opacity(PATH_OPACITY),
        ),
    );
    id
}

fn spawn_label(ctx: &mut EngineContext, text: &str) -> EntityId {
    let id = ctx.next_id();
    let texture = ctx.textures.register_text(text);
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag(format!("{}-label", text))
            .with_label(LabelComponent::new(text).with_texture(Some(texture)).with_size(LABEL_SIZE)),
    );
    id
}

fn spawn_sun(ctx: &mut EngineContext, transforms: &mut TransformGraph) -> BodyInstance {
    let id = ctx.next_id();
    let material = Material::default()
        .with_texture(register_texture(ctx, SUN.texture))
        .unlit();
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag(SUN.name)
            .with_mesh(MeshComponent::sphere(SUN.radius, material)),
    );
    transforms.register(id);

    // Dim ambient fill plus a warm light at the sun.
    ctx.lights.set_ambient(Rgb::from_hex(0x404040).into(), 0.5);
    ctx.lights.add(PointLight::new(Vec3::ZERO, Rgb::from_hex(0xffff99).into(), 1.5, 1000.0));

    BodyInstance::new(id, SUN.name, BodyKind::Star, SUN.radius)
}

/// Spawn the sun, planets, moons, rings and their decorations.
pub fn build_system(
    ctx: &mut EngineContext,
    planets: &'static [PlanetDef],
    options: &SystemOptions,
) -> SystemGraph {
    let mut graph = SystemGraph::default();
    graph.sun = Some(spawn_sun(ctx, &mut graph.transforms));

    let mut moon_clickables = Vec::new();

    for (index, def) in planets.iter().enumerate() {
        let id = ctx.next_id();
        let material = Material::default().with_texture(register_texture(ctx, def.texture));
        let mut planet = BodyInstance::new(id, def.name, BodyKind::Planet, def.radius);
        planet.orbit_radius = def.orbit_radius;
        planet.orbit_speed = def.orbit_speed;

        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(def.name)
                .with_pos(planet.orbit_offset())
                .with_mesh(MeshComponent::sphere(def.radius, material))
                .pickable(true),
        );
        graph.transforms.register(id);

        if options.orbit_paths {
            let path = spawn_path(ctx, format!("{}-orbit", def.name), def.orbit_radius, PLANET_PATH_COLOR);
            graph.transforms.register(path);
            planet.orbit_path = Some(path);
        }

        if options.labels {
            let label = spawn_label(ctx, def.name);
            graph.transforms.attach(label, id, Vec3::new(0.0, def.radius + PLANET_LABEL_GAP, 0.0));
            planet.label = Some(label);
        }

        let mut moons = Vec::with_capacity(def.moons.len());
        for (moon_index, moon_def) in def.moons.iter().enumerate() {
            let moon_id = ctx.next_id();
            let material = Material::default().with_texture(register_texture(ctx, moon_def.texture));
            let mut moon = BodyInstance::new(moon_id, moon_def.name, BodyKind::Moon { parent: index }, moon_def.radius);
            moon.orbit_radius = moon_def.orbit_radius;
            moon.orbit_speed = moon_def.orbit_speed;

            ctx.scene.spawn(
                Entity::new(moon_id)
                    .with_tag(moon_def.name)
                    .with_mesh(MeshComponent::sphere(moon_def.radius, material))
                    .pickable(true),
            );
            graph.transforms.attach(moon_id, id, moon.orbit_offset());

            if options.orbit_paths {
                let path = spawn_path(ctx, format!("{}-orbit", moon_def.name), moon_def.orbit_radius, MOON_PATH_COLOR);
                graph.transforms.attach(path, id, Vec3::ZERO);
                moon.orbit_path = Some(path);
            }

            if options.labels {
                let label = spawn_label(ctx, moon_def.name);
                graph.transforms.attach(label, moon_id, Vec3::new(0.0, moon_def.radius + MOON_LABEL_GAP, 0.0));
                moon.label = Some(label);
            }

            moon_clickables.push(Clickable {
                entity: moon_id,
                target: Pick::Moon { planet: index, moon: moon_index },
            });
            moons.push(moon);
        }

        if let Some(ring_def) = &def.ring {
            let ring_id = ctx.next_id();
            let material = Material::default()
                .with_texture(register_texture(ctx, ring_def.texture))
                .with_opacity(ring_def.opacity)
                .double_sided()
                .with_alpha_test(RING_ALPHA_TEST);
            ctx.scene.spawn(
                Entity::new(ring_id)
                    .with_tag(format!("{}-rings", def.name))
                    .with_pos(planet.orbit_offset())
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                    .with_mesh(MeshComponent::ring(ring_def.inner_radius, ring_def.outer_radius, material)),
            );
            graph.transforms.register(ring_id);
            planet.ring = Some(ring_id);
        }

        graph.clickable.push(Clickable { entity: id, target: Pick::Planet(index) });
        graph.planets.push(planet);
        graph.moons.push(moons);
    }

    graph.clickable.extend(moon_clickables);
    graph.transforms.propagate(&mut ctx.scene);

    log::info!(
        "built {} planets, {} moons, {} entities",
        graph.planets.len(),
        graph.moons.iter().map(Vec::len).sum::<usize>(),
        ctx.scene.len()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, JUPITER, PLANETS, SATURN};
    use orrery_engine::MeshShape;

    fn build(options: SystemOptions) -> (EngineContext, SystemGraph) {
        let mut ctx = EngineContext::new();
        let graph = build_system(&mut ctx, &PLANETS, &options);
        (ctx, graph)
    }

    #[test]
    fn clickable_lists_planets_then_moons() {
        let (_, graph) = build(SystemOptions::default());
        assert_eq!(graph.clickable.len(), 8 + 7);
        assert_eq!(graph.clickable[0].target, Pick::Planet(0));
        assert_eq!(graph.clickable[8].target, Pick::Moon { planet: EARTH, moon: 0 });
        assert_eq!(graph.clickable[14].target, Pick::Moon { planet: JUPITER, moon: 3 });
    }

    static UNTEXTURED: [PlanetDef; 1] = [PlanetDef {
        name: "Vulcan", radius: 0.4, orbit_radius: 5.0, orbit_speed: 0.001, texture: "",
        moons: &[crate::bodies::MoonDef {
            name: "Shard", radius: 0.05, orbit_radius: 0.8, orbit_speed: 0.002, texture: "  ",
        }],
        ring: None,
    }];

    #[test]
    fn bad_texture_path_still_builds_the_body() {
        let mut ctx = EngineContext::new();
        let graph = build_system(&mut ctx, &UNTEXTURED, &SystemOptions::default());

        assert_eq!(graph.planets.len(), 1);
        assert_eq!(graph.moons[0].len(), 1);
        for id in [graph.planets[0].entity, graph.moons[0][0].entity] {
            let mesh = ctx.scene.get(id).unwrap().mesh.unwrap();
            assert_eq!(mesh.material.texture, None);
        }
        assert_eq!(graph.clickable.len(), 2);
    }

    #[test]
    fn decorations_are_not_pickable() {
        let (ctx, graph) = build(SystemOptions::default());
        let saturn = graph.planet(SATURN).unwrap();
        for id in [saturn.ring.unwrap(), saturn.label.unwrap(), saturn.orbit_path.unwrap()] {
            assert!(!ctx.scene.get(id).unwrap().pickable);
        }
        assert!(ctx.scene.get(saturn.entity).unwrap().pickable);
        assert!(!ctx.scene.get(graph.sun.as_ref().unwrap().entity).unwrap().pickable);
    }

    #[test]
    fn ring_is_flat_double_sided_and_transparent() {
        let (ctx, graph) = build(SystemOptions::default());
        let ring = ctx.scene.get(graph.planet(SATURN).unwrap().ring.unwrap()).unwrap();
        let mesh = ring.mesh.unwrap();
        assert_eq!(mesh.shape, MeshShape::Ring { inner_radius: 1.5, outer_radius: 2.5 });
        assert!(mesh.material.double_sided && mesh.material.transparent);
        assert_eq!(mesh.material.alpha_test, 0.5);
        assert!((ring.rotation.x - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(ring.pos, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn initial_positions_follow_parent_relative_convention() {
        let (ctx, graph) = build(SystemOptions::default());
        let earth = graph.planet(EARTH).unwrap();
        let moon = graph.moon(EARTH, 0).unwrap();
        assert_eq!(ctx.scene.position(earth.entity), Some(Vec3::new(20.0, 0.0, 0.0)));
        assert_eq!(ctx.scene.position(moon.entity), Some(Vec3::new(22.0, 0.0, 0.0)));
        // Moon guide sits on the planet; label floats above the moon.
        assert_eq!(ctx.scene.position(moon.orbit_path.unwrap()), Some(Vec3::new(20.0, 0.0, 0.0)));
        let label = ctx.scene.position(moon.label.unwrap()).unwrap();
        assert!((label - Vec3::new(22.0, 0.4, 0.0)).length() < 1e-5);
    }

    #[test]
    fn options_skip_guides_and_labels() {
        let (ctx, graph) = build(SystemOptions { orbit_paths: false, labels: false });
        assert!(graph.orbit_path_entities().is_empty());
        assert!(graph.label_entities().is_empty());
        assert!(ctx.scene.iter().all(|e| e.path.is_none() && e.label.is_none()));
        // Sun, 8 planets, 7 moons, 2 rings.
        assert_eq!(ctx.scene.len(), 18);
    }

    #[test]
    fn every_body_texture_is_requested() {
        let (mut ctx, _) = build(SystemOptions { orbit_paths: false, labels: false });
        // Sun + 8 planets + 7 moons + 2 ring textures.
        assert_eq!(ctx.textures.take_requests().len(), 18);
    }

    #[test]
    fn options_parse_from_json() {
        let options = SystemOptions::from_json(r#"{"labels": false}"#).unwrap();
        assert!(options.orbit_paths);
        assert!(!options.labels);
        assert!(SystemOptions::from_json("not json").is_err());
    }
}

/// Celestial body registry: display sizes, orbit radii and angular speeds.
///
/// Values are stylized for readability, not to scale. Speeds are radians
/// per simulated frame.

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

/// The central star.
pub struct SunDef {
    pub name: &'static str,
    pub radius: f32,
    pub texture: &'static str,
}

pub struct MoonDef {
    pub name: &'static str,
    pub radius: f32,
    /// Distance from the parent planet's center.
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub texture: &'static str,
}

pub struct RingDef {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: &'static str,
    pub opacity: f32,
}

pub struct PlanetDef {
    pub name: &'static str,
    pub radius: f32,
    /// Distance from the sun.
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub texture: &'static str,
    pub moons: &'static [MoonDef],
    pub ring: Option<RingDef>,
}

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN: SunDef = SunDef {
    name: "Sun",
    radius: 1.0,
    texture: "textures/sun-map.jpg",
};

// ── Moons ────────────────────────────────────────────────────────────

const EARTH_MOONS: [MoonDef; 1] = [
    MoonDef { name: "Moon", radius: 0.1, orbit_radius: 2.0, orbit_speed: 0.001, texture: "textures/moon-map.jpg" },
];

const MARS_MOONS: [MoonDef; 2] = [
    MoonDef { name: "Phobos", radius: 0.05, orbit_radius: 0.5, orbit_speed: 0.002, texture: "textures/phobos-map.jpg" },
    MoonDef { name: "Deimos", radius: 0.04, orbit_radius: 0.7, orbit_speed: 0.0015, texture: "textures/deimos-map.jpg" },
];

const JUPITER_MOONS: [MoonDef; 4] = [
    MoonDef { name: "Io",       radius: 0.15, orbit_radius: 3.0, orbit_speed: 0.002,  texture: "textures/io-map.jpg" },
    MoonDef { name: "Europa",   radius: 0.12, orbit_radius: 4.0, orbit_speed: 0.0015, texture: "textures/europa-map.jpg" },
    MoonDef { name: "Ganymede", radius: 0.2,  orbit_radius: 5.0, orbit_speed: 0.001,  texture: "textures/ganymede-map.jpg" },
    MoonDef { name: "Callisto", radius: 0.18, orbit_radius: 6.0, orbit_speed: 0.0008, texture: "textures/callisto-map.jpg" },
];

// ── Planets ──────────────────────────────────────────────────────────

pub static PLANETS: [PlanetDef; PLANET_COUNT] = [
    PlanetDef {
        name: "Mercury", radius: 0.2, orbit_radius: 10.0, orbit_speed: 0.00048,
        texture: "textures/mercury-map.jpg", moons: &[], ring: None,
    },
    PlanetDef {
        name: "Venus", radius: 0.5, orbit_radius: 15.0, orbit_speed: 0.00035,
        texture: "textures/venus-map.jpg", moons: &[], ring: None,
    },
    PlanetDef {
        name: "Earth", radius: 0.5, orbit_radius: 20.0, orbit_speed: 0.0003,
        texture: "textures/earth-map.jpg", moons: &EARTH_MOONS, ring: None,
    },
    PlanetDef {
        name: "Mars", radius: 0.3, orbit_radius: 25.0, orbit_speed: 0.00028,
        texture: "textures/mars-map.jpg", moons: &MARS_MOONS, ring: None,
    },
    PlanetDef {
        name: "Jupiter", radius: 1.2, orbit_radius: 40.0, orbit_speed: 0.00013,
        texture: "textures/jupiter-map.jpg", moons: &JUPITER_MOONS, ring: None,
    },
    PlanetDef {
        name: "Saturn", radius: 1.0, orbit_radius: 50.0, orbit_speed: 0.0001,
        texture: "textures/saturn-map.jpg", moons: &[],
        ring: Some(RingDef { inner_radius: 1.5, outer_radius: 2.5, texture: "textures/saturn-rings.jpg", opacity: 0.8 }),
    },
    PlanetDef {
        name: "Uranus", radius: 0.8, orbit_radius: 60.0, orbit_speed: 0.00007,
        texture: "textures/uranus-map.jpg", moons: &[],
        ring: Some(RingDef { inner_radius: 1.2, outer_radius: 1.5, texture: "textures/uranus-rings.jpg", opacity: 0.3 }),
    },
    PlanetDef {
        name: "Neptune", radius: 0.8, orbit_radius: 70.0, orbit_speed: 0.00005,
        texture: "textures/neptune-map.jpg", moons: &[], ring: None,
    },
];

/// Index of the planet with the given name.
pub fn planet_index(name: &str) -> Option<usize> {
    PLANETS.iter().position(|p| p.name == name)
}

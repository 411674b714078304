//! Descriptive text for the info panel, loaded from `data/planets.json`.

use std::collections::HashMap;

use serde::Deserialize;

pub const RING_SENTENCE: &str = " It is known for its ring system.";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RingInfo {
    pub interesting_fact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoonInfo {
    pub basic_info: String,
    pub interesting_fact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanetInfo {
    pub basic_info: String,
    pub interesting_fact: String,
    pub rings: Option<RingInfo>,
    pub moons: HashMap<String, MoonInfo>,
}

/// What the panel shows for one body.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    pub title: String,
    pub basic_info: String,
    pub interesting_fact: String,
}

/// Info records keyed by planet name. Empty until the host delivers the
/// data file; lookups before that simply miss.
#[derive(Debug, Default)]
pub struct InfoCatalog {
    planets: HashMap<String, PlanetInfo>,
}

impl InfoCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog with the contents of a JSON document.
    /// On error the previous contents are kept.
    pub fn load(&mut self, json: &str) -> orrery_engine::Result<()> {
        self.planets = serde_json::from_str(json)?;
        log::info!("info: loaded {} planet records", self.planets.len());
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        !self.planets.is_empty()
    }

    /// Panel text for a planet, with the ring sentence and fact appended
    /// when the record has a `rings` entry.
    pub fn describe_planet(&self, name: &str) -> Option<PanelContent> {
        let info = self.planets.get(name)?;
        let mut content = PanelContent {
            title: name.to_string(),
            basic_info: info.basic_info.clone(),
            interesting_fact: info.interesting_fact.clone(),
        };
        if let Some(rings) = &info.rings {
            content.basic_info.push_str(RING_SENTENCE);
            content.interesting_fact.push(' ');
            content.interesting_fact.push_str(&rings.interesting_fact);
        }
        Some(content)
    }

    pub fn describe_moon(&self, planet: &str, moon: &str) -> Option<PanelContent> {
        let info = self.planets.get(planet)?.moons.get(moon)?;
        Some(PanelContent {
            title: moon.to_string(),
            basic_info: info.basic_info.clone(),
            interesting_fact: info.interesting_fact.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{
        "Earth": {
            "basicInfo": "Third planet.",
            "interestingFact": "Only known life.",
            "moons": {
                "Moon": { "basicInfo": "Earth's satellite.", "interestingFact": "Tidally locked." }
            }
        },
        "Saturn": {
            "basicInfo": "Gas giant.",
            "interestingFact": "Less dense than water.",
            "rings": { "interestingFact": "Mostly ice." }
        }
    }"#;

    fn catalog() -> InfoCatalog {
        let mut catalog = InfoCatalog::new();
        catalog.load(DATA).unwrap();
        catalog
    }

    #[test]
    fn ring_text_is_appended() {
        let saturn = catalog().describe_planet("Saturn").unwrap();
        assert_eq!(saturn.basic_info, "Gas giant. It is known for its ring system.");
        assert_eq!(saturn.interesting_fact, "Less dense than water. Mostly ice.");
    }

    #[test]
    fn ring_text_is_appended_once_per_display() {
        let catalog = catalog();
        let first = catalog.describe_planet("Saturn").unwrap();
        let second = catalog.describe_planet("Saturn").unwrap();
        assert_eq!(first, second);
        assert_eq!(second.basic_info.matches("ring system").count(), 1);
    }

    #[test]
    fn planet_without_rings_is_verbatim() {
        let earth = catalog().describe_planet("Earth").unwrap();
        assert_eq!(earth.title, "Earth");
        assert_eq!(earth.basic_info, "Third planet.");
        assert_eq!(earth.interesting_fact, "Only known life.");
    }

    #[test]
    fn moon_lookup_goes_through_parent() {
        let catalog = catalog();
        let moon = catalog.describe_moon("Earth", "Moon").unwrap();
        assert_eq!(moon.title, "Moon");
        assert_eq!(moon.interesting_fact, "Tidally locked.");
        assert!(catalog.describe_moon("Mars", "Moon").is_none());
        assert!(catalog.describe_moon("Earth", "Phobos").is_none());
    }

    #[test]
    fn empty_catalog_misses() {
        let catalog = InfoCatalog::new();
        assert!(!catalog.is_loaded());
        assert!(catalog.describe_planet("Earth").is_none());
    }

    #[test]
    fn bad_json_keeps_previous_contents() {
        let mut catalog = catalog();
        assert!(catalog.load("{ nope").is_err());
        assert!(catalog.describe_planet("Earth").is_some());
    }
}

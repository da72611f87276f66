//! Resource identifiers and the planet → resource catalog.
//!
//! [`ResourceKind`] is a closed enumeration; display strings, base draw
//! probabilities and sale values are explicit mapping tables on the enum
//! rather than string comparisons scattered through the code.
//!
//! [`ResourceCatalog`] answers "what can be mined here".  Unknown planet names
//! fall back to [`DEFAULT_RESOURCES`].

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

/// Every mineable resource, ordered from most to least common.
///
/// The declaration order is the fixed deterministic ordering used to build the
/// cumulative distribution in [`crate::mining::ResourceTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Water,
    Sulfur,
    Petroleum,
    Coal,
    Methane,
    Oxygen,
    Iron,
    Aluminum,
    Copper,
    Lead,
    Hydrogen,
    Lithium,
    Titanium,
    Gold,
    Uranium,
    Diamonds,
    Ice7,
    Deuterium,
    Tungsten,
    Neodymium,
    Osmium,
    Rhodium,
    Plutonium,
    Tritium,
    Antimatter,
}

impl ResourceKind {
    /// All resources in table order.
    pub const ALL: [ResourceKind; 25] = [
        ResourceKind::Water,
        ResourceKind::Sulfur,
        ResourceKind::Petroleum,
        ResourceKind::Coal,
        ResourceKind::Methane,
        ResourceKind::Oxygen,
        ResourceKind::Iron,
        ResourceKind::Aluminum,
        ResourceKind::Copper,
        ResourceKind::Lead,
        ResourceKind::Hydrogen,
        ResourceKind::Lithium,
        ResourceKind::Titanium,
        ResourceKind::Gold,
        ResourceKind::Uranium,
        ResourceKind::Diamonds,
        ResourceKind::Ice7,
        ResourceKind::Deuterium,
        ResourceKind::Tungsten,
        ResourceKind::Neodymium,
        ResourceKind::Osmium,
        ResourceKind::Rhodium,
        ResourceKind::Plutonium,
        ResourceKind::Tritium,
        ResourceKind::Antimatter,
    ];

    /// Lower-case display name shown on the HUD.
    pub fn label(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Sulfur => "sulfur",
            Self::Petroleum => "petroleum",
            Self::Coal => "coal",
            Self::Methane => "methane",
            Self::Oxygen => "oxygen",
            Self::Iron => "iron",
            Self::Aluminum => "aluminum",
            Self::Copper => "copper",
            Self::Lead => "lead",
            Self::Hydrogen => "hydrogen",
            Self::Lithium => "lithium",
            Self::Titanium => "titanium",
            Self::Gold => "gold",
            Self::Uranium => "uranium",
            Self::Diamonds => "diamonds",
            Self::Ice7 => "ice7",
            Self::Deuterium => "deuterium",
            Self::Tungsten => "tungsten",
            Self::Neodymium => "neodymium",
            Self::Osmium => "osmium",
            Self::Rhodium => "rhodium",
            Self::Plutonium => "plutonium",
            Self::Tritium => "tritium",
            Self::Antimatter => "antimatter",
        }
    }

    /// Raw (un-normalized) draw weight.
    ///
    /// Deuterium is intentionally rarer than its neighbours in the value
    /// ladder; the table is not monotone in value.
    pub fn base_probability(self) -> f64 {
        match self {
            Self::Water => 0.1,
            Self::Sulfur => 0.071,
            Self::Petroleum => 0.048,
            Self::Coal => 0.04,
            Self::Methane => 0.033,
            Self::Oxygen => 0.026,
            Self::Iron => 0.021,
            Self::Aluminum => 0.015,
            Self::Copper => 0.0097,
            Self::Lead => 0.0069,
            Self::Hydrogen => 0.0055,
            Self::Lithium => 0.0042,
            Self::Titanium => 0.0033,
            Self::Gold => 0.0022,
            Self::Uranium => 0.0014,
            Self::Diamonds => 0.0011,
            Self::Ice7 => 0.00083,
            Self::Deuterium => 0.000066,
            Self::Tungsten => 0.00048,
            Self::Neodymium => 0.00027,
            Self::Osmium => 0.00014,
            Self::Rhodium => 0.000069,
            Self::Plutonium => 0.000035,
            Self::Tritium => 0.000011,
            Self::Antimatter => 0.0000012,
        }
    }

    /// Currency earned per unit mined.
    pub fn unit_value(self) -> f64 {
        match self {
            Self::Water => 0.1,
            Self::Sulfur => 0.15,
            Self::Petroleum => 0.3,
            Self::Coal => 0.45,
            Self::Methane => 0.8,
            Self::Oxygen => 1.3,
            Self::Iron => 2.0,
            Self::Aluminum => 4.0,
            Self::Copper => 8.0,
            Self::Lead => 15.0,
            Self::Hydrogen => 25.0,
            Self::Lithium => 45.0,
            Self::Titanium => 70.0,
            Self::Gold => 100.0,
            Self::Uranium => 180.0,
            Self::Diamonds => 270.0,
            Self::Ice7 => 400.0,
            Self::Deuterium => 750.0,
            Self::Tungsten => 1_200.0,
            Self::Neodymium => 2_100.0,
            Self::Osmium => 4_500.0,
            Self::Rhodium => 18_000.0,
            Self::Plutonium => 54_000.0,
            Self::Tritium => 324_000.0,
            Self::Antimatter => 2_700_000.0,
        }
    }
}

/// Resources available when a planet name is not in the catalog.
pub const DEFAULT_RESOURCES: [ResourceKind; 4] = [
    ResourceKind::Water,
    ResourceKind::Oxygen,
    ResourceKind::Iron,
    ResourceKind::Aluminum,
];

/// Built-in planet → resource listing.
const BUILTIN_CATALOG: &[(&str, &[ResourceKind])] = {
    use ResourceKind::*;
    &[
        ("luna", &[Water, Iron, Aluminum, Copper, Gold]),
        ("earth", &[Water, Coal, Iron, Petroleum, Oxygen, Lead, Uranium, Diamonds]),
        ("sol", &[Antimatter]),
        ("mercury", &[Iron, Aluminum, Lead, Uranium, Gold, Tungsten]),
        ("venus", &[Coal, Methane, Iron, Sulfur, Uranium, Diamonds]),
        ("mars", &[Water, Iron, Aluminum, Lithium, Titanium]),
        ("jupiter", &[Hydrogen, Deuterium, Tritium, Antimatter]),
        ("saturn", &[Hydrogen, Deuterium, Tritium, Antimatter]),
        ("uranus", &[Hydrogen, Methane, Deuterium]),
        ("neptune", &[Hydrogen, Methane, Deuterium]),
        ("canaan", &[Antimatter]),
        (
            "muspelheim",
            &[Coal, Petroleum, Iron, Sulfur, Aluminum, Lithium, Uranium, Diamonds, Plutonium],
        ),
        ("diyu", &[Iron, Titanium, Lead, Sulfur]),
        ("eden", &[Water, Iron, Aluminum, Copper, Gold]),
        ("nysa", &[Water, Iron, Sulfur, Petroleum, Oxygen, Lead, Uranium, Diamonds]),
        ("ararat", &[Water, Methane, Iron, Lithium, Aluminum, Copper, Gold]),
        ("zerzura", &[Hydrogen, Deuterium, Tritium]),
        ("thule", &[Water, Deuterium, Ice7, Iron, Sulfur]),
        ("sinai", &[Antimatter]),
        ("hel", &[Coal, Iron, Copper, Sulfur, Tungsten, Antimatter]),
        ("meropis", &[Water, Ice7, Methane, Oxygen, Lithium, Gold]),
        ("babylon", &[Water, Iron, Copper, Titanium, Lead, Uranium, Diamonds]),
        ("gomorrah", &[Water, Aluminum, Titanium, Deuterium]),
        ("dorado", &[Uranium, Sulfur, Neodymium, Osmium]),
        ("mizraim", &[Antimatter]),
        ("agartha", &[Petroleum, Coal, Methane, Sulfur, Copper, Diamonds]),
        ("lalotai", &[Water, Oxygen, Ice7, Iron, Copper, Titanium, Diamonds]),
        (
            "irkalla",
            &[Water, Iron, Aluminum, Lead, Uranium, Tungsten, Osmium, Rhodium],
        ),
        ("gula", &[Hydrogen, Oxygen, Methane, Deuterium]),
        ("poliahu", &[Water, Ice7, Sulfur, Iron, Lead, Neodymium]),
        ("pohjola", &[Water, Copper, Deuterium]),
    ]
};

/// Planet-name → resources present there.
///
/// Membership is what matters; listing order is kept only for display.
#[derive(Resource, Debug, Clone)]
pub struct ResourceCatalog {
    planets: HashMap<String, Vec<ResourceKind>>,
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        let planets = BUILTIN_CATALOG
            .iter()
            .map(|(name, kinds)| ((*name).to_string(), kinds.to_vec()))
            .collect();
        Self { planets }
    }
}

impl ResourceCatalog {
    /// Resources present on `planet`, or [`DEFAULT_RESOURCES`] if unknown.
    pub fn resources_for(&self, planet: &str) -> &[ResourceKind] {
        self.planets
            .get(planet)
            .map(Vec::as_slice)
            .unwrap_or(&DEFAULT_RESOURCES)
    }

    /// Add or replace a planet's listing (used by configured bodies).
    pub fn insert(&mut self, planet: impl Into<String>, resources: Vec<ResourceKind>) {
        self.planets.insert(planet.into(), resources);
    }

    /// Comma-separated display string for the HUD.
    pub fn display_list(resources: &[ResourceKind]) -> String {
        resources
            .iter()
            .map(|r| r.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

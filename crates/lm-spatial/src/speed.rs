//! Car speed assumptions and OSM tag rules used when importing roads.
//!
//! Speeds are km/h.  An edge's speed is its explicit `maxspeed` tag when that
//! parses, otherwise the highway-class mapping in [`SpeedProfile`], otherwise
//! [`SpeedProfile::fallback`].

// ── SpeedProfile ──────────────────────────────────────────────────────────────

/// Assumed urban car speeds (km/h) per OSM `highway` class.
///
/// `*_link` classes inherit the speed of their parent class.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedProfile {
    pub residential: f32,
    pub tertiary:    f32,
    pub secondary:   f32,
    pub primary:     f32,
    /// Used for every drivable class without its own entry.
    pub fallback:    f32,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self {
            residential: 10.0,
            tertiary:    18.0,
            secondary:   25.0,
            primary:     35.0,
            fallback:    15.0,
        }
    }
}

impl SpeedProfile {
    /// Speed for a highway class, ignoring `maxspeed`.
    pub fn highway_speed_kmh(&self, highway: &str) -> f32 {
        match highway {
            "residential" | "living_street"  => self.residential,
            "tertiary"    | "tertiary_link"  => self.tertiary,
            "secondary"   | "secondary_link" => self.secondary,
            "primary"     | "primary_link"   => self.primary,
            _                                => self.fallback,
        }
    }

    /// Speed for an edge: a parsable positive `maxspeed` wins over the class
    /// mapping.
    pub fn edge_speed_kmh(&self, highway: &str, maxspeed: Option<&str>) -> f32 {
        maxspeed
            .and_then(parse_maxspeed_kmh)
            .unwrap_or_else(|| self.highway_speed_kmh(highway))
    }
}

// ── Unit helpers ──────────────────────────────────────────────────────────────

const MPH_TO_KMH: f32 = 1.609_344;

/// Parse an OSM `maxspeed` value into km/h.
///
/// Accepts bare numbers (`"30"`), an `mph` suffix (`"20 mph"`), the keywords
/// `walk` and `none`, and `;`-separated lists (first value wins).  Anything
/// else, including zero and negative values, yields `None`.
pub fn parse_maxspeed_kmh(raw: &str) -> Option<f32> {
    let first = raw.split(';').next()?.trim();
    match first {
        "walk" => return Some(5.0),
        "none" => return Some(150.0),
        _ => {}
    }

    let (number, factor) = match first.strip_suffix("mph") {
        Some(rest) => (rest.trim(), MPH_TO_KMH),
        None => (first.strip_suffix("km/h").unwrap_or(first).trim(), 1.0),
    };

    let value: f32 = number.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value * factor)
}

/// Free-flow travel time in milliseconds for `length_m` metres at `kmh`.
///
/// Non-positive speeds are treated as 1 km/h so no edge becomes free.
pub fn travel_ms(length_m: f32, kmh: f32) -> u32 {
    let mps = kmh.max(1.0) / 3.6;
    (length_m.max(0.0) / mps * 1_000.0).round() as u32
}

// ── Tag rules ─────────────────────────────────────────────────────────────────

/// Look up a tag value in a collected tag list.
pub fn tag<'a>(tags: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// `true` if a way with this `highway` class and tag list may be driven by
/// a private car.
pub fn is_drivable(highway: &str, tags: &[(&str, &str)]) -> bool {
    let class_ok = matches!(
        highway,
        "motorway" | "motorway_link"
            | "trunk" | "trunk_link"
            | "primary" | "primary_link"
            | "secondary" | "secondary_link"
            | "tertiary" | "tertiary_link"
            | "unclassified" | "residential" | "living_street"
            | "service" | "road"
    );
    if !class_ok {
        return false;
    }

    if highway == "service"
        && matches!(
            tag(tags, "service"),
            Some("parking_aisle" | "driveway" | "emergency_access" | "drive-through")
        )
    {
        return false;
    }

    if matches!(tag(tags, "access"), Some("private" | "no")) {
        return false;
    }
    !matches!(tag(tags, "motor_vehicle"), Some("no")) && !matches!(tag(tags, "motorcar"), Some("no"))
}

// ── Oneway ────────────────────────────────────────────────────────────────────

/// Which directions of a way carry car traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oneway {
    /// Two-way road.
    Both,
    /// Only in the order of the way's node references.
    Forward,
    /// Only against the order of the way's node references.
    Backward,
}

impl Oneway {
    /// Derive the direction rule from a way's tags.
    ///
    /// Motorways and roundabouts are one-way unless tagged otherwise.
    pub fn from_tags(highway: &str, tags: &[(&str, &str)]) -> Self {
        match tag(tags, "oneway") {
            Some("yes" | "true" | "1")  => Oneway::Forward,
            Some("-1" | "reverse")      => Oneway::Backward,
            Some("no" | "false" | "0")  => Oneway::Both,
            _ => {
                let implicit = matches!(highway, "motorway" | "motorway_link")
                    || tag(tags, "junction") == Some("roundabout");
                if implicit { Oneway::Forward } else { Oneway::Both }
            }
        }
    }

    pub fn forward(self) -> bool {
        matches!(self, Oneway::Both | Oneway::Forward)
    }

    pub fn backward(self) -> bool {
        matches!(self, Oneway::Both | Oneway::Backward)
    }
}

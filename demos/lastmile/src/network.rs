//! Synthetic Bengaluru neighbourhoods used when no OSM extracts are
//! configured.
//!
//! Each neighbourhood is an 8 × 8 street grid (~165 m blocks) anchored at
//! the neighbourhood's real coordinates.  Road classes follow a fixed
//! pattern so travel times vary the way they do on real data: one primary
//! main road, one secondary cross road, tertiary streets every other row,
//! residential lanes elsewhere, and one one-way lane.

use lm_core::{GeoPoint, NodeId};
use lm_spatial::speed::travel_ms;
use lm_spatial::{RoadNetwork, RoadNetworkBuilder, SpeedProfile, StaticProvider};

const ROWS:        usize = 8;
const COLS:        usize = 8;
const SPACING_DEG: f32   = 0.0015;

const MAIN_ROAD_ROW:  usize = 4;
const CROSS_ROAD_COL: usize = 3;
/// Eastbound only.
const ONE_WAY_ROW:    usize = 7;

/// Neighbourhoods served by [`synthetic_provider`], with their south-west
/// grid corner.
pub const PLACES: [(&str, f32, f32); 3] = [
    ("Indiranagar, Bengaluru, India", 12.9719, 77.6412),
    ("Koramangala, Bengaluru, India", 12.9352, 77.6245),
    ("HSR Layout, Bengaluru, India",  12.9116, 77.6389),
];

/// A provider serving every entry of [`PLACES`].
pub fn synthetic_provider(profile: SpeedProfile) -> StaticProvider {
    PLACES
        .iter()
        .fold(StaticProvider::new(), |provider, &(place, lat, lon)| {
            provider.with_place(place, move || build_grid(GeoPoint::new(lat, lon), &profile))
        })
}

/// Build one grid neighbourhood with its south-west corner at `origin`.
pub fn build_grid(origin: GeoPoint, profile: &SpeedProfile) -> RoadNetwork {
    let mut b = RoadNetworkBuilder::with_capacity(ROWS * COLS, ROWS * COLS * 4);

    let mut ids = [[NodeId::INVALID; COLS]; ROWS];
    for (r, row) in ids.iter_mut().enumerate() {
        for (c, id) in row.iter_mut().enumerate() {
            *id = b.add_node(GeoPoint::new(
                origin.lat + r as f32 * SPACING_DEG,
                origin.lon + c as f32 * SPACING_DEG,
            ));
        }
    }

    for r in 0..ROWS {
        for c in 0..COLS {
            if c + 1 < COLS {
                let kmh = profile.highway_speed_kmh(row_class(r));
                add_segment(&mut b, ids[r][c], ids[r][c + 1], kmh, r == ONE_WAY_ROW);
            }
            if r + 1 < ROWS {
                let kmh = profile.highway_speed_kmh(col_class(c));
                add_segment(&mut b, ids[r][c], ids[r + 1][c], kmh, false);
            }
        }
    }

    b.build()
}

fn add_segment(b: &mut RoadNetworkBuilder, from: NodeId, to: NodeId, kmh: f32, one_way: bool) {
    let len_m = b.node_pos(from).distance_m(b.node_pos(to));
    let ms = travel_ms(len_m, kmh);
    if one_way {
        b.add_directed_edge(from, to, len_m, ms);
    } else {
        b.add_road(from, to, len_m, ms);
    }
}

fn row_class(r: usize) -> &'static str {
    match r {
        MAIN_ROAD_ROW      => "primary",
        _ if r % 2 == 0    => "tertiary",
        _                  => "residential",
    }
}

fn col_class(c: usize) -> &'static str {
    if c == CROSS_ROAD_COL { "secondary" } else { "residential" }
}

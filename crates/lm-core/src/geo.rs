//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f32` (single-precision) latitude/longitude.  At the
//! equator this gives ~1 m precision, plenty for neighbourhood-scale delivery
//! routing, and it matches the `[f32; 2]` points stored in the R-tree.

/// A WGS-84 geographic coordinate stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Accuracy: ±0.5 % (f32 rounding); suitable for edge lengths between
    /// adjacent way vertices.
    pub fn distance_m(self, other: GeoPoint) -> f32 {
        const R: f32 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// `[lon, lat]` in `f64`, the axis order GeoJSON positions use.
    #[inline]
    pub fn lon_lat(self) -> [f64; 2] {
        [f64::from(self.lon), f64::from(self.lat)]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned lat/lon box enclosing a set of points.
///
/// Used by the presentation layer to fit a map viewport to a route.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn enclosing<I: IntoIterator<Item = GeoPoint>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox { min: first, max: first };
        for p in iter {
            bbox.min.lat = bbox.min.lat.min(p.lat);
            bbox.min.lon = bbox.min.lon.min(p.lon);
            bbox.max.lat = bbox.max.lat.max(p.lat);
            bbox.max.lon = bbox.max.lon.max(p.lon);
        }
        Some(bbox)
    }

    /// Midpoint of the box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min.lat + self.max.lat) * 0.5,
            (self.min.lon + self.max.lon) * 0.5,
        )
    }

    /// `[west, south, east, north]` in `f64`, the GeoJSON `bbox` member order.
    pub fn to_geojson_bbox(&self) -> Vec<f64> {
        vec![
            f64::from(self.min.lon),
            f64::from(self.min.lat),
            f64::from(self.max.lon),
            f64::from(self.max.lat),
        ]
    }
}

//! Unit tests for lm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{BoundingBox, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(12.971, 77.641);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(12.0, 77.0);
        let b = GeoPoint::new(13.0, 77.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn lon_lat_axis_order() {
        let p = GeoPoint::new(12.5, 77.25);
        assert_eq!(p.lon_lat(), [77.25, 12.5]);
    }

    #[test]
    fn bbox_encloses_all_points() {
        let pts = [
            GeoPoint::new(12.97, 77.64),
            GeoPoint::new(12.96, 77.65),
            GeoPoint::new(12.98, 77.63),
        ];
        let bbox = BoundingBox::enclosing(pts).unwrap();
        assert_eq!(bbox.min, GeoPoint::new(12.96, 77.63));
        assert_eq!(bbox.max, GeoPoint::new(12.98, 77.65));
        assert_eq!(
            bbox.to_geojson_bbox(),
            vec![
                f64::from(77.63f32),
                f64::from(12.96f32),
                f64::from(77.65f32),
                f64::from(12.98f32),
            ]
        );
    }

    #[test]
    fn bbox_empty_is_none() {
        assert!(BoundingBox::enclosing(Vec::<GeoPoint>::new()).is_none());
    }

    #[test]
    fn bbox_center() {
        let bbox = BoundingBox {
            min: GeoPoint::new(0.0, 0.0),
            max: GeoPoint::new(2.0, 4.0),
        };
        assert_eq!(bbox.center(), GeoPoint::new(1.0, 2.0));
    }
}

#[cfg(test)]
mod rng {
    use std::collections::HashSet;

    use crate::SampleRng;

    #[test]
    fn same_seed_same_sample() {
        let a = SampleRng::new(42).sample_distinct(1_000, 10);
        let b = SampleRng::new(42).sample_distinct(1_000, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn sample_is_distinct_and_in_range() {
        let s = SampleRng::new(7).sample_distinct(50, 20);
        assert_eq!(s.len(), 20);
        assert!(s.iter().all(|&i| i < 50));
        let unique: HashSet<_> = s.iter().collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn oversized_sample_is_clamped() {
        let s = SampleRng::new(1).sample_distinct(3, 10);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn children_diverge() {
        let mut root = SampleRng::new(9);
        let a = root.child(0).sample_distinct(10_000, 5);
        let b = root.child(1).sample_distinct(10_000, 5);
        assert_ne!(a, b);
    }
}

//! The fixed contents of the scene.
//!
//! Everything here is a compile-time constant. Distances and radii are in scene
//! units; rates are in radians per frame.

use super::body::{BodyInfo, Ring};

/// Longitude/latitude subdivisions for every sphere, and segment count for rings.
pub const SPHERE_SUBDIVISIONS: usize = 70;

/// No planet sits further from the sun than this.
pub const MAX_ORBITAL_DISTANCE: f32 = 1200.0;

pub const BACKDROP_TEXTURE: &str = "stars.jpg";

pub const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const LIGHT_INTENSITY: f32 = 3.0;
pub const LIGHT_RANGE: f32 = 1300.0;

pub const SUN: BodyInfo = BodyInfo {
    name: "Sun",
    radius: 40.0,
    texture: "planets/sun.jpg",
    orbital_distance: 0.0,
    spin_rate: 0.001,
    orbit_constant: 0.0,
    ring: None,
};

pub const PLANETS: [BodyInfo; 8] = [
    BodyInfo {
        name: "Mercury",
        radius: 6.0,
        texture: "planets/mercury.jpg",
        orbital_distance: 150.0,
        spin_rate: 0.007,
        orbit_constant: 0.008,
        ring: None,
    },
    BodyInfo {
        name: "Venus",
        radius: 10.0,
        texture: "planets/venus.jpg",
        orbital_distance: 300.0,
        spin_rate: 0.006,
        orbit_constant: 0.007,
        ring: None,
    },
    BodyInfo {
        name: "Earth",
        radius: 9.0,
        texture: "planets/earth.jpg",
        orbital_distance: 450.0,
        spin_rate: 0.003,
        orbit_constant: 0.006,
        ring: None,
    },
    BodyInfo {
        name: "Mars",
        radius: 7.0,
        texture: "planets/mars.jpg",
        orbital_distance: 600.0,
        spin_rate: 0.004,
        orbit_constant: 0.005,
        ring: None,
    },
    BodyInfo {
        name: "Jupiter",
        radius: 19.0,
        texture: "planets/jupyter.jpg",
        orbital_distance: 750.0,
        spin_rate: 0.003,
        orbit_constant: 0.004,
        ring: None,
    },
    BodyInfo {
        name: "Saturn",
        radius: 17.0,
        texture: "planets/saturn.jpg",
        orbital_distance: 900.0,
        spin_rate: 0.004,
        orbit_constant: 0.003,
        ring: Some(Ring {
            inner_radius: 20.0,
            outer_radius: 33.0,
            texture: "planets/saturn ring.png",
            tilt_fraction: 0.6,
        }),
    },
    BodyInfo {
        name: "Uranus",
        radius: 15.0,
        texture: "planets/uranus.jpg",
        orbital_distance: 1050.0,
        spin_rate: 0.003,
        orbit_constant: 0.002,
        ring: Some(Ring {
            inner_radius: 17.0,
            outer_radius: 27.0,
            texture: "planets/uranus ring.png",
            tilt_fraction: -0.8,
        }),
    },
    BodyInfo {
        name: "Neptune",
        radius: 14.0,
        texture: "planets/neptune.jpg",
        orbital_distance: 1200.0,
        spin_rate: 0.004,
        orbit_constant: 0.001,
        ring: None,
    },
];

/// Case-insensitive lookup over the sun and the planets.
pub fn find_by_name(name: &str) -> Option<&'static BodyInfo> {
    std::iter::once(&SUN)
        .chain(PLANETS.iter())
        .find(|info| info.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances_are_distinct_and_bounded() {
        for (i, a) in PLANETS.iter().enumerate() {
            assert!(a.radius > 0.0);
            assert!(a.orbital_distance > 0.0);
            assert!(a.orbital_distance <= MAX_ORBITAL_DISTANCE);
            for b in PLANETS.iter().skip(i + 1) {
                assert_ne!(a.orbital_distance, b.orbital_distance, "{} vs {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_rings_are_well_formed() {
        let ringed: Vec<_> = PLANETS.iter().filter(|p| p.has_ring()).map(|p| p.name).collect();
        assert_eq!(ringed, vec!["Saturn", "Uranus"]);

        for ring in PLANETS.iter().filter_map(|p| p.ring) {
            assert!(ring.inner_radius < ring.outer_radius);
        }
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find_by_name("sun"), Some(&SUN));
        assert_eq!(find_by_name("SATURN").map(|b| b.radius), Some(17.0));
        assert_eq!(find_by_name("Pluto"), None);
    }
}

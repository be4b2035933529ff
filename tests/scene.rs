use std::f32::consts::PI;

use approx::assert_relative_eq;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use solar_system::gui::OrbitCamera;
use solar_system::model::catalog::{MAX_ORBITAL_DISTANCE, PLANETS, SUN};
use solar_system::model::{orbit_increment, NodeKind, SolarSystem, MIN_ELAPSED_MS};

#[test]
fn test_full_scene_structure() {
    let system = SolarSystem::new();
    let graph = system.graph();
    let root = graph.root();

    let mut pivots = 0;
    let mut suns = 0;
    let mut lights = 0;
    for &child in graph.children(root) {
        match graph.get(child).kind {
            NodeKind::Pivot(_) => pivots += 1,
            NodeKind::Sun(_) => suns += 1,
            NodeKind::PointLight { .. } => lights += 1,
            other => panic!("Unexpected node under the root: {:?}", other),
        }
    }
    assert_eq!((pivots, suns, lights), (8, 1, 1));

    let sun = system.sun().unwrap();
    assert_eq!(system.get_body(sun).info, SUN);
    assert_eq!(system.planets().count(), 8);
}

#[test]
fn test_planets_match_catalog() {
    let system = SolarSystem::new();
    let graph = system.graph();

    let mut distances = vec![];
    for (body, expected) in system.planets().zip(PLANETS.iter()) {
        assert_eq!(body.info, *expected);

        let nodes = system.body_nodes(body.id);
        let pivot = nodes.pivot.unwrap();

        // Pivot sits at the origin, directly under the root
        assert_eq!(graph.get(pivot).parent(), Some(graph.root()));
        assert_eq!(graph.get(pivot).translation(), Vector3::zeros());

        // Mesh is offset by exactly the orbital distance
        assert_eq!(graph.get(nodes.mesh).parent(), Some(pivot));
        assert_eq!(
            graph.get(nodes.mesh).translation(),
            Vector3::new(expected.orbital_distance, 0.0, 0.0)
        );

        match (expected.ring, nodes.ring) {
            (None, None) => assert_eq!(graph.children(pivot), &[nodes.mesh]),
            (Some(ring), Some(ring_node)) => {
                assert_eq!(graph.children(pivot), &[nodes.mesh, ring_node]);
                assert_eq!(graph.get(ring_node).parent(), Some(pivot));
                assert_eq!(
                    graph.get(ring_node).translation(),
                    graph.get(nodes.mesh).translation()
                );
                assert_eq!(ring.tilt(), ring.tilt_fraction * PI);
                assert_relative_eq!(
                    graph.get(ring_node).rotation(),
                    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), ring.tilt_fraction * PI),
                    epsilon = 1e-6
                );
            }
            (expected, actual) => panic!(
                "{}: expected ring {:?}, found ring node {:?}",
                body.info.name, expected, actual
            ),
        }

        assert!(expected.orbital_distance <= MAX_ORBITAL_DISTANCE);
        distances.push(expected.orbital_distance);
    }

    let ringed: Vec<_> = system
        .planets()
        .filter(|b| system.body_nodes(b.id).ring.is_some())
        .map(|b| b.info.name)
        .collect();
    assert_eq!(ringed, vec!["Saturn", "Uranus"]);

    distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
    distances.dedup();
    assert_eq!(distances.len(), 8);
}

#[test]
fn test_frame_update_increments() {
    let mut system = SolarSystem::new();

    // Warm up, so we're not starting from zero
    for frame in 1..=10 {
        system.on_frame(frame as f64 * 16.0);
    }

    let before: Vec<_> = system
        .bodies()
        .map(|b| (b.id, system.spin_angle(b.id), system.orbit_angle(b.id)))
        .collect();

    let t = 176.0;
    system.on_frame(t);

    for (id, spin, orbit) in before {
        let info = system.get_body(id).info;
        assert_relative_eq!(system.spin_angle(id) - spin, info.spin_rate, epsilon = 1e-12);

        let expected_orbit = if Some(id) == system.sun() {
            0.0
        } else {
            info.orbit_constant / t + info.orbit_constant / 2.0
        };
        assert_relative_eq!(system.orbit_angle(id) - orbit, expected_orbit, epsilon = 1e-12);
    }
}

#[test]
fn test_first_frame_is_clamped() {
    let mut at_zero = SolarSystem::new();
    let mut at_min = SolarSystem::new();
    at_zero.on_frame(0.0);
    at_min.on_frame(MIN_ELAPSED_MS);

    for body in at_zero.planets() {
        let angle = at_zero.orbit_angle(body.id);
        assert!(angle.is_finite());
        assert_eq!(angle, at_min.orbit_angle(body.id));
        assert_eq!(angle, orbit_increment(body.info.orbit_constant, MIN_ELAPSED_MS));
    }
}

#[test]
fn test_orbits_stay_circular() {
    let mut system = SolarSystem::new();
    for frame in 1..=1000 {
        system.on_frame(frame as f64 * 16.0);
    }

    let graph = system.graph();
    for body in system.planets() {
        let nodes = system.body_nodes(body.id);
        let position = graph.world_position(nodes.mesh);
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(
            position.coords.norm(),
            body.info.orbital_distance,
            max_relative = 1e-5
        );
        if let Some(ring) = nodes.ring {
            assert_relative_eq!(graph.world_position(ring), position, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_resize_keeps_camera_in_place() {
    let mut camera = OrbitCamera::new(
        Point3::new(-90.0, 140.0, 140.0),
        Point3::origin(),
        70f32.to_radians(),
        0.1,
        2000.0,
    );
    let target = camera.target();
    let distance = camera.distance();

    camera.resize(1280, 720);

    assert_eq!(camera.aspect(), 1280.0 / 720.0);
    assert_eq!(camera.target(), target);
    assert_eq!(camera.distance(), distance);
}

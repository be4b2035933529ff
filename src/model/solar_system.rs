use std::collections::BTreeMap;
use std::f64::consts::TAU;

use nalgebra::{UnitQuaternion, Vector3};
use tracing::{debug, info};

use super::body::{Body, BodyID, BodyInfo};
use super::catalog;
use super::scene_graph::{NodeID, NodeKind, SceneGraph};

/// Elapsed times below this are treated as this, so the first frame never
/// divides by zero.
pub const MIN_ELAPSED_MS: f64 = 1.0;

/// Angle a pivot turns through on a frame drawn `elapsed_ms` after startup.
///
/// Decays hyperbolically: early frames orbit fast, and the rate settles towards
/// `orbit_constant / 2` as time goes on.
pub fn orbit_increment(orbit_constant: f64, elapsed_ms: f64) -> f64 {
    let t = elapsed_ms.max(MIN_ELAPSED_MS);
    orbit_constant / t + orbit_constant / 2.0
}

/// Scene nodes owned by one body. The sun has no pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyNodes {
    pub pivot: Option<NodeID>,
    pub mesh: NodeID,
    pub ring: Option<NodeID>,
}

#[derive(Debug, Clone)]
struct BodyState {
    body: Body,
    nodes: BodyNodes,
    // Accumulated angles, in radians
    spin: f64,
    orbit: f64,
}

/// Owns the scene graph and every body in it. There's one of these per process,
/// passed explicitly to whoever needs it.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    graph: SceneGraph,
    bodies: BTreeMap<BodyID, BodyState>,
    next_body_id: usize,
    sun: Option<BodyID>,
    light: Option<NodeID>,
}

impl SolarSystem {
    /// Just the root node; no sun, light or planets.
    pub fn empty() -> Self {
        SolarSystem {
            graph: SceneGraph::new(),
            bodies: BTreeMap::new(),
            next_body_id: 0,
            sun: None,
            light: None,
        }
    }

    /// The full fixed scene: sun, light, then the planets in catalog order.
    pub fn new() -> Self {
        let mut system = Self::empty();
        system.add_sun(catalog::SUN);
        system.add_point_light();
        for planet in catalog::PLANETS.iter() {
            system.build_body(*planet);
        }

        info!(
            bodies = system.bodies.len(),
            nodes = system.graph.len(),
            "built solar system"
        );
        system
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn sun(&self) -> Option<BodyID> {
        self.sun
    }

    pub fn light(&self) -> Option<NodeID> {
        self.light
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.values().map(|x| &x.body)
    }

    /// Everything except the sun, in the order it was built.
    pub fn planets(&self) -> impl Iterator<Item = &Body> + '_ {
        let sun = self.sun;
        self.bodies().filter(move |b| Some(b.id) != sun)
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[&id].body
    }

    pub fn body_nodes(&self, id: BodyID) -> BodyNodes {
        self.bodies[&id].nodes
    }

    pub fn spin_angle(&self, id: BodyID) -> f64 {
        self.bodies[&id].spin
    }

    pub fn orbit_angle(&self, id: BodyID) -> f64 {
        self.bodies[&id].orbit
    }

    /// Puts the star at the origin, directly under the root.
    pub fn add_sun(&mut self, info: BodyInfo) -> NodeID {
        debug_assert!(info.radius > 0.0);
        let id = self.next_id();
        let mesh = self.graph.add_node(self.graph.root(), NodeKind::Sun(id));
        self.insert_body(
            Body { id, info },
            BodyNodes {
                pivot: None,
                mesh,
                ring: None,
            },
        );
        self.sun = Some(id);
        mesh
    }

    pub fn add_point_light(&mut self) -> NodeID {
        let light = self.graph.add_node(
            self.graph.root(),
            NodeKind::PointLight {
                color: catalog::LIGHT_COLOR,
                intensity: catalog::LIGHT_INTENSITY,
                range: catalog::LIGHT_RANGE,
            },
        );
        self.light = Some(light);
        light
    }

    /// Builds a planet: a pivot under the root, with the body mesh (and ring, if
    /// any) offset from it by the orbital distance. Returns `(mesh, pivot)`.
    pub fn build_body(&mut self, info: BodyInfo) -> (NodeID, NodeID) {
        debug_assert!(info.radius > 0.0);
        debug_assert!(info.orbital_distance >= 0.0);

        let id = self.next_id();
        let offset = Vector3::x() * info.orbital_distance;

        let pivot = self.graph.add_node(self.graph.root(), NodeKind::Pivot(id));
        let mesh = self.graph.add_node(pivot, NodeKind::BodyMesh(id));
        self.graph.set_translation(mesh, offset);

        let ring = info.ring.map(|ring| {
            debug_assert!(ring.inner_radius < ring.outer_radius);
            let node = self.graph.add_node(pivot, NodeKind::RingMesh(id));
            self.graph.set_translation(node, offset);
            self.graph.set_rotation(
                node,
                UnitQuaternion::from_axis_angle(&Vector3::x_axis(), ring.tilt()),
            );
            node
        });

        debug!(
            body = info.name,
            distance = info.orbital_distance,
            ringed = ring.is_some(),
            "built body"
        );

        self.insert_body(
            Body { id, info },
            BodyNodes {
                pivot: Some(pivot),
                mesh,
                ring,
            },
        );
        (mesh, pivot)
    }

    /// Advances every body by one frame: a fixed spin, and an orbit increment
    /// that depends on how long we've been running.
    pub fn on_frame(&mut self, elapsed_ms: f64) {
        for state in self.bodies.values_mut() {
            state.spin += state.body.info.spin_rate;
            if state.nodes.pivot.is_some() {
                state.orbit += orbit_increment(state.body.info.orbit_constant, elapsed_ms);
            }
        }

        let ids: Vec<BodyID> = self.bodies.keys().copied().collect();
        for id in ids {
            self.apply_rotations(id);
        }
    }

    fn apply_rotations(&mut self, id: BodyID) {
        fn about_y(angle: f64) -> UnitQuaternion<f32> {
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle.rem_euclid(TAU) as f32)
        }

        let state = &self.bodies[&id];
        let (nodes, spin, orbit) = (state.nodes, state.spin, state.orbit);

        self.graph.set_rotation(nodes.mesh, about_y(spin));
        if let Some(pivot) = nodes.pivot {
            self.graph.set_rotation(pivot, about_y(orbit));
        }
    }

    fn next_id(&mut self) -> BodyID {
        let id = BodyID(self.next_body_id);
        self.next_body_id += 1;
        id
    }

    fn insert_body(&mut self, body: Body, nodes: BodyNodes) {
        let state = BodyState {
            body,
            nodes,
            spin: 0.0,
            orbit: 0.0,
        };
        self.bodies.insert(state.body.id, state);
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use kiss3d::camera::Camera;
use kiss3d::light::Light;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point3, Translation3, Vector3};
use tracing::{debug, info};

use super::camera::OrbitCamera;
use crate::assets::{LoadedTexture, TextureLoader};
use crate::math::geometry::{self, MeshData};
use crate::model::catalog::{BACKDROP_TEXTURE, SPHERE_SUBDIVISIONS};
use crate::model::{NodeID, NodeKind, SolarSystem};

const CAMERA_FOVY_DEGREES: f32 = 70.0;
const CAMERA_ZNEAR: f32 = 0.1;
const CAMERA_ZFAR: f32 = 2000.0;
const CAMERA_START: (f32, f32, f32) = (-90.0, 140.0, 140.0);

// Has to fit inside the far clipping plane, since it's centered on the camera
const BACKDROP_RADIUS: f32 = 1900.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Node(NodeID),
    Backdrop,
}

pub struct View {
    system: SolarSystem,
    scene_nodes: HashMap<NodeID, SceneNode>,
    backdrop: SceneNode,
    camera: OrbitCamera,
    textures: TextureLoader<TextureTarget>,
}

impl View {
    pub fn new(system: SolarSystem, window: &mut Window, assets: &Path) -> Self {
        let mut camera = OrbitCamera::new(
            Point3::new(CAMERA_START.0, CAMERA_START.1, CAMERA_START.2),
            Point3::origin(),
            CAMERA_FOVY_DEGREES.to_radians(),
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        );
        camera.resize(window.width(), window.height());

        window.set_background_color(0.0, 0.0, 0.0);

        let mut textures = TextureLoader::new(assets);
        let scene_nodes = Self::create_scene_nodes(&system, window, &mut textures);

        let mut backdrop = window.add_mesh(
            to_kiss3d_mesh(Self::backdrop_mesh()),
            Vector3::from_element(1.0),
        );
        backdrop.enable_backface_culling(false);
        textures.request(TextureTarget::Backdrop, BACKDROP_TEXTURE);

        info!(
            nodes = scene_nodes.len(),
            textures = textures.pending(),
            assets = %assets.display(),
            "scene ready"
        );

        let mut view = View {
            system,
            scene_nodes,
            backdrop,
            camera,
            textures,
        };
        view.update_scene_objects();
        view
    }

    // Mirrors every model node into kiss3d, parents first
    fn create_scene_nodes(
        system: &SolarSystem,
        window: &mut Window,
        textures: &mut TextureLoader<TextureTarget>,
    ) -> HashMap<NodeID, SceneNode> {
        let graph = system.graph();
        let mut scene_nodes = HashMap::new();
        scene_nodes.insert(graph.root(), window.scene_mut().clone());

        for (id, node) in graph.nodes() {
            let mut parent = match node.parent() {
                Some(parent) => scene_nodes[&parent].clone(),
                None => continue, // root
            };

            let scene_node = match node.kind {
                NodeKind::Root => continue,
                NodeKind::Sun(body_id) => {
                    let info = system.get_body(body_id).info;
                    // The light sits inside the sun, so turn its normals inwards to
                    // have it lit from "the front". It looks emissive that way.
                    let mut mesh = geometry::uv_sphere(info.radius, SPHERE_SUBDIVISIONS);
                    mesh.flip_normals();
                    textures.request(TextureTarget::Node(id), info.texture);
                    parent.add_mesh(to_kiss3d_mesh(mesh), Vector3::from_element(1.0))
                }
                NodeKind::PointLight {
                    intensity, range, ..
                } => {
                    let position = graph.world_position(id);
                    debug!(?position, intensity, range, "placing light");
                    window.set_light(Light::Absolute(position));
                    parent.add_group()
                }
                NodeKind::Pivot(_) => parent.add_group(),
                NodeKind::BodyMesh(body_id) => {
                    let info = system.get_body(body_id).info;
                    let mesh = geometry::uv_sphere(info.radius, SPHERE_SUBDIVISIONS);
                    textures.request(TextureTarget::Node(id), info.texture);
                    parent.add_mesh(to_kiss3d_mesh(mesh), Vector3::from_element(1.0))
                }
                NodeKind::RingMesh(body_id) => {
                    let ring = match system.get_body(body_id).info.ring {
                        Some(ring) => ring,
                        None => continue,
                    };
                    let mesh =
                        geometry::ring(ring.inner_radius, ring.outer_radius, SPHERE_SUBDIVISIONS);
                    textures.request(TextureTarget::Node(id), ring.texture);

                    let mut ring_node =
                        parent.add_mesh(to_kiss3d_mesh(mesh), Vector3::from_element(1.0));
                    // Visible from both sides
                    ring_node.enable_backface_culling(false);
                    ring_node
                }
            };
            scene_nodes.insert(id, scene_node);
        }

        scene_nodes
    }

    fn backdrop_mesh() -> MeshData {
        let mut mesh = geometry::uv_sphere(BACKDROP_RADIUS, SPHERE_SUBDIVISIONS);
        mesh.flip_normals();
        mesh
    }

    /// One frame's worth of work, before kiss3d draws.
    pub fn step(&mut self, elapsed_ms: f64) {
        self.apply_loaded_textures();
        self.system.on_frame(elapsed_ms);
        self.update_scene_objects();
        self.camera.sync();

        // The backdrop stays centered on the eye, so it always looks infinitely far
        let eye = self.camera.eye();
        self.backdrop
            .set_local_translation(Translation3::from(eye.coords));
    }

    fn apply_loaded_textures(&mut self) {
        for texture in self.textures.drain() {
            let node = match texture.target {
                TextureTarget::Node(id) => self.scene_nodes.get_mut(&id),
                TextureTarget::Backdrop => Some(&mut self.backdrop),
            };
            if let Some(node) = node {
                apply_texture(node, &texture);
            }
        }
    }

    fn update_scene_objects(&mut self) {
        let graph = self.system.graph();
        for (id, node) in graph.nodes() {
            if node.kind == NodeKind::Root {
                continue;
            }
            if let Some(scene_node) = self.scene_nodes.get_mut(&id) {
                scene_node.set_local_transformation(node.local_transform());
            }
        }
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }
}

fn apply_texture(node: &mut SceneNode, texture: &LoadedTexture<TextureTarget>) {
    node.set_texture_from_memory(&texture.bytes, &texture.name());
}

fn to_kiss3d_mesh(mesh: MeshData) -> Rc<RefCell<Mesh>> {
    let MeshData {
        coords,
        normals,
        uvs,
        faces,
    } = mesh;
    Rc::new(RefCell::new(Mesh::new(
        coords,
        faces,
        Some(normals),
        Some(uvs),
        false,
    )))
}

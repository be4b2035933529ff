use std::path::Path;

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::model::SolarSystem;

mod camera;
mod controller;
mod view;

pub use camera::OrbitCamera;

pub struct Simulation {
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(system: SolarSystem, window: &mut Window, assets: &Path) -> Self {
        Self {
            view: View::new(system, window, assets),
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.controller.process_event(event);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    // kiss3d calls this once per frame, then redraws the whole scene
    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.view.step(self.controller.elapsed_millis());
        self.controller.increment_frame_counter();
    }
}

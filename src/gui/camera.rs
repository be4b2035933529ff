use std::f32::consts::{PI, TAU};

use kiss3d::camera::Camera;
use kiss3d::event::{Action, MouseButton, TouchAction, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

// This camera plays the part of an orbit controller. Dragging with the left
// mouse button (or one finger) swings the camera around its target, dragging
// with the right button slides the target across the screen, and scrolling
// dollies in and out. The up direction is always +y.
//
// Input only changes the pending spherical coordinates. Nothing moves on screen
// until `sync` commits them, which the frame loop does once per frame.
pub struct OrbitCamera {
    // -- committed, used for rendering --
    eye: Point3<f32>,
    view: Isometry3<f32>,
    // -- pending position --
    target: Point3<f32>,
    theta: f32,  // azimuthal angle about +y, measured from +z
    phi: f32,    // polar angle, measured from +y
    radius: f32, // distance from target
    // -- perspective --
    width: u32,
    height: u32,
    aspect: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    projection: Perspective3<f32>,
    // -- input --
    last_cursor_pos: Vector2<f32>,
    last_touch: Option<(u64, Vector2<f32>)>,
    // -- knobs to fiddle with --
    rotate_step: f32,
    pan_step: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
}

impl OrbitCamera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>, fovy: f32, znear: f32, zfar: f32) -> Self {
        let (width, height) = (800, 600);
        let aspect = width as f32 / height as f32;

        let mut camera = OrbitCamera {
            eye,
            view: Isometry3::identity(),
            target,
            theta: 0.0,
            phi: PI / 2.0,
            radius: 1.0,
            width,
            height,
            aspect,
            fovy,
            znear,
            zfar,
            projection: Perspective3::new(aspect, fovy, znear, zfar),
            last_cursor_pos: Vector2::zeros(),
            last_touch: None,
            rotate_step: 0.005,
            pan_step: 0.001,
            scroll_ratio: 1.1,
            phi_limit: 0.001,
            radius_limits: (50.0, 1600.0),
        };
        camera.look_from(eye);
        camera.sync();
        camera
    }

    /// Moves the pending position so the camera sits at `eye`, still facing the
    /// target. Takes effect on the next `sync`.
    pub fn look_from(&mut self, eye: Point3<f32>) {
        let offset = eye - self.target;
        self.radius = offset.norm();
        self.theta = offset.x.atan2(offset.z);
        self.phi = if self.radius > 0.0 {
            (offset.y / self.radius).max(-1.0).min(1.0).acos()
        } else {
            PI / 2.0
        };
    }

    /// Commits pending input. Must be called after anything changes the
    /// position or target, and before rendering.
    pub fn sync(&mut self) {
        self.eye = self.pending_eye();
        self.view = Isometry3::look_at_rh(&self.eye, &self.target, &Vector3::y());
    }

    /// Matches the projection to a new viewport. Zero-sized viewports (e.g. a
    /// minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.aspect = width as f32 / height as f32;
        self.projection = Perspective3::new(self.aspect, self.fovy, self.znear, self.zfar);
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.theta = (self.theta + dtheta) % TAU;
        self.phi = nalgebra::clamp(self.phi + dphi, self.phi_limit, PI - self.phi_limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }

    /// Slides the target (and the camera with it) by a screen-space offset, in
    /// pixels. Faster the further out we are.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.pending_eye()).normalize();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward);

        let scale = self.radius * self.pan_step;
        self.target += (up * dy - right * dx) * scale;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    fn pending_eye(&self) -> Point3<f32> {
        self.target
            + self.radius
                * Vector3::new(
                    self.phi.sin() * self.theta.sin(),
                    self.phi.cos(),
                    self.phi.sin() * self.theta.cos(),
                )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view.to_homogeneous()
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);
                let dpos = curr_pos - self.last_cursor_pos;

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Rotate the opposite direction as the mouse moves (drag right == camera glides
                    // left)
                    self.rotate(-dpos.x * self.rotate_step, -dpos.y * self.rotate_step);
                } else if canvas.get_mouse_button(MouseButton::Button2) == Action::Press {
                    self.pan(dpos.x, dpos.y);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Touch(id, x, y, action, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);
                match action {
                    TouchAction::Start => self.last_touch = Some((id, curr_pos)),
                    TouchAction::Move => {
                        // Only the finger that started the drag steers
                        if let Some((touch_id, last_pos)) = self.last_touch {
                            if touch_id == id {
                                let dpos = curr_pos - last_pos;
                                self.rotate(-dpos.x * self.rotate_step, -dpos.y * self.rotate_step);
                                self.last_touch = Some((id, curr_pos));
                            }
                        }
                    }
                    TouchAction::End | TouchAction::Cancel => self.last_touch = None,
                }
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.scroll_ratio);
                } else if off > 0.0 {
                    self.zoom(self.scroll_ratio.recip())
                }
            }
            WindowEvent::FramebufferSize(w, h) => self.resize(w, h),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        self.view
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.view.inverse().to_homogeneous() * self.projection.inverse()
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

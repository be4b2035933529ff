#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

/// A flat annulus around a body, e.g. Saturn's rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: &'static str,
    /// Tilt about the orbit axis, as a fraction of pi.
    pub tilt_fraction: f32,
}

impl Ring {
    pub fn tilt(&self) -> f32 {
        self.tilt_fraction * std::f32::consts::PI
    }
}

// All the immutable info about a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyInfo {
    pub name: &'static str,
    pub radius: f32,
    pub texture: &'static str,
    pub orbital_distance: f32,
    /// Rotation about the body's own axis, in radians per frame.
    pub spin_rate: f64,
    /// Scales the orbit increment; see `orbit_increment`.
    pub orbit_constant: f64,
    pub ring: Option<Ring>,
}

impl BodyInfo {
    pub fn has_ring(&self) -> bool {
        self.ring.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
}

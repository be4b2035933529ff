pub mod assets;
pub mod gui;
pub mod logging;
pub mod math;
pub mod model;

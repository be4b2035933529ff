use std::path::PathBuf;

use clap::Parser;
use kiss3d::window::Window;
use tracing::{info, warn};

use solar_system::gui::Simulation;
use solar_system::logging::init_logging;
use solar_system::model::SolarSystem;

#[derive(Debug, Parser)]
#[command(about = "A sun and eight planets, orbiting forever")]
struct Args {
    /// Directory holding `stars.jpg` and the `planets/` textures
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    /// Cap on frames per second; 0 means uncapped
    #[arg(long, default_value_t = 60)]
    fps_limit: u64,
}

fn main() {
    let args = Args::parse();
    init_logging();

    if !args.assets.is_dir() {
        warn!(
            assets = %args.assets.display(),
            "asset directory not found, bodies will render untextured"
        );
    }

    let mut window = Window::new("Solar System");
    window.set_framerate_limit(match args.fps_limit {
        0 => None,
        n => Some(n),
    });

    let simulation = Simulation::new(SolarSystem::new(), &mut window, &args.assets);
    info!("entering render loop");
    window.render_loop(simulation);
}

use std::f64::consts::TAU;

use clap::Parser;
use solar_system::model::catalog::{find_by_name, PLANETS, SUN};
use solar_system::model::BodyInfo;

#[derive(Debug, Parser)]
#[command(about = "Prints the fixed parameters of a body")]
struct Args {
    /// Body to describe, e.g. "saturn"; omit to list every body
    name: Option<String>,
}

fn main() {
    let args = Args::parse();

    let name = match args.name {
        Some(name) => name,
        None => {
            for body in std::iter::once(&SUN).chain(PLANETS.iter()) {
                println!("{}", body.name);
            }
            return;
        }
    };

    match find_by_name(&name) {
        Some(body) => describe(body),
        None => {
            eprintln!("No body named {:?}", name);
            std::process::exit(1);
        }
    }
}

fn describe(body: &BodyInfo) {
    println!("Characteristics of {}", body.name);
    println!("- Radius: {}", body.radius);
    println!("- Texture: {}", body.texture);
    println!("- Orbital distance: {}", body.orbital_distance);
    println!("- Spin: {} rad/frame", body.spin_rate);
    println!("- Frames per rotation: {:.0}", TAU / body.spin_rate);
    if body.orbit_constant > 0.0 {
        // The orbit increment settles at half the constant
        let settled = body.orbit_constant / 2.0;
        println!("- Orbit constant: {}", body.orbit_constant);
        println!("- Settled orbit rate: {} rad/frame", settled);
        println!("- Frames per orbit, once settled: {:.0}", TAU / settled);
    }
    if let Some(ring) = body.ring {
        println!("- Ring: {} to {}", ring.inner_radius, ring.outer_radius);
        println!("- Ring texture: {}", ring.texture);
        println!("- Ring tilt: {:.1} degrees", ring.tilt().to_degrees());
    }
}

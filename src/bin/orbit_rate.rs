use clap::Parser;
use plotters::prelude::*;
use solar_system::model::orbit_increment;

#[derive(Debug, Parser)]
#[command(about = "Plots how fast a pivot turns per frame as time goes on")]
struct Args {
    /// Orbit constant of the body, e.g. 0.008 for Mercury
    #[arg(long, default_value_t = 0.008)]
    constant: f64,
    /// Last elapsed time to plot, in milliseconds
    #[arg(long, default_value_t = 200.0)]
    until: f64,
    #[arg(long, default_value = "plots/orbit-rate.png")]
    output: String,
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if let Some(dir) = std::path::Path::new(&args.output).parent() {
        std::fs::create_dir_all(dir)?;
    }

    draw_plot(&args.output, |t| orbit_increment(args.constant, t), args.until, 400)?;

    println!(
        "Wrote {}; rate settles at {} rad/frame",
        args.output,
        args.constant / 2.0
    );
    Ok(())
}

fn draw_plot(
    name: &str,
    func: impl Fn(f64) -> f64,
    until: f64,
    n_points: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let points: Vec<(f64, f64)> = (1..=n_points)
        .map(|i| until * i as f64 / n_points as f64)
        .map(|t| (t, func(t)))
        .collect();
    let y_max = points.iter().map(|p| p.1).fold(0.0, f64::max);

    let root = BitMapBackend::new(name, (640, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..until, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("elapsed (ms)")
        .y_desc("orbit increment (rad)")
        .draw()?;
    chart.draw_series(LineSeries::new(points, &RED))?;

    root.present()?;
    Ok(())
}

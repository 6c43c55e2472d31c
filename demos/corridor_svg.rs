use plotters::prelude::*;
use rand::Rng;
use sfc_decomp::{BoundingBox, Decomposition};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = vec![[5.0, 5.0], [30.0, 20.0], [45.0, 60.0], [80.0, 70.0], [95.0, 95.0]];

    run_example("corridor_polyline.svg", &path, |decomp| {
        decomp.dilate(&path, 0.0, false);
    })?;

    run_example("corridor_tightened.svg", &path, |decomp| {
        decomp.dilate(&path, 0.0, false);
        if let Err(e) = decomp.tighten_corridor(0.5) {
            eprintln!("Could not tighten: {}", e);
        }
    })?;

    run_example("corridor_iterative.svg", &path, |decomp| {
        decomp.dilate_iter(&path, sfc_decomp::DEFAULT_ITERATIONS, 5.0, 0.0);
    })?;

    Ok(())
}

fn run_example<F>(filename: &str, path: &[[f64; 2]], run: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(&mut Decomposition<2>),
{
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..100.0, 0.0..100.0)?;

    let mut decomp: Decomposition<2> = Decomposition::with_global_bbox(BoundingBox::new([0.0, 0.0], [100.0, 100.0]))?;
    decomp.set_local_bbox([8.0, 8.0]);

    // Random obstacles, keeping the waypoints themselves free.
    let mut rng = rand::thread_rng();
    let mut obstacles = Vec::with_capacity(1500);
    while obstacles.len() < 1500 {
        let pt = [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)];
        let free = path.iter().all(|p: &[f64; 2]| (p[0] - pt[0]).hypot(p[1] - pt[1]) > 2.0);
        if free {
            obstacles.push(pt);
        }
    }
    decomp.set_obstacles(obstacles.clone());

    run(&mut decomp);

    // Draw bounding box
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)],
        BLACK.stroke_width(2),
    )))?;

    // Draw corridor
    for poly in decomp.get_polyhedrons() {
        let mut corners: Vec<(f64, f64)> = poly.vertices().iter().map(|v| (v[0], v[1])).collect();
        if corners.len() < 3 {
            continue;
        }
        chart.draw_series(std::iter::once(Polygon::new(corners.clone(), BLUE.mix(0.1).filled())))?;
        corners.push(corners[0]);
        chart.draw_series(std::iter::once(PathElement::new(corners, BLUE.mix(0.6))))?;
    }

    // Draw ellipsoids as sampled outlines
    for e in decomp.get_ellipsoids() {
        let c = e.c();
        let d = e.d();
        let outline: Vec<(f64, f64)> = (0..=64)
            .map(|k| {
                let t = k as f64 / 64.0 * std::f64::consts::TAU;
                let (u, v) = (t.cos(), t.sin());
                (c[(0, 0)] * u + c[(0, 1)] * v + d[0], c[(1, 0)] * u + c[(1, 1)] * v + d[1])
            })
            .collect();
        chart.draw_series(std::iter::once(PathElement::new(outline, GREEN.mix(0.8))))?;
    }

    // Draw path and obstacles
    let waypoints: Vec<(f64, f64)> = decomp.get_path().iter().map(|p| (p[0], p[1])).collect();
    chart.draw_series(std::iter::once(PathElement::new(waypoints.clone(), BLACK.stroke_width(2))))?;
    chart.draw_series(waypoints.iter().map(|&p| Circle::new(p, 4, BLACK.filled())))?;
    chart.draw_series(obstacles.iter().map(|p| Circle::new((p[0], p[1]), 2, RED.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}

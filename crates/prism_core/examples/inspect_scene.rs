//! Example: Load and inspect a scene description file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/spheres.json

use std::env;

use prism_core::{load_scene, Shape};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/spheres.json");
        println!("  cargo run --example inspect_scene -- scenes/mirrors.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            let camera = scene.camera();
            println!("\n=== View: {:.2} x {:.2} ===", camera.width, camera.height);

            println!("\n--- Surfaces ({}) ---", scene.surfaces().len());
            for (i, surface) in scene.surfaces().iter().enumerate() {
                let p = surface.position;
                match surface.shape {
                    Shape::Sphere { radius } => println!(
                        "  [{}] sphere at ({:.2}, {:.2}, {:.2}) radius {:.2}",
                        i, p.x, p.y, p.z, radius
                    ),
                    Shape::Plane { normal } => println!(
                        "  [{}] plane through ({:.2}, {:.2}, {:.2}) normal ({:.2}, {:.2}, {:.2})",
                        i, p.x, p.y, p.z, normal.x, normal.y, normal.z
                    ),
                }
                let m = &surface.material;
                println!(
                    "       reflectivity {:.2}, refractivity {:.2}, ior {:.2}",
                    m.reflectivity, m.refractivity, m.index_of_refraction
                );
            }

            println!("\n--- Lights ({}) ---", scene.lights().len());
            for (i, light) in scene.lights().iter().enumerate() {
                let p = light.position;
                let kind = if light.is_spotlight() { "spot" } else { "point" };
                println!(
                    "  [{}] {} light at ({:.2}, {:.2}, {:.2}), radial ({}, {}, {})",
                    i, kind, p.x, p.y, p.z, light.radial_a0, light.radial_a1, light.radial_a2
                );
                if light.is_spotlight() {
                    println!(
                        "       cone {:.1} deg, falloff exponent {}",
                        light.theta, light.angular_a0
                    );
                }
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}

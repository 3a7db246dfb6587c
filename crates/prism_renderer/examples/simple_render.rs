//! Simple ray tracer example.
//!
//! Builds a small scene in code and saves it as a plain-text PPM.
//!
//! Run with: cargo run --release --example simple_render -- [output.ppm]

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use prism_core::{
    write_image, Camera, ImageFormat, Light, Material, Scene, SceneBuilder, Surface,
};
use prism_renderer::{render, Color, DVec3, RenderConfig};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let output = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output.ppm"));

    println!("Prism - Simple Example");
    println!("======================");

    let scene = build_scene();
    println!(
        "Scene: {} surfaces, {} lights",
        scene.surfaces().len(),
        scene.lights().len()
    );

    let start = Instant::now();
    let image = render(&scene, 640, 480, &RenderConfig::default());
    println!("Rendered in {:?}", start.elapsed());

    let format = ImageFormat::from_path(&output);
    if let Err(e) = write_image(&image, &output, format) {
        eprintln!("Error saving image: {}", e);
        std::process::exit(1);
    }
    println!("Saved to {}", output.display());
}

fn build_scene() -> Scene {
    let floor = Material::diffuse(Color::new(0.5, 0.5, 0.5)).with_reflectivity(0.3);
    let red = Material::diffuse(Color::new(0.9, 0.1, 0.1)).with_specular(Color::splat(0.8));
    let mirror = Material::diffuse(Color::splat(0.1))
        .with_specular(Color::ONE)
        .with_reflectivity(0.8);
    let glass = Material::diffuse(Color::splat(0.05))
        .with_specular(Color::ONE)
        .with_refractivity(0.9)
        .with_ior(1.5);

    SceneBuilder::new()
        .with_camera(Camera::new(1.6, 1.2))
        .with_surface(Surface::plane(DVec3::new(0.0, -1.0, 0.0), DVec3::Y).with_material(floor))
        .with_surface(Surface::sphere(DVec3::new(-1.2, 0.0, 6.0), 1.0).with_material(red))
        .with_surface(Surface::sphere(DVec3::new(1.2, 0.0, 7.0), 1.0).with_material(mirror))
        .with_surface(Surface::sphere(DVec3::new(0.0, -0.4, 4.5), 0.6).with_material(glass))
        .with_light(
            Light::point(DVec3::new(3.0, 5.0, 1.0), Color::splat(1.2)).with_radial(1.0, 0.02, 0.0),
        )
        .with_light(
            Light::point(DVec3::new(-2.0, 4.0, 4.0), Color::new(0.6, 0.6, 1.0))
                .with_spot(DVec3::new(0.5, -1.0, 0.5), 35.0, 2.0),
        )
        .build()
        .expect("demo scene is valid")
}

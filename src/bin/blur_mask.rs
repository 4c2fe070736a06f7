use std::env;
use std::path::{Path, PathBuf};
use tilt_shift::config::load_config;
use tilt_shift::image::io::save_mask_png;
use tilt_shift::BlurMask;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = args.next().ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    let out_path: PathBuf = args
        .next()
        .map(PathBuf::from)
        .or_else(|| config.output.mask_image.clone())
        .ok_or_else(usage)?;

    let (width, height) = image::image_dimensions(&config.input)
        .map_err(|e| format!("Failed to read {}: {e}", config.input.display()))?;
    let mask = BlurMask::generate(&config.filter.focus, width as usize, height as usize)
        .map_err(|e| e.to_string())?;

    let sharp = (0..mask.height())
        .flat_map(|y| mask.row(y).iter())
        .filter(|&&a| a == 0.0)
        .count();
    save_mask_png(&mask, &out_path).map_err(|e| e.to_string())?;
    println!(
        "Saved {}x{} blur mask for {:?} to {} ({} sharp pixels)",
        width,
        height,
        config.filter.focus,
        out_path.display(),
        sharp
    );
    Ok(())
}

fn usage() -> String {
    "Usage: blur_mask <config.json> [mask.png]".to_string()
}

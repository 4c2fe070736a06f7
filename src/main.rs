use std::env;
use std::path::Path;
use tilt_shift::config::load_config;
use tilt_shift::image::io::{load_frame, save_frame, save_mask_png, write_json_file};
use tilt_shift::TiltShift;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let frame = load_frame(&config.input, config.grayscale).map_err(|e| e.to_string())?;
    println!(
        "Loaded {} ({}x{}, {} channel(s))",
        config.input.display(),
        frame.width(),
        frame.height(),
        frame.channels()
    );

    let filter = TiltShift::new(config.filter, frame.width(), frame.height())
        .map_err(|e| e.to_string())?;
    let (filtered, report) = filter.apply_frame(&frame).map_err(|e| e.to_string())?;

    for pass in &report.passes {
        println!(
            "Pass {}/{}{}: {:.3} ms over {} tiles",
            pass.pass_index,
            pass.total_passes,
            if pass.last_pass { " (graded)" } else { "" },
            pass.elapsed_ms,
            pass.tiles
        );
    }
    println!(
        "Total: {:.3} ms ({:.3} ms in passes)",
        report.timings.total_ms,
        report.timings.sum_matching("pass")
    );

    if let Some(path) = &config.output.image {
        save_frame(&filtered, path).map_err(|e| e.to_string())?;
        println!("Filtered image written to {}", path.display());
    }
    if let Some(path) = &config.output.mask_image {
        save_mask_png(filter.mask(), path).map_err(|e| e.to_string())?;
        println!("Blur mask written to {}", path.display());
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: tilt_shift <config.json>".to_string()
}

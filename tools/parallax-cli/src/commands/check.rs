//! Report which motion sources are available.

use std::path::PathBuf;

use parallax_common::config::{config_file_path, AppConfig, BackendKind};
use parallax_motion::backends::detect_backend;

pub fn run(config: &AppConfig, trace: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Parallax Motion Check");
    println!("{}", "=".repeat(50));
    println!("Config: {}", config_file_path().display());
    println!(
        "Default source: {:?} @ {}Hz",
        config.motion.backend, config.motion.update_rate_hz
    );
    println!();

    for kind in [BackendKind::Synthetic, BackendKind::Replay, BackendKind::None] {
        let backend = detect_backend(kind, trace.as_deref(), config.motion.update_rate_hz);
        let status = if backend.is_available() { "OK" } else { "--" };
        println!("[{status}] {kind:?} ({})", backend.name());
    }

    if trace.is_none() {
        println!();
        println!("Pass --trace <PATH> to probe the replay source.");
    }

    Ok(())
}

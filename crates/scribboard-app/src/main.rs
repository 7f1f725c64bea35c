//! Main application entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "usage: scribboard <config.json> <script.json> [out_dir]";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, script, out_dir) = match args.as_slice() {
        [config, script] => (config, script, PathBuf::from(".")),
        [config, script, out_dir] => (config, script, PathBuf::from(out_dir)),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    log::info!("Starting Scribboard replay of {}", script);

    match scribboard_app::run_files(Path::new(config), Path::new(script), &out_dir) {
        Ok(exports) => {
            for paths in &exports {
                println!("{}", paths.png.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

use std::process::ExitCode;

use image_rain::RainOptions;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match std::env::args().nth(1) {
        Some(path) => match RainOptions::load(&path) {
            Ok(options) => {
                log::info!("Loaded options from {}", path);
                options
            }
            Err(e) => {
                log::error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => RainOptions::default(),
    };

    match image_rain::window::run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

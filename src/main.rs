use steam_plume::app::{AppError, SteamApp};
use steam_plume::config::SteamConfig;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SteamConfig::load(path)?,
        None => SteamConfig::default(),
    };

    log::info!("{} {}", steam_plume::NAME, steam_plume::VERSION);
    SteamApp::run(config)
}

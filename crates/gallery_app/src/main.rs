mod app;
mod config;
mod effects;
mod input;
mod persistence;
mod render;
mod viewport;

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
    app::run(&config_path)
}

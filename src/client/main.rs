mod assets;
mod game;
mod network;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use ggez::conf::{WindowMode, WindowSetup};
use ggez::{event, ContextBuilder};
use tilehop::{GAME_HEIGHT, GAME_WIDTH};

use game::GameHandler;
use settings::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut cb = ContextBuilder::new("tilehop", "tylian")
        .window_setup(WindowSetup::default().title("Tilehop").vsync(true))
        .window_mode(
            WindowMode::default()
                .dimensions(GAME_WIDTH * 2.0, GAME_HEIGHT * 2.0)
                .resizable(true),
        );

    if let Ok(runtime) = std::env::var("RUNTIME_PATH") {
        let runtime = PathBuf::from(runtime).join("client");
        let resources = runtime.join("resources");

        log::warn!("Setting runtime to {}", runtime.display());
        std::env::set_current_dir(&runtime).context("set runtime path")?;

        log::info!("Adding {resources:?} to path");
        cb = cb.add_resource_path(resources);
    }

    let settings = Settings::load().context("load settings")?;
    let (mut ctx, event_loop) = cb.build().context("create window")?;

    let state = GameHandler::new(&mut ctx, &settings);
    event::run(ctx, event_loop, state)
}

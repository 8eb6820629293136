//! sceneloop entry point.
//!
//! A small 2D game host written in Rust using:
//! - **raylib** for windowing, graphics and input
//! - **bevy_ecs** for the demo scene's entities and animation schedule
//!
//! # Main Loop
//!
//! 1. Parse the command line and load `config.ini`
//! 2. Load player settings and save data (created on first run)
//! 3. Open the window and intermediate render target
//! 4. Register the demo scenes and request the title scene
//! 5. Tick and draw until the window closes or a scene asks to exit
//! 6. Dispose the active scene and save
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini --save-dir ./save
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use sceneloop::app::{App, AppError, LoopState};
use sceneloop::game::{TITLE_SCENE, scene_store};
use sceneloop::platform::Platform;
use sceneloop::platform::raylib_backend::RaylibPlatform;
use sceneloop::resources::gameconfig::GameConfig;
use sceneloop::resources::savemanager::{JsonSaveStore, SaveManager};

/// sceneloop 2D
#[derive(Parser)]
#[command(version, about = "Scene-driven 2D game loop on raylib")]
struct Cli {
    /// INI configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for SaveFile.json and GameSettings.json.
    /// Overrides `save_dir` from the configuration file.
    #[arg(long, value_name = "PATH")]
    save_dir: Option<PathBuf>,

    /// Reset save data before starting.
    #[arg(long)]
    new_game: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    info!("Hello, world! This is sceneloop!");

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
        if !config.config_path.exists() {
            if let Err(e) = config.save_to_file() {
                warn!("{}", e);
            }
        }
    }
    if let Some(dir) = cli.save_dir {
        config.save_dir = dir;
    }

    let mut saves = SaveManager::load(JsonSaveStore::new(config.save_dir.clone()))?;
    if cli.new_game {
        info!("Starting a new game");
        saves.new_game()?;
    }

    let platform = RaylibPlatform::new(&config).map_err(AppError::Platform)?;

    let mut app = App::new(platform, scene_store(), saves);
    app.initialize()?;
    app.request_scene_change(TITLE_SCENE)?;

    while !app.platform().should_close() {
        let frame_time = app.platform().frame_time();
        if app.tick(frame_time)? == LoopState::Exit {
            break;
        }
        app.draw();
    }

    app.shutdown()?;
    info!("Bye!");
    Ok(())
}

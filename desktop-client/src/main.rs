mod config;
mod game_loop;
mod score_client;
mod state;
mod ui;

use std::time::Duration;

use clap::Parser;
use common::{log, logger};
use tokio::sync::mpsc;

use config::get_config_manager;
use game_loop::run_game_loop;
use state::SharedState;
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "snake_scores_client")]
struct Args {
    #[arg(long)]
    server_address: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager();
    let mut client_config = config_manager.get_config()?;
    if let Some(server_address) = args.server_address {
        client_config.server_address = server_address;
    }
    if let Err(e) = config_manager.set_config(&client_config) {
        log!("Failed to persist config: {}", e);
    }

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let server_address = client_config.server_address.clone();
    let tick_interval = Duration::from_millis(client_config.tick_interval_ms);
    let shared_state_clone = shared_state.clone();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        rt.block_on(run_game_loop(
            shared_state_clone,
            command_rx,
            server_address,
            tick_interval,
        ));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title("Snake"),
        ..Default::default()
    };

    let player_name = client_config.player_name.clone();
    eframe::run_native(
        "Snake",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SnakeApp::new(
                shared_state,
                command_tx,
                player_name,
            )))
        }),
    )?;

    Ok(())
}

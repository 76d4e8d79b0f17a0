//! # Shifubriq
//!
//! Slack-driven rock-paper-scissors with a Briq payout to the winner.
//!
//! ## Architecture
//!
//! - **game**: the in-memory engine — one [`game::Game`] per challenge and the
//!   process-wide [`game::Registry`] of active games
//! - **service**: orchestration of the slash-command and button-press flows,
//!   plus messaging, identity resolution, and the payout
//! - **providers**: the external collaborators (Slack chat, Briq bank) behind
//!   async traits
//! - **server**: actix-web routes receiving Slack's callbacks

pub mod config;
pub mod game;
pub mod providers;
pub mod server;
pub mod service;

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

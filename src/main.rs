//! Shifubriq server binary.
//!
//! Receives Slack slash-commands and interactive-message callbacks
//! and runs the games end to end.

use shifubriq::*;

#[tokio::main]
async fn main() {
    log();
    server::Server::run().await.unwrap();
}

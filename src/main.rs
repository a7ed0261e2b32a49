//! Main entry point.
//!
//! Initializes logging, wires the chat backend and the LLM client into the
//! application, and runs the outer command loop. Terminal setup/teardown
//! happens inside the individual UI sessions, not here.

use anyhow::Result;
use chatscope::app::App;
use chatscope::chat::LocalChatStore;
use chatscope::llm::{LlmConfig, OllamaClient};
use chatscope::utils;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before anything else
    utils::logger::init_logging();

    let store = LocalChatStore::with_demo_data();
    let llm = OllamaClient::new(LlmConfig::from_env());

    let mut app = App::new(store, llm);
    app.run().await
}

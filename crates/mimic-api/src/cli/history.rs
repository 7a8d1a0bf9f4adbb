//! `mimic history` and `mimic config`.

use std::path::Path;

use mimic_core::history::window;
use mimic_infra::config::render_config;
use mimic_infra::filesystem::LocalChatLogStore;
use mimic_types::chat::SenderIdentity;
use mimic_types::config::BotConfig;

/// Print the windowed history for `identity` exactly as it would be sent
/// to the generator.
pub async fn show_history(
    data_dir: &Path,
    config: &BotConfig,
    identity: &str,
) -> anyhow::Result<()> {
    let store = LocalChatLogStore::from_config(data_dir, &config.storage);
    let identity = SenderIdentity::new(identity);

    let history = window(&store, &identity, &config.window).await?;
    if history.is_empty() {
        eprintln!("No history for {identity}.");
    } else {
        println!("{history}");
    }
    Ok(())
}

pub fn show_config(config: &BotConfig) -> anyhow::Result<()> {
    print!("{}", render_config(config)?);
    Ok(())
}

//! Connectivity self-test.

use anyhow::Result;
use cpx_core::config::Config;
use cpx_core::gemini::SanitizeMode;

pub async fn run(config: &Config) -> Result<()> {
    let client = super::build_client(config)?;
    let reply = client
        .generate("Respond with \"API working\"", SanitizeMode::Strip)
        .await?;
    println!("Backend reachable: {reply}");
    Ok(())
}

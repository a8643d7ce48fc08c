//! The `modelrank init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("modelrank.toml").exists() {
        println!("modelrank.toml already exists, skipping.");
    } else {
        std::fs::write("modelrank.toml", SAMPLE_CONFIG)?;
        println!("Created modelrank.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit modelrank.toml with your API keys");
    println!("  2. Run: modelrank list-models --before \"1 January 2024\"");
    println!("  3. Run: modelrank grade --input \"<claim>\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# modelrank configuration

default_provider = "openai"
timeout_secs = 60

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"
# base_url = "https://api.openai.com"

[providers.anthropic]
type = "anthropic"
api_key = "${ANTHROPIC_API_KEY}"

[providers.snapshot]
type = "file"
path = "catalog.json"
"#;

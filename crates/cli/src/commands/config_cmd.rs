//! `oneminute config`: Configuration management commands.

use oneminute_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            if config.generation_enabled() {
                println!("   ✅ Generative tier enabled");
            } else {
                println!(
                    "   ⚠️  No API key set (set ONEMINUTE_API_KEY or OPENAI_API_KEY env var)"
                );
            }

            println!();
            println!("   Provider:   {}", config.provider);
            println!("   Model:      {}", config.model);
            println!(
                "   Reference:  {}",
                if config.reference.enabled {
                    config.reference.base_url.as_str()
                } else {
                    "disabled"
                }
            );
            println!("   Min words:  {}", config.quality.min_words);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", redacted_toml(&config)?);
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

fn redacted_toml(config: &AppConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if shown.api_key.is_some() {
        shown.api_key = Some("[REDACTED]".into());
    }
    toml::to_string_pretty(&shown)
}

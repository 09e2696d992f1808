//! `oneminute doctor`: Diagnose configuration and connectivity.

use oneminute_config::AppConfig;
use oneminute_core::ReferenceSource;
use oneminute_reference::WikipediaSource;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 OneMinute Doctor — System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_path();
    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file — run `oneminute onboard` (defaults in use)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config file invalid: {e}");
            println!("\n  ⚠️  Fix the config before running other checks.");
            return Ok(());
        }
    };

    match oneminute_providers::build_from_config(&config) {
        Some(provider) => match provider.health_check().await {
            Ok(true) => println!("  ✅ Provider '{}' reachable", provider.name()),
            Ok(false) => {
                println!("  ⚠️  Provider '{}' rejected the health check", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Provider '{}' unreachable: {e}", provider.name());
                issues += 1;
            }
        },
        None => {
            println!("  ⚠️  No API key configured — generative tier disabled");
            issues += 1;
        }
    }

    if config.reference.enabled {
        let wikipedia = WikipediaSource::from_config(&config.reference);
        if wikipedia.lookup("Recursion").await.exists {
            println!("  ✅ Wikipedia reachable");
        } else {
            println!("  ⚠️  Wikipedia lookup failed — reference tier may be unavailable");
            issues += 1;
        }
    } else {
        println!("  ⚠️  Reference lookups disabled in config");
    }

    println!("  ✅ Guaranteed template always available");

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. Explanations still work through the remaining tiers.");
    }

    Ok(())
}

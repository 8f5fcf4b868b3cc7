//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dawa_catalog::search::MAX_PAGE_SIZE;
use dawa_catalog::{Currency, Locale};
use dawa_observability::{LogFormat, LogLevel};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.line("");
    ctx.output.line("[catalog]");
    ctx.output
        .kv("path", config.catalog.path.as_deref().unwrap_or("(unset)"));
    ctx.output.kv("currency", &config.catalog.currency);

    ctx.output.line("");
    ctx.output.line("[listing]");
    ctx.output.kv("page_size", &config.listing.page_size.to_string());
    ctx.output.kv("locale", &config.listing.locale);
    ctx.output
        .kv("include_facets", &config.listing.include_facets.to_string());

    ctx.output.line("");
    ctx.output.line("[logging]");
    ctx.output.kv("level", &config.logging.level);
    ctx.output.kv("format", &config.logging.format);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        match &value {
            serde_json::Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }

    Ok(())
}

fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("dawa.toml");

    if config_path.exists() && !force {
        if !ctx.output.is_interactive() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let confirmed = Confirm::new()
            .with_prompt(format!("Overwrite {}?", config_path.display()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Config init cancelled");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config(catalog))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect (errors, warnings) for the loaded configuration.
fn check_config(ctx: &Context) -> (Vec<String>, Vec<String>) {
    let config = &ctx.config;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if Currency::from_code(&config.catalog.currency).is_none() {
        errors.push(format!(
            "catalog.currency '{}' is not a supported currency",
            config.catalog.currency
        ));
    }

    match ctx.catalog_path(None) {
        Ok(path) if !path.exists() => {
            warnings.push(format!("catalog.path '{}' does not exist", path.display()))
        }
        Ok(_) => {}
        Err(_) => warnings.push("catalog.path is not set".to_string()),
    }

    if config.listing.page_size == 0 || config.listing.page_size > MAX_PAGE_SIZE {
        errors.push(format!(
            "listing.page_size must be 1-{}, got {}",
            MAX_PAGE_SIZE, config.listing.page_size
        ));
    }

    if Locale::from_str(&config.listing.locale).is_none() {
        errors.push(format!(
            "listing.locale '{}' must be 'en' or 'ar'",
            config.listing.locale
        ));
    }

    if LogLevel::from_str(&config.logging.level).is_none() {
        errors.push(format!("logging.level '{}' is unknown", config.logging.level));
    }

    if LogFormat::from_str(&config.logging.format).is_none() {
        errors.push(format!(
            "logging.format '{}' must be 'human' or 'json'",
            config.logging.format
        ));
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<serde_json::Value> {
    let parts: Vec<&str> = key.split('.').collect();

    let value = match parts.as_slice() {
        ["catalog", "path"] => serde_json::json!(config.catalog.path),
        ["catalog", "currency"] => serde_json::json!(config.catalog.currency),
        ["listing", "page_size"] => serde_json::json!(config.listing.page_size),
        ["listing", "locale"] => serde_json::json!(config.listing.locale),
        ["listing", "include_facets"] => serde_json::json!(config.listing.include_facets),
        ["logging", "level"] => serde_json::json!(config.logging.level),
        ["logging", "format"] => serde_json::json!(config.logging.format),
        _ => bail!("Unknown config key: {}", key),
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;
    use std::path::PathBuf;

    fn ctx(config: CliConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/tmp"),
        }
    }

    #[test]
    fn test_get_config_value() {
        let config = CliConfig::default();
        assert_eq!(
            get_config_value(&config, "listing.page_size").unwrap(),
            serde_json::json!(12)
        );
        assert_eq!(
            get_config_value(&config, "catalog.path").unwrap(),
            serde_json::Value::Null
        );
        assert!(get_config_value(&config, "listing.colour").is_err());
    }

    #[test]
    fn test_check_config_defaults_only_warn() {
        let (errors, warnings) = check_config(&ctx(CliConfig::default()));
        assert!(errors.is_empty());
        assert_eq!(warnings, vec!["catalog.path is not set".to_string()]);
    }

    #[test]
    fn test_check_config_reports_errors() {
        let mut config = CliConfig::default();
        config.catalog.currency = "XYZ".to_string();
        config.listing.page_size = 0;
        config.listing.locale = "fr".to_string();
        config.logging.format = "xml".to_string();

        let (errors, _) = check_config(&ctx(config));
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("XYZ"));
    }
}

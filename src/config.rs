use crate::error::{ErrorContext, Result};
use crate::types::{Config, OutputFormat, SubprobeError};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const THREADS_ENV: &str = "SUBPROBE_THREADS";
pub const NAMESERVERS_ENV: &str = "SUBPROBE_NAMESERVERS";

/// Loads defaults, then the TOML file at `config_path` if given, then
/// environment overrides.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(path) = config_path {
        let contents = fs::read_to_string(path).with_context(SubprobeError::ConfigError, || {
            format!("Failed to read config file {}", path.display())
        })?;
        apply_toml(&mut config, &contents)?;
    }

    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn apply_toml(config: &mut Config, contents: &str) -> Result<()> {
    let toml_config: toml::Value = toml::from_str(contents)
        .with_context(SubprobeError::ConfigError, || "Failed to parse config file".to_string())?;

    let Some(table) = toml_config.as_table() else {
        return Ok(());
    };

    if let Some(resolver) = table.get("resolver").and_then(|v| v.as_table()) {
        if let Some(threads) = resolver.get("threads") {
            config.resolver.threads = as_count(threads, "resolver.threads")?;
        }
        if let Some(timeout) = resolver.get("timeout") {
            config.resolver.timeout = Duration::from_secs(as_count(timeout, "resolver.timeout")? as u64);
        }
        if let Some(system) = resolver.get("use_system_resolver") {
            config.resolver.use_system_resolver = as_bool(system, "resolver.use_system_resolver")?;
        }
        if let Some(nameservers) = resolver.get("nameservers") {
            config.resolver.nameservers = as_string_list(nameservers, "resolver.nameservers")?;
        }
    }

    if let Some(output) = table.get("output").and_then(|v| v.as_table()) {
        if let Some(format) = output.get("format") {
            config.output.format = parse_format(as_str(format, "output.format")?)?;
        }
        if let Some(file) = output.get("file") {
            config.output.file = Some(as_str(file, "output.file")?.to_string());
        }
        if let Some(silent) = output.get("silent") {
            config.output.silent = as_bool(silent, "output.silent")?;
        }
    }

    Ok(())
}

fn as_count(value: &toml::Value, key: &str) -> Result<usize> {
    value
        .as_integer()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| SubprobeError::ConfigError(format!("{} must be a non-negative integer", key)))
}

fn as_str<'a>(value: &'a toml::Value, key: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| SubprobeError::ConfigError(format!("{} must be a string", key)))
}

fn as_bool(value: &toml::Value, key: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| SubprobeError::ConfigError(format!("{} must be a boolean", key)))
}

fn as_string_list(value: &toml::Value, key: &str) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| SubprobeError::ConfigError(format!("{} must be an array of strings", key)))?;
    items
        .iter()
        .map(|item| as_str(item, key).map(|s| s.to_string()))
        .collect()
}

pub fn parse_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        other => Err(SubprobeError::ConfigError(format!("Unknown output format: {}", other))),
    }
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(threads) = lookup(THREADS_ENV) {
        config.resolver.threads = threads.trim().parse::<usize>().with_context(SubprobeError::ConfigError, || {
            format!("{} is not a valid thread count", THREADS_ENV)
        })?;
    }
    if let Some(nameservers) = lookup(NAMESERVERS_ENV) {
        config.resolver.nameservers = split_list(&nameservers);
        config.resolver.use_system_resolver = false;
    }
    Ok(())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn validate_config(config: &Config) -> Result<()> {
    if config.resolver.threads == 0 {
        return Err(SubprobeError::ConfigError("Thread count must be at least 1".to_string()));
    }
    if config.resolver.timeout.is_zero() {
        return Err(SubprobeError::ConfigError("Lookup timeout must be greater than 0".to_string()));
    }
    if !config.resolver.use_system_resolver && config.resolver.nameservers.is_empty() {
        return Err(SubprobeError::ConfigError("No nameservers configured".to_string()));
    }
    Ok(())
}

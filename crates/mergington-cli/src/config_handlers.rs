//! Handler functions for `config` CLI commands.
//!
//! Each command has a `render_*`/`write_*` function doing the work and
//! returning what would be printed, so the handlers stay testable; the
//! dispatcher prints.

use std::path::{Path, PathBuf};

use mergington_core::config::DEFAULT_CONFIG_FILE;
use mergington_core::{AppConfig, Error, Result};

use crate::cli::{ConfigAction, Overrides};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a `config` subcommand.
pub fn handle_config_command(
    config_path: Option<&Path>,
    overrides: &Overrides,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let (path, exists) = render_config_path(config_path);
            println!("{}", path.display());
            if !exists {
                eprintln!("(file does not exist; run `mergington config init` to create it)");
            }
        }
        ConfigAction::Show => {
            let config = load_resolved(config_path, overrides)?;
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Get { key } => {
            let config = load_resolved(config_path, overrides)?;
            println!("{}", render_config_value(&config, &key)?);
        }
        ConfigAction::Set { key, value } => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            write_config_value(&path, &key, &value)?;
            println!("Set {key} = {value} in {}", path.display());
        }
        ConfigAction::Init { file, force } => {
            let path = file.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            write_default_config(&path, force)?;
            println!("Config file created at {}", path.display());
        }
    }
    Ok(())
}

/// Load the config file and apply CLI/environment overrides.
pub fn load_resolved(config_path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig> {
    let mut config = AppConfig::load(config_path)?;
    overrides.apply(&mut config);
    Ok(config)
}

// ============================================================================
// Command implementations
// ============================================================================

/// The file `config` commands read, and whether it exists.
pub fn render_config_path(config_path: Option<&Path>) -> (PathBuf, bool) {
    let path = AppConfig::resolve_config_path(config_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let exists = path.exists();
    (path, exists)
}

/// Look up a dotted key in the resolved configuration.
pub fn render_config_value(config: &AppConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Set a dotted key in an existing config file.
///
/// The edited file must still parse as a valid configuration.
pub fn write_config_value(path: &Path, key: &str, value: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `mergington config init` first.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    AppConfig::from_toml_str(&toml_str)
        .map_err(|e| Error::config(format!("Refusing to write invalid value for '{key}': {e}")))?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))
}

/// Write the default configuration to `path`.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = AppConfig::default().to_toml_string()?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let Some(last) = parts.pop().filter(|p| !p.is_empty()) else {
        return Err(Error::config("Empty key path"));
    };

    let mut current = root;
    for part in parts {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse a string into a TOML value: bool, then integer, then float, then string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => s
            .parse::<i64>()
            .map(toml::Value::Integer)
            .or_else(|_| s.parse::<f64>().map(toml::Value::Float))
            .unwrap_or_else(|_| toml::Value::String(s.to_string())),
    }
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

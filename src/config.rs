use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use cross_xdg::BaseDirs;
use tracing::{debug, warn};

use crate::tape::DEFAULT_TAPE_SIZE;

/// Settings read from the `[interpreter]` section of `bf.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub tape_size: Option<usize>,
    pub quiet: Option<bool>,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tape_size: usize,
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            quiet: false,
        }
    }
}

impl Config {
    /// Resolve settings: flags -> env (`BF_TAPE_SIZE`, `BF_QUIET`) -> config file -> defaults.
    pub fn resolve(tape_size_flag: Option<usize>, quiet_flag: bool) -> Self {
        let file = load_file_config().unwrap_or_default();
        Self::resolve_with(
            tape_size_flag,
            quiet_flag,
            env::var("BF_TAPE_SIZE").ok().as_deref(),
            env::var("BF_QUIET").ok().as_deref(),
            &file,
        )
    }

    fn resolve_with(
        tape_size_flag: Option<usize>,
        quiet_flag: bool,
        tape_size_env: Option<&str>,
        quiet_env: Option<&str>,
        file: &FileConfig,
    ) -> Self {
        let tape_size = tape_size_flag
            .filter(|&n| n > 0)
            .or_else(|| tape_size_env.and_then(parse_tape_size))
            .or(file.tape_size)
            .unwrap_or(DEFAULT_TAPE_SIZE);

        let quiet = quiet_flag
            || quiet_env
                .and_then(parse_bool)
                .or(file.quiet)
                .unwrap_or(false);

        Self { tape_size, quiet }
    }
}

/// Location of `bf.toml`: `BF_CONFIG` when set, otherwise `$XDG_CONFIG_HOME/bf.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("BF_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");
    Some(path)
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    let content = fs::read_to_string(&path).ok()?;
    debug!(path = %path.display(), "loaded config file");
    Some(parse_file_config(&content))
}

/// Very small hand-rolled parser: look for the [interpreter] section and key = value pairs.
/// Unknown keys and unparsable values are ignored.
pub fn parse_file_config(content: &str) -> FileConfig {
    let mut in_section = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            in_section = &line[1..line.len()-1] == "interpreter";
            continue;
        }
        if !in_section { continue; }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq+1..].trim();
            // Accept quoted or unquoted
            let val = if val_raw.starts_with('"') && val_raw.ends_with('"') && val_raw.len() >= 2 {
                val_raw[1..val_raw.len()-1].to_string()
            } else { val_raw.to_string() };
            map.insert(key, val);
        }
    }

    let mut cfg = FileConfig::default();
    if let Some(v) = map.get("tape_size") {
        cfg.tape_size = parse_tape_size(v);
        if cfg.tape_size.is_none() {
            warn!(value = %v, "ignoring invalid tape_size in config file");
        }
    }
    if let Some(v) = map.get("quiet") {
        cfg.quiet = parse_bool(v);
    }
    cfg
}

fn parse_tape_size(value: &str) -> Option<usize> {
    value.trim().replace('_', "").parse::<usize>().ok().filter(|&n| n > 0)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

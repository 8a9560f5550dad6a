use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use cross_xdg::BaseDirs;

/// When to colour the `error:` prefix on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Colour only when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" => Ok(ColorMode::Always),
            "never" | "off" => Ok(ColorMode::Never),
            _ => Err(()),
        }
    }
}

/// Settings for one interpreter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Suppress the loaded/running/done progress lines.
    pub quiet: bool,
    /// Print a per-instruction trace table to stderr.
    pub trace: bool,
    pub color: ColorMode,
}

/// Values given explicitly on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub quiet: Option<bool>,
    pub trace: Option<bool>,
    pub color: Option<ColorMode>,
}

impl Settings {
    /// Resolve settings: flags -> env -> config file -> defaults.
    pub fn resolve(overrides: Overrides) -> Self {
        let file = load_file().unwrap_or_default();
        Self::layer(overrides, &|key| env::var(key).ok(), &file)
    }

    fn layer(
        overrides: Overrides,
        env: &dyn Fn(&str) -> Option<String>,
        file: &HashMap<String, String>,
    ) -> Self {
        let from_file = |key: &str| file.get(key).map(String::as_str);

        let quiet = overrides
            .quiet
            .or_else(|| env("BF_QUIET").and_then(|v| parse_bool(&v)))
            .or_else(|| from_file("quiet").and_then(parse_bool))
            .unwrap_or(false);
        let trace = overrides
            .trace
            .or_else(|| env("BF_TRACE").and_then(|v| parse_bool(&v)))
            .or_else(|| from_file("trace").and_then(parse_bool))
            .unwrap_or(false);
        let color = overrides
            .color
            .or_else(|| env("BF_COLOR").and_then(|v| v.parse().ok()))
            .or_else(|| from_file("color").and_then(|v| v.parse().ok()))
            .unwrap_or_default();

        Self { quiet, trace, color }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `BF_CONFIG` if set, otherwise `bf.toml` in the XDG config home.
fn config_path() -> Option<PathBuf> {
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

fn load_file() -> Option<HashMap<String, String>> {
    let content = fs::read_to_string(config_path()?).ok()?;
    Some(parse_run_section(&content))
}

/// Very small hand-rolled parser: collect `key = value` pairs from the `[run]`
/// section. Values may be quoted.
fn parse_run_section(content: &str) -> HashMap<String, String> {
    let mut in_run = false;
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_run = &line[1..line.len() - 1] == "run";
            continue;
        }
        if !in_run {
            continue;
        }
        if let Some((key, raw)) = line.split_once('=') {
            let raw = raw.trim();
            let value = raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(raw);
            map.insert(key.trim().to_string(), value.to_string());
        }
    }
    map
}

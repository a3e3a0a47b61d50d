use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where copy and cut send their text.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Auto,
    Osc52,
    Off,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub caret: bool,
    pub capacity: Option<usize>,
    pub marker: Option<char>,
    pub clipboard: Option<ClipboardMode>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            caret: self.caret || other.caret,
            capacity: other.capacity.or(self.capacity),
            marker: other.marker.or(self.marker),
            clipboard: other.clipboard.or(self.clipboard),
        }
    }
}

/// `$XDG_CONFIG_HOME/lanote/config`, falling back to `~/.config`, then to
/// the local rc file when neither is set.
pub fn global_config_path() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map_or_else(local_override_path, |dir| dir.join("lanote").join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".lanoterc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# lanote defaults (saved with --save)".to_string());
    if flags.caret {
        lines.push("--caret".to_string());
    }
    if let Some(capacity) = flags.capacity {
        lines.push(format!("--capacity {capacity}"));
    }
    if let Some(marker) = flags.marker {
        lines.push(format!("--marker {marker}"));
    }
    if let Some(mode) = flags.clipboard {
        let mode_str = match mode {
            ClipboardMode::Auto => "auto",
            ClipboardMode::Osc52 => "osc52",
            ClipboardMode::Off => "off",
        };
        lines.push(format!("--clipboard {mode_str}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of an argument list (without the program name).
/// Scanning stops at `--` or at the first argument that is not a long flag,
/// so note commands are never read as flags.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--" || !token.starts_with("--") {
            break;
        } else if token == "--caret" {
            flags.caret = true;
        } else if token == "--capacity" {
            if let Some(next) = tokens.get(i + 1) {
                flags.capacity = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--capacity=") {
            flags.capacity = value.parse().ok();
        } else if token == "--marker" {
            if let Some(next) = tokens.get(i + 1) {
                flags.marker = parse_marker(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--marker=") {
            flags.marker = parse_marker(value);
        } else if token == "--clipboard" {
            if let Some(next) = tokens.get(i + 1) {
                flags.clipboard = parse_clipboard(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--clipboard=") {
            flags.clipboard = parse_clipboard(value);
        }
        i += 1;
    }
    flags
}

fn parse_marker(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

fn parse_clipboard(s: &str) -> Option<ClipboardMode> {
    match s {
        "auto" => Some(ClipboardMode::Auto),
        "osc52" => Some(ClipboardMode::Osc52),
        "off" => Some(ClipboardMode::Off),
        _ => None,
    }
}

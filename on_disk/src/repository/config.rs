use std::fs;
use std::path::Path;
use std::str::FromStr;

use minigit_core::{Error, PreconditionError, Result};

/// The subset of `.git/config` that this crate understands.
///
/// Only keys in the `[core]` section are read; everything else is ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub repository_format_version: i64,
    pub file_mode: bool,
    pub bare: bool,
}

impl Config {
    /// Read and validate the config file at `path`.
    pub fn read(path: &Path) -> Result<Config> {
        if !path.is_file() {
            return Err(PreconditionError::MissingConfig(path.to_path_buf()).into());
        }

        fs::read_to_string(path)?.parse()
    }
}

impl FromStr for Config {
    type Err = Error;

    /// Parse git's INI-style config syntax.
    ///
    /// Fails unless `core.repositoryformatversion` is present and equal to 0.
    fn from_str(text: &str) -> Result<Config> {
        let mut version = None;
        let mut file_mode = true;
        let mut bare = false;

        let mut section = String::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                // `[core]` or `[remote "origin"]`; only the section name matters here.
                let name = line
                    .trim_start_matches('[')
                    .split(|c| c == ']' || c == ' ' || c == '"')
                    .next()
                    .unwrap_or("");
                section = name.to_ascii_lowercase();
                continue;
            }

            if section != "core" {
                continue;
            }

            let mut parts = line.splitn(2, '=');
            let key = parts.next().unwrap_or("").trim().to_ascii_lowercase();
            // A key with no `=` is an implicit `true`.
            let value = parts.next().map(clean_value).unwrap_or("true");

            match key.as_str() {
                "repositoryformatversion" => {
                    version = Some(value.parse::<i64>().map_err(|_| invalid(&key, value))?)
                }
                "filemode" => file_mode = parse_bool(&key, value)?,
                "bare" => bare = parse_bool(&key, value)?,
                _ => (),
            }
        }

        let repository_format_version = version.ok_or(PreconditionError::MissingFormatVersion)?;
        if repository_format_version != 0 {
            return Err(PreconditionError::UnsupportedFormatVersion(repository_format_version).into());
        }

        Ok(Config {
            repository_format_version,
            file_mode,
            bare,
        })
    }
}

// Drop a trailing comment and surrounding quotes.
fn clean_value(value: &str) -> &str {
    let value = value.trim();
    if value.starts_with('"') {
        return value.trim_matches('"');
    }

    match value.find(|c| c == '#' || c == ';') {
        Some(n) => value[..n].trim_end(),
        None => value,
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> Error {
    PreconditionError::InvalidConfigValue {
        key: format!("core.{}", key),
        value: value.to_string(),
    }
    .into()
}

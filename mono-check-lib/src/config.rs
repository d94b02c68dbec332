//! Environment variable configuration.
//!
//! Settings can be supplied through `MC_*` variables. They sit between CLI
//! arguments (higher precedence) and built-in defaults (lower precedence).

use crate::types::CheckConfig;
use std::env;
use std::path::PathBuf;

/// Configuration values read from `MC_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub subpath: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub concurrency: Option<usize>,
    pub json: Option<bool>,
    pub pretty: Option<bool>,
}

/// Load configuration from the process environment.
///
/// Invalid values are ignored; with `verbose` set a warning is printed.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    EnvConfig::from_lookup(|key| env::var(key).ok(), verbose)
}

impl EnvConfig {
    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, verbose: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env_config = EnvConfig::default();

        // MC_SUBPATH - directory under $HOME holding site configs
        if let Some(subpath) = non_empty(lookup("MC_SUBPATH")) {
            if verbose {
                eprintln!("🔧 Using MC_SUBPATH={}", subpath);
            }
            env_config.subpath = Some(PathBuf::from(subpath));
        }

        // MC_DIR - full directory override
        if let Some(dir) = non_empty(lookup("MC_DIR")) {
            if verbose {
                eprintln!("🔧 Using MC_DIR={}", dir);
            }
            env_config.dir = Some(PathBuf::from(dir));
        }

        // MC_PREFIX / MC_SUFFIX - file name markers
        if let Some(prefix) = non_empty(lookup("MC_PREFIX")) {
            if verbose {
                eprintln!("🔧 Using MC_PREFIX={}", prefix);
            }
            env_config.prefix = Some(prefix);
        }
        if let Some(suffix) = non_empty(lookup("MC_SUFFIX")) {
            if verbose {
                eprintln!("🔧 Using MC_SUFFIX={}", suffix);
            }
            env_config.suffix = Some(suffix);
        }

        // MC_CONCURRENCY - cap on probes in flight
        if let Some(val) = lookup("MC_CONCURRENCY") {
            match val.trim().parse::<usize>() {
                Ok(concurrency) if concurrency > 0 => {
                    env_config.concurrency = Some(concurrency);
                    if verbose {
                        eprintln!("🔧 Using MC_CONCURRENCY={}", concurrency);
                    }
                }
                _ => {
                    if verbose {
                        eprintln!("⚠️ Invalid MC_CONCURRENCY='{}', must be a positive integer", val);
                    }
                }
            }
        }

        // MC_JSON / MC_PRETTY - output format
        env_config.json = parse_flag("MC_JSON", lookup("MC_JSON"), verbose);
        env_config.pretty = parse_flag("MC_PRETTY", lookup("MC_PRETTY"), verbose);

        env_config
    }

    /// Apply these values on top of a base configuration.
    pub fn apply_to(&self, mut config: CheckConfig) -> CheckConfig {
        if let Some(subpath) = &self.subpath {
            config.conf_subpath = subpath.clone();
        }
        if let Some(dir) = &self.dir {
            config.conf_dir = Some(dir.clone());
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.suffix = suffix.clone();
        }
        if self.concurrency.is_some() {
            config.concurrency = self.concurrency;
        }
        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(name: &str, value: Option<String>, verbose: bool) -> Option<bool> {
    let val = value?;
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            if verbose {
                eprintln!("⚠️ Invalid {}='{}', use true/false", name, val);
            }
            None
        }
    }
}

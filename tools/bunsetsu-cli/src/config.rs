use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::File;
use log::warn;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "bunsetsu.toml";

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Tree,
    Graphml,
    Dot,
}

#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputFormat,
    /// Lexicon used by `parse`, JSON or compiled `.rkyv`.
    #[serde(default)]
    pub lexicon: Option<PathBuf>,
}

/// Loads `path`, or `bunsetsu.toml` in the working directory when no path is given.
/// A missing default file is not an error; anything unreadable falls back to defaults.
pub fn load_config(path: Option<&Path>) -> Config {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };

    match config::Config::builder()
        .add_source(File::from(path).required(required))
        .build()
    {
        Ok(c) => match c.try_deserialize() {
            Ok(config) => config,
            Err(e) => {
                warn!("Incompatible configuration: {:?}\nUsing default config", e);
                Config::default()
            }
        },
        Err(e) => {
            warn!("Failed to load config file: {:?}\nUsing default config", e);
            Config::default()
        }
    }
}

use crate::args::Args;
use crate::booth::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RollSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

/// The content of the JSON configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoothConfig {
    pub bind: Option<String>,
    pub roll: Option<RollSource>,
    pub candidates: Option<Vec<VoterId>>,
    pub empty: Option<bool>,
}

/// The settings the server starts with, after merging the command line and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub bind: String,
    pub roll: Option<RollSource>,
    pub candidates: Option<Vec<VoterId>>,
    pub empty: bool,
}

pub fn read_config(path: &str) -> BoothResult<BoothConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    debug!("read config: {:?}", contents);
    let config: BoothConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

/// Guesses the provider from the extension of the file.
fn provider_for(path: &str) -> String {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => "csv".to_string(),
        _ => "json".to_string(),
    }
}

/// Merges the command line over the configuration file.
///
/// `config_dir` is the directory of the configuration file: relative roll paths in
/// the file are resolved against it.
pub fn resolve_settings(args: &Args, config: BoothConfig, config_dir: Option<&Path>) -> Settings {
    let roll = match (&args.input, config.roll) {
        (Some(path), _) => Some(RollSource {
            provider: args
                .input_type
                .clone()
                .unwrap_or_else(|| provider_for(path)),
            file_path: path.clone(),
        }),
        (None, Some(source)) => {
            let p: PathBuf = match config_dir {
                Some(dir) if Path::new(&source.file_path).is_relative() => {
                    dir.join(&source.file_path)
                }
                _ => PathBuf::from(&source.file_path),
            };
            Some(RollSource {
                provider: args.input_type.clone().unwrap_or(source.provider),
                file_path: p.as_path().display().to_string(),
            })
        }
        (None, None) => None,
    };
    Settings {
        bind: args
            .bind
            .clone()
            .or(config.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string()),
        roll,
        candidates: args.candidates.clone().or(config.candidates),
        empty: args.empty || config.empty.unwrap_or(false),
    }
}

/// Reads the configuration file named on the command line, if any, and merges it.
pub fn load_settings(args: &Args) -> BoothResult<Settings> {
    match &args.config {
        Some(path) => {
            let config = read_config(path)?;
            info!("config: {:?}", config);
            Ok(resolve_settings(args, config, Path::new(path).parent()))
        }
        None => Ok(resolve_settings(args, BoothConfig::default(), None)),
    }
}

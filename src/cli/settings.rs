use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};

use crate::cli::commands::GlobalArgs;
use crate::io::config_io::{self, ConfigError};
use crate::io::repository::{LocalRepository, RepoError};
use crate::io::scratchpad::ScratchpadStore;
use crate::logging::LogConfig;
use crate::model::config::Config;

/// Error type for resolving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Config file values with command-line overrides applied
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub log_dir: PathBuf,
    pub year: i32,
    pub today: NaiveDate,
    pub json: bool,
}

impl Settings {
    pub fn resolve(args: &GlobalArgs) -> Result<Self, SettingsError> {
        let today = Local::now().date_naive();
        let config_path = args
            .config
            .as_deref()
            .map(config_io::expand_tilde)
            .unwrap_or_else(config_io::config_path);
        let config = config_io::load_config(&config_path)?;
        Ok(Self::with_config(config, args, today))
    }

    /// Apply overrides from `args` on top of an already loaded config
    pub fn with_config(mut config: Config, args: &GlobalArgs, today: NaiveDate) -> Self {
        if let Some(dir) = &args.log_dir {
            config.log_dir = dir.clone();
        }
        if let Some(format) = &args.filename_format {
            config.filename_format = format.clone();
        }
        if args.first_line_section {
            config.first_line_section = true;
        }
        if args.sunday_start {
            config.sunday_start = true;
        }
        Settings {
            log_dir: config_io::expand_tilde(&config.log_dir),
            year: args.year.unwrap_or_else(|| today.year()),
            today,
            json: args.json,
            config,
        }
    }

    pub fn repository(&self) -> Result<LocalRepository, RepoError> {
        LocalRepository::new(&self.log_dir, &self.config.filename_format)
    }

    pub fn scratchpads(&self) -> ScratchpadStore {
        ScratchpadStore::in_log_dir(&self.log_dir)
    }

    pub fn skip_first_line(&self) -> bool {
        self.config.skip_first_line()
    }
}

/// Where logs go: the log file in the state directory unless `--log-stderr`
pub fn log_config(args: &GlobalArgs) -> LogConfig {
    let file = if args.log_stderr {
        None
    } else {
        Some(config_io::state_dir().join("daybook.log"))
    };
    LogConfig::from_verbosity(args.verbose).with_log_file(file)
}

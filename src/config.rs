//! Configuration file handling for daily-sales.
//!
//! The configuration file is stored at `$SALES_HOME/config.json` and contains the address the
//! HTTP server binds to and the locations of the ledger, the item master and the page templates.

use crate::error::Res;
use crate::store::{CsvStore, Ledger};
use crate::utils;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "daily-sales";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";
const LEDGER_CSV: &str = "daily_sales.csv";
const ITEMS_CSV: &str = "items_master.csv";
const TEMPLATES: &str = "templates";
const DEFAULT_PORT: u16 = 5000;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SALES_HOME` and from there it loads `$SALES_HOME/config.json`. It provides the
/// resolved paths of the files the app reads and writes.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    ledger_path: PathBuf,
    items_path: PathBuf,
    templates_dir: PathBuf,
}

impl Config {
    /// Creates the home directory, its `data` and `templates` subdirectories, and an initial
    /// `config.json` with default settings, optionally overriding the bind address.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, bind_addr: Option<SocketAddr>) -> Res<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the sales home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let mut config_file = ConfigFile::default();
        if let Some(bind_addr) = bind_addr {
            config_file.bind_addr = bind_addr;
        }
        config_file.save(&config_path).await?;

        let config = Self::from_parts(root, config_path, config_file);
        utils::make_dir(config.templates_dir()).await?;
        config.make_ledger_dir().await?;
        Ok(config)
    }

    /// This will
    /// - validate that `sales_home` exists and that the config file exists
    /// - load the config file
    /// - create the directory that holds the ledger, if it is missing
    /// - return the loaded configuration object
    pub async fn load(sales_home: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = sales_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The sales home directory is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self::from_parts(root, config_path, config_file);
        config.make_ledger_dir().await?;
        Ok(config)
    }

    fn from_parts(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        let ledger_path = resolve(&root, config_file.ledger_path());
        let items_path = resolve(&root, config_file.items_path());
        let templates_dir = resolve(&root, config_file.templates_dir());
        Self {
            root,
            config_path,
            config_file,
            ledger_path,
            items_path,
            templates_dir,
        }
    }

    async fn make_ledger_dir(&self) -> Res<()> {
        match self.ledger_path.parent() {
            Some(parent) => utils::make_dir(parent).await,
            None => Ok(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.config_file.bind_addr
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn items_path(&self) -> &Path {
        &self.items_path
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Creates a `Ledger` backed by the configured CSV file.
    pub fn ledger(&self) -> Ledger {
        Ledger::new(Box::new(CsvStore::new(&self.ledger_path)))
    }
}

/// Returns `p` if it is absolute, otherwise `p` relative to `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "daily-sales",
///   "config_version": 1,
///   "bind_addr": "0.0.0.0:5000",
///   "ledger_path": "data/daily_sales.csv",
///   "items_path": "/srv/shared/items_master.csv"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "daily-sales"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The address the HTTP server listens on
    #[serde(default = "default_bind_addr")]
    bind_addr: SocketAddr,

    /// Path to the ledger CSV (optional, relative to $SALES_HOME or absolute)
    /// Defaults to $SALES_HOME/data/daily_sales.csv if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    ledger_path: Option<PathBuf>,

    /// Path to the item master CSV (optional, relative to $SALES_HOME or absolute)
    /// Defaults to $SALES_HOME/items_master.csv if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    items_path: Option<PathBuf>,

    /// Path to the directory holding index.html (optional, relative to $SALES_HOME or absolute)
    /// Defaults to $SALES_HOME/templates if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    templates_dir: Option<PathBuf>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            bind_addr: default_bind_addr(),
            ledger_path: None,
            items_path: None,
            templates_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or is not a daily-sales config.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Config version {} is unsupported. Is a newer version of daily-sales available?",
            config.config_version
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn ledger_path(&self) -> PathBuf {
        self.ledger_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA).join(LEDGER_CSV))
    }

    fn items_path(&self) -> PathBuf {
        self.items_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(ITEMS_CSV))
    }

    fn templates_dir(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(TEMPLATES))
    }
}

//! These structs provide the CLI interface for the daily-sales CLI.

use crate::model::{Submission, Tno};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// daily-sales: record daily sales entries in a spreadsheet-style ledger.
///
/// Each entry gets a sequential transaction number (TNo) and is appended to a CSV ledger that can
/// be opened in any spreadsheet program. The `serve` command runs the entry form and a small JSON
/// API; the other commands work on the same ledger from the command line.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// Run this once before anything else. The ledger is created by the first entry; put your
    /// `items_master.csv` and `templates/index.html` into the data directory afterwards.
    Init(BindArgs),
    /// Run the HTTP server with the entry form and the JSON API.
    Serve(BindArgs),
    /// Print the transaction number the next entry will get.
    Next,
    /// Print the known item names from the item master.
    Items,
    /// Print every entry in the ledger.
    List,
    /// Print one entry by its transaction number.
    Show(TnoArgs),
    /// Add an entry to the ledger.
    Insert(InsertArgs),
    /// Remove an entry from the ledger by its transaction number.
    Delete(TnoArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the ledger and configuration are held. Defaults to ~/daily-sales
    #[arg(long, env = "SALES_HOME", default_value_t = default_sales_home())]
    sales_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn sales_home(&self) -> &DisplayPath {
        &self.sales_home
    }
}

/// Args for the `init` and `serve` commands.
#[derive(Debug, Parser, Clone, Default)]
pub struct BindArgs {
    /// The address for the HTTP server, e.g. 0.0.0.0:5000. For `init` this is saved to the
    /// config file; for `serve` it overrides the config file.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

impl BindArgs {
    pub fn bind(&self) -> Option<SocketAddr> {
        self.bind
    }
}

/// Args for commands that take a transaction number.
#[derive(Debug, Parser, Clone)]
pub struct TnoArgs {
    /// The transaction number.
    tno: Tno,
}

impl TnoArgs {
    pub fn new(tno: Tno) -> Self {
        Self { tno }
    }

    pub fn tno(&self) -> Tno {
        self.tno
    }
}

/// Args for the `insert` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertArgs {
    /// The date of the sale, e.g. 14/10/2026
    #[arg(long)]
    date: String,

    /// The shop the sale was made at
    #[arg(long)]
    shop: String,

    /// The item sold
    #[arg(long)]
    item: String,

    /// The total weight sold, in kilograms
    #[arg(long)]
    total_kg: String,

    /// Any additional field, as KEY=VALUE. May be repeated.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<Field>,
}

impl InsertArgs {
    pub fn new(
        date: impl Into<String>,
        shop: impl Into<String>,
        item: impl Into<String>,
        total_kg: impl Into<String>,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            date: date.into(),
            shop: shop.into(),
            item: item.into(),
            total_kg: total_kg.into(),
            fields,
        }
    }

    /// The entry as a `Submission`, with the additional fields after the mandatory ones.
    pub fn submission(&self) -> Submission {
        let mut submission = Submission::default();
        submission.set("date", self.date.as_str());
        submission.set("shop", self.shop.as_str());
        submission.set("item", self.item.as_str());
        submission.set("total_kg", self.total_kg.as_str());
        for field in &self.fields {
            submission.set(field.key.as_str(), field.value.as_str());
        }
        submission
    }
}

/// A `KEY=VALUE` pair given on the command line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Field {
    key: String,
    value: String,
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .with_context(|| format!("Expected KEY=VALUE, got '{s}'"))?;
        let key = key.trim();
        anyhow::ensure!(!key.is_empty(), "The field name is empty in '{s}'");
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn default_sales_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("daily-sales"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --sales-home or SALES_HOME instead of relying on the default \
                directory. If you continue using the program right now, you may have problems!",
            );
            PathBuf::from("daily-sales")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    #[test]
    fn test_parse_insert() {
        let args = Args::try_parse_from([
            "daily-sales",
            "--sales-home",
            "/tmp/sales",
            "insert",
            "--date",
            "01/01/2024",
            "--shop",
            "A",
            "--item",
            "Rice",
            "--total-kg",
            "10",
            "--field",
            "rate=42.5",
            "--field",
            "note=paid = yes",
        ])
        .unwrap();
        assert_eq!(args.common().sales_home().path(), Path::new("/tmp/sales"));
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        let Command::Insert(insert) = args.command() else {
            panic!("expected insert, got {:?}", args.command());
        };
        let record = insert.submission().validate().unwrap();
        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, vec!["date", "shop", "item", "total_kg", "rate", "note"]);
        assert_eq!(record.get("note"), Some(&Value::from("paid = yes")));
    }

    #[test]
    fn test_parse_delete_and_serve() {
        let args = Args::try_parse_from(["daily-sales", "--log-level", "debug", "delete", "7"])
            .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert!(matches!(args.command(), Command::Delete(a) if a.tno() == 7));

        let args =
            Args::try_parse_from(["daily-sales", "serve", "--bind", "0.0.0.0:8000"]).unwrap();
        let Command::Serve(serve) = args.command() else {
            panic!("expected serve");
        };
        assert_eq!(serve.bind(), Some("0.0.0.0:8000".parse().unwrap()));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!(
            "a=b".parse::<Field>().unwrap(),
            Field {
                key: "a".into(),
                value: "b".into()
            }
        );
        assert!("novalue".parse::<Field>().is_err());
        assert!("=x".parse::<Field>().is_err());
    }
}

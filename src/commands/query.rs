//! Read-only command handlers.

use crate::args::TnoArgs;
use crate::commands::Out;
use crate::error::{Error, ErrorType, IntoResult};
use crate::model::{ItemMaster, Record, Tno};
use crate::{Config, Result};

/// Reports the transaction number the next entry will get.
pub async fn next(config: Config) -> Result<Out<Tno>> {
    let tno = config.ledger().next_tno().await;
    Ok(Out::new(format!("The next TNo is {tno}"), tno))
}

/// Lists the item names from the item master.
pub async fn items(config: Config) -> Result<Out<Vec<String>>> {
    let items = ItemMaster::load(config.items_path())
        .await
        .pub_result(ErrorType::Store)?
        .into_names();
    let message = if items.is_empty() {
        String::from("The item master is empty")
    } else {
        format!("{} items: {}", items.len(), items.join(", "))
    };
    Ok(Out::new(message, items))
}

/// Lists every entry in the ledger, one JSON object per line.
pub async fn list(config: Config) -> Result<Out<Vec<Record>>> {
    let records = config.ledger().read_all().await?;
    let mut message = format!(
        "{} entr{}",
        records.len(),
        if records.len() == 1 { "y" } else { "ies" }
    );
    for record in &records {
        message.push('\n');
        message.push_str(&to_json(record)?);
    }
    Ok(Out::new(message, records))
}

/// Shows the entry with the given transaction number.
pub async fn show(config: Config, args: TnoArgs) -> Result<Out<Record>> {
    let tno = args.tno();
    match config.ledger().read_one(tno).await? {
        Some(record) => Ok(Out::new(to_json(&record)?, record)),
        None => Err(Error::msg(
            ErrorType::NotFound,
            format!("No entry with TNo {tno}"),
        )),
    }
}

fn to_json(record: &Record) -> Result<String> {
    serde_json::to_string(record).pub_result(ErrorType::Internal)
}

//! Delete command handler.

use crate::args::TnoArgs;
use crate::commands::Out;
use crate::store::DeleteOutcome;
use crate::{Config, Result};

/// Deletes the entry with the given transaction number. Other entries keep their numbers.
///
/// Deleting a number that is not in the ledger is not an error; the outcome reports that zero
/// rows were removed.
pub async fn delete(config: Config, args: TnoArgs) -> Result<Out<DeleteOutcome>> {
    let tno = args.tno();
    let outcome = config.ledger().delete(tno).await?;
    let message = match outcome {
        DeleteOutcome::Deleted { removed: 0 } => format!("No entry with TNo {tno}, nothing deleted"),
        DeleteOutcome::Deleted { .. } => format!("Deleted entry TNo {tno}"),
        DeleteOutcome::NotFound => String::from("There is no ledger yet, nothing deleted"),
    };
    Ok(Out::new(message, outcome))
}

//! Insert command handler.

use crate::args::InsertArgs;
use crate::commands::Out;
use crate::model::{Submission, Tno};
use crate::store::Ledger;
use crate::{Config, Result};
use serde::Serialize;

/// The numbers reported after a successful insert.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Inserted {
    /// The transaction number given to the new entry.
    pub tno: Tno,
    /// The transaction number the following entry will get.
    pub next_tno: Tno,
}

/// Validates the entry described by `args` and appends it to the ledger.
pub async fn insert(config: Config, args: InsertArgs) -> Result<Out<Inserted>> {
    let mut ledger = config.ledger();
    let inserted = save(&mut ledger, args.submission()).await?;
    Ok(Out::new(
        format!("Saved entry with TNo {}", inserted.tno),
        inserted,
    ))
}

/// Validates `submission` and appends it to `ledger`. Nothing is written when validation fails.
pub(crate) async fn save(ledger: &mut Ledger, submission: Submission) -> Result<Inserted> {
    let record = submission.validate()?;
    let tno = ledger.append(record).await?;
    let next_tno = ledger.next_tno().await;
    Ok(Inserted { tno, next_tno })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_insert() {
        let env = TestEnv::new().await;
        let args = InsertArgs::new("01/01/2024", "A", "Rice", "10", Vec::new());
        let out = insert(env.config(), args).await.unwrap();
        assert_eq!(out.message(), "Saved entry with TNo 1");
        assert_eq!(out.structure(), Some(&Inserted { tno: 1, next_tno: 2 }));
        assert!(env.config().ledger_path().is_file());
    }

    #[tokio::test]
    async fn test_insert_validation_writes_nothing() {
        let env = TestEnv::new().await;
        let args = InsertArgs::new("01/01/2024", "", "Rice", "10", Vec::new());
        let err = insert(env.config(), args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert_eq!(err.to_string(), "shop is mandatory");
        assert!(!env.config().ledger_path().exists());
    }
}

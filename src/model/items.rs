use crate::error::Res;
use crate::utils;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// The read-only list of known item names, used to fill the item picker.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ItemMaster {
    names: Vec<String>,
}

impl ItemMaster {
    /// Builds the list from rows of cells. The first row is the header and is skipped. Only the
    /// first column is used; blank cells are dropped and duplicates keep their first position.
    pub fn parse<S, R>(cells: impl IntoIterator<Item = R>) -> Self
    where
        S: AsRef<str>,
        R: IntoIterator<Item = S>,
    {
        let mut seen = HashSet::new();
        let names = cells
            .into_iter()
            .skip(1)
            .filter_map(|row| row.into_iter().next().map(|s| s.as_ref().to_string()))
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect();
        Self { names }
    }

    /// Loads the item master CSV at `path`. No file means no items.
    pub async fn load(path: &Path) -> Res<Self> {
        match utils::read_csv(path).await? {
            Some(cells) => Ok(Self::parse(cells)),
            None => {
                debug!("No item master at {}", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_first_column_deduplicated() {
        let items = ItemMaster::parse(vec![
            vec!["Item Name", "Unit"],
            vec!["Rice", "kg"],
            vec!["Wheat", "kg"],
            vec!["", "kg"],
            vec!["Rice", "bag"],
            vec!["Sugar"],
        ]);
        assert_eq!(items.names(), &["Rice", "Wheat", "Sugar"]);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let items = ItemMaster::load(&dir.path().join("items_master.csv"))
            .await
            .unwrap();
        assert!(items.names().is_empty());
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items_master.csv");
        utils::write(&path, "Item\nRice\nDal\nRice\n").await.unwrap();
        let items = ItemMaster::load(&path).await.unwrap();
        assert_eq!(items.into_names(), vec!["Rice", "Dal"]);
    }
}

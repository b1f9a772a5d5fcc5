use crate::error::Res;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Res<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .context(format!("Unable to write to {}", path.to_string_lossy()))
}

/// Read a file to a `String`.
pub(crate) async fn read(path: &Path) -> Res<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Deserialize a JSON file into type `T`.
pub(crate) async fn deserialize<T>(path: &Path) -> Res<T>
where
    T: DeserializeOwned,
{
    let content = read(path).await?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Basically move a file. Renames `from` -> `to`.
pub(crate) async fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Res<()> {
    tokio::fs::rename(from.as_ref(), to.as_ref())
        .await
        .with_context(|| {
            format!(
                "Unable to move file from '{}' to '{}'",
                from.as_ref().to_string_lossy(),
                to.as_ref().to_string_lossy()
            )
        })
}

/// Create a directory and all of its parents if they do not exist.
pub(crate) async fn make_dir(p: impl AsRef<Path>) -> Res<()> {
    let p = p.as_ref();
    tokio::fs::create_dir_all(p)
        .await
        .with_context(|| format!("Unable to create directory at {}", p.to_string_lossy()))
}

pub(crate) async fn canonicalize(p: impl AsRef<Path>) -> Res<PathBuf> {
    let p = p.as_ref();
    tokio::fs::canonicalize(p)
        .await
        .with_context(|| format!("Unable to canonicalize the path {}", p.to_string_lossy()))
}

/// The names of the entries in directory `p`, sorted.
pub(crate) async fn list_dir(p: impl AsRef<Path>) -> Res<Vec<String>> {
    let p = p.as_ref();
    let mut dir = tokio::fs::read_dir(p)
        .await
        .with_context(|| format!("Unable to read directory {}", p.display()))?;
    let mut names = Vec::new();
    while let Some(entry) = dir
        .next_entry()
        .await
        .context("Failed to read directory entry")?
    {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

/// Reads a CSV file into rows of cells. The first row, if any, is the header row; it is returned
/// like any other row. Returns `None` when there is no file at `path`.
pub(crate) async fn read_csv(path: &Path) -> Res<Option<Vec<Vec<String>>>> {
    if !tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Unable to check for {}", path.display()))?
    {
        return Ok(None);
    }
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))?;
    let rows = parse_csv(&bytes).with_context(|| format!("Failed to parse CSV at {}", path.display()))?;
    Ok(Some(rows))
}

/// Parses CSV data into rows of cells, without treating the first row specially.
pub(crate) fn parse_csv(data: &[u8]) -> Res<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// Writes `rows` to `path` as CSV. The data goes to a temporary sibling file first, which is then
/// renamed over `path`, so readers see either the old or the new table.
pub(crate) async fn write_csv(path: &Path, rows: &[Vec<String>]) -> Res<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        wtr.write_record(row).context("Unable to encode CSV row")?;
    }
    let data = wtr.into_inner().context("Unable to finish CSV data")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            make_dir(parent).await?;
        }
    }
    let file_name = path
        .file_name()
        .with_context(|| format!("The path {} has no file name", path.display()))?
        .to_string_lossy();
    let tmp = path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()));
    write(&tmp, data).await?;
    rename(&tmp, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_csv_missing_file() {
        let dir = TempDir::new().unwrap();
        let rows = read_csv(&dir.path().join("nope.csv")).await.unwrap();
        assert!(rows.is_none());
    }

    #[tokio::test]
    async fn test_write_csv_creates_parent_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("ledger.csv");
        let rows = vec![
            vec!["TNo".to_string(), "shop".to_string()],
            vec!["1".to_string(), "Main St, Unit 2".to_string()],
        ];
        write_csv(&path, &rows).await.unwrap();

        let read_back = read_csv(&path).await.unwrap().unwrap();
        assert_eq!(rows, read_back);
        let names = list_dir(dir.path().join("data")).await.unwrap();
        assert_eq!(names, vec!["ledger.csv".to_string()]);
    }

    #[test]
    fn test_parse_csv_ragged_rows() {
        let rows = parse_csv(b"a,b,c\n1,2\n").unwrap();
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1], vec!["1".to_string(), "2".to_string()]);
    }
}

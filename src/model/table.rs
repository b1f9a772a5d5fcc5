use crate::error::Res;
use crate::model::record::{Record, Tno};
use crate::model::schema::Schema;
use crate::model::value::Value;
use anyhow::bail;
use std::collections::HashSet;

/// The ledger in memory: the column names and the rows, both in stored order.
///
/// The columns are the union of the fields of every record pushed into the table, in first-seen
/// order. A record that lacks one of the columns simply does not have that field.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from rows of cells, where the first row holds the column names. Column names
    /// are trimmed of surrounding whitespace. Empty cells are absent fields.
    ///
    /// Columns with a blank header are skipped, as are blank cells past the end of the header row,
    /// both of which spreadsheet programs tend to leave behind. An empty data set gives an empty
    /// table.
    pub fn parse<S, R>(cells: impl IntoIterator<Item = R>, schema: &Schema) -> Res<Self>
    where
        S: AsRef<str>,
        R: IntoIterator<Item = S>,
    {
        let mut rows = cells.into_iter();
        let headers: Vec<Option<String>> = match rows.next() {
            Some(header_row) => header_row
                .into_iter()
                .map(|h| {
                    let h = h.as_ref().trim();
                    (!h.is_empty()).then(|| h.to_string())
                })
                .collect(),
            None => return Ok(Self::new()),
        };

        let mut seen = HashSet::new();
        for column in headers.iter().flatten() {
            if !seen.insert(column.as_str()) {
                bail!("Encountered a duplicate column '{column}'");
            }
        }

        let mut table = Self {
            columns: headers.iter().flatten().cloned().collect(),
            rows: Vec::new(),
        };
        for (row_ix, row) in rows.enumerate() {
            let mut record = Record::new();
            for (col_ix, cell) in row.into_iter().enumerate() {
                let cell = cell.as_ref();
                match headers.get(col_ix) {
                    Some(Some(column)) => {
                        if let Some(value) = schema.parse_cell(column, cell) {
                            record.insert(column.clone(), value);
                        }
                    }
                    Some(None) => {}
                    None if cell.trim().is_empty() => {}
                    None => bail!(
                        "A row longer than the headers list was encountered at row {}",
                        row_ix + 2
                    ),
                }
            }
            table.rows.push(record);
        }
        Ok(table)
    }

    /// Serializes the table to rows of cells, header row first.
    pub fn to_cells(&self) -> Vec<Vec<String>> {
        let mut cells = Vec::with_capacity(self.rows.len() + 1);
        cells.push(self.columns.clone());
        for record in &self.rows {
            cells.push(
                self.columns
                    .iter()
                    .map(|column| record.get(column).map(Value::to_cell).unwrap_or_default())
                    .collect(),
            );
        }
        cells
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Adds `record` as the last row. Fields that are new to the table become new columns.
    pub fn push(&mut self, record: Record) {
        for name in record.names() {
            if !self.has_column(name) {
                self.columns.push(name.to_string());
            }
        }
        self.rows.push(record);
    }

    /// The first row whose `TNo` equals `tno`.
    pub fn find(&self, tno: Tno) -> Option<&Record> {
        self.rows.iter().find(|r| r.has_tno(tno))
    }

    /// Removes every row whose `TNo` equals `tno` and returns how many were removed. The column set
    /// is left as it was.
    pub fn remove(&mut self, tno: Tno) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| !r.has_tno(tno));
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::TNO;
    use rust_decimal::Decimal;

    fn parse(csv: &[&[&str]]) -> Res<Table> {
        Table::parse(csv.iter().map(|r| r.iter()), &Schema::default())
    }

    #[test]
    fn test_parse_trims_headers_and_skips_empty_cells() {
        let table = parse(&[
            &[" TNo ", "shop", "total_kg", "rate"],
            &["1", "A", "10.00", ""],
            &["2", "B", "", "3.50"],
        ])
        .unwrap();
        assert_eq!(table.columns(), &["TNo", "shop", "total_kg", "rate"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("rate"), None);
        assert_eq!(table.rows()[1].get("total_kg"), None);
        assert_eq!(
            table.rows()[1].get("rate"),
            Some(&Value::Number(Decimal::new(350, 2)))
        );
        assert!(table.find(2).is_some());
    }

    #[test]
    fn test_parse_empty() {
        let table = parse(&[]).unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());

        let table = parse(&[&["TNo", "shop"]]).unwrap();
        assert!(table.is_empty());
        assert!(table.has_column(TNO));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(parse(&[&["TNo", " TNo"], &["1", "2"]]).is_err());
        assert!(parse(&[&["TNo"], &["1", "extra"]]).is_err());
    }

    #[test]
    fn test_parse_skips_blank_header_columns() {
        let table = parse(&[&["TNo", "shop", "", " "], &["4", "A", "", "stray"]]).unwrap();
        assert_eq!(table.columns(), &["TNo", "shop"]);
        let names: Vec<&str> = table.rows()[0].names().collect();
        assert_eq!(names, vec!["TNo", "shop"]);
        assert_eq!(table.to_cells()[1], vec!["4", "A"]);
    }

    #[test]
    fn test_parse_allows_trailing_blank_cells() {
        let table = parse(&[&["TNo", "shop"], &["1", "A", ""], &["2", "B", " ", ""]]).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.find(2).is_some());
        assert!(parse(&[&["TNo", "shop"], &["1", "A", "", "x"]]).is_err());
    }

    #[test]
    fn test_push_unions_columns() {
        let mut table = Table::new();
        table.push([("TNo", Value::Integer(1)), ("shop", Value::from("A"))].into_iter().collect());
        table.push(
            [
                ("TNo", Value::Integer(2)),
                ("note", Value::from("late")),
                ("shop", Value::from("B")),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(table.columns(), &["TNo", "shop", "note"]);

        let cells = table.to_cells();
        assert_eq!(cells[0], vec!["TNo", "shop", "note"]);
        assert_eq!(cells[1], vec!["1", "A", ""]);
        assert_eq!(cells[2], vec!["2", "B", "late"]);
    }

    #[test]
    fn test_remove_counts_rows() {
        let mut table = parse(&[&["TNo", "shop"], &["1", "A"], &["2", "B"], &["2", "C"]]).unwrap();
        assert_eq!(table.remove(2), 2);
        assert_eq!(table.remove(7), 0);
        assert_eq!(table.len(), 1);
        assert!(table.find(1).is_some());
    }

    #[test]
    fn test_cells_round_trip() {
        let table = parse(&[&["TNo", "shop", "total_kg"], &["1", "A", "12.35"]]).unwrap();
        let again = Table::parse(table.to_cells(), &Schema::default()).unwrap();
        assert_eq!(table, again);
    }
}

//! Transaction number assignment.

use crate::model::{Table, Tno, TNO};
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

/// The number the next appended record should get: one more than the largest `TNo` in `table`,
/// truncating fractional values. Falls back to `1` when there is no table, no rows, no `TNo`
/// column, or no numeric `TNo` anywhere. Cells that are not numbers are ignored.
pub fn next_tno(table: Option<&Table>) -> Tno {
    let Some(table) = table else {
        return 1;
    };
    if table.is_empty() || !table.has_column(TNO) {
        return 1;
    }
    let Some(max) = table.rows().iter().filter_map(|r| r.tno()).max() else {
        return 1;
    };
    match max.floor().to_i128() {
        Some(n) if n >= 1 => match Tno::try_from(n + 1) {
            Ok(tno) => tno,
            Err(_) => {
                warn!("The largest TNo {max} is out of range, numbering restarts at 1");
                1
            }
        },
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Schema;

    fn table(rows: &[&[&str]]) -> Table {
        Table::parse(rows.iter().map(|r| r.iter()), &Schema::default()).unwrap()
    }

    #[test]
    fn test_no_table() {
        assert_eq!(next_tno(None), 1);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(next_tno(Some(&Table::new())), 1);
        assert_eq!(next_tno(Some(&table(&[&["TNo", "shop"]]))), 1);
    }

    #[test]
    fn test_no_tno_column() {
        assert_eq!(next_tno(Some(&table(&[&["shop"], &["A"]]))), 1);
    }

    #[test]
    fn test_max_plus_one_with_gaps() {
        let t = table(&[&["TNo", "shop"], &["1", "A"], &["2", "B"], &["5", "C"]]);
        assert_eq!(next_tno(Some(&t)), 6);
    }

    #[test]
    fn test_padded_header() {
        let t = table(&[&["  TNo ", "shop"], &["9", "A"]]);
        assert_eq!(next_tno(Some(&t)), 10);
    }

    #[test]
    fn test_junk_is_ignored() {
        let t = table(&[&["TNo"], &["abc"], &["n/a"]]);
        assert_eq!(next_tno(Some(&t)), 1);

        let t = table(&[&["TNo"], &["abc"], &["3"], &[""]]);
        assert_eq!(next_tno(Some(&t)), 4);
    }

    #[test]
    fn test_fractional_is_truncated() {
        let t = table(&[&["TNo"], &["7.9"], &["2"]]);
        assert_eq!(next_tno(Some(&t)), 8);
    }

    #[test]
    fn test_non_positive_restarts() {
        let t = table(&[&["TNo"], &["-4"], &["0"]]);
        assert_eq!(next_tno(Some(&t)), 1);
    }
}

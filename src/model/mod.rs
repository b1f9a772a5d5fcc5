//! Types that represent the core data model, such as `Record` and `Table`.
mod items;
mod record;
mod schema;
mod submission;
mod table;
mod value;

pub use items::ItemMaster;
pub use record::{Record, Tno, TNO};
pub use schema::{FieldKind, Schema};
pub use submission::{Submission, MANDATORY};
pub use table::Table;
pub use value::{Value, DECIMAL_PLACES};

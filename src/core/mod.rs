//! Text derivation for change records

pub mod dates;
pub mod layout;
pub mod lists;
pub mod record;
pub mod relations;
pub mod summary;

pub use dates::{date_line, format_date, format_date_str, ordinal};
pub use layout::{record_cells, RichCell, TextRun, TextStyle};
pub use lists::split_items;
pub use record::RecordFormatter;
pub use relations::{Classification, RelationClassifier};
pub use summary::SummaryBuilder;

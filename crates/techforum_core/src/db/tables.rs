//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// Every table maps an id to a bincode-encoded row.
pub type RowTable = TableDefinition<'static, &'static str, &'static [u8]>;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Question rows (`Question`).
pub const QUESTIONS: RowTable = TableDefinition::new("questions");
/// Answer rows (`Answer`).
pub const ANSWERS: RowTable = TableDefinition::new("answers");
/// Category rows (`Category`).
pub const CATEGORIES: RowTable = TableDefinition::new("categories");

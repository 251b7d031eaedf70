use rusqlite::types::Value;

/// Column positions in `SELECT * FROM everything`.
pub mod column {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    /// Present in the table but not consumed by lookups.
    pub const ASCII_NAME: usize = 2;
    pub const ADMIN_NAME: usize = 3;
    pub const COUNTRY_CODE: usize = 4;
    pub const COUNTRY_NAME: usize = 5;
    pub const LATITUDE: usize = 6;
    pub const LONGITUDE: usize = 7;
}

/// One candidate row exactly as SQLite returned it.
///
/// Values keep SQLite's dynamic typing; nothing here checks that a column
/// holds what the schema says it should.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<Value>,
}

impl FeatureRow {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Value at `index`, or `None` if the row is shorter than that.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

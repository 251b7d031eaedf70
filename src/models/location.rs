use serde::{Deserialize, Serialize};

/// The resolved feature, copied out of the gazetteer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDescription {
    pub id: i64,
    pub name: String,
    pub admin_name: String,
    pub country_code: String,
    pub country_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for LocationDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.admin_name.is_empty() {
            write!(f, "{}, {}", self.name, self.country_name)
        } else {
            write!(f, "{}, {}, {}", self.name, self.admin_name, self.country_name)
        }
    }
}

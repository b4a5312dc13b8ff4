use serde::{de, Deserialize, Deserializer};

/// Regulatory registration status of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ReraStatus {
    #[serde(alias = "registered", alias = "Yes", alias = "yes")]
    Registered,
    #[serde(
        alias = "Not Registered",
        alias = "not_registered",
        alias = "No",
        alias = "no"
    )]
    NotRegistered,
}

impl From<bool> for ReraStatus {
    fn from(registered: bool) -> Self {
        if registered {
            ReraStatus::Registered
        } else {
            ReraStatus::NotRegistered
        }
    }
}

/// A location cell as stored in the dataset: either the canonical name
/// or its label-encoded index into the location vocabulary
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawLocation {
    Code(usize),
    Name(String),
}

/// One dataset row before location decoding
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyRow {
    #[serde(rename = "Society Name")]
    pub society_name: String,
    #[serde(rename = "Location")]
    pub location: RawLocation,
    #[serde(rename = "BHK")]
    pub bhk: u8,
    #[serde(rename = "Price")]
    pub average_price: f64,
    #[serde(rename = "Gym Available", deserialize_with = "flexible_bool")]
    pub gym_available: bool,
    #[serde(rename = "Swimming Pool Available", deserialize_with = "flexible_bool")]
    pub pool_available: bool,
    #[serde(rename = "RERA Status", default)]
    pub rera_status: Option<ReraStatus>,
}

/// A property record, immutable once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub society_name: String,
    pub location: String,
    pub bhk: u8,
    pub average_price: f64,
    pub gym_available: bool,
    pub pool_available: bool,
    pub rera_status: Option<ReraStatus>,
}

impl PropertyRow {
    /// Attaches the decoded canonical location to the row
    pub fn into_property(self, location: String) -> Property {
        Property {
            society_name: self.society_name,
            location,
            bhk: self.bhk,
            average_price: self.average_price,
            gym_available: self.gym_available,
            pool_available: self.pool_available,
            rera_status: self.rera_status,
        }
    }
}

/// Accepts `true`/`false`, `0`/`1`, or `"Yes"`/`"No"` as exported by spreadsheets
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Cell::deserialize(deserializer)? {
        Cell::Bool(value) => Ok(value),
        Cell::Int(0) => Ok(false),
        Cell::Int(1) => Ok(true),
        Cell::Int(other) => Err(de::Error::custom(format!(
            "expected 0 or 1, got {}",
            other
        ))),
        Cell::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Ok(true),
            "no" | "false" | "0" => Ok(false),
            _ => Err(de::Error::custom(format!("expected yes or no, got {:?}", text))),
        },
    }
}

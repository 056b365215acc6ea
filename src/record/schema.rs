//! Record and field value definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

static NULL: FieldValue = FieldValue::Null;

/// A scalar field value as it arrived from the source.
///
/// Equality is exact: `Number(0)` and `String("0")` are different values,
/// and so are `28` and `28.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl FieldValue {
    /// Convert a JSON value, returning `None` for arrays and objects
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Null renders as an empty string (table cells, CSV)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One flat entry of the dataset (a user/device/vehicle profile)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures
    pub fn with(mut self, field: impl AsRef<str>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl AsRef<str>, value: impl Into<FieldValue>) {
        self.fields
            .insert(field.as_ref().to_string(), value.into());
    }

    /// Value of `field`; absent fields read as `FieldValue::Null`
    pub fn get(&self, field: impl AsRef<str>) -> &FieldValue {
        self.fields.get(field.as_ref()).unwrap_or(&NULL)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut FieldValue> {
        self.fields.values_mut()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Fields the dashboard knows how to display and filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Username,
    Zone,
    DeviceBrand,
    VehicleBrand,
    VehicleCc,
    SdkInt,
}

impl Field {
    /// Table/CSV column order
    pub const ALL: [Field; 6] = [
        Field::Username,
        Field::Zone,
        Field::DeviceBrand,
        Field::SdkInt,
        Field::VehicleBrand,
        Field::VehicleCc,
    ];

    /// Fields offered as filter dropdowns
    pub const FILTERABLE: [Field; 5] = [
        Field::Zone,
        Field::DeviceBrand,
        Field::VehicleBrand,
        Field::VehicleCc,
        Field::SdkInt,
    ];

    /// Key used in the upstream records
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Zone => "zone",
            Field::DeviceBrand => "device_brand",
            Field::VehicleBrand => "vehicle_brand",
            Field::VehicleCc => "vehicle_cc",
            Field::SdkInt => "sdk_int",
        }
    }

    /// Human column title
    pub fn title(&self) -> &'static str {
        match self {
            Field::Username => "Name",
            Field::Zone => "Zone",
            Field::DeviceBrand => "Device Brand",
            Field::VehicleBrand => "Vehicle Brand",
            Field::VehicleCc => "Vehicle CC",
            Field::SdkInt => "SDK Version",
        }
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_field_reads_as_null() {
        let record = Record::new().with("zone", "A");
        assert!(record.get("sdk_int").is_null());
        assert_eq!(record.get(Field::Zone), &FieldValue::from("A"));
    }

    #[test]
    fn test_number_and_string_are_distinct() {
        assert_ne!(FieldValue::from(0i64), FieldValue::from("0"));
        let float: FieldValue = serde_json::from_str("28.0").unwrap();
        assert_ne!(float, FieldValue::from(28i64));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("device-brand".parse::<Field>().unwrap(), Field::DeviceBrand);
        assert_eq!("SDK_INT".parse::<Field>().unwrap(), Field::SdkInt);
        assert!("colour".parse::<Field>().is_err());
    }

    #[test]
    fn test_null_displays_empty() {
        assert_eq!(FieldValue::Null.to_string(), "");
        assert_eq!(FieldValue::from(150i64).to_string(), "150");
    }
}

use serde::{Deserialize, Serialize};

/// Car manufacturer, referenced by exactly one column of a car row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manufacturer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub country: String,
}

impl Manufacturer {
    /// Create a manufacturer that has not been persisted yet
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: country.into(),
        }
    }

    /// Create a manufacturer with a known store id
    pub fn with_id(id: i64, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, country)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "licenceNumber")]
    pub licence_number: String,
}

impl Driver {
    pub fn new(name: impl Into<String>, licence_number: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            licence_number: licence_number.into(),
        }
    }

    pub fn with_id(id: i64, name: impl Into<String>, licence_number: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, licence_number)
        }
    }
}

/// Car aggregate: the car row, its manufacturer and every associated driver
///
/// The id is assigned by the store on creation. Cars read back from the
/// store list their drivers ordered by driver id; duplicates are not
/// filtered out.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Car {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub model: String,
    pub manufacturer: Manufacturer,
    #[serde(default)]
    pub drivers: Vec<Driver>,
}

impl Car {
    pub fn new(model: impl Into<String>, manufacturer: Manufacturer, drivers: Vec<Driver>) -> Self {
        Self {
            id: None,
            model: model.into(),
            manufacturer,
            drivers,
        }
    }

    /// Ids of the associated drivers, in order. Drivers without an id are skipped.
    pub fn driver_ids(&self) -> Vec<i64> {
        self.drivers.iter().filter_map(|d| d.id).collect()
    }
}

impl std::fmt::Display for Car {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "car {} ({})", id, self.model),
            None => write!(f, "new car ({})", self.model),
        }
    }
}

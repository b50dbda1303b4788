//! Vending machine records from the bundled dataset.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// One vending machine location.
///
/// Field names on the wire follow the bundled dataset (Finnish column names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendingMachine {
    #[serde(rename = "koordinaatti_LAT")]
    pub lat: f64,

    #[serde(rename = "koordinaatti_LON")]
    pub lon: f64,

    /// Street address, e.g. "Mannerheimintie 10"
    #[serde(rename = "katuosoite")]
    pub street_address: String,

    #[serde(rename = "postinumero")]
    pub postal_code: String,

    /// Postal locality (city), e.g. "HELSINKI"
    #[serde(rename = "postitoimipaikka")]
    pub postal_locality: String,
}

impl VendingMachine {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// "00100 HELSINKI"
    pub fn postal_line(&self) -> String {
        format!("{} {}", self.postal_code, self.postal_locality)
    }
}

/// The resolver's output: the winning machine and its distance from the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestResult {
    pub machine: VendingMachine,
    pub distance_km: f64,
}

impl NearestResult {
    /// Distance with two decimals, e.g. "1.23 km"
    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.distance_km)
    }
}

impl std::fmt::Display for NearestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lähin automaatti:")?;
        writeln!(f, "{}", self.machine.street_address)?;
        writeln!(f, "{}", self.machine.postal_line())?;
        write!(f, "Etäisyys: {}", self.distance_label())
    }
}

//! Concrete stop type carrying an opaque caller payload.

use serde::{Deserialize, Serialize};

use crate::traits::Stop;

/// Identity of an address, numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopId {
    Number(i64),
    Text(String),
}

impl From<i64> for StopId {
    fn from(value: i64) -> Self {
        StopId::Number(value)
    }
}

impl From<&str> for StopId {
    fn from(value: &str) -> Self {
        StopId::Text(value.to_string())
    }
}

impl From<String> for StopId {
    fn from(value: String) -> Self {
        StopId::Text(value)
    }
}

/// An address to visit.
///
/// `extra` holds whatever additional fields the caller attaches. The planner
/// never reads or modifies it; with serde it is flattened into the same
/// object as the known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StopId>,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(flatten)]
    pub extra: P,
}

/// Address with arbitrary JSON fields passed through.
pub type JsonAddress = Address<serde_json::Map<String, serde_json::Value>>;

impl<P: Default> Address<P> {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: None,
            address: address.into(),
            lat: None,
            lng: None,
            extra: P::default(),
        }
    }
}

impl<P> Address<P> {
    pub fn with_id(mut self, id: impl Into<StopId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn with_extra(mut self, extra: P) -> Self {
        self.extra = extra;
        self
    }
}

impl<P> Stop for Address<P> {
    type Id = StopId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }

    fn label(&self) -> &str {
        &self.address
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_coordinates_need_both_parts() {
        let mut addr = JsonAddress::new("Berlin");
        assert_eq!(addr.coordinates(), None);

        addr.lat = Some(52.52);
        assert_eq!(addr.coordinates(), None);

        addr.lng = Some(13.405);
        assert_eq!(addr.coordinates(), Some((52.52, 13.405)));
    }

    #[test]
    fn test_same_location_prefers_identity() {
        let a = JsonAddress::new("Berlin").with_id(1);
        let b = JsonAddress::new("Hamburg").with_id(1);
        let c = JsonAddress::new("Berlin").with_id(2);

        assert!(a.same_location(&b));
        assert!(!a.same_location(&c));
    }

    #[test]
    fn test_same_location_falls_back_to_label() {
        let a = JsonAddress::new("Berlin").with_id(1);
        let b = JsonAddress::new("Berlin");
        let c = JsonAddress::new("Munich");

        assert!(a.same_location(&b));
        assert!(!b.same_location(&c));
    }

    #[test]
    fn test_numeric_and_text_ids_differ() {
        let a = JsonAddress::new("x").with_id(7);
        let b = JsonAddress::new("x").with_id("7");
        assert!(!a.same_location(&b));
    }

    #[test]
    fn test_deserialize_keeps_extra_fields() {
        let value = json!({
            "id": "wish-42",
            "address": "Hauptstr. 1, Berlin",
            "lat": 52.5,
            "lng": 13.4,
            "status": "pending",
            "priority": 3
        });

        let addr: JsonAddress = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(addr.id, Some(StopId::Text("wish-42".to_string())));
        assert_eq!(addr.coordinates(), Some((52.5, 13.4)));
        assert_eq!(addr.extra.get("status"), Some(&json!("pending")));
        assert_eq!(addr.extra.get("priority"), Some(&json!(3)));

        let back = serde_json::to_value(&addr).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_deserialize_numeric_id_without_coordinates() {
        let addr: JsonAddress =
            serde_json::from_value(json!({ "id": 3, "address": "Munich" })).unwrap();
        assert_eq!(addr.id, Some(StopId::Number(3)));
        assert_eq!(addr.coordinates(), None);
        assert!(addr.extra.is_empty());
    }
}

//! Map clicks: a single click looks up the value under the cursor, a double
//! click opens a popup with the last looked-up value.
//!
//! A lookup belongs to the layer it was made on and is never shown once a
//! different layer is displayed.

use crate::feature::FeatureValue;
use crate::wms::LatLng;
use climact_core::catalog::Domain;

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub position: LatLng,
    pub value: String,
    pub unit: &'static str,
}

impl Popup {
    pub fn lines(&self) -> Vec<String> {
        let average = if self.unit.is_empty() {
            format!("Average: {}", self.value)
        } else {
            format!("Average: {} {}", self.value, self.unit)
        };
        vec![
            average,
            format!("Latitude: {:.2}", self.position.lat),
            format!("Longitude: {:.2}", self.position.lng),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Lookup {
    layer_key: String,
    point: LatLng,
    value: FeatureValue,
}

#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<Lookup>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_click(&mut self, layer_key: &str, point: LatLng, value: FeatureValue) {
        self.last = Some(Lookup {
            layer_key: layer_key.to_string(),
            point,
            value,
        });
    }

    pub fn last_value(&self) -> Option<&FeatureValue> {
        self.last.as_ref().map(|lookup| &lookup.value)
    }

    /// Forget the last lookup, e.g. after the layer changed.
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Popup for a double click at `point` on `layer_key`. Nothing is shown
    /// before any lookup, when the lookup was made on another layer, or when
    /// it found no applicable value.
    pub fn double_click(&self, layer_key: &str, point: LatLng, domain: Option<Domain>) -> Option<Popup> {
        let lookup = self.last.as_ref()?;
        if lookup.layer_key != layer_key || !lookup.value.is_applicable() {
            return None;
        }
        Some(Popup {
            position: point,
            value: lookup.value.to_string(),
            unit: domain.map(Domain::unit).unwrap_or(""),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::interpret_feature_value;

    const LISBON: LatLng = LatLng {
        lat: 38.7223,
        lng: -9.1393,
    };

    #[test]
    fn popup_after_lookup() {
        let mut clicks = ClickTracker::new();
        clicks.record_click("T2MEAN_hist", LISBON, interpret_feature_value("TEMPS", "Value: 290.41"));
        let popup = clicks.double_click("T2MEAN_hist", LISBON, Some(Domain::Temperature)).unwrap();
        assert_eq!(
            popup.lines(),
            vec!["Average: 17.3 °C", "Latitude: 38.72", "Longitude: -9.14"]
        );
    }

    #[test]
    fn no_popup_for_not_applicable() {
        let mut clicks = ClickTracker::new();
        clicks.record_click("KOPPEN_hist", LISBON, interpret_feature_value("KOPPEN", "Value: 31"));
        assert_eq!(clicks.last_value(), Some(&FeatureValue::NotApplicable));
        assert!(clicks.double_click("KOPPEN_hist", LISBON, Some(Domain::Koppen)).is_none());
    }

    #[test]
    fn no_popup_before_any_click() {
        let clicks = ClickTracker::new();
        assert!(clicks.double_click("T2MEAN_hist", LISBON, None).is_none());
    }

    #[test]
    fn lookup_from_another_layer_is_not_shown() {
        let mut clicks = ClickTracker::new();
        clicks.record_click("KOPPEN_hist", LISBON, interpret_feature_value("KOPPEN", "Value: 8"));
        assert!(clicks
            .double_click("T2MEAN_hist", LISBON, Some(Domain::Temperature))
            .is_none());
        assert!(clicks.double_click("KOPPEN_hist", LISBON, Some(Domain::Koppen)).is_some());
    }

    #[test]
    fn classification_popup_has_no_unit() {
        let mut clicks = ClickTracker::new();
        clicks.record_click("KOPPEN_hist", LISBON, interpret_feature_value("KOPPEN", "Value: 8"));
        let popup = clicks.double_click("KOPPEN_hist", LISBON, Some(Domain::Koppen)).unwrap();
        assert_eq!(popup.lines()[0], "Average: Csa");

        clicks.clear();
        assert!(clicks.last_value().is_none());
    }
}

//! Fixed catalog of selectable car features (wizard step 3).

use serde::Serialize;

/// One selectable feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogFeature {
    pub key: &'static str,
    pub label: &'static str,
    pub category: &'static str,
}

const fn feature(key: &'static str, label: &'static str, category: &'static str) -> CatalogFeature {
    CatalogFeature {
        key,
        label,
        category,
    }
}

/// The catalog. Keys are stable identifiers stored in listing documents.
pub const FEATURE_CATALOG: &[CatalogFeature] = &[
    // Comfort
    feature("air_conditioning", "Air conditioning", "comfort"),
    feature("climate_control", "Climate control", "comfort"),
    feature("heated_seats", "Heated seats", "comfort"),
    feature("ventilated_seats", "Ventilated seats", "comfort"),
    feature("leather_seats", "Leather seats", "comfort"),
    feature("sunroof", "Sunroof", "comfort"),
    feature("keyless_entry", "Keyless entry", "comfort"),
    feature("cruise_control", "Cruise control", "comfort"),
    // Safety
    feature("abs", "Anti-lock brakes", "safety"),
    feature("airbags", "Airbags", "safety"),
    feature("blind_spot_monitor", "Blind spot monitor", "safety"),
    feature("lane_assist", "Lane keeping assist", "safety"),
    feature("adaptive_cruise_control", "Adaptive cruise control", "safety"),
    feature("parking_sensors", "Parking sensors", "safety"),
    feature("rear_camera", "Rear camera", "safety"),
    feature("camera_360", "360° camera", "safety"),
    // Entertainment & connectivity
    feature("navigation", "Navigation system", "entertainment"),
    feature("bluetooth", "Bluetooth", "entertainment"),
    feature("apple_carplay", "Apple CarPlay", "entertainment"),
    feature("android_auto", "Android Auto", "entertainment"),
    feature("premium_audio", "Premium audio", "entertainment"),
    feature("usb_charging", "USB charging", "entertainment"),
    // Exterior
    feature("alloy_wheels", "Alloy wheels", "exterior"),
    feature("led_headlights", "LED headlights", "exterior"),
    feature("tow_hitch", "Tow hitch", "exterior"),
    feature("roof_rails", "Roof rails", "exterior"),
];

/// Look up a feature by key.
pub fn find(key: &str) -> Option<&'static CatalogFeature> {
    FEATURE_CATALOG.iter().find(|f| f.key == key)
}

pub fn is_known(key: &str) -> bool {
    find(key).is_some()
}

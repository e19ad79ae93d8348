//! Per-step form input schemas and validation.
//!
//! Each wizard step submits one of the structs below. Required fields carry
//! `#[serde(default)]` so that a missing field shows up as a field-level
//! validation message instead of an opaque deserialization failure.
//!
//! Submissions go through [`StepInput::prepare`]: parse, normalize (trim,
//! case-fold, de-duplicate), then validate. Nothing is written unless
//! `prepare` succeeds.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl};

use crate::feature_catalog;
use crate::field_errors::FieldErrors;
use crate::listing_wizard::WizardStep;

// ---------------------------------------------------------------------------
// Allowed values
// ---------------------------------------------------------------------------

pub const BODY_TYPES: &[&str] = &[
    "sedan",
    "hatchback",
    "suv",
    "coupe",
    "convertible",
    "wagon",
    "pickup",
    "van",
    "other",
];

pub const CONDITIONS: &[&str] = &["new", "used"];

pub const FUEL_TYPES: &[&str] = &["petrol", "diesel", "hybrid", "electric", "lpg", "other"];

pub const TRANSMISSIONS: &[&str] = &["manual", "automatic", "semi_automatic", "cvt"];

pub const DRIVETRAINS: &[&str] = &["fwd", "rwd", "awd", "4wd"];

/// Length of a vehicle identification number.
pub const VIN_LENGTH: usize = 17;

/// Maximum number of photos per listing.
pub const MAX_PHOTOS: usize = 30;

/// Currency applied when the pricing form leaves it blank.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Field name used for errors that are not tied to one input.
pub const FORM_FIELD: &str = "_form";

// ---------------------------------------------------------------------------
// Step 1: basic info
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BasicInfo {
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "make is required (at most 64 characters)"))]
    pub make: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "model is required (at most 64 characters)"))]
    pub model: String,
    #[serde(default)]
    #[validate(range(min = 1900, max = 2100, message = "year must be between 1900 and 2100"))]
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64, message = "trim must be at most 64 characters"))]
    pub trim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
}

impl BasicInfo {
    fn normalized(self) -> Self {
        Self {
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            trim: trimmed(self.trim),
            body_type: lowered(self.body_type),
            condition: lowered(self.condition),
            description: trimmed(self.description),
        }
    }

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        check_one_of(&mut errors, "body_type", self.body_type.as_deref(), BODY_TYPES);
        check_one_of(&mut errors, "condition", self.condition.as_deref(), CONDITIONS);
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Step 2: technical specifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Specifications {
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 2_000_000, message = "mileage_km must be at most 2000000"))]
    pub mileage_km: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 10_000, message = "engine_size_cc must be at most 10000"))]
    pub engine_size_cc: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 2_000, message = "power_hp must be at most 2000"))]
    pub power_hp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drivetrain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 7, message = "doors must be between 1 and 7"))]
    pub doors: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 12, message = "seats must be between 1 and 12"))]
    pub seats: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32, message = "exterior_color must be at most 32 characters"))]
    pub exterior_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32, message = "interior_color must be at most 32 characters"))]
    pub interior_color: Option<String>,
}

impl Specifications {
    fn normalized(self) -> Self {
        Self {
            fuel_type: self.fuel_type.trim().to_ascii_lowercase(),
            transmission: self.transmission.trim().to_ascii_lowercase(),
            drivetrain: lowered(self.drivetrain),
            exterior_color: trimmed(self.exterior_color),
            interior_color: trimmed(self.interior_color),
            ..self
        }
    }

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        check_required_one_of(&mut errors, "fuel_type", &self.fuel_type, FUEL_TYPES);
        check_required_one_of(&mut errors, "transmission", &self.transmission, TRANSMISSIONS);
        check_one_of(&mut errors, "drivetrain", self.drivetrain.as_deref(), DRIVETRAINS);
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Step 3: features
// ---------------------------------------------------------------------------

/// Selected catalog features. Stored sorted and de-duplicated (a set).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSelection {
    #[serde(default)]
    pub features: Vec<String>,
}

impl FeatureSelection {
    fn normalized(self) -> Self {
        let mut features: Vec<String> = self
            .features
            .into_iter()
            .map(|f| f.trim().to_ascii_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
        features.sort();
        features.dedup();
        Self { features }
    }

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for key in self.features.iter().filter(|k| !feature_catalog::is_known(k)) {
            errors.add("features", format!("unknown feature '{key}'"));
        }
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Step 4: ownership & documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Ownership {
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    #[validate(range(max = 99, message = "previous_owners must be at most 99"))]
    pub previous_owners: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 16, message = "registration_number must be at most 16 characters"))]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub service_history: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accident_free: Option<bool>,
}

impl Ownership {
    fn normalized(self) -> Self {
        Self {
            vin: self.vin.trim().to_ascii_uppercase(),
            registration_number: trimmed(self.registration_number)
                .map(|r| r.to_ascii_uppercase()),
            ..self
        }
    }

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        if let Err(message) = check_vin(&self.vin) {
            errors.add("vin", message);
        }
        errors.into_result()
    }
}

/// Validate a (normalized, upper-case) VIN.
pub fn check_vin(vin: &str) -> Result<(), String> {
    if vin.is_empty() {
        return Err("vin is required".to_string());
    }
    if vin.chars().count() != VIN_LENGTH {
        return Err(format!("vin must be exactly {VIN_LENGTH} characters"));
    }
    if !vin.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err("vin may only contain letters and digits".to_string());
    }
    if vin.chars().any(|c| matches!(c, 'I' | 'O' | 'Q')) {
        return Err("vin may not contain the letters I, O or Q".to_string());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Step 5: pricing & payment terms
// ---------------------------------------------------------------------------

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Asking price and payment terms. Amounts are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Pricing {
    #[serde(default)]
    #[validate(range(min = 1, max = 100_000_000, message = "price must be between 1 and 100000000"))]
    pub price: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub negotiable: bool,
    #[serde(default)]
    pub financing_available: bool,
    #[serde(default)]
    pub lease_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "down_payment must not be negative"))]
    pub down_payment: Option<i64>,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            price: 0,
            currency: default_currency(),
            negotiable: false,
            financing_available: false,
            lease_available: false,
            down_payment: None,
        }
    }
}

impl Pricing {
    fn normalized(self) -> Self {
        let currency = self.currency.trim().to_ascii_uppercase();
        Self {
            currency: if currency.is_empty() {
                default_currency()
            } else {
                currency
            },
            ..self
        }
    }

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = derived(self);
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            errors.add("currency", "currency must be a 3-letter code");
        }
        if let Some(down) = self.down_payment {
            if self.price > 0 && down >= self.price {
                errors.add("down_payment", "down_payment must be less than price");
            }
        }
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Step 6: photos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSet {
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub cover_index: usize,
}

impl PhotoSet {
    fn normalized(self) -> Self {
        Self {
            photos: self
                .photos
                .into_iter()
                .map(|p| Photo {
                    url: p.url.trim().to_string(),
                    caption: trimmed(p.caption),
                })
                .collect(),
            cover_index: self.cover_index,
        }
    }

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.photos.is_empty() {
            errors.add("photos", "at least one photo is required");
        }
        if self.photos.len() > MAX_PHOTOS {
            errors.add("photos", format!("at most {MAX_PHOTOS} photos are allowed"));
        }
        let mut seen = std::collections::HashSet::new();
        for (i, photo) in self.photos.iter().enumerate() {
            let is_http = photo.url.starts_with("https://") || photo.url.starts_with("http://");
            if !is_http || !photo.url.validate_url() {
                errors.add(format!("photos[{i}].url"), "must be an http(s) URL");
            } else if !seen.insert(photo.url.as_str()) {
                errors.add(format!("photos[{i}].url"), "duplicate photo");
            }
            if photo.caption.as_deref().is_some_and(|c| c.chars().count() > 200) {
                errors.add(
                    format!("photos[{i}].caption"),
                    "caption must be at most 200 characters",
                );
            }
        }
        if !self.photos.is_empty() && self.cover_index >= self.photos.len() {
            errors.add("cover_index", "cover_index must point at one of the photos");
        }
        errors.into_result()
    }

    /// The photo shown on listing cards.
    pub fn cover(&self) -> Option<&Photo> {
        self.photos
            .get(self.cover_index)
            .or_else(|| self.photos.first())
    }
}

// ---------------------------------------------------------------------------
// Tagged step input
// ---------------------------------------------------------------------------

/// One step's form payload, tagged by step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "data", rename_all = "kebab-case")]
pub enum StepInput {
    BasicInfo(BasicInfo),
    Specifications(Specifications),
    Features(FeatureSelection),
    Ownership(Ownership),
    Pricing(Pricing),
    Photos(PhotoSet),
}

impl StepInput {
    /// Parse a raw form body for `step`.
    pub fn from_json(step: WizardStep, value: serde_json::Value) -> Result<Self, FieldErrors> {
        if !value.is_object() {
            return Err(FieldErrors::single(FORM_FIELD, "form data must be a JSON object"));
        }
        let parsed = match step {
            WizardStep::BasicInfo => serde_json::from_value(value).map(Self::BasicInfo),
            WizardStep::Specifications => serde_json::from_value(value).map(Self::Specifications),
            WizardStep::Features => serde_json::from_value(value).map(Self::Features),
            WizardStep::Ownership => serde_json::from_value(value).map(Self::Ownership),
            WizardStep::Pricing => serde_json::from_value(value).map(Self::Pricing),
            WizardStep::Photos => serde_json::from_value(value).map(Self::Photos),
        };
        parsed.map_err(|e| FieldErrors::single(FORM_FIELD, e.to_string()))
    }

    /// Parse, normalize and validate a form body. The only way user input
    /// becomes a writable `StepInput`.
    pub fn prepare(step: WizardStep, value: serde_json::Value) -> Result<Self, FieldErrors> {
        let input = Self::from_json(step, value)?.normalized();
        input.validate()?;
        Ok(input)
    }

    pub fn step(&self) -> WizardStep {
        match self {
            Self::BasicInfo(_) => WizardStep::BasicInfo,
            Self::Specifications(_) => WizardStep::Specifications,
            Self::Features(_) => WizardStep::Features,
            Self::Ownership(_) => WizardStep::Ownership,
            Self::Pricing(_) => WizardStep::Pricing,
            Self::Photos(_) => WizardStep::Photos,
        }
    }

    pub fn normalized(self) -> Self {
        match self {
            Self::BasicInfo(v) => Self::BasicInfo(v.normalized()),
            Self::Specifications(v) => Self::Specifications(v.normalized()),
            Self::Features(v) => Self::Features(v.normalized()),
            Self::Ownership(v) => Self::Ownership(v.normalized()),
            Self::Pricing(v) => Self::Pricing(v.normalized()),
            Self::Photos(v) => Self::Photos(v.normalized()),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        match self {
            Self::BasicInfo(v) => v.check(),
            Self::Specifications(v) => v.check(),
            Self::Features(v) => v.check(),
            Self::Ownership(v) => v.check(),
            Self::Pricing(v) => v.check(),
            Self::Photos(v) => v.check(),
        }
    }

    /// The sub-record payload as stored in the document store.
    pub fn data(&self) -> serde_json::Value {
        let value = match self {
            Self::BasicInfo(v) => serde_json::to_value(v),
            Self::Specifications(v) => serde_json::to_value(v),
            Self::Features(v) => serde_json::to_value(v),
            Self::Ownership(v) => serde_json::to_value(v),
            Self::Pricing(v) => serde_json::to_value(v),
            Self::Photos(v) => serde_json::to_value(v),
        };
        // Plain structs with string keys always serialize.
        value.unwrap_or(serde_json::Value::Null)
    }
}

/// Decode a raw form body. An empty or unreadable body is a form-level error.
pub fn parse_form(body: &[u8]) -> Result<serde_json::Value, FieldErrors> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FieldErrors::single(FORM_FIELD, "form data is required"));
    }
    serde_json::from_slice(body).map_err(|e| {
        FieldErrors::single(FORM_FIELD, format!("form data is not valid JSON: {e}"))
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn derived<T: Validate>(value: &T) -> FieldErrors {
    match value.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn lowered(value: Option<String>) -> Option<String> {
    trimmed(value).map(|v| v.to_ascii_lowercase())
}

fn check_one_of(errors: &mut FieldErrors, field: &str, value: Option<&str>, allowed: &[&str]) {
    if let Some(v) = value {
        if !allowed.contains(&v) {
            errors.add(field, format!("{field} must be one of: {}", allowed.join(", ")));
        }
    }
}

fn check_required_one_of(errors: &mut FieldErrors, field: &str, value: &str, allowed: &[&str]) {
    if value.is_empty() {
        errors.add(field, format!("{field} is required"));
    } else {
        check_one_of(errors, field, Some(value), allowed);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn prepare(step: WizardStep, value: serde_json::Value) -> Result<StepInput, FieldErrors> {
        StepInput::prepare(step, value)
    }

    // -- basic info --

    #[test]
    fn basic_info_minimal_is_valid() {
        let input = prepare(
            WizardStep::BasicInfo,
            json!({ "make": "Toyota", "model": "Corolla", "year": 2022 }),
        )
        .unwrap();
        assert_matches!(input, StepInput::BasicInfo(ref b) if b.make == "Toyota" && b.year == 2022);
        assert_eq!(input.step(), WizardStep::BasicInfo);
    }

    #[test]
    fn basic_info_reports_every_missing_field() {
        let errors = prepare(WizardStep::BasicInfo, json!({})).unwrap_err();
        assert!(errors.contains("make"));
        assert!(errors.contains("model"));
        assert!(errors.contains("year"));
    }

    #[test]
    fn basic_info_whitespace_make_is_missing() {
        let errors = prepare(
            WizardStep::BasicInfo,
            json!({ "make": "   ", "model": "Civic", "year": 2020 }),
        )
        .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["make"]);
    }

    #[test]
    fn basic_info_rejects_unknown_body_type() {
        let errors = prepare(
            WizardStep::BasicInfo,
            json!({ "make": "Ford", "model": "F-150", "year": 2019, "body_type": "spaceship" }),
        )
        .unwrap_err();
        assert!(errors.contains("body_type"));
    }

    #[test]
    fn basic_info_normalizes_optional_fields() {
        let input = prepare(
            WizardStep::BasicInfo,
            json!({ "make": " Ford ", "model": "Focus", "year": 2018, "body_type": "Hatchback", "trim": "  " }),
        )
        .unwrap();
        let StepInput::BasicInfo(info) = input else {
            panic!("expected basic info");
        };
        assert_eq!(info.make, "Ford");
        assert_eq!(info.body_type.as_deref(), Some("hatchback"));
        assert_eq!(info.trim, None);
    }

    #[test]
    fn wrong_json_type_is_a_form_error() {
        let errors = prepare(
            WizardStep::BasicInfo,
            json!({ "make": "Ford", "model": "Focus", "year": "new" }),
        )
        .unwrap_err();
        assert!(errors.contains(FORM_FIELD));

        let errors = prepare(WizardStep::Pricing, json!([1, 2])).unwrap_err();
        assert!(errors.contains(FORM_FIELD));
    }

    #[test]
    fn raw_form_bodies() {
        assert_eq!(parse_form(br#"{ "price": 1 }"#).unwrap(), json!({ "price": 1 }));
        assert!(parse_form(b"").unwrap_err().contains(FORM_FIELD));
        assert!(parse_form(b"  \n").unwrap_err().contains(FORM_FIELD));
        assert!(parse_form(b"{ not json").unwrap_err().contains(FORM_FIELD));
    }

    // -- specifications --

    #[test]
    fn specifications_minimal_is_valid() {
        assert!(prepare(
            WizardStep::Specifications,
            json!({ "fuel_type": "Petrol", "transmission": "automatic" }),
        )
        .is_ok());
    }

    #[test]
    fn specifications_require_fuel_and_transmission() {
        let errors = prepare(WizardStep::Specifications, json!({ "doors": 0 })).unwrap_err();
        assert!(errors.contains("fuel_type"));
        assert!(errors.contains("transmission"));
        assert!(errors.contains("doors"));
    }

    // -- features --

    #[test]
    fn features_are_deduplicated_and_sorted() {
        let input = prepare(
            WizardStep::Features,
            json!({ "features": ["sunroof", "ABS", "sunroof", " bluetooth "] }),
        )
        .unwrap();
        assert_eq!(
            input,
            StepInput::Features(FeatureSelection {
                features: vec!["abs".into(), "bluetooth".into(), "sunroof".into()],
            })
        );
    }

    #[test]
    fn features_outside_catalog_are_rejected() {
        let errors =
            prepare(WizardStep::Features, json!({ "features": ["abs", "hover_mode"] })).unwrap_err();
        assert_eq!(errors.messages("features"), ["unknown feature 'hover_mode'"]);
    }

    #[test]
    fn empty_feature_set_is_allowed() {
        assert!(prepare(WizardStep::Features, json!({ "features": [] })).is_ok());
    }

    // -- ownership --

    #[test]
    fn ownership_upper_cases_vin() {
        let input = prepare(
            WizardStep::Ownership,
            json!({ "vin": "1hgcm82633a004352", "previous_owners": 1 }),
        )
        .unwrap();
        assert_matches!(input, StepInput::Ownership(ref o) if o.vin == "1HGCM82633A004352");
    }

    #[test]
    fn vin_rules() {
        assert!(check_vin("1HGCM82633A004352").is_ok());
        assert!(check_vin("").is_err());
        assert!(check_vin("1HGCM82633A00435").is_err());
        assert!(check_vin("1HGCM82633A00435I").is_err());
        assert!(check_vin("1HGCM82633A00435-").is_err());
    }

    // -- pricing --

    #[test]
    fn pricing_defaults_currency() {
        let input = prepare(WizardStep::Pricing, json!({ "price": 18500 })).unwrap();
        assert_matches!(input, StepInput::Pricing(ref p) if p.currency == "USD" && !p.negotiable);
    }

    #[test]
    fn pricing_rejects_zero_price_and_large_down_payment() {
        let errors = prepare(WizardStep::Pricing, json!({ "price": 0 })).unwrap_err();
        assert!(errors.contains("price"));

        let errors = prepare(
            WizardStep::Pricing,
            json!({ "price": 10000, "down_payment": 10000, "currency": "eu" }),
        )
        .unwrap_err();
        assert!(errors.contains("down_payment"));
        assert!(errors.contains("currency"));
    }

    // -- photos --

    #[test]
    fn photos_minimal_is_valid() {
        let input = prepare(
            WizardStep::Photos,
            json!({ "photos": [{ "url": "https://cdn.example.com/a.jpg" }] }),
        )
        .unwrap();
        let StepInput::Photos(set) = input else {
            panic!("expected photos");
        };
        assert_eq!(set.cover().map(|p| p.url.as_str()), Some("https://cdn.example.com/a.jpg"));
    }

    #[test]
    fn photos_require_at_least_one() {
        let errors = prepare(WizardStep::Photos, json!({})).unwrap_err();
        assert!(errors.contains("photos"));
    }

    #[test]
    fn photos_report_index_of_bad_entry() {
        let errors = prepare(
            WizardStep::Photos,
            json!({
                "photos": [
                    { "url": "https://cdn.example.com/a.jpg" },
                    { "url": "ftp://cdn.example.com/b.jpg" },
                    { "url": "https://cdn.example.com/a.jpg" }
                ],
                "cover_index": 5
            }),
        )
        .unwrap_err();
        assert!(errors.contains("photos[1].url"));
        assert!(errors.contains("photos[2].url"));
        assert!(errors.contains("cover_index"));
        assert!(!errors.contains("photos[0].url"));
    }

    // -- tagged form --

    #[test]
    fn data_is_the_untagged_payload() {
        let input = prepare(WizardStep::Pricing, json!({ "price": 9000 })).unwrap();
        let data = input.data();
        assert_eq!(data["price"], 9000);
        assert!(data.get("step").is_none());

        let tagged = serde_json::to_value(&input).unwrap();
        assert_eq!(tagged["step"], "pricing");
        assert_eq!(tagged["data"]["price"], 9000);
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crop types the claims pipeline knows how to assess.
///
/// Wire labels match the claim-form dropdown exactly ("Bell Pepper" keeps
/// its space), so serialized values can be echoed straight back to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Tomato,
    Potato,
    Corn,
    Wheat,
    Rice,
    Soybean,
    Cotton,
    Grapes,
    Apple,
    #[serde(rename = "Bell Pepper")]
    BellPepper,
}

/// A crop label that does not match any supported crop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported crop type: {0}")]
pub struct UnknownCrop(pub String);

impl Crop {
    /// Every supported crop, in claim-form order.
    pub const ALL: [Crop; 10] = [
        Crop::Tomato,
        Crop::Potato,
        Crop::Corn,
        Crop::Wheat,
        Crop::Rice,
        Crop::Soybean,
        Crop::Cotton,
        Crop::Grapes,
        Crop::Apple,
        Crop::BellPepper,
    ];

    /// Display label as it appears on the claim form.
    pub fn label(&self) -> &'static str {
        match self {
            Crop::Tomato => "Tomato",
            Crop::Potato => "Potato",
            Crop::Corn => "Corn",
            Crop::Wheat => "Wheat",
            Crop::Rice => "Rice",
            Crop::Soybean => "Soybean",
            Crop::Cotton => "Cotton",
            Crop::Grapes => "Grapes",
            Crop::Apple => "Apple",
            Crop::BellPepper => "Bell Pepper",
        }
    }

    /// Parse a claim-form label, case-insensitively.
    pub fn from_label(label: &str) -> Result<Crop, UnknownCrop> {
        let trimmed = label.trim();
        Crop::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCrop(label.to_string()))
    }

    /// Insured value per hectare in INR, from the PMFBY-derived rate table.
    pub fn sum_insured_per_hectare(&self) -> f64 {
        match self {
            Crop::Rice => 80_000.0,
            Crop::Corn => 65_000.0,
            Crop::Wheat => 60_000.0,
            Crop::Tomato => 90_000.0,
            Crop::Potato => 85_000.0,
            Crop::Soybean => 55_000.0,
            Crop::Cotton => 75_000.0,
            Crop::Grapes => 250_000.0,
            Crop::Apple => 200_000.0,
            Crop::BellPepper => 95_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_serialization_uses_form_labels() {
        assert_eq!(serde_json::to_string(&Crop::Tomato).unwrap(), r#""Tomato""#);
        assert_eq!(
            serde_json::to_string(&Crop::BellPepper).unwrap(),
            r#""Bell Pepper""#
        );
    }

    #[test]
    fn crop_label_roundtrip() {
        for crop in Crop::ALL {
            assert_eq!(Crop::from_label(crop.label()), Ok(crop));
        }
    }

    #[test]
    fn from_label_is_case_insensitive() {
        assert_eq!(Crop::from_label("tomato"), Ok(Crop::Tomato));
        assert_eq!(Crop::from_label("BELL PEPPER"), Ok(Crop::BellPepper));
        assert_eq!(Crop::from_label("  Rice  "), Ok(Crop::Rice));
    }

    #[test]
    fn from_label_rejects_unknown() {
        let err = Crop::from_label("Durian").unwrap_err();
        assert_eq!(err, UnknownCrop("Durian".to_string()));
        assert!(err.to_string().contains("Durian"));
    }

    #[test]
    fn sum_insured_table() {
        assert_eq!(Crop::Rice.sum_insured_per_hectare(), 80_000.0);
        assert_eq!(Crop::Grapes.sum_insured_per_hectare(), 250_000.0);
        assert_eq!(Crop::BellPepper.sum_insured_per_hectare(), 95_000.0);
        for crop in Crop::ALL {
            assert!(crop.sum_insured_per_hectare() > 0.0);
        }
    }
}

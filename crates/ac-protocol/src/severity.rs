use serde::{Deserialize, Serialize};

/// Damage severity assigned by either inference tier.
///
/// Serialized with capitalized labels ("Low", "Medium", "High") to match
/// the vision model's response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Payout multiplier applied to the crop's insured value.
    pub fn multiplier(&self) -> f64 {
        match self {
            Severity::Low => 0.20,
            Severity::Medium => 0.45,
            Severity::High => 0.70,
        }
    }

    /// Parse a severity label tolerantly, case-insensitively.
    ///
    /// Model output is not guaranteed to stay inside the schema; anything
    /// unrecognized degrades to `Low` so payouts err on the conservative side.
    pub fn from_label_lenient(label: &str) -> Severity {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            _ => Severity::Low,
        }
    }

    /// Display label matching the wire form.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::Low).unwrap(), r#""Low""#);
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), r#""High""#);
    }

    #[test]
    fn multipliers() {
        assert_eq!(Severity::Low.multiplier(), 0.20);
        assert_eq!(Severity::Medium.multiplier(), 0.45);
        assert_eq!(Severity::High.multiplier(), 0.70);
    }

    #[test]
    fn lenient_parse_accepts_any_case() {
        assert_eq!(Severity::from_label_lenient("HIGH"), Severity::High);
        assert_eq!(Severity::from_label_lenient(" medium "), Severity::Medium);
    }

    #[test]
    fn lenient_parse_degrades_unknown_to_low() {
        assert_eq!(Severity::from_label_lenient("Severe"), Severity::Low);
        assert_eq!(Severity::from_label_lenient(""), Severity::Low);
    }
}

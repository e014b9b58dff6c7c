use strum_macros::{AsRefStr, Display, EnumIter};

pub const LOW_RISK_MAX: f64 = 40.0;
pub const MEDIUM_RISK_MAX: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Band of a displayed value. Values outside [0, 100] are not rejected:
    /// anything below zero is low, anything above 100 is high.
    pub fn from_value(value: f64) -> Self {
        if value <= LOW_RISK_MAX {
            RiskBand::Low
        } else if value <= MEDIUM_RISK_MAX {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskBand::Low => "#28a745",
            RiskBand::Medium => "#ffc107",
            RiskBand::High => "#dc3545",
        }
    }

    pub fn range_label(self) -> &'static str {
        match self {
            RiskBand::Low => "0 - 40%",
            RiskBand::Medium => "41 - 70%",
            RiskBand::High => "71 - 100%",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskBand::Low => "Everything looks fine.",
            RiskBand::Medium => "Attention needed.",
            RiskBand::High => "High risk.",
        }
    }
}

/// `12.3456` becomes `"12.35%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

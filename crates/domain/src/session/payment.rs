use serde::{Deserialize, Serialize};

/// Settlement state of a session, derived from the paid amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Paid in full
    Lunas,
    /// Partially paid
    Sebagian,
    /// Nothing paid yet
    #[serde(rename = "Belum Lunas")]
    BelumLunas,
}

impl PaymentStatus {
    /// Derive the status from the paid amount against the session total.
    ///
    /// `Lunas` requires a positive total: a zero-total session with money
    /// handed over still counts as `Sebagian`.
    pub fn derive(amount_paid: f64, total_amount: f64) -> Self {
        if amount_paid >= total_amount && total_amount > 0.0 {
            Self::Lunas
        } else if amount_paid > 0.0 {
            Self::Sebagian
        } else {
            Self::BelumLunas
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lunas => "Lunas",
            Self::Sebagian => "Sebagian",
            Self::BelumLunas => "Belum Lunas",
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Lunas)
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::BelumLunas
    }
}

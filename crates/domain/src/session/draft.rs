use chrono::{NaiveDate, NaiveTime};

use crate::error::{DomainError, Result};
use crate::session::{PaymentStatus, SessionData, SessionId, WeighingItem};

/// Identity and provenance of the record being re-edited.
#[derive(Debug, Clone)]
pub struct EditContext {
    pub id: SessionId,
    pub created_by: String,
    pub created_at: i64,
}

/// Form state of a session being entered or re-edited.
///
/// Derived values (net price, totals, payment status) are recomputed from
/// the raw inputs on every read; `build` freezes them into a `SessionData`
/// snapshot. Zero-weight rows are kept here as scratch space and dropped at
/// build time.
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    pub date: String,
    pub time: String,
    pub buyer: String,
    pub driver: String,
    pub base_price: f64,
    pub cn_amount: f64,
    pub items: Vec<WeighingItem>,
    pub amount_paid: f64,
    pub notes: String,
    pub editing: Option<EditContext>,
}

impl SessionDraft {
    /// Net price per kilogram: base price minus the CN deduction, floored at zero.
    pub fn final_price(&self) -> f64 {
        (self.base_price - self.cn_amount).max(0.0)
    }

    pub fn total_net_weight(&self) -> f64 {
        self.items.iter().map(|i| i.gross_weight).sum()
    }

    pub fn total_amount(&self) -> f64 {
        self.final_price() * self.total_net_weight()
    }

    /// Number of loads actually weighed (zero rows do not count).
    pub fn total_coli(&self) -> usize {
        self.items.iter().filter(|i| !i.is_empty()).count()
    }

    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::derive(self.amount_paid, self.total_amount())
    }

    fn validate(&self) -> Result<()> {
        if self.buyer.trim().is_empty() {
            return Err(DomainError::InvalidSession(
                "buyer name is required".to_string(),
            ));
        }
        if self.base_price <= 0.0 {
            return Err(DomainError::InvalidSession(
                "base price is required".to_string(),
            ));
        }
        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(DomainError::InvalidSession(format!(
                "date '{}' is not YYYY-MM-DD",
                self.date
            )));
        }
        if NaiveTime::parse_from_str(&self.time, "%H:%M").is_err() {
            return Err(DomainError::InvalidSession(format!(
                "time '{}' is not HH:MM",
                self.time
            )));
        }
        if self.items.iter().any(|i| i.gross_weight < 0.0) {
            return Err(DomainError::InvalidSession(
                "gross weight cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Freeze the draft into a persistable snapshot.
    ///
    /// `created_by`/`created_at` are stamped once: a re-edit carries the
    /// original values verbatim, a new record gets the current operator and
    /// clock.
    pub fn build(&self, operator: &str, now_millis: i64) -> Result<SessionData> {
        self.validate()?;

        let valid_items: Vec<WeighingItem> = self
            .items
            .iter()
            .filter(|i| !i.is_empty())
            .cloned()
            .collect();

        let (created_by, created_at) = match &self.editing {
            Some(ctx) => (ctx.created_by.clone(), ctx.created_at),
            None => (operator.to_string(), now_millis),
        };

        Ok(SessionData {
            date: self.date.clone(),
            time: self.time.clone(),
            buyer: self.buyer.clone(),
            driver: self.driver.clone(),
            base_price: self.base_price,
            cn_amount: self.cn_amount,
            final_price: self.final_price(),
            total_net_weight: self.total_net_weight(),
            total_amount: self.total_amount(),
            total_coli: valid_items.len(),
            items: valid_items,
            amount_paid: self.amount_paid,
            payment_status: self.payment_status(),
            notes: self.notes.clone(),
            created_by,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SessionDraft {
        SessionDraft {
            date: "2024-12-01".to_string(),
            time: "08:30".to_string(),
            buyer: "Budi".to_string(),
            driver: "B1234".to_string(),
            base_price: 1000.0,
            cn_amount: 0.0,
            items: vec![WeighingItem::new(1, 50.0)],
            amount_paid: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_payment_status_derivation() {
        // basePrice=1000, cn=0 => finalPrice=1000; weight 50 => total 50000
        let mut d = draft();
        assert_eq!(d.final_price(), 1000.0);
        assert_eq!(d.total_amount(), 50_000.0);

        d.amount_paid = 50_000.0;
        assert_eq!(d.payment_status(), PaymentStatus::Lunas);
        d.amount_paid = 30_000.0;
        assert_eq!(d.payment_status(), PaymentStatus::Sebagian);
        d.amount_paid = 0.0;
        assert_eq!(d.payment_status(), PaymentStatus::BelumLunas);
    }

    #[test]
    fn test_final_price_floors_at_zero() {
        let mut d = draft();
        d.cn_amount = 1500.0;
        assert_eq!(d.final_price(), 0.0);
    }

    #[test]
    fn test_build_filters_empty_rows() {
        let mut d = draft();
        d.items = vec![WeighingItem::new(1, 0.0), WeighingItem::new(2, 12.5)];

        let data = d.build("kasir@example.com", 1_700_000_000_000).unwrap();
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.items[0].gross_weight, 12.5);
        assert_eq!(data.total_coli, 1);
        assert_eq!(data.total_net_weight, 12.5);
    }

    #[test]
    fn test_build_stamps_new_record() {
        let data = draft().build("kasir@example.com", 42).unwrap();
        assert_eq!(data.created_by, "kasir@example.com");
        assert_eq!(data.created_at, 42);
    }

    #[test]
    fn test_build_preserves_provenance_on_edit() {
        let mut d = draft();
        d.editing = Some(EditContext {
            id: SessionId::parse("abc123").unwrap(),
            created_by: "admin@example.com".to_string(),
            created_at: 7,
        });

        let data = d.build("kasir@example.com", 42).unwrap();
        assert_eq!(data.created_by, "admin@example.com");
        assert_eq!(data.created_at, 7);
    }

    #[test]
    fn test_build_requires_buyer_and_price() {
        let mut d = draft();
        d.buyer = "  ".to_string();
        assert!(d.build("op", 0).is_err());

        let mut d = draft();
        d.base_price = 0.0;
        assert!(d.build("op", 0).is_err());
    }

    #[test]
    fn test_build_rejects_bad_formats() {
        let mut d = draft();
        d.date = "01-12-2024".to_string();
        assert!(d.build("op", 0).is_err());

        let mut d = draft();
        d.time = "8.30".to_string();
        assert!(d.build("op", 0).is_err());

        let mut d = draft();
        d.items = vec![WeighingItem::new(1, -1.0)];
        assert!(d.build("op", 0).is_err());
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded deposit: a per-unit amount and a unit count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(amount: f64, quantity: u32, note: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            quantity,
            note: note.into(),
            date,
        }
    }

    /// Derived value of this deposit.
    pub fn total(&self) -> f64 {
        self.amount * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_multiplies_amount_by_quantity() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let txn = Transaction::new(50.0, 2, "lunch money", date);
        assert_eq!(txn.total(), 100.0);
    }

    #[test]
    fn new_assigns_unique_ids() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let a = Transaction::new(1.0, 1, "", date);
        let b = Transaction::new(1.0, 1, "", date);
        assert_ne!(a.id, b.id);
    }
}

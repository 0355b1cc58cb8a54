use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered customer of the bank.
///
/// Records are immutable once registered. The tax id is the unique key; no
/// format is enforced on any field beyond trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub full_name: String,
    /// Display-only; no calendar semantics are attached to it.
    pub birth_date: String,
    pub tax_id: String,
    pub address: String,
}

/// Registration data as typed by the operator, before normalization.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub full_name: String,
    pub birth_date: String,
    pub tax_id: String,
    pub address: String,
}

impl NewCustomer {
    /// Normalizes the typed fields into a customer record.
    ///
    /// Trimming surrounding whitespace is the only normalization performed.
    pub fn into_customer(self) -> Customer {
        Customer {
            full_name: self.full_name.trim().to_string(),
            birth_date: self.birth_date.trim().to_string(),
            tax_id: self.tax_id.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.tax_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_trims_fields() {
        let customer = NewCustomer {
            full_name: "  Jane Roe ".to_string(),
            birth_date: " 01-02-1990".to_string(),
            tax_id: " 12345678900 ".to_string(),
            address: "1 Main St - Downtown - Springfield/ST  ".to_string(),
        }
        .into_customer();

        assert_eq!(customer.full_name, "Jane Roe");
        assert_eq!(customer.birth_date, "01-02-1990");
        assert_eq!(customer.tax_id, "12345678900");
        assert_eq!(customer.address, "1 Main St - Downtown - Springfield/ST");
    }

    #[test]
    fn test_customer_display() {
        let customer = NewCustomer {
            full_name: "Jane Roe".to_string(),
            birth_date: "01-02-1990".to_string(),
            tax_id: "12345678900".to_string(),
            address: "1 Main St".to_string(),
        }
        .into_customer();

        assert_eq!(format!("{customer}"), "Jane Roe (12345678900)");
    }
}

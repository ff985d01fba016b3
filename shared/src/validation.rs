//! Validation helpers for operator input
//!
//! The aggregation engine itself never validates; these are the checks the
//! form/handler layer applies before data reaches persistence.

use rust_decimal::Decimal;

use crate::models::ANONYMOUS_CUSTOMER;

/// Order and stock quantities must be positive
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Product prices may be zero (giveaways) but never negative
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Expense amounts must be strictly positive
pub fn validate_expense_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Expense amount must be positive");
    }
    Ok(())
}

/// Stock levels cannot go negative
pub fn validate_stock(stock: i32) -> Result<(), &'static str> {
    if stock < 0 {
        return Err("Stock cannot be negative");
    }
    Ok(())
}

/// Blank customer names fall back to the anonymous placeholder
pub fn normalize_customer_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => ANONYMOUS_CUSTOMER.to_string(),
    }
}

/// Validate a grid cell id (uppercase column letters + 1-based row)
pub fn validate_cell_id(id: &str) -> Result<(), &'static str> {
    if crate::grid::parse_cell_id(id).is_none() {
        return Err("Invalid cell id");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::from(10)).is_ok());
        assert!(validate_price(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_expense_amount() {
        assert!(validate_expense_amount(Decimal::from(1)).is_ok());
        assert!(validate_expense_amount(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_normalize_customer_name() {
        assert_eq!(normalize_customer_name(Some("Maya")), "Maya");
        assert_eq!(normalize_customer_name(Some("  ")), ANONYMOUS_CUSTOMER);
        assert_eq!(normalize_customer_name(None), ANONYMOUS_CUSTOMER);
    }

    #[test]
    fn test_validate_cell_id() {
        assert!(validate_cell_id("B12").is_ok());
        assert!(validate_cell_id("AA1").is_ok());
        assert!(validate_cell_id("b12").is_err());
        assert!(validate_cell_id("12B").is_err());
    }
}

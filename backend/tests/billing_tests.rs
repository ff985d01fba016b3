//! Billing aggregation tests
//!
//! Tests for the report figures including:
//! - Per-product rollups and overall totals
//! - Financial summary arithmetic
//! - QR payment split consistency

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::billing::{
    aggregate_overall_totals, aggregate_product_totals, compute_cash_in_bank,
    compute_financial_summary, sum_expenses,
};
use shared::models::{Expense, Order, Product};
use shared::types::PaymentMethod;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product(name: &str, price: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price: dec(price),
        stock: 100,
        created_at: Utc::now(),
    }
}

fn order(product_id: Uuid, quantity: i32, total: &str) -> Order {
    Order {
        id: Uuid::new_v4(),
        customer_name: "Anonymous".to_string(),
        product_id,
        quantity,
        total: dec(total),
        date: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        is_paid: true,
        was_unpaid: false,
        paid_with_qr: false,
    }
}

fn expense(amount: &str, method: PaymentMethod) -> Expense {
    Expense {
        id: Uuid::new_v4(),
        category: "Supplies".to_string(),
        amount: dec(amount),
        description: String::new(),
        date: Utc::now(),
        payment_method: method,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Rollup covers paid and unpaid orders, collected covers only paid
    #[test]
    fn test_rollup_counts_paid_and_unpaid() {
        let p = product("Chicken", "10");
        let mut unpaid = order(p.id, 2, "20");
        unpaid.is_paid = false;
        let orders = vec![order(p.id, 5, "50"), unpaid];

        let totals = aggregate_product_totals(&[p], &orders, |_| true);
        assert_eq!(totals[0].quantity, 7);
        assert_eq!(totals[0].amount, dec("70"));
        assert_eq!(totals[0].reclassified_to_paid, dec("50"));
    }

    /// Marking an unpaid order paid moves its total into the collected figure
    #[test]
    fn test_reclassification_moves_total_into_collected() {
        let p = product("Chicken", "10");
        let mut o = order(p.id, 2, "20");
        o.is_paid = false;
        o.was_unpaid = true;

        let before = aggregate_product_totals(std::slice::from_ref(&p), &[o.clone()], |_| true);
        assert_eq!(before[0].reclassified_to_paid, Decimal::ZERO);

        o.mark_paid(false);
        let after = aggregate_product_totals(&[p], &[o], |_| true);
        assert_eq!(after[0].reclassified_to_paid, dec("20"));
        assert_eq!(after[0].amount, before[0].amount);
    }

    /// QR collected at creation and QR collected later land in separate buckets
    #[test]
    fn test_qr_buckets_are_disjoint() {
        let p = product("Eggs", "15");
        let mut fresh = order(p.id, 1, "15");
        fresh.paid_with_qr = true;
        let mut late = order(p.id, 1, "15");
        late.paid_with_qr = true;
        late.was_unpaid = true;

        let totals = aggregate_product_totals(&[p], &[fresh, late], |_| true);
        assert_eq!(totals[0].paid_with_qr, dec("15"));
        assert_eq!(totals[0].unpaid_to_paid_qr, dec("15"));

        let overall = aggregate_overall_totals(&totals);
        assert_eq!(overall.digital_payments(), dec("30"));
    }

    /// Counter cash includes the opening balance, profit does not
    #[test]
    fn test_financial_summary_split() {
        let (cash_in_counter, net_profit) =
            compute_financial_summary(dec("1000"), dec("300"), dec("200"));
        assert_eq!(cash_in_counter, dec("900"));
        assert_eq!(net_profit, dec("700"));
    }

    /// Bank cash only sees online expenses
    #[test]
    fn test_cash_in_bank_ignores_cash_expenses() {
        let expenses = vec![
            expense("100", PaymentMethod::Cash),
            expense("60", PaymentMethod::Online),
        ];
        let online = sum_expenses(&expenses, |_| true, Some(PaymentMethod::Online));
        assert_eq!(compute_cash_in_bank(dec("500"), online), dec("440"));
    }

    /// A window with no activity produces all-zero figures
    #[test]
    fn test_empty_window() {
        let p = product("Rice", "80");
        let totals = aggregate_product_totals(&[p], &[order(Uuid::new_v4(), 1, "80")], |_| false);
        assert_eq!(totals[0].quantity, 0);
        assert_eq!(totals[0].amount, Decimal::ZERO);

        let overall = aggregate_overall_totals(&totals);
        let (cash, profit) = compute_financial_summary(overall.sales, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(cash, Decimal::ZERO);
        assert_eq!(profit, Decimal::ZERO);
    }

    /// Expenses above sales push both counter cash and profit negative
    #[test]
    fn test_loss_making_window() {
        let (cash, profit) = compute_financial_summary(dec("100"), dec("250"), dec("50"));
        assert_eq!(cash, dec("-100"));
        assert_eq!(profit, dec("-150"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn arb_amount() -> impl Strategy<Value = Decimal> {
        (0i64..100_000).prop_map(Decimal::from)
    }

    proptest! {
        /// Overall totals equal the sum of the per-product rollups
        #[test]
        fn prop_overall_is_sum_of_products(
            quantities in prop::collection::vec((1i32..50, 1i64..1000), 1..20)
        ) {
            let products: Vec<Product> = quantities
                .iter()
                .enumerate()
                .map(|(i, _)| product(&format!("P{i}"), "10"))
                .collect();
            let orders: Vec<Order> = products
                .iter()
                .zip(&quantities)
                .map(|(p, (q, t))| order(p.id, *q, &t.to_string()))
                .collect();

            let totals = aggregate_product_totals(&products, &orders, |_| true);
            let overall = aggregate_overall_totals(&totals);

            let quantity: i64 = totals.iter().map(|t| t.quantity).sum();
            let sales: Decimal = totals.iter().map(|t| t.amount).sum();
            prop_assert_eq!(overall.quantity, quantity);
            prop_assert_eq!(overall.sales, sales);
        }

        /// Collected value never exceeds gross sales
        #[test]
        fn prop_collected_bounded_by_sales(
            paid_flags in prop::collection::vec(any::<bool>(), 1..20)
        ) {
            let p = product("Chicken", "10");
            let orders: Vec<Order> = paid_flags
                .iter()
                .map(|&is_paid| {
                    let mut o = order(p.id, 1, "10");
                    o.is_paid = is_paid;
                    o
                })
                .collect();

            let totals = aggregate_product_totals(&[p], &orders, |_| true);
            prop_assert!(totals[0].reclassified_to_paid <= totals[0].amount);
        }

        /// QR buckets never overlap: their sum is the digital total
        #[test]
        fn prop_qr_buckets_partition_digital(
            flags in prop::collection::vec((any::<bool>(), any::<bool>()), 1..20)
        ) {
            let p = product("Eggs", "15");
            let orders: Vec<Order> = flags
                .iter()
                .map(|&(qr, was_unpaid)| {
                    let mut o = order(p.id, 1, "15");
                    o.paid_with_qr = qr;
                    o.was_unpaid = was_unpaid;
                    o
                })
                .collect();

            let totals = aggregate_product_totals(&[p], &orders, |_| true);
            let overall = aggregate_overall_totals(&totals);
            prop_assert_eq!(
                overall.digital_payments(),
                overall.paid_with_qr + overall.unpaid_to_paid_qr
            );
            prop_assert!(overall.digital_payments() <= overall.reclassified_to_paid);
        }

        /// cash_in_counter - opening_balance always equals net_profit
        #[test]
        fn prop_counter_cash_profit_identity(
            sales in arb_amount(),
            expenses in arb_amount(),
            opening in arb_amount()
        ) {
            let (cash, profit) = compute_financial_summary(sales, expenses, opening);
            prop_assert_eq!(cash - opening, profit);
        }
    }
}

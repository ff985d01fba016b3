//! Order model and payment lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer name recorded when the operator leaves the field blank
pub const ANONYMOUS_CUSTOMER: &str = "Anonymous";

/// A customer order.
///
/// `total` is frozen at creation (`price * quantity`) and only recomputed by
/// a full edit. `was_unpaid` is a one-way ratchet recording that the order
/// was ever unpaid; reporting uses it to tell "paid at creation" apart from
/// "unpaid, collected later" cash flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub product_id: Uuid,
    pub quantity: i32,
    pub total: Decimal,
    pub date: DateTime<Utc>,
    pub is_paid: bool,
    pub was_unpaid: bool,
    /// Only meaningful while `is_paid` is true
    pub paid_with_qr: bool,
}

/// Payment state derived from the order's flags
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Unpaid,
    PaidCash,
    PaidQr,
}

impl PaymentState {
    /// State encoded by an (is_paid, paid_with_qr) flag pair. The QR flag is
    /// ignored while unpaid.
    pub fn from_flags(is_paid: bool, paid_with_qr: bool) -> Self {
        if !is_paid {
            PaymentState::Unpaid
        } else if paid_with_qr {
            PaymentState::PaidQr
        } else {
            PaymentState::PaidCash
        }
    }
}

impl Order {
    /// Current payment state
    pub fn payment_state(&self) -> PaymentState {
        PaymentState::from_flags(self.is_paid, self.paid_with_qr)
    }

    /// Whether the status endpoint may move the order into `target`. The
    /// only exposed transition is into a paid state; nothing ever returns an
    /// order to unpaid.
    pub fn can_transition_to(&self, target: PaymentState) -> bool {
        target != PaymentState::Unpaid
    }

    /// Mark the order paid.
    ///
    /// Always forces the `was_unpaid` ratchet, even when the order was
    /// already paid. Downstream cash-flow reporting depends on this exact
    /// behavior, so it must not be "corrected" to only ratchet on a real
    /// unpaid-to-paid transition.
    pub fn mark_paid(&mut self, with_qr: bool) {
        self.is_paid = true;
        self.paid_with_qr = with_qr;
        self.was_unpaid = true;
    }

    /// Apply a full edit: customer, product and quantity may change, and the
    /// total is recomputed from the product price at edit time. Payment
    /// flags are untouched.
    pub fn apply_edit(
        &mut self,
        customer_name: String,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
    ) {
        self.customer_name = customer_name;
        self.product_id = product_id;
        self.quantity = quantity;
        self.total = unit_price * Decimal::from(quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(is_paid: bool, was_unpaid: bool, paid_with_qr: bool) -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_name: ANONYMOUS_CUSTOMER.to_string(),
            product_id: Uuid::new_v4(),
            quantity: 2,
            total: Decimal::from(20),
            date: Utc::now(),
            is_paid,
            was_unpaid,
            paid_with_qr,
        }
    }

    #[test]
    fn test_mark_paid_sets_ratchet() {
        let mut o = order(false, false, false);
        o.mark_paid(true);
        assert!(o.is_paid);
        assert!(o.paid_with_qr);
        assert!(o.was_unpaid);
    }

    #[test]
    fn test_mark_paid_ratchets_even_when_already_paid() {
        let mut o = order(true, false, false);
        o.mark_paid(false);
        assert!(o.is_paid);
        assert!(o.was_unpaid, "ratchet is forced on every mark_paid");
    }

    #[test]
    fn test_ratchet_survives_repeat_transitions() {
        let mut o = order(false, false, false);
        o.mark_paid(false);
        o.mark_paid(true);
        assert!(o.was_unpaid);
        assert_eq!(o.payment_state(), PaymentState::PaidQr);
    }

    #[test]
    fn test_payment_state_ignores_qr_flag_while_unpaid() {
        let o = order(false, true, true);
        assert_eq!(o.payment_state(), PaymentState::Unpaid);
    }

    #[test]
    fn test_transitions_to_unpaid_are_never_allowed() {
        let unpaid = order(false, false, false);
        assert!(unpaid.can_transition_to(PaymentState::PaidCash));
        assert!(unpaid.can_transition_to(PaymentState::PaidQr));
        assert!(!unpaid.can_transition_to(PaymentState::Unpaid));

        let paid = order(true, true, false);
        assert!(!paid.can_transition_to(PaymentState::Unpaid));
        assert!(paid.can_transition_to(PaymentState::PaidQr));
    }

    #[test]
    fn test_edit_recomputes_total_and_keeps_payment_flags() {
        let mut o = order(true, true, true);
        let product = Uuid::new_v4();
        o.apply_edit("Maya".to_string(), product, 3, Decimal::from(15));
        assert_eq!(o.total, Decimal::from(45));
        assert_eq!(o.product_id, product);
        assert!(o.is_paid && o.was_unpaid && o.paid_with_qr);
    }
}

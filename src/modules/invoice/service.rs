use super::repository::{Invoice, PaymentStatus};
use crate::modules::order_item::{repository::OrderLine, service::OrderSummary};
use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Printed in place of a payment method that was never chosen.
const UNSET_PAYMENT_METHOD: &str = "null";

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub payment_method: String,
    pub order_id: String,
    pub payment_status: PaymentStatus,
    pub payment_due_date: NaiveDateTime,
    pub payment_due: BigDecimal,
    pub table_number: Option<i32>,
    pub order_details: Vec<OrderLine>,
}

/// Combines an invoice with the first summary of its order. An order without
/// items owes nothing.
pub fn assemble_view(invoice: Invoice, summaries: Vec<OrderSummary>) -> InvoiceView {
    let (payment_due, table_number, order_details) = match summaries.into_iter().next() {
        Some(summary) => (
            summary.payment_due,
            summary.table_number,
            summary.order_items,
        ),
        None => (BigDecimal::zero(), None, vec![]),
    };

    InvoiceView {
        invoice_id: invoice.id,
        payment_method: invoice
            .payment_method
            .map(|method| method.to_string())
            .unwrap_or_else(|| UNSET_PAYMENT_METHOD.to_string()),
        order_id: invoice.order_id,
        payment_status: invoice.payment_status,
        payment_due_date: invoice.payment_due_date,
        payment_due,
        table_number,
        order_details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::invoice::repository::PaymentMethod;
    use chrono::Utc;
    use std::str::FromStr;

    fn invoice(payment_method: Option<PaymentMethod>) -> Invoice {
        let now = Utc::now().naive_utc();

        Invoice {
            id: "invoice-1".to_string(),
            order_id: "order-1".to_string(),
            payment_method,
            payment_status: PaymentStatus::Pending,
            payment_due_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    fn summary() -> OrderSummary {
        OrderSummary {
            payment_due: BigDecimal::from_str("13.50").unwrap(),
            total_count: 1,
            table_number: Some(4),
            order_items: vec![OrderLine {
                food_name: Some("Suya".to_string()),
                food_image: None,
                price: BigDecimal::from_str("13.50").unwrap(),
                quantity: 1,
                table_number: Some(4),
                table_id: Some("table-4".to_string()),
                order_id: "order-1".to_string(),
            }],
        }
    }

    #[test]
    fn carries_the_order_summary() {
        let view = assemble_view(invoice(Some(PaymentMethod::Card)), vec![summary()]);

        assert_eq!(view.invoice_id, "invoice-1");
        assert_eq!(view.order_id, "order-1");
        assert_eq!(view.payment_method, "CARD");
        assert_eq!(view.payment_due, BigDecimal::from_str("13.50").unwrap());
        assert_eq!(view.table_number, Some(4));
        assert_eq!(view.order_details.len(), 1);
    }

    #[test]
    fn unset_payment_method_reads_null() {
        let view = assemble_view(invoice(None), vec![summary()]);

        assert_eq!(view.payment_method, "null");
    }

    #[test]
    fn orders_without_items_owe_nothing() {
        let view = assemble_view(invoice(Some(PaymentMethod::Cash)), vec![]);

        assert_eq!(view.payment_due, BigDecimal::zero());
        assert_eq!(view.table_number, None);
        assert!(view.order_details.is_empty());
    }
}

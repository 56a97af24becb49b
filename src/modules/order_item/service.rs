use super::repository::{self, OrderLine};
use crate::utils::money::round_price;
use bigdecimal::{BigDecimal, Zero};
use itertools::Itertools;
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct OrderSummary {
    pub payment_due: BigDecimal,
    pub total_count: i64,
    pub table_number: Option<i32>,
    pub order_items: Vec<OrderLine>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type GroupKey = (String, Option<String>, Option<i32>);

fn line_total(line: &OrderLine) -> BigDecimal {
    BigDecimal::from(line.quantity) * &line.price
}

/// Groups lines by order and table, summing `quantity * price` per group.
pub fn group_lines(lines: Vec<OrderLine>) -> Vec<OrderSummary> {
    lines
        .into_iter()
        .into_group_map_by(|line| -> GroupKey {
            (
                line.order_id.clone(),
                line.table_id.clone(),
                line.table_number,
            )
        })
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|((_, _, table_number), order_items)| {
            let payment_due = order_items
                .iter()
                .map(line_total)
                .fold(BigDecimal::zero(), |total, amount| total + amount);

            OrderSummary {
                payment_due: round_price(&payment_due),
                total_count: order_items.len() as i64,
                table_number,
                order_items,
            }
        })
        .collect()
}

pub async fn items_by_order<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
) -> Result<Vec<OrderSummary>, Error> {
    repository::find_lines_by_order_id(e, order_id)
        .await
        .map(group_lines)
        .map_err(|_| Error::UnexpectedError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn decimal(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).unwrap()
    }

    fn line(order_id: &str, name: &str, price: &str, quantity: i32) -> OrderLine {
        OrderLine {
            food_name: Some(name.to_string()),
            food_image: None,
            price: decimal(price),
            quantity,
            table_number: Some(7),
            table_id: Some("table-7".to_string()),
            order_id: order_id.to_string(),
        }
    }

    #[test]
    fn sums_quantity_times_price() {
        let summaries = group_lines(vec![
            line("order-1", "Suya", "5.00", 2),
            line("order-1", "Zobo", "3.50", 1),
        ]);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].payment_due, decimal("13.50"));
        assert_eq!(summaries[0].total_count, 2);
        assert_eq!(summaries[0].table_number, Some(7));
        assert_eq!(summaries[0].order_items.len(), 2);
    }

    #[test]
    fn no_lines_produce_no_summaries() {
        assert!(group_lines(vec![]).is_empty());
    }

    #[test]
    fn lines_without_a_table_are_grouped_apart() {
        let mut orphan = line("order-1", "Suya", "5.00", 1);
        orphan.table_id = None;
        orphan.table_number = None;

        let summaries = group_lines(vec![line("order-1", "Zobo", "3.50", 2), orphan]);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].table_number, None);
        assert_eq!(summaries[0].payment_due, decimal("5.00"));
        assert_eq!(summaries[1].payment_due, decimal("7.00"));
    }

    #[test]
    fn payment_due_is_rounded_to_cents() {
        let summaries = group_lines(vec![line("order-1", "Suya", "0.333", 3)]);

        assert_eq!(summaries[0].payment_due, decimal("1.00"));
    }
}

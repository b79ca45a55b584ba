use chrono::{Duration, Utc};
use rotipang_api::models::Order;
use rotipang_api::services::report_service::{finance_stats, render_finance_csv};
use uuid::Uuid;

fn order(
    order_number: &str,
    customer_name: &str,
    total_amount: i64,
    payment_status: &str,
    days_ago: i64,
) -> Order {
    let created = Utc::now() - Duration::days(days_ago);
    Order {
        id: Uuid::new_v4(),
        order_number: order_number.to_string(),
        customer_name: customer_name.to_string(),
        customer_phone: "628123456789".to_string(),
        address: None,
        delivery_method: "pickup".to_string(),
        payment_method: "transfer".to_string(),
        payment_status: payment_status.to_string(),
        order_status: "pending".to_string(),
        total_amount,
        notes: None,
        pickup_time: None,
        created_at: created,
        updated_at: created,
    }
}

#[test]
fn finance_stats_count_paid_revenue_and_pending_amount() {
    let now = Utc::now();
    let orders = vec![
        order("RP-20260820-001", "Andi", 25000, "paid", 0),
        order("RP-20260818-002", "Budi", 40000, "paid", 2),
        order("RP-20260818-003", "Citra", 15000, "pending", 2),
        order("RP-20260817-004", "Dewi", 30000, "failed", 3),
    ];

    let stats = finance_stats(&orders, now);
    assert_eq!(stats.total_revenue, 65000);
    assert_eq!(stats.paid_orders, 2);
    assert_eq!(stats.pending_amount, 15000);
    // Only the paid order created today counts toward today's revenue.
    assert_eq!(stats.today_revenue, 25000);
}

#[test]
fn csv_export_joins_columns_without_quoting() {
    let orders = vec![order("RP-20260820-001", "Andi", 25000, "paid", 0)];
    let csv = render_finance_csv(&orders);
    let mut lines = csv.lines();

    assert_eq!(
        lines.next(),
        Some("date,order_number,customer_name,total_amount,payment_method,payment_status")
    );
    let row = lines.next().expect("one data row");
    let cols: Vec<&str> = row.split(',').collect();
    assert_eq!(cols.len(), 6);
    assert_eq!(cols[1], "RP-20260820-001");
    assert_eq!(cols[2], "Andi");
    assert_eq!(cols[3], "25000");
    assert_eq!(cols[4], "transfer");
    assert_eq!(cols[5], "paid");
}

// Embedded commas are not escaped, so such a row gains a column. This pins
// the current export behavior rather than asserting safety it does not have.
#[test]
fn csv_export_does_not_escape_embedded_commas() {
    let orders = vec![order("RP-20260820-002", "Putri, S.Kom", 10000, "pending", 0)];
    let csv = render_finance_csv(&orders);
    let row = csv.lines().nth(1).expect("one data row");
    assert_eq!(row.split(',').count(), 7);
    assert!(row.contains("Putri, S.Kom"));
}

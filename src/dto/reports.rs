use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Order;

/// Finance headline numbers. Revenue counts paid orders only; pending amount
/// is the outstanding total across orders still awaiting payment.
#[derive(Debug, Serialize, ToSchema)]
pub struct FinanceStats {
    pub total_revenue: i64,
    pub paid_orders: i64,
    pub pending_amount: i64,
    pub today_revenue: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinanceReport {
    pub stats: FinanceStats,
    pub transactions: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub today_revenue: i64,
    pub today_orders: i64,
    pub available_products: i64,
    pub recent_orders: Vec<Order>,
}

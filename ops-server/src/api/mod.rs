//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`departments`] - 部门管理接口 (含库存视图和调拨)
//! - [`sections`] - 部门区域管理接口
//! - [`inventory_items`] - 库存物品目录接口
//! - [`transfers`] - 调拨审计查询接口
//! - [`orders`] - 订单与结算接口
//! - [`discount_rules`] - 折扣规则管理接口
//! - [`employees`] - 员工管理接口
//! - [`cleaning_tasks`] - 清洁任务管理接口
//! - [`exchange_rates`] - 汇率管理接口
//! - [`tax_settings`] - 税务设置接口

pub mod health;

// Organization
pub mod departments;
pub mod sections;

// Inventory
pub mod inventory_items;
pub mod transfers;

// Orders
pub mod orders;

// Pricing
pub mod discount_rules;

// Staff & housekeeping
pub mod cleaning_tasks;
pub mod employees;

// Settings
pub mod exchange_rates;
pub mod tax_settings;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(departments::router())
        .merge(sections::router())
        .merge(inventory_items::router())
        .merge(transfers::router())
        .merge(orders::router())
        .merge(discount_rules::router())
        .merge(employees::router())
        .merge(cleaning_tasks::router())
        .merge(exchange_rates::router())
        .merge(tax_settings::router())
        .with_state(state)
}

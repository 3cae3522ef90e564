//! Database Models

// Serde helpers
pub mod serde_helpers;

// Organization
pub mod department;
pub mod section;

// Inventory
pub mod inventory_item;
pub mod stock_level;
pub mod transfer;

// Orders
pub mod order;

// Pricing
pub mod discount_rule;

// Staff
pub mod employee;

// Housekeeping
pub mod cleaning_task;

// Settings
pub mod exchange_rate;
pub mod tax_settings;

// Re-exports
pub use department::{Department, DepartmentCreate, DepartmentId, DepartmentUpdate};
pub use section::{DepartmentSection, SectionCreate, SectionUpdate};
pub use inventory_item::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
pub use stock_level::{StockLevel, StockLevelDetail, StockLevelUpsert};
pub use transfer::{StockTransfer, TransferDetail, TransferRequest, TransferStatus};
pub use order::{
    CancelPaymentRequest, Order, OrderCreate, OrderLine, OrderLineCreate, OrderStatus,
    PaymentMethod, PaymentRecord, PaymentStatus, SettleRequest, VoidRequest,
};
pub use discount_rule::{
    AdjustmentType, DiscountRule, DiscountRuleCreate, DiscountRuleUpdate, RuleScope,
};
pub use employee::{Employee, EmployeeCreate, EmployeeUpdate, EmploymentData};
pub use cleaning_task::{
    CleaningTask, CleaningTaskCreate, CleaningTaskUpdate, TaskStatus, TaskStatusRequest,
};
pub use exchange_rate::{ExchangeRate, ExchangeRateUpsert};
pub use tax_settings::{TaxSettings, TaxSettingsUpdate};

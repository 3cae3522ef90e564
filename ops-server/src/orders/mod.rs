//! Orders domain - 金额计算、折扣定价、结算
//!
//! - [`money`] - rust_decimal 精确货币运算
//! - [`pricing`] - 折扣规则匹配与订单合计
//! - [`settlement`] - 付款记录与订单状态流转

pub mod money;
pub mod pricing;
pub mod settlement;

use chrono::Utc;

/// Generate a receipt number: `R-YYYYMMDD-xxxxxx`
///
/// The uuid suffix keeps numbers unique without a counter; the date prefix
/// keeps them scannable on printed receipts.
pub fn new_receipt_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("R-{}-{}", date, &suffix[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_format() {
        let receipt = new_receipt_number();
        assert!(receipt.starts_with("R-"));
        assert_eq!(receipt.len(), "R-".len() + 8 + 1 + 6);

        // uuid-backed, two in a row must differ
        assert_ne!(new_receipt_number(), new_receipt_number());
    }
}

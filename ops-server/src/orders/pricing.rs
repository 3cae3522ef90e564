//! Discount pricing
//!
//! Matches active discount rules against an order and computes line and
//! order totals. Rules are selected once per order:
//!
//! - a rule applies when it is active, its validity window contains `now`,
//!   and its scope is GLOBAL or names the order's department;
//! - of the applicable non-stackable rules only the highest priority wins;
//!   all applicable stackable rules are applied on top.
//!
//! Amounts: percentage discounts are computed on each line's gross and
//! rounded half-up at 2 dp; fixed discounts are per line unit. A line's
//! discount is clamped so the line total never goes negative.

use rust_decimal::Decimal;
use surrealdb::RecordId;

use crate::db::models::{AdjustmentType, DiscountRule, OrderLine, RuleScope, TaxSettings};
use crate::orders::money::{round_money, to_decimal, to_f64};
use crate::utils::time::within_window;

/// Computed order totals
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount_total: f64,
    pub service_charge: f64,
    pub tax_total: f64,
    pub total: f64,
}

/// Select the rules that apply to an order of `department` at `now`
pub fn select_rules<'a>(
    rules: &'a [DiscountRule],
    department: &RecordId,
    now: i64,
) -> Vec<&'a DiscountRule> {
    let applicable = rules.iter().filter(|rule| {
        rule.is_active
            && within_window(now, rule.valid_from, rule.valid_until)
            && match rule.rule_scope {
                RuleScope::Global => true,
                RuleScope::Department => rule.department.as_ref() == Some(department),
            }
    });

    let mut winner: Option<&DiscountRule> = None;
    let mut selected: Vec<&DiscountRule> = Vec::new();
    for rule in applicable {
        if rule.is_stackable {
            selected.push(rule);
        } else if winner.is_none_or(|w| rule.priority > w.priority) {
            winner = Some(rule);
        }
    }
    if let Some(w) = winner {
        selected.insert(0, w);
    }
    selected
}

/// Per-unit or per-line discount amount of one rule on one line
fn rule_discount(rule: &DiscountRule, gross: Decimal, quantity: i64) -> Decimal {
    match rule.adjustment_type {
        AdjustmentType::Percentage => {
            round_money(gross * to_decimal(rule.adjustment_value) / Decimal::ONE_HUNDRED)
        }
        AdjustmentType::FixedAmount => {
            round_money(to_decimal(rule.adjustment_value) * Decimal::from(quantity))
        }
    }
}

/// Apply `rules` to the draft lines and compute order totals.
///
/// Lines arrive with `unit_price`/`quantity` set; their `discount_amount`
/// and `line_total` are filled in here.
pub fn price_order(
    lines: &mut [OrderLine],
    rules: &[&DiscountRule],
    tax: &TaxSettings,
) -> OrderTotals {
    let mut subtotal = Decimal::ZERO;
    let mut discount_total = Decimal::ZERO;

    for line in lines.iter_mut() {
        let gross = round_money(to_decimal(line.unit_price) * Decimal::from(line.quantity));

        let mut discount: Decimal = rules
            .iter()
            .map(|rule| rule_discount(rule, gross, line.quantity))
            .sum();
        // A discount can never push a line below zero
        if discount > gross {
            discount = gross;
        }

        line.discount_amount = to_f64(discount);
        line.line_total = to_f64(gross - discount);

        subtotal += gross;
        discount_total += discount;
    }

    let net = subtotal - discount_total;
    let service_charge = if tax.service_charge_rate > 0.0 {
        round_money(net * to_decimal(tax.service_charge_rate) / Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };
    let before_tax = net + service_charge;

    let rate = to_decimal(tax.tax_rate);
    let (tax_total, total) = if rate > Decimal::ZERO {
        if tax.prices_include_tax {
            // tax = gross * rate / (100 + rate), total unchanged
            let tax_total = round_money(before_tax * rate / (Decimal::ONE_HUNDRED + rate));
            (tax_total, before_tax)
        } else {
            let tax_total = round_money(before_tax * rate / Decimal::ONE_HUNDRED);
            (tax_total, before_tax + tax_total)
        }
    } else {
        (Decimal::ZERO, before_tax)
    };

    OrderTotals {
        subtotal: to_f64(subtotal),
        discount_total: to_f64(discount_total),
        service_charge: to_f64(service_charge),
        tax_total: to_f64(tax_total),
        total: to_f64(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::RecordId;

    fn dept(key: &str) -> RecordId {
        RecordId::from_table_key("department", key)
    }

    fn line(unit_price: f64, quantity: i64) -> OrderLine {
        OrderLine {
            line_id: "l1".to_string(),
            description: "Test".to_string(),
            item: None,
            unit_price,
            quantity,
            discount_amount: 0.0,
            line_total: 0.0,
        }
    }

    fn rule(
        name: &str,
        scope: RuleScope,
        department: Option<RecordId>,
        adjustment_type: AdjustmentType,
        value: f64,
    ) -> DiscountRule {
        DiscountRule {
            id: None,
            name: name.to_string(),
            description: None,
            rule_scope: scope,
            department,
            adjustment_type,
            adjustment_value: value,
            valid_from: None,
            valid_until: None,
            priority: 0,
            is_stackable: false,
            is_active: true,
            created_at: 0,
        }
    }

    fn no_tax() -> TaxSettings {
        TaxSettings {
            tax_rate: 0.0,
            ..TaxSettings::default()
        }
    }

    #[test]
    fn test_no_rules_no_tax() {
        let mut lines = vec![line(10.99, 3)];
        let totals = price_order(&mut lines, &[], &no_tax());
        assert_eq!(totals.subtotal, 32.97);
        assert_eq!(totals.discount_total, 0.0);
        assert_eq!(totals.total, 32.97);
        assert_eq!(lines[0].line_total, 32.97);
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        let r = rule(
            "10off",
            RuleScope::Global,
            None,
            AdjustmentType::Percentage,
            10.0,
        );
        // 10% of 10.05 = 1.005 → rounds to 1.01
        let mut lines = vec![line(10.05, 1)];
        let totals = price_order(&mut lines, &[&r], &no_tax());
        assert_eq!(lines[0].discount_amount, 1.01);
        assert_eq!(lines[0].line_total, 9.04);
        assert_eq!(totals.discount_total, 1.01);
        assert_eq!(totals.total, 9.04);
    }

    #[test]
    fn test_fixed_discount_is_per_unit() {
        let r = rule(
            "2off",
            RuleScope::Global,
            None,
            AdjustmentType::FixedAmount,
            2.0,
        );
        let mut lines = vec![line(10.0, 3)];
        let totals = price_order(&mut lines, &[&r], &no_tax());
        assert_eq!(lines[0].discount_amount, 6.0);
        assert_eq!(lines[0].line_total, 24.0);
        assert_eq!(totals.total, 24.0);
    }

    #[test]
    fn test_discount_clamped_to_line_gross() {
        let r = rule(
            "bigoff",
            RuleScope::Global,
            None,
            AdjustmentType::FixedAmount,
            15.0,
        );
        let mut lines = vec![line(10.0, 1)];
        let totals = price_order(&mut lines, &[&r], &no_tax());
        assert_eq!(lines[0].discount_amount, 10.0);
        assert_eq!(lines[0].line_total, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_select_rules_scope_and_window() {
        let bar = dept("bar");
        let pool = dept("pool");

        let global = rule(
            "global",
            RuleScope::Global,
            None,
            AdjustmentType::Percentage,
            5.0,
        );
        let bar_only = rule(
            "bar",
            RuleScope::Department,
            Some(bar.clone()),
            AdjustmentType::Percentage,
            10.0,
        );
        let pool_only = rule(
            "pool",
            RuleScope::Department,
            Some(pool.clone()),
            AdjustmentType::Percentage,
            10.0,
        );
        let mut expired = rule(
            "expired",
            RuleScope::Global,
            None,
            AdjustmentType::Percentage,
            50.0,
        );
        expired.valid_until = Some(1000);
        let mut inactive = rule(
            "inactive",
            RuleScope::Global,
            None,
            AdjustmentType::Percentage,
            50.0,
        );
        inactive.is_active = false;

        let rules = vec![global, bar_only, pool_only, expired, inactive];
        let selected = select_rules(&rules, &bar, 5000);

        // Non-stackable rules compete; only the winner survives
        assert_eq!(selected.len(), 1);
        // Equal priority keeps the first applicable winner
        assert_eq!(selected[0].name, "global");
    }

    #[test]
    fn test_select_rules_priority_and_stacking() {
        let bar = dept("bar");

        let mut low = rule(
            "low",
            RuleScope::Global,
            None,
            AdjustmentType::Percentage,
            5.0,
        );
        low.priority = 1;
        let mut high = rule(
            "high",
            RuleScope::Department,
            Some(bar.clone()),
            AdjustmentType::Percentage,
            10.0,
        );
        high.priority = 10;
        let mut stackable = rule(
            "stack",
            RuleScope::Global,
            None,
            AdjustmentType::FixedAmount,
            1.0,
        );
        stackable.is_stackable = true;

        let rules = vec![low, high, stackable];
        let selected = select_rules(&rules, &bar, 0);

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name, "high");
        assert_eq!(selected[1].name, "stack");
    }

    #[test]
    fn test_tax_inclusive() {
        let tax = TaxSettings {
            tax_rate: 21.0,
            prices_include_tax: true,
            ..TaxSettings::default()
        };
        let mut lines = vec![line(121.0, 1)];
        let totals = price_order(&mut lines, &[], &tax);
        // tax = 121 * 21/121 = 21, total stays 121
        assert_eq!(totals.tax_total, 21.0);
        assert_eq!(totals.total, 121.0);
    }

    #[test]
    fn test_tax_exclusive() {
        let tax = TaxSettings {
            tax_rate: 10.0,
            prices_include_tax: false,
            ..TaxSettings::default()
        };
        let mut lines = vec![line(50.0, 2)];
        let totals = price_order(&mut lines, &[], &tax);
        assert_eq!(totals.tax_total, 10.0);
        assert_eq!(totals.total, 110.0);
    }

    #[test]
    fn test_service_charge_on_net() {
        let tax = TaxSettings {
            tax_rate: 0.0,
            service_charge_rate: 10.0,
            ..TaxSettings::default()
        };
        let r = rule(
            "10off",
            RuleScope::Global,
            None,
            AdjustmentType::Percentage,
            10.0,
        );
        let mut lines = vec![line(100.0, 1)];
        let totals = price_order(&mut lines, &[&r], &tax);
        // net = 90, service = 9
        assert_eq!(totals.service_charge, 9.0);
        assert_eq!(totals.total, 99.0);
    }

    #[test]
    fn test_discounts_across_multiple_lines() {
        let r = rule(
            "10off",
            RuleScope::Global,
            None,
            AdjustmentType::Percentage,
            10.0,
        );
        let mut lines = vec![line(10.0, 2), line(5.5, 1), line(0.0, 3)];
        let totals = price_order(&mut lines, &[&r], &no_tax());
        assert_eq!(totals.subtotal, 25.5);
        assert_eq!(totals.discount_total, 2.55);
        assert_eq!(totals.total, 22.95);
        // Zero-price line stays zero
        assert_eq!(lines[2].discount_amount, 0.0);
        assert_eq!(lines[2].line_total, 0.0);
    }
}

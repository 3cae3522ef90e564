//! Order settlement
//!
//! 挂账订单的付款核算。所有函数直接修改内存中的订单，由调用方一次性
//! 落库 (订单行与付款内嵌，单记录写入即原子)。
//!
//! 不变量：有效付款合计永远不会超过订单总额 (容差 0.01)。

use shared::{AppError, ErrorCode};

use crate::db::models::{Order, OrderStatus, PaymentMethod, PaymentRecord, PaymentStatus};
use crate::orders::money::{exceeds_balance, is_payment_sufficient, sum_payments, to_decimal, to_f64};

/// Record a payment against an order.
///
/// Rejected when the order is voided, already fully paid, or when the
/// payment would push the paid amount past the total.
pub fn apply_payment(
    order: &mut Order,
    method: PaymentMethod,
    amount: f64,
    reference: Option<String>,
    now: i64,
) -> Result<(), AppError> {
    match order.status {
        OrderStatus::Void => {
            return Err(AppError::new(ErrorCode::OrderAlreadyVoided));
        }
        OrderStatus::Settled => {
            return Err(AppError::new(ErrorCode::OrderAlreadySettled));
        }
        OrderStatus::Open | OrderStatus::Deferred => {}
    }
    if order.payment_status == PaymentStatus::Paid {
        return Err(AppError::new(ErrorCode::OrderAlreadySettled));
    }

    if exceeds_balance(order.paid_amount, amount, order.total) {
        let remaining = to_f64(to_decimal(order.total) - to_decimal(order.paid_amount));
        return Err(AppError::new(ErrorCode::PaymentExceedsBalance)
            .with_detail("remaining", remaining)
            .with_detail("amount", amount));
    }

    order.payments.push(PaymentRecord {
        method,
        amount,
        reference,
        time: now,
        cancelled: false,
        cancel_reason: None,
    });

    refresh_payment_state(order, now);
    Ok(())
}

/// Cancel a previously recorded payment (by its index on the order).
///
/// A fully settled order drops back to DEFERRED when the cancellation
/// leaves it underpaid.
pub fn cancel_payment(
    order: &mut Order,
    index: usize,
    reason: String,
    now: i64,
) -> Result<(), AppError> {
    if order.status == OrderStatus::Void {
        return Err(AppError::new(ErrorCode::OrderAlreadyVoided));
    }

    let payment = order
        .payments
        .get_mut(index)
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound).with_detail("index", index))?;
    if payment.cancelled {
        return Err(AppError::new(ErrorCode::PaymentAlreadyCancelled));
    }

    payment.cancelled = true;
    payment.cancel_reason = Some(reason);

    refresh_payment_state(order, now);
    Ok(())
}

/// Void an order.
///
/// Settled orders and orders with live payments cannot be voided; cancel
/// the payments first.
pub fn void_order(order: &mut Order, reason: String, now: i64) -> Result<(), AppError> {
    match order.status {
        OrderStatus::Void => return Err(AppError::new(ErrorCode::OrderAlreadyVoided)),
        OrderStatus::Settled => {
            return Err(AppError::with_message(
                ErrorCode::BusinessRuleViolation,
                "Settled orders cannot be voided",
            ));
        }
        OrderStatus::Open | OrderStatus::Deferred => {}
    }
    if order.payments.iter().any(|p| !p.cancelled) {
        return Err(AppError::new(ErrorCode::OrderHasPayments));
    }

    order.status = OrderStatus::Void;
    order.voided_at = Some(now);
    order.void_reason = Some(reason);
    Ok(())
}

/// Recompute paid amount and the two status fields from the payment list.
fn refresh_payment_state(order: &mut Order, now: i64) {
    order.paid_amount = sum_payments(&order.payments);

    if order.paid_amount <= 0.0 {
        order.payment_status = PaymentStatus::Unpaid;
    } else if is_payment_sufficient(order.paid_amount, order.total) {
        order.payment_status = PaymentStatus::Paid;
    } else {
        order.payment_status = PaymentStatus::Partial;
    }

    match order.payment_status {
        PaymentStatus::Paid => {
            if order.status != OrderStatus::Settled {
                order.status = OrderStatus::Settled;
                order.settled_at = Some(now);
            }
        }
        PaymentStatus::Partial | PaymentStatus::Unpaid => {
            // A cancellation can knock a settled order back to deferred
            if order.status == OrderStatus::Settled {
                order.status = OrderStatus::Deferred;
                order.settled_at = None;
            }
        }
    }
}

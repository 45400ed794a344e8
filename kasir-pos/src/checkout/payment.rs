//! Payment validation

use rust_decimal::Decimal;

use super::CheckoutError;

/// Check a full payment and return the change owed
///
/// Paying exactly the total is valid and yields zero change.
pub fn validate_payment(total: Decimal, amount_paid: Decimal) -> Result<Decimal, CheckoutError> {
    if amount_paid < total {
        return Err(CheckoutError::InsufficientPayment {
            total,
            paid: amount_paid,
        });
    }
    Ok(amount_paid - total)
}

/// Split a credit-sale payment into (change, amount put on credit)
///
/// The down payment may be anything from zero upward; exactly one of the
/// two results is non-zero unless the payment matches the total.
pub fn split_credit_payment(total: Decimal, down_payment: Decimal) -> (Decimal, Decimal) {
    let change = (down_payment - total).max(Decimal::ZERO);
    let debt = (total - down_payment).max(Decimal::ZERO);
    (change, debt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_returned() {
        let change = validate_payment(Decimal::from(9000), Decimal::from(10_000)).unwrap();
        assert_eq!(change, Decimal::from(1000));
    }

    #[test]
    fn test_exact_payment() {
        let change = validate_payment(Decimal::from(9000), Decimal::from(9000)).unwrap();
        assert_eq!(change, Decimal::ZERO);
    }

    #[test]
    fn test_insufficient_payment() {
        let err = validate_payment(Decimal::from(9000), Decimal::from(5000)).unwrap_err();
        match err {
            CheckoutError::InsufficientPayment { total, paid } => {
                assert_eq!(total, Decimal::from(9000));
                assert_eq!(paid, Decimal::from(5000));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_credit_payment() {
        assert_eq!(
            split_credit_payment(Decimal::from(9000), Decimal::from(4000)),
            (Decimal::ZERO, Decimal::from(5000))
        );
        assert_eq!(
            split_credit_payment(Decimal::from(9000), Decimal::ZERO),
            (Decimal::ZERO, Decimal::from(9000))
        );
        assert_eq!(
            split_credit_payment(Decimal::from(9000), Decimal::from(10_000)),
            (Decimal::from(1000), Decimal::ZERO)
        );
    }
}

use rust_decimal::Decimal;

/// Cumulative confirmed deposits needed before an account may take tasks.
/// This first part of the deposits never counts toward the balance.
pub const UNLOCK_THRESHOLD: Decimal = Decimal::TEN;

/// Spendable balance derived from an account's lifetime sums.
///
/// Only deposits beyond [`UNLOCK_THRESHOLD`] contribute, and the result is
/// clamped at zero. Inputs are used as given; callers coerce missing sums to
/// zero before calling. Intermediate sums saturate at the `Decimal` bounds.
pub fn compute_balance(
    total_deposits: Decimal,
    total_task_rewards: Decimal,
    total_withdrawn: Decimal,
) -> Decimal {
    let deposit_contribution = total_deposits
        .saturating_sub(UNLOCK_THRESHOLD)
        .max(Decimal::ZERO);
    deposit_contribution
        .saturating_add(total_task_rewards)
        .saturating_sub(total_withdrawn)
        .max(Decimal::ZERO)
}

/// Whether cumulative confirmed deposits have reached the unlock threshold.
pub fn has_unlocked(total_deposits: Decimal) -> bool {
    total_deposits >= UNLOCK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn first_ten_contributes_nothing() {
        assert_eq!(compute_balance(d(10), d(0), d(0)), d(0));
        assert_eq!(compute_balance(d(10), d(5), d(0)), d(5));
    }

    #[test]
    fn known_balances() {
        assert_eq!(compute_balance(d(50), d(0), d(0)), d(40));
        assert_eq!(compute_balance(d(100), d(20), d(30)), d(80));
        assert_eq!(compute_balance(d(80), d(25), d(60)), d(35));
    }

    #[test]
    fn overdrawn_clamps_to_zero() {
        assert_eq!(compute_balance(d(20), d(5), d(30)), d(0));
        assert_eq!(compute_balance(d(0), d(0), d(1)), d(0));
    }

    #[test]
    fn deposits_below_threshold_do_not_go_negative() {
        assert_eq!(compute_balance(d(4), d(3), d(0)), d(3));
        assert_eq!(compute_balance(d(0), d(0), d(0)), d(0));
    }

    #[test]
    fn fractional_amounts_are_exact() {
        let deposits = Decimal::new(10_0001, 4); // 10.0001
        assert_eq!(
            compute_balance(deposits, Decimal::new(25, 1), Decimal::ZERO),
            Decimal::new(2_5001, 4)
        );
    }

    #[test]
    fn negative_inputs_are_used_as_given() {
        // -5 withdrawn behaves like an extra 5 credited
        assert_eq!(compute_balance(d(20), d(0), d(-5)), d(15));
    }

    #[test]
    fn extreme_inputs_saturate_instead_of_panicking() {
        assert_eq!(compute_balance(Decimal::MIN, d(0), d(0)), d(0));
        assert_eq!(compute_balance(d(0), d(0), Decimal::MIN), Decimal::MAX);
        assert_eq!(compute_balance(Decimal::MAX, Decimal::MAX, d(0)), Decimal::MAX);
        assert_eq!(compute_balance(d(10), d(0), Decimal::MAX), d(0));
        assert_eq!(compute_balance(d(0), Decimal::MIN, Decimal::MAX), d(0));
    }

    #[test]
    fn never_negative_and_monotonic() {
        let grid = [0, 1, 5, 9, 10, 11, 20, 50, 100];
        for &dep in &grid {
            for &rew in &grid {
                for &wd in &grid {
                    let base = compute_balance(d(dep), d(rew), d(wd));
                    assert!(base >= Decimal::ZERO);
                    assert!(compute_balance(d(dep + 7), d(rew), d(wd)) >= base);
                    assert!(compute_balance(d(dep), d(rew + 7), d(wd)) >= base);
                    assert!(compute_balance(d(dep), d(rew), d(wd + 7)) <= base);
                    assert_eq!(compute_balance(d(dep), d(rew), d(wd)), base);
                }
            }
        }
    }

    #[test]
    fn unlock_is_cumulative() {
        assert!(!has_unlocked(d(9)));
        assert!(has_unlocked(d(10)));
        assert!(has_unlocked(Decimal::new(4, 0) + Decimal::new(6, 0)));
    }
}

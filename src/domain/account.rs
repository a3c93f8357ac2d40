use rust_decimal::Decimal;

use crate::domain::Error;
use crate::domain::balance::{compute_balance, has_unlocked};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub total_deposits: Decimal,     // confirmed deposits
    pub total_task_rewards: Decimal, // approved submissions
    pub total_withdrawn: Decimal,    // completed withdrawals
    pub balance: Decimal,            // cached, see recompute
    pub has_deposited: bool,         // task participation unlocked
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

impl Account {
    pub fn new() -> Self {
        Self {
            total_deposits: Decimal::ZERO,
            total_task_rewards: Decimal::ZERO,
            total_withdrawn: Decimal::ZERO,
            balance: Decimal::ZERO,
            has_deposited: false,
        }
    }

    /// Overwrites the cached balance from the lifetime sums.
    /// `has_deposited` is sticky once set.
    pub fn recompute(&mut self) {
        self.balance = compute_balance(
            self.total_deposits,
            self.total_task_rewards,
            self.total_withdrawn,
        );
        if has_unlocked(self.total_deposits) {
            self.has_deposited = true;
        }
    }

    pub fn confirm_deposit(&mut self, amount: Decimal) -> Result<(), Error> {
        self.total_deposits = checked_total(self.total_deposits, amount, "deposits")?;
        self.recompute();
        Ok(())
    }

    pub fn credit_reward(&mut self, reward: Decimal) -> Result<(), Error> {
        self.total_task_rewards = checked_total(self.total_task_rewards, reward, "task rewards")?;
        self.recompute();
        Ok(())
    }

    pub fn complete_withdrawal(&mut self, amount: Decimal) -> Result<(), Error> {
        self.total_withdrawn = checked_total(self.total_withdrawn, amount, "withdrawals")?;
        self.recompute();
        Ok(())
    }
}

fn checked_total(total: Decimal, amount: Decimal, name: &'static str) -> Result<Decimal, Error> {
    total.checked_add(amount).ok_or(Error::Overflow(name))
}

//! Income, outcome and net totals over the ledger.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::dto::TransactionType;
use crate::error::{BalanceError, Error};
use crate::stores::{Store, Transaction};

/// Derived from the ledger on every request, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub income: Decimal,
    pub outcome: Decimal,
    /// `income - outcome`, negative when more went out than came in
    pub total: Decimal,
}

/// Folds transactions into a [`Balance`]. Transactions of any type other than
/// income or outcome are ignored.
///
/// Fails instead of wrapping when a sum leaves the range of [`Decimal`].
pub fn compute_balance<'a, I>(transactions: I) -> Result<Balance, BalanceError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, outcome) = transactions.into_iter().try_fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, outcome), tx| match tx.tx_type {
            TransactionType::Income => income
                .checked_add(tx.value)
                .map(|income| (income, outcome))
                .ok_or(BalanceError::IncomeOverflow),
            TransactionType::Outcome => outcome
                .checked_add(tx.value)
                .map(|outcome| (income, outcome))
                .ok_or(BalanceError::OutcomeOverflow),
            TransactionType::Other(_) => Ok((income, outcome)),
        },
    )?;
    Ok(Balance {
        income,
        outcome,
        total: income
            .checked_sub(outcome)
            .ok_or(BalanceError::TotalOverflow)?,
    })
}

/// Computes the balance of every transaction in `store`.
pub async fn balance<S: Store>(store: &S) -> Result<Balance, Error> {
    let transactions = store.find_all_transactions().await?;
    Ok(compute_balance(&transactions)?)
}

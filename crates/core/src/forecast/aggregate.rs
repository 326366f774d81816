//! Pure aggregation of occurrences against budgets and accounts.

use std::collections::{BTreeMap, HashMap};

use pennywise_shared::types::CategoryId;
use rust_decimal::Decimal;

use super::error::ForecastError;
use super::types::{
    AccountProjection, BudgetForecast, CategoryTotal, DateWindow, ForecastFilter, ForecastResult,
};
use crate::budget::{Budget, BudgetVariance};
use crate::records::{Account, Category, RecurringTransaction, Transaction, TransactionType};
use crate::recurrence::{Occurrence, expand};

/// Everything a forecast reads, already fetched.
#[derive(Debug, Clone, Default)]
pub struct ForecastInputs {
    /// One-off transactions.
    pub transactions: Vec<Transaction>,
    /// Recurring rules.
    pub recurring: Vec<RecurringTransaction>,
    /// Budgets intersecting the window.
    pub budgets: Vec<Budget>,
    /// Categories visible to the user.
    pub categories: Vec<Category>,
    /// The user's accounts.
    pub accounts: Vec<Account>,
}

type GroupKey = (CategoryId, TransactionType);

/// Expands every rule and folds the occurrences into a [`ForecastResult`].
///
/// # Errors
///
/// Returns `ForecastError::InvalidRule` when a rule cannot be expanded.
pub fn aggregate(
    window: DateWindow,
    inputs: &ForecastInputs,
    filter: &ForecastFilter,
) -> Result<ForecastResult, ForecastError> {
    let occurrences = collect_occurrences(window, inputs, filter)?;

    let mut groups: BTreeMap<GroupKey, Vec<&Occurrence>> = BTreeMap::new();
    for occurrence in &occurrences {
        groups
            .entry((occurrence.category_id, occurrence.transaction_type))
            .or_default()
            .push(occurrence);
    }

    let categories: HashMap<CategoryId, &Category> =
        inputs.categories.iter().map(|c| (c.id, c)).collect();

    let mut budgets = BTreeMap::new();
    let mut covered: BTreeMap<GroupKey, Vec<DateWindow>> = BTreeMap::new();
    for budget in &inputs.budgets {
        let Some(budget_id) = budget.id else {
            continue;
        };
        let Some(period) = window.intersect(budget.start_date, budget.end_date) else {
            continue;
        };

        let budget_type = budget.effective_type(categories.get(&budget.category_id).copied());
        let key = (budget.category_id, budget_type);
        covered.entry(key).or_default().push(period);

        let projected_actual: Decimal = groups
            .get(&key)
            .into_iter()
            .flatten()
            .filter(|o| period.contains(o.date))
            .map(|o| o.amount)
            .sum();
        let variance = BudgetVariance::for_type(budget_type, budget.amount, projected_actual);

        budgets.insert(
            budget_id,
            BudgetForecast {
                budget_id,
                category_id: budget.category_id,
                budget_type,
                limit: budget.amount,
                period_start: period.start(),
                period_end: period.end(),
                projected_actual,
                variance: variance.variance,
                utilization_percent: variance.utilization_percent,
                status: variance.status,
            },
        );
    }

    // Occurrences outside every budget period of their pair stay visible.
    let unbudgeted = groups
        .iter()
        .filter_map(|(&key, items)| {
            let periods = covered.get(&key).map_or(&[][..], Vec::as_slice);
            let loose: Vec<&&Occurrence> = items
                .iter()
                .filter(|o| !periods.iter().any(|p| p.contains(o.date)))
                .collect();
            (!loose.is_empty()).then(|| CategoryTotal {
                category_id: key.0,
                transaction_type: key.1,
                total: loose.iter().map(|o| o.amount).sum(),
                occurrences: loose.len(),
            })
        })
        .collect();

    Ok(ForecastResult {
        window_start: window.start(),
        window_end: window.end(),
        budgets,
        unbudgeted,
        accounts: project_accounts(&inputs.accounts, &occurrences, filter),
    })
}

fn collect_occurrences(
    window: DateWindow,
    inputs: &ForecastInputs,
    filter: &ForecastFilter,
) -> Result<Vec<Occurrence>, ForecastError> {
    let mut occurrences: Vec<Occurrence> = inputs
        .transactions
        .iter()
        .filter(|tx| window.contains(tx.date))
        .map(Occurrence::from)
        .collect();

    for rule in &inputs.recurring {
        occurrences.extend(expand(rule, window.start(), window.end())?);
    }

    if let Some(account_id) = filter.account_id {
        occurrences.retain(|o| o.account_id == account_id);
    }
    Ok(occurrences)
}

fn project_accounts(
    accounts: &[Account],
    occurrences: &[Occurrence],
    filter: &ForecastFilter,
) -> Vec<AccountProjection> {
    let mut projections: Vec<AccountProjection> = accounts
        .iter()
        .filter(|a| filter.account_id.is_none_or(|id| id == a.id))
        .map(|account| {
            let mut income = Decimal::ZERO;
            let mut expense = Decimal::ZERO;
            for o in occurrences.iter().filter(|o| o.account_id == account.id) {
                match o.transaction_type {
                    TransactionType::Income => income += o.amount,
                    TransactionType::Expense => expense += o.amount,
                }
            }
            let net_change = income - expense;

            AccountProjection {
                account_id: account.id,
                name: account.name.clone(),
                current_balance: account.balance,
                projected_income: income,
                projected_expense: expense,
                net_change,
                projected_balance: account.balance + net_change,
            }
        })
        .collect();

    projections.sort_by_key(|p| p.account_id);
    projections
}

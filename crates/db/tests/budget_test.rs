//! Integration tests for budget, category and transaction repositories.
//!
//! Run with `cargo test -p pennywise-db -- --ignored` against a live database.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use pennywise_core::budget::Budget;
use pennywise_core::forecast::ForecastService;
use pennywise_core::records::{
    Color, NewCategory, RecurringTransaction, Transaction, TransactionType,
};
use pennywise_core::recurrence::{Frequency, RecurrenceRule};
use pennywise_core::repository::{
    BudgetRepository as _, CategoryRepository as _, RepositoryError, TransactionRepository as _,
};
use pennywise_db::{AccountRepository, BudgetRepository, CategoryRepository, TransactionRepository};
use pennywise_shared::types::BudgetId;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_budget_crud_is_scoped_to_owner() {
    let db = common::connect().await;
    let owner = common::create_user(&db).await;
    let stranger = common::create_user(&db).await;
    let categories = CategoryRepository::new(db.clone());
    let budgets = BudgetRepository::new(db.clone());

    let category = categories
        .create(NewCategory {
            user_id: owner,
            name: "Dining".to_string(),
            category_type: TransactionType::Expense,
            color: Color::default(),
        })
        .await
        .expect("Failed to create category");

    let budget = Budget::new(owner, category.id, dec!(300), date(2026, 3, 1), date(2026, 3, 31))
        .expect("valid budget");
    let saved = budgets.save(budget).await.expect("Failed to save budget");
    let id = saved.id.expect("saved budget has an id");

    assert!(budgets.find_by_id(stranger, id).await.expect("query").is_none());
    assert!(matches!(
        budgets.delete(stranger, id).await,
        Err(RepositoryError::NotFound(_))
    ));

    let updated = budgets
        .save(Budget { amount: dec!(350), ..saved })
        .await
        .expect("Failed to update budget");
    assert_eq!(updated.amount, dec!(350));

    let overlapping = budgets
        .find_by_user_and_range(owner, date(2026, 3, 31), date(2026, 4, 30))
        .await
        .expect("query");
    assert_eq!(overlapping.len(), 1);
    let disjoint = budgets
        .find_by_user_and_range(owner, date(2026, 4, 1), date(2026, 4, 30))
        .await
        .expect("query");
    assert!(disjoint.is_empty());

    budgets.delete(owner, id).await.expect("Failed to delete");
    assert!(matches!(
        budgets.delete(owner, id).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        budgets.delete(owner, BudgetId::new()).await,
        Err(RepositoryError::NotFound(_))
    ));

    common::delete_user(&db, owner).await;
    common::delete_user(&db, stranger).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_global_categories_visible_to_every_user() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let categories = CategoryRepository::new(db.clone());

    let visible = categories.find_visible_to_user(user).await.expect("query");

    assert!(visible.iter().any(|c| c.user_id.is_none() && c.name == "Groceries"));
    common::delete_user(&db, user).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_category_delete_is_scoped_to_owner() {
    let db = common::connect().await;
    let owner = common::create_user(&db).await;
    let stranger = common::create_user(&db).await;
    let categories = CategoryRepository::new(db.clone());

    let category = categories
        .create(NewCategory {
            user_id: owner,
            name: "Holidays".to_string(),
            category_type: TransactionType::Expense,
            color: Color::default(),
        })
        .await
        .expect("Failed to create category");
    let global = categories
        .find_visible_to_user(owner)
        .await
        .expect("query")
        .into_iter()
        .find(|c| c.user_id.is_none())
        .expect("seeded global category");

    assert!(matches!(
        categories.delete(stranger, category.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        categories.delete(owner, global.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    categories
        .delete(owner, category.id)
        .await
        .expect("Failed to delete category");
    assert!(
        categories
            .find_visible_by_id(owner, category.id)
            .await
            .expect("query")
            .is_none()
    );

    common::delete_user(&db, owner).await;
    common::delete_user(&db, stranger).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_forecast_over_stored_rows() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let account = common::create_account(&db, user, dec!(1000)).await;

    let categories = Arc::new(CategoryRepository::new(db.clone()));
    let budgets = Arc::new(BudgetRepository::new(db.clone()));
    let transactions = Arc::new(TransactionRepository::new(db.clone()));
    let accounts = Arc::new(AccountRepository::new(db.clone()));

    let groceries = categories
        .create(NewCategory {
            user_id: user,
            name: "Weekly groceries".to_string(),
            category_type: TransactionType::Expense,
            color: Color::default(),
        })
        .await
        .expect("Failed to create category");

    let budget = budgets
        .save(
            Budget::new(user, groceries.id, dec!(500), date(2026, 3, 1), date(2026, 3, 31))
                .expect("valid budget"),
        )
        .await
        .expect("Failed to save budget");

    transactions
        .save_transaction(Transaction::new(
            user,
            account,
            groceries.id,
            dec!(25),
            TransactionType::Expense,
            date(2026, 3, 10),
        ))
        .await
        .expect("Failed to save transaction");

    let template = Transaction::new(
        user,
        account,
        groceries.id,
        dec!(75),
        TransactionType::Expense,
        date(2026, 3, 2),
    );
    let weekly = RecurringTransaction::new(template, RecurrenceRule::new(Frequency::Weekly))
        .expect("valid rule");
    transactions
        .save_recurring(weekly)
        .await
        .expect("Failed to save recurring");

    let service = ForecastService::new(transactions, budgets, categories, accounts);
    let result = service
        .forecast(user, date(2026, 3, 1), date(2026, 3, 31))
        .await
        .expect("forecast succeeds");

    // 03-02, 03-09, 03-16, 03-23, 03-30 at 75 plus one 25 expense.
    let entry = &result.budgets[&budget.id.expect("id")];
    assert_eq!(entry.projected_actual, dec!(400));
    assert_eq!(entry.variance, dec!(100));
    assert_eq!(result.accounts[0].projected_balance, dec!(600));

    common::delete_user(&db, user).await;
}

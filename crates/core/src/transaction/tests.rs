//! Transaction service tests.

use std::sync::Arc;

use chrono::NaiveDate;
use pennywise_shared::AppError;
use pennywise_shared::types::{
    AccountId, CategoryId, RecurringTransactionId, TransactionId, UserId,
};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{RecurringInput, TransactionError, TransactionInput, TransactionService};
use crate::records::{Account, Category, Color, TransactionType};
use crate::recurrence::{Frequency, RecurrenceError};
use crate::testing::InMemoryStore;

type Service = TransactionService<InMemoryStore, InMemoryStore, InMemoryStore>;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    store: Arc<InMemoryStore>,
    service: Service,
    user: UserId,
    account: AccountId,
    category: CategoryId,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let user = UserId::new();
    let account = AccountId::new();
    let category = CategoryId::new();
    store.add_account(Account {
        id: account,
        user_id: user,
        name: "Checking".to_string(),
        account_type: "checking".to_string(),
        balance: dec!(0),
        currency: "EUR".to_string(),
        notes: None,
    });
    store.add_category(Category {
        id: category,
        user_id: None,
        name: "Rent".to_string(),
        category_type: TransactionType::Expense,
        color: Color::default(),
    });
    let service =
        TransactionService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&store));

    Fixture {
        store,
        service,
        user,
        account,
        category,
    }
}

impl Fixture {
    fn input(&self) -> TransactionInput {
        TransactionInput {
            account_id: self.account,
            category_id: self.category,
            amount: dec!(1200),
            transaction_type: TransactionType::Expense,
            date: date(2024, 4, 1),
            payee: Some("Landlord".to_string()),
            notes: None,
        }
    }

    fn recurring_input(&self, frequency: &str, end_date: Option<NaiveDate>) -> RecurringInput {
        RecurringInput {
            transaction: self.input(),
            frequency: frequency.to_string(),
            end_date,
        }
    }
}

#[tokio::test]
async fn test_create_and_list() {
    let f = fixture();

    let created = f.service.create(f.user, f.input()).await.unwrap();
    assert!(created.id.is_some());
    assert_eq!(created.payee.as_deref(), Some("Landlord"));

    let listed = f
        .service
        .list(f.user, date(2024, 4, 1), date(2024, 4, 30))
        .await
        .unwrap();
    assert_eq!(listed, vec![created]);

    let other_month = f
        .service
        .list(f.user, date(2024, 5, 1), date(2024, 5, 31))
        .await
        .unwrap();
    assert!(other_month.is_empty());
}

#[tokio::test]
async fn test_list_rejects_inverted_range() {
    let f = fixture();
    let result = f.service.list(f.user, date(2024, 5, 1), date(2024, 4, 1)).await;
    assert!(matches!(
        result,
        Err(TransactionError::Validation { field: "end_date", .. })
    ));
}

#[tokio::test]
async fn test_negative_amount_rejected() {
    let f = fixture();
    let mut input = f.input();
    input.amount = dec!(-5);

    let result = f.service.create(f.user, input).await;
    assert!(matches!(
        result,
        Err(TransactionError::Validation { field: "amount", .. })
    ));
}

#[rstest]
#[case(dec!(0.00001))]
#[case(dec!(19.99999))]
#[case(dec!(1_000_000_000_000_000))]
#[tokio::test]
async fn test_unstorable_amount_rejected(#[case] amount: Decimal) {
    let f = fixture();
    let mut input = f.input();
    input.amount = amount;

    let result = f.service.create(f.user, input).await;
    assert!(matches!(
        result,
        Err(TransactionError::Validation { field: "amount", .. })
    ));
    assert!(f.store.transactions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unstorable_recurring_amount_rejected() {
    let f = fixture();
    let mut input = f.recurring_input("monthly", None);
    input.transaction.amount = dec!(0.12345);

    let result = f.service.create_recurring(f.user, input).await;
    assert!(matches!(
        result,
        Err(TransactionError::Validation { field: "amount", .. })
    ));
}

#[tokio::test]
async fn test_foreign_account_rejected() {
    let f = fixture();

    let result = f.service.create(UserId::new(), f.input()).await;
    assert!(matches!(result, Err(TransactionError::AccountNotFound(_))));
}

#[tokio::test]
async fn test_unknown_category_rejected() {
    let f = fixture();
    let mut input = f.input();
    input.category_id = CategoryId::new();

    let result = f.service.create(f.user, input).await;
    assert!(matches!(result, Err(TransactionError::CategoryNotFound(_))));
}

#[tokio::test]
async fn test_update_and_delete() {
    let f = fixture();
    let id = f.service.create(f.user, f.input()).await.unwrap().id.unwrap();

    let mut input = f.input();
    input.amount = dec!(1250);
    let updated = f.service.update(f.user, id, input).await.unwrap();
    assert_eq!(updated.amount, dec!(1250));
    assert_eq!(updated.id, Some(id));

    f.service.delete(f.user, id).await.unwrap();
    assert!(matches!(
        f.service.delete(f.user, id).await,
        Err(TransactionError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_vanished_row_is_not_found() {
    let f = fixture();

    let result = f.service.update(f.user, TransactionId::new(), f.input()).await;
    assert!(matches!(result, Err(TransactionError::NotFound(_))));
}

#[tokio::test]
async fn test_create_recurring() {
    let f = fixture();

    let created = f
        .service
        .create_recurring(f.user, f.recurring_input("monthly", Some(date(2024, 12, 1))))
        .await
        .unwrap();

    assert!(created.id.is_some());
    assert_eq!(created.rule.frequency, Frequency::Monthly);
    assert_eq!(created.anchor(), date(2024, 4, 1));
    assert_eq!(f.service.list_recurring(f.user).await.unwrap().len(), 1);
    assert!(f.service.list_recurring(UserId::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_recurring_unknown_frequency() {
    let f = fixture();

    let result = f
        .service
        .create_recurring(f.user, f.recurring_input("hourly", None))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        TransactionError::InvalidRule(RecurrenceError::UnknownFrequency(_))
    ));
    assert_eq!(AppError::from(err).field(), Some("frequency"));
    assert!(f.store.recurring.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_recurring_end_before_anchor() {
    let f = fixture();

    let result = f
        .service
        .create_recurring(f.user, f.recurring_input("weekly", Some(date(2024, 3, 1))))
        .await;

    assert!(matches!(
        result,
        Err(TransactionError::InvalidRule(RecurrenceError::EndBeforeAnchor { .. }))
    ));
}

#[tokio::test]
async fn test_delete_recurring_twice() {
    let f = fixture();
    let id = f
        .service
        .create_recurring(f.user, f.recurring_input("yearly", None))
        .await
        .unwrap()
        .id
        .unwrap();

    f.service.delete_recurring(f.user, id).await.unwrap();
    assert!(matches!(
        f.service.delete_recurring(f.user, id).await,
        Err(TransactionError::NotFound(_))
    ));
    assert!(matches!(
        f.service.delete_recurring(f.user, RecurringTransactionId::new()).await,
        Err(TransactionError::NotFound(_))
    ));
}

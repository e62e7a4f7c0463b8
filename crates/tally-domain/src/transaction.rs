//! Domain models for recorded income and expense transactions.

use std::{error::Error, fmt, num::ParseIntError, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{category::Category, common::MonthKey};

/// Integer identifier derived from the creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub i64);

impl TransactionId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TransactionId)
    }
}

/// Direction of money flow. The sign of the stored amount follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Returns the amount's magnitude signed for this kind.
    pub fn apply_sign(self, amount: f64) -> f64 {
        match self {
            TransactionKind::Income => amount.abs(),
            TransactionKind::Expense => -amount.abs(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction type `{}` (expected income or expense)", self.0)
    }
}

impl Error for ParseKindError {}

impl FromStr for TransactionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// A recorded transaction. Immutable once created; removed only by deletion.
///
/// Field names on the wire match the browser storage blob so existing data
/// loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Positive for income, negative for expenses.
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        description: impl Into<String>,
        amount: f64,
        category: Category,
        kind: TransactionKind,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount: kind.apply_sign(amount),
            category,
            kind,
            date,
            created_at,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    /// Re-derives the amount's sign from `kind`.
    pub fn normalize_sign(&mut self) {
        self.amount = self.kind.apply_sign(self.amount);
    }
}

/// Raw user input for recording a transaction, prior to validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub kind: TransactionKind,
    /// `None` records the transaction on the current date.
    pub date: Option<NaiveDate>,
}

impl NewTransaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<Category>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            kind,
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_browser_storage_shape() {
        let raw = r#"{
            "id": 1704888000000,
            "description": "Coffee",
            "amount": -5,
            "category": "food",
            "type": "expense",
            "date": "2024-01-10",
            "createdAt": "2024-01-10T12:00:00.000Z"
        }"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(txn.id, TransactionId(1_704_888_000_000));
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.amount, -5.0);
        assert_eq!(txn.magnitude(), 5.0);
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn serializes_type_and_created_at_names() {
        let txn = Transaction::new(
            TransactionId(7),
            "Salary",
            2000.0,
            Category::new("salary"),
            TransactionKind::Income,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            Utc::now(),
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["date"], "2024-01-15");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn sign_follows_kind_regardless_of_input_sign() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let expense = Transaction::new(
            TransactionId(1),
            "Rent",
            900.0,
            Category::new("bills"),
            TransactionKind::Expense,
            date,
            Utc::now(),
        );
        assert_eq!(expense.amount, -900.0);

        let mut income = expense.clone();
        income.kind = TransactionKind::Income;
        income.normalize_sign();
        assert_eq!(income.amount, 900.0);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Income".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert_eq!(" EXPENSE ".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!("transfer".parse::<TransactionKind>().is_err());
    }
}

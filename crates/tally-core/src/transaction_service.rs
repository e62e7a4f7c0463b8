//! Validation and listing helpers for ledger transactions.

use std::{collections::HashSet, str::FromStr};

use tally_domain::{Category, NewTransaction, Transaction, TransactionKind};

use crate::CoreError;

/// Keyword accepted by both filters to match everything.
pub const MATCH_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl FromStr for KindFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(MATCH_ALL) {
            return Ok(KindFilter::All);
        }
        s.parse::<TransactionKind>()
            .map(KindFilter::Only)
            .map_err(|err| CoreError::Validation(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("category filter is empty".into()));
        }
        if trimmed.eq_ignore_ascii_case(MATCH_ALL) {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(Category::new(trimmed)))
        }
    }
}

/// Type and category constraints; both must hold for a transaction to match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionFilter {
    pub kind: KindFilter,
    pub category: CategoryFilter,
}

impl TransactionFilter {
    pub fn new(kind: KindFilter, category: CategoryFilter) -> Self {
        Self { kind, category }
    }

    pub fn all() -> Self {
        Self::default()
    }

    /// Parses the two raw filter values, where `"all"` matches everything.
    pub fn parse(kind: &str, category: &str) -> Result<Self, CoreError> {
        Ok(Self::new(kind.parse()?, category.parse()?))
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        let kind_ok = match self.kind {
            KindFilter::All => true,
            KindFilter::Only(kind) => txn.kind == kind,
        };
        let category_ok = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &txn.category == category,
        };
        kind_ok && category_ok
    }
}

pub struct TransactionService;

impl TransactionService {
    /// Rejects blank text fields and non-positive or non-finite amounts.
    /// Returns the input with its description trimmed.
    pub fn validate(mut input: NewTransaction) -> Result<NewTransaction, CoreError> {
        let description = input.description.trim();
        if description.is_empty() {
            return Err(CoreError::Validation("description is required".into()));
        }
        if input.category.is_blank() {
            return Err(CoreError::Validation("category is required".into()));
        }
        validate_amount(input.amount, "amount")?;
        input.description = description.to_string();
        Ok(input)
    }

    /// Checks already built records, e.g. from a snapshot or storage: each
    /// needs a description, a category and a non-zero amount, and no id may
    /// repeat.
    pub fn validate_records(transactions: &[Transaction]) -> Result<(), CoreError> {
        let mut ids = HashSet::new();
        for txn in transactions {
            let invalid = |reason: &str| {
                CoreError::Validation(format!("transaction {}: {reason}", txn.id))
            };
            if txn.description.trim().is_empty() {
                return Err(invalid("description is required"));
            }
            if txn.category.is_blank() {
                return Err(invalid("category is required"));
            }
            if let Err(CoreError::Validation(reason)) = validate_amount(txn.amount.abs(), "amount")
            {
                return Err(invalid(&reason));
            }
            if !ids.insert(txn.id) {
                return Err(invalid("id is used more than once"));
            }
        }
        Ok(())
    }

    /// Returns the matching subsequence, keeping newest-first order.
    pub fn filter<'a>(
        transactions: &'a [Transaction],
        filter: &TransactionFilter,
    ) -> Vec<&'a Transaction> {
        transactions.iter().filter(|txn| filter.matches(txn)).collect()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories_in_use(transactions: &[Transaction]) -> Vec<Category> {
        let mut seen = HashSet::new();
        let mut categories = Vec::new();
        for txn in transactions {
            if seen.insert(&txn.category) {
                categories.push(txn.category.clone());
            }
        }
        categories
    }
}

pub(crate) fn validate_amount(amount: f64, field: &str) -> Result<(), CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::Validation(format!("{field} must be a number")));
    }
    if amount <= 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(description: &str, amount: f64, category: &str) -> NewTransaction {
        NewTransaction::new(description, amount, category, TransactionKind::Expense)
    }

    #[test]
    fn validate_trims_description() {
        let valid = TransactionService::validate(input("  Coffee ", 5.0, "food")).unwrap();
        assert_eq!(valid.description, "Coffee");
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let cases = [
            input("   ", 5.0, "food"),
            input("Coffee", 5.0, " "),
            input("Coffee", 0.0, "food"),
            input("Coffee", -3.0, "food"),
            input("Coffee", f64::NAN, "food"),
            input("Coffee", f64::INFINITY, "food"),
        ];
        for case in cases {
            let err = TransactionService::validate(case.clone())
                .expect_err("invalid input must be rejected");
            assert!(err.is_validation(), "unexpected error for {case:?}: {err:?}");
        }
    }

    #[test]
    fn filters_parse_all_keyword() {
        let filter = TransactionFilter::parse("ALL", "all").unwrap();
        assert_eq!(filter, TransactionFilter::all());

        let filter = TransactionFilter::parse("expense", "food").unwrap();
        assert_eq!(filter.kind, KindFilter::Only(TransactionKind::Expense));
        assert_eq!(filter.category, CategoryFilter::Only(Category::new("food")));

        assert!(TransactionFilter::parse("transfer", "all").is_err());
    }
}

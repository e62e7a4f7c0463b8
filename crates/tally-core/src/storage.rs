use std::collections::BTreeMap;

use tally_domain::Transaction;

use crate::{transaction_service::TransactionService, CoreError};

/// Key holding the JSON-encoded transaction list.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Key holding the monthly budget as a string-encoded decimal.
pub const BUDGET_KEY: &str = "monthlyBudget";

/// Abstraction over string key/value persistence backends.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// Process-local store, used for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: BTreeMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn encode_transactions(transactions: &[Transaction]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(transactions)?)
}

/// Decodes the stored list, re-deriving every amount's sign from its type.
/// A list holding an invalid record or a repeated id is rejected whole.
pub fn decode_transactions(raw: &str) -> Result<Vec<Transaction>, CoreError> {
    let mut transactions: Vec<Transaction> = serde_json::from_str(raw)?;
    for txn in &mut transactions {
        txn.normalize_sign();
    }
    TransactionService::validate_records(&transactions)?;
    Ok(transactions)
}

pub fn encode_budget(amount: f64) -> String {
    amount.to_string()
}

pub fn decode_budget(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CoreError::Serde(format!(
            "budget `{trimmed}` is not a valid amount"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryBlobStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn budget_codec_matches_plain_decimal_strings() {
        assert_eq!(encode_budget(100.0), "100");
        assert_eq!(encode_budget(12.5), "12.5");
        assert_eq!(decode_budget(" 250.75 ").unwrap(), 250.75);
        assert_eq!(decode_budget("0").unwrap(), 0.0);
    }

    #[test]
    fn budget_codec_rejects_garbage() {
        for raw in ["", "abc", "NaN", "inf", "-5"] {
            assert!(decode_budget(raw).is_err(), "expected `{raw}` to be rejected");
        }
    }

    #[test]
    fn decode_transactions_fixes_inconsistent_signs() {
        let raw = r#"[{"id":1,"description":"Lunch","amount":12,"category":"food",
            "type":"expense","date":"2024-03-02","createdAt":"2024-03-02T12:00:00Z"}]"#;
        let list = decode_transactions(raw).unwrap();
        assert_eq!(list[0].amount, -12.0);
    }

    #[test]
    fn decode_transactions_rejects_repeated_ids() {
        let record = r#"{"id":7,"description":"Lunch","amount":-12,"category":"food",
            "type":"expense","date":"2024-03-02","createdAt":"2024-03-02T12:00:00Z"}"#;
        let err = decode_transactions(&format!("[{record},{record}]")).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("transaction 7"));
    }
}

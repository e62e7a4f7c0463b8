//! The ledger: owns the transaction list and monthly budget, applies
//! mutations, rewrites the whole state to the blob store after each one, and
//! answers aggregate queries.

use chrono::NaiveDate;
use tally_domain::{Category, LedgerState, NewTransaction, Transaction, TransactionId};
use tracing::{debug, info, warn};

use crate::{
    budget_service::{BudgetService, BudgetUsage},
    events::LedgerEvent,
    ids::IdGenerator,
    report_service::{CategoryBreakdown, ReportService, TrendPoint},
    storage::{
        decode_budget, decode_transactions, encode_budget, encode_transactions, BlobStore,
        MemoryBlobStore, BUDGET_KEY, TRANSACTIONS_KEY,
    },
    summary_service::{Summary, SummaryService},
    time::{Clock, SystemClock},
    transaction_service::{validate_amount, TransactionFilter, TransactionService},
    CoreError,
};

type Listener = Box<dyn FnMut(&LedgerEvent)>;

pub struct Ledger {
    state: LedgerState,
    store: Box<dyn BlobStore>,
    clock: Box<dyn Clock>,
    ids: IdGenerator,
    listeners: Vec<Listener>,
    load_warnings: Vec<String>,
}

impl Ledger {
    /// Loads state from `store`. Absent keys start empty; corrupt values are
    /// replaced by defaults and reported through [`Ledger::load_warnings`].
    pub fn open(store: Box<dyn BlobStore>, clock: Box<dyn Clock>) -> Result<Self, CoreError> {
        let mut warnings = Vec::new();

        let transactions = load_blob(
            store.as_ref(),
            TRANSACTIONS_KEY,
            "transactions",
            decode_transactions,
            &mut warnings,
        )?
        .unwrap_or_default();
        let monthly_budget = load_blob(
            store.as_ref(),
            BUDGET_KEY,
            "budget",
            decode_budget,
            &mut warnings,
        )?
        .unwrap_or(0.0);

        let state = LedgerState::new(transactions, monthly_budget);
        info!(
            transactions = state.transactions.len(),
            monthly_budget = state.monthly_budget,
            "ledger opened"
        );
        let mut ledger = Self::from_parts(state, store, clock);
        ledger.load_warnings = warnings;
        Ok(ledger)
    }

    /// An empty ledger backed by process memory and the system clock.
    pub fn in_memory() -> Self {
        Self::from_parts(
            LedgerState::default(),
            Box::new(MemoryBlobStore::new()),
            Box::new(SystemClock),
        )
    }

    fn from_parts(state: LedgerState, store: Box<dyn BlobStore>, clock: Box<dyn Clock>) -> Self {
        let ids = IdGenerator::seeded(state.max_id());
        Self {
            state,
            store,
            clock,
            ids,
            listeners: Vec::new(),
            load_warnings: Vec::new(),
        }
    }

    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Registers a callback run after every successful in-memory mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&LedgerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Rewrites both persisted keys from the in-memory state.
    ///
    /// Mutations call this themselves; callers use it to retry after a
    /// [`CoreError::Persistence`].
    pub fn persist(&mut self) -> Result<(), CoreError> {
        let transactions = encode_transactions(&self.state.transactions)?;
        let budget = encode_budget(self.state.monthly_budget);
        let result = self
            .store
            .set(TRANSACTIONS_KEY, &transactions)
            .and_then(|()| self.store.set(BUDGET_KEY, &budget));
        if let Err(err) = &result {
            warn!(error = %err, "failed to persist ledger; in-memory state kept");
        }
        result
    }

    pub fn add_transaction(&mut self, input: NewTransaction) -> Result<LedgerEvent, CoreError> {
        let input = TransactionService::validate(input)?;
        let now = self.clock.now();
        let id = self.ids.next(now);
        let date = input.date.unwrap_or_else(|| self.clock.today());
        let txn = Transaction::new(
            id,
            input.description,
            input.amount,
            input.category,
            input.kind,
            date,
            now,
        );
        debug!(%id, kind = %txn.kind, amount = txn.amount, "adding transaction");
        self.state.transactions.insert(0, txn);
        self.commit(LedgerEvent::TransactionAdded { id })
    }

    /// Removes the transaction with `id`. An unknown id leaves the list as is.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<LedgerEvent, CoreError> {
        let before = self.state.transactions.len();
        self.state.transactions.retain(|txn| txn.id != id);
        let removed = self.state.transactions.len() != before;
        debug!(%id, removed, "deleting transaction");
        self.commit(LedgerEvent::TransactionDeleted { id, removed })
    }

    pub fn clear_all(&mut self) -> Result<LedgerEvent, CoreError> {
        let removed = self.state.transactions.len();
        self.state.transactions.clear();
        debug!(removed, "clearing transactions");
        self.commit(LedgerEvent::Cleared { removed })
    }

    pub fn set_budget(&mut self, amount: f64) -> Result<LedgerEvent, CoreError> {
        validate_amount(amount, "budget")?;
        self.state.monthly_budget = amount;
        debug!(amount, "setting monthly budget");
        self.commit(LedgerEvent::BudgetChanged { amount })
    }

    /// Swaps in a whole state, e.g. from an imported snapshot. Records are
    /// held to the same rules as [`Ledger::add_transaction`] and ids must be
    /// unique; on any violation the current state is kept.
    pub fn replace_state(&mut self, mut state: LedgerState) -> Result<LedgerEvent, CoreError> {
        if !state.monthly_budget.is_finite() || state.monthly_budget < 0.0 {
            return Err(CoreError::Validation(
                "budget must be zero or a positive number".into(),
            ));
        }
        for txn in &mut state.transactions {
            txn.normalize_sign();
        }
        TransactionService::validate_records(&state.transactions)?;
        if let Some(max) = state.max_id() {
            self.ids.observe(max);
        }
        let transactions = state.transactions.len();
        self.state = state;
        debug!(transactions, "replacing ledger state");
        self.commit(LedgerEvent::Replaced { transactions })
    }

    fn commit(&mut self, event: LedgerEvent) -> Result<LedgerEvent, CoreError> {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.persist()?;
        Ok(event)
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.state.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.state.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.transactions.is_empty()
    }

    /// `0.0` when no budget is configured.
    pub fn monthly_budget(&self) -> f64 {
        self.state.monthly_budget
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn summary(&self) -> Summary {
        SummaryService::summarize(&self.state.transactions)
    }

    pub fn monthly_budget_usage(&self, reference: NaiveDate) -> BudgetUsage {
        BudgetService::usage(
            &self.state.transactions,
            self.state.monthly_budget,
            reference,
        )
    }

    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        TransactionService::filter(&self.state.transactions, filter)
    }

    pub fn category_breakdown(&self) -> CategoryBreakdown {
        ReportService::category_breakdown(&self.state.transactions)
    }

    pub fn six_month_trend(&self, reference: NaiveDate) -> Vec<TrendPoint> {
        ReportService::six_month_trend(&self.state.transactions, reference)
    }

    pub fn categories_in_use(&self) -> Vec<Category> {
        TransactionService::categories_in_use(&self.state.transactions)
    }
}

/// Reads and decodes one key. Content that fails to decode is reported in
/// `warnings` and yields `None`; only I/O failures abort the load.
fn load_blob<T>(
    store: &dyn BlobStore,
    key: &str,
    what: &str,
    decode: impl FnOnce(&str) -> Result<T, CoreError>,
    warnings: &mut Vec<String>,
) -> Result<Option<T>, CoreError> {
    let decoded = match store.get(key) {
        Ok(None) => return Ok(None),
        Ok(Some(raw)) => decode(&raw),
        Err(err) if err.is_persistence() => return Err(err),
        Err(err) => Err(err),
    };
    match decoded {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(key, error = %err, "stored {} blob is unreadable; using the default", what);
            warnings.push(format!("discarded unreadable {what}: {err}"));
            Ok(None)
        }
    }
}

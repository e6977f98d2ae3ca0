// Amount Ledger - signed decimal entries per category
//
// Controllers receive a ledger handle at construction time; nothing looks a
// ledger up through shared application state.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

// ============================================================================
// ENTRY TYPES
// ============================================================================

/// Storage-assigned entry identity. Never reused once handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub i64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One immutable transaction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub row_id: RowId,
    pub category: String,
    pub amount: Decimal,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("cannot create database directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("row {row_id} holds an unreadable amount {value:?}")]
    CorruptAmount { row_id: RowId, value: String },

    #[error("balance of category {0:?} exceeds the decimal range")]
    Overflow(String),
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// ============================================================================
// LEDGER CAPABILITY
// ============================================================================

pub trait Ledger {
    /// Append an entry with an explicit timestamp.
    fn save_at(&mut self, category: &str, amount: Decimal, timestamp: i64) -> Result<RowId, LedgerError>;

    /// Append an entry stamped with the current time.
    fn save(&mut self, category: &str, amount: Decimal) -> Result<RowId, LedgerError> {
        self.save_at(category, amount, now_millis())
    }

    /// All entries of a category, ordered by timestamp then row id.
    fn find_all(&self, category: &str) -> Result<Vec<LedgerEntry>, LedgerError>;

    /// Remove one entry. Unknown ids are ignored.
    fn delete(&mut self, row_id: RowId) -> Result<(), LedgerError>;

    fn remove_all(&mut self, category: &str) -> Result<(), LedgerError>;

    /// Distinct category names that have at least one entry, sorted.
    fn categories(&self) -> Result<Vec<String>, LedgerError>;

    /// Exact sum of the category's entries.
    fn balance(&self, category: &str) -> Result<Decimal, LedgerError> {
        sum_entries(category, &self.find_all(category)?)
    }
}

impl<L: Ledger + ?Sized> Ledger for &mut L {
    fn save_at(&mut self, category: &str, amount: Decimal, timestamp: i64) -> Result<RowId, LedgerError> {
        (**self).save_at(category, amount, timestamp)
    }

    fn save(&mut self, category: &str, amount: Decimal) -> Result<RowId, LedgerError> {
        (**self).save(category, amount)
    }

    fn find_all(&self, category: &str) -> Result<Vec<LedgerEntry>, LedgerError> {
        (**self).find_all(category)
    }

    fn delete(&mut self, row_id: RowId) -> Result<(), LedgerError> {
        (**self).delete(row_id)
    }

    fn remove_all(&mut self, category: &str) -> Result<(), LedgerError> {
        (**self).remove_all(category)
    }

    fn categories(&self) -> Result<Vec<String>, LedgerError> {
        (**self).categories()
    }

    fn balance(&self, category: &str) -> Result<Decimal, LedgerError> {
        (**self).balance(category)
    }
}

/// Implemented by every controller that works against a ledger.
pub trait LedgerAware {
    type Ledger: Ledger;

    fn ledger(&self) -> &Self::Ledger;

    fn ledger_mut(&mut self) -> &mut Self::Ledger;
}

pub(crate) fn sum_entries(category: &str, entries: &[LedgerEntry]) -> Result<Decimal, LedgerError> {
    entries.iter().try_fold(Decimal::ZERO, |acc, entry| {
        acc.checked_add(entry.amount)
            .ok_or_else(|| LedgerError::Overflow(category.to_string()))
    })
}

// ============================================================================
// IN-MEMORY LEDGER
// ============================================================================

/// Process-local ledger. Row ids come from a counter that deletions never
/// rewind.
#[derive(Debug)]
pub struct MemoryLedger {
    entries: Vec<LedgerEntry>,
    next_id: i64,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for MemoryLedger {
    fn save_at(&mut self, category: &str, amount: Decimal, timestamp: i64) -> Result<RowId, LedgerError> {
        let row_id = RowId(self.next_id);
        self.next_id += 1;

        self.entries.push(LedgerEntry {
            row_id,
            category: category.to_string(),
            amount,
            timestamp,
        });

        info!(%row_id, category, %amount, "saved ledger entry");
        Ok(row_id)
    }

    fn find_all(&self, category: &str) -> Result<Vec<LedgerEntry>, LedgerError> {
        let mut found: Vec<LedgerEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.category == category)
            .cloned()
            .collect();

        found.sort_by_key(|entry| (entry.timestamp, entry.row_id));
        Ok(found)
    }

    fn delete(&mut self, row_id: RowId) -> Result<(), LedgerError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.row_id != row_id);
        info!(%row_id, removed = before - self.entries.len(), "deleted ledger entry");
        Ok(())
    }

    fn remove_all(&mut self, category: &str) -> Result<(), LedgerError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.category != category);
        info!(category, removed = before - self.entries.len(), "removed all ledger entries");
        Ok(())
    }

    fn categories(&self) -> Result<Vec<String>, LedgerError> {
        let names: BTreeSet<&str> = self.entries.iter().map(|e| e.category.as_str()).collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }
}

// History List - entries of one category with add and delete flows

use crate::amount::parse_amount;
use crate::ledger::{Ledger, LedgerAware, LedgerEntry, LedgerError, RowId};
use crate::notice::Notice;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// One line of the history list. The add affordance is its own variant, so
/// only real entries can ever be selected for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryRow {
    Entry(LedgerEntry),
    AddEntry,
}

impl HistoryRow {
    /// Row id of a deletable row.
    pub fn row_id(&self) -> Option<RowId> {
        match self {
            HistoryRow::Entry(entry) => Some(entry.row_id),
            HistoryRow::AddEntry => None,
        }
    }
}

/// Mutation waiting for the user to confirm it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    DeleteEntry(RowId),
    DeleteAll,
}

impl Confirmation {
    pub fn title(&self) -> &'static str {
        match self {
            Confirmation::DeleteEntry(_) => "Remove entry",
            Confirmation::DeleteAll => "Remove all entries",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Confirmation::DeleteEntry(_) => "Do you really want to remove this entry?",
            Confirmation::DeleteAll => "Do you really want to remove all entries of this category?",
        }
    }
}

pub struct HistoryController<L: Ledger> {
    category: String,
    ledger: L,
    rows: Vec<HistoryRow>,
    pending: Option<Confirmation>,
    notices: Vec<Notice>,
}

impl<L: Ledger> HistoryController<L> {
    pub fn new(ledger: L, category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ledger,
            rows: vec![HistoryRow::AddEntry],
            pending: None,
            notices: Vec::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    /// Real entries only, without the trailing add row.
    pub fn entries(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.rows.iter().filter_map(|row| match row {
            HistoryRow::Entry(entry) => Some(entry),
            HistoryRow::AddEntry => None,
        })
    }

    pub fn balance(&self) -> Result<Decimal, LedgerError> {
        self.ledger.balance(&self.category)
    }

    pub fn pending(&self) -> Option<Confirmation> {
        self.pending
    }

    /// Screen became visible again: reload everything from the ledger.
    pub fn on_resume(&mut self) -> Result<(), LedgerError> {
        self.refresh()
    }

    fn refresh(&mut self) -> Result<(), LedgerError> {
        let entries = self.ledger.find_all(&self.category)?;
        self.rows = entries
            .into_iter()
            .map(HistoryRow::Entry)
            .chain(std::iter::once(HistoryRow::AddEntry))
            .collect();
        Ok(())
    }

    /// Result handed back by the add-entry form. `None` or an empty string
    /// means the form was cancelled. Zero amounts are never recorded here.
    pub fn on_return_from_add_entry(
        &mut self,
        amount: Option<&str>,
        timestamp: i64,
    ) -> Result<(), LedgerError> {
        let text = match amount {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(()),
        };

        let value = match parse_amount(text) {
            Ok(value) => value,
            Err(err) => {
                warn!(category = %self.category, %err, "rejected add-entry result");
                self.notices.push(Notice::InvalidValue(text.to_string()));
                return Ok(());
            }
        };

        if value.is_zero() {
            debug!(category = %self.category, "ignoring zero entry");
            return Ok(());
        }

        self.ledger.save_at(&self.category, value, timestamp)?;
        self.refresh()
    }

    /// Long-press on a list position. Only real entries open a confirmation.
    pub fn request_delete(&mut self, position: usize) -> Option<Confirmation> {
        let row_id = self.rows.get(position).and_then(HistoryRow::row_id)?;
        debug!(position, %row_id, "history entry long-pressed");
        self.pending = Some(Confirmation::DeleteEntry(row_id));
        self.pending
    }

    pub fn request_delete_all(&mut self) -> Confirmation {
        self.pending = Some(Confirmation::DeleteAll);
        Confirmation::DeleteAll
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Run the pending confirmation, if any, then reload.
    pub fn confirm(&mut self) -> Result<(), LedgerError> {
        match self.pending.take() {
            None => Ok(()),
            Some(Confirmation::DeleteEntry(row_id)) => {
                info!(%row_id, "removing history entry");
                self.ledger.delete(row_id)?;
                self.refresh()
            }
            Some(Confirmation::DeleteAll) => {
                info!(category = %self.category, "removing all history entries");
                self.ledger.remove_all(&self.category)?;
                self.ledger.save(&self.category, Decimal::ZERO)?;
                self.refresh()
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }
}

impl<L: Ledger> LedgerAware for HistoryController<L> {
    type Ledger = L;

    fn ledger(&self) -> &L {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }
}

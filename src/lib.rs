// Money Tracker - Core Library
// Exposes the ledger, the keypad and history controllers, and formatting
// for use in the CLI, the terminal UI, and tests

pub mod amount;
pub mod config;
pub mod db;
pub mod format;
pub mod history;
pub mod keypad;
pub mod ledger;
pub mod logging;
pub mod notice;

// Re-export commonly used types
pub use amount::{parse_amount, AmountError};
pub use config::{Config, ConfigError};
pub use db::{setup_database, verify_count, SqliteLedger};
pub use format::Formatter;
pub use history::{Confirmation, HistoryController, HistoryRow};
pub use keypad::{KeyAction, KeypadController, KeypadInput, KeypadOutcome, KeypadState};
pub use ledger::{now_millis, Ledger, LedgerAware, LedgerEntry, LedgerError, MemoryLedger, RowId};
pub use notice::Notice;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use crate::ledger::{Ledger, LedgerEntry, LedgerError, RowId};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// SQLite-backed ledger. Amounts are stored as canonical decimal text so no
/// value ever passes through a float column.
pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    /// Open (or create) a ledger database file.
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| LedgerError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path)?;
        setup_database(&conn)?;
        debug!(path = %path.display(), "opened ledger database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, LedgerError> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

pub fn setup_database(conn: &Connection) -> Result<(), LedgerError> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Amounts Table
    // AUTOINCREMENT keeps row ids from being reused after deletes
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS amounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category TEXT NOT NULL,
            time INTEGER NOT NULL,
            value TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_amounts_category ON amounts(category, time)",
        [],
    )?;

    Ok(())
}

impl Ledger for SqliteLedger {
    fn save_at(&mut self, category: &str, amount: Decimal, timestamp: i64) -> Result<RowId, LedgerError> {
        self.conn.execute(
            "INSERT INTO amounts (category, time, value) VALUES (?1, ?2, ?3)",
            params![category, timestamp, amount.to_string()],
        )?;

        let row_id = RowId(self.conn.last_insert_rowid());
        info!(%row_id, category, %amount, "saved ledger entry");
        Ok(row_id)
    }

    fn find_all(&self, category: &str) -> Result<Vec<LedgerEntry>, LedgerError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, time, value
             FROM amounts
             WHERE category = ?1
             ORDER BY time ASC, id ASC",
        )?;

        let rows = stmt
            .query_map([category], |row| {
                Ok((
                    RowId(row.get(0)?),
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(row_id, timestamp, value)| {
                let amount = Decimal::from_str(&value)
                    .map_err(|_| LedgerError::CorruptAmount { row_id, value })?;
                Ok(LedgerEntry {
                    row_id,
                    category: category.to_string(),
                    amount,
                    timestamp,
                })
            })
            .collect()
    }

    fn delete(&mut self, row_id: RowId) -> Result<(), LedgerError> {
        let removed = self
            .conn
            .execute("DELETE FROM amounts WHERE id = ?1", params![row_id.0])?;
        info!(%row_id, removed, "deleted ledger entry");
        Ok(())
    }

    fn remove_all(&mut self, category: &str) -> Result<(), LedgerError> {
        let removed = self
            .conn
            .execute("DELETE FROM amounts WHERE category = ?1", params![category])?;
        info!(category, removed, "removed all ledger entries");
        Ok(())
    }

    fn categories(&self) -> Result<Vec<String>, LedgerError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT category FROM amounts ORDER BY category")?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(names)
    }
}

pub fn verify_count(conn: &Connection) -> Result<i64, LedgerError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM amounts", [], |row| row.get(0))?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_save_and_find_all() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();

        ledger.save_at("Food", dec("12.50"), 2_000).unwrap();
        ledger.save_at("Food", dec("-3.25"), 1_000).unwrap();
        ledger.save_at("Rent", dec("800"), 1_500).unwrap();

        let food = ledger.find_all("Food").unwrap();

        assert_eq!(food.len(), 2);
        assert_eq!(food[0].amount, dec("-3.25"));
        assert_eq!(food[0].timestamp, 1_000);
        assert_eq!(food[1].amount.to_string(), "12.50", "scale must survive storage");
        assert_eq!(verify_count(ledger.connection()).unwrap(), 3);
    }

    #[test]
    fn test_exact_decimal_round_trip() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        ledger.save("Food", dec("0.1")).unwrap();
        ledger.save("Food", dec("0.2")).unwrap();

        assert_eq!(ledger.balance("Food").unwrap(), dec("0.3"));
    }

    #[test]
    fn test_remove_all_then_reseed_zero() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        ledger.save("Food", dec("5")).unwrap();
        ledger.save("Food", dec("6")).unwrap();
        ledger.save("Rent", dec("7")).unwrap();

        ledger.remove_all("Food").unwrap();
        ledger.save("Food", Decimal::ZERO).unwrap();

        let food = ledger.find_all("Food").unwrap();
        assert_eq!(food.len(), 1);
        assert!(food[0].amount.is_zero());
        assert_eq!(ledger.find_all("Rent").unwrap().len(), 1, "other categories untouched");
    }

    #[test]
    fn test_delete_and_row_ids_not_reused() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        let a = ledger.save_at("Food", dec("1"), 1).unwrap();
        let b = ledger.save_at("Food", dec("2"), 2).unwrap();

        ledger.delete(b).unwrap();
        ledger.delete(RowId(12345)).unwrap();

        let ids: Vec<RowId> = ledger.find_all("Food").unwrap().iter().map(|e| e.row_id).collect();
        assert_eq!(ids, vec![a]);

        let c = ledger.save_at("Food", dec("3"), 3).unwrap();
        assert!(c > b, "row id {c} must not reuse deleted {b}");
    }

    #[test]
    fn test_categories() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        ledger.save("Transport", dec("1")).unwrap();
        ledger.save("Food", dec("1")).unwrap();
        ledger.save("Food", dec("1")).unwrap();

        assert_eq!(ledger.categories().unwrap(), vec!["Food", "Transport"]);
    }

    #[test]
    fn test_corrupt_amount_is_reported() {
        let ledger = SqliteLedger::open_in_memory().unwrap();
        ledger
            .connection()
            .execute(
                "INSERT INTO amounts (category, time, value) VALUES ('Food', 1, 'abc')",
                [],
            )
            .unwrap();

        assert!(matches!(
            ledger.find_all("Food"),
            Err(LedgerError::CorruptAmount { .. })
        ));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("money.db");

        {
            let mut ledger = SqliteLedger::open(&path).unwrap();
            ledger.save_at("Food", dec("9.99"), 42).unwrap();
        }

        let ledger = SqliteLedger::open(&path).unwrap();
        let entries = ledger.find_all("Food").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, dec("9.99"));
        assert_eq!(entries[0].timestamp, 42);
    }

    #[test]
    fn test_open_reports_unusable_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let result = SqliteLedger::open(&blocker.join("money.db"));
        match result {
            Err(LedgerError::CreateDir { path, .. }) => assert_eq!(path, blocker),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("opened a database under a regular file"),
        }
    }
}

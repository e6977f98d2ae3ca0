// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

use money_tracker::{
    logging, parse_amount, Config, Formatter, HistoryController, Ledger, LedgerAware,
    RowId, SqliteLedger,
};

const USAGE: &str = "\
Usage: money-tracker [--db <path>] [command]

Commands:
  (none)                     interactive terminal UI
  add <category> <amount>    append an entry (zero is ignored)
  history <category>         print entries and the balance
  delete <row-id>            delete one entry
  clear <category>           remove all entries, keep a zero baseline
  categories                 list categories with balances";

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let db_flag = take_db_flag(&mut args)?;

    let config = Config::load().context("Failed to load configuration")?;
    let db_path = config.resolve_database_path(db_flag.as_deref());

    if args.is_empty() {
        // UI mode (default)
        return run_ui_mode(config, db_path);
    }

    logging::init_tracing();
    let ledger = SqliteLedger::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let formatter = Formatter::from_config(&config);

    match args[0].as_str() {
        "add" => {
            let [_, category, amount] = args.as_slice() else {
                bail!("{USAGE}");
            };
            run_add(ledger, category, amount)
        }
        "history" => {
            let [_, category] = args.as_slice() else {
                bail!("{USAGE}");
            };
            run_history(&ledger, category, &formatter)
        }
        "delete" => {
            let [_, row_id] = args.as_slice() else {
                bail!("{USAGE}");
            };
            let row_id: i64 = row_id
                .parse()
                .with_context(|| format!("Not a row id: {}", row_id))?;
            run_delete(ledger, RowId(row_id))
        }
        "clear" => {
            let [_, category] = args.as_slice() else {
                bail!("{USAGE}");
            };
            run_clear(ledger, category)
        }
        "categories" => run_categories(&ledger, &config, &formatter),
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => bail!("Unknown command: {}\n\n{}", other, USAGE),
    }
}

fn take_db_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    let Some(pos) = args.iter().position(|a| a == "--db") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("--db needs a path\n\n{}", USAGE);
    }
    let path = PathBuf::from(args.remove(pos + 1));
    args.remove(pos);
    Ok(Some(path))
}

// ============================================================================
// ONE-SHOT COMMANDS
// ============================================================================

fn run_add(ledger: SqliteLedger, category: &str, amount: &str) -> Result<()> {
    let mut history = HistoryController::new(ledger, category);
    let before = history.ledger().find_all(category)?.len();

    history.on_return_from_add_entry(Some(amount), money_tracker::now_millis())?;

    if let Some(notice) = history.take_notices().pop() {
        bail!("{}", notice);
    }

    if history.ledger().find_all(category)?.len() == before {
        println!("Zero amount, nothing recorded");
    } else {
        println!("✓ Added {} to {}", parse_amount(amount)?, category);
    }
    println!("✓ Balance of {}: {}", category, history.balance()?);
    Ok(())
}

fn run_history(ledger: &SqliteLedger, category: &str, formatter: &Formatter) -> Result<()> {
    let entries = ledger.find_all(category)?;

    println!("{} ({} entries)", category, entries.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for entry in &entries {
        println!(
            "{:>6}  {:<18} {:>16}",
            entry.row_id,
            formatter.format_timestamp(entry.timestamp),
            formatter.format_amount(&entry.amount)
        );
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "{:>6}  {:<18} {:>16}",
        "",
        "Balance",
        formatter.format_amount(&ledger.balance(category)?)
    );
    Ok(())
}

fn run_delete(mut ledger: SqliteLedger, row_id: RowId) -> Result<()> {
    ledger.delete(row_id)?;
    println!("✓ Deleted entry {}", row_id);
    Ok(())
}

fn run_clear(ledger: SqliteLedger, category: &str) -> Result<()> {
    let mut history = HistoryController::new(ledger, category);
    history.request_delete_all();
    history.confirm()?;
    println!("✓ Cleared {}, balance is now {}", category, history.balance()?);
    Ok(())
}

fn run_categories(ledger: &SqliteLedger, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut names = config.categories.clone();
    for name in ledger.categories()? {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    for name in names {
        println!("{:<24} {:>16}", name, formatter.format_amount(&ledger.balance(&name)?));
    }
    Ok(())
}

// ============================================================================
// INTERACTIVE MODE
// ============================================================================

#[cfg(feature = "tui")]
fn run_ui_mode(config: Config, db_path: PathBuf) -> Result<()> {
    let log_path = money_tracker::config::log_file();
    if let Err(err) = logging::init_tracing_to_file(&log_path) {
        eprintln!("⚠ Logging disabled, cannot open {}: {}", log_path.display(), err);
    }

    let ledger = SqliteLedger::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let mut app = ui::App::new(ledger, config);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: Config, _db_path: PathBuf) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use a command:\n\n{}", USAGE);
    std::process::exit(1);
}

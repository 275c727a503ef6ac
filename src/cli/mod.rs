//! Terminal presentation adapter over the ledger manager.

pub mod io;
pub mod output;

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::LedgerManager;
use crate::storage::JsonStorage;

use self::io::{Confirmer, DialoguerConfirmer, StaticConfirmer};
use self::output as out;

const ASSUME_YES_ENV: &str = "SAVINGS_CLI_ASSUME_YES";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Entry point for the binary: opens the default storage location and
/// dispatches the process arguments as one command.
pub fn run_cli() -> Result<(), LedgerError> {
    let storage = JsonStorage::new_default()?;
    let mut manager = LedgerManager::open(Box::new(storage));
    let confirmer: Box<dyn Confirmer> = if std::env::var_os(ASSUME_YES_ENV).is_some() {
        Box::new(StaticConfirmer(true))
    } else {
        Box::new(DialoguerConfirmer)
    };
    let args: Vec<String> = std::env::args().skip(1).collect();
    dispatch(&mut manager, confirmer.as_ref(), &args)
}

/// Routes one command line to its handler.
pub fn dispatch(
    manager: &mut LedgerManager,
    confirmer: &dyn Confirmer,
    args: &[String],
) -> Result<(), LedgerError> {
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    let rest = &args[1..];
    match command.as_str() {
        "status" => cmd_status(manager),
        "list" => cmd_list(manager),
        "add" => cmd_add(manager, rest),
        "quick" => cmd_quick(manager, rest),
        "edit" => cmd_edit(manager, rest),
        "delete" => cmd_delete(manager, confirmer, rest),
        "goal" => cmd_goal(manager, rest),
        "empty" => cmd_empty(manager, confirmer),
        "export" => cmd_export(manager, rest),
        "import" => cmd_import(manager, confirmer, rest),
        "theme" => cmd_theme(manager),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(LedgerError::Validation(format!(
            "unknown command `{other}`; run `savings_cli help`"
        ))),
    }
}

fn cmd_status(manager: &LedgerManager) -> Result<(), LedgerError> {
    let ledger = manager.ledger();
    println!("Balance:  {}", format_amount(manager.current_balance()));
    println!("Goal:     {}", format_amount(ledger.goal));
    println!("Progress: {:.1}%", manager.progress_percentage());
    println!("Vault:    {}", format_amount(ledger.vault_total));
    println!("Entries:  {}", ledger.transaction_count());
    println!("Theme:    {:?}", ledger.theme);
    Ok(())
}

fn cmd_list(manager: &LedgerManager) -> Result<(), LedgerError> {
    let view = manager.ledger().transactions_by_date_desc();
    if view.is_empty() {
        out::info("The ledger is empty.");
        return Ok(());
    }
    for txn in view {
        println!(
            "{}  {}  {:>3} x {}  = {}  {}",
            txn.id,
            txn.date.format(DATE_FORMAT),
            txn.quantity,
            format_amount(txn.amount),
            format_amount(txn.total()),
            txn.note
        );
    }
    Ok(())
}

fn cmd_add(manager: &mut LedgerManager, args: &[String]) -> Result<(), LedgerError> {
    let raw_amount = args
        .first()
        .ok_or_else(|| usage_error("add <amount> [quantity] [date] [note..]"))?;
    let amount = parse_amount(raw_amount)?;
    let quantity = match args.get(1) {
        Some(raw) => parse_quantity(raw)?,
        None => 1,
    };
    let date = match args.get(2) {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let note = args.get(3..).unwrap_or_default().join(" ");

    let txn = manager.add_transaction(amount, quantity, note, date)?;
    out::success(format!(
        "Recorded {} ({} x {}) on {}",
        format_amount(txn.total()),
        txn.quantity,
        format_amount(txn.amount),
        txn.date.format(DATE_FORMAT)
    ));
    Ok(())
}

fn cmd_quick(manager: &mut LedgerManager, args: &[String]) -> Result<(), LedgerError> {
    let raw_amount = args.first().ok_or_else(|| usage_error("quick <amount>"))?;
    let txn = manager.quick_add(parse_amount(raw_amount)?)?;
    out::success(format!("Recorded {}", format_amount(txn.total())));
    Ok(())
}

fn cmd_edit(manager: &mut LedgerManager, args: &[String]) -> Result<(), LedgerError> {
    if args.len() < 4 {
        return Err(usage_error("edit <id> <amount> <quantity> <date> [note..]"));
    }
    let id = parse_id(&args[0])?;
    let amount = parse_amount(&args[1])?;
    let quantity = parse_quantity(&args[2])?;
    let date = parse_date(&args[3])?;
    let note = args.get(4..).unwrap_or_default().join(" ");

    let txn = manager.edit_transaction(id, amount, quantity, note, date)?;
    out::success(format!("Updated transaction {}", txn.id));
    Ok(())
}

fn cmd_delete(
    manager: &mut LedgerManager,
    confirmer: &dyn Confirmer,
    args: &[String],
) -> Result<(), LedgerError> {
    let id = parse_id(args.first().ok_or_else(|| usage_error("delete <id>"))?)?;
    if !confirmer.confirm(&format!("Delete transaction {id}?"))? {
        out::info("Delete cancelled.");
        return Ok(());
    }
    manager.delete_transaction(id)?;
    out::success("Transaction deleted.");
    Ok(())
}

fn cmd_goal(manager: &mut LedgerManager, args: &[String]) -> Result<(), LedgerError> {
    let raw = args.first().ok_or_else(|| usage_error("goal <amount>"))?;
    manager.set_goal(parse_amount(raw)?)?;
    out::success(format!(
        "Goal set to {} ({:.1}% reached)",
        format_amount(manager.ledger().goal),
        manager.progress_percentage()
    ));
    Ok(())
}

fn cmd_empty(manager: &mut LedgerManager, confirmer: &dyn Confirmer) -> Result<(), LedgerError> {
    let balance = manager.current_balance();
    if balance == 0.0 {
        return Err(LedgerError::EmptyLedger);
    }
    let question = format!(
        "Move {} into the vault and clear the ledger?",
        format_amount(balance)
    );
    if !confirmer.confirm(&question)? {
        out::info("Empty cancelled.");
        return Ok(());
    }
    let moved = manager.empty_into_vault()?;
    out::success(format!(
        "Moved {} into the vault (vault total {}).",
        format_amount(moved),
        format_amount(manager.ledger().vault_total)
    ));
    Ok(())
}

fn cmd_export(manager: &LedgerManager, args: &[String]) -> Result<(), LedgerError> {
    let path = args.first().ok_or_else(|| usage_error("export <file>"))?;
    fs::write(Path::new(path), manager.export_csv())?;
    out::success(format!("Exported ledger to {path}"));
    Ok(())
}

fn cmd_import(
    manager: &mut LedgerManager,
    confirmer: &dyn Confirmer,
    args: &[String],
) -> Result<(), LedgerError> {
    let path = args.first().ok_or_else(|| usage_error("import <file>"))?;
    let question = format!("Replace all existing transactions with the contents of {path}?");
    if !confirmer.confirm(&question)? {
        out::info("Import cancelled.");
        return Ok(());
    }
    let text = fs::read_to_string(Path::new(path))?;
    let summary = manager.import_csv(&text)?;
    if summary.skipped_rows > 0 {
        out::warning(format!("Skipped {} malformed row(s).", summary.skipped_rows));
    }
    out::success(format!("Imported {} transaction(s).", summary.imported));
    Ok(())
}

fn cmd_theme(manager: &mut LedgerManager) -> Result<(), LedgerError> {
    let theme = manager.toggle_theme()?;
    out::success(format!("Theme switched to {theme:?}."));
    Ok(())
}

fn parse_amount(raw: &str) -> Result<f64, LedgerError> {
    raw.parse()
        .map_err(|_| LedgerError::Validation(format!("`{raw}` is not a valid amount")))
}

fn parse_quantity(raw: &str) -> Result<u32, LedgerError> {
    raw.parse()
        .map_err(|_| LedgerError::Validation(format!("`{raw}` is not a valid quantity")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| LedgerError::Validation(format!("`{raw}` is not a YYYY-MM-DD date")))
}

fn parse_id(raw: &str) -> Result<Uuid, LedgerError> {
    Uuid::parse_str(raw)
        .map_err(|_| LedgerError::Validation(format!("`{raw}` is not a transaction id")))
}

fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

fn usage_error(usage: &str) -> LedgerError {
    LedgerError::Validation(format!("usage: savings_cli {usage}"))
}

fn print_usage() {
    println!("Usage: savings_cli <command> [args]");
    println!();
    println!("Commands:");
    println!("  status                                  balance, goal, progress, vault");
    println!("  list                                    transactions, newest first");
    println!("  add <amount> [quantity] [date] [note]   record a deposit");
    println!("  quick <amount>                          one unit, today, no note");
    println!("  edit <id> <amount> <quantity> <date> [note]");
    println!("  delete <id>                             remove a transaction (confirms)");
    println!("  goal <amount>                           set the savings goal");
    println!("  empty                                   move the balance into the vault (confirms)");
    println!("  export <file>                           write the ledger as CSV");
    println!("  import <file>                           replace the ledger from CSV (confirms)");
    println!("  theme                                   toggle light/dark display theme");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SavingsLedger;
    use crate::storage;
    use crate::storage::StorageBackend;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStorage(Mutex<Option<SavingsLedger>>);

    impl StorageBackend for MemoryStorage {
        fn save(&self, ledger: &SavingsLedger) -> storage::Result<()> {
            *self.0.lock().unwrap() = Some(ledger.clone());
            Ok(())
        }

        fn load(&self) -> storage::Result<Option<SavingsLedger>> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    fn manager() -> LedgerManager {
        LedgerManager::open(Box::<MemoryStorage>::default())
    }

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_then_delete_via_dispatch() {
        let mut manager = manager();
        dispatch(
            &mut manager,
            &StaticConfirmer(true),
            &args(&["add", "50", "2", "2024-01-01", "test"]),
        )
        .unwrap();
        assert_eq!(manager.current_balance(), 100.0);

        let id = manager.ledger().transactions[0].id.to_string();
        dispatch(&mut manager, &StaticConfirmer(true), &args(&["delete", &id])).unwrap();
        assert_eq!(manager.ledger().transaction_count(), 0);
    }

    #[test]
    fn declined_confirmation_leaves_state_untouched() {
        let mut manager = manager();
        dispatch(&mut manager, &StaticConfirmer(true), &args(&["add", "25"])).unwrap();
        let id = manager.ledger().transactions[0].id.to_string();

        dispatch(&mut manager, &StaticConfirmer(false), &args(&["delete", &id])).unwrap();
        assert_eq!(manager.ledger().transaction_count(), 1);

        dispatch(&mut manager, &StaticConfirmer(false), &args(&["empty"])).unwrap();
        assert_eq!(manager.ledger().vault_total, 0.0);
        assert_eq!(manager.current_balance(), 25.0);
    }

    #[test]
    fn empty_on_a_bare_ledger_is_an_error() {
        let mut manager = manager();
        let err = dispatch(&mut manager, &StaticConfirmer(true), &args(&["empty"]))
            .expect_err("empty must fail");
        assert!(matches!(err, LedgerError::EmptyLedger));
    }

    #[test]
    fn unknown_command_is_a_validation_error() {
        let mut manager = manager();
        let err = dispatch(&mut manager, &StaticConfirmer(true), &args(&["frobnicate"]))
            .expect_err("unknown command must fail");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn bad_arguments_are_reported_not_panicked() {
        let mut manager = manager();
        for bad in [
            vec!["add"],
            vec!["add", "abc"],
            vec!["add", "5", "x"],
            vec!["add", "5", "1", "01/02/2024"],
            vec!["goal", "-1"],
            vec!["delete", "not-a-uuid"],
        ] {
            let err = dispatch(&mut manager, &StaticConfirmer(true), &args(&bad))
                .expect_err("bad arguments must fail");
            assert!(matches!(err, LedgerError::Validation(_)), "args: {bad:?}");
        }
        assert_eq!(manager.ledger().transaction_count(), 0);
    }
}

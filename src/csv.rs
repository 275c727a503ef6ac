//! CSV export/import for the savings ledger.
//!
//! Field values are written verbatim inside double quotes and the tokenizer
//! reads a quoted field up to the next quote, so notes containing embedded
//! quotes or commas do not survive a round trip. Known limitation of the
//! format. The decoder is deliberately lenient: it recovers every row it
//! can and silently drops the rest.

use chrono::NaiveDate;

use crate::ledger::{SavingsLedger, Transaction};

const HEADER: &str = "Date,Amount,Quantity,Total,Note";
const VAULT_PREFIX: &str = "Vault Total,";
const GOAL_PREFIX: &str = "Goal,";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything the decoder could recover from a CSV document.
#[derive(Debug, Default)]
pub struct ImportResult {
    pub transactions: Vec<Transaction>,
    pub vault_total: Option<f64>,
    pub goal: Option<f64>,
    pub skipped_rows: usize,
}

/// Serializes the ledger: header, one quoted row per transaction, a blank
/// line, then the `Vault Total` and `Goal` metadata lines.
pub fn encode(ledger: &SavingsLedger) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for txn in &ledger.transactions {
        out.push_str(&format!(
            "\"{}\",\"{:.2}\",\"{}\",\"{:.2}\",\"{}\"\n",
            txn.date.format(DATE_FORMAT),
            txn.amount,
            txn.quantity,
            txn.total(),
            txn.note
        ));
    }
    out.push('\n');
    out.push_str(&format!("{VAULT_PREFIX}{}\n", ledger.vault_total));
    out.push_str(&format!("{GOAL_PREFIX}{}\n", ledger.goal));
    out
}

/// Parses a CSV document line by line. Never fails: malformed rows are
/// counted in `skipped_rows` and dropped, and metadata lines are applied
/// only when their value parses. The `Total` column is ignored; totals are
/// re-derived from amount and quantity.
pub fn decode(text: &str) -> ImportResult {
    let mut result = ImportResult::default();
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line == HEADER {
            continue;
        }
        if let Some(raw) = line.strip_prefix(VAULT_PREFIX) {
            if let Some(value) = parse_number(raw).filter(|v| *v >= 0.0) {
                result.vault_total = Some(value);
            }
            continue;
        }
        if let Some(raw) = line.strip_prefix(GOAL_PREFIX) {
            if let Some(value) = parse_number(raw).filter(|v| *v > 0.0) {
                result.goal = Some(value);
            }
            continue;
        }
        match parse_row(line) {
            Some(txn) => result.transactions.push(txn),
            None => result.skipped_rows += 1,
        }
    }
    result
}

fn parse_row(line: &str) -> Option<Transaction> {
    let fields = split_fields(line);
    if fields.len() < 4 {
        return None;
    }
    let date = NaiveDate::parse_from_str(fields[0].trim(), DATE_FORMAT).ok()?;
    let amount: f64 = fields[1].trim().parse().ok()?;
    let quantity: u32 = fields[2].trim().parse().ok()?;
    if !amount.is_finite() || amount <= 0.0 || quantity < 1 {
        return None;
    }
    let note = fields.get(4).cloned().unwrap_or_default();
    Some(Transaction::new(amount, quantity, note, date))
}

fn parse_number(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().trim_matches('"').parse().ok()?;
    value.is_finite().then_some(value)
}

/// Splits one line into fields. A field starting with a double quote runs
/// to the next quote, whatever it contains; anything else runs to the next
/// comma. There is no escape mechanism.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&first) = chars.peek() {
        if first == '"' {
            chars.next();
            let mut field = String::new();
            for ch in chars.by_ref() {
                if ch == '"' {
                    break;
                }
                field.push(ch);
            }
            // skip everything up to the separator
            for ch in chars.by_ref() {
                if ch == ',' {
                    break;
                }
            }
            fields.push(field);
        } else {
            let mut field = String::new();
            for ch in chars.by_ref() {
                if ch == ',' {
                    break;
                }
                field.push(ch);
            }
            fields.push(field);
        }
    }
    fields
}

//! SQLite-backed expense ledger.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use tracing::{debug, info};

use tally_core::models::expense::{DailyTotal, ExpenseRecord};

use crate::error::{Result, StoreError};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS expenses (
        date        TEXT NOT NULL,
        description TEXT NOT NULL,
        amount      TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS daily_totals (
        date  TEXT PRIMARY KEY,
        total TEXT NOT NULL
    );
";

/// The expense ledger.
///
/// Owns both the `expenses` detail table and the derived `daily_totals`
/// aggregate. The detail rows are the source of truth; every insert
/// recomputes the day's total from them inside the same transaction, so the
/// aggregate can never drift even under retries or partial failures.
///
/// Amounts and dates are stored as TEXT and round-tripped through
/// `Decimal`/`NaiveDate`, keeping monetary values exact.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Open (or create) a ledger database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open an in-memory ledger, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        info!("ledger opened");
        Ok(Self { conn })
    }

    /// Record one expense and bring the day's aggregate up to date.
    ///
    /// `date` defaults to today. Detail insert and aggregate upsert are one
    /// atomic unit of work: either both apply or neither does. A failure
    /// means the write was not applied and the caller may retry.
    pub fn record_expense(
        &mut self,
        amount: Decimal,
        description: &str,
        date: Option<NaiveDate>,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(StoreError::InvalidAmount(amount));
        }
        let date = date.unwrap_or_else(|| Local::now().date_naive());

        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO expenses (date, description, amount) VALUES (?1, ?2, ?3)",
            params![date.to_string(), description, amount.to_string()],
        )?;

        // Full recomputation over the detail rows, not incremental addition:
        // an increment against a stale aggregate drifts under partial
        // failures and repeated runs.
        let total = day_sum(&tx, date)?;
        tx.execute(
            "INSERT OR REPLACE INTO daily_totals (date, total) VALUES (?1, ?2)",
            params![date.to_string(), total.to_string()],
        )?;

        tx.commit()?;
        debug!(%date, %amount, %total, "expense recorded");
        Ok(())
    }

    /// List expenses, newest date first, newest insertion first within a
    /// date. An exact-match filter restricts to a single calendar day.
    pub fn list_expenses(&self, date: Option<NaiveDate>) -> Result<Vec<ExpenseRecord>> {
        let (sql, filter) = match date {
            Some(d) => (
                "SELECT date, description, amount FROM expenses
                 WHERE date = ?1 ORDER BY date DESC, rowid DESC",
                Some(d.to_string()),
            ),
            None => (
                "SELECT date, description, amount FROM expenses
                 ORDER BY date DESC, rowid DESC",
                None,
            ),
        };

        let mut stmt = self.conn.prepare(sql)?;
        let rows: Vec<(String, String, String)> = match filter {
            Some(d) => stmt
                .query_map(params![d], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })?
                .collect::<std::result::Result<_, _>>()?,
            None => stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
                .collect::<std::result::Result<_, _>>()?,
        };

        rows.into_iter()
            .map(|(date, description, amount)| {
                Ok(ExpenseRecord {
                    date: parse_stored_date(&date)?,
                    description,
                    amount: parse_stored_amount(&amount)?,
                })
            })
            .collect()
    }

    /// List the per-day aggregates, oldest date first.
    pub fn list_daily_totals(&self) -> Result<Vec<DailyTotal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, total FROM daily_totals ORDER BY date ASC")?;
        let rows: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(date, total)| {
                Ok(DailyTotal {
                    date: parse_stored_date(&date)?,
                    total: parse_stored_amount(&total)?,
                })
            })
            .collect()
    }

    /// Check the aggregate against the detail rows, failing loudly on any
    /// drift. A daily_totals row must exist exactly for the dates that have
    /// detail rows, with the matching sum.
    pub fn verify_invariant(&self) -> Result<()> {
        let mut expected: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for record in self.list_expenses(None)? {
            *expected.entry(record.date).or_default() += record.amount;
        }

        let totals = self.list_daily_totals()?;
        for aggregate in &totals {
            let want = expected
                .remove(&aggregate.date)
                .unwrap_or(Decimal::ZERO);
            if aggregate.total != want {
                return Err(StoreError::InvariantViolation {
                    date: aggregate.date,
                    expected: want,
                    actual: aggregate.total,
                });
            }
        }

        // Dates with detail rows but no aggregate row.
        if let Some((date, want)) = expected.into_iter().next() {
            return Err(StoreError::InvariantViolation {
                date,
                expected: want,
                actual: Decimal::ZERO,
            });
        }

        Ok(())
    }
}

fn day_sum(conn: &Connection, date: NaiveDate) -> Result<Decimal> {
    let mut stmt = conn.prepare("SELECT amount FROM expenses WHERE date = ?1")?;
    let rows = stmt.query_map(params![date.to_string()], |row| row.get::<_, String>(0))?;

    let mut total = Decimal::ZERO;
    for raw in rows {
        total += parse_stored_amount(&raw?)?;
    }
    Ok(total)
}

fn parse_stored_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|_| StoreError::Corrupt(format!("amount {raw:?}")))
}

fn parse_stored_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| StoreError::Corrupt(format!("date {raw:?}")))
}

//! Store initializer run once at process start.
//!
//! # Responsibility
//! - Recreate the store file and schema, then seed baseline customers.
//! - Optionally keep an existing store and seed only on first run.
//!
//! # Invariants
//! - `InitMode::Recreate` always yields the same nine-row initial state.
//! - Seed rows are inserted in one transaction, in declaration order, so
//!   their ids are `1..=9` on a fresh store.

use super::open::open_db;
use super::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{params, Connection};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

/// Baseline `(name, age)` rows inserted into a fresh store.
pub const SEED_CUSTOMERS: &[(&str, i64)] = &[
    ("Liana Kim", 20),
    ("Glen Rangel", 21),
    ("Martin Martins", 22),
    ("Alayna Armitage", 23),
    ("Marni Benson", 24),
    ("Derrick Griffiths", 25),
    ("Leigh Daly", 26),
    ("Marni Benson", 27),
    ("Klay Correa", 28),
];

/// How the initializer treats a store file left by a previous run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitMode {
    /// Delete the file and start from the seed set.
    #[default]
    Recreate,
    /// Keep existing data; create schema and seed only on first run.
    Preserve,
}

impl FromStr for InitMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "recreate" => Ok(Self::Recreate),
            "preserve" => Ok(Self::Preserve),
            other => Err(format!(
                "unsupported init mode `{other}`; expected recreate|preserve"
            )),
        }
    }
}

/// Outcome of one initializer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub mode: InitMode,
    /// Number of seed rows inserted by this run.
    pub seeded: usize,
}

/// Prepares the store file at `path` according to `mode`.
///
/// # Errors
/// - `DbError::StoreFile` when the old file cannot be removed or the new
///   one cannot be created.
/// - `DbError::Sqlite` when opening, migrating or seeding fails.
pub fn initialize_store(path: impl AsRef<Path>, mode: InitMode) -> DbResult<SeedReport> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=store_init module=db status=start mode={:?} path={}",
        mode,
        path.display()
    );

    if mode == InitMode::Recreate {
        recreate_file(path)?;
    }

    let (mut conn, previous_version) = open_db(path)?;
    let seeded = if previous_version == 0 {
        seed_customers(&mut conn)?
    } else {
        0
    };
    log_customers(&conn)?;

    info!(
        "event=store_init module=db status=ok mode={:?} seeded={} duration_ms={}",
        mode,
        seeded,
        started_at.elapsed().as_millis()
    );
    Ok(SeedReport { mode, seeded })
}

fn recreate_file(path: &Path) -> DbResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("event=store_file_removed module=db path={}", path.display()),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(DbError::StoreFile {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    File::create(path).map_err(|source| DbError::StoreFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("event=store_file_created module=db path={}", path.display());
    Ok(())
}

fn seed_customers(conn: &mut Connection) -> DbResult<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO Customers (name, age) VALUES (?1, ?2);")?;
        for (name, age) in SEED_CUSTOMERS {
            stmt.execute(params![name, age])?;
        }
    }
    tx.commit()?;
    Ok(SEED_CUSTOMERS.len())
}

fn log_customers(conn: &Connection) -> DbResult<()> {
    if !log::log_enabled!(log::Level::Debug) {
        return Ok(());
    }

    let mut stmt = conn.prepare("SELECT id, name, age FROM Customers ORDER BY name;")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let id: i64 = row.get(0)?;
        let name: String = row.get(1)?;
        let age: i64 = row.get(2)?;
        debug!("event=store_row module=db id={id} name={name:?} age={age}");
    }
    Ok(())
}

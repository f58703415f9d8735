//! Customer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `Customers` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `update_customer` and `delete_customer` are no-ops for absent ids;
//!   existence checks belong to the service layer.
//! - Lists are ordered by `id` ascending.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::customer::{Customer, CustomerDraft, CustomerId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CUSTOMERS_TABLE: &str = "Customers";
const CUSTOMER_SELECT_SQL: &str = "SELECT id, name, age FROM Customers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for customer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Statement preparation or execution failed.
    Db(DbError),
    NotFound(CustomerId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "customer not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store schema version {actual_version} is behind required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for customer CRUD operations.
pub trait CustomerRepository {
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    fn create_customer(&self, draft: &CustomerDraft) -> RepoResult<CustomerId>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    fn update_customer(&self, id: CustomerId, draft: &CustomerDraft) -> RepoResult<()>;
    fn delete_customer(&self, id: CustomerId) -> RepoResult<()>;
}

/// SQLite-backed customer repository borrowing a caller-owned connection.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Wraps `conn` after checking that the store schema is in place.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is behind the latest
    ///   migration.
    /// - `MissingRequiredTable` when `Customers` does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [CUSTOMERS_TABLE],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(RepoError::MissingRequiredTable(CUSTOMERS_TABLE));
        }

        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY id ASC;"))?;
        let customers = stmt
            .query_map([], parse_customer_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }

    fn create_customer(&self, draft: &CustomerDraft) -> RepoResult<CustomerId> {
        self.conn.execute(
            "INSERT INTO Customers (name, age) VALUES (?1, ?2);",
            params![draft.name.as_str(), draft.age],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;
        let customer = stmt.query_row([id], parse_customer_row).optional()?;
        Ok(customer)
    }

    fn update_customer(&self, id: CustomerId, draft: &CustomerDraft) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE Customers SET name = ?1, age = ?2 WHERE id = ?3;",
            params![draft.name.as_str(), draft.age, id],
        )?;
        Ok(())
    }

    fn delete_customer(&self, id: CustomerId) -> RepoResult<()> {
        self.conn.execute("DELETE FROM Customers WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn parse_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get("id")?,
        name: row.get("name")?,
        age: row.get("age")?,
    })
}

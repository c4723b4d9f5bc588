//! Scheme repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the seven scheme/step data-access operations over a migrated
//!   connection.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Identifiers are assigned by the engine on insert; this layer only
//!   reads them back via `last_insert_rowid()`.
//! - `find_steps` orders by `step_number` explicitly; the join alone is
//!   never relied upon for ordering.
//! - Write-then-read sequences (`add`, `remove`, `add_step`) issue two
//!   sequential statements without a wrapping transaction; a concurrent
//!   writer can interleave between them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::scheme::{NewScheme, Scheme, SchemeChanges, SchemeId};
use crate::model::step::{NewStep, SchemeStep, Step};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SCHEME_SELECT_SQL: &str = "SELECT id, scheme_name FROM schemes";

const STEP_SELECT_SQL: &str = "SELECT id, scheme_id, step_number, instructions FROM steps";

const STEP_VIEW_SELECT_SQL: &str = "SELECT
    steps.id,
    schemes.scheme_name,
    steps.step_number,
    steps.instructions
FROM steps
INNER JOIN schemes ON schemes.id = steps.scheme_id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for scheme persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A row written by this call was gone on the immediate read-back.
    InconsistentState(&'static str),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent scheme storage state: {details}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{column}` is missing from table `{table}`")
            }
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

/// Repository interface for scheme and step data access.
pub trait SchemeRepository {
    /// Lists all schemes, no steps attached.
    fn find(&self) -> RepoResult<Vec<Scheme>>;
    /// Gets one scheme by id; unknown ids yield `None`.
    fn find_by_id(&self, id: SchemeId) -> RepoResult<Option<Scheme>>;
    /// Lists a scheme's steps joined with the scheme name, ordered by
    /// `step_number` ascending.
    fn find_steps(&self, scheme_id: SchemeId) -> RepoResult<Vec<SchemeStep>>;
    /// Inserts a scheme and returns the materialized row.
    fn add(&self, scheme: &NewScheme) -> RepoResult<Scheme>;
    /// Applies partial changes to one scheme, then reloads it. Unknown
    /// ids update nothing and yield `None`.
    fn update(&self, changes: &SchemeChanges, id: SchemeId) -> RepoResult<Option<Scheme>>;
    /// Deletes one scheme and returns its pre-deletion snapshot, or
    /// `None` when the id matches nothing.
    fn remove(&self, id: SchemeId) -> RepoResult<Option<Scheme>>;
    /// Inserts a step for the given scheme and returns the materialized
    /// row. Referential integrity is enforced by the engine, not here.
    fn add_step(&self, step: &NewStep, scheme_id: SchemeId) -> RepoResult<Step>;
}

/// SQLite-backed scheme repository.
pub struct SqliteSchemeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSchemeRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// Rejects connections whose schema version does not match this
    /// binary or whose required tables/columns are absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SchemeRepository for SqliteSchemeRepository<'_> {
    fn find(&self) -> RepoResult<Vec<Scheme>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SCHEME_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut schemes = Vec::new();
        while let Some(row) = rows.next()? {
            schemes.push(parse_scheme_row(row)?);
        }
        Ok(schemes)
    }

    fn find_by_id(&self, id: SchemeId) -> RepoResult<Option<Scheme>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SCHEME_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_scheme_row(row)?));
        }
        Ok(None)
    }

    fn find_steps(&self, scheme_id: SchemeId) -> RepoResult<Vec<SchemeStep>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STEP_VIEW_SELECT_SQL}
             WHERE steps.scheme_id = ?1
             ORDER BY steps.step_number ASC, steps.id ASC;"
        ))?;
        let mut rows = stmt.query(params![scheme_id])?;
        let mut steps = Vec::new();
        while let Some(row) = rows.next()? {
            steps.push(SchemeStep {
                id: row.get("id")?,
                scheme_name: row.get("scheme_name")?,
                step_number: row.get("step_number")?,
                instructions: row.get("instructions")?,
            });
        }
        Ok(steps)
    }

    fn add(&self, scheme: &NewScheme) -> RepoResult<Scheme> {
        self.conn.execute(
            "INSERT INTO schemes (scheme_name) VALUES (?1);",
            params![scheme.scheme_name.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();

        self.find_by_id(id)?.ok_or(RepoError::InconsistentState(
            "inserted scheme missing on read-back",
        ))
    }

    fn update(&self, changes: &SchemeChanges, id: SchemeId) -> RepoResult<Option<Scheme>> {
        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(scheme_name) = changes.scheme_name.as_ref() {
            assignments.push("scheme_name = ?");
            bind_values.push(Value::Text(scheme_name.clone()));
        }

        if !assignments.is_empty() {
            let sql = format!(
                "UPDATE schemes SET {} WHERE id = ?;",
                assignments.join(", ")
            );
            bind_values.push(Value::Integer(id));
            self.conn.execute(&sql, params_from_iter(bind_values))?;
        }

        self.find_by_id(id)
    }

    fn remove(&self, id: SchemeId) -> RepoResult<Option<Scheme>> {
        let snapshot = match self.find_by_id(id)? {
            Some(scheme) => scheme,
            None => return Ok(None),
        };

        self.conn
            .execute("DELETE FROM schemes WHERE id = ?1;", params![id])?;

        Ok(Some(snapshot))
    }

    fn add_step(&self, step: &NewStep, scheme_id: SchemeId) -> RepoResult<Step> {
        self.conn.execute(
            "INSERT INTO steps (scheme_id, step_number, instructions) VALUES (?1, ?2, ?3);",
            params![scheme_id, step.step_number, step.instructions.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();

        let mut stmt = self
            .conn
            .prepare(&format!("{STEP_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return parse_step_row(row);
        }

        Err(RepoError::InconsistentState(
            "inserted step missing on read-back",
        ))
    }
}

fn parse_scheme_row(row: &Row<'_>) -> RepoResult<Scheme> {
    Ok(Scheme {
        id: row.get("id")?,
        scheme_name: row.get("scheme_name")?,
    })
}

fn parse_step_row(row: &Row<'_>) -> RepoResult<Step> {
    Ok(Step {
        id: row.get("id")?,
        scheme_id: row.get("scheme_id")?,
        step_number: row.get("step_number")?,
        instructions: row.get("instructions")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for (table, columns) in [
        ("schemes", &["id", "scheme_name"][..]),
        ("steps", &["id", "scheme_id", "step_number", "instructions"][..]),
    ] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

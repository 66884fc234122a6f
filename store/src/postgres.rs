//! PostgreSQL store implementation.
//!
//! Queries are runtime-checked (`sqlx::query`) with manual row
//! mapping, so the crate builds without a live database. Writes use
//! `RETURNING` to hand back the stored row, and unique-constraint
//! violations are mapped back to wire field names so the mutation
//! actions can produce per-field errors.

use crate::error::{Result, StoreError};
use crate::provider::{CustomerStore, TicketStore};
use repairshop_core::{Customer, CustomerPayload, Ticket, TicketPayload, TicketSummary};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, email, phone, address1, address2, \
     city, state, zip, notes, active, created_at, updated_at";

const TICKET_COLUMNS: &str =
    "id, customer_id, title, description, tech, completed, created_at, updated_at";

const TICKET_SUMMARY_SELECT: &str = "SELECT t.id, t.created_at AS ticket_date, t.title, t.tech, t.completed, \
            c.first_name, c.last_name, c.email \
     FROM tickets t \
     LEFT JOIN customers c ON t.customer_id = c.id";

/// PostgreSQL-backed store for customers and tickets.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `url` with a small default pool.
    ///
    /// # Errors
    ///
    /// Returns `Database` when the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(map_sqlx)?;
        Ok(Self::new(pool))
    }

    /// Run the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns `Database` when a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("migration failed: {e}")))
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CustomerStore for PostgresStore {
    async fn insert_customer(&self, data: &CustomerPayload) -> Result<Customer> {
        let sql = format!(
            "INSERT INTO customers \
                 (first_name, last_name, email, phone, address1, address2, city, state, zip, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {CUSTOMER_COLUMNS}"
        );
        sqlx::query(&sql)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.address1)
            .bind(&data.address2)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.zip)
            .bind(&data.notes)
            .try_map(|row: PgRow| customer_from_row(&row))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn update_customer(&self, id: i32, data: &CustomerPayload) -> Result<Customer> {
        let sql = format!(
            "UPDATE customers \
             SET first_name = $2, last_name = $3, email = $4, phone = $5, address1 = $6, \
                 address2 = $7, city = $8, state = $9, zip = $10, notes = $11, active = $12, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {CUSTOMER_COLUMNS}"
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.address1)
            .bind(&data.address2)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.zip)
            .bind(&data.notes)
            .bind(data.active)
            .try_map(|row: PgRow| customer_from_row(&row))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_customer(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY last_name ASC");
        sqlx::query(&sql)
            .try_map(|row: PgRow| customer_from_row(&row))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn get_customer(&self, id: i32) -> Result<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        sqlx::query(&sql)
            .bind(id)
            .try_map(|row: PgRow| customer_from_row(&row))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn search_customers(&self, pattern: &str) -> Result<Vec<Customer>> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE LOWER(email) LIKE $1 \
                OR LOWER(phone) LIKE $1 \
                OR LOWER(city) LIKE $1 \
                OR LOWER(zip) LIKE $1 \
                OR LOWER(first_name || ' ' || last_name) LIKE $1 \
             ORDER BY last_name ASC"
        );
        sqlx::query(&sql)
            .bind(pattern)
            .try_map(|row: PgRow| customer_from_row(&row))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}

impl TicketStore for PostgresStore {
    async fn insert_ticket(&self, data: &TicketPayload) -> Result<Ticket> {
        let sql = format!(
            "INSERT INTO tickets (customer_id, title, description, tech) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query(&sql)
            .bind(data.customer_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(&data.tech)
            .try_map(|row: PgRow| ticket_from_row(&row))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn update_ticket(&self, id: i32, data: &TicketPayload) -> Result<Ticket> {
        let sql = format!(
            "UPDATE tickets \
             SET customer_id = $2, title = $3, description = $4, tech = $5, \
                 completed = COALESCE($6, completed), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(data.customer_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(&data.tech)
            .bind(data.completed)
            .try_map(|row: PgRow| ticket_from_row(&row))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or(StoreError::NotFound)
    }

    async fn get_ticket(&self, id: i32) -> Result<Option<Ticket>> {
        let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query(&sql)
            .bind(id)
            .try_map(|row: PgRow| ticket_from_row(&row))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn search_tickets(&self, pattern: &str) -> Result<Vec<TicketSummary>> {
        let sql = format!(
            "{TICKET_SUMMARY_SELECT} \
             WHERE LOWER(t.title) LIKE $1 \
                OR LOWER(t.tech) LIKE $1 \
                OR LOWER(c.email) LIKE $1 \
                OR LOWER(c.phone) LIKE $1 \
                OR LOWER(c.city) LIKE $1 \
                OR LOWER(c.zip) LIKE $1 \
                OR LOWER(c.first_name || ' ' || c.last_name) LIKE $1 \
             ORDER BY t.created_at ASC"
        );
        sqlx::query(&sql)
            .bind(pattern)
            .try_map(|row: PgRow| summary_from_row(&row))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn open_tickets(&self) -> Result<Vec<TicketSummary>> {
        let sql = format!(
            "{TICKET_SUMMARY_SELECT} \
             WHERE t.completed = FALSE \
             ORDER BY t.created_at ASC"
        );
        sqlx::query(&sql)
            .try_map(|row: PgRow| summary_from_row(&row))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}

fn customer_from_row(row: &PgRow) -> sqlx::Result<Customer> {
    Ok(Customer {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        address1: row.try_get("address1")?,
        address2: row.try_get("address2")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        zip: row.try_get("zip")?,
        notes: row.try_get("notes")?,
        active: row.try_get("active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn ticket_from_row(row: &PgRow) -> sqlx::Result<Ticket> {
    Ok(Ticket {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        tech: row.try_get("tech")?,
        completed: row.try_get("completed")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn summary_from_row(row: &PgRow) -> sqlx::Result<TicketSummary> {
    Ok(TicketSummary {
        id: row.try_get("id")?,
        ticket_date: row.try_get("ticket_date")?,
        title: row.try_get("title")?,
        tech: row.try_get("tech")?,
        completed: row.try_get("completed")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
    })
}

fn map_sqlx(error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return StoreError::UniqueViolation {
                fields: constraint_fields(db.constraint()),
            };
        }
    }
    if matches!(error, sqlx::Error::RowNotFound) {
        return StoreError::NotFound;
    }
    StoreError::Database(error.to_string())
}

/// Recover wire field names from a PostgreSQL unique-constraint name
/// such as `customers_email_key`.
fn constraint_fields(constraint: Option<&str>) -> Vec<String> {
    let Some(name) = constraint else {
        return vec!["form".to_string()];
    };
    let trimmed = name
        .strip_suffix("_key")
        .or_else(|| name.strip_suffix("_idx"))
        .unwrap_or(name);
    let column = trimmed
        .strip_prefix("customers_")
        .or_else(|| trimmed.strip_prefix("tickets_"))
        .unwrap_or(trimmed);
    vec![wire_field(column)]
}

/// snake_case column name to the camelCase wire spelling.
fn wire_field(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut upper_next = false;
    for c in column.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

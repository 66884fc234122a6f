//! In-memory store for tests.

use crate::error::{Result, StoreError};
use crate::provider::{CustomerStore, TicketStore};
use chrono::Utc;
use repairshop_core::{Customer, CustomerPayload, Ticket, TicketPayload, TicketSummary};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory [`CustomerStore`] and [`TicketStore`] with the same
/// uniqueness and referential semantics as the real database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    customers: BTreeMap<i32, Customer>,
    tickets: BTreeMap<i32, Ticket>,
    next_customer_id: i32,
    next_ticket_id: i32,
    fail_writes: bool,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a database error.
    pub fn fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_writes = fail;
        }
    }

    /// Number of stored customers.
    #[must_use]
    pub fn customer_count(&self) -> usize {
        self.inner.lock().map(|i| i.customers.len()).unwrap_or(0)
    }

    /// Number of stored tickets.
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.inner.lock().map(|i| i.tickets.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".to_string()))
    }
}

impl Inner {
    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(StoreError::Database("injected failure".to_string()));
        }
        Ok(())
    }

    fn check_unique_email(&self, email: &str, exclude_id: Option<i32>) -> Result<()> {
        let taken = self
            .customers
            .values()
            .any(|c| c.email == email && Some(c.id) != exclude_id);
        if taken {
            return Err(StoreError::UniqueViolation {
                fields: vec!["email".to_string()],
            });
        }
        Ok(())
    }

    fn summary(&self, ticket: &Ticket) -> TicketSummary {
        let customer = self.customers.get(&ticket.customer_id);
        TicketSummary {
            id: ticket.id,
            ticket_date: ticket.created_at,
            title: ticket.title.clone(),
            tech: ticket.tech.clone(),
            completed: ticket.completed,
            first_name: customer.map(|c| c.first_name.clone()),
            last_name: customer.map(|c| c.last_name.clone()),
            email: customer.map(|c| c.email.clone()),
        }
    }
}

impl CustomerStore for MemoryStore {
    async fn insert_customer(&self, data: &CustomerPayload) -> Result<Customer> {
        let mut inner = self.lock()?;
        inner.check_writable()?;
        inner.check_unique_email(&data.email, None)?;
        inner.next_customer_id += 1;
        let now = Utc::now();
        let customer = Customer {
            id: inner.next_customer_id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            address1: data.address1.clone(),
            address2: data.address2.clone(),
            city: data.city.clone(),
            state: data.state.clone(),
            zip: data.zip.clone(),
            notes: data.notes.clone(),
            active: true,
            created_at: now,
            updated_at: now,
        };
        inner.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn update_customer(&self, id: i32, data: &CustomerPayload) -> Result<Customer> {
        let mut inner = self.lock()?;
        inner.check_writable()?;
        if !inner.customers.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        inner.check_unique_email(&data.email, Some(id))?;
        let now = Utc::now();
        let Some(customer) = inner.customers.get_mut(&id) else {
            return Err(StoreError::NotFound);
        };
        customer.first_name = data.first_name.clone();
        customer.last_name = data.last_name.clone();
        customer.email = data.email.clone();
        customer.phone = data.phone.clone();
        customer.address1 = data.address1.clone();
        customer.address2 = data.address2.clone();
        customer.city = data.city.clone();
        customer.state = data.state.clone();
        customer.zip = data.zip.clone();
        customer.notes = data.notes.clone();
        customer.active = data.active;
        customer.updated_at = now;
        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: i32) -> Result<()> {
        let mut inner = self.lock()?;
        inner.check_writable()?;
        if inner.customers.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let inner = self.lock()?;
        let mut customers: Vec<_> = inner.customers.values().cloned().collect();
        customers.sort_by(|a, b| a.last_name.cmp(&b.last_name).then(a.id.cmp(&b.id)));
        Ok(customers)
    }

    async fn get_customer(&self, id: i32) -> Result<Option<Customer>> {
        Ok(self.lock()?.customers.get(&id).cloned())
    }

    async fn search_customers(&self, pattern: &str) -> Result<Vec<Customer>> {
        let inner = self.lock()?;
        let mut hits: Vec<_> = inner
            .customers
            .values()
            .filter(|c| {
                let full_name = format!("{} {}", c.first_name, c.last_name);
                [&c.email, &c.phone, &c.city, &c.zip, &full_name]
                    .iter()
                    .any(|field| like_match(pattern, &field.to_lowercase()))
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.last_name.cmp(&b.last_name).then(a.id.cmp(&b.id)));
        Ok(hits)
    }
}

impl TicketStore for MemoryStore {
    async fn insert_ticket(&self, data: &TicketPayload) -> Result<Ticket> {
        let mut inner = self.lock()?;
        inner.check_writable()?;
        if !inner.customers.contains_key(&data.customer_id) {
            return Err(StoreError::Database(
                "insert or update on table \"tickets\" violates foreign key constraint \
                 \"tickets_customer_id_fkey\""
                    .to_string(),
            ));
        }
        inner.next_ticket_id += 1;
        let now = Utc::now();
        let ticket = Ticket {
            id: inner.next_ticket_id,
            customer_id: data.customer_id,
            title: data.title.clone(),
            description: data.description.clone(),
            tech: data.tech.clone(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        inner.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket(&self, id: i32, data: &TicketPayload) -> Result<Ticket> {
        let mut inner = self.lock()?;
        inner.check_writable()?;
        let now = Utc::now();
        let Some(ticket) = inner.tickets.get_mut(&id) else {
            return Err(StoreError::NotFound);
        };
        ticket.customer_id = data.customer_id;
        ticket.title = data.title.clone();
        ticket.description = data.description.clone();
        ticket.tech = data.tech.clone();
        if let Some(completed) = data.completed {
            ticket.completed = completed;
        }
        ticket.updated_at = now;
        Ok(ticket.clone())
    }

    async fn get_ticket(&self, id: i32) -> Result<Option<Ticket>> {
        Ok(self.lock()?.tickets.get(&id).cloned())
    }

    async fn search_tickets(&self, pattern: &str) -> Result<Vec<TicketSummary>> {
        let inner = self.lock()?;
        let mut hits: Vec<_> = inner
            .tickets
            .values()
            .filter(|t| {
                let mut fields = vec![t.title.clone(), t.tech.clone()];
                if let Some(c) = inner.customers.get(&t.customer_id) {
                    fields.push(c.email.clone());
                    fields.push(c.phone.clone());
                    fields.push(c.city.clone());
                    fields.push(c.zip.clone());
                    fields.push(format!("{} {}", c.first_name, c.last_name));
                }
                fields
                    .iter()
                    .any(|field| like_match(pattern, &field.to_lowercase()))
            })
            .map(|t| inner.summary(t))
            .collect();
        hits.sort_by(|a, b| a.ticket_date.cmp(&b.ticket_date).then(a.id.cmp(&b.id)));
        Ok(hits)
    }

    async fn open_tickets(&self) -> Result<Vec<TicketSummary>> {
        let inner = self.lock()?;
        let mut open: Vec<_> = inner
            .tickets
            .values()
            .filter(|t| !t.completed)
            .map(|t| inner.summary(t))
            .collect();
        open.sort_by(|a, b| a.ticket_date.cmp(&b.ticket_date).then(a.id.cmp(&b.id)));
        Ok(open)
    }
}

/// Match `text` against a SQL `LIKE` pattern containing `%` wildcards.
fn like_match(pattern: &str, text: &str) -> bool {
    let segments: Vec<&str> = pattern.split('%').collect();
    let Some((first, rest)) = segments.split_first() else {
        return text.is_empty();
    };
    let Some(mut remaining) = text.strip_prefix(first) else {
        return false;
    };
    let Some((last, middle)) = rest.split_last() else {
        // No wildcard at all: exact match required.
        return remaining.is_empty();
    };
    for segment in middle {
        match remaining.find(segment) {
            Some(at) => remaining = &remaining[at + segment.len()..],
            None => return false,
        }
    }
    remaining.ends_with(last)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use repairshop_core::{NEW_CUSTOMER_ID, TicketId, UNASSIGNED_TECH};

    fn customer_payload(email: &str) -> CustomerPayload {
        CustomerPayload {
            id: NEW_CUSTOMER_ID,
            first_name: "Dana".to_string(),
            last_name: "Smith".to_string(),
            email: email.to_string(),
            phone: "555-123-4567".to_string(),
            address1: "1 Main St".to_string(),
            address2: None,
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
            notes: None,
            active: true,
        }
    }

    fn ticket_payload(customer_id: i32, title: &str) -> TicketPayload {
        TicketPayload {
            id: TicketId::New,
            customer_id,
            title: title.to_string(),
            description: "broken".to_string(),
            tech: UNASSIGNED_TECH.to_string(),
            completed: None,
        }
    }

    #[test]
    fn like_match_handles_wildcards() {
        assert!(like_match("%smith%", "dana smith"));
        assert!(like_match("%dana%smith%", "dana q smith"));
        assert!(!like_match("%smith%", "jones"));
        assert!(like_match("%%", ""));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryStore::new();
        store.insert_customer(&customer_payload("dana@example.com")).await.unwrap();
        let err = store
            .insert_customer(&customer_payload("dana@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { fields } if fields == ["email"]));
    }

    #[tokio::test]
    async fn update_keeps_own_email_but_rejects_a_taken_one() {
        let store = MemoryStore::new();
        let a = store.insert_customer(&customer_payload("a@example.com")).await.unwrap();
        store.insert_customer(&customer_payload("b@example.com")).await.unwrap();

        assert!(store.update_customer(a.id, &customer_payload("a@example.com")).await.is_ok());
        let err = store
            .update_customer(a.id, &customer_payload("b@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn delete_missing_customer_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete_customer(99).await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn ticket_insert_requires_an_existing_customer() {
        let store = MemoryStore::new();
        let err = store.insert_ticket(&ticket_payload(42, "No power")).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(msg) if msg.contains("foreign key")));
    }

    #[tokio::test]
    async fn update_without_completed_keeps_the_stored_flag() {
        let store = MemoryStore::new();
        let customer = store.insert_customer(&customer_payload("a@example.com")).await.unwrap();
        let ticket = store.insert_ticket(&ticket_payload(customer.id, "No power")).await.unwrap();

        let mut done = ticket_payload(customer.id, "No power");
        done.completed = Some(true);
        assert!(store.update_ticket(ticket.id, &done).await.unwrap().completed);

        let untouched = ticket_payload(customer.id, "Still no power");
        let updated = store.update_ticket(ticket.id, &untouched).await.unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Still no power");
    }

    #[tokio::test]
    async fn ticket_search_matches_joined_customer_and_orders_by_creation() {
        let store = MemoryStore::new();
        let smith = store.insert_customer(&customer_payload("dana@example.com")).await.unwrap();
        let jones = store
            .insert_customer(&CustomerPayload {
                first_name: "Lee".to_string(),
                last_name: "Jones".to_string(),
                email: "lee@example.com".to_string(),
                ..customer_payload("lee@example.com")
            })
            .await
            .unwrap();

        store.insert_ticket(&ticket_payload(smith.id, "Cracked screen")).await.unwrap();
        store.insert_ticket(&ticket_payload(jones.id, "No power")).await.unwrap();
        store.insert_ticket(&ticket_payload(smith.id, "Dead battery")).await.unwrap();

        // Matches through the joined customer name, not the titles.
        let hits = store.search_tickets("%smith%").await.unwrap();
        let titles: Vec<_> = hits.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Cracked screen", "Dead battery"]);
        assert!(hits[0].ticket_date <= hits[1].ticket_date);

        // Title matching works too.
        let hits = store.search_tickets("%power%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name.as_deref(), Some("Jones"));
    }

    #[tokio::test]
    async fn open_tickets_join_customer_fields() {
        let store = MemoryStore::new();
        let customer = store.insert_customer(&customer_payload("a@example.com")).await.unwrap();
        store.insert_ticket(&ticket_payload(customer.id, "First")).await.unwrap();
        let second = store.insert_ticket(&ticket_payload(customer.id, "Second")).await.unwrap();

        let mut done = ticket_payload(customer.id, "Second");
        done.completed = Some(true);
        store.update_ticket(second.id, &done).await.unwrap();

        let open = store.open_tickets().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "First");
        assert_eq!(open[0].email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn injected_failures_surface_as_database_errors() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let err = store.insert_customer(&customer_payload("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }
}

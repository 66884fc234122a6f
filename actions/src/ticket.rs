//! Ticket mutations.

use crate::outcome::{session_is_valid, ActionOutcome};
use repairshop_auth::SessionProvider;
use repairshop_core::{validate_ticket, ActionResult, TicketForm, TicketId};
use repairshop_store::queries::{ticket_key, OPEN_TICKETS_KEY};
use repairshop_store::{QueryCache, StoreError, TicketStore};

/// Create or update a ticket from submitted form data.
///
/// The `"(New)"` id sentinel creates; a numeric id updates that row.
/// On success the stale cached views are invalidated.
pub async fn save_ticket<S: TicketStore>(
    store: &S,
    session: &dyn SessionProvider,
    cache: &QueryCache,
    form: &TicketForm,
) -> ActionOutcome {
    let payload = match validate_ticket(form) {
        Ok(payload) => payload,
        Err(errors) => return ActionResult::validation_failed(errors).into(),
    };

    if !session_is_valid(session).await {
        return ActionOutcome::RedirectToLogin;
    }

    match payload.id {
        TicketId::New => match store.insert_ticket(&payload).await {
            Ok(ticket) => {
                cache.invalidate(OPEN_TICKETS_KEY).await;
                ActionResult::created(format!("Ticket ID #{} created successfully", ticket.id))
                    .into()
            }
            Err(error) => save_failure(&error).into(),
        },
        TicketId::Existing(id) => match store.update_ticket(id, &payload).await {
            Ok(ticket) => {
                cache.invalidate(OPEN_TICKETS_KEY).await;
                cache.invalidate(&ticket_key(ticket.id)).await;
                ActionResult::ok(format!("Ticket ID #{} updated successfully", ticket.id)).into()
            }
            Err(error) => save_failure(&error).into(),
        },
    }
}

fn save_failure(error: &StoreError) -> ActionResult {
    match error {
        StoreError::UniqueViolation { fields } => ActionResult::unique_conflict(fields),
        other => {
            tracing::error!(error = %other, "ticket save failed");
            ActionResult::internal("Internal server error while saving ticket")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use repairshop_auth::mocks::MockSessionProvider;
    use repairshop_core::{CustomerPayload, NEW_CUSTOMER_ID};
    use repairshop_store::mocks::MemoryStore;
    use repairshop_store::CustomerStore;
    use serde_json::json;

    async fn store_with_customer() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_customer(&CustomerPayload {
                id: NEW_CUSTOMER_ID,
                first_name: "Dana".to_string(),
                last_name: "Smith".to_string(),
                email: "dana@example.com".to_string(),
                phone: "555-123-4567".to_string(),
                address1: "1 Main St".to_string(),
                address2: None,
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
                notes: None,
                active: true,
            })
            .await
            .unwrap();
        store
    }

    fn valid_form() -> TicketForm {
        TicketForm {
            id: TicketId::New,
            customer_id: 1,
            title: "No power".to_string(),
            description: "Does not turn on".to_string(),
            tech: "tech@example.com".to_string(),
            completed: None,
        }
    }

    #[tokio::test]
    async fn create_reports_the_new_id_and_invalidates_open_tickets() {
        let store = store_with_customer().await;
        let cache = QueryCache::default();
        cache.insert(OPEN_TICKETS_KEY, json!([])).await;
        let session = MockSessionProvider::authenticated("tech@example.com");

        let outcome = save_ticket(&store, &session, &cache, &valid_form()).await;
        let result = outcome.result().unwrap();
        assert_eq!(result.status, 201);
        assert_eq!(result.message, "Ticket ID #1 created successfully");
        assert!(!cache.contains(OPEN_TICKETS_KEY).await);
    }

    #[tokio::test]
    async fn update_invalidates_the_ticket_view_too() {
        let store = store_with_customer().await;
        let cache = QueryCache::default();
        let session = MockSessionProvider::authenticated("tech@example.com");

        save_ticket(&store, &session, &cache, &valid_form()).await;
        cache.insert(OPEN_TICKETS_KEY, json!([])).await;
        cache.insert(&ticket_key(1), json!({})).await;

        let form = TicketForm {
            id: TicketId::Existing(1),
            completed: Some(true),
            ..valid_form()
        };
        let outcome = save_ticket(&store, &session, &cache, &form).await;
        let result = outcome.result().unwrap();
        assert_eq!(result.status, 200);
        assert_eq!(result.message, "Ticket ID #1 updated successfully");
        assert!(!cache.contains(OPEN_TICKETS_KEY).await);
        assert!(!cache.contains(&ticket_key(1)).await);
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_with_field_errors() {
        let store = store_with_customer().await;
        let cache = QueryCache::default();
        let session = MockSessionProvider::unreachable();

        let form = TicketForm {
            title: String::new(),
            tech: "not-an-email".to_string(),
            ..valid_form()
        };
        let outcome = save_ticket(&store, &session, &cache, &form).await;
        let result = outcome.result().unwrap();
        assert_eq!(result.status, 400);
        let error = result.error.as_ref().unwrap();
        assert_eq!(error["title"], "Title is required");
        assert_eq!(error["tech"], "Invalid email address");
        assert_eq!(store.ticket_count(), 0);
    }

    #[tokio::test]
    async fn anonymous_caller_is_redirected() {
        let store = store_with_customer().await;
        let cache = QueryCache::default();
        let session = MockSessionProvider::anonymous();

        let outcome = save_ticket(&store, &session, &cache, &valid_form()).await;
        assert_eq!(outcome, ActionOutcome::RedirectToLogin);
        assert_eq!(store.ticket_count(), 0);
    }

    #[tokio::test]
    async fn missing_customer_is_an_internal_error() {
        let store = MemoryStore::new();
        let cache = QueryCache::default();
        let session = MockSessionProvider::authenticated("tech@example.com");

        let outcome = save_ticket(&store, &session, &cache, &valid_form()).await;
        let result = outcome.result().unwrap();
        assert_eq!(result.status, 500);
        assert_eq!(result.message, "Internal server error while saving ticket");
    }
}

//! Customer mutations.

use crate::outcome::{session_is_valid, ActionOutcome};
use repairshop_auth::SessionProvider;
use repairshop_core::{validate_customer, ActionResult, CustomerForm, NEW_CUSTOMER_ID};
use repairshop_store::queries::{customer_key, CUSTOMER_LIST_KEY};
use repairshop_store::{CustomerStore, QueryCache, StoreError};

/// Create or update a customer from submitted form data.
///
/// An id of [`NEW_CUSTOMER_ID`] creates; anything else updates that
/// row. On success the stale cached views are invalidated.
pub async fn save_customer<S: CustomerStore>(
    store: &S,
    session: &dyn SessionProvider,
    cache: &QueryCache,
    form: &CustomerForm,
) -> ActionOutcome {
    let payload = match validate_customer(form) {
        Ok(payload) => payload,
        Err(errors) => return ActionResult::validation_failed(errors).into(),
    };

    if !session_is_valid(session).await {
        return ActionOutcome::RedirectToLogin;
    }

    if payload.id == NEW_CUSTOMER_ID {
        match store.insert_customer(&payload).await {
            Ok(customer) => {
                cache.invalidate(CUSTOMER_LIST_KEY).await;
                ActionResult::created(format!(
                    "Customer created successfully (ID: {})",
                    customer.id
                ))
                .into()
            }
            Err(error) => save_failure(&error).into(),
        }
    } else {
        match store.update_customer(payload.id, &payload).await {
            Ok(customer) => {
                cache.invalidate(CUSTOMER_LIST_KEY).await;
                cache.invalidate(&customer_key(customer.id)).await;
                ActionResult::ok(format!(
                    "Customer updated successfully (ID: {})",
                    customer.id
                ))
                .into()
            }
            Err(error) => save_failure(&error).into(),
        }
    }
}

fn save_failure(error: &StoreError) -> ActionResult {
    match error {
        StoreError::UniqueViolation { fields } => ActionResult::unique_conflict(fields),
        other => {
            tracing::error!(error = %other, "customer save failed");
            ActionResult::internal("Internal server error while saving customer")
        }
    }
}

/// Delete a customer by id.
///
/// Deliberately unauthenticated at this layer; the route carrying it
/// sits behind the same proxy gate as everything else.
pub async fn delete_customer<S: CustomerStore>(
    store: &S,
    cache: &QueryCache,
    id: i32,
) -> ActionResult {
    match store.delete_customer(id).await {
        Ok(()) => {
            cache.invalidate(CUSTOMER_LIST_KEY).await;
            cache.invalidate(&customer_key(id)).await;
            ActionResult::ok(format!("deleted customer successfully (ID: {id})"))
        }
        Err(error) => {
            tracing::error!(error = %error, id, "customer delete failed");
            ActionResult::internal("internalServerError")
        }
    }
}

//! Repair ticket records and their validation schema.

use crate::fields::FieldErrors;
use crate::validate;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel value marking a ticket that has not been persisted yet.
pub const NEW_TICKET_SENTINEL: &str = "(New)";

/// Placeholder assignee for tickets nobody has picked up.
pub const UNASSIGNED_TECH: &str = "new-ticket@example.com";

/// Ticket identity: a persisted integer id or the `"(New)"` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TicketId {
    /// Not yet created.
    #[default]
    New,
    /// Persisted row id.
    Existing(i32),
}

impl TicketId {
    /// Whether this is the not-yet-created sentinel.
    #[must_use]
    pub const fn is_new(self) -> bool {
        matches!(self, Self::New)
    }
}

impl Serialize for TicketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::New => serializer.serialize_str(NEW_TICKET_SENTINEL),
            Self::Existing(id) => serializer.serialize_i32(*id),
        }
    }
}

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(i32),
            Sentinel(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(Self::Existing(id)),
            Raw::Sentinel(text) if text == NEW_TICKET_SENTINEL => Ok(Self::New),
            Raw::Sentinel(text) => Err(D::Error::custom(format!(
                "expected a ticket id or {NEW_TICKET_SENTINEL:?}, got {text:?}"
            ))),
        }
    }
}

/// A ticket row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Persistent integer id.
    pub id: i32,
    /// Owning customer id.
    pub customer_id: i32,
    /// Short problem title.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Assigned technician email ([`UNASSIGNED_TECH`] when unassigned).
    pub tech: String,
    /// Whether the repair is done.
    pub completed: bool,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Flattened ticket listing/search row with joined customer fields.
///
/// Customer columns are optional because search results come from a
/// left join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    /// Ticket id.
    pub id: i32,
    /// Ticket creation time, renamed for the listing views.
    pub ticket_date: DateTime<Utc>,
    /// Short problem title.
    pub title: String,
    /// Assigned technician email.
    pub tech: String,
    /// Whether the repair is done.
    pub completed: bool,
    /// Joined customer given name.
    pub first_name: Option<String>,
    /// Joined customer family name.
    pub last_name: Option<String>,
    /// Joined customer email.
    pub email: Option<String>,
}

/// Raw ticket form data, as submitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketForm {
    /// Existing id or the `"(New)"` sentinel.
    pub id: TicketId,
    /// Owning customer id; must reference an existing customer.
    pub customer_id: i32,
    /// Short problem title.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Assignee email; defaults to the unassigned placeholder.
    pub tech: String,
    /// Completion flag; absent leaves the stored value untouched.
    pub completed: Option<bool>,
}

impl Default for TicketForm {
    fn default() -> Self {
        Self {
            id: TicketId::New,
            customer_id: 0,
            title: String::new(),
            description: String::new(),
            tech: UNASSIGNED_TECH.to_string(),
            completed: None,
        }
    }
}

/// A validated ticket write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPayload {
    /// Target identity (sentinel inserts, id updates).
    pub id: TicketId,
    /// Owning customer id.
    pub customer_id: i32,
    /// Short problem title.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Assignee email.
    pub tech: String,
    /// Completion flag; `None` keeps the stored value on update and
    /// the store default on insert.
    pub completed: Option<bool>,
}

/// Validate a submitted ticket form.
///
/// # Errors
///
/// Returns a field-keyed error map (first violation per field) when
/// any rule fails.
pub fn validate_ticket(form: &TicketForm) -> Result<TicketPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check(form.customer_id > 0, "customerId", "Required");
    errors.check(!form.title.trim().is_empty(), "title", "Title is required");
    errors.check(
        !form.description.trim().is_empty(),
        "description",
        "Description is required",
    );
    errors.check(
        validate::is_valid_email(&form.tech),
        "tech",
        "Invalid email address",
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TicketPayload {
        id: form.id,
        customer_id: form.customer_id,
        title: form.title.clone(),
        description: form.description.clone(),
        tech: form.tech.clone(),
        completed: form.completed,
    })
}

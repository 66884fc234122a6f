//! Customer records and their validation schema.

use crate::fields::FieldErrors;
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel id for a customer that has not been persisted yet.
pub const NEW_CUSTOMER_ID: i32 = 0;

/// A customer row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Persistent integer id.
    pub id: i32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address, unique across all customers.
    pub email: String,
    /// Phone number in `XXX-XXX-XXXX` format.
    pub phone: String,
    /// Street address.
    pub address1: String,
    /// Second address line, if any.
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// ZIP code, 5 or 5+4 digits.
    pub zip: String,
    /// Free-form notes, if any.
    pub notes: Option<String>,
    /// Whether the customer is active.
    pub active: bool,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Raw customer form data, as submitted.
///
/// Every field is defaulted so that missing input surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerForm {
    /// Existing id, or [`NEW_CUSTOMER_ID`] for a create.
    pub id: i32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Street address.
    pub address1: String,
    /// Second address line.
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// State abbreviation.
    pub state: String,
    /// ZIP code.
    pub zip: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Active flag; absent means true (manager-only control).
    pub active: Option<bool>,
}

/// A validated, normalized customer write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerPayload {
    /// Target id ([`NEW_CUSTOMER_ID`] inserts, anything else updates).
    pub id: i32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Street address.
    pub address1: String,
    /// Second address line, trimmed, empty coerced to `None`.
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// State abbreviation.
    pub state: String,
    /// ZIP code.
    pub zip: String,
    /// Notes, trimmed, empty coerced to `None`.
    pub notes: Option<String>,
    /// Active flag, only applied on update.
    pub active: bool,
}

/// Validate a submitted customer form.
///
/// # Errors
///
/// Returns a field-keyed error map (first violation per field) when
/// any rule fails. No normalization happens on the failure path.
pub fn validate_customer(form: &CustomerForm) -> Result<CustomerPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check(
        !form.first_name.trim().is_empty(),
        "firstName",
        "First name is required",
    );
    errors.check(
        !form.last_name.trim().is_empty(),
        "lastName",
        "Last name is required",
    );
    errors.check(validate::is_valid_email(&form.email), "email", "Invalid email");
    errors.check(
        validate::is_valid_phone(&form.phone),
        "phone",
        "Use format XXX-XXX-XXXX",
    );
    errors.check(
        !form.address1.trim().is_empty(),
        "address1",
        "Address is required",
    );
    errors.check(!form.city.trim().is_empty(), "city", "City is required");
    errors.check(
        validate::is_state_abbreviation(&form.state),
        "state",
        "Use state abbreviation",
    );
    errors.check(validate::is_valid_zip(&form.zip), "zip", "Invalid ZIP format");

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CustomerPayload {
        id: form.id,
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        address1: form.address1.clone(),
        address2: validate::normalize_optional(form.address2.as_deref()),
        city: form.city.clone(),
        state: form.state.clone(),
        zip: form.zip.clone(),
        notes: validate::normalize_optional(form.notes.as_deref()),
        active: form.active.unwrap_or(true),
    })
}

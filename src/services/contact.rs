//! Contact page relay.

use validator::Validate;

use crate::backend::BackendApi;
use crate::domain::submission::FieldErrors;
use crate::forms::contact::{ContactForm, field_errors};

pub const MSG_CONTACT_SENT: &str = "ম্যাসেজ সফলভাবে পাঠানো হয়েছে";
pub const MSG_CONTACT_FAILED: &str = "ম্যাসেজ পাঠাতে সমস্যা হয়েছে, পরে আবার চেষ্টা করুন";

/// What happened to a contact message.
#[derive(Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Relayed; the form should be cleared.
    Sent(String),
    /// The relay refused the message or could not be reached.
    Rejected(String),
    /// Nothing was sent because some inputs are invalid.
    Invalid(FieldErrors),
}

/// Validates `form` and relays it. The relay's own message is shown when it
/// refuses the message.
pub async fn send_contact<B>(backend: &B, form: ContactForm) -> ContactOutcome
where
    B: BackendApi + ?Sized,
{
    let form = form.normalized();
    if let Err(err) = form.validate() {
        log::info!("Contact form rejected: {err}");
        return ContactOutcome::Invalid(field_errors(&err));
    }

    match backend.send_contact(form.relay_fields()).await {
        Ok(reply) if reply.success => ContactOutcome::Sent(MSG_CONTACT_SENT.to_string()),
        Ok(reply) => {
            log::warn!("Contact relay refused the message: {:?}", reply.message);
            ContactOutcome::Rejected(
                reply
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| MSG_CONTACT_FAILED.to_string()),
            )
        }
        Err(err) => {
            log::error!("Failed to relay contact message: {err}");
            ContactOutcome::Rejected(MSG_CONTACT_FAILED.to_string())
        }
    }
}

mod contact_submission;
mod email_address;

pub use contact_submission::ContactSubmission;
pub use email_address::EmailAddress;

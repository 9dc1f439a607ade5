use crate::domain::ContactSubmission;
use crate::email_client::EmailClient;
use crate::startup::ContactRecipient;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use htmlescape::encode_minimal;

#[derive(serde::Deserialize)]
pub struct ContactData {
    // Absent fields collapse into the empty-field rejection.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl TryFrom<ContactData> for ContactSubmission {
    type Error = String;
    fn try_from(body: ContactData) -> Result<Self, Self::Error> {
        ContactSubmission::parse(body.name, body.email, body.message)
    }
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to send message.")]
    DeliveryError(#[source] reqwest::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::DeliveryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ContactError::ValidationError(_) => HttpResponse::BadRequest().json(
                serde_json::json!({ "msg": "Please fill in all fields" }),
            ),
            ContactError::DeliveryError(e) => HttpResponse::InternalServerError().json(
                serde_json::json!({ "msg": "Failed to send message.", "error": e.to_string() }),
            ),
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by: \n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[tracing::instrument(
    name = "Relaying a contact submission",
    skip(body, email_client, recipient),
    fields(contact_name = %body.name, contact_email = %body.email)
)]
pub async fn send_contact_email(
    body: web::Json<ContactData>,
    email_client: web::Data<EmailClient>,
    recipient: web::Data<ContactRecipient>,
) -> Result<HttpResponse, ContactError> {
    let submission: ContactSubmission = body
        .into_inner()
        .try_into()
        .map_err(ContactError::ValidationError)?;

    let subject = format!("New Contact Form Message from {}", submission.name());
    email_client
        .send_email(
            &recipient.0,
            &subject,
            &html_body(&submission),
            &text_body(&submission),
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to relay contact submission: {:?}", e);
            ContactError::DeliveryError(e)
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "msg": "Message sent successfully!" })))
}

// The submission is untrusted input; it gets escaped before entering an
// HTML context.
fn html_body(submission: &ContactSubmission) -> String {
    format!(
        "<p>You have a new message from your website contact form.</p>\
         <h3>Contact Details:</h3>\
         <ul>\
         <li><strong>Name:</strong> {}</li>\
         <li><strong>Email:</strong> {}</li>\
         </ul>\
         <h3>Message:</h3>\
         <p>{}</p>",
        encode_minimal(submission.name()),
        encode_minimal(submission.email()),
        encode_minimal(submission.message())
    )
}

fn text_body(submission: &ContactSubmission) -> String {
    format!(
        "You have a new message from your website contact form.\n\
         Name: {}\n\
         Email: {}\n\
         Message:\n{}",
        submission.name(),
        submission.email(),
        submission.message()
    )
}

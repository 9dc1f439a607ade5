use reqwest::Client;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
}

impl ContactForm {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    Accepted { msg: String },
    Rejected { msg: String },
    /// No usable response came back at all.
    TransportFailed(reqwest::Error),
}

#[derive(serde::Deserialize)]
struct RelayResponse {
    msg: Option<String>,
}

pub struct SubmissionClient {
    http_client: Client,
    endpoint: String,
}

impl SubmissionClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http_client: Client::new(),
            endpoint,
        }
    }

    // One POST, one outcome. No retry.
    pub async fn submit(&self, form: &ContactForm) -> SubmissionOutcome {
        let response = match self
            .http_client
            .post(&self.endpoint)
            .json(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SubmissionOutcome::TransportFailed(e),
        };

        let status = response.status();
        let msg = response
            .json::<RelayResponse>()
            .await
            .ok()
            .and_then(|body| body.msg);

        if status.is_success() {
            SubmissionOutcome::Accepted {
                msg: msg.unwrap_or_else(|| "Message sent successfully!".to_string()),
            }
        } else {
            SubmissionOutcome::Rejected {
                msg: msg.unwrap_or_else(|| "Something went wrong.".to_string()),
            }
        }
    }
}

/// `submit` takes `&mut self`, so a second dispatch cannot start while one
/// is outstanding.
pub struct ContactFormSession {
    client: SubmissionClient,
    form: ContactForm,
    status: String,
}

impl ContactFormSession {
    pub fn new(client: SubmissionClient) -> Self {
        Self {
            client,
            form: ContactForm::default(),
            status: String::new(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub async fn submit(&mut self) {
        self.status = "Sending...".to_string();
        match self.client.submit(&self.form).await {
            SubmissionOutcome::Accepted { msg } => {
                self.status = msg;
                self.form.clear();
            }
            SubmissionOutcome::Rejected { msg } => {
                self.status = format!("Error: {}", msg);
            }
            SubmissionOutcome::TransportFailed(e) => {
                tracing::warn!("Contact submission never reached the relay: {:?}", e);
                self.status = "An error occurred. Please try again later.".to_string();
            }
        }
    }
}

/// Presence-only checks: no length limit, no character-set restriction, no
/// format check on `email`.
#[derive(Debug)]
pub struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

impl ContactSubmission {
    pub fn parse(name: String, email: String, message: String) -> Result<Self, String> {
        let missing: Vec<&str> = [
            ("name", &name),
            ("email", &email),
            ("message", &message),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();

        if missing.is_empty() {
            Ok(Self {
                name,
                email,
                message,
            })
        } else {
            Err(format!("missing required fields: {}", missing.join(", ")))
        }
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
}

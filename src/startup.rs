use crate::configuration::Settings;
use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use actix_web::dev::Server;
use anyhow::Context;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let timeout = configuration.email_client.timeout();
        let sender = configuration
            .email_client
            .sender()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid sender email address in configuration")?;
        let recipient = configuration
            .email_client
            .recipient()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid recipient email address in configuration")?;
        let email_client = EmailClient::new(
            configuration.email_client.base_url.clone(),
            sender,
            configuration.email_client.authorization_token.clone(),
            timeout,
        );

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, email_client, recipient)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Where relayed contact submissions end up: the operator's inbox.
pub struct ContactRecipient(pub EmailAddress);

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    recipient: EmailAddress,
) -> Result<Server, std::io::Error> {
    let email_client = web::Data::new(email_client);
    let recipient = web::Data::new(ContactRecipient(recipient));
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(crate::routes::health_check))
            .route("/send-email", web::post().to(crate::routes::send_contact_email))
            .app_data(email_client.clone())
            .app_data(recipient.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

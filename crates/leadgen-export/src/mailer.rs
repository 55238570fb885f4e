//! Emails the exported spreadsheet over authenticated SMTP.

use std::path::Path;
use std::time::Duration;

use leadgen_core::EmailConfig;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::ExportError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

fn parse_mailbox(address: &str) -> Result<Mailbox, ExportError> {
    address
        .parse()
        .map_err(|source| ExportError::InvalidAddress {
            address: address.to_owned(),
            source,
        })
}

/// Build the report email: a short plain-text summary with the spreadsheet
/// attached under `filename`.
///
/// # Errors
///
/// Returns [`ExportError::InvalidAddress`] if the sender or recipient does not
/// parse, or [`ExportError::Message`] if the message cannot be assembled.
pub fn build_report_message(
    config: &EmailConfig,
    filename: &str,
    spreadsheet: Vec<u8>,
    lead_count: usize,
) -> Result<Message, ExportError> {
    let from = parse_mailbox(&config.sender)?;
    let to = parse_mailbox(&config.recipient)?;

    let noun = if lead_count == 1 { "lead" } else { "leads" };
    let subject = format!("Lead report: {lead_count} businesses without a website");
    let body = format!(
        "The latest lead search found {lead_count} {noun} with no website listed.\n\
         The full list is attached as {filename}.\n"
    );

    let content_type = ContentType::parse(XLSX_CONTENT_TYPE)?;
    let attachment = Attachment::new(filename.to_owned()).body(spreadsheet, content_type);

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(body))
                .singlepart(attachment),
        )?;

    Ok(message)
}

/// Send the spreadsheet at `path` to the configured recipient.
///
/// Connects to `smtp_host:smtp_port`, upgrades with STARTTLS and
/// authenticates with the sender's credentials.
///
/// # Errors
///
/// Returns [`ExportError::ReadReport`] if the file cannot be read, an address
/// or message error from [`build_report_message`], or [`ExportError::Smtp`]
/// if the connection, authentication or submission fails.
pub async fn send_report(
    config: &EmailConfig,
    path: &Path,
    lead_count: usize,
) -> Result<(), ExportError> {
    let spreadsheet = tokio::fs::read(path)
        .await
        .map_err(|source| ExportError::ReadReport {
            path: path.to_path_buf(),
            source,
        })?;

    let filename = path
        .file_name()
        .map_or_else(|| "leads.xlsx".into(), |name| name.to_string_lossy());
    let message = build_report_message(config, &filename, spreadsheet, lead_count)?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        .port(config.smtp_port)
        .credentials(Credentials::new(
            config.sender.clone(),
            config.password.clone(),
        ))
        .timeout(Some(SMTP_TIMEOUT))
        .build();

    tracing::info!(
        host = %config.smtp_host,
        port = config.smtp_port,
        recipient = %config.recipient,
        "sending lead report"
    );
    transport.send(message).await?;
    tracing::info!(recipient = %config.recipient, "lead report sent");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            sender: "reports@leads.example.com".to_owned(),
            password: "app-password".to_owned(),
            recipient: "owner@agency.example.com".to_owned(),
            smtp_host: "smtp.gmail.com".to_owned(),
            smtp_port: 587,
        }
    }

    fn formatted(message: &Message) -> String {
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    #[test]
    fn report_message_attaches_spreadsheet() {
        let message = build_report_message(
            &config(),
            "leads_20240307_090502.xlsx",
            b"PK\x03\x04fake".to_vec(),
            12,
        )
        .expect("build message");

        let raw = formatted(&message);
        assert!(raw.contains("leads_20240307_090502.xlsx"), "{raw}");
        assert!(raw.contains(XLSX_CONTENT_TYPE), "{raw}");
        assert!(raw.contains("Lead report: 12 businesses"), "{raw}");
        assert!(raw.contains("owner@agency.example.com"), "{raw}");
    }

    #[test]
    fn report_message_never_contains_password() {
        let message =
            build_report_message(&config(), "leads.xlsx", Vec::new(), 1).expect("build message");
        assert!(!formatted(&message).contains("app-password"));
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let mut cfg = config();
        cfg.recipient = "not an address".to_owned();

        let err = build_report_message(&cfg, "leads.xlsx", Vec::new(), 3).unwrap_err();
        assert!(
            matches!(err, ExportError::InvalidAddress { ref address, .. } if address == "not an address"),
            "got: {err:?}"
        );
    }

    #[tokio::test]
    async fn send_report_with_missing_file_fails_before_connecting() {
        let path = std::env::temp_dir().join("leadgen-no-such-report.xlsx");
        let err = send_report(&config(), &path, 1).await.unwrap_err();
        assert!(matches!(err, ExportError::ReadReport { .. }), "got: {err:?}");
    }
}

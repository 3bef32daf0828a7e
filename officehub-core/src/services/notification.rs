use async_trait::async_trait;
use serde::Serialize;

/// What an admin is told when an office is created in their location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficeCreatedNotice {
    pub recipient: String,
    pub admin_name: String,
    pub office_name: String,
    pub location_name: String,
}

impl OfficeCreatedNotice {
    pub fn new(
        recipient: impl Into<String>,
        office_name: impl Into<String>,
        location_name: impl Into<String>,
    ) -> Self {
        let recipient = recipient.into();
        let admin_name = admin_name_from_email(&recipient);
        Self {
            recipient,
            admin_name,
            office_name: office_name.into(),
            location_name: location_name.into(),
        }
    }

    pub fn subject(&self) -> String {
        format!("A new office has been added to {}", self.location_name)
    }

    pub fn body(&self) -> String {
        format!(
            "Hi {}, the office {} has been created in {}.",
            self.admin_name, self.office_name, self.location_name
        )
    }
}

/// "jane.doe@example.com" greets "jane"
fn admin_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    local.split('.').next().unwrap_or(local).to_string()
}

/// Outbound notification channel. Returns whether the notice went out;
/// delivery failures are not errors from the caller's point of view.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn office_created(&self, notice: &OfficeCreatedNotice) -> bool;
}

/// Records notices in the log instead of delivering them
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    sender: String,
}

impl TracingNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn office_created(&self, notice: &OfficeCreatedNotice) -> bool {
        tracing::info!(
            from = %self.sender,
            to = %notice.recipient,
            subject = %notice.subject(),
            "{}",
            notice.body()
        );
        true
    }
}

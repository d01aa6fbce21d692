//! Outbound ports - contracts the infrastructure adapters implement

mod mailer_port;
mod queue_port;

pub use mailer_port::{MailMessage, MailerError, MailerPort};
pub use queue_port::{QueueError, QueueItem, QueueItemId, QueueItemStatus, QueuePort};

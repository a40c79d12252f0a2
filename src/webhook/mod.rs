//! Routed webhook notifications for resolved issue statuses.
//!
//! Each configured [`WebhookRoute`] maps an issue-identifier prefix (or the
//! `*` wildcard) to a destination URL. [`WebhookRouter`] groups identifiers
//! by their reconciled status and then by destination, sending one
//! [`WebhookPayload`] per pair. Delivery is a single attempt; failures are
//! logged and counted but never abort the run.

mod payload;
mod route;
mod router;
mod sender;


pub use payload::{PullRequestSummary, WebhookPayload};
pub use route::{WebhookRoute, WebhookRoutes};
pub use router::{DispatchReport, WebhookRouter};
pub use sender::{DEFAULT_TIMEOUT, DeliveryError, ReqwestWebhookSender, WebhookSender};

#[cfg(test)]
pub use sender::MockWebhookSender;

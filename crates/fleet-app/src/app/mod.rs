//! Use cases around the statistics engine

pub mod pipeline;
pub mod session;

pub use pipeline::{email_summary, load_fleet};
pub use session::{Finalized, Session, EMAIL_FAILED_MESSAGE, EMAIL_SENT_MESSAGE};

mod analytics;
mod memory;
mod waitlist;

pub use analytics::{PageViewStore, PgPageViewStore};
pub use memory::{InMemoryPageViewStore, InMemoryWaitlistStore};
pub use waitlist::{InsertError, PgWaitlistStore, WaitlistStore};

// Draft persistence: a single durable slot, a debounced autosave, and the
// session lifecycle that sequences hydration before any save.

pub mod adapter;
pub mod debounce;
pub mod handlers;
pub mod session;
pub mod store;

pub use adapter::{DraftRepository, SaveOutcome, DEFAULT_DRAFT_KEY};
pub use session::{DraftSession, GenerationTicket, Lifecycle, SessionError};
pub use store::{DraftStore, FileStore, MemoryStore, StorageError};

//! Structural interfaces over arbitrary concrete types
//!
//! [`interface!`] declares a set of required and optional operations once.
//! Any type implementing the generated conformance trait can then be wrapped
//! in the generated instance type, with a storage strategy chosen per
//! instance:
//!
//! - [`Borrowed`] aliases a caller-owned value
//! - [`Owned`] moves the value into a block from a [`RawAlloc`]
//! - [`Inline`] moves the value into a fixed buffer inside the instance
//! - [`Bound`] keeps the value as is and resolves every call statically
//!
//! Calls go through a dispatch table built at compile time for each
//! (interface, concrete type) pair. Suspend-capable entries return a
//! [`Suspend`] handle that the caller resumes or awaits.

// Core modules
pub mod descriptor;
pub mod erased;
pub mod storage;
pub mod suspend;

// Support
pub mod allocator;
pub mod errors;
pub mod logging;

mod macros;

// Re-export commonly used items
pub use allocator::{Bump, BumpStats, Global, RawAlloc};
pub use descriptor::{Interface, MethodEntry, Receiver, TableFor};
pub use erased::{Erased, ErasedMut};
pub use errors::{AllocError, ConfigError};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel, LogOutput};
pub use storage::{Borrowed, Bound, Inline, Owned, Storage, INLINE_ALIGN};
pub use suspend::Suspend;

pub use futures::future::LocalBoxFuture;

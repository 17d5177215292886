//! Field state: values, the store, and coalesced change notification.

mod notify;
mod store;
mod value;

pub use notify::{RenderNotifier, SubscriberId};
pub use store::FieldStore;
pub use value::FieldValue;

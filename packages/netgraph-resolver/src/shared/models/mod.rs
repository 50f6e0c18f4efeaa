//! Output models: query identities, items and edge descriptors

mod edge;
mod item;
mod query;

pub use edge::{BlastPropagation, EdgeDescriptor, ItemQuery};
pub use item::{Attributes, Item, ValidationError};
pub use query::{QueryIdentity, QueryMethod, GLOBAL_SCOPE};

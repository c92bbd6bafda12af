//! Card system: definitions, catalog and instances.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `Card`: Static card data (costs, effect kind, value, tags)
//! - `CardCatalog`: Card definition lookup
//! - `CardInstance`: One physical copy in an encounter, optionally bound
//!   to a talisman

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{Card, CardId, CardTag, EffectKind, Element};
pub use instance::CardInstance;
pub use registry::CardCatalog;

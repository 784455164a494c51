pub mod error;
pub mod ttl;
pub mod value;

pub use error::{Error, Result};
pub use ttl::Ttl;
pub use value::{ScoredMember, StoreValue, ValueTypeTag};

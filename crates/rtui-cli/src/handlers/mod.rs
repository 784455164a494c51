mod context;

pub mod browse;
pub mod del;
pub mod expire;
pub mod get;
pub mod keys;
pub mod seed;
pub mod ttl;

pub use context::HandlerContext;

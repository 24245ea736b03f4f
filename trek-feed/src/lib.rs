pub mod conf;
pub mod error;
pub mod fetch;
pub mod grouping;
pub mod resolver;
pub mod respond;
pub mod variants;

pub use conf::ResolverConfig;
pub use error::{FeedError, FeedResult};
pub use fetch::FetchPolicy;
pub use resolver::FeedResolver;

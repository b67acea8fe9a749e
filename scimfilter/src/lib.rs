//! scimfilter core library.
//!
//! Rewrites what a user types into an identity console search box into the
//! `attribute operator value` filter the identity server expects, and builds
//! the same filter from the basic filter form.
//!
//! ```
//! assert_eq!(scimfilter::normalize("name starts with john doe"), "name sw john doe");
//! assert_eq!(scimfilter::normalize("name eq john"), "name eq john");
//! ```

pub mod config;
pub mod errors;
pub mod filters;
pub mod search;

pub use config::ScimFilterConfig;
pub use errors::*;
pub use filters::{BasicFilter, condition_options};
pub use search::{FilterExpression, OperatorCode, QueryNormalizer, normalize};

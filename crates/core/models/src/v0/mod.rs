mod categories;
mod comments;
mod profiles;
mod reports;
mod votes;

pub use categories::*;
pub use comments::*;
pub use profiles::*;
pub use reports::*;
pub use votes::*;

pub use iso8601_timestamp::Timestamp;

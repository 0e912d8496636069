pub mod algebra;
pub mod destination;
pub mod source;
pub mod token;

mod response;

pub use algebra::{DestinationApi, SourceApi};
pub use destination::ZendeskClient;
pub use source::SalesforceClient;
pub use token::AccessToken;

pub mod request;
pub mod response;

pub use request::OAuthCallbackQuery;
pub use response::*;

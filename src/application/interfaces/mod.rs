mod chat_client;
mod response_observer;

pub use chat_client::*;
pub use response_observer::*;

mod chat;
mod classify_message;
mod generate_reply;
mod respond;

pub use chat::*;
pub use classify_message::*;
pub use generate_reply::*;
pub use respond::*;

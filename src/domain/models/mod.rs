mod category_rule;
mod chat;
mod llm_config;
mod majors;
mod reply;

pub use category_rule::*;
pub use chat::*;
pub use llm_config::*;
pub use majors::*;
pub use reply::*;

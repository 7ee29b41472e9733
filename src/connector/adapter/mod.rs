mod backend_client;
mod data_files;
mod http;
mod openai_client;

pub use backend_client::*;
pub use data_files::*;
pub use http::*;
pub use openai_client::*;

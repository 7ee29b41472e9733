use std::net::IpAddr;

use clap::Subcommand;

use crate::connector::adapter::DEFAULT_BACKEND_URL;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP backend (POST /api/chat)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Seconds before an in-flight chat request is cancelled
        #[arg(long, default_value = "120")]
        request_timeout: u64,
    },

    /// Answer a single message and exit
    Ask {
        #[arg(required = true)]
        message: Vec<String>,

        /// Show whether the reply came from the LLM or the keyword rules
        #[arg(long)]
        explain: bool,
    },

    /// Interactive chat against a running backend
    Chat {
        #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
        backend_url: String,

        /// Seconds to wait for each reply
        #[arg(long, default_value = "60")]
        timeout: u64,
    },

    /// Print the keyword rules in priority order
    Rules,
}

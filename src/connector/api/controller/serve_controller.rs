use std::net::IpAddr;
use std::time::Duration;

use anyhow::Result;

use crate::connector::adapter::{run_server, AppState, ServerConfig};

use super::super::Container;

pub struct ServeController<'a> {
    container: &'a Container,
}

impl<'a> ServeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn serve(&self, host: IpAddr, port: u16, request_timeout: u64) -> Result<String> {
        let request_timeout = Duration::from_secs(request_timeout.max(1));
        let state = AppState::new(self.container.chat_service(), request_timeout);
        let config = ServerConfig {
            host,
            port,
            request_timeout,
        };

        run_server(config, state).await?;
        Ok("Server stopped.".to_string())
    }
}

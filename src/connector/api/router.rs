use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, RulesController, ServeController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    rules_controller: RulesController<'a>,
    serve_controller: ServeController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            rules_controller: RulesController::new(container),
            serve_controller: ServeController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Serve {
                host,
                port,
                request_timeout,
            } => {
                self.serve_controller
                    .serve(host, port, request_timeout)
                    .await
            }
            Commands::Ask { message, explain } => {
                self.ask_controller.ask(message.join(" "), explain).await
            }
            Commands::Rules => Ok(self.rules_controller.list()),
            Commands::Chat { .. } => unreachable!("Chat command is handled separately in main"),
        }
    }
}

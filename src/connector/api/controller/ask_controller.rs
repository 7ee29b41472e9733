use anyhow::{bail, Result};

use crate::domain::ReplySource;

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, message: String, explain: bool) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            bail!("Message cannot be empty");
        }

        let reply = self.container.responder().reply(message).await;

        if !explain {
            return Ok(reply.into_text());
        }

        let source = match reply.source() {
            ReplySource::Llm => "llm".to_string(),
            ReplySource::Rules(reason) => format!("keyword rules ({reason})"),
        };
        Ok(format!("{}\n\n[source: {}]", reply.text(), source))
    }
}

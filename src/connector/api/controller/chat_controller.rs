use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::connector::adapter::BackendClient;
use crate::domain::{ChatExchange, ChatRole};

/// One line typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatInput {
    Message(String),
    Clear,
    Status,
    Quit,
    Empty,
}

impl ChatInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Empty,
            "/quit" | "/exit" => Self::Quit,
            "/clear" => Self::Clear,
            "/status" => Self::Status,
            other => Self::Message(other.to_string()),
        }
    }
}

/// Interactive terminal chat against a running backend.
///
/// The conversation lives only in this process's [`ChatExchange`]; the
/// backend sees one message at a time.
pub struct ChatController {
    backend: BackendClient,
}

impl ChatController {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut exchange = ChatExchange::new();
        let mut lines = input.lines();

        output
            .write_all(b"FutureMe AI - commands: /clear, /status, /quit\n\n")
            .await?;
        write_last(&mut output, &exchange).await?;

        loop {
            output.write_all(b"You: ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match ChatInput::parse(&line) {
                ChatInput::Empty => continue,
                ChatInput::Quit => break,
                ChatInput::Clear => {
                    exchange.clear();
                    output.write_all(b"\nChat history cleared.\n\n").await?;
                    write_last(&mut output, &exchange).await?;
                }
                ChatInput::Status => {
                    let status = if self.backend.is_online().await {
                        format!("Backend connected ({})\n\n", self.backend.base_url())
                    } else {
                        format!("Backend offline ({})\n\n", self.backend.base_url())
                    };
                    output.write_all(status.as_bytes()).await?;
                }
                ChatInput::Message(message) => {
                    exchange.push_user(message.clone());
                    let reply = self.backend.send(&message).await;
                    exchange.push_assistant(reply);
                    write_last(&mut output, &exchange).await?;
                }
            }
        }

        let turns = exchange
            .messages()
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .count();
        Ok(format!("Goodbye! ({turns} messages sent)"))
    }
}

async fn write_last<W: AsyncWrite + Unpin>(output: &mut W, exchange: &ChatExchange) -> Result<()> {
    if let Some(message) = exchange.last() {
        let text = format!("\nFutureMe AI: {}\n\n", message.content);
        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}

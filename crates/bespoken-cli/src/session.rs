use anyhow::Result;
use bespoken::conversation::Conversation;
use futures::StreamExt;

use crate::prompt::{InputType, Prompt};

pub struct Session<'a> {
    conversation: Conversation,
    prompt: Box<dyn Prompt + 'a>,
}

impl<'a> Session<'a> {
    pub fn new(conversation: Conversation, prompt: Box<dyn Prompt + 'a>) -> Self {
        Session {
            conversation,
            prompt,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        self.prompt.show_banner();

        loop {
            let input = self.prompt.get_input()?;
            match input.input_type {
                InputType::Message => {
                    if let Some(content) = &input.content {
                        self.reply(content).await;
                    }
                }
                InputType::Exit => break,
                InputType::AskAgain | InputType::Help => continue,
            }
        }

        self.prompt.close();
        Ok(())
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    async fn reply(&mut self, content: &str) {
        self.prompt.show_busy();

        let mut busy = true;
        let mut stream = self.conversation.stream(content);
        while let Some(chunk) = stream.next().await {
            if busy {
                self.prompt.hide_busy();
                busy = false;
            }
            self.prompt.render_chunk(&chunk.text);
        }
        drop(stream);

        if busy {
            self.prompt.hide_busy();
        }
        self.prompt.finish_reply();

        let Some(response) = self.conversation.last_response() else {
            return;
        };
        if response.is_error() {
            return;
        }
        for outcome in response.dispatch_tools().await {
            tracing::debug!(tool = %outcome.call.name, ok = outcome.result.is_ok(), "Tool call finished");
            self.prompt.render_outcome(&outcome);
        }
    }
}

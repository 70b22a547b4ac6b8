use anyhow::Result;
use bespoken::dispatch::DispatchOutcome;

pub mod rustyline;
pub mod wrap;

pub trait Prompt {
    fn show_banner(&self);
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    /// Print one streamed piece of the reply
    fn render_chunk(&mut self, chunk: &str);
    /// Called once the reply stream has ended
    fn finish_reply(&mut self);
    fn render_outcome(&mut self, outcome: &DispatchOutcome);
    fn close(&self);
}

#[derive(Debug, PartialEq)]
pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Optional content as sometimes the user may be issuing a command eg. (Exit)
}

#[derive(Debug, PartialEq)]
pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Help,     // User asked for the list of commands
    Message,  // User sent a message
    Exit,     // User wants to exit the session
}

impl Input {
    fn control(input_type: InputType) -> Self {
        Self {
            input_type,
            content: None,
        }
    }
}

/// Decide what a line typed at the prompt means
pub fn classify(line: &str) -> Input {
    let text = line.trim();
    if text.is_empty() {
        return Input::control(InputType::AskAgain);
    }

    match text.to_lowercase().as_str() {
        "quit" | "exit" | "/quit" | "/exit" => Input::control(InputType::Exit),
        "/help" | "/?" => Input::control(InputType::Help),
        _ => Input {
            input_type: InputType::Message,
            content: Some(text.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        for line in ["quit", "exit", "/quit", "/exit", "  QUIT  ", "Exit"] {
            assert_eq!(classify(line).input_type, InputType::Exit, "{:?}", line);
        }
    }

    #[test]
    fn test_blank_lines_ask_again() {
        assert_eq!(classify("   ").input_type, InputType::AskAgain);
        assert_eq!(classify("").input_type, InputType::AskAgain);
    }

    #[test]
    fn test_help() {
        assert_eq!(classify("/help").input_type, InputType::Help);
        assert_eq!(classify("/?").input_type, InputType::Help);
    }

    #[test]
    fn test_messages_are_trimmed() {
        assert_eq!(
            classify("  list the files please \n"),
            Input {
                input_type: InputType::Message,
                content: Some("list the files please".to_string()),
            }
        );
        assert_eq!(
            classify("quit smoking").content.as_deref(),
            Some("quit smoking")
        );
    }
}

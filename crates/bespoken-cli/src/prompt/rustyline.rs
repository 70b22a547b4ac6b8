use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use bespoken::dispatch::DispatchOutcome;
use cliclack::spinner;
use console::{style, Term};

use super::wrap::WrapWriter;
use super::{classify, Input, InputType, Prompt};
use crate::styles::Style;

const PROMPT: &str = "\x1b[1m\x1b[38;5;30m> \x1b[0m";
const THEME: &str = "zenburn";

pub struct RustylinePrompt {
    editor: ::rustyline::DefaultEditor,
    spinner: cliclack::ProgressBar,
    style: &'static Style,
    left_padding: usize,
    right_padding: usize,
    writer: WrapWriter,
}

impl RustylinePrompt {
    pub fn new(style: &'static Style, left_padding: usize, right_padding: usize) -> Result<Self> {
        Ok(RustylinePrompt {
            editor: ::rustyline::DefaultEditor::new()?,
            spinner: spinner(),
            style,
            left_padding,
            right_padding,
            writer: new_writer(left_padding, right_padding),
        })
    }

    fn padding(&self) -> String {
        " ".repeat(self.left_padding)
    }

    fn print_help(&self) {
        let pad = self.padding();
        println!("{}Commands:", pad);
        println!("{}quit | exit | /quit | /exit - Exit the session", pad);
        println!("{}/? | /help - Display this help message", pad);
        println!("{}Ctrl+C | Ctrl+D - Exit the session", pad);
    }
}

fn new_writer(left_padding: usize, right_padding: usize) -> WrapWriter {
    let (_, columns) = Term::stdout().size();
    WrapWriter::new(columns as usize, left_padding, right_padding)
}

fn print_header(outcome: &DispatchOutcome) {
    println!();
    println!(
        "─── {} | {} ──────────────────────────",
        style(&outcome.call.name),
        style(&outcome.toolbox).magenta().dim(),
    );
}

fn print_diff(content: &str, fallback_padding: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(THEME)
        .language("Diff")
        .wrapping_mode(WrappingMode::Character)
        .print();
    if let Err(e) = printed {
        tracing::debug!("Falling back to plain output: {}", e);
        print_padded(content, fallback_padding);
    }
}

fn goodbye_line(padding: &str) -> String {
    format!("{}{}", padding, style("Thanks for using Bespoken. Goodbye!").cyan())
}

fn print_padded(content: &str, padding: &str) {
    for line in content.lines() {
        println!("{}{}", padding, line);
    }
}

impl Prompt for RustylinePrompt {
    fn show_banner(&self) {
        println!("{}", self.style.banner(self.left_padding));
        println!();
    }

    fn get_input(&mut self) -> Result<Input> {
        let line = match self.editor.readline(PROMPT) {
            Ok(line) => line,
            Err(e) => {
                match e {
                    ::rustyline::error::ReadlineError::Interrupted
                    | ::rustyline::error::ReadlineError::Eof => (),
                    _ => eprintln!("Input error: {}", e),
                }
                return Ok(Input {
                    input_type: InputType::Exit,
                    content: None,
                });
            }
        };

        let input = classify(&line);
        match input.input_type {
            InputType::Message => {
                let _ = self.editor.add_history_entry(line.trim());
                Ok(input)
            }
            InputType::Help => {
                self.print_help();
                Ok(Input {
                    input_type: InputType::AskAgain,
                    content: None,
                })
            }
            _ => Ok(input),
        }
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner.start("Thinking...");
    }

    fn hide_busy(&mut self) {
        self.spinner.stop("");
    }

    fn render_chunk(&mut self, chunk: &str) {
        let ready = self.writer.push(chunk);
        print!("{}", style(ready).dim());
        io::stdout().flush().ok();
    }

    fn finish_reply(&mut self) {
        let rest = self.writer.finish();
        println!("{}", style(rest).dim());
        println!();
        // The terminal may have been resized while waiting for input
        self.writer = new_writer(self.left_padding, self.right_padding);
    }

    fn render_outcome(&mut self, outcome: &DispatchOutcome) {
        print_header(outcome);
        let padding = self.padding();
        match &outcome.result {
            Ok(text) if outcome.call.name == "replace_in_file" => match text.split_once('\n') {
                Some((summary, diff)) => {
                    print_padded(summary, &padding);
                    print_diff(diff, &padding);
                }
                None => print_padded(text, &padding),
            },
            Ok(text) => print_padded(text, &padding),
            Err(e) => println!("{}{}", padding, style(e).red()),
        }
        println!();
    }

    fn close(&self) {
        println!("{}", goodbye_line(&self.padding()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goodbye_line() {
        console::set_colors_enabled(false);
        assert_eq!(goodbye_line("  "), "  Thanks for using Bespoken. Goodbye!");
    }
}

use anyhow::{anyhow, Result};
use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Dim,
    Cyan,
    Green,
    Blue,
    Magenta,
    Yellow,
}

/// A banner the REPL can open with
#[derive(Debug)]
pub struct Style {
    pub key: &'static str,
    pub name: &'static str,
    pub ascii_art: &'static str,
    pub subtitle: &'static [(&'static str, Tone)],
}

pub const STYLES: &[Style] = &[
    Style {
        key: "default",
        name: "Default",
        ascii_art: "██████╗ ███████╗███████╗██████╗  ██████╗ ██╗  ██╗███████╗███╗   ██╗
██╔══██╗██╔════╝██╔════╝██╔══██╗██╔═══██╗██║ ██╔╝██╔════╝████╗  ██║
██████╔╝█████╗  ███████╗██████╔╝██║   ██║█████╔╝ █████╗  ██╔██╗ ██║
██╔══██╗██╔══╝  ╚════██║██╔═══╝ ██║   ██║██╔═██╗ ██╔══╝  ██║╚██╗██║
██████╔╝███████╗███████║██║     ╚██████╔╝██║  ██╗███████╗██║ ╚████║
╚═════╝ ╚══════╝╚══════╝╚═╝      ╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═══╝",
        subtitle: &[
            (
                "A terminal chat experience that you can configure yourself.",
                Tone::Dim,
            ),
            ("Type 'quit' to exit.", Tone::Cyan),
        ],
    },
    Style {
        key: "minimal",
        name: "Minimal",
        ascii_art: "bespoken",
        subtitle: &[("chat assistant", Tone::Dim)],
    },
    Style {
        key: "hacker",
        name: "Hacker",
        ascii_art: "╔╗ ╔═╗╔═╗╔═╗╔═╗╦╔═╔═╗╔╗╔
╠╩╗║╣ ╚═╗╠═╝║ ║╠╩╗║╣ ║║║
╚═╝╚═╝╚═╝╩  ╚═╝╩ ╩╚═╝╝╚╝",
        subtitle: &[
            ("> system ready", Tone::Green),
            ("> type 'quit' to terminate", Tone::Green),
        ],
    },
    Style {
        key: "professional",
        name: "Professional",
        ascii_art: "BESPOKEN
Professional Edition",
        subtitle: &[
            ("Enterprise Chat Assistant", Tone::Blue),
            ("Type 'quit' to exit session", Tone::Dim),
        ],
    },
    Style {
        key: "fun",
        name: "Fun",
        ascii_art: "┌─┐┬ ┬┌─┐┌┬┐  ┌┬┐┬┌┬┐┌─┐
│  ├─┤├─┤ │    │ ││││├┤
└─┘┴ ┴┴ ┴ ┴    ┴ ┴┴ ┴└─┘",
        subtitle: &[
            ("✨ Let's chat! ✨", Tone::Magenta),
            ("Type 'quit' when you're done", Tone::Yellow),
        ],
    },
];

/// Look up a style by key, listing the known keys when it is missing
pub fn find(key: &str) -> Result<&'static Style> {
    STYLES.iter().find(|s| s.key == key).ok_or_else(|| {
        anyhow!(
            "Unknown style '{}'. Available styles: {}",
            key,
            names().join(", ")
        )
    })
}

pub fn names() -> Vec<&'static str> {
    STYLES.iter().map(|s| s.key).collect()
}

impl Style {
    /// Plain-text preview, as listed by `bespoken styles`
    pub fn preview(&self) -> String {
        let subtitle: Vec<&str> = self.subtitle.iter().map(|(line, _)| *line).collect();
        format!(
            "=== {} Style ===\n\n{}\n\n{}",
            self.name,
            self.ascii_art,
            subtitle.join("\n")
        )
    }

    /// The colored banner, every line indented by `padding` spaces
    pub fn banner(&self, padding: usize) -> String {
        let pad = " ".repeat(padding);
        let mut lines = vec![String::new()];
        for line in self.ascii_art.lines() {
            lines.push(format!("{}{}", pad, style(line).bold().cyan()));
        }
        lines.push(String::new());
        for (line, tone) in self.subtitle {
            let styled = match tone {
                Tone::Dim => style(*line).dim(),
                Tone::Cyan => style(*line).cyan(),
                Tone::Green => style(*line).green(),
                Tone::Blue => style(*line).blue(),
                Tone::Magenta => style(*line).magenta(),
                Tone::Yellow => style(*line).yellow(),
            };
            lines.push(format!("{}{}", pad, styled));
        }
        lines.join("\n")
    }
}

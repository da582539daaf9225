//! Command parsing for the interactive prompt

use anyhow::{Result, anyhow, bail};

/// Parsed line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the current candidate set
    List,
    /// Select the n-th listed candidate (1-based)
    Pick { index: usize },
    /// Render the revenue views of the current selection
    Show,
    /// Empty the search input
    Clear,
    /// Show help
    Help,
    /// Leave the prompt
    Exit,
    /// Anything else is search input
    Input { text: String },
}

impl Command {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if !input.starts_with('/') {
            return Ok(Command::Input {
                text: input.to_string(),
            });
        }

        let parts: Vec<&str> = input[1..].split_whitespace().collect();
        let Some(first) = parts.first() else {
            bail!("Empty command");
        };

        let cmd = first.to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "list" | "ls" | "l" | "清單" => Ok(Command::List),
            "pick" | "p" | "選擇" => {
                let raw = args
                    .first()
                    .ok_or_else(|| anyhow!("Missing candidate number for pick command"))?;
                let index: usize = raw
                    .parse()
                    .map_err(|_| anyhow!("Not a candidate number: {raw}"))?;
                if index == 0 {
                    bail!("Candidate numbers start at 1");
                }
                Ok(Command::Pick { index })
            }
            "show" | "s" | "顯示" => Ok(Command::Show),
            "clear" | "c" | "清除" => Ok(Command::Clear),
            "help" | "h" | "?" | "說明" => Ok(Command::Help),
            "exit" | "quit" | "q" | "離開" => Ok(Command::Exit),
            _ => Err(anyhow!("Unknown command: {cmd}")),
        }
    }

    pub fn help_text() -> &'static str {
        r#"
Monthly Revenue Commands
========================

Type a stock id or English name (letters and digits only) to search,
or the exact label of a listed candidate, e.g. "台積電 (2330)".

  /list                  列出候選股票 (List candidates)
  /pick <n>              選擇第 n 個候選 (Select candidate n)
  /show                  顯示每月營收 (Show monthly revenue)
  /clear                 清除搜尋 (Clear search and selection)
  /help                  顯示說明 (Show help)
  /exit                  離開 (Exit)

Aliases: /l = /list  /p = /pick  /s = /show  /c = /clear  /q = /exit
"#
    }
}

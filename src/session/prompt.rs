//! Line-oriented input/output used by every menu.

use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::ExecutableCommand;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Colour of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Good,
    Warn,
    Bad,
}

/// Where menus read answers and print text. Blocking, without timeouts.
pub trait Prompt {
    /// Shows `message` and reads one trimmed line; `None` once input has ended.
    fn ask(&mut self, message: &str) -> Option<String>;

    fn say(&mut self, text: &str);

    fn status(&mut self, tone: Tone, text: &str) {
        let _ = tone;
        self.say(text);
    }

    fn clear(&mut self) {}

    /// Waits for Enter. Returns false once input has ended.
    fn pause(&mut self) -> bool {
        self.ask("Press Enter to continue...").is_some()
    }

    /// Yes/no question. Blank input takes `default`; end of input is "no".
    fn confirm(&mut self, message: &str, default: bool) -> bool {
        match self.ask(message) {
            None => false,
            Some(answer) => match answer.to_ascii_lowercase().as_str() {
                "" => default,
                "y" | "yes" => true,
                _ => false,
            },
        }
    }
}

/// Stdin/stdout prompt with coloured status lines.
pub struct TerminalPrompt {
    clear_screen: bool,
    input: io::StdinLock<'static>,
}

impl TerminalPrompt {
    pub fn new(clear_screen: bool) -> Self {
        Self {
            clear_screen,
            input: io::stdin().lock(),
        }
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{}", message);
        let _ = stdout.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!();
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    fn status(&mut self, tone: Tone, text: &str) {
        match tone {
            Tone::Plain => println!("{}", text),
            Tone::Good => println!("{}", text.green()),
            Tone::Warn => println!("{}", text.yellow()),
            Tone::Bad => println!("{}", text.red()),
        }
    }

    fn clear(&mut self) {
        if !self.clear_screen {
            return;
        }
        let mut stdout = io::stdout();
        let _ = stdout.execute(Clear(ClearType::All));
        let _ = stdout.execute(MoveTo(0, 0));
    }
}

/// Prompt fed from a fixed list of answers; records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    inputs: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        self.transcript.push(message.to_string());
        self.inputs.pop_front().map(|s| s.trim().to_string())
    }

    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompt_replays_inputs() {
        let mut prompt = ScriptedPrompt::new([" 1 ", "y"]);
        assert_eq!(prompt.ask("choose: ").as_deref(), Some("1"));
        assert!(prompt.confirm("sure? ", false));
        assert_eq!(prompt.ask("again: "), None);
        assert!(prompt.saw("sure?"));
    }

    #[test]
    fn test_confirm_defaults() {
        let mut prompt = ScriptedPrompt::new(["", "", "nope"]);
        assert!(prompt.confirm("(Y/n) ", true));
        assert!(!prompt.confirm("(y/N) ", false));
        assert!(!prompt.confirm("(Y/n) ", true));
        // End of input never confirms
        assert!(!prompt.confirm("(Y/n) ", true));
    }
}

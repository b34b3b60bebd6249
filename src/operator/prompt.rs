use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io::{self, BufRead, Write};

/// Line-oriented conversation with the operator
pub trait Prompter {
    /// Asks `message` and returns the trimmed answer, or `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;

    /// Prints one line of feedback
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// Prompter over plain streams, used for piped input and in tests
pub struct StreamPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for StreamPrompter<R, W> {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }
}

/// Interactive terminal prompter
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text();

        match answer {
            Ok(answer) => Ok(Some(answer.trim().to_string())),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(dialoguer::Error::IO(e)) => Err(e),
        }
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        println!("{}", line);
        Ok(())
    }
}

use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Line-based question and answer over any reader/writer pair.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Prints `question` and reads one trimmed line. `None` at end of input.
    pub(crate) fn ask_line(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks until the answer parses as a `T`.
    pub(crate) fn ask_number<T: FromStr>(&mut self, question: &str) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.ask_line(question)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => self.say(&format!("'{answer}' is not a valid number."))?,
            }
        }
    }

    pub(crate) fn ask_yes_no(&mut self, question: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.ask_line(question)? else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }
}

#[cfg(test)]
impl<R> Prompter<R, Vec<u8>> {
    pub(crate) fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::Document;
use crate::terminal::{CrosstermTerminal, Terminal};

use super::{App, session};

const MENU: &str = "\n--- Text Editor ---\n\
1. Open File\n\
2. Create New File\n\
3. Edit Text (Ctrl+S saves the file, Esc returns to this menu)\n\
4. Quit\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Open,
    Create,
    Edit,
    Quit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Open),
            "2" => Some(Self::Create),
            "3" => Some(Self::Edit),
            "4" => Some(Self::Quit),
            _ => None,
        }
    }
}

impl App {
    /// Run the menu on stdin/stdout with the user's terminal for editing.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or stdout fail, or the terminal cannot be
    /// used for an editing session.
    pub fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut terminal = CrosstermTerminal::new();
        self.run_with(&mut stdin.lock(), &mut stdout.lock(), &mut terminal)
    }

    /// Run the menu loop on the given streams.
    ///
    /// Returns when the user picks Quit or the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading `input` or writing `output` fails.
    /// Document errors are reported on `output` and do not end the loop.
    pub fn run_with<R, W, T>(&self, input: &mut R, output: &mut W, terminal: &mut T) -> Result<()>
    where
        R: BufRead,
        W: Write,
        T: Terminal + ?Sized,
    {
        let mut active: Option<Document> = None;

        if let Some(path) = &self.initial_file {
            self.open(path, &mut active, output)?;
        }

        loop {
            write!(output, "{MENU}Enter your choice: ")?;
            output.flush().context("Failed to write to stdout")?;

            let Some(line) = read_line(input)? else {
                writeln!(output)?;
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Open) => {
                    let Some(name) = prompt(input, output, "Enter the file name to open: ")? else {
                        break;
                    };
                    if let Some(path) = file_name(&name, output)? {
                        self.open(&path, &mut active, output)?;
                    }
                }
                Some(MenuChoice::Create) => {
                    let Some(name) = prompt(input, output, "Enter the name of the new file: ")?
                    else {
                        break;
                    };
                    if let Some(path) = file_name(&name, output)? {
                        self.create(path, &mut active, output)?;
                    }
                }
                Some(MenuChoice::Edit) => {
                    let document =
                        active.get_or_insert_with(|| Document::scratch(self.max_lines));
                    if let Err(err) = session::edit(terminal, document, self.line_numbers) {
                        tracing::error!(error = %err, "editing session failed");
                        writeln!(output, "Error: {err:#}")?;
                    } else if document.is_dirty() {
                        writeln!(
                            output,
                            "{} has unsaved changes.",
                            document.display_name()
                        )?;
                    }
                }
                Some(MenuChoice::Quit) => break,
                None => writeln!(output, "Invalid choice. Please try again.")?,
            }
        }

        writeln!(output, "Exiting the text editor. Goodbye!")?;
        output.flush()?;
        Ok(())
    }

    /// Load `path` into the active slot. On failure the previous document
    /// stays active.
    fn open<W: Write>(&self, path: &Path, active: &mut Option<Document>, output: &mut W) -> Result<()> {
        let document = match Document::open(path, self.max_lines) {
            Ok(document) => document,
            Err(err) => {
                tracing::debug!(error = %err, "open failed");
                writeln!(output, "Error: {err}.")?;
                return Ok(());
            }
        };

        if !self.quiet {
            writeln!(output, "\nFile content:")?;
            for line in document.buffer().lines() {
                writeln!(output, "{line}")?;
            }
        }
        if document.dropped_lines() > 0 {
            writeln!(
                output,
                "Warning: only the first {} lines were loaded; {} more were dropped.",
                document.buffer().capacity_limit(),
                document.dropped_lines()
            )?;
        }
        writeln!(output, "File loaded successfully.")?;

        *active = Some(document);
        Ok(())
    }

    fn create<W: Write>(
        &self,
        path: PathBuf,
        active: &mut Option<Document>,
        output: &mut W,
    ) -> Result<()> {
        match Document::create(path, self.max_lines) {
            Ok(document) => {
                writeln!(output, "New file created successfully.")?;
                *active = Some(document);
            }
            Err(err) => {
                tracing::debug!(error = %err, "create failed");
                writeln!(output, "Error: {err}.")?;
            }
        }
        Ok(())
    }
}

/// Read one line without its terminator. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush().context("Failed to write to stdout")?;
    let line = read_line(input)?;
    if line.is_none() {
        writeln!(output)?;
    }
    Ok(line)
}

fn file_name<W: Write>(name: &str, output: &mut W) -> Result<Option<PathBuf>> {
    let name = name.trim();
    if name.is_empty() {
        writeln!(output, "Error: no file name given.")?;
        return Ok(None);
    }
    Ok(Some(PathBuf::from(name)))
}

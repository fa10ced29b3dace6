//! Interactive menu loop over the catalog.
//!
//! The console owns its input and output streams, so the loop can be driven
//! by stdin/stdout or by in-memory buffers in tests. Catalog errors are
//! reported to the operator and never end the session; only I/O failures do.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::ConsoleSettings;
use crate::library::{Availability, Catalog, CatalogError, ItemUpdate, ValidationError};

/// Menu entries, in display order
const MENU: [(&str, MenuChoice); 6] = [
    ("Add item", MenuChoice::Add),
    ("List items", MenuChoice::List),
    ("Search items", MenuChoice::Search),
    ("Update item", MenuChoice::Update),
    ("Remove item", MenuChoice::Remove),
    ("Exit", MenuChoice::Exit),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Search,
    Update,
    Remove,
    Exit,
}

impl MenuChoice {
    /// Map a 1-based menu number to a choice
    pub fn from_number(n: i64) -> Option<Self> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        MENU.get(index).map(|(_, choice)| *choice)
    }
}

/// Outcome of reading one line
enum Line {
    Text(String),
    Eof,
}

/// Menu-driven console bound to an input and output stream
pub struct Console<R, W> {
    input: R,
    output: W,
    settings: ConsoleSettings,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, settings: ConsoleSettings) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Give back the output stream (used to inspect transcripts)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the operator exits or input ends
    pub fn run(&mut self, catalog: &mut Catalog) -> Result<()> {
        loop {
            self.show_menu()?;

            let Some(selection) = self.read_selection()? else {
                break;
            };

            let choice = match selection.parse::<i64>() {
                Ok(n) => MenuChoice::from_number(n),
                Err(_) => {
                    self.say("Please enter a valid number")?;
                    continue;
                }
            };

            let keep_going = match choice {
                Some(MenuChoice::Add) => self.add_item(catalog)?,
                Some(MenuChoice::List) => self.list_items(catalog)?,
                Some(MenuChoice::Search) => self.search_items(catalog)?,
                Some(MenuChoice::Update) => self.update_item(catalog)?,
                Some(MenuChoice::Remove) => self.remove_item(catalog)?,
                Some(MenuChoice::Exit) => break,
                None => {
                    self.say("Invalid option selected")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        self.say("Goodbye")?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}", self.settings.heading)?;
        for (i, (label, _)) in MENU.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, label)?;
        }
        write!(self.output, "{}", self.settings.prompt)?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn say(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write output")
    }

    fn read_line(&mut self) -> Result<Line> {
        let mut buffer = String::new();
        let read = self
            .input
            .read_line(&mut buffer)
            .context("Failed to read input")?;

        if read == 0 {
            debug!("input closed");
            return Ok(Line::Eof);
        }

        Ok(Line::Text(buffer.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Next non-blank line, trimmed; blank lines are skipped silently
    fn read_selection(&mut self) -> Result<Option<String>> {
        loop {
            match self.read_line()? {
                Line::Text(text) if text.trim().is_empty() => continue,
                Line::Text(text) => return Ok(Some(text.trim().to_string())),
                Line::Eof => return Ok(None),
            }
        }
    }

    /// Prompt and return the trimmed answer; `None` on end of input
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush().context("Failed to flush output")?;

        Ok(match self.read_line()? {
            Line::Text(text) => Some(text.trim().to_string()),
            Line::Eof => None,
        })
    }

    /// Prompt for a field that may be left blank; blank becomes `None`
    fn ask_optional(&mut self, prompt: &str) -> Result<Option<Option<String>>> {
        Ok(self
            .ask(prompt)?
            .map(|answer| (!answer.is_empty()).then_some(answer)))
    }

    /// Prompt for a required field. Blank input is reported and yields
    /// `Ok(Some(None))`; end of input yields `Ok(None)`.
    fn ask_required(&mut self, prompt: &str, field: &'static str) -> Result<Option<Option<String>>> {
        let Some(answer) = self.ask(prompt)? else {
            return Ok(None);
        };

        if answer.is_empty() {
            self.report(&CatalogError::Validation(ValidationError::Required { field }))?;
            return Ok(Some(None));
        }

        Ok(Some(Some(answer)))
    }

    fn report(&mut self, err: &CatalogError) -> Result<()> {
        debug!("{}", err);
        self.say(format!("Error: {}", err))
    }

    /// Returns `Ok(false)` when input ended mid-dialog
    fn add_item(&mut self, catalog: &mut Catalog) -> Result<bool> {
        self.say("\nAdd item")?;

        let code = match self.ask_required("Code: ", "Code")? {
            None => return Ok(false),
            Some(None) => return Ok(true),
            Some(Some(code)) => code,
        };

        if catalog.contains(&code) {
            self.report(&CatalogError::DuplicateKey(code))?;
            return Ok(true);
        }

        let title = match self.ask_required("Title: ", "Title")? {
            None => return Ok(false),
            Some(None) => return Ok(true),
            Some(Some(title)) => title,
        };

        let creator = match self.ask_required("Creator: ", "Creator")? {
            None => return Ok(false),
            Some(None) => return Ok(true),
            Some(Some(creator)) => creator,
        };

        let Some(category) = self.ask_optional("Category (optional): ")? else {
            return Ok(false);
        };

        let availability = loop {
            let Some(answer) = self.ask("Availability (Accessible/On Loan): ")? else {
                return Ok(false);
            };
            match Availability::parse_loose(&answer) {
                Some(availability) => break availability,
                None => self.say("Invalid status - please enter 'Accessible' or 'On Loan'")?,
            }
        };

        match catalog.add(
            &code,
            &title,
            &creator,
            category.as_deref(),
            availability.as_str(),
        ) {
            Ok(item) => {
                let line = format!("Added {}", item);
                self.say(line)?;
            }
            Err(err) => self.report(&err)?,
        }

        Ok(true)
    }

    fn list_items(&mut self, catalog: &Catalog) -> Result<bool> {
        if catalog.is_empty() {
            self.say("No items in the catalog")?;
            return Ok(true);
        }

        self.say("\nCatalog:")?;
        for item in catalog.list() {
            writeln!(self.output, "{}", item)?;
        }

        Ok(true)
    }

    fn search_items(&mut self, catalog: &Catalog) -> Result<bool> {
        let Some(query) = self.ask("\nSearch (code or title): ")? else {
            return Ok(false);
        };

        let mut found = false;
        for item in catalog.search(&query) {
            writeln!(self.output, "{}", item)?;
            found = true;
        }

        if !found {
            self.say("No matching items found")?;
        }

        Ok(true)
    }

    fn update_item(&mut self, catalog: &mut Catalog) -> Result<bool> {
        let code = match self.ask_required("\nCode of item to update: ", "Code")? {
            None => return Ok(false),
            Some(None) => return Ok(true),
            Some(Some(code)) => code,
        };

        let current = match catalog.get(&code) {
            Some(item) => item.to_string(),
            None => {
                self.report(&CatalogError::NotFound(code))?;
                return Ok(true);
            }
        };

        self.say(format!("Current: {}", current))?;
        self.say("Enter new values (leave blank to keep current)")?;

        let mut update = ItemUpdate::new();

        let Some(title) = self.ask_optional("New title: ")? else {
            return Ok(false);
        };
        update.title = title;

        let Some(creator) = self.ask_optional("New creator: ")? else {
            return Ok(false);
        };
        update.creator = creator;

        let Some(category) = self.ask_optional("New category: ")? else {
            return Ok(false);
        };
        update.category = category;

        let Some(status) = self.ask_optional("New status (Accessible/On Loan) or blank: ")? else {
            return Ok(false);
        };
        update.availability = match status {
            None => None,
            Some(status) => match Availability::parse_loose(&status) {
                Some(availability) => Some(availability.as_str().to_string()),
                None => {
                    self.say("Invalid status - keeping current value")?;
                    None
                }
            },
        };

        match catalog.update(&code, update) {
            Ok(item) => {
                let line = format!("Updated {}", item);
                self.say(line)?;
            }
            Err(err) => self.report(&err)?,
        }

        Ok(true)
    }

    fn remove_item(&mut self, catalog: &mut Catalog) -> Result<bool> {
        let code = match self.ask_required("\nCode of item to remove: ", "Code")? {
            None => return Ok(false),
            Some(None) => return Ok(true),
            Some(Some(code)) => code,
        };

        match catalog.remove(&code) {
            Some(item) => self.say(format!("Removed {}", item.code()))?,
            None => self.say("No item found with that code")?,
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};
    use std::sync::{Arc, Mutex};

    fn run_session(catalog: &mut Catalog, input: &str) -> String {
        let mut console = Console::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            ConsoleSettings::default(),
        );
        console.run(catalog).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_menu_choice_numbers() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::from_number(6), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(7), None);
        assert_eq!(MenuChoice::from_number(-1), None);
        assert_eq!(MenuChoice::from_number(i64::MAX), None);
    }

    #[test]
    fn test_bad_selection_reprompts() {
        let mut catalog = Catalog::new();
        let out = run_session(&mut catalog, "abc\n9\n6\n");

        assert!(out.contains("Please enter a valid number"));
        assert!(out.contains("Invalid option selected"));
        assert_eq!(out.matches("1. Add item").count(), 3);
        assert!(out.ends_with("Goodbye\n"));
    }

    #[test]
    fn test_negative_selection_and_blank_lines() {
        let mut catalog = Catalog::new();
        let out = run_session(&mut catalog, "-1\n\n   \n6\n");

        assert_eq!(out.matches("Invalid option selected").count(), 1);
        assert!(!out.contains("Please enter a valid number"));
        assert_eq!(out.matches("1. Add item").count(), 2);
        assert!(out.ends_with("Goodbye\n"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_rejected_input_logs_nothing_at_warn() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let mut catalog = Catalog::new();
        catalog.add("B1", "Dune", "Herbert", None, "Accessible").unwrap();

        let out = tracing::subscriber::with_default(subscriber, || {
            run_session(&mut catalog, "1\nB1\n1\nB2\n \n4\nZ9\n6\n")
        });

        assert!(out.contains("Error: Identifier already exists: B1"));
        assert!(out.contains("Error: Title cannot be empty"));
        assert!(out.contains("Error: Item not found: Z9"));
        assert!(logs.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_eof_ends_session() {
        let mut catalog = Catalog::new();
        let out = run_session(&mut catalog, "1\nB1\nDune\n");

        assert!(catalog.is_empty());
        assert!(out.ends_with("Goodbye\n"));
    }

    #[test]
    fn test_blank_category_uses_default() {
        let mut catalog = Catalog::with_default_category("General");
        run_session(&mut catalog, "1\nB1\nDune\nHerbert\n\nAccessible\n6\n");

        assert_eq!(catalog.get("B1").unwrap().category(), "General");
    }
}

use crate::core::directory::Directory;
use crate::domain::model::{ContactFields, Criterion, Entry, EntryId};
use crate::utils::error::{PhonebookError, Result};
use crate::utils::validation::parse_selection;
use std::io::{BufRead, Write};

pub const DEFAULT_PROMPT: &str = "Enter a command: ";

const MENU: &str = "\n1 - Add\n2 - Delete\n3 - View Contacts\n\
4 - Name Search\n5 - Address Search\n6 - Phone Number Search\n\
7 - Edit Name\n8 - Edit Address\n9 - Edit Phone Number\n0 - Quit\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Delete,
    View,
    Search(Criterion),
    Edit(Criterion),
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        let command = match input.trim().parse::<u8>().ok()? {
            1 => Command::Add,
            2 => Command::Delete,
            3 => Command::View,
            4 => Command::Search(Criterion::Name),
            5 => Command::Search(Criterion::Address),
            6 => Command::Search(Criterion::PhoneNumber),
            7 => Command::Edit(Criterion::Name),
            8 => Command::Edit(Criterion::Address),
            9 => Command::Edit(Criterion::PhoneNumber),
            0 => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Menu-driven front end over a [`Directory`].
///
/// Reads one answer per line from `input`. Field values are passed through
/// untouched apart from the line terminator. End of input ends the session.
pub struct Shell<R, W> {
    directory: Directory,
    input: R,
    output: W,
    prompt: String,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(directory: Directory, input: R, output: W) -> Self {
        Self {
            directory,
            input,
            output,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn into_directory(self) -> Directory {
        self.directory
    }

    pub fn run(&mut self) -> Result<()> {
        tracing::info!(contacts = self.directory.len(), "phonebook session started");
        loop {
            writeln!(self.output, "{}", MENU)?;
            let prompt = self.prompt.clone();
            let Some(line) = self.ask(&prompt)? else {
                tracing::info!("input closed, ending session");
                break;
            };

            match Command::parse(&line) {
                Some(Command::Quit) => {
                    writeln!(self.output, "Quitting...")?;
                    break;
                }
                Some(command) => self.dispatch(command)?,
                None => {
                    tracing::debug!(input = %line.trim(), "unrecognized command");
                    writeln!(self.output, "Invalid command. Please try again.")?;
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add => self.add_contact(),
            Command::Delete => self.delete_contact(),
            Command::View => self.view_contacts(),
            Command::Search(criterion) => self.search_contacts(criterion),
            Command::Edit(criterion) => self.edit_contact(criterion),
            Command::Quit => Ok(()),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Like [`Self::ask`], but the prompt sits on its own line.
    fn ask_line(&mut self, prompt: &str) -> Result<Option<String>> {
        writeln!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    fn add_contact(&mut self) -> Result<()> {
        writeln!(self.output, "Add a new contact to the phonebook.\n")?;
        let Some(first_name) = self.ask("Enter first name: ")? else { return Ok(()) };
        let Some(last_name) = self.ask("Enter last name: ")? else { return Ok(()) };
        let Some(address) = self.ask("Enter address: ")? else { return Ok(()) };
        let Some(city) = self.ask("Enter city: ")? else { return Ok(()) };
        let Some(phone_number) = self.ask("Enter phone number: ")? else { return Ok(()) };

        let id = self.directory.insert_end(ContactFields {
            first_name,
            last_name,
            address,
            city,
            phone_number,
        });
        tracing::info!(%id, "contact added");
        writeln!(self.output, "Contact added.")?;
        Ok(())
    }

    fn view_contacts(&mut self) -> Result<()> {
        let rendered = self.directory.render_all();
        if rendered.trim().is_empty() {
            writeln!(self.output, "No contacts in the phonebook yet.")?;
        } else {
            writeln!(self.output, "{}", rendered)?;
        }
        Ok(())
    }

    /// Runs a search and keeps only what the shell needs: id and rendering.
    fn find(&self, criterion: Criterion, value: &str) -> Vec<(EntryId, String)> {
        self.directory
            .search(criterion, value)
            .into_iter()
            .map(|e| (e.id(), e.to_string()))
            .collect()
    }

    fn search_contacts(&mut self, criterion: Criterion) -> Result<()> {
        let prompt = format!("Enter the {} to search for: ", criterion.label());
        let Some(value) = self.ask(&prompt)? else { return Ok(()) };

        let matches = self.find(criterion, &value);
        if matches.is_empty() {
            writeln!(
                self.output,
                "No contacts found with the given {}.",
                criterion.label()
            )?;
            return Ok(());
        }
        writeln!(self.output, "Matching contact(s) found:\n")?;
        for (_, rendered) in &matches {
            writeln!(self.output, "{}\n", rendered)?;
        }
        Ok(())
    }

    fn list_numbered(&mut self, matches: &[(EntryId, String)]) -> Result<()> {
        writeln!(self.output, "Matching contacts found:\n")?;
        for (i, (_, rendered)) in matches.iter().enumerate() {
            writeln!(self.output, "{}: {}\n", i + 1, rendered)?;
        }
        Ok(())
    }

    /// Maps a 1-based answer into `matches` and returns the chosen id.
    fn select(
        &mut self,
        answer: Option<String>,
        matches: &[(EntryId, String)],
    ) -> Result<Option<EntryId>> {
        let Some(line) = answer else { return Ok(None) };
        match parse_selection(&line, matches.len()) {
            Ok(index) => Ok(Some(matches[index].0)),
            Err(e) => {
                tracing::debug!("{}", e);
                writeln!(self.output, "{}", e.user_friendly_message())?;
                Ok(None)
            }
        }
    }

    fn delete_contact(&mut self) -> Result<()> {
        let Some(keyword) = self.ask_line("Enter criteria for deletion (name, address, phoneNumber): ")?
        else {
            return Ok(());
        };
        let criterion = match keyword.trim().parse::<Criterion>() {
            Ok(criterion) => criterion,
            Err(e) => {
                writeln!(self.output, "{}", e.user_friendly_message())?;
                return Ok(());
            }
        };

        let prompt = format!("Enter the value for {} to search and delete: ", criterion);
        let Some(value) = self.ask_line(&prompt)? else { return Ok(()) };
        let matches = self.find(criterion, &value);
        if matches.is_empty() {
            writeln!(self.output, "No contact found with the given criteria.")?;
            return Ok(());
        }

        self.list_numbered(&matches)?;
        let answer = self.ask_line("Enter the number of the contact you wish to delete: ")?;
        let Some(id) = self.select(answer, &matches)? else {
            return Ok(());
        };

        if self.directory.delete_by_reference(id) {
            tracing::info!(%id, "contact deleted");
            writeln!(self.output, "Contact deleted successfully.")?;
        } else {
            writeln!(self.output, "Error deleting contact.")?;
        }
        Ok(())
    }

    fn edit_contact(&mut self, criterion: Criterion) -> Result<()> {
        let prompt = format!("Enter the {} to search for: ", criterion.label());
        let Some(value) = self.ask(&prompt)? else { return Ok(()) };
        let matches = self.find(criterion, &value);
        if matches.is_empty() {
            writeln!(
                self.output,
                "No contacts found with the given {}.",
                criterion.label()
            )?;
            return Ok(());
        }

        self.list_numbered(&matches)?;
        let answer = self.ask("Enter the number of the contact you wish to edit: ")?;
        let Some(id) = self.select(answer, &matches)? else {
            return Ok(());
        };

        match criterion {
            Criterion::Name => {
                let Some(first_name) = self.ask("Enter new first name: ")? else { return Ok(()) };
                let Some(last_name) = self.ask("Enter new last name: ")? else { return Ok(()) };
                let entry = self.entry_mut(id)?;
                entry.set_first_name(first_name);
                entry.set_last_name(last_name);
            }
            Criterion::Address => {
                let Some(address) = self.ask("Enter new address: ")? else { return Ok(()) };
                self.entry_mut(id)?.set_address(address);
            }
            Criterion::PhoneNumber => {
                let Some(phone_number) = self.ask("Enter new phone number: ")? else { return Ok(()) };
                self.entry_mut(id)?.set_phone_number(phone_number);
            }
        }
        tracing::info!(%id, field = criterion.keyword(), "contact updated");
        writeln!(self.output, "Contact updated successfully.")?;
        Ok(())
    }

    fn entry_mut(&mut self, id: EntryId) -> Result<&mut Entry> {
        self.directory
            .get_mut(id)
            .ok_or_else(|| PhonebookError::InvalidSelection {
                input: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(directory: Directory, script: &str) -> (Directory, String) {
        let mut output = Vec::new();
        let mut shell = Shell::new(directory, Cursor::new(script.as_bytes().to_vec()), &mut output);
        shell.run().unwrap();
        let directory = shell.into_directory();
        (directory, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("1"), Some(Command::Add));
        assert_eq!(Command::parse(" 6 "), Some(Command::Search(Criterion::PhoneNumber)));
        assert_eq!(Command::parse("7"), Some(Command::Edit(Criterion::Name)));
        assert_eq!(Command::parse("0"), Some(Command::Quit));
        assert_eq!(Command::parse("10"), None);
        assert_eq!(Command::parse("add"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_add_keeps_raw_fields() {
        let (dir, output) = run_script(
            Directory::new(),
            "1\n Ann \nLee\n1 Elm\nSpringfield\n555-1111\n0\n",
        );
        assert_eq!(dir.len(), 1);
        let entry = dir.get_at(0).unwrap();
        assert_eq!(entry.first_name(), " Ann ");
        assert!(output.contains("Contact added."));
        assert!(output.contains("Quitting..."));
    }

    #[test]
    fn test_crlf_input() {
        let (dir, _) = run_script(Directory::new(), "1\r\nAnn\r\nLee\r\n1 Elm\r\nX\r\n555\r\n0\r\n");
        assert_eq!(dir.get_at(0).unwrap().last_name(), "Lee");
    }

    #[test]
    fn test_view_empty() {
        let (_, output) = run_script(Directory::new(), "3\n0\n");
        assert!(output.contains("No contacts in the phonebook yet."));
    }

    #[test]
    fn test_invalid_command_continues() {
        let (_, output) = run_script(Directory::new(), "42\nhello\n0\n");
        assert_eq!(output.matches("Invalid command. Please try again.").count(), 2);
        assert!(output.contains("Quitting..."));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (dir, output) = run_script(Directory::new(), "1\nAnn\nLee\n");
        assert!(dir.is_empty());
        assert!(!output.contains("Quitting..."));
    }

    #[test]
    fn test_delete_trims_keyword_and_prompts_on_own_line() {
        let mut directory = Directory::new();
        directory.insert_end(ContactFields::new("Ann", "Lee", "1 Elm", "Springfield", "555-1111"));
        let (dir, output) = run_script(directory, "2\n  address \n1 elm\n1\n0\n");

        assert!(dir.is_empty());
        assert!(output.contains("Enter criteria for deletion (name, address, phoneNumber): \n"));
        assert!(output.contains("Enter the value for address to search and delete: \n"));
        assert!(output.contains("Enter the number of the contact you wish to delete: \n"));
        assert!(output.contains("Contact deleted successfully."));
    }

    #[test]
    fn test_custom_prompt() {
        let mut output = Vec::new();
        let mut shell = Shell::new(Directory::new(), Cursor::new(b"0\n".to_vec()), &mut output)
            .with_prompt("phonebook> ");
        shell.run().unwrap();
        drop(shell);
        assert!(String::from_utf8(output).unwrap().contains("phonebook> "));
    }
}

use crate::core::directory::Directory;
use crate::core::shell::Shell;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Wires configuration, the seeded directory and the shell together for one run.
pub struct Session<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> Session<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// A fresh directory holding the configured contacts in order.
    pub fn seeded_directory(&self) -> Directory {
        let mut directory = Directory::new();
        for fields in self.config.seed_contacts() {
            directory.insert_end(fields.clone());
        }
        tracing::debug!(contacts = directory.len(), "directory seeded from configuration");
        directory
    }

    /// Runs the interactive shell until quit or end of input and hands back the final directory.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<Directory> {
        let mut shell =
            Shell::new(self.seeded_directory(), input, output).with_prompt(self.config.prompt());
        shell.run()?;
        let directory = shell.into_directory();
        tracing::info!(contacts = directory.len(), "session finished");
        Ok(directory)
    }
}

//! Command-line interface module
//!
//! Builds the command tree, parses argv, assembles the configuration of one
//! invocation and dispatches to the command's handler. Binding and validation
//! live in [`crate::core`].

pub mod commands;
pub mod output;

use std::collections::HashMap;
use std::ffi::OsString;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::config::options::{OPTION_CONFIG_DIR, OPTION_PROFILE};
use crate::core::binder::{set_option_from_positional_arg, Input};
use crate::core::global_config::GlobalConfig;
use crate::core::options::get_options;
use crate::core::profile::ProfileStore;
use crate::core::registry::{CommandId, OptionRegistry};
use crate::core::resolver::Resolver;
use crate::core::translate::Translator;
use crate::error::{QbError, RegistryError};
use crate::infra::dirs::QbDirs;
use crate::infra::logging;

/// Handler for one leaf command
pub type Handler = fn(&mut Invocation) -> Result<()>;

/// Handlers keyed by the command they serve
pub type Handlers = HashMap<CommandId, Handler>;

/// The command tree together with its handlers
#[derive(Clone)]
pub struct App {
    registry: Arc<OptionRegistry>,
    handlers: Arc<Handlers>,
    translator: Translator,
}

impl App {
    /// Build the command tree of the `qb` binary
    ///
    /// # Errors
    ///
    /// Returns a `RegistryError` if the tree declares conflicting options.
    pub fn new() -> Result<Self, RegistryError> {
        let mut handlers = Handlers::new();
        let registry = commands::build_registry(&mut handlers)?;
        Ok(Self {
            registry: Arc::new(registry),
            handlers: Arc::new(handlers),
            translator: Translator::default(),
        })
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Parse `argv` and run the invoked command
    ///
    /// Help, version and usage errors are printed by clap, which exits.
    pub fn run<I, T>(&self, argv: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut invocation = self.prepare(argv)?;
        logging::init(&invocation.config)?;

        let handler = self
            .handlers
            .get(&invocation.command)
            .ok_or_else(|| anyhow!("No handler for '{}'", invocation.command_path))?;
        tracing::debug!(command = %invocation.command_path, "running command");
        handler(&mut invocation)
    }

    /// Parse `argv` and assemble the invocation without running it
    ///
    /// # Errors
    ///
    /// Returns a `QbError` if the profile file is unreadable or the global
    /// options are invalid.
    pub fn prepare<I, T>(&self, argv: I) -> Result<Invocation, QbError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.registry.to_clap().try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(err) => err.exit(),
        };
        let (command, command_matches) = self.registry.invoked(&matches);

        let flags = self.registry.explicit_flags(command, command_matches);
        let args = self.registry.positional_args(command, command_matches);

        let mut resolver = Resolver::for_command(&self.registry, command)
            .with_flags(flags)
            .with_process_environment();
        resolver.set_default(
            OPTION_CONFIG_DIR,
            QbDirs::new().config_dir().display().to_string(),
        );

        let store = ProfileStore::from_dirs(&QbDirs::with_config_dir(
            resolver.get_string(OPTION_CONFIG_DIR),
        ));
        let profile = store.load(&resolver.get_string(OPTION_PROFILE))?;
        let resolver = resolver.with_profile(profile);

        let config = GlobalConfig::load(&resolver)?;

        Ok(Invocation {
            registry: Arc::clone(&self.registry),
            command,
            command_path: self.registry.command_path(command),
            args,
            resolver,
            config,
            translator: self.translator.clone(),
        })
    }
}

/// Everything one command execution needs
#[derive(Debug)]
pub struct Invocation {
    registry: Arc<OptionRegistry>,
    command: CommandId,
    command_path: String,
    args: Vec<String>,
    resolver: Resolver,
    config: GlobalConfig,
    translator: Translator,
}

#[derive(Serialize)]
struct HandOff<'a, T> {
    command: &'a str,
    input: &'a T,
}

impl Invocation {
    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    pub fn command(&self) -> CommandId {
        self.command
    }

    /// Space separated command path, e.g. `qb table get`
    pub fn command_path(&self) -> &str {
        &self.command_path
    }

    /// Positional arguments given after the command
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Use the positional argument at `index` as the default for `key`
    pub fn positional(&mut self, index: usize, key: &str) -> bool {
        set_option_from_positional_arg(&mut self.resolver, &self.args, index, key)
    }

    /// Use the configured app ID as the default for `app-id`
    pub fn default_app_id(&mut self) -> bool {
        self.config.set_default_app_id(&mut self.resolver)
    }

    /// Use the configured table ID as the default for `table-id`
    pub fn default_table_id(&mut self) -> bool {
        self.config.set_default_table_id(&mut self.resolver)
    }

    /// Use the configured table ID as the default for `key`
    pub fn default_table_id_as(&mut self, key: &str) -> bool {
        self.config.set_default_table_id_as(&mut self.resolver, key)
    }

    /// Use the configured field ID as the default for `field-id`
    pub fn default_field_id(&mut self) -> bool {
        self.config.set_default_field_id(&mut self.resolver)
    }

    /// Bind and validate the command's input
    ///
    /// Every bind or rule failure is reported at once and ends the process.
    pub fn input<T: Input>(&self) -> T {
        output::report(
            &self.command_path,
            get_options(&self.resolver, &self.translator),
        )
    }

    /// Pass a validated input on; prints it as JSON unless `quiet` is set
    pub fn hand_off<T: Serialize>(&self, input: &T) -> Result<()> {
        tracing::info!(command = %self.command_path, "input validated");
        output::print_json(
            self.config.quiet(),
            &HandOff {
                command: &self.command_path,
                input,
            },
        )
    }
}

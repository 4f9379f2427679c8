//! Option registry
//!
//! Declares every option once per node of the command tree. A name (and a
//! shorthand) is unique across a command and all of its ancestors. Persistent
//! options are visible to every descendant; local options only to the
//! declaring command.
//!
//! The registry is built once at startup and is read-only afterwards, so it
//! can be shared between invocations behind an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use clap::builder::BoolishValueParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use regex::Regex;
use serde::Serialize;

use crate::error::RegistryError;

/// Clap id of the trailing positional arguments on leaf commands
pub const POSITIONAL_ARGS_ID: &str = "ARGS";

/// Value kind of an option or input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Bool,
    Int,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
        };
        f.write_str(name)
    }
}

/// Which commands can see an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionScope {
    /// Declaring command and all descendants
    Persistent,
    /// Declaring command only
    Local,
}

/// A typed option or field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    Bool(bool),
    Int(i64),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::String(_) => OptionKind::String,
            Self::Bool(_) => OptionKind::Bool,
            Self::Int(_) => OptionKind::Int,
        }
    }

    /// Raw string form, as stored in the resolver tiers
    pub fn to_raw(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
        }
    }
}

/// Declaration of a single option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub shorthand: Option<char>,
    pub scope: OptionScope,
    pub default: OptionValue,
    pub description: String,
}

impl OptionSpec {
    fn new(name: impl Into<String>, default: OptionValue, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shorthand: None,
            scope: OptionScope::Local,
            default,
            description: description.into(),
        }
    }

    /// A local string option
    pub fn string(
        name: impl Into<String>,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, OptionValue::String(default.into()), description)
    }

    /// A local bool option
    pub fn bool(name: impl Into<String>, default: bool, description: impl Into<String>) -> Self {
        Self::new(name, OptionValue::Bool(default), description)
    }

    /// A local int option
    pub fn int(name: impl Into<String>, default: i64, description: impl Into<String>) -> Self {
        Self::new(name, OptionValue::Int(default), description)
    }

    #[must_use]
    pub fn short(mut self, shorthand: char) -> Self {
        self.shorthand = Some(shorthand);
        self
    }

    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.scope = OptionScope::Persistent;
        self
    }

    pub fn kind(&self) -> OptionKind {
        self.default.kind()
    }

    fn to_arg(&self) -> Arg {
        let mut help = self.description.clone();
        let default = self.default.to_raw();
        if self.kind() != OptionKind::Bool && !default.is_empty() {
            help = format!("{help} [default: {default}]");
        }

        let mut arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(help);
        if let Some(shorthand) = self.shorthand {
            arg = arg.short(shorthand);
        }
        // `--quiet` means true; `--quiet=false` must still reach the flag tier
        // so it can override a profile or environment value.
        arg = match self.kind() {
            OptionKind::Bool => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new())
                .value_name("BOOL"),
            OptionKind::Int => arg
                .action(ArgAction::Set)
                .allow_negative_numbers(true)
                .value_name("INT"),
            OptionKind::String => arg.action(ArgAction::Set).value_name("STRING"),
        };
        if self.scope == OptionScope::Persistent {
            arg = arg.global(true);
        }
        arg
    }
}

/// Handle to a node in the command tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

#[derive(Debug)]
struct CommandNode {
    name: String,
    about: String,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
    options: Vec<OptionSpec>,
}

/// Command tree with the options declared on each node
#[derive(Debug)]
pub struct OptionRegistry {
    commands: Vec<CommandNode>,
}

fn option_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("option name pattern is valid")
    })
}

impl OptionRegistry {
    /// Create a registry holding only the root command
    pub fn new(root_name: impl Into<String>, about: impl Into<String>) -> Self {
        Self {
            commands: vec![CommandNode {
                name: root_name.into(),
                about: about.into(),
                parent: None,
                children: Vec::new(),
                options: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> CommandId {
        CommandId(0)
    }

    fn node(&self, id: CommandId) -> &CommandNode {
        &self.commands[id.0]
    }

    /// Add a subcommand under `parent`
    pub fn add_command(
        &mut self,
        parent: CommandId,
        name: impl Into<String>,
        about: impl Into<String>,
    ) -> Result<CommandId, RegistryError> {
        let name = name.into();
        if self.child(parent, &name).is_some() {
            return Err(RegistryError::DuplicateCommand {
                name,
                parent: self.command_path(parent),
            });
        }

        let id = CommandId(self.commands.len());
        self.commands.push(CommandNode {
            name,
            about: about.into(),
            parent: Some(parent),
            children: Vec::new(),
            options: Vec::new(),
        });
        self.commands[parent.0].children.push(id);
        Ok(id)
    }

    /// Declare an option on `command`
    ///
    /// Fails when the name or shorthand is already declared on the command or
    /// any ancestor. A persistent option must additionally not collide with
    /// anything already declared below the command.
    pub fn register(&mut self, command: CommandId, spec: OptionSpec) -> Result<(), RegistryError> {
        if !option_name_pattern().is_match(&spec.name) {
            return Err(RegistryError::InvalidOptionName { name: spec.name });
        }

        let mut scope = self.ancestors(command);
        if spec.scope == OptionScope::Persistent {
            scope.extend(self.descendants(command));
        }

        for id in scope {
            let node = self.node(id);
            for existing in &node.options {
                if existing.name == spec.name {
                    return Err(RegistryError::DuplicateOption {
                        name: spec.name,
                        command: self.command_path(id),
                    });
                }
                if spec.shorthand.is_some() && existing.shorthand == spec.shorthand {
                    return Err(RegistryError::DuplicateShorthand {
                        shorthand: spec.shorthand.unwrap_or_default(),
                        name: spec.name,
                        existing: existing.name.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            command = %self.command_path(command),
            option = %spec.name,
            "registered option"
        );
        self.commands[command.0].options.push(spec);
        Ok(())
    }

    /// The command and its ancestors, root first
    pub fn ancestors(&self, command: CommandId) -> Vec<CommandId> {
        let mut chain = vec![command];
        let mut current = command;
        while let Some(parent) = self.node(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    fn descendants(&self, command: CommandId) -> Vec<CommandId> {
        let mut found = Vec::new();
        let mut stack = self.node(command).children.clone();
        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(self.node(id).children.iter().copied());
        }
        found
    }

    /// Options visible from `command`, in declaration order
    ///
    /// Persistent options of every ancestor come first (root first), followed
    /// by every option declared on the command itself.
    pub fn visible_options(&self, command: CommandId) -> Vec<&OptionSpec> {
        let mut visible = Vec::new();
        for id in self.ancestors(command) {
            let node = self.node(id);
            visible.extend(
                node.options
                    .iter()
                    .filter(|o| id == command || o.scope == OptionScope::Persistent),
            );
        }
        visible
    }

    /// Find an option visible from `command`
    pub fn lookup(&self, command: CommandId, name: &str) -> Option<&OptionSpec> {
        self.visible_options(command)
            .into_iter()
            .find(|o| o.name == name)
    }

    pub fn child(&self, parent: CommandId, name: &str) -> Option<CommandId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|id| self.node(*id).name == name)
    }

    /// Find a command by its path below the root, e.g. `["table", "get"]`
    pub fn find_command(&self, path: &[&str]) -> Option<CommandId> {
        path.iter()
            .try_fold(self.root(), |id, name| self.child(id, name))
    }

    pub fn command_name(&self, command: CommandId) -> &str {
        &self.node(command).name
    }

    /// Space separated path from the root, e.g. `qb table get`
    pub fn command_path(&self, command: CommandId) -> String {
        self.ancestors(command)
            .into_iter()
            .map(|id| self.node(id).name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_leaf(&self, command: CommandId) -> bool {
        self.node(command).children.is_empty()
    }

    /// Build the clap command tree, which also generates help text
    pub fn to_clap(&self) -> Command {
        self.build_clap(self.root())
    }

    fn build_clap(&self, id: CommandId) -> Command {
        let node = self.node(id);
        let mut cmd = Command::new(node.name.clone()).about(node.about.clone());
        for spec in &node.options {
            cmd = cmd.arg(spec.to_arg());
        }

        if node.children.is_empty() {
            cmd = cmd.arg(
                Arg::new(POSITIONAL_ARGS_ID)
                    .action(ArgAction::Append)
                    .num_args(0..)
                    .value_name("ARG")
                    .help("positional arguments"),
            );
        } else {
            cmd = cmd.subcommand_required(true).arg_required_else_help(true);
            for child in &node.children {
                cmd = cmd.subcommand(self.build_clap(*child));
            }
        }
        cmd
    }

    /// Walk the parsed subcommand chain down to the invoked command
    pub fn invoked<'m>(&self, matches: &'m ArgMatches) -> (CommandId, &'m ArgMatches) {
        let mut id = self.root();
        let mut current = matches;
        while let Some((name, sub)) = current.subcommand() {
            match self.child(id, name) {
                Some(child) => {
                    id = child;
                    current = sub;
                }
                None => break,
            }
        }
        (id, current)
    }

    /// Values the user typed on the command line for options visible from
    /// `command`, keyed by option name
    ///
    /// `matches` must be the matches of `command` itself; persistent options
    /// are propagated there by clap.
    pub fn explicit_flags(&self, command: CommandId, matches: &ArgMatches) -> HashMap<String, String> {
        let mut flags = HashMap::new();
        for spec in self.visible_options(command) {
            if matches.value_source(&spec.name) != Some(ValueSource::CommandLine) {
                continue;
            }
            let raw = match spec.kind() {
                OptionKind::Bool => matches
                    .get_one::<bool>(&spec.name)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
                OptionKind::String | OptionKind::Int => matches
                    .get_one::<String>(&spec.name)
                    .cloned()
                    .unwrap_or_default(),
            };
            flags.insert(spec.name.clone(), raw);
        }
        flags
    }

    /// Positional arguments given to a leaf command
    pub fn positional_args(&self, command: CommandId, matches: &ArgMatches) -> Vec<String> {
        if !self.is_leaf(command) {
            return Vec::new();
        }
        matches
            .get_many::<String>(POSITIONAL_ARGS_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }
}

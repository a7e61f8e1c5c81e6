//! Command documentation policies.
//!
//! Shell builtins and external commands are documented from separate page
//! sets. The builtin policy answers only for names the shell implements
//! itself; the external policy answers for every other command name.

use lazy_static::lazy_static;
use phf::phf_set;
use regex::Regex;

use super::DocPolicy;
use crate::construct::Construct;

/// Commands implemented by the shell itself.
static BUILTIN_COMMANDS: phf::Set<&'static str> = phf_set! {
    ".", ":", "[", "alias", "bg", "bind", "break", "builtin", "caller", "cd",
    "command", "compgen", "complete", "compopt", "continue", "declare", "dirs",
    "disown", "echo", "enable", "eval", "exec", "exit", "export", "false", "fc",
    "fg", "getopts", "hash", "help", "history", "jobs", "kill", "let", "local",
    "logout", "mapfile", "popd", "printf", "pushd", "pwd", "read", "readarray",
    "readonly", "return", "set", "shift", "shopt", "source", "suspend", "test",
    "times", "trap", "true", "type", "typeset", "ulimit", "umask", "unalias",
    "unset", "wait",
};

lazy_static! {
    /// A key must be a plain file stem: no separators, no leading dot.
    static ref KEY_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_+\-][A-Za-z0-9_.+\-]*$").unwrap();
}

/// Whether `name` is a shell builtin.
pub fn is_builtin_command(name: &str) -> bool {
    BUILTIN_COMMANDS.contains(name)
}

/// Whether `key` can name a page without leaving its prefix.
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

fn command_key(element: &Construct) -> Option<String> {
    let name = element.text.trim();
    if is_valid_key(name) {
        Some(name.to_string())
    } else {
        None
    }
}

/// Covers command occurrences naming a shell builtin.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCommandPolicy;

impl DocPolicy for BuiltinCommandPolicy {
    fn is_applicable(&self, element: &Construct, _original: Option<&Construct>) -> bool {
        element.is_command() && is_builtin_command(element.text.trim())
    }

    fn resource_key(&self, element: &Construct) -> Option<String> {
        command_key(element)
    }
}

/// Covers command occurrences that are not shell builtins.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExternalCommandPolicy;

impl DocPolicy for ExternalCommandPolicy {
    fn is_applicable(&self, element: &Construct, _original: Option<&Construct>) -> bool {
        let name = element.text.trim();
        element.is_command() && !name.is_empty() && !is_builtin_command(name)
    }

    fn resource_key(&self, element: &Construct) -> Option<String> {
        command_key(element)
    }
}

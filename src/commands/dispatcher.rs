//! Command Dispatcher
//!
//! Maps a decoded command to its handler, checks arity, runs it against the
//! store and returns the reply.
//!
//! | Verb | Arguments | Reply                          |
//! |------|-----------|--------------------------------|
//! | PING | any       | `+PONG`                        |
//! | ECHO | 1         | bulk string of the argument    |
//! | SET  | 2         | `+OK`                          |
//! | GET  | 1         | bulk string, or `$-1` if absent |
//!
//! Verbs are matched case-insensitively. Anything else is answered with
//! `-ERR unknown command`.

use crate::commands::error::CommandError;
use crate::protocol::{Command, Reply};
use crate::storage::Store;
use bytes::Bytes;
use std::sync::Arc;

type CommandResult = Result<Reply, CommandError>;

/// Executes commands against a shared [`Store`].
///
/// Cloning is cheap: every clone points at the same store.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<Store>,
}

impl Dispatcher {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Executes a command and returns the reply to send back.
    ///
    /// Never fails: arity and unknown-command problems become error replies.
    pub fn execute(&self, command: &Command) -> Reply {
        self.dispatch(command).unwrap_or_else(Reply::from)
    }

    fn dispatch(&self, command: &Command) -> CommandResult {
        let verb = command.verb().ok_or(CommandError::Unknown)?;
        let args = command.args();

        if verb.eq_ignore_ascii_case(b"PING") {
            Ok(self.cmd_ping(args))
        } else if verb.eq_ignore_ascii_case(b"ECHO") {
            self.cmd_echo(args)
        } else if verb.eq_ignore_ascii_case(b"SET") {
            self.cmd_set(args)
        } else if verb.eq_ignore_ascii_case(b"GET") {
            self.cmd_get(args)
        } else {
            Err(CommandError::Unknown)
        }
    }

    /// PING [anything ...]
    fn cmd_ping(&self, _args: &[Bytes]) -> Reply {
        Reply::pong()
    }

    /// ECHO message
    fn cmd_echo(&self, args: &[Bytes]) -> CommandResult {
        match args {
            [message] => Ok(Reply::bulk(message.clone())),
            _ => Err(CommandError::WrongArity("echo")),
        }
    }

    /// SET key value
    fn cmd_set(&self, args: &[Bytes]) -> CommandResult {
        match args {
            [key, value] => {
                self.store.set(key.clone(), value.clone());
                Ok(Reply::ok())
            }
            _ => Err(CommandError::WrongArity("set")),
        }
    }

    /// GET key
    fn cmd_get(&self, args: &[Bytes]) -> CommandResult {
        match args {
            [key] => Ok(self.store.get(key).map_or_else(Reply::null, Reply::bulk)),
            _ => Err(CommandError::WrongArity("get")),
        }
    }
}

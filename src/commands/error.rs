use crate::protocol::Reply;
use thiserror::Error;

/// A command that could not run. These never close the connection; they are
/// turned into an error reply and the session keeps reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Wrong number of arguments. Carries the lowercase command name.
    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongArity(&'static str),

    #[error("ERR unknown command")]
    Unknown,
}

impl From<CommandError> for Reply {
    fn from(err: CommandError) -> Self {
        Reply::error(err.to_string())
    }
}

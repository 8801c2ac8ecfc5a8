//! Built-in commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait and exposes
//! its work as a plain function so it can be used without the CLI.

pub mod decode;
pub mod encode;
pub mod query;
pub mod read;
pub mod url;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use query::QueryCommand;
pub use read::ReadCommand;
pub use url::UrlCommand;

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(UrlCommand));
    registry.register(Box::new(QueryCommand));
    registry.register(Box::new(DecodeCommand));
    registry.register(Box::new(EncodeCommand));
    registry.register(Box::new(ReadCommand));
}

/// Strips one leading `?` so both `a=1` and `?a=1` are accepted.
pub(crate) fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtin_commands() {
        let mut registry = CommandRegistry::new();
        register_builtin_commands(&mut registry);
        assert_eq!(
            registry.list_commands(),
            vec!["decode", "encode", "query", "read", "url"]
        );
    }

    #[test]
    fn test_strip_question_mark() {
        assert_eq!(strip_question_mark("?a=1"), "a=1");
        assert_eq!(strip_question_mark("a=1"), "a=1");
        assert_eq!(strip_question_mark("??a"), "?a");
    }
}

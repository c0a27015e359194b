//! Inbound text grammar.
//!
//! Parsing rules:
//! - `register:` is checked first, then `private:`; anything else is a broadcast.
//! - No escaping. A colon inside a username is taken literally by `register:`
//!   and splits the target from the body in `private:`.
//! - Never fails: a `private:` payload without a body separator falls back to
//!   a verbatim broadcast of the whole message.

/// Prefix of a registration message.
pub const REGISTER_PREFIX: &str = "register:";
/// Prefix of a private message.
pub const PRIVATE_PREFIX: &str = "private:";

/// One classified inbound message, borrowing from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `register:<username>`. The username may be empty.
    Register { username: &'a str },
    /// `private:<target>:<body>`. Only the first colon after the prefix splits.
    Private { target: &'a str, body: &'a str },
    /// Any other text, relayed verbatim.
    Broadcast(&'a str),
}

impl<'a> Command<'a> {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Register { .. } => "register",
            Command::Private { .. } => "private",
            Command::Broadcast(_) => "broadcast",
        }
    }
}

/// Classify a raw text message.
pub fn parse(text: &str) -> Command<'_> {
    if let Some(username) = text.strip_prefix(REGISTER_PREFIX) {
        return Command::Register { username };
    }

    if let Some(rest) = text.strip_prefix(PRIVATE_PREFIX) {
        if let Some((target, body)) = rest.split_once(':') {
            return Command::Private { target, body };
        }
    }

    Command::Broadcast(text)
}

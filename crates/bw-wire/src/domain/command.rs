//! Frame command verbs.

use std::fmt;
use std::str::FromStr;

use crate::error::WireError;

/// Four printable ASCII bytes naming what a frame asks for.
///
/// Unknown verbs are carried as-is; routers decide whether to answer them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command([u8; 4]);

impl Command {
    pub const HELLO: Command = Command(*b"helo");
    pub const PUBLISH: Command = Command(*b"publ");
    pub const PERSIST: Command = Command(*b"pers");
    pub const SUBSCRIBE: Command = Command(*b"subs");
    pub const UNSUBSCRIBE: Command = Command(*b"usub");
    pub const QUERY: Command = Command(*b"quer");
    pub const TAP_SUBSCRIBE: Command = Command(*b"tsub");
    pub const TAP_QUERY: Command = Command(*b"tque");
    pub const LIST: Command = Command(*b"ls  ");
    pub const PUT_DOT: Command = Command(*b"putd");
    pub const PUT_ENTITY: Command = Command(*b"pute");
    pub const PUT_CHAIN: Command = Command(*b"putc");
    pub const MAKE_ENTITY: Command = Command(*b"make");
    pub const MAKE_DOT: Command = Command(*b"makd");
    pub const MAKE_CHAIN: Command = Command(*b"makc");
    pub const BUILD_CHAIN: Command = Command(*b"bldc");
    pub const SET_ENTITY: Command = Command(*b"sete");
    pub const RESPONSE: Command = Command(*b"resp");
    pub const RESULT: Command = Command(*b"rslt");

    /// Validate four bytes as a command verb.
    pub fn new(bytes: [u8; 4]) -> Result<Self, WireError> {
        if bytes.iter().all(|b| (0x20..=0x7e).contains(b)) {
            Ok(Command(bytes))
        } else {
            Err(WireError::InvalidCommand(bytes.to_vec()))
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        let array: [u8; 4] = bytes
            .try_into()
            .map_err(|_| WireError::InvalidCommand(bytes.to_vec()))?;
        Command::new(array)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Printable ASCII is always valid UTF-8.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({:?})", self.as_str())
    }
}

impl FromStr for Command {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::from_slice(s.as_bytes())
    }
}

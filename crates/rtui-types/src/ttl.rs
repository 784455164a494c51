use serde::Serialize;
use std::fmt;

/// Time-to-live of a key as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "seconds", rename_all = "snake_case")]
pub enum Ttl {
    /// Key expires after the given number of seconds
    Expires(u64),
    /// Key exists and has no expiry
    Persistent,
    /// Key does not exist
    Missing,
}

impl Ttl {
    /// Decode the integer reply of a `TTL` command.
    ///
    /// `-1` means the key has no expiry, `-2` (or any other negative
    /// value) means the key does not exist.
    pub fn from_reply(reply: i64) -> Self {
        match reply {
            -1 => Ttl::Persistent,
            n if n < 0 => Ttl::Missing,
            n => Ttl::Expires(n as u64),
        }
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ttl::Expires(secs) => write!(f, "{}s", secs),
            Ttl::Persistent => write!(f, "no expiry"),
            Ttl::Missing => write!(f, "missing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reply() {
        assert_eq!(Ttl::from_reply(120), Ttl::Expires(120));
        assert_eq!(Ttl::from_reply(0), Ttl::Expires(0));
        assert_eq!(Ttl::from_reply(-1), Ttl::Persistent);
        assert_eq!(Ttl::from_reply(-2), Ttl::Missing);
    }

    #[test]
    fn test_display() {
        assert_eq!(Ttl::Expires(30).to_string(), "30s");
        assert_eq!(Ttl::Persistent.to_string(), "no expiry");
        assert_eq!(Ttl::Missing.to_string(), "missing");
    }
}

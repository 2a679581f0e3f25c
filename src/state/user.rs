//! User-related types and state.

use chrono::{DateTime, Local};
use parking_lot::RwLock;
use std::net::IpAddr;
use std::sync::Arc;

/// Numeric code identifying a user for the lifetime of their session.
pub type UserCode = u32;

/// Shared handle to a user. The session layer owns creation and removal.
pub type UserRef = Arc<User>;

/// Longest nick name accepted.
pub const MAX_NICK_LENGTH: usize = 10;

/// A chat participant, local or remote.
///
/// Identity is the code; the nick may change during a session.
#[derive(Debug)]
pub struct User {
    code: UserCode,
    nick: RwLock<String>,
    /// Away message if user is marked away.
    away: RwLock<Option<String>>,
    /// Address the user was last seen from, unknown for the local user before login.
    ip: Option<IpAddr>,
    logged_on: DateTime<Local>,
}

impl User {
    pub fn new(nick: impl Into<String>, code: UserCode) -> Self {
        Self {
            code,
            nick: RwLock::new(nick.into()),
            away: RwLock::new(None),
            ip: None,
            logged_on: Local::now(),
        }
    }

    /// Attach the address the user was seen from.
    pub fn with_ip(mut self, ip: IpAddr) -> Self {
        self.ip = Some(ip);
        self
    }

    pub fn with_logged_on(mut self, logged_on: DateTime<Local>) -> Self {
        self.logged_on = logged_on;
        self
    }

    pub fn code(&self) -> UserCode {
        self.code
    }

    pub fn nick(&self) -> String {
        self.nick.read().clone()
    }

    pub fn set_nick(&self, nick: impl Into<String>) {
        *self.nick.write() = nick.into();
    }

    pub fn is_away(&self) -> bool {
        self.away.read().is_some()
    }

    pub fn away_message(&self) -> Option<String> {
        self.away.read().clone()
    }

    /// Mark the user away with `message`, or back with `None`.
    pub fn set_away(&self, message: Option<String>) {
        *self.away.write() = message;
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    pub fn logged_on(&self) -> DateTime<Local> {
        self.logged_on
    }

    /// Whether `other` is the same participant.
    pub fn is_same(&self, other: &User) -> bool {
        self.code == other.code
    }
}

/// Check a nick name: 1-10 letters, digits, `-`, `_` or `.`.
pub fn is_valid_nick(nick: &str) -> bool {
    let len = nick.chars().count();
    (1..=MAX_NICK_LENGTH).contains(&len)
        && nick
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_away_round_trip() {
        let user = User::new("Niles", 42);
        assert!(!user.is_away());
        assert_eq!(user.away_message(), None);

        user.set_away(Some("Gone with the wind".to_string()));
        assert!(user.is_away());
        assert_eq!(user.away_message().as_deref(), Some("Gone with the wind"));

        user.set_away(None);
        assert!(!user.is_away());
    }

    #[test]
    fn test_identity_is_code() {
        let a = User::new("Niles", 1);
        let b = User::new("Niles", 2);
        let c = User::new("Frasier", 1);
        assert!(!a.is_same(&b));
        assert!(a.is_same(&c));
    }

    #[test]
    fn test_nick_validation() {
        assert!(is_valid_nick("SomeOne"));
        assert!(is_valid_nick("a"));
        assert!(is_valid_nick("x_y-z.1"));
        assert!(is_valid_nick("Bjørn"));
        assert!(is_valid_nick("abcdefghij"));
        assert!(!is_valid_nick(""));
        assert!(!is_valid_nick("abcdefghijk"));
        assert!(!is_valid_nick("two words"));
        assert!(!is_valid_nick("semi;colon"));
    }
}

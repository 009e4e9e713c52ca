//! Runtime configuration of the driver, set by `setoption`.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, Index, IndexMut};
use std::str::FromStr;

use crate::error::{self, ErrorKind};
use crate::fen::START_FEN;

/// Type parsed from a `setoption` command.
/// The value is stringly typed, because it can be a string, bool, or nothing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RawOption {
    pub name: CaselessString,
    pub value: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Check {
    pub value: bool,
    pub default: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Text {
    pub value: String,
    pub default: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum OptionValue {
    Check(Check),
    Text(Text),
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionValue::Check(Check { value, default }) => {
                write!(f, "type check value {value} default {default}")
            }
            OptionValue::Text(Text { value, default }) => {
                write!(f, "type string value {value} default {default}")
            }
        }
    }
}

/// A named, typed setting.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Opt {
    pub name: CaselessString,
    pub value: OptionValue,
}

impl Opt {
    /// Create a new Opt of type check, with a default value.
    pub fn new_check(name: &str, default: bool) -> Self {
        Self {
            name: name.into(),
            value: OptionValue::Check(Check {
                value: default,
                default,
            }),
        }
    }

    /// Create a new Opt of type text with a default value.
    pub fn new_text(name: &str, default: &str) -> Self {
        Self {
            name: name.into(),
            value: OptionValue::Text(Text {
                value: default.trim().to_string(),
                default: default.trim().to_string(),
            }),
        }
    }

    /// Inner Check, if this is a check option.
    pub fn check(&self) -> Option<&Check> {
        match self.value {
            OptionValue::Check(ref check) => Some(check),
            _ => None,
        }
    }
    pub fn check_mut(&mut self) -> Option<&mut Check> {
        match self.value {
            OptionValue::Check(ref mut check) => Some(check),
            _ => None,
        }
    }

    /// Inner Text, if this is a text option.
    pub fn text(&self) -> Option<&Text> {
        match self.value {
            OptionValue::Text(ref text) => Some(text),
            _ => None,
        }
    }

    /// Given a RawOption, try to extract a typed value from its stringly-typed value.
    /// The parsed value must match the type of this option.
    /// This returns a mutable reference to self on successful update.
    pub fn try_update(&mut self, raw_opt: &RawOption) -> error::Result<&mut Self> {
        (self.name == raw_opt.name)
            .then_some(())
            .ok_or((ErrorKind::OptionCannotUpdate, "names do not match"))?;

        match self.value {
            OptionValue::Check(Check { ref mut value, .. }) => {
                *value = bool::from_str(&raw_opt.value)
                    .map_err(|err| error::Error::new(ErrorKind::OptionCannotUpdate, err))?;
            }
            OptionValue::Text(Text { ref mut value, .. }) => {
                (!raw_opt.value.is_empty())
                    .then_some(())
                    .ok_or((ErrorKind::OptionCannotUpdate, "text value is empty"))?;
                *value = raw_opt.value.clone();
            }
        };

        Ok(self)
    }
}

impl Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "option name {} {}", self.name.0, self.value)
    }
}

/// CaselessString is a String wrapper that compares and hashes a string with
/// ignored casing and leading/trailing whitespace.
/// It retains casing for printing, and removes leading/trailing whitespace.
#[derive(Debug, Clone)]
pub struct CaselessString(String);

impl PartialEq for CaselessString {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}
impl Eq for CaselessString {}

impl PartialEq<&str> for CaselessString {
    fn eq(&self, other: &&str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl Hash for CaselessString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_lowercase().hash(state);
    }
}

impl Deref for CaselessString {
    type Target = String;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for CaselessString {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}

/// Underlying type for Options.
type OptionsMap = HashMap<CaselessString, Opt>;

/// A HashMap wrapper for Opt.
/// An option can only be updated with a value of its own type.
#[derive(Debug, Clone, Default)]
pub struct Options(OptionsMap);

impl Options {
    pub const DEBUG: &'static str = "Debug";
    pub const SHOW_BOARD: &'static str = "ShowBoard";
    pub const START_FEN: &'static str = "StartFen";

    /// Create a new, empty Options.
    pub fn new() -> Self {
        Self(OptionsMap::new())
    }

    /// The driver's options, at their defaults.
    pub fn driver_defaults() -> Self {
        let mut options = Self::new();
        options.insert(Opt::new_check(Self::DEBUG, false));
        options.insert(Opt::new_check(Self::SHOW_BOARD, false));
        options.insert(Opt::new_text(Self::START_FEN, START_FEN));
        options
    }

    /// Insert stores an Opt using its name as the key and the full item as the value.
    /// If an item existed in the container, the item is removed and returned.
    pub fn insert(&mut self, opt: Opt) -> Option<Opt> {
        let key = opt.name.clone();
        // Remove key before inserting ensures Key capitalization is updated.
        let old_value = self.0.remove(&key);
        self.0.insert(key, opt);
        old_value
    }

    /// Options are uniquely defined by their name. Returns true if a key exists.
    pub fn contains<K: Into<CaselessString>>(&self, key: K) -> bool {
        let key: CaselessString = key.into();
        self.0.contains_key(&key)
    }

    /// Attempts to update a stored Opt with the value in a RawOption.
    /// This will not create a new Opt entry.
    pub fn update(&mut self, raw_opt: &RawOption) -> error::Result<&mut Opt> {
        self.0
            .get_mut(&raw_opt.name)
            .ok_or((ErrorKind::OptionCannotUpdate, raw_opt.name.as_str()))?
            .try_update(raw_opt)
    }

    /// Value of a check option, false if absent or not a check.
    pub fn is_set<K: Into<CaselessString>>(&self, key: K) -> bool {
        let key: CaselessString = key.into();
        self.0
            .get(&key)
            .and_then(Opt::check)
            .map_or(false, |check| check.value)
    }
}

impl<K: Into<CaselessString>> Index<K> for Options {
    type Output = Opt;
    fn index(&self, key: K) -> &Self::Output {
        let key: CaselessString = key.into();
        &self.0[&key]
    }
}

impl<K: Into<CaselessString>> IndexMut<K> for Options {
    fn index_mut(&mut self, key: K) -> &mut Self::Output {
        let key: CaselessString = key.into();
        match self.0.get_mut(&key) {
            Some(opt) => opt,
            None => panic!("option {} not present", key.0),
        }
    }
}

impl Deref for Options {
    type Target = OptionsMap;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_insert_update_contains() {
        let option_debug = Opt::new_check("Debug", false);
        let option_board = Opt::new_check("ShowBoard", false);
        let option_fen = Opt::new_text("StartFen", START_FEN);

        let mut options = Options::new();
        assert_eq!(options.len(), 0);
        assert_eq!(options.insert(option_debug.clone()), None);
        assert_eq!(options.insert(option_board.clone()), None);
        assert_eq!(options.insert(option_fen.clone()), None);
        assert_eq!(options.len(), 3);
        assert!(options.contains("showboard"));
        assert!(!options.contains("Hash"));

        let raw_debug = RawOption {
            name: "debug".into(),
            value: "true".into(),
        };
        assert!(options.update(&raw_debug).is_ok());
        assert!(options.is_set("DEBUG"));
        assert_ne!(option_debug, options["debug"]);
        assert_eq!(option_board, *options.get(&CaselessString::from("showboard")).unwrap());

        options["ShowBoard"].check_mut().unwrap().value = true;
        assert!(options.is_set(Options::SHOW_BOARD));
    }

    #[test]
    fn update_rejects_wrong_type_and_unknown_name() {
        let mut options = Options::driver_defaults();
        let not_bool = RawOption {
            name: "Debug".into(),
            value: "yes".into(),
        };
        let unknown = RawOption {
            name: "Threads".into(),
            value: "4".into(),
        };
        let empty_text = RawOption {
            name: "StartFen".into(),
            value: "".into(),
        };

        let err = options.update(&not_bool).unwrap_err();
        assert!(matches!(err, error::Error::Custom(ErrorKind::OptionCannotUpdate, _)));

        for raw_opt in [not_bool, unknown, empty_text] {
            let err = options.update(&raw_opt).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OptionCannotUpdate);
        }
        assert!(!options.is_set(Options::DEBUG));
        assert_eq!(
            options[Options::START_FEN].text().map(|text| text.value.as_str()),
            Some(START_FEN)
        );
    }

    #[test]
    fn display_option() {
        let opt = Opt::new_check("ShowBoard", false);
        assert_eq!(
            opt.to_string(),
            "option name ShowBoard type check value false default false"
        );
    }
}

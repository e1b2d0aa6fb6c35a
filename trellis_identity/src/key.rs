// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declaration keys: what a box displays and what it is identified by.
//!
//! A key is a pre-formatted label plus a [`KeyMode`] that says which part of it
//! feeds the identity hash. [`Key::parse`] derives the mode from the `##` and
//! `###` markers:
//!
//! | Input               | Display      | Hash segment |
//! |---------------------|--------------|--------------|
//! | `"Save"`            | `"Save"`     | `"Save"`     |
//! | `"Save##1"`         | `"Save"`     | `"Save1"`    |
//! | `"Count: 5###count"`| `"Count: 5"` | `"count"`    |
//!
//! Only the first `##` counts; everything after it belongs to the hash segment
//! verbatim, including further `#` characters.

use alloc::borrow::Cow;
use alloc::string::String;

/// How the hash segment of a [`Key`] is formed from its parts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyMode {
    /// The label is both displayed and hashed.
    Full,
    /// The label is displayed; label followed by salt is hashed.
    Salted,
    /// The label is displayed only; the salt alone is hashed.
    Stable,
}

/// A declaration key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key<'a> {
    label: Cow<'a, str>,
    salt: Cow<'a, str>,
    mode: KeyMode,
}

impl<'a> Key<'a> {
    /// A key whose whole text is displayed and hashed.
    pub fn full(label: impl Into<Cow<'a, str>>) -> Self {
        Self {
            label: label.into(),
            salt: Cow::Borrowed(""),
            mode: KeyMode::Full,
        }
    }

    /// A key displaying `label` and identified by `label` and `salt` together.
    pub fn salted(label: impl Into<Cow<'a, str>>, salt: impl Into<Cow<'a, str>>) -> Self {
        Self {
            label: label.into(),
            salt: salt.into(),
            mode: KeyMode::Salted,
        }
    }

    /// A key displaying `label` and identified by `id` alone.
    ///
    /// The label may change between frames without changing identity.
    pub fn stable(label: impl Into<Cow<'a, str>>, id: impl Into<Cow<'a, str>>) -> Self {
        Self {
            label: label.into(),
            salt: id.into(),
            mode: KeyMode::Stable,
        }
    }

    /// Split `text` on its first `##` / `###` marker.
    pub fn parse(text: &'a str) -> Self {
        match find_marker(text) {
            None => Self::full(text),
            Some((at, KeyMode::Stable)) => Self::stable(&text[..at], &text[at + 3..]),
            Some((at, _)) => Self::salted(&text[..at], &text[at + 2..]),
        }
    }

    /// Like [`Key::parse`] for an owned string.
    pub fn parse_owned(text: String) -> Key<'static> {
        match find_marker(&text) {
            None => Key::full(text),
            Some((at, KeyMode::Stable)) => {
                let salt = String::from(&text[at + 3..]);
                let mut label = text;
                label.truncate(at);
                Key::stable(label, salt)
            }
            Some((at, _)) => {
                let salt = String::from(&text[at + 2..]);
                let mut label = text;
                label.truncate(at);
                Key::salted(label, salt)
            }
        }
    }

    /// The mode this key was built with.
    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// The text shown for this key.
    pub fn display(&self) -> &str {
        &self.label
    }

    /// The text whose hash identifies this key across frames.
    pub fn hash_segment(&self) -> Cow<'_, str> {
        match self.mode {
            KeyMode::Full => Cow::Borrowed(&self.label),
            KeyMode::Stable => Cow::Borrowed(&self.salt),
            KeyMode::Salted if self.salt.is_empty() => Cow::Borrowed(&self.label),
            KeyMode::Salted => {
                let mut joined = String::with_capacity(self.label.len() + self.salt.len());
                joined.push_str(&self.label);
                joined.push_str(&self.salt);
                Cow::Owned(joined)
            }
        }
    }

    /// Detach from any borrowed input.
    pub fn into_owned(self) -> Key<'static> {
        Key {
            label: Cow::Owned(self.label.into_owned()),
            salt: Cow::Owned(self.salt.into_owned()),
            mode: self.mode,
        }
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(text: &'a str) -> Self {
        Self::parse(text)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(text: &'a String) -> Self {
        Self::parse(text)
    }
}

impl From<String> for Key<'static> {
    fn from(text: String) -> Self {
        Key::parse_owned(text)
    }
}

/// Byte offset of the first `##` and whether a third `#` follows it.
fn find_marker(text: &str) -> Option<(usize, KeyMode)> {
    let at = text.find("##")?;
    let stable = text.as_bytes().get(at + 2) == Some(&b'#');
    Some((at, if stable { KeyMode::Stable } else { KeyMode::Salted }))
}

//! Connection parameter parsing and rebuilding
//!
//! Options travel as an ordered list of key/value pairs. Backend
//! specific keys are extracted (removed) before the remaining options
//! are handed to the native driver's own parser, which would reject
//! keys it does not know.

use crate::Error;

/// Ordered collection of connection options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnParams {
    opts: Vec<(String, String)>,
}

impl ConnParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space separated `key=value` option string.
    ///
    /// Values may be double quoted, in which case embedded spaces are
    /// literal and `\"` escapes a quote.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut opts = Vec::new();
        let mut chars = input.chars().peekable();

        loop {
            while chars.peek() == Some(&' ') {
                chars.next();
            }
            if chars.peek().is_none() {
                break;
            }

            let mut key = String::new();
            while let Some(&c) = chars.peek() {
                if c == '=' || c == ' ' {
                    break;
                }
                key.push(c);
                chars.next();
            }

            if chars.peek() != Some(&'=') {
                return Err(Error::Parse(format!(
                    "expected '=' after connection option name \"{}\"",
                    key
                )));
            }
            chars.next();

            let mut value = String::new();
            if chars.peek() == Some(&'"') {
                chars.next();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        c => value.push(c),
                    }
                }
                if !closed {
                    return Err(Error::Parse(format!(
                        "unterminated quoted value for connection option \"{}\"",
                        key
                    )));
                }
            } else {
                while let Some(&c) = chars.peek() {
                    if c == ' ' {
                        break;
                    }
                    value.push(c);
                    chars.next();
                }
            }

            opts.push((key, value));
        }

        Ok(ConnParams { opts })
    }

    /// Value of the first option with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.opts
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value of an existing option, or append a new one.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.opts.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.opts.push((key.to_string(), value.to_string())),
        }
    }

    /// Remove an option and return its value.
    ///
    /// Used to consume backend specific keys before the remainder is
    /// passed through to the native driver.
    pub fn extract(&mut self, key: &str) -> Option<String> {
        let pos = self.opts.iter().position(|(k, _)| k == key)?;
        Some(self.opts.remove(pos).1)
    }

    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.opts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rebuild the option string with every value quoted by `quote`.
    ///
    /// The native driver may use a different quoting convention than
    /// this library, libpq for one wants single quotes.
    pub fn build_conninfo(&self, quote: char) -> String {
        let mut out = String::new();
        for (key, value) in &self.opts {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(key);
            out.push('=');
            out.push(quote);
            for c in value.chars() {
                if c == quote || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push(quote);
        }
        out
    }

    /// Whether a boolean-like option value counts as true.
    pub fn is_true_value(value: &str) -> bool {
        matches!(
            value.to_ascii_lowercase().as_str(),
            "" | "1" | "y" | "yes" | "t" | "true" | "on"
        )
    }
}

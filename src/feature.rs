//! CDS features: a compound location plus qualifiers, with typed accessors.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::location::CompoundLocation;

/// Qualifier names read or written by the translator.
pub mod qualifier {
    pub const TRANSLATION: &str = "translation";
    pub const TRANSL_EXCEPT: &str = "transl_except";
    pub const TRANSL_TABLE: &str = "transl_table";
    pub const CODON: &str = "codon";
    pub const CODON_START: &str = "codon_start";
    pub const EXCEPTION: &str = "exception";
    pub const PSEUDO: &str = "pseudo";
    pub const PSEUDOGENE: &str = "pseudogene";
}

/// A `/name=value` feature qualifier; flag qualifiers such as `/pseudo` have no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Qualifier {
    #[must_use]
    pub fn new(name: &str, value: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }
}

/// A coding sequence feature.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CdsFeature {
    pub location: CompoundLocation,
    pub qualifiers: Vec<Qualifier>,
}

impl CdsFeature {
    #[must_use]
    pub fn new(location: CompoundLocation) -> Self {
        Self {
            location,
            qualifiers: Vec::new(),
        }
    }

    /// Builder-style qualifier append.
    #[must_use]
    pub fn with_qualifier(mut self, name: &str, value: Option<&str>) -> Self {
        self.qualifiers.push(Qualifier::new(name, value));
        self
    }

    #[must_use]
    pub fn has_qualifier(&self, name: &str) -> bool {
        self.qualifiers.iter().any(|q| q.name == name)
    }

    /// Value of the first qualifier called `name`.
    #[must_use]
    pub fn qualifier_value(&self, name: &str) -> Option<&str> {
        self.qualifiers
            .iter()
            .find(|q| q.name == name)
            .and_then(|q| q.value.as_deref())
    }

    /// Values of every qualifier called `name`, in order.
    pub fn qualifier_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.qualifiers
            .iter()
            .filter(move |q| q.name == name)
            .filter_map(|q| q.value.as_deref())
    }

    /// Replace the first qualifier called `name`, or append one.
    pub fn set_qualifier(&mut self, name: &str, value: Option<&str>) {
        match self.qualifiers.iter_mut().find(|q| q.name == name) {
            Some(q) => q.value = value.map(str::to_string),
            None => self.qualifiers.push(Qualifier::new(name, value)),
        }
    }

    /// Remove every qualifier called `name`; returns true if any were present.
    pub fn remove_qualifier(&mut self, name: &str) -> bool {
        let before = self.qualifiers.len();
        self.qualifiers.retain(|q| q.name != name);
        self.qualifiers.len() != before
    }

    /// Asserted translation with layout whitespace removed.
    #[must_use]
    pub fn translation(&self) -> Option<String> {
        self.qualifier_value(qualifier::TRANSLATION)
            .map(|t| t.chars().filter(|c| !c.is_whitespace()).collect())
    }

    #[must_use]
    pub fn is_pseudo(&self) -> bool {
        self.has_qualifier(qualifier::PSEUDO) || self.has_qualifier(qualifier::PSEUDOGENE)
    }

    /// Whether an `/exception` qualifier excuses translation discrepancies.
    #[must_use]
    pub fn has_exception(&self) -> bool {
        self.has_qualifier(qualifier::EXCEPTION)
    }

    /// `/transl_table`, if present.
    pub fn transl_table(&self) -> Result<Option<u8>, Error> {
        self.parse_number(qualifier::TRANSL_TABLE)
    }

    /// `/codon_start`, if present. Range checking is left to the translator.
    pub fn codon_start(&self) -> Result<Option<i64>, Error> {
        self.parse_number(qualifier::CODON_START)
    }

    pub fn codon_exceptions(&self) -> impl Iterator<Item = &str> {
        self.qualifier_values(qualifier::CODON)
    }

    pub fn transl_excepts(&self) -> impl Iterator<Item = &str> {
        self.qualifier_values(qualifier::TRANSL_EXCEPT)
    }

    fn parse_number<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, Error> {
        let Some(value) = self.qualifier_value(name) else {
            if self.has_qualifier(name) {
                return Err(Error::Configuration(format!("/{name} has no value")));
            }
            return Ok(None);
        };
        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Configuration(format!("/{name} is not a number: '{value}'")))
    }
}

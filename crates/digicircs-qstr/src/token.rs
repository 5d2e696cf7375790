//! Gate tokens and circuit strings.
//!
//! A gate token is the text `name=target=control=param`, where `nop` marks an
//! absent control or parameter. A circuit string joins tokens with `@`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{FIELD_SEPARATOR, GATE_SEPARATOR, NOP};
use crate::error::QStrError;

/// One `name=target=control=param` gate token.
///
/// `None` fields are written as `nop`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateToken {
    pub name: String,
    pub target: Option<u32>,
    pub control: Option<u32>,
    pub param: Option<String>,
}

impl GateToken {
    /// A token without control or parameter.
    pub fn new(name: impl Into<String>, target: u32) -> Self {
        Self {
            name: name.into(),
            target: Some(target),
            control: None,
            param: None,
        }
    }

    /// Set the control qubit.
    #[must_use]
    pub fn with_control(mut self, control: u32) -> Self {
        self.control = Some(control);
        self
    }

    /// Set the parameter text.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    /// Check whether this is the explicit no-op token.
    pub fn is_nop(&self) -> bool {
        self.name == NOP
    }

    /// Qubits touched by this token, target first.
    pub fn qubits(&self) -> impl Iterator<Item = u32> + '_ {
        self.target.into_iter().chain(self.control)
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: Option<impl fmt::Display>) -> fmt::Result {
    match field {
        Some(v) => write!(f, "{FIELD_SEPARATOR}{v}"),
        None => write!(f, "{FIELD_SEPARATOR}{NOP}"),
    }
}

impl fmt::Display for GateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        write_field(f, self.target)?;
        write_field(f, self.control)?;
        write_field(f, self.param.as_deref())
    }
}

fn parse_qubit(token: &str, field: &str, what: &str) -> Result<Option<u32>, QStrError> {
    if field == NOP {
        return Ok(None);
    }
    field
        .parse::<u32>()
        .map(Some)
        .map_err(|_| QStrError::MalformedToken {
            token: token.to_string(),
            reason: format!("{what} '{field}' is not a qubit index"),
        })
}

impl FromStr for GateToken {
    type Err = QStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(FIELD_SEPARATOR).collect();
        let [name, target, control, param] = fields[..] else {
            return Err(QStrError::MalformedToken {
                token: s.to_string(),
                reason: format!("expected 4 fields, found {}", fields.len()),
            });
        };

        Ok(Self {
            name: name.to_string(),
            target: parse_qubit(s, target, "target")?,
            control: parse_qubit(s, control, "control")?,
            param: (param != NOP).then(|| param.to_string()),
        })
    }
}

/// An ordered sequence of gate tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitString(Vec<GateToken>);

impl CircuitString {
    /// Create a circuit string from tokens.
    pub fn new(tokens: Vec<GateToken>) -> Self {
        Self(tokens)
    }

    /// The tokens in application order.
    pub fn tokens(&self) -> &[GateToken] {
        &self.0
    }

    /// Consume into the token list.
    pub fn into_tokens(self) -> Vec<GateToken> {
        self.0
    }

    /// Iterate over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, GateToken> {
        self.0.iter()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a token.
    pub fn push(&mut self, token: GateToken) {
        self.0.push(token);
    }
}

impl fmt::Display for CircuitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{GATE_SEPARATOR}")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl FromStr for CircuitString {
    type Err = QStrError;

    /// Parse a circuit string. The empty string is the empty circuit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        s.split(GATE_SEPARATOR)
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<GateToken>> for CircuitString {
    fn from(tokens: Vec<GateToken>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<GateToken> for CircuitString {
    fn from_iter<I: IntoIterator<Item = GateToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CircuitString {
    type Item = &'a GateToken;
    type IntoIter = std::slice::Iter<'a, GateToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for CircuitString {
    type Item = GateToken;
    type IntoIter = std::vec::IntoIter<GateToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

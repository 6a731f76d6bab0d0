use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The value type of an external input referenced by conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    Boolean,
    Double,
    String,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputType::Boolean => "Boolean",
            InputType::Double => "Double",
            InputType::String => "String",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Boolean" => Ok(InputType::Boolean),
            "Double" => Ok(InputType::Double),
            "String" => Ok(InputType::String),
            other => Err(format!(
                "unknown input type '{}', expected Boolean, Double or String",
                other
            )),
        }
    }
}

/// A named external input. Documentation only; conditions are never checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
}

impl InputDeclaration {
    pub fn new(name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            name: name.into(),
            input_type,
        }
    }
}

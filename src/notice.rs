use std::fmt;

/// Transient user-facing message, shown once and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Keypad buffer that is not a decimal number
    InvalidInput(String),
    /// Amount handed back from the add-entry form that is not a decimal number
    InvalidValue(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidInput(input) => write!(f, "Input is not valid: {}", input),
            Notice::InvalidValue(value) => write!(f, "Value is invalid: {}", value),
        }
    }
}

//! Three-valued logic.
//!
//! `Unknown` is what Lua sees as `nil`: a predicate that could not be
//! decided because an input was missing.

/// A three-valued truth value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Self::True
        } else {
            Self::False
        }
    }
}

impl Truth {
    pub fn is_true(self) -> bool {
        self == Self::True
    }

    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }

    /// `True` ↔ `False`, `Unknown` stays.
    pub fn negate(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }

    /// False if any operand is false, else unknown if any is unknown.
    pub fn and(values: impl IntoIterator<Item = Truth>) -> Self {
        let mut out = Self::True;
        for v in values {
            match v {
                Self::False => return Self::False,
                Self::Unknown => out = Self::Unknown,
                Self::True => {}
            }
        }
        out
    }

    /// True if any operand is true, else unknown if any is unknown.
    pub fn or(values: impl IntoIterator<Item = Truth>) -> Self {
        let mut out = Self::False;
        for v in values {
            match v {
                Self::True => return Self::True,
                Self::Unknown => out = Self::Unknown,
                Self::False => {}
            }
        }
        out
    }

    /// Odd number of true operands; unknown if any operand is unknown.
    pub fn xor(values: impl IntoIterator<Item = Truth>) -> Self {
        let mut odd = false;
        for v in values {
            match v {
                Self::Unknown => return Self::Unknown,
                Self::True => odd = !odd,
                Self::False => {}
            }
        }
        odd.into()
    }

    /// First operand that is not unknown.
    pub fn surrogate(values: impl IntoIterator<Item = Truth>) -> Self {
        values
            .into_iter()
            .find(|v| !v.is_unknown())
            .unwrap_or(Self::Unknown)
    }
}

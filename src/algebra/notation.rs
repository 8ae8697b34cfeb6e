use serde::{Deserialize, Serialize};

/// Symbol set used when rendering algebra expressions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notation {
    /// ρ σ π ⨝ ∧
    #[default]
    Unicode,
    /// rho sigma pi JOIN AND
    Ascii,
}

impl Notation {
    pub fn rename(&self) -> &'static str {
        match self {
            Notation::Unicode => "ρ",
            Notation::Ascii => "rho",
        }
    }

    pub fn select(&self) -> &'static str {
        match self {
            Notation::Unicode => "σ",
            Notation::Ascii => "sigma",
        }
    }

    pub fn project(&self) -> &'static str {
        match self {
            Notation::Unicode => "π",
            Notation::Ascii => "pi",
        }
    }

    pub fn join(&self) -> &'static str {
        match self {
            Notation::Unicode => "⨝",
            Notation::Ascii => "JOIN",
        }
    }

    pub fn and(&self) -> &'static str {
        match self {
            Notation::Unicode => "∧",
            Notation::Ascii => "AND",
        }
    }
}

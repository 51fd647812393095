use serde::{Deserialize, Serialize};

/// Semantic type of a variable in the causal graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    #[default]
    Real,
    /// Two-valued column, e.g. gender encoded as ±1 or 0/1.
    Binary,
}

impl VariableKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Binary => "binary",
        }
    }
}

impl std::fmt::Display for VariableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

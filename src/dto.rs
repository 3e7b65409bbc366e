use std::fmt;

/// A data row as read from the source, before any validation.
/// Cells are already trimmed; `line` is the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line: u64,
    pub title: String,
    pub tx_type: String,
    pub raw_value: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Outcome,
    /// Anything else found in the ledger. Kept as-is and ignored by the balance.
    Other(String),
}

impl TransactionType {
    /// Matching is exact: "Income" is not an income.
    pub fn from_token(token: &str) -> Self {
        match token {
            "income" => Self::Income,
            "outcome" => Self::Outcome,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Income => "income",
            Self::Outcome => "outcome",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

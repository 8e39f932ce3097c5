use thiserror::Error;

/// Failures of the data access layer.
///
/// Reads and writes are kept apart because callers recover from them
/// differently: a failed read degrades the page, a failed write keeps the
/// form populated for another attempt.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Read failure: store unreachable or query rejected
    #[error("failed to fetch from {table}: {reason}")]
    DataFetch { table: String, reason: String },

    /// Insert failure: constraint violation or store unreachable
    #[error("failed to write to {table}: {reason}")]
    DataWrite { table: String, reason: String },
}

impl StoreError {
    pub fn fetch(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataFetch {
            table: table.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataWrite {
            table: table.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::DataFetch { .. })
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::DataWrite { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::fetch("movies", "connection refused");
        assert!(err.is_fetch());
        assert_eq!(err.to_string(), "failed to fetch from movies: connection refused");

        let err = StoreError::write("reviews", "violates check constraint");
        assert!(err.is_write());
        assert_eq!(err.to_string(), "failed to write to reviews: violates check constraint");
    }
}

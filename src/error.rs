use thiserror::Error;

/// Recoverable failures surfaced by tree operations.
///
/// Missing keys are not errors; lookups and removals report them through
/// `Option` or a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no comparator configured for the key type")]
    MissingComparator,

    #[error("index {index} out of range for tree of {len} keys")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("range of {count} keys at index {index} out of bounds for tree of {len} keys")]
    RangeOutOfBounds { index: usize, count: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_name_the_offending_values() {
        assert_eq!(
            "index 7 out of range for tree of 3 keys",
            TreeError::IndexOutOfRange { index: 7, len: 3 }.to_string()
        );
        assert_eq!(
            "range of 4 keys at index 1 out of bounds for tree of 3 keys",
            TreeError::RangeOutOfBounds {
                index: 1,
                count: 4,
                len: 3
            }
            .to_string()
        );
    }
}

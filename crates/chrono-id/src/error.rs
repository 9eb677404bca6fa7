/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `chrono-id` can produce.
///
/// Every error is raised synchronously at the call that received the bad
/// input. Generator state is never mutated by a call that fails.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required input was absent (`None`).
    ///
    /// `what` names the missing input. Text entry points report `"string"`.
    #[error("Input {what} is null")]
    NullInput { what: &'static str },

    /// Text could not be parsed.
    #[error(transparent)]
    InvalidFormat(#[from] FormatError),

    /// The instant lies before 2020-01-01T00:00:00Z.
    #[error("Timestamp underflow: Date is before Epoch (2020-01-01)")]
    TimestampUnderflow,
}

/// The reasons text input can be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// No accepted ISO-8601 layout matched.
    #[error("Invalid ISO 8601 format")]
    Iso,

    /// The text is not hexadecimal, or the value does not fit the variant.
    #[error("Invalid hex format for {variant}: {input}")]
    Hex {
        variant: &'static str,
        input: String,
    },

    /// No variant carries this name.
    #[error("Unknown variant: {input}")]
    Variant { input: String },

    /// No precision level carries this symbol.
    #[error("Unknown precision: {input}")]
    Precision { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_reference_wording() {
        assert_eq!(
            Error::NullInput { what: "date" }.to_string(),
            "Input date is null"
        );
        assert_eq!(
            Error::TimestampUnderflow.to_string(),
            "Timestamp underflow: Date is before Epoch (2020-01-01)"
        );
        let hex: Error = FormatError::Hex {
            variant: "chrono64s",
            input: "XYZ".into(),
        }
        .into();
        assert_eq!(hex.to_string(), "Invalid hex format for chrono64s: XYZ");
    }
}

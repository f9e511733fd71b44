/// Kinds of [`ProxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxErrorKind
{
    /// Working memory could not be obtained.
    ResourceExhausted,
    /// A precondition on the arguments does not hold.
    InvalidArgument,
}

/// Errors of the sorted-L1 prox evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxError
{
    /// Allocation of `len` working elements failed.
    ResourceExhausted {
        /// Number of elements requested.
        len: usize,
    },

    /// An argument does not have the length of `y`.
    MismatchedLengths {
        /// Name of the offending argument.
        name: &'static str,
        /// Length of `y`.
        expected: usize,
        /// Length of the argument.
        got: usize,
    },
    /// `y[index - 1] < y[index]`, or `y[index]` is NaN.
    UnsortedInput {
        index: usize,
    },
    /// `lambda[index - 1] < lambda[index]`, or `lambda[index]` is NaN.
    UnsortedWeights {
        index: usize,
    },
    /// `lambda[index] < 0`.
    NegativeWeight {
        index: usize,
    },
    /// `lambda[index]` is NaN or infinite.
    NonFiniteWeight {
        index: usize,
    },
    /// `order[index] = value` is not less than the input length.
    PermutationOutOfRange {
        index: usize,
        value: usize,
    },
    /// `order[index] = value` already appeared at a smaller index.
    DuplicatePermutation {
        index: usize,
        value: usize,
    },
}

impl ProxError
{
    /// Returns the [`ProxErrorKind`] of this error.
    pub fn kind(&self) -> ProxErrorKind
    {
        match self {
            ProxError::ResourceExhausted {..} => ProxErrorKind::ResourceExhausted,
            _ => ProxErrorKind::InvalidArgument,
        }
    }
}

impl core::fmt::Display for ProxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProxError::ResourceExhausted { len } =>
                write!(f, "ResourceExhausted: failed to allocate {} working elements", len),
            ProxError::MismatchedLengths { name, expected, got } =>
                write!(f, "InvalidArgument: `{}` has length {}, expected {}", name, got, expected),
            ProxError::UnsortedInput { index } =>
                write!(f, "InvalidArgument: `y` is unordered at index {}", index),
            ProxError::UnsortedWeights { index } =>
                write!(f, "InvalidArgument: `lambda` is unordered at index {}", index),
            ProxError::NegativeWeight { index } =>
                write!(f, "InvalidArgument: `lambda` is negative at index {}", index),
            ProxError::NonFiniteWeight { index } =>
                write!(f, "InvalidArgument: `lambda` is not finite at index {}", index),
            ProxError::PermutationOutOfRange { index, value } =>
                write!(f, "InvalidArgument: `order[{}]` = {} is out of range", index, value),
            ProxError::DuplicatePermutation { index, value } =>
                write!(f, "InvalidArgument: `order[{}]` = {} is a duplicate", index, value),
        }
    }
}

impl std::error::Error for ProxError {}

//

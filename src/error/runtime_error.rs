#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// A value had an unexpected or incompatible kind.
    TypeError {
        /// Details about the kind mismatch, including the offending value.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArityError {
        /// The number of parameters the function declares.
        expected: usize,
        /// The number of arguments that were supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A `while` loop ran longer than the configured iteration budget.
    LoopOverflow {
        /// The iteration budget that was exceeded.
        limit: u64,
        /// The source line of the `while` statement.
        line:  usize,
    },
    /// Unary `+` was applied to a string that does not spell a number.
    InvalidNumber {
        /// The string that failed to parse.
        value: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A host-provided function failed while running its action.
    HostError {
        /// Details about the failure.
        details: String,
        /// The source line of the call.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },

            Self::ArityError { expected, found, line } => write!(f,
                                                                 "Error on line {line}: Expected {expected} argument(s), found {found}."),

            Self::LoopOverflow { limit, line } => write!(f,
                                                         "Error on line {line}: While loop exceeded the budget of {limit} iteration(s)."),

            Self::InvalidNumber { value, line } => write!(f,
                                                          "Error on line {line}: \"{value}\" is not a valid number."),

            Self::HostError { details, line } => {
                write!(f, "Error on line {line}: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}

use std::rc::Rc;

use crate::{
    ast::{Param, Statement},
    interpreter::{evaluator::core::EvalResult, scope::Scope, value::core::Value},
};

/// The action of a host-provided function.
///
/// The action receives the call's scope, already populated with the bound
/// arguments, and the call-site line number for error reporting.
pub type HostAction = Rc<dyn Fn(&Rc<Scope>, usize) -> EvalResult<Value>>;

/// Represents a callable value.
///
/// User-defined functions carry their declared parameters and body
/// statements. Host-provided functions carry one parameter list per accepted
/// arity, plus an opaque action; a call selects the signature matching its
/// argument count and then follows the same binding and type-check contract
/// as user functions.
#[derive(Clone)]
pub enum FunctionValue {
    /// A function written in the language: `fun(...) ... nfu`.
    User {
        /// The declared parameters.
        params: Vec<Param>,
        /// The statements of the body.
        body:   Rc<[Statement]>,
    },
    /// A function provided by the host.
    Host {
        /// One parameter list per accepted argument count.
        signatures: Vec<Vec<Param>>,
        /// The native action run once arguments are bound.
        action:     HostAction,
    },
}

impl FunctionValue {
    /// Returns every parameter list this function accepts.
    ///
    /// User functions have exactly one; host functions may have several.
    #[must_use]
    pub fn signatures(&self) -> Vec<&[Param]> {
        match self {
            Self::User { params, .. } => vec![params.as_slice()],
            Self::Host { signatures, .. } => signatures.iter().map(Vec::as_slice).collect(),
        }
    }
}

impl PartialEq for FunctionValue {
    /// Two functions compare equal iff their parameter lists are equal as
    /// sequences. Bodies and host actions do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.signatures() == other.signatures()
    }
}

impl std::fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User { params, body } => f.debug_struct("User")
                                            .field("params", params)
                                            .field("body", body)
                                            .finish(),
            Self::Host { signatures, .. } => f.debug_struct("Host")
                                              .field("signatures", signatures)
                                              .finish_non_exhaustive(),
        }
    }
}

impl std::fmt::Display for FunctionValue {
    /// Formats the function as `fun(p1, p2, ...)`, listing the parameter
    /// names of its longest signature.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let signatures = self.signatures();
        let params = signatures.iter()
                               .max_by_key(|params| params.len())
                               .copied()
                               .unwrap_or(&[]);

        write!(f, "fun(")?;
        for (index, param) in params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.name)?;
        }
        write!(f, ")")
    }
}

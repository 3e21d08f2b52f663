//! Error types shared across the bugs-rs workspace.
//!
//! The error kinds mirror §7 of the specification: dimension mismatch,
//! invalid parameter value, invalid structural constraint, no-sampler,
//! numerical, and logic errors. Fatal errors render as a single
//! diagnostic line `<component>: <reason> [at node <name>]`.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type BugsResult<T> = Result<T, BugsError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    DimensionMismatch,
    InvalidParameter,
    InvalidConstraint,
    NoSampler,
    Numerical,
    Logic,
    Multiple,
    Context,
}

/// A cheaply-cloned, possibly-static error message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrString(Cow<'static, str>);

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<Cow<'static, str>>> From<T> for ErrString {
    fn from(v: T) -> Self {
        Self(v.into())
    }
}

/// The error kinds of §7: a compiler/runtime failure naming the
/// offending component and, where applicable, the node involved.
#[derive(Debug)]
pub enum BugsError {
    /// A node's declared shape does not match a value, parameter, or parent's shape.
    DimensionMismatch {
        component: ErrString,
        message: ErrString,
        node: Option<ErrString>,
    },
    /// A stochastic update or `checkParentValues` rejected a parameter value
    /// (e.g. negative precision).
    InvalidParameter {
        component: ErrString,
        message: ErrString,
        node: Option<ErrString>,
    },
    /// A structural-zero coordinate received nonzero posterior mass, or an
    /// equivalent structural constraint was violated.
    InvalidConstraint {
        component: ErrString,
        message: ErrString,
        node: Option<ErrString>,
    },
    /// The factory pipeline exhausted every factory without claiming a node.
    NoSampler { node: ErrString },
    /// A log-density or posterior quantity was non-finite.
    Numerical {
        component: ErrString,
        message: ErrString,
        node: Option<ErrString>,
    },
    /// An internal invariant was violated; always fatal.
    Logic {
        component: ErrString,
        message: ErrString,
    },
    Multiple(MultiDisplay),
    Context {
        context: ErrorContext,
        source: Box<BugsError>,
    },
}

impl BugsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::InvalidConstraint { .. } => ErrorCode::InvalidConstraint,
            Self::NoSampler { .. } => ErrorCode::NoSampler,
            Self::Numerical { .. } => ErrorCode::Numerical,
            Self::Logic { .. } => ErrorCode::Logic,
            Self::Multiple(_) => ErrorCode::Multiple,
            Self::Context { .. } => ErrorCode::Context,
        }
    }

    /// The node named by this error, if any.
    pub fn node(&self) -> Option<&str> {
        match self {
            Self::DimensionMismatch { node, .. }
            | Self::InvalidParameter { node, .. }
            | Self::InvalidConstraint { node, .. }
            | Self::Numerical { node, .. } => node.as_deref(),
            Self::NoSampler { node } => Some(node.as_ref()),
            _ => None,
        }
    }

    pub fn with_context(self, msg: impl Into<String>) -> Self {
        BugsError::Context {
            context: ErrorContext::new(msg),
            source: Box::new(self),
        }
    }
}

impl Display for BugsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                component,
                message,
                node,
            } => write_diagnostic(f, component, message, node),
            Self::InvalidParameter {
                component,
                message,
                node,
            } => write_diagnostic(f, component, message, node),
            Self::InvalidConstraint {
                component,
                message,
                node,
            } => write_diagnostic(f, component, message, node),
            Self::NoSampler { node } => {
                write!(f, "sampler factory pipeline: no factory claimed node [at node {node}]")
            }
            Self::Numerical {
                component,
                message,
                node,
            } => write_diagnostic(f, component, message, node),
            Self::Logic { component, message } => write!(f, "{component}: {message}"),
            Self::Multiple(m) => write!(f, "{m}"),
            Self::Context { context, source } => write!(f, "{context}\nCaused by: {source}"),
        }
    }
}

fn write_diagnostic(
    f: &mut Formatter<'_>,
    component: &ErrString,
    message: &ErrString,
    node: &Option<ErrString>,
) -> fmt::Result {
    match node {
        Some(n) => write!(f, "{component}: {message} [at node {n}]"),
        None => write!(f, "{component}: {message}"),
    }
}

impl std::error::Error for BugsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ErrorContext {
    message: String,
}

impl ErrorContext {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorContext {}

#[derive(Debug)]
pub struct MultiDisplay(Vec<BugsError>);

impl Display for MultiDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{i}] {e} (code: {:?})", e.code())?;
        }
        Ok(())
    }
}

impl From<Vec<BugsError>> for BugsError {
    fn from(v: Vec<BugsError>) -> Self {
        BugsError::Multiple(MultiDisplay(v))
    }
}

pub trait ResultExt<T> {
    fn context(self, msg: impl Into<String>) -> BugsResult<T>;
}

impl<T> ResultExt<T> for BugsResult<T> {
    fn context(self, msg: impl Into<String>) -> BugsResult<T> {
        self.map_err(|e| e.with_context(msg))
    }
}

#[doc(hidden)]
pub mod __private {
    #[inline]
    #[cold]
    #[must_use]
    pub fn must_use<E>(e: E) -> E {
        e
    }
}

/// Construct a [`BugsError`] of a given variant, e.g.
/// `bugs_err!(InvalidParameter, "tau" => "mu.prec", "must be positive")`.
#[macro_export]
macro_rules! bugs_err {
    (DimensionMismatch, $component:expr, $($arg:tt)+) => {
        $crate::__private::must_use($crate::BugsError::DimensionMismatch {
            component: $component.into(),
            message: format!($($arg)+).into(),
            node: None,
        })
    };
    (DimensionMismatch, $component:expr, node: $node:expr, $($arg:tt)+) => {
        $crate::__private::must_use($crate::BugsError::DimensionMismatch {
            component: $component.into(),
            message: format!($($arg)+).into(),
            node: Some($node.into()),
        })
    };
    (InvalidParameter, $component:expr, node: $node:expr, $($arg:tt)+) => {
        $crate::__private::must_use($crate::BugsError::InvalidParameter {
            component: $component.into(),
            message: format!($($arg)+).into(),
            node: Some($node.into()),
        })
    };
    (InvalidParameter, $component:expr, $($arg:tt)+) => {
        $crate::__private::must_use($crate::BugsError::InvalidParameter {
            component: $component.into(),
            message: format!($($arg)+).into(),
            node: None,
        })
    };
    (InvalidConstraint, $component:expr, node: $node:expr, $($arg:tt)+) => {
        $crate::__private::must_use($crate::BugsError::InvalidConstraint {
            component: $component.into(),
            message: format!($($arg)+).into(),
            node: Some($node.into()),
        })
    };
    (Numerical, $component:expr, node: $node:expr, $($arg:tt)+) => {
        $crate::__private::must_use($crate::BugsError::Numerical {
            component: $component.into(),
            message: format!($($arg)+).into(),
            node: Some($node.into()),
        })
    };
    (Logic, $component:expr, $($arg:tt)+) => {
        $crate::__private::must_use($crate::BugsError::Logic {
            component: $component.into(),
            message: format!($($arg)+).into(),
        })
    };
    (NoSampler, $node:expr) => {
        $crate::__private::must_use($crate::BugsError::NoSampler { node: $node.into() })
    };
}

#[macro_export]
macro_rules! bugs_bail {
    ($($tt:tt)+) => {
        return Err($crate::bugs_err!($($tt)+))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond { $crate::bugs_bail!($($tt)+); }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_line_includes_node() {
        let e = bugs_err!(InvalidParameter, "ConjugateNormal", node: "mu", "precision must be positive");
        assert_eq!(
            e.to_string(),
            "ConjugateNormal: precision must be positive [at node mu]"
        );
        assert_eq!(e.node(), Some("mu"));
    }

    #[test]
    fn no_sampler_names_node() {
        let e = bugs_err!(NoSampler, "theta");
        assert_eq!(
            e.to_string(),
            "sampler factory pipeline: no factory claimed node [at node theta]"
        );
    }

    #[test]
    fn context_chains_display() {
        let inner = bugs_err!(Logic, "GraphView", "closure is not acyclic");
        let wrapped = inner.with_context("compiling model");
        assert!(wrapped.to_string().contains("Caused by: GraphView"));
    }
}

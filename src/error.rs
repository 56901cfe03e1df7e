//! Error types for the phasor circuit solver.
//!
//! This module provides a unified error type [`PhasorError`] that covers
//! netlist parsing, circuit validation, and solving. Every failure is
//! returned as a value so callers can degrade gracefully (for example by
//! showing `--` placeholders) instead of aborting.

use thiserror::Error;

/// Result type alias using [`PhasorError`].
pub type Result<T> = std::result::Result<T, PhasorError>;

/// Broad classification of a [`PhasorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The circuit description references things that do not exist or is
    /// structurally invalid. Detected before any matrix work.
    MalformedCircuit,
    /// An element value (or the drive frequency) is outside its valid range.
    DegenerateComponent,
    /// The MNA system has no unique solution or produced non-finite values.
    SingularSystem,
    /// The netlist text could not be parsed.
    Parse,
    /// Reading input failed.
    Io,
}

/// Unified error type for all phasor operations.
#[derive(Error, Debug)]
pub enum PhasorError {
    // ============ DSL Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid element definition
    #[error("Invalid element '{name}' at line {line}: {message}")]
    InvalidElement {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown element type
    #[error("Unknown element type '{element_type}' at line {line}")]
    UnknownElementType { element_type: String, line: usize },

    // ============ Malformed Circuit Errors ============
    /// A wire or reference designation names an element that does not exist
    #[error("Element '{element}' not found in circuit")]
    UnknownElement { element: String },

    /// A wire or reference designation names a terminal the element does not have
    #[error("Element '{element}' has no terminal '{terminal}'")]
    UnknownTerminal { element: String, terminal: String },

    /// An element declares the same terminal name twice
    #[error("Element '{element}' declares terminal '{terminal}' twice")]
    DuplicateTerminal { element: String, terminal: String },

    /// Duplicate element id
    #[error("Duplicate element id '{id}'")]
    DuplicateElement { id: String },

    /// Nothing to solve
    #[error("Circuit has no elements")]
    EmptyCircuit,

    // ============ Degenerate Values ============
    /// Element value outside its valid range
    #[error("Degenerate component '{element}': {message}")]
    DegenerateComponent { element: String, message: String },

    /// Shared drive frequency is unusable
    #[error("Invalid drive frequency {frequency_hz} Hz: must be finite and non-negative")]
    InvalidFrequency { frequency_hz: f64 },

    // ============ Solver Errors ============
    /// Elimination hit a vanishing pivot or a non-finite value
    #[error("This circuit configuration cannot be solved (step {step}): {message}")]
    SingularSystem { step: usize, message: String },

    // ============ I/O Errors ============
    /// Error reading circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PhasorError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid element error
    pub fn invalid_element(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidElement {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a degenerate component error
    pub fn degenerate(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DegenerateComponent {
            element: element.into(),
            message: message.into(),
        }
    }

    /// Create a singular system error
    pub fn singular(step: usize, message: impl Into<String>) -> Self {
        Self::SingularSystem {
            step,
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LexerError { .. }
            | Self::ParseError { .. }
            | Self::InvalidElement { .. }
            | Self::UnknownElementType { .. } => ErrorKind::Parse,
            Self::UnknownElement { .. }
            | Self::UnknownTerminal { .. }
            | Self::DuplicateTerminal { .. }
            | Self::DuplicateElement { .. }
            | Self::EmptyCircuit => ErrorKind::MalformedCircuit,
            Self::DegenerateComponent { .. } | Self::InvalidFrequency { .. } => {
                ErrorKind::DegenerateComponent
            }
            Self::SingularSystem { .. } => ErrorKind::SingularSystem,
            Self::FileReadError { .. } => ErrorKind::Io,
        }
    }
}

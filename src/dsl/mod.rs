//! Text netlist format.
//!
//! A line-oriented, human-editable description of a circuit. Elements are
//! declared one per line; connectivity is given separately with `.wire`
//! lines naming `element:terminal` pairs.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | directive | element | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".freq" value
//!             | ".ground" terminal_ref
//!             | ".wire" terminal_ref terminal_ref { terminal_ref }
//! element     = (prefix_name | keyword name) [value] { param } [terminals]
//!
//! prefix_name = ('R' | 'C' | 'L' | 'V' | 'I' | 'A' | 'M') { ident_char }
//! keyword     = "AMMETER" | "VOLTMETER"
//! param       = identifier '=' value
//! terminals   = '(' name name ')'
//! terminal_ref = identifier ':' name
//!
//! value       = number [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Element Types
//!
//! | Type | Description | Syntax |
//! |------|-------------|--------|
//! | R | Resistor | `R<name> <ohms>` |
//! | C | Capacitor | `C<name> <farads>` |
//! | L | Inductor | `L<name> <henries>` |
//! | V | Voltage Source | `V<name> <rms> [phase=<deg>] [freq=<hz>]` |
//! | I | Current Source | `I<name> <rms> [phase=<deg>] [freq=<hz>]` |
//! | A | Ammeter | `A<name>` or `AMMETER <name>` |
//! | M | Voltmeter | `M<name>` or `VOLTMETER <name>` |
//!
//! Terminals are named `a` and `b` unless overridden with `(x y)`.
//!
//! # Example
//!
//! ```text
//! # RC low-pass
//! .freq 1k
//! V1 1
//! R1 1k
//! C1 100n (top bottom)
//! .wire V1:a R1:a
//! .wire R1:b C1:top
//! .wire C1:bottom V1:b
//! .ground V1:b
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<CircuitAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<CircuitAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::PhasorError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{validate_circuit, Circuit};
    use crate::solver::AcSolver;
    use approx::assert_relative_eq;

    const DIVIDER: &str = "\
# two equal resistors across 12 V
.freq 50
V1 12
R1 10
R2 10
.wire V1:a R1:a
.wire R1:b R2:a
.wire R2:b V1:b
.ground V1:b
";

    #[test]
    fn test_parse_and_solve_divider() {
        let ast = parse(DIVIDER).unwrap();
        let circuit = Circuit::from_ast(ast).unwrap();
        validate_circuit(&circuit).unwrap();

        let result = AcSolver::new().solve(&circuit).unwrap();
        let i = result.current("R1").unwrap();
        assert_relative_eq!(i.re, 0.6, epsilon = 1e-9);
        assert_relative_eq!(i.im, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.voltage_across("R2").unwrap().re, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_frequency() {
        let circuit = Circuit::from_ast(parse("R1 1").unwrap()).unwrap();
        assert_relative_eq!(circuit.frequency_hz, crate::DEFAULT_FREQUENCY_HZ);
    }
}

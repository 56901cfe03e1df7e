//! Parser for the netlist DSL.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::circuit::TerminalRef;
use crate::error::{PhasorError, Result};

/// Parser for netlist DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<CircuitAst> {
        let mut ast = CircuitAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let element = self.parse_element()?;
                    ast.elements.push(element);
                }
                _ => {
                    return Err(PhasorError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        log::debug!(
            "parsed {} elements and {} wires",
            ast.elements.len(),
            ast.wires.len()
        );
        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(PhasorError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(PhasorError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    /// A name that may also be purely numeric, e.g. terminal `1`.
    fn expect_name(&mut self) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                Ok(text)
            }
            _ => Err(PhasorError::parse(
                self.current.line,
                format!("expected a name, got {:?}", self.current.kind),
            )),
        }
    }

    fn expect_number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        parse_value(&tok.text)
            .ok_or_else(|| PhasorError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    /// `element:terminal`
    fn parse_terminal_ref(&mut self) -> Result<TerminalRef> {
        let element = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Colon)?;
        let terminal = self.expect_name()?;
        Ok(TerminalRef::new(element, terminal))
    }

    fn parse_directive(&mut self, ast: &mut CircuitAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".freq" | ".frequency" => {
                ast.frequency_hz = Some(self.expect_number()?);
            }
            ".ground" | ".gnd" => {
                ast.reference = Some(self.parse_terminal_ref()?);
            }
            ".wire" => {
                let mut terminals = Vec::new();
                while !self.at_line_end() {
                    terminals.push(self.parse_terminal_ref()?);
                }
                if terminals.len() < 2 {
                    return Err(PhasorError::parse(
                        line,
                        ".wire needs at least two terminals",
                    ));
                }
                ast.wires.push(WireDef { terminals, line });
            }
            _ => {
                return Err(PhasorError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_element(&mut self) -> Result<ElementDef> {
        let first_token = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        // Keywords first so VOLTMETER is not read as a voltage source
        let (element_type, name) = if let Some(et) = ElementType::from_keyword(&first_token) {
            (et, self.expect(TokenKind::Identifier)?.text)
        } else {
            let first_char = first_token.chars().next().unwrap_or('?');
            let et = ElementType::from_prefix(first_char).ok_or_else(|| {
                PhasorError::UnknownElementType {
                    element_type: first_token.clone(),
                    line,
                }
            })?;
            (et, first_token)
        };

        let mut value = None;
        let mut params = HashMap::new();
        let mut terminals = None;

        while !self.at_line_end() {
            match self.current.kind {
                TokenKind::Number => {
                    let text = self.current.text.clone();
                    self.advance()?;
                    let v = parse_value(&text).ok_or_else(|| {
                        PhasorError::invalid_element(&name, line, format!("invalid number: {}", text))
                    })?;
                    if value.replace(v).is_some() {
                        return Err(PhasorError::invalid_element(
                            &name,
                            line,
                            format!("unexpected extra value: {}", text),
                        ));
                    }
                }
                TokenKind::Identifier => {
                    let key = self.current.text.to_lowercase();
                    self.advance()?;
                    self.expect(TokenKind::Equals)?;
                    if !element_type.accepts_param(&key) {
                        return Err(PhasorError::invalid_element(
                            &name,
                            line,
                            format!("unknown parameter '{}'", key),
                        ));
                    }
                    params.insert(key, self.expect_number()?);
                }
                TokenKind::OpenParen => {
                    self.advance()?;
                    let a = self.expect_name()?;
                    let b = self.expect_name()?;
                    self.expect(TokenKind::CloseParen)?;
                    terminals = Some([a, b]);
                }
                _ => {
                    return Err(PhasorError::invalid_element(
                        &name,
                        line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }
        }

        if !element_type.takes_value() && value.is_some() {
            return Err(PhasorError::invalid_element(&name, line, "meters take no value"));
        }

        Ok(ElementDef {
            element_type,
            name,
            value,
            params,
            terminals,
            line,
        })
    }
}

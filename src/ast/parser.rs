use crate::ast::{ASTNode, Context, Error, Lexer, Operator, Result, Token, TokenKind, REGEX_FUNCTION};
use log::debug;

/// Recursive-descent parser with a single token of lookahead.
///
/// Grammar, loosest binding first. Every level is left-associative, `**`
/// included, so `2 ** 3 ** 2` is `(2 ** 3) ** 2`:
///
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := power (('*' | '/') power)*
/// power  := factor ('**' factor)*
/// factor := NUMBER | STRING | IDENTIFIER | Regex '(' expr (',' expr)* ')' | '(' expr ')'
/// ```
///
/// Identifiers are looked up in the context while parsing and replaced by a
/// [`ASTNode::NumberLiteral`] holding the raw context value. There is no
/// unary minus.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    context: &'a Context,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>, context: &'a Context) -> Result<Self> {
        let current_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            current_token,
            context,
        })
    }

    pub fn parse_expression(input: &str, context: &Context) -> Result<ASTNode> {
        debug!("Parsing expression: {}", input);
        Parser::new(Lexer::new(input), context)?.parse()
    }

    /// Parses one expression. Tokens after a complete expression are left
    /// unread, so `3 5` parses as `3`.
    pub fn parse(mut self) -> Result<ASTNode> {
        self.expr()
    }

    /// Consumes the current token if it has the expected kind.
    fn eat(&mut self, expected: TokenKind) -> Result<Token> {
        let found = self.current_token.kind();
        if found != expected {
            return Err(Error::SyntaxError {
                found,
                expected: Some(expected),
            });
        }
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current_token, next))
    }

    fn expr(&mut self) -> Result<ASTNode> {
        self.binary(&[TokenKind::Plus, TokenKind::Minus], Self::term)
    }

    fn term(&mut self) -> Result<ASTNode> {
        self.binary(&[TokenKind::Star, TokenKind::Slash], Self::power)
    }

    fn power(&mut self) -> Result<ASTNode> {
        self.binary(&[TokenKind::Power], Self::factor)
    }

    /// `operand (op operand)*`, folded to the left.
    fn binary(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Result<ASTNode>,
    ) -> Result<ASTNode> {
        let mut node = operand(self)?;

        while operators.contains(&self.current_token.kind()) {
            let kind = self.current_token.kind();
            self.eat(kind)?;
            let operator = Operator::try_from(kind)?;
            let right = operand(self)?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn factor(&mut self) -> Result<ASTNode> {
        let node = match &self.current_token {
            Token::Number(value) => ASTNode::NumberLiteral(value.clone()),
            Token::String(value) => ASTNode::StringLiteral(value.clone()),
            Token::Identifier(name) => {
                let value = self
                    .context
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::UndefinedVariable(name.clone()))?;
                ASTNode::NumberLiteral(value)
            }
            Token::Regex => return self.function_call(),
            Token::LParen => {
                self.eat(TokenKind::LParen)?;
                let node = self.expr()?;
                self.eat(TokenKind::RParen)?;
                return Ok(node);
            }
            token => {
                return Err(Error::SyntaxError {
                    found: token.kind(),
                    expected: None,
                })
            }
        };

        self.eat(self.current_token.kind())?;
        Ok(node)
    }

    fn function_call(&mut self) -> Result<ASTNode> {
        self.eat(TokenKind::Regex)?;
        self.eat(TokenKind::LParen)?;

        let mut args = vec![self.expr()?];
        while self.current_token.kind() == TokenKind::Comma {
            self.eat(TokenKind::Comma)?;
            args.push(self.expr()?);
        }
        self.eat(TokenKind::RParen)?;

        Ok(ASTNode::FunctionCall {
            name: REGEX_FUNCTION.to_string(),
            args,
        })
    }
}

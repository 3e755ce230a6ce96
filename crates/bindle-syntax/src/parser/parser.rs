//! Recursive descent parser.
//!
//! Statements each get a dedicated method; binary expressions run through
//! one precedence-climbing loop driven by a binding-power table. Automatic
//! semicolon insertion applies the usual three outs: an explicit `;`, a
//! closing `}` or end of input, or a line terminator before the token that
//! would otherwise be a syntax error.

use crate::Error;
use crate::ast::*;
use crate::lexer::{Scanner, Token, TokenKind};

/// Parser over the token stream of a [`Scanner`].
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token,
    /// Blocks the `in` operator while a for-statement header's initializer
    /// is parsed, so `for (k in obj)` reaches the for-in check instead of
    /// consuming `k in obj` as a comparison.
    no_in: bool,
}

impl<'a> Parser<'a> {
    /// Creates a parser primed with the first token of `source`.
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Scanner::new(source);
        let current = scanner.next_token();
        Self {
            scanner,
            current,
            no_in: false,
        }
    }

    /// Parses the whole source as a script.
    pub fn parse_program(&mut self) -> Result<Program, Error> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.parse_statement()?);
        }

        Ok(Program { body })
    }

    /// Parses one statement.
    pub fn parse_statement(&mut self) -> Result<Statement, Error> {
        match &self.current.kind {
            TokenKind::LeftBrace => self.parse_block_statement(),
            TokenKind::Var | TokenKind::Let | TokenKind::Const => self.parse_variable_declaration(),
            TokenKind::Function => self.parse_function_declaration(false),
            TokenKind::Async if self.scanner.peek_token().kind == TokenKind::Function => {
                self.advance(); // the 'async'
                self.parse_function_declaration(true)
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Break => self.parse_break_statement(),
            TokenKind::Continue => self.parse_continue_statement(),
            TokenKind::With => self.parse_with_statement(),
            TokenKind::Debugger => {
                self.advance();
                self.expect_semicolon()?;
                Ok(Statement::Debugger)
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(Statement::Empty)
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the '{'
        Ok(Statement::Block(self.parse_block_body()?))
    }

    fn parse_variable_declaration(&mut self) -> Result<Statement, Error> {
        let declaration = self.parse_variable_declaration_no_semi()?;
        self.expect_semicolon()?;
        Ok(Statement::VariableDeclaration(declaration))
    }

    fn parse_variable_declaration_no_semi(&mut self) -> Result<VariableDeclaration, Error> {
        let kind = match &self.current.kind {
            TokenKind::Var => VariableKind::Var,
            TokenKind::Let => VariableKind::Let,
            TokenKind::Const => VariableKind::Const,
            _ => return Err(Error::SyntaxError("Expected 'var', 'let', or 'const'".into())),
        };
        self.advance();

        let mut declarations = Vec::new();
        loop {
            let id = self.expect_identifier()?;
            let init = if self.eat(&TokenKind::Equal) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarations.push(VariableDeclarator { id, init });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(VariableDeclaration { kind, declarations })
    }

    fn parse_function_declaration(&mut self, is_async: bool) -> Result<Statement, Error> {
        self.advance(); // the 'function'
        let id = self.expect_identifier()?;
        let params = self.parse_parameter_list()?;
        let body = self.parse_function_body()?;

        Ok(Statement::FunctionDeclaration(FunctionDeclaration {
            id,
            params,
            body,
            is_async,
        }))
    }

    fn parse_if_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'if'
        self.expect(&TokenKind::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If(IfStatement {
            test,
            consequent,
            alternate,
        }))
    }

    fn parse_while_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'while'
        self.expect(&TokenKind::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Statement::While(WhileStatement { test, body }))
    }

    fn parse_do_while_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'do'
        let body = Box::new(self.parse_statement()?);
        self.expect(&TokenKind::While)?;
        self.expect(&TokenKind::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        // The closing semicolon is optional after do-while.
        self.eat(&TokenKind::Semicolon);

        Ok(Statement::DoWhile(DoWhileStatement { body, test }))
    }

    fn parse_for_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'for'
        self.expect(&TokenKind::LeftParen)?;

        if self.eat(&TokenKind::Semicolon) {
            return self.finish_for_loop(None);
        }

        if matches!(
            self.current.kind,
            TokenKind::Var | TokenKind::Let | TokenKind::Const
        ) {
            let decl = self.parse_variable_declaration_no_semi()?;

            if self.eat(&TokenKind::In) {
                return self.finish_for_in(ForInLeft::Declaration(Box::new(decl)));
            }
            if self.check_identifier("of") {
                self.advance();
                return self.finish_for_of(ForInLeft::Declaration(Box::new(decl)));
            }

            self.expect(&TokenKind::Semicolon)?;
            return self.finish_for_loop(Some(ForInit::Declaration(Box::new(decl))));
        }

        // Expression initializer. `in` must not be eaten as a comparison
        // here, or `for (k in obj)` would never see its own `in`.
        self.no_in = true;
        let parsed = self.parse_expression();
        self.no_in = false;
        let expr = parsed?;

        if self.eat(&TokenKind::In) {
            return self.finish_for_in(ForInLeft::Expression(expr));
        }
        if self.check_identifier("of") {
            self.advance();
            return self.finish_for_of(ForInLeft::Expression(expr));
        }

        self.expect(&TokenKind::Semicolon)?;
        self.finish_for_loop(Some(ForInit::Expression(expr)))
    }

    /// The rest of a for-in statement, from just past the `in`.
    fn finish_for_in(&mut self, left: ForInLeft) -> Result<Statement, Error> {
        let right = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::ForIn(ForInStatement { left, right, body }))
    }

    /// The rest of a for-of statement, from just past the `of`.
    fn finish_for_of(&mut self, left: ForInLeft) -> Result<Statement, Error> {
        let right = self.parse_assignment()?;
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::ForOf(ForOfStatement { left, right, body }))
    }

    /// The test/update clauses and body of a three-clause for loop, from
    /// just past the first `;`.
    fn finish_for_loop(&mut self, init: Option<ForInit>) -> Result<Statement, Error> {
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semicolon)?;

        let update = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::RightParen)?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::For(ForStatement {
            init,
            test,
            update,
            body,
        }))
    }

    fn parse_switch_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'switch'
        self.expect(&TokenKind::LeftParen)?;
        let discriminant = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        self.expect(&TokenKind::LeftBrace)?;

        let mut cases = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            let test = if self.eat(&TokenKind::Case) {
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::Colon)?;
                Some(expr)
            } else if self.eat(&TokenKind::Default) {
                self.expect(&TokenKind::Colon)?;
                None
            } else {
                return Err(Error::SyntaxError(
                    "Expected 'case' or 'default' in switch body".into(),
                ));
            };

            let mut consequent = Vec::new();
            loop {
                if self.check(&TokenKind::Case)
                    || self.check(&TokenKind::Default)
                    || self.check(&TokenKind::RightBrace)
                    || self.is_at_end()
                {
                    break;
                }
                consequent.push(self.parse_statement()?);
            }

            cases.push(SwitchCase { test, consequent });
        }

        self.expect(&TokenKind::RightBrace)?;

        Ok(Statement::Switch(SwitchStatement {
            discriminant,
            cases,
        }))
    }

    fn parse_return_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'return'

        // Restricted production: a line terminator after `return` ends the
        // statement right there, with no argument.
        let argument = if self.current.newline_before
            || self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RightBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_semicolon()?;

        Ok(Statement::Return(ReturnStatement { argument }))
    }

    fn parse_throw_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'throw'
        let argument = self.parse_expression()?;
        self.expect_semicolon()?;
        Ok(Statement::Throw(ThrowStatement { argument }))
    }

    fn parse_try_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'try'
        self.expect(&TokenKind::LeftBrace)?;
        let block = self.parse_block_body()?;

        let handler = if self.eat(&TokenKind::Catch) {
            let param = if self.eat(&TokenKind::LeftParen) {
                let id = self.expect_identifier()?;
                self.expect(&TokenKind::RightParen)?;
                Some(id)
            } else {
                None
            };
            self.expect(&TokenKind::LeftBrace)?;
            Some(CatchClause {
                param,
                body: self.parse_block_body()?,
            })
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally) {
            self.expect(&TokenKind::LeftBrace)?;
            Some(self.parse_block_body()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(Error::SyntaxError(
                "Missing catch or finally after try".into(),
            ));
        }

        Ok(Statement::Try(TryStatement {
            block,
            handler,
            finalizer,
        }))
    }

    fn parse_break_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'break'
        let label = self.eat_same_line_label();
        self.expect_semicolon()?;
        Ok(match label {
            Some(label) => Statement::BreakLabel(label),
            None => Statement::Break,
        })
    }

    fn parse_continue_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'continue'
        let label = self.eat_same_line_label();
        self.expect_semicolon()?;
        Ok(match label {
            Some(label) => Statement::ContinueLabel(label),
            None => Statement::Continue,
        })
    }

    fn parse_with_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // the 'with'
        self.expect(&TokenKind::LeftParen)?;
        let object = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::With(WithStatement { object, body }))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, Error> {
        // `name:` opens a labeled statement; anything else here is an
        // expression statement.
        if let TokenKind::Identifier(name) = &self.current.kind {
            if self.scanner.peek_token().kind == TokenKind::Colon {
                let label = Identifier { name: name.clone() };
                self.advance(); // the label
                self.advance(); // the ':'
                let body = Box::new(self.parse_statement()?);
                return Ok(Statement::Labeled(LabeledStatement { label, body }));
            }
        }

        let expression = self.parse_expression()?;
        self.expect_semicolon()?;
        Ok(Statement::Expression(ExpressionStatement { expression }))
    }

    /// Parses a full expression, comma operator included.
    pub fn parse_expression(&mut self) -> Result<Expression, Error> {
        let first = self.parse_assignment()?;

        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut expressions = vec![first];
        while self.eat(&TokenKind::Comma) {
            expressions.push(self.parse_assignment()?);
        }

        Ok(Expression::Sequence(SequenceExpression { expressions }))
    }

    fn parse_assignment(&mut self) -> Result<Expression, Error> {
        let expr = self.parse_conditional()?;

        let Some(operator) = assignment_operator(&self.current.kind) else {
            return Ok(expr);
        };
        self.advance();
        let right = self.parse_assignment()?;

        Ok(Expression::Assignment(AssignmentExpression {
            operator,
            left: Box::new(expr),
            right: Box::new(right),
        }))
    }

    fn parse_conditional(&mut self) -> Result<Expression, Error> {
        let test = self.parse_binary(0)?;

        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment()?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;

        Ok(Expression::Conditional(ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    /// Precedence climbing over the binary operators. Operators at the
    /// same binding power group to the left.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression, Error> {
        let mut left = self.parse_exponent()?;

        while let Some((operator, precedence)) = binary_precedence(&self.current.kind, self.no_in) {
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let right = self.parse_binary(precedence + 1)?;
            left = Expression::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_exponent(&mut self) -> Result<Expression, Error> {
        let left = self.parse_unary()?;

        // `**` is right-associative: a ** b ** c is a ** (b ** c).
        if self.eat(&TokenKind::StarStar) {
            let right = self.parse_exponent()?;
            return Ok(Expression::Binary(BinaryExpression {
                operator: BinaryOperator::Exponent,
                left: Box::new(left),
                right: Box::new(right),
            }));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, Error> {
        if self.check(&TokenKind::PlusPlus) || self.check(&TokenKind::MinusMinus) {
            let operator = if self.check(&TokenKind::PlusPlus) {
                UpdateOperator::Increment
            } else {
                UpdateOperator::Decrement
            };
            self.advance();
            let argument = Box::new(self.parse_unary()?);
            return Ok(Expression::Update(UpdateExpression {
                operator,
                argument,
                prefix: true,
            }));
        }

        if self.eat(&TokenKind::Await) {
            let argument = Box::new(self.parse_unary()?);
            return Ok(Expression::Await(AwaitExpression { argument }));
        }

        let operator = match &self.current.kind {
            TokenKind::Bang => UnaryOperator::LogicalNot,
            TokenKind::Tilde => UnaryOperator::BitwiseNot,
            TokenKind::Plus => UnaryOperator::Plus,
            TokenKind::Minus => UnaryOperator::Minus,
            TokenKind::Typeof => UnaryOperator::Typeof,
            TokenKind::Void => UnaryOperator::Void,
            TokenKind::Delete => UnaryOperator::Delete,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let argument = Box::new(self.parse_unary()?);

        Ok(Expression::Unary(UnaryExpression { operator, argument }))
    }

    /// Calls, member access, and the postfix update operators, all binding
    /// at the same tightness and stacking left to right.
    fn parse_postfix(&mut self) -> Result<Expression, Error> {
        let mut expr = self.parse_primary()?;

        loop {
            expr = if self.eat(&TokenKind::LeftParen) {
                let arguments = self.parse_arguments()?;
                self.expect(&TokenKind::RightParen)?;
                Expression::Call(CallExpression {
                    callee: Box::new(expr),
                    arguments,
                })
            } else if self.eat(&TokenKind::Dot) {
                let property = self.expect_property_name()?;
                Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    property: MemberProperty::Identifier(property),
                    computed: false,
                })
            } else if self.eat(&TokenKind::LeftBracket) {
                let index = self.parse_expression()?;
                self.expect(&TokenKind::RightBracket)?;
                Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    property: MemberProperty::Expression(Box::new(index)),
                    computed: true,
                })
            } else if !self.current.newline_before && self.check(&TokenKind::PlusPlus) {
                self.advance();
                Expression::Update(UpdateExpression {
                    operator: UpdateOperator::Increment,
                    argument: Box::new(expr),
                    prefix: false,
                })
            } else if !self.current.newline_before && self.check(&TokenKind::MinusMinus) {
                self.advance();
                Expression::Update(UpdateExpression {
                    operator: UpdateOperator::Decrement,
                    argument: Box::new(expr),
                    prefix: false,
                })
            } else {
                return Ok(expr);
            };
        }
    }

    fn parse_primary(&mut self) -> Result<Expression, Error> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let id = Identifier { name: name.clone() };
                self.advance();
                // `name =>` begins a single-parameter arrow function.
                if self.check(&TokenKind::Arrow) {
                    return self.parse_arrow_function_body(vec![id], false);
                }
                Ok(Expression::Identifier(id))
            }
            TokenKind::Number(n) => {
                let literal = Literal::Number(*n);
                self.advance();
                Ok(Expression::Literal(literal))
            }
            TokenKind::String(s) => {
                let literal = Literal::String(s.clone());
                self.advance();
                Ok(Expression::Literal(literal))
            }
            TokenKind::Template(raw) => {
                let literal = Literal::Template(raw.clone());
                self.advance();
                Ok(Expression::Literal(literal))
            }
            TokenKind::RegExp { pattern, flags } => {
                let literal = Literal::RegExp {
                    pattern: pattern.clone(),
                    flags: flags.clone(),
                };
                self.advance();
                Ok(Expression::Literal(literal))
            }
            TokenKind::True | TokenKind::False => {
                let value = matches!(self.current.kind, TokenKind::True);
                self.advance();
                Ok(Expression::Literal(Literal::Boolean(value)))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expression::Literal(Literal::Null))
            }
            TokenKind::This => {
                self.advance();
                Ok(Expression::This)
            }
            TokenKind::Function => self.parse_function_expression(false),
            TokenKind::Async => self.parse_async_expression(),
            TokenKind::New => self.parse_new_expression(),
            TokenKind::LeftParen => self.parse_parenthesized_or_arrow(),
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            _ => Err(Error::SyntaxError(format!(
                "Unexpected token: {:?}",
                self.current.kind
            ))),
        }
    }

    fn parse_function_expression(&mut self, is_async: bool) -> Result<Expression, Error> {
        self.advance(); // the 'function'

        let id = match &self.current.kind {
            TokenKind::Identifier(name) => {
                let id = Identifier { name: name.clone() };
                self.advance();
                Some(id)
            }
            _ => None,
        };

        let params = self.parse_parameter_list()?;
        let body = self.parse_function_body()?;

        Ok(Expression::Function(FunctionExpression {
            id,
            params,
            body,
            is_async,
        }))
    }

    /// The expression forms that begin with `async`: an async function
    /// expression, an async arrow, or a plain use of something actually
    /// named `async`.
    fn parse_async_expression(&mut self) -> Result<Expression, Error> {
        self.advance(); // the 'async'

        if self.check(&TokenKind::Function) {
            return self.parse_function_expression(true);
        }

        if let TokenKind::Identifier(name) = &self.current.kind {
            if self.scanner.peek_token().kind == TokenKind::Arrow {
                let param = Identifier { name: name.clone() };
                self.advance();
                return self.parse_arrow_function_body(vec![param], true);
            }
        }

        if self.check(&TokenKind::LeftParen) {
            let grouped = self.parse_parenthesized_or_arrow()?;
            return Ok(match grouped {
                Expression::Arrow(mut arrow) => {
                    arrow.is_async = true;
                    Expression::Arrow(arrow)
                }
                // No arrow followed, so this was a call of an identifier
                // that happens to be named 'async'.
                Expression::Sequence(seq) => Expression::Call(CallExpression {
                    callee: Box::new(async_identifier()),
                    arguments: seq.expressions,
                }),
                other => Expression::Call(CallExpression {
                    callee: Box::new(async_identifier()),
                    arguments: vec![other],
                }),
            });
        }

        Ok(async_identifier())
    }

    fn parse_parenthesized_or_arrow(&mut self) -> Result<Expression, Error> {
        self.advance(); // the '('

        // `()` has no expression reading; an arrow body must follow.
        if self.eat(&TokenKind::RightParen) {
            if !self.check(&TokenKind::Arrow) {
                return Err(Error::SyntaxError(
                    "Expected '=>' after arrow parameters".into(),
                ));
            }
            return self.parse_arrow_function_body(Vec::new(), false);
        }

        let mut expr = self.parse_assignment()?;

        if self.check(&TokenKind::Comma) {
            let mut expressions = vec![expr];
            while self.eat(&TokenKind::Comma) {
                expressions.push(self.parse_assignment()?);
            }
            expr = Expression::Sequence(SequenceExpression { expressions });
        }

        self.expect(&TokenKind::RightParen)?;

        // `(a, b) =>` retroactively turns the group into a parameter list.
        if self.check(&TokenKind::Arrow) {
            let params = arrow_params_from_expression(expr)?;
            return self.parse_arrow_function_body(params, false);
        }

        Ok(expr)
    }

    fn parse_arrow_function_body(
        &mut self,
        params: Vec<Identifier>,
        is_async: bool,
    ) -> Result<Expression, Error> {
        self.advance(); // the '=>'

        let body = if self.check(&TokenKind::LeftBrace) {
            ArrowBody::Block(self.parse_function_body()?)
        } else {
            ArrowBody::Expression(Box::new(self.parse_assignment()?))
        };

        Ok(Expression::Arrow(ArrowFunctionExpression {
            params,
            body,
            is_async,
        }))
    }

    fn parse_new_expression(&mut self) -> Result<Expression, Error> {
        self.advance(); // the 'new'

        // Only a member chain may follow `new`; a `(` already belongs to
        // the constructor arguments.
        let mut callee = self.parse_primary()?;
        loop {
            callee = if self.eat(&TokenKind::Dot) {
                let property = self.expect_property_name()?;
                Expression::Member(MemberExpression {
                    object: Box::new(callee),
                    property: MemberProperty::Identifier(property),
                    computed: false,
                })
            } else if self.eat(&TokenKind::LeftBracket) {
                let index = self.parse_expression()?;
                self.expect(&TokenKind::RightBracket)?;
                Expression::Member(MemberExpression {
                    object: Box::new(callee),
                    property: MemberProperty::Expression(Box::new(index)),
                    computed: true,
                })
            } else {
                break;
            };
        }

        // `new Date;` is legal, so the argument list is optional.
        let arguments = if self.eat(&TokenKind::LeftParen) {
            let args = self.parse_arguments()?;
            self.expect(&TokenKind::RightParen)?;
            args
        } else {
            Vec::new()
        };

        Ok(Expression::New(NewExpression {
            callee: Box::new(callee),
            arguments,
        }))
    }

    fn parse_array_literal(&mut self) -> Result<Expression, Error> {
        self.advance(); // the '['
        let mut elements = Vec::new();

        while !self.check(&TokenKind::RightBracket) && !self.is_at_end() {
            if self.check(&TokenKind::Comma) {
                // Elision: `[1, , 3]` leaves a hole.
                elements.push(None);
            } else {
                elements.push(Some(self.parse_assignment()?));
            }

            if !self.check(&TokenKind::RightBracket) {
                self.expect(&TokenKind::Comma)?;
            }
        }

        self.expect(&TokenKind::RightBracket)?;

        Ok(Expression::Array(ArrayExpression { elements }))
    }

    fn parse_object_literal(&mut self) -> Result<Expression, Error> {
        self.advance(); // the '{'
        let mut properties = Vec::new();

        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            properties.push(self.parse_object_property()?);

            if !self.check(&TokenKind::RightBrace) {
                self.expect(&TokenKind::Comma)?;
            }
        }

        self.expect(&TokenKind::RightBrace)?;

        Ok(Expression::Object(ObjectExpression { properties }))
    }

    fn parse_object_property(&mut self) -> Result<Property, Error> {
        // Accessor syntax `get x() {}` / `set x(v) {}` is accepted and
        // kept as an ordinary method property.
        if self.check_identifier("get") || self.check_identifier("set") {
            let next = self.scanner.peek_token().kind;
            if next != TokenKind::Colon
                && next != TokenKind::Comma
                && next != TokenKind::LeftParen
                && next != TokenKind::RightBrace
            {
                self.advance(); // the 'get' / 'set'
                let key = self.parse_property_key()?;
                let value = self.parse_method_function()?;
                return Ok(Property {
                    key,
                    value,
                    shorthand: false,
                });
            }
        }

        let key = self.parse_property_key()?;

        if self.eat(&TokenKind::Colon) {
            let value = self.parse_assignment()?;
            return Ok(Property {
                key,
                value,
                shorthand: false,
            });
        }

        // Method shorthand: key(params) { ... }
        if self.check(&TokenKind::LeftParen) {
            let value = self.parse_method_function()?;
            return Ok(Property {
                key,
                value,
                shorthand: false,
            });
        }

        // Shorthand entry: { a, b }
        if let PropertyKey::Identifier(id) = &key {
            let value = Expression::Identifier(id.clone());
            return Ok(Property {
                key,
                value,
                shorthand: true,
            });
        }

        Err(Error::SyntaxError(format!(
            "Expected ':' after property key, found {:?}",
            self.current.kind
        )))
    }

    fn parse_property_key(&mut self) -> Result<PropertyKey, Error> {
        match &self.current.kind {
            TokenKind::String(s) => {
                let key = PropertyKey::Literal(Literal::String(s.clone()));
                self.advance();
                Ok(key)
            }
            TokenKind::Number(n) => {
                let key = PropertyKey::Literal(Literal::Number(*n));
                self.advance();
                Ok(key)
            }
            _ => Ok(PropertyKey::Identifier(self.expect_property_name()?)),
        }
    }

    fn parse_method_function(&mut self) -> Result<Expression, Error> {
        let params = self.parse_parameter_list()?;
        let body = self.parse_function_body()?;

        Ok(Expression::Function(FunctionExpression {
            id: None,
            params,
            body,
            is_async: false,
        }))
    }

    /// Comma-separated call arguments. The caller owns both parentheses.
    fn parse_arguments(&mut self) -> Result<Vec<Expression>, Error> {
        let mut args = Vec::new();

        while !self.check(&TokenKind::RightParen) {
            args.push(self.parse_assignment()?);
            // A trailing comma before the close paren is fine.
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }

    /// A parenthesized list of plain identifier parameters.
    fn parse_parameter_list(&mut self) -> Result<Vec<Identifier>, Error> {
        self.expect(&TokenKind::LeftParen)?;

        let mut params = Vec::new();
        while !self.check(&TokenKind::RightParen) {
            params.push(self.expect_identifier()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(params)
    }

    /// A brace-delimited function body, both braces included.
    fn parse_function_body(&mut self) -> Result<Vec<Statement>, Error> {
        self.expect(&TokenKind::LeftBrace)?;
        let block = self.parse_block_body()?;
        Ok(block.body)
    }

    /// Statements up to and including a closing `}`. The opening brace
    /// must already be consumed.
    fn parse_block_body(&mut self) -> Result<BlockStatement, Error> {
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(BlockStatement { body })
    }

    // Token plumbing

    fn advance(&mut self) {
        self.current = self.scanner.next_token();
    }

    /// Compares token kinds by discriminant, ignoring any payload.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn check_identifier(&self, name: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(s) if s == name)
    }

    /// Consumes the current token when it matches.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    /// Optional label after `break`/`continue`. It only counts when it
    /// sits on the same line as the keyword; otherwise semicolon insertion
    /// has already ended the statement.
    fn eat_same_line_label(&mut self) -> Option<String> {
        if self.current.newline_before {
            return None;
        }
        if let TokenKind::Identifier(label) = &self.current.kind {
            let label = label.clone();
            self.advance();
            return Some(label);
        }
        None
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), Error> {
        if self.eat(kind) {
            return Ok(());
        }
        Err(Error::SyntaxError(format!(
            "Expected {:?}, found {:?}",
            kind, self.current.kind
        )))
    }

    /// Consumes a statement terminator. An explicit `;` is eaten;
    /// otherwise a closing brace, the end of input, or a line terminator
    /// before the current token ends the statement (automatic semicolon
    /// insertion).
    fn expect_semicolon(&mut self) -> Result<(), Error> {
        if self.eat(&TokenKind::Semicolon) {
            return Ok(());
        }

        if self.check(&TokenKind::RightBrace) || self.is_at_end() || self.current.newline_before {
            return Ok(());
        }

        Err(Error::SyntaxError(format!(
            "Expected ';', found {:?}",
            self.current.kind
        )))
    }

    fn expect_identifier(&mut self) -> Result<Identifier, Error> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let id = Identifier { name: name.clone() };
                self.advance();
                Ok(id)
            }
            other => Err(Error::SyntaxError(format!(
                "Expected identifier, found {:?}",
                other
            ))),
        }
    }

    /// Like [`expect_identifier`](Self::expect_identifier) but also
    /// accepts reserved words, which are legal as property names
    /// (`promise.catch`, `exports.default`).
    fn expect_property_name(&mut self) -> Result<Identifier, Error> {
        if let TokenKind::Identifier(name) = &self.current.kind {
            let id = Identifier { name: name.clone() };
            self.advance();
            return Ok(id);
        }

        let name = match &self.current.kind {
            TokenKind::True => Some("true"),
            TokenKind::False => Some("false"),
            TokenKind::Null => Some("null"),
            other => other.keyword_name(),
        };

        match name {
            Some(name) => {
                let id = Identifier {
                    name: name.to_string(),
                };
                self.advance();
                Ok(id)
            }
            None => Err(Error::SyntaxError(format!(
                "Expected property name, found {:?}",
                self.current.kind
            ))),
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }
}

/// Binding powers for the left-associative binary operators; higher binds
/// tighter. `**` is absent because it is right-associative and parsed on
/// its own.
fn binary_precedence(kind: &TokenKind, no_in: bool) -> Option<(BinaryOperator, u8)> {
    let entry = match kind {
        TokenKind::Star => (BinaryOperator::Multiply, 10),
        TokenKind::Slash => (BinaryOperator::Divide, 10),
        TokenKind::Percent => (BinaryOperator::Modulo, 10),
        TokenKind::Plus => (BinaryOperator::Add, 9),
        TokenKind::Minus => (BinaryOperator::Subtract, 9),
        TokenKind::LeftShift => (BinaryOperator::LeftShift, 8),
        TokenKind::RightShift => (BinaryOperator::RightShift, 8),
        TokenKind::UnsignedRightShift => (BinaryOperator::UnsignedRightShift, 8),
        TokenKind::LessThan => (BinaryOperator::LessThan, 7),
        TokenKind::LessThanEqual => (BinaryOperator::LessThanEqual, 7),
        TokenKind::GreaterThan => (BinaryOperator::GreaterThan, 7),
        TokenKind::GreaterThanEqual => (BinaryOperator::GreaterThanEqual, 7),
        TokenKind::Instanceof => (BinaryOperator::InstanceOf, 7),
        TokenKind::In if no_in => return None,
        TokenKind::In => (BinaryOperator::In, 7),
        TokenKind::EqualEqual => (BinaryOperator::Equal, 6),
        TokenKind::NotEqual => (BinaryOperator::NotEqual, 6),
        TokenKind::StrictEqual => (BinaryOperator::StrictEqual, 6),
        TokenKind::StrictNotEqual => (BinaryOperator::StrictNotEqual, 6),
        TokenKind::Ampersand => (BinaryOperator::BitwiseAnd, 5),
        TokenKind::Caret => (BinaryOperator::BitwiseXor, 4),
        TokenKind::Pipe => (BinaryOperator::BitwiseOr, 3),
        TokenKind::AmpersandAmpersand => (BinaryOperator::LogicalAnd, 2),
        TokenKind::PipePipe => (BinaryOperator::LogicalOr, 1),
        TokenKind::QuestionQuestion => (BinaryOperator::NullishCoalescing, 1),
        _ => return None,
    };
    Some(entry)
}

/// Maps a token to its assignment operator, compound forms included.
fn assignment_operator(kind: &TokenKind) -> Option<AssignmentOperator> {
    let operator = match kind {
        TokenKind::Equal => AssignmentOperator::Assign,
        TokenKind::PlusEqual => AssignmentOperator::AddAssign,
        TokenKind::MinusEqual => AssignmentOperator::SubtractAssign,
        TokenKind::StarEqual => AssignmentOperator::MultiplyAssign,
        TokenKind::SlashEqual => AssignmentOperator::DivideAssign,
        TokenKind::PercentEqual => AssignmentOperator::ModuloAssign,
        TokenKind::StarStarEqual => AssignmentOperator::ExponentAssign,
        TokenKind::LeftShiftEqual => AssignmentOperator::LeftShiftAssign,
        TokenKind::RightShiftEqual => AssignmentOperator::RightShiftAssign,
        TokenKind::UnsignedRightShiftEqual => AssignmentOperator::UnsignedRightShiftAssign,
        TokenKind::AmpersandEqual => AssignmentOperator::BitwiseAndAssign,
        TokenKind::PipeEqual => AssignmentOperator::BitwiseOrAssign,
        TokenKind::CaretEqual => AssignmentOperator::BitwiseXorAssign,
        TokenKind::AmpersandAmpersandEqual => AssignmentOperator::LogicalAndAssign,
        TokenKind::PipePipeEqual => AssignmentOperator::LogicalOrAssign,
        TokenKind::QuestionQuestionEqual => AssignmentOperator::NullishCoalescingAssign,
        _ => return None,
    };
    Some(operator)
}

/// Reinterprets a parenthesized expression as an arrow parameter list.
fn arrow_params_from_expression(expr: Expression) -> Result<Vec<Identifier>, Error> {
    match expr {
        Expression::Identifier(id) => Ok(vec![id]),
        Expression::Sequence(seq) => seq
            .expressions
            .into_iter()
            .map(|e| match e {
                Expression::Identifier(id) => Ok(id),
                _ => Err(malformed_arrow_params()),
            })
            .collect(),
        _ => Err(malformed_arrow_params()),
    }
}

fn malformed_arrow_params() -> Error {
    Error::SyntaxError("Malformed arrow function parameter list".into())
}

/// A bare reference to the identifier `async`.
fn async_identifier() -> Expression {
    Expression::Identifier(Identifier {
        name: "async".to_string(),
    })
}

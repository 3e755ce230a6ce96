//! Traversal of the syntax tree.
//!
//! A [`Visitor`] observes nodes; the `walk_*` functions drive the
//! traversal, descending into every child of every node in source order.
//! Implement only the hooks you care about.
//!
//! ## Usage
//!
//! ```rust
//! use bindle_syntax::ast::{Expression, Literal};
//! use bindle_syntax::parser::Parser;
//! use bindle_syntax::visit::{Visitor, walk_program};
//!
//! struct Strings(Vec<String>);
//!
//! impl Visitor for Strings {
//!     fn visit_expression(&mut self, expression: &Expression) {
//!         if let Expression::Literal(Literal::String(value)) = expression {
//!             self.0.push(value.clone());
//!         }
//!     }
//! }
//!
//! let program = Parser::new("log('a'); log('b');").parse_program().unwrap();
//! let mut strings = Strings(Vec::new());
//! walk_program(&mut strings, &program);
//! assert_eq!(strings.0, vec!["a", "b"]);
//! ```

use crate::ast::*;

/// An observer over syntax tree nodes.
///
/// Both hooks default to doing nothing. Hooks fire before the node's
/// children are walked.
pub trait Visitor {
    /// Called once per statement.
    fn visit_statement(&mut self, _statement: &Statement) {}

    /// Called once per expression.
    fn visit_expression(&mut self, _expression: &Expression) {}
}

/// Walks every statement of the program, in source order.
pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    for statement in &program.body {
        walk_statement(visitor, statement);
    }
}

/// Walks a statement and all of its children.
pub fn walk_statement<V: Visitor>(visitor: &mut V, statement: &Statement) {
    visitor.visit_statement(statement);

    match statement {
        Statement::VariableDeclaration(declaration) => {
            walk_variable_declaration(visitor, declaration);
        }
        Statement::FunctionDeclaration(declaration) => {
            for statement in &declaration.body {
                walk_statement(visitor, statement);
            }
        }
        Statement::Expression(expression) => {
            walk_expression(visitor, &expression.expression);
        }
        Statement::Block(block) => {
            for statement in &block.body {
                walk_statement(visitor, statement);
            }
        }
        Statement::If(if_statement) => {
            walk_expression(visitor, &if_statement.test);
            walk_statement(visitor, &if_statement.consequent);
            if let Some(alternate) = &if_statement.alternate {
                walk_statement(visitor, alternate);
            }
        }
        Statement::Switch(switch) => {
            walk_expression(visitor, &switch.discriminant);
            for case in &switch.cases {
                if let Some(test) = &case.test {
                    walk_expression(visitor, test);
                }
                for statement in &case.consequent {
                    walk_statement(visitor, statement);
                }
            }
        }
        Statement::While(while_statement) => {
            walk_expression(visitor, &while_statement.test);
            walk_statement(visitor, &while_statement.body);
        }
        Statement::DoWhile(do_while) => {
            walk_statement(visitor, &do_while.body);
            walk_expression(visitor, &do_while.test);
        }
        Statement::For(for_statement) => {
            match &for_statement.init {
                Some(ForInit::Declaration(declaration)) => {
                    walk_variable_declaration(visitor, declaration);
                }
                Some(ForInit::Expression(expression)) => {
                    walk_expression(visitor, expression);
                }
                None => {}
            }
            if let Some(test) = &for_statement.test {
                walk_expression(visitor, test);
            }
            if let Some(update) = &for_statement.update {
                walk_expression(visitor, update);
            }
            walk_statement(visitor, &for_statement.body);
        }
        Statement::ForIn(for_in) => {
            walk_for_in_left(visitor, &for_in.left);
            walk_expression(visitor, &for_in.right);
            walk_statement(visitor, &for_in.body);
        }
        Statement::ForOf(for_of) => {
            walk_for_in_left(visitor, &for_of.left);
            walk_expression(visitor, &for_of.right);
            walk_statement(visitor, &for_of.body);
        }
        Statement::Return(return_statement) => {
            if let Some(argument) = &return_statement.argument {
                walk_expression(visitor, argument);
            }
        }
        Statement::Throw(throw) => {
            walk_expression(visitor, &throw.argument);
        }
        Statement::Try(try_statement) => {
            for statement in &try_statement.block.body {
                walk_statement(visitor, statement);
            }
            if let Some(handler) = &try_statement.handler {
                for statement in &handler.body.body {
                    walk_statement(visitor, statement);
                }
            }
            if let Some(finalizer) = &try_statement.finalizer {
                for statement in &finalizer.body {
                    walk_statement(visitor, statement);
                }
            }
        }
        Statement::With(with) => {
            walk_expression(visitor, &with.object);
            walk_statement(visitor, &with.body);
        }
        Statement::Labeled(labeled) => {
            walk_statement(visitor, &labeled.body);
        }
        Statement::Break
        | Statement::BreakLabel(_)
        | Statement::Continue
        | Statement::ContinueLabel(_)
        | Statement::Debugger
        | Statement::Empty => {}
    }
}

fn walk_variable_declaration<V: Visitor>(visitor: &mut V, declaration: &VariableDeclaration) {
    for declarator in &declaration.declarations {
        if let Some(init) = &declarator.init {
            walk_expression(visitor, init);
        }
    }
}

fn walk_for_in_left<V: Visitor>(visitor: &mut V, left: &ForInLeft) {
    match left {
        ForInLeft::Declaration(declaration) => walk_variable_declaration(visitor, declaration),
        ForInLeft::Expression(expression) => walk_expression(visitor, expression),
    }
}

/// Walks an expression and all of its children.
pub fn walk_expression<V: Visitor>(visitor: &mut V, expression: &Expression) {
    visitor.visit_expression(expression);

    match expression {
        Expression::Array(array) => {
            for element in array.elements.iter().flatten() {
                walk_expression(visitor, element);
            }
        }
        Expression::Object(object) => {
            for property in &object.properties {
                if let PropertyKey::Computed(key) = &property.key {
                    walk_expression(visitor, key);
                }
                walk_expression(visitor, &property.value);
            }
        }
        Expression::Binary(binary) => {
            walk_expression(visitor, &binary.left);
            walk_expression(visitor, &binary.right);
        }
        Expression::Unary(unary) => {
            walk_expression(visitor, &unary.argument);
        }
        Expression::Assignment(assignment) => {
            walk_expression(visitor, &assignment.left);
            walk_expression(visitor, &assignment.right);
        }
        Expression::Call(call) => {
            walk_expression(visitor, &call.callee);
            for argument in &call.arguments {
                walk_expression(visitor, argument);
            }
        }
        Expression::Member(member) => {
            walk_expression(visitor, &member.object);
            if let MemberProperty::Expression(property) = &member.property {
                walk_expression(visitor, property);
            }
        }
        Expression::Conditional(conditional) => {
            walk_expression(visitor, &conditional.test);
            walk_expression(visitor, &conditional.consequent);
            walk_expression(visitor, &conditional.alternate);
        }
        Expression::Function(function) => {
            for statement in &function.body {
                walk_statement(visitor, statement);
            }
        }
        Expression::Arrow(arrow) => match &arrow.body {
            ArrowBody::Expression(body) => walk_expression(visitor, body),
            ArrowBody::Block(body) => {
                for statement in body {
                    walk_statement(visitor, statement);
                }
            }
        },
        Expression::New(new) => {
            walk_expression(visitor, &new.callee);
            for argument in &new.arguments {
                walk_expression(visitor, argument);
            }
        }
        Expression::Update(update) => {
            walk_expression(visitor, &update.argument);
        }
        Expression::Sequence(sequence) => {
            for expression in &sequence.expressions {
                walk_expression(visitor, expression);
            }
        }
        Expression::Await(await_expression) => {
            walk_expression(visitor, &await_expression.argument);
        }
        Expression::Literal(_) | Expression::Identifier(_) | Expression::This => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    struct Counter {
        statements: usize,
        expressions: usize,
    }

    impl Visitor for Counter {
        fn visit_statement(&mut self, _statement: &Statement) {
            self.statements += 1;
        }

        fn visit_expression(&mut self, _expression: &Expression) {
            self.expressions += 1;
        }
    }

    fn count(src: &str) -> Counter {
        let program = Parser::new(src).parse_program().unwrap();
        let mut counter = Counter {
            statements: 0,
            expressions: 0,
        };
        walk_program(&mut counter, &program);
        counter
    }

    struct CallNames(Vec<String>);

    impl Visitor for CallNames {
        fn visit_expression(&mut self, expression: &Expression) {
            if let Expression::Call(call) = expression {
                if let Expression::Identifier(id) = call.callee.as_ref() {
                    self.0.push(id.name.clone());
                }
            }
        }
    }

    fn call_names(src: &str) -> Vec<String> {
        let program = Parser::new(src).parse_program().unwrap();
        let mut names = CallNames(Vec::new());
        walk_program(&mut names, &program);
        names.0
    }

    #[test]
    fn test_counts_simple_program() {
        let counter = count("var x = 1; x = x + 2;");
        assert_eq!(counter.statements, 2);
        // 1, x = x + 2, x, x + 2, x, 2
        assert_eq!(counter.expressions, 6);
    }

    #[test]
    fn test_descends_into_function_bodies() {
        let names = call_names("function f() { setup(); } var g = function() { teardown(); };");
        assert_eq!(names, vec!["setup", "teardown"]);
    }

    #[test]
    fn test_descends_into_arrow_bodies() {
        let names = call_names("var f = () => inner(); var g = x => { nested(); };");
        assert_eq!(names, vec!["inner", "nested"]);
    }

    #[test]
    fn test_descends_into_every_call_position() {
        let names = call_names(
            "if (a()) { b(); } else { c(); }\n\
             for (d(); e(); f()) { g(); }\n\
             var o = { k: h() };\n\
             var arr = [i(), , j()];\n\
             try { k(); } catch (err) { l(); } finally { m(); }",
        );
        assert_eq!(
            names,
            vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m"]
        );
    }

    #[test]
    fn test_source_order_is_preserved() {
        let names = call_names("first(); second(third());");
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_walks_nested_member_calls() {
        // Only bare identifier callees are collected; the member call
        // still gets walked for its arguments
        let names = call_names("obj.method(inner());");
        assert_eq!(names, vec!["inner"]);
    }
}

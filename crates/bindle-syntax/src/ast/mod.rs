//! Syntax tree produced by the parser.
//!
//! The shapes follow the ESTree naming that most JavaScript tooling
//! shares, as plain owned Rust data: no spans, no parent links, no
//! interning. Consumers that need positions should work from the token
//! stream instead.

/// A parsed source file: the top-level statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order
    pub body: Vec<Statement>,
}

/// A name appearing in binding or reference position.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The identifier text
    pub name: String,
}

/// One statement.
///
/// `Break`/`Continue` carry their optional label as a separate variant
/// rather than an `Option`, which keeps the common unlabeled case a
/// bare unit in matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var`/`let`/`const` declaration list
    VariableDeclaration(VariableDeclaration),
    /// Named `function` declaration
    FunctionDeclaration(FunctionDeclaration),
    /// An expression in statement position
    Expression(ExpressionStatement),
    /// `{ ... }`
    Block(BlockStatement),
    /// `if`/`else`
    If(IfStatement),
    /// `switch`
    Switch(SwitchStatement),
    /// `while`
    While(WhileStatement),
    /// `do ... while`
    DoWhile(DoWhileStatement),
    /// Classic three-clause `for`
    For(ForStatement),
    /// `for (x in obj)`
    ForIn(ForInStatement),
    /// `for (x of iterable)`
    ForOf(ForOfStatement),
    /// `return`
    Return(ReturnStatement),
    /// `break`
    Break,
    /// `break label`
    BreakLabel(String),
    /// `continue`
    Continue,
    /// `continue label`
    ContinueLabel(String),
    /// `throw`
    Throw(ThrowStatement),
    /// `try`/`catch`/`finally`
    Try(TryStatement),
    /// `with (obj) body`
    With(WithStatement),
    /// `label: body`
    Labeled(LabeledStatement),
    /// `debugger`
    Debugger,
    /// A lone `;`
    Empty,
}

/// Which keyword introduced a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

/// `var a = 1, b;` — one keyword, one or more declarators.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Introducing keyword
    pub kind: VariableKind,
    /// Declarators, left to right
    pub declarations: Vec<VariableDeclarator>,
}

/// One `name` or `name = init` inside a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// Bound name
    pub id: Identifier,
    /// Initializer, absent for a bare binding
    pub init: Option<Expression>,
}

/// `function name(params) { body }` in statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// Declared name
    pub id: Identifier,
    /// Parameter names
    pub params: Vec<Identifier>,
    /// Statements of the function body
    pub body: Vec<Statement>,
    /// Declared with a leading `async`
    pub is_async: bool,
}

/// An expression evaluated for effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The wrapped expression
    pub expression: Expression,
}

/// A braced statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Statements inside the braces
    pub body: Vec<Statement>,
}

/// `if (test) consequent [else alternate]`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// Branch condition
    pub test: Expression,
    /// Taken when the test is truthy
    pub consequent: Box<Statement>,
    /// `else` branch, when present
    pub alternate: Option<Box<Statement>>,
}

/// `switch (discriminant) { cases }`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// Value the cases compare against
    pub discriminant: Expression,
    /// Case clauses in source order
    pub cases: Vec<SwitchCase>,
}

/// A `case test:` or `default:` clause and its statements.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Comparison value; `None` marks the `default` clause
    pub test: Option<Expression>,
    /// Statements run on a match (fallthrough applies)
    pub consequent: Vec<Statement>,
}

/// `while (test) body`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// Checked before every iteration
    pub test: Expression,
    /// Loop body
    pub body: Box<Statement>,
}

/// `do body while (test)` — body runs at least once.
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    /// Loop body
    pub body: Box<Statement>,
    /// Checked after every iteration
    pub test: Expression,
}

/// `for (init; test; update) body` with every clause optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// First clause, run once
    pub init: Option<ForInit>,
    /// Second clause, checked before each iteration
    pub test: Option<Expression>,
    /// Third clause, run after each iteration
    pub update: Option<Expression>,
    /// Loop body
    pub body: Box<Statement>,
}

/// The first clause of a classic `for`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// `for (var i = 0; ...)`
    Declaration(Box<VariableDeclaration>),
    /// `for (i = 0; ...)`
    Expression(Expression),
}

/// `for (left in right) body` — enumerates property keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    /// Binding or assignment target
    pub left: ForInLeft,
    /// Object whose keys are enumerated
    pub right: Expression,
    /// Loop body
    pub body: Box<Statement>,
}

/// `for (left of right) body` — drives an iterator.
#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    /// Binding or assignment target
    pub left: ForInLeft,
    /// The iterated value
    pub right: Expression,
    /// Loop body
    pub body: Box<Statement>,
}

/// Target position of a `for-in`/`for-of` head.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInLeft {
    /// `for (var k in ...)`
    Declaration(Box<VariableDeclaration>),
    /// `for (k in ...)` — an existing binding or member target
    Expression(Expression),
}

/// `return [argument]`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// Returned value; `None` returns `undefined`
    pub argument: Option<Expression>,
}

/// `throw argument`
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    /// Thrown value
    pub argument: Expression,
}

/// `try block [catch] [finally]` — at least one of handler/finalizer
/// is present in valid source.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    /// Protected block
    pub block: BlockStatement,
    /// `catch` clause, when present
    pub handler: Option<CatchClause>,
    /// `finally` block, when present
    pub finalizer: Option<BlockStatement>,
}

/// `catch (param) body`; the parameter may be omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Caught-value binding, absent for `catch { }`
    pub param: Option<Identifier>,
    /// Handler body
    pub body: BlockStatement,
}

/// `with (object) body`. Legacy scoping construct; still legal in
/// sloppy-mode sources, so it parses.
#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    /// Scope object
    pub object: Expression,
    /// Statement evaluated inside the extended scope
    pub body: Box<Statement>,
}

/// `label: body`
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    /// The label name
    pub label: Identifier,
    /// Labeled statement
    pub body: Box<Statement>,
}

/// One expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Number, string, regex, template, boolean, or `null`
    Literal(Literal),
    /// A name in reference position
    Identifier(Identifier),
    /// `this`
    This,
    /// `[a, b, , c]`
    Array(ArrayExpression),
    /// `{ a: 1, b }`
    Object(ObjectExpression),
    /// Prefix operator application
    Unary(UnaryExpression),
    /// Infix operator application
    Binary(BinaryExpression),
    /// `++`/`--` in either position
    Update(UpdateExpression),
    /// `=` and its compound forms
    Assignment(AssignmentExpression),
    /// `test ? a : b`
    Conditional(ConditionalExpression),
    /// Comma-joined expression list
    Sequence(SequenceExpression),
    /// `obj.name` or `obj[expr]`
    Member(MemberExpression),
    /// `callee(args)`
    Call(CallExpression),
    /// `new callee(args)`
    New(NewExpression),
    /// `function [name](params) { }` in expression position
    Function(FunctionExpression),
    /// `(params) => body`
    Arrow(ArrowFunctionExpression),
    /// `await argument`
    Await(AwaitExpression),
}

/// A literal value as written.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal, already folded to its `f64` value
    Number(f64),
    /// String literal with escapes applied
    String(String),
    /// `true` or `false`
    Boolean(bool),
    /// `null`
    Null,
    /// Template literal kept as the raw text between the backticks,
    /// interpolations and all; nothing downstream evaluates them
    Template(String),
    /// `/pattern/flags`
    RegExp {
        /// Text between the delimiting slashes
        pattern: String,
        /// Flag letters after the closing slash
        flags: String,
    },
}

/// An array literal. A `None` element is an elision (hole).
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    /// Elements in source order, holes preserved
    pub elements: Vec<Option<Expression>>,
}

/// An object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    /// Properties in source order
    pub properties: Vec<Property>,
}

/// One `key: value` entry of an object literal. Shorthand `{ a }` is
/// recorded with the identifier in both positions and the flag set.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name
    pub key: PropertyKey,
    /// Property value
    pub value: Expression,
    /// Written in shorthand form
    pub shorthand: bool,
}

/// How a property name was written.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    /// Bare word key
    Identifier(Identifier),
    /// `[expr]` key
    Computed(Box<Expression>),
    /// String or numeric key
    Literal(Literal),
}

/// `operator argument` — prefix application.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// Applied operator
    pub operator: UnaryOperator,
    /// Operand
    pub argument: Box<Expression>,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Negation `-`
    Minus,
    /// Coercing `+`
    Plus,
    /// Logical `!`
    LogicalNot,
    /// Bitwise `~`
    BitwiseNot,
    /// `typeof`
    Typeof,
    /// `void`
    Void,
    /// `delete`
    Delete,
}

/// `left operator right` — infix application.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// Applied operator
    pub operator: BinaryOperator,
    /// Left operand
    pub left: Box<Expression>,
    /// Right operand
    pub right: Box<Expression>,
}

/// Infix operators, logical forms included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    // Comparison
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    // Logical
    LogicalAnd,
    LogicalOr,
    NullishCoalescing,
    // Bitwise
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    // Relational keywords
    In,
    InstanceOf,
}

/// `++x`, `x++`, `--x`, `x--`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// Increment or decrement
    pub operator: UpdateOperator,
    /// The mutated target
    pub argument: Box<Expression>,
    /// True for the prefix position
    pub prefix: bool,
}

/// The two update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

/// `left operator right` where the operator stores into `left`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// Plain or compound assignment operator
    pub operator: AssignmentOperator,
    /// Store target
    pub left: Box<Expression>,
    /// Stored value
    pub right: Box<Expression>,
}

/// `=` and every compound assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    ExponentAssign,
    LeftShiftAssign,
    RightShiftAssign,
    UnsignedRightShiftAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    LogicalAndAssign,
    LogicalOrAssign,
    NullishCoalescingAssign,
}

/// `test ? consequent : alternate`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    /// Selector
    pub test: Box<Expression>,
    /// Result when truthy
    pub consequent: Box<Expression>,
    /// Result when falsy
    pub alternate: Box<Expression>,
}

/// `a, b, c` — evaluates left to right, yields the last value.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpression {
    /// At least two expressions
    pub expressions: Vec<Expression>,
}

/// `object.property` or `object[expr]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// Receiver
    pub object: Box<Expression>,
    /// Accessed property
    pub property: MemberProperty,
    /// Bracket form
    pub computed: bool,
}

/// The property side of a member access.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// Dot form; reserved words are allowed here
    Identifier(Identifier),
    /// Bracket form
    Expression(Box<Expression>),
}

/// `callee(arguments)`.
///
/// The static-require scan keys off this node: callee an unqualified
/// identifier plus a single string-literal argument.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// Called expression
    pub callee: Box<Expression>,
    /// Arguments in source order
    pub arguments: Vec<Expression>,
}

/// `new callee(arguments)`; the argument list may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    /// Constructed expression
    pub callee: Box<Expression>,
    /// Constructor arguments (empty for `new F`)
    pub arguments: Vec<Expression>,
}

/// `function [name](params) { body }` in expression position.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    /// Optional function name
    pub id: Option<Identifier>,
    /// Parameter names
    pub params: Vec<Identifier>,
    /// Body statements
    pub body: Vec<Statement>,
    /// Written with a leading `async`
    pub is_async: bool,
}

/// `(params) => body` or `param => body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunctionExpression {
    /// Parameter names
    pub params: Vec<Identifier>,
    /// Expression or block body
    pub body: ArrowBody,
    /// Written with a leading `async`
    pub is_async: bool,
}

/// The two arrow body forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    /// `x => x + 1` — implicit return
    Expression(Box<Expression>),
    /// `x => { ... }`
    Block(Vec<Statement>),
}

/// `await argument`.
#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpression {
    /// Awaited value
    pub argument: Box<Expression>,
}

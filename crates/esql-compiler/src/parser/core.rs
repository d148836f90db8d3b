//! Parsing session harness: hooks, error reporting, and low-level operations.

use std::sync::Arc;

use tracing::{debug, trace};

use super::ast::{ErrorContext, Node, NodeKind};
use super::lexer::{
    Keyword, LexError, Scanner, SemanticValue, Token, TokenId, is_reserved_keyword,
};
use super::options::ParserOptions;
use super::scope::MethodExprCounter;
use crate::diagnostics::{Diagnostic, DiagnosticKind, EnglishCatalog, MessageCatalog, MessageKey};
use crate::{Error, Result};

/// Failure signalled by the grammar to the error hook.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AutomatonError {
    /// The lookahead token cannot continue any production.
    Syntax,
    /// Nesting exceeded the recursion limit.
    StackOverflow,
    /// Grammar-specific message, reported verbatim.
    Message(String),
    Lexical(LexError),
}

pub(crate) type AutomatonResult<T> = std::result::Result<T, AutomatonError>;

/// Remaining stack below which a nesting level runs on a fresh segment.
const RED_ZONE: usize = 100 * 1024;

/// Size of each stack segment allocated for deep nesting.
const STACK_PER_LEVEL: usize = 1024 * 1024;

/// Reusable query parser.
///
/// Each [`CqlParser::parse`] call runs to completion (accept or raise) before
/// the next one starts. Per-call state is reset on entry and exit, so one
/// instance can parse many queries, but never two at once.
pub struct CqlParser {
    options: ParserOptions,
    catalog: Arc<dyn MessageCatalog + Send + Sync>,
    recursion_limit: Option<u32>,
    query: Option<Arc<str>>,
    parsed_tree: Option<Node>,
    method_exprs: MethodExprCounter,
}

impl Default for CqlParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl CqlParser {
    pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            catalog: Arc::new(EnglishCatalog),
            recursion_limit: Some(Self::DEFAULT_RECURSION_LIMIT),
            query: None,
            parsed_tree: None,
            method_exprs: MethodExprCounter::new(),
        }
    }

    /// `None` removes the limit.
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_catalog(mut self, catalog: impl MessageCatalog + Send + Sync + 'static) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn catalog(&self) -> &dyn MessageCatalog {
        self.catalog.as_ref()
    }

    /// Text of the last query handed to [`CqlParser::parse`].
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Tree of the last successful parse.
    pub fn parsed_tree(&self) -> Option<&Node> {
        self.parsed_tree.as_ref()
    }

    pub fn method_expr_counter(&self) -> &MethodExprCounter {
        &self.method_exprs
    }

    /// Parses one query into its AST root.
    ///
    /// `None` and blank text are rejected with [`Error::InvalidArgument`]
    /// before any state is touched. Any syntax failure is a positioned
    /// diagnostic; there is no recovery.
    pub fn parse(&mut self, query: Option<&str>) -> Result<&Node> {
        let Some(text) = query else {
            return Err(self.invalid_argument(MessageKey::QueryTextNull));
        };
        if text.trim().is_empty() {
            return Err(self.invalid_argument(MessageKey::InvalidEmptyQuery));
        }

        self.parsed_tree = None;
        self.method_exprs.reset();
        let text: Arc<str> = Arc::from(text);
        self.query = Some(text.clone());
        debug!(len = text.len(), mode = ?self.options.compilation_mode, "parse start");

        let outcome = Session::new(self, &text, text.clone()).run();
        self.method_exprs.reset();

        match outcome {
            Ok(root) => {
                debug!("parse accepted");
                Ok(&*self.parsed_tree.insert(root))
            }
            Err(err) => {
                debug!(error = %err, "parse failed");
                Err(err)
            }
        }
    }

    fn invalid_argument(&self, key: MessageKey) -> Error {
        Error::InvalidArgument {
            name: "query",
            message: self.catalog.phrase(key),
        }
    }
}

/// State of one in-flight parse.
pub(crate) struct Session<'p, 'q> {
    parser: &'p mut CqlParser,
    scanner: Scanner<'q>,
    query: Arc<str>,
    /// Lookahead token.
    pub(super) current: Token,
    /// Value most recently handed to the grammar by the fetch hook.
    semantic_value: Option<SemanticValue>,
    depth: u32,
}

impl<'p, 'q> Session<'p, 'q> {
    fn new(parser: &'p mut CqlParser, source: &'q str, query: Arc<str>) -> Self {
        Self {
            parser,
            scanner: Scanner::new(source),
            query,
            current: Token::end_of_input(0),
            semantic_value: None,
            depth: 0,
        }
    }

    fn run(mut self) -> Result<Node> {
        match self.parse_command() {
            Ok(root) => Ok(root),
            Err(err) => Err(self.on_error(err)),
        }
    }

    // ========================================================================
    // Hooks
    // ========================================================================

    /// Token-fetch hook.
    pub(super) fn fetch(&mut self) -> AutomatonResult<Token> {
        let Some(mut token) = self
            .scanner
            .next_token()
            .map_err(AutomatonError::Lexical)?
        else {
            trace!(position = self.scanner.position(), "end of input");
            return Ok(Token::end_of_input(self.scanner.position()));
        };

        self.scanner.advance_position();
        if let SemanticValue::Node(node) = &mut token.value {
            let info = self.lexeme_context(node);
            self.attach(node, token.start, info);
        }
        self.semantic_value = Some(token.value.clone());
        trace!(id = ?token.id, start = token.start, "fetch");
        Ok(token)
    }

    /// Error hook: turns a grammar failure into the diagnostic for this call.
    fn on_error(&self, error: AutomatonError) -> Error {
        let catalog = self.parser.catalog();
        match error {
            AutomatonError::Syntax => self.syntax_error(),
            AutomatonError::StackOverflow => Diagnostic::build(
                catalog,
                DiagnosticKind::StackOverflow,
                catalog.phrase(MessageKey::StackOverflowInParser),
            )
            .at(self.scanner.position())
            .command_text(&*self.query)
            .raise(),
            AutomatonError::Message(message) => {
                Diagnostic::build(catalog, DiagnosticKind::Syntax, message)
                    .at(self.scanner.position())
                    .command_text(&*self.query)
                    .raise()
            }
            AutomatonError::Lexical(lex) => Diagnostic::build(
                catalog,
                DiagnosticKind::Lexical,
                catalog.format(MessageKey::InvalidCharacter, &[lex.text.as_str()]),
            )
            .at(lex.position)
            .command_text(&*self.query)
            .raise(),
        }
    }

    /// Generic syntax error positioned at the offending terminal.
    ///
    /// The wording comes from the offending node's context when it has one,
    /// else `keyword` for reserved words (shown upper-cased), else `term`.
    fn syntax_error(&self) -> Error {
        let catalog = self.parser.catalog();
        let mut position = self.scanner.position();
        let term = self.scanner.text();
        let mut context_info = None;

        if !term.is_empty() {
            let node = self.semantic_value.as_ref().and_then(SemanticValue::as_node);
            let biased = |position: usize| position.min(position.saturating_sub(term.len()));

            let (wording, shown) = match node {
                Some(node) if node.err_ctx.has_context_info() => {
                    position = biased(position);
                    let info = node.err_ctx.context_info.clone().unwrap_or_default();
                    (info, term.to_string())
                }
                _ if is_reserved_keyword(term) && !node.is_some_and(Node::is_identifier) => {
                    position = biased(position);
                    (catalog.phrase(MessageKey::LocalizedKeyword), term.to_uppercase())
                }
                _ => (catalog.phrase(MessageKey::LocalizedTerm), term.to_string()),
            };
            context_info = Some(format!("{wording} '{shown}'"));
        }

        Diagnostic::build(
            catalog,
            DiagnosticKind::Syntax,
            catalog.phrase(MessageKey::GenericSyntaxError),
        )
        .at(position)
        .context_info(context_info)
        .command_text(&*self.query)
        .raise()
    }

    // ========================================================================
    // Error-context tracking
    // ========================================================================

    /// Annotates `node` with its position and context wording in one step,
    /// always against the text of the current parse.
    pub(super) fn attach(&self, node: &mut Node, position: usize, info: Option<String>) {
        node.err_ctx = self.error_context(position, info);
    }

    pub(super) fn error_context(&self, position: usize, info: Option<String>) -> ErrorContext {
        ErrorContext::new(position, info, self.query.clone())
    }

    pub(super) fn phrase(&self, key: MessageKey) -> String {
        self.parser.catalog().phrase(key)
    }

    pub(super) fn phrase_with(&self, key: MessageKey, arg: &str) -> String {
        self.parser.catalog().format(key, &[arg])
    }

    fn lexeme_context(&self, node: &Node) -> Option<String> {
        let key = match node.kind {
            NodeKind::Identifier(_) => MessageKey::LocalizedIdentifier,
            NodeKind::Literal(_) => MessageKey::LocalizedLiteral,
            NodeKind::Parameter(_) => MessageKey::LocalizedParameter,
            _ => return None,
        };
        Some(self.phrase(key))
    }

    // ========================================================================
    // Method-invocation scopes
    // ========================================================================

    pub(super) fn enter_scope(&mut self) {
        self.parser.method_exprs.enter_scope();
    }

    pub(super) fn record_invocation(&mut self) {
        self.parser.method_exprs.record_invocation();
    }

    pub(super) fn exit_scope(&mut self) -> u32 {
        self.parser.method_exprs.exit_scope()
    }

    // ========================================================================
    // Token operations
    // ========================================================================

    pub(super) fn at(&self, id: TokenId) -> bool {
        self.current.id == id
    }

    pub(super) fn at_keyword(&self, kw: Keyword) -> bool {
        self.at(TokenId::Keyword(kw))
    }

    /// Consumes the lookahead and fetches the next one.
    pub(super) fn bump(&mut self) -> AutomatonResult<Token> {
        let next = self.fetch()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(super) fn eat(&mut self, id: TokenId) -> AutomatonResult<Option<Token>> {
        if self.at(id) {
            return self.bump().map(Some);
        }
        Ok(None)
    }

    pub(super) fn eat_keyword(&mut self, kw: Keyword) -> AutomatonResult<Option<Token>> {
        self.eat(TokenId::Keyword(kw))
    }

    pub(super) fn expect(&mut self, id: TokenId) -> AutomatonResult<Token> {
        self.eat(id)?.ok_or(AutomatonError::Syntax)
    }

    pub(super) fn expect_keyword(&mut self, kw: Keyword) -> AutomatonResult<Token> {
        self.expect(TokenId::Keyword(kw))
    }

    // ========================================================================
    // Recursion fuel
    // ========================================================================

    /// Runs one nesting level of the grammar.
    ///
    /// Fuel bounds the depth; the native stack is grown on demand so the
    /// limit is reached before the thread's stack is exhausted.
    pub(super) fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> AutomatonResult<T>,
    ) -> AutomatonResult<T> {
        self.enter_recursion()?;
        let result = stacker::maybe_grow(RED_ZONE, STACK_PER_LEVEL, || production(self));
        self.exit_recursion();
        result
    }

    fn enter_recursion(&mut self) -> AutomatonResult<()> {
        if let Some(limit) = self.parser.recursion_limit
            && self.depth >= limit
        {
            return Err(AutomatonError::StackOverflow);
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

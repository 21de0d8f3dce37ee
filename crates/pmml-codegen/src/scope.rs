//! Lua source assembly: single-line statements and nested scopes.
//!
//! A [`Scope`] is an ordered list of lines and child scopes. Indentation is
//! not written while composing: every child scope records whether it sits
//! one level deeper than its parent, and depth is resolved once in
//! [`Scope::render`]. This lets a subtree be built first and grafted at any
//! depth later.
//!
//! Both builders carry their first error. Once an error is recorded, every
//! further composition call is a no-op, and the error reaches `render`
//! unchanged together with the fragment that was being written.

use tracing::debug;

use crate::error::{CodegenError, CodegenResult, ErrorKind};
use crate::literal::{encode_value, quote};
use crate::runtime::{self, INPUT};
use pmml_types::Value;

// ══════════════════════════════════════════════════════════════════════════════
// Statement
// ══════════════════════════════════════════════════════════════════════════════

/// A single line of Lua, built left to right.
#[derive(Debug, Clone)]
pub struct Statement {
    text: String,
    enabled: bool,
    error: Option<CodegenError>,
}

impl Default for Statement {
    fn default() -> Self {
        Self::new()
    }
}

/// A statement holding `text`.
pub fn line(text: impl AsRef<str>) -> Statement {
    Statement::new().append(text)
}

/// A statement holding `text` that is only emitted when `condition` holds.
pub fn line_if(condition: bool, text: impl AsRef<str>) -> Statement {
    line(text).enabled(condition)
}

impl Statement {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            enabled: true,
            error: None,
        }
    }

    /// Append raw text.
    pub fn append(mut self, text: impl AsRef<str>) -> Self {
        if self.error.is_none() {
            self.text.push_str(text.as_ref());
        }
        self
    }

    /// Toggle whether the statement is emitted. Errors are reported either way.
    pub fn enabled(mut self, condition: bool) -> Self {
        self.enabled = condition;
        self
    }

    /// Access a field of the input record: `v.name`, or `v['name']` with
    /// the name escaped when it is not a Lua identifier.
    pub fn field(self, name: &str) -> Self {
        if runtime::is_identifier(name) {
            self.append(format!("{INPUT}.{name}"))
        } else {
            self.append(format!("{INPUT}[{}]", quote(name)))
        }
    }

    /// A scalar literal.
    pub fn value(self, value: &Value) -> Self {
        self.append(encode_value(value))
    }

    pub fn boolean(self, value: bool) -> Self {
        self.append(if value { "true" } else { "false" })
    }

    /// `name(arg, ...)`
    pub fn call(self, name: &str, args: &[&str]) -> Self {
        self.append(format!("{name}({})", args.join(", ")))
    }

    /// Splice another statement's text, inheriting its error.
    pub fn statement(mut self, other: Statement) -> Self {
        if self.error.is_some() {
            return self;
        }
        match other.error {
            Some(err) => self.error = Some(err),
            None => self.text.push_str(&other.text),
        }
        self
    }

    /// Record an error, keeping the text written so far as context.
    pub fn fail(mut self, kind: ErrorKind) -> Self {
        if self.error.is_none() {
            self.error = Some(CodegenError::new(kind, self.text.clone()));
        }
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&CodegenError> {
        self.error.as_ref()
    }

    /// The statement text, or its error.
    pub fn into_result(self) -> CodegenResult<String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.text),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Scope
// ══════════════════════════════════════════════════════════════════════════════

/// Something that can be added to a [`Scope`].
#[derive(Debug, Clone)]
pub enum Part {
    Line(Statement),
    /// A child scope one level deeper than its parent.
    Nested(Scope),
    /// A child scope at its parent's level.
    Inline(Scope),
}

impl Part {
    pub fn inline(scope: Scope) -> Self {
        Self::Inline(scope)
    }
}

impl From<Statement> for Part {
    fn from(statement: Statement) -> Self {
        Self::Line(statement)
    }
}

impl From<Scope> for Part {
    fn from(scope: Scope) -> Self {
        Self::Nested(scope)
    }
}

#[derive(Debug, Clone)]
enum Item {
    Line(String),
    Block { deeper: bool, scope: Scope },
}

/// An ordered block of Lua lines and child scopes.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    name: Option<String>,
    items: Vec<Item>,
    error: Option<CodegenError>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// `function name(params) <body> end`, as a scope named `name`.
    pub fn function(name: &str, params: &[&str], body: Scope) -> Self {
        let mut scope = Self::new()
            .with(line(format!("function {name}({})", params.join(", "))))
            .with(body)
            .with(line("end"));
        scope.name = Some(name.to_string());
        scope
    }

    /// Name of a function scope.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn with(mut self, part: impl Into<Part>) -> Self {
        self.push(part);
        self
    }

    pub fn with_if(self, condition: bool, part: impl Into<Part>) -> Self {
        if condition {
            self.with(part)
        } else {
            self
        }
    }

    /// Add a part in place.
    pub fn push(&mut self, part: impl Into<Part>) {
        if self.error.is_some() {
            return;
        }
        match part.into() {
            Part::Line(statement) => match statement.error {
                Some(err) => self.record(err),
                None if statement.enabled => self.items.push(Item::Line(statement.text)),
                None => {}
            },
            Part::Nested(scope) => self.push_block(scope, true),
            Part::Inline(scope) => self.push_block(scope, false),
        }
    }

    fn push_block(&mut self, mut scope: Scope, deeper: bool) {
        match scope.error.take() {
            Some(err) => self.record(err),
            None => self.items.push(Item::Block { deeper, scope }),
        }
    }

    fn record(&mut self, err: CodegenError) {
        debug!(error = %err, "code generation failed");
        self.items.clear();
        self.error = Some(err);
    }

    pub fn error(&self) -> Option<&CodegenError> {
        self.error.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flatten into source text, one indentation unit per nesting level.
    pub fn render(&self, indent: &str) -> CodegenResult<String> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let mut out = String::new();
        self.write(0, indent, &mut out);
        Ok(out)
    }

    fn write(&self, depth: usize, indent: &str, out: &mut String) {
        for item in &self.items {
            match item {
                Item::Line(text) if text.is_empty() => out.push('\n'),
                Item::Line(text) => {
                    for _ in 0..depth {
                        out.push_str(indent);
                    }
                    out.push_str(text);
                    out.push('\n');
                }
                Item::Block { deeper, scope } => {
                    scope.write(depth + usize::from(*deeper), indent, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_builds_left_to_right() {
        let s = Statement::new()
            .field("age")
            .append(" > ")
            .value(&Value::from("30"));
        assert_eq!(s.text(), "v.age > 30");
    }

    #[test]
    fn field_falls_back_to_index_syntax() {
        assert_eq!(Statement::new().field("sepal length").text(), "v['sepal length']");
        assert_eq!(Statement::new().field("end").text(), "v['end']");
    }

    #[test]
    fn indexed_field_names_are_escaped() {
        assert_eq!(Statement::new().field("x'y").text(), r"v['x\'y']");
        assert_eq!(
            Statement::new().field("x'] or os.exit() or v['").text(),
            r"v['x\'] or os.exit() or v[\'']"
        );
    }

    #[test]
    fn call_and_boolean() {
        let s = Statement::new().call("n.next", &["t", "v"]);
        assert_eq!(s.text(), "n.next(t, v)");
        assert_eq!(Statement::new().boolean(false).text(), "false");
    }

    #[test]
    fn failed_statement_ignores_later_text() {
        let s = Statement::new()
            .append("v.a")
            .fail(ErrorKind::UnsupportedOperator("contains".into()))
            .append(" and more")
            .fail(ErrorKind::MissingElement("second".into()));
        let err = s.into_result().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedOperator("contains".into()));
        assert_eq!(err.fragment, "v.a");
    }

    #[test]
    fn splice_inherits_error() {
        let inner = Statement::new().fail(ErrorKind::MissingElement("array".into()));
        let outer = Statement::new().append("local x = ").statement(inner);
        assert_eq!(
            outer.error().map(|e| e.kind.clone()),
            Some(ErrorKind::MissingElement("array".into()))
        );
    }

    #[test]
    fn nested_scopes_indent_on_render() {
        let scope = Scope::new()
            .with(line("if x then"))
            .with(Scope::new().with(line("return true")))
            .with(line("end"));
        assert_eq!(scope.render("\t").unwrap(), "if x then\n\treturn true\nend\n");
    }

    #[test]
    fn inline_scope_keeps_parent_depth() {
        let inner = Scope::new().with(line("a")).with(Scope::new().with(line("b")));
        let outer = Scope::new().with(Scope::new().with(Part::inline(inner)));
        assert_eq!(outer.render("  ").unwrap(), "  a\n    b\n");
    }

    #[test]
    fn subtree_can_be_grafted_at_any_depth() {
        let subtree = Scope::new().with(line("x = 1"));
        let shallow = Scope::new().with(subtree.clone()).render("\t").unwrap();
        let deep = Scope::new()
            .with(Scope::new().with(Scope::new().with(subtree)))
            .render("\t")
            .unwrap();
        assert_eq!(shallow, "\tx = 1\n");
        assert_eq!(deep, "\t\t\tx = 1\n");
    }

    #[test]
    fn disabled_lines_are_skipped() {
        let scope = Scope::new()
            .with(line_if(false, "skipped"))
            .with(line_if(true, "kept"))
            .with_if(false, line("also skipped"));
        assert_eq!(scope.render("\t").unwrap(), "kept\n");
    }

    #[test]
    fn function_scope() {
        let f = Scope::function("main", &["v"], Scope::new().with(line("return 1")));
        assert_eq!(f.name(), Some("main"));
        assert_eq!(f.render("\t").unwrap(), "function main(v)\n\treturn 1\nend\n");
    }

    #[test]
    fn empty_lines_carry_no_indent() {
        let scope = Scope::new().with(Scope::new().with(line("a")).with(line("")).with(line("b")));
        assert_eq!(scope.render("\t").unwrap(), "\ta\n\n\tb\n");
    }

    #[test]
    fn first_error_is_sticky() {
        let first = Scope::new().with(
            Statement::new()
                .append("v.x")
                .fail(ErrorKind::UnsupportedOperator("first".into())),
        );
        let scope = Scope::new()
            .with(line("ok"))
            .with(first)
            .with(Statement::new().fail(ErrorKind::UnsupportedOperator("second".into())))
            .with(line("after"));

        let err = scope.render("\t").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedOperator("first".into()));
        assert_eq!(err.fragment, "v.x");
        assert!(scope.is_empty());
    }

    #[test]
    fn disabled_statement_still_reports_error() {
        let scope = Scope::new().with(
            Statement::new()
                .fail(ErrorKind::MissingElement("value".into()))
                .enabled(false),
        );
        assert!(scope.render("\t").is_err());
    }
}

//! JS/TS/JSX/TSX candidate walker built on swc.
//!
//! The walker is shared by the script parser (which turns candidates into
//! extracted items) and the script replacer (which rewrites candidate spans).

use std::ops::Range;

use swc_common::{
    BytePos, FileName, FilePathMapping, GLOBALS, Globals, SourceMap, Span,
    comments::SingleThreadedComments,
};
use swc_ecma_ast::{
    AssignExpr, AssignTarget, BinExpr, BinaryOp, CallExpr, Callee, ClassProp, Expr, ExprStmt,
    JSXAttr, JSXAttrName, JSXAttrValue, JSXElement, JSXElementName, JSXExpr, JSXText,
    KeyValueProp, Lit, MemberExpr, MemberProp, Module, Pat, PropName, SimpleAssignTarget,
    SwitchCase, TaggedTpl, Tpl, TsEnumDecl, VarDeclarator,
};
use swc_ecma_parser::{Parser, StringInput, Syntax as SwcSyntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::core::data::{ExtractedItem, Kind, ParseResult, ParseStats, ScriptDialect};
use crate::core::runtime::is_runtime_callee;
use crate::core::template::{TemplateInfo, analyze_template_literal};
use crate::core::validator::is_translatable_text;
use crate::utils::{build_line_index, collapse_whitespace, offset_to_line_col};

use super::markup::kinds::{kind_for_attribute, kind_for_text};
use super::{ExtractOptions, SyntaxParser};

/// Callees whose arguments are never UI copy (selectors, event names, module ids).
const TECHNICAL_CALLEES: &[&str] = &[
    "require",
    "import",
    "querySelector",
    "querySelectorAll",
    "getElementById",
    "getElementsByClassName",
    "getElementsByTagName",
    "addEventListener",
    "removeEventListener",
    "dispatchEvent",
    "$emit",
    "emit",
    "$on",
    "$off",
    "setAttribute",
    "getAttribute",
    "removeAttribute",
    "getItem",
    "setItem",
    "removeItem",
    "matchMedia",
    "createElement",
    "defineEmits",
    "fetch",
    "includes",
    "startsWith",
    "endsWith",
    "indexOf",
    "split",
    "replace",
    "match",
    "test",
    "join",
];

/// Receivers whose every method is technical (`console.log`, `JSON.parse`).
const TECHNICAL_RECEIVERS: &[&str] = &["console", "JSON", "classList", "localStorage", "sessionStorage"];

/// Where a candidate sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSite {
    JsxText,
    /// A string-valued JSX attribute (`title="..."`), span includes the quotes.
    JsxAttribute,
    /// A string literal in expression position, span includes the quotes.
    StringLiteral,
    /// A template literal, span includes the backticks.
    TemplateLiteral,
}

/// A literal that reads as UI copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCandidate {
    pub site: CandidateSite,
    /// Normalized lookup text (the placeholder skeleton for template literals).
    pub text: String,
    pub kind: Kind,
    /// Byte range to replace.
    pub span: Range<usize>,
    /// The literal's value equals its normalized text, so rewriting it loses nothing.
    pub exact: bool,
    pub template: Option<TemplateInfo>,
    pub element: Option<String>,
    pub attribute: Option<String>,
}

/// Result of walking a script.
#[derive(Debug, Clone, Default)]
pub struct ScriptScan {
    pub candidates: Vec<ScriptCandidate>,
    pub stats: ParseStats,
}

/// Parse and walk `content`. Returns `None` when the content is not valid script.
pub fn scan_script(
    content: &str,
    dialect: ScriptDialect,
    options: &ExtractOptions,
) -> Option<ScriptScan> {
    GLOBALS.set(&Globals::new(), || {
        let source_map = SourceMap::new(FilePathMapping::empty());
        let source_file = source_map.new_source_file(FileName::Anon.into(), content.to_string());

        let syntax = SwcSyntax::Typescript(TsSyntax {
            tsx: dialect == ScriptDialect::Tsx,
            decorators: true,
            ..Default::default()
        });
        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = match parser.parse_module() {
            Ok(module) => module,
            Err(err) => {
                debug!(error = ?err.kind(), "script did not parse");
                return None;
            }
        };

        let walker = CandidateWalker::new(content, source_file.start_pos, options);
        Some(walker.walk(&module))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralMode {
    /// String literals are candidates.
    Collect,
    /// Inside a non-translatable attribute or technical position.
    Suppress,
}

struct CandidateWalker<'a> {
    content: &'a str,
    start_pos: BytePos,
    options: &'a ExtractOptions,
    elements: Vec<String>,
    hint: Option<Kind>,
    mode: LiteralMode,
    scan: ScriptScan,
}

impl<'a> CandidateWalker<'a> {
    fn new(content: &'a str, start_pos: BytePos, options: &'a ExtractOptions) -> Self {
        Self {
            content,
            start_pos,
            options,
            elements: Vec::new(),
            hint: None,
            mode: LiteralMode::Collect,
            scan: ScriptScan::default(),
        }
    }

    fn walk(mut self, module: &Module) -> ScriptScan {
        self.visit_module(module);
        self.scan
    }

    fn range(&self, span: Span) -> Range<usize> {
        let start = (span.lo.0.saturating_sub(self.start_pos.0)) as usize;
        let end = (span.hi.0.saturating_sub(self.start_pos.0)) as usize;
        start.min(self.content.len())..end.min(self.content.len())
    }

    fn accepts(&mut self, text: &str) -> bool {
        if text.is_empty() || self.options.ignores_text(text) {
            return false;
        }
        if !is_translatable_text(text) {
            self.scan.stats.rejected += 1;
            return false;
        }
        true
    }

    fn current_kind(&self) -> Kind {
        self.hint
            .clone()
            .unwrap_or_else(|| kind_for_text(self.elements.iter().map(String::as_str)))
    }

    fn with_hint(&mut self, hint: Option<Kind>, visit: impl FnOnce(&mut Self)) {
        let previous = std::mem::replace(&mut self.hint, hint);
        visit(self);
        self.hint = previous;
    }

    fn with_mode(&mut self, mode: LiteralMode, visit: impl FnOnce(&mut Self)) {
        let previous = std::mem::replace(&mut self.mode, mode);
        visit(self);
        self.mode = previous;
    }

    fn push(&mut self, site: CandidateSite, text: String, span: Range<usize>, exact: bool) {
        self.push_candidate(ScriptCandidate {
            site,
            text,
            kind: self.current_kind(),
            span,
            exact,
            template: None,
            element: self.elements.last().cloned(),
            attribute: None,
        });
    }

    fn push_candidate(&mut self, candidate: ScriptCandidate) {
        self.scan.candidates.push(candidate);
    }

    fn collect_string(&mut self, value: &str, span: Span) {
        if self.mode == LiteralMode::Suppress {
            return;
        }
        let text = collapse_whitespace(value);
        if self.accepts(&text) {
            let exact = text == value;
            self.push(CandidateSite::StringLiteral, text, self.range(span), exact);
        }
    }

    fn collect_template(&mut self, tpl: &Tpl) {
        if self.mode == LiteralMode::Suppress {
            return;
        }
        let range = self.range(tpl.span);
        let Some(source) = self.content.get(range.clone()) else {
            return;
        };
        let info = analyze_template_literal(source);
        let text = collapse_whitespace(&info.base_text);
        if !self.accepts(&text) {
            return;
        }
        let exact = text == info.base_text;
        let candidate = ScriptCandidate {
            site: CandidateSite::TemplateLiteral,
            text,
            kind: self.current_kind(),
            span: range,
            exact,
            template: Some(info),
            element: self.elements.last().cloned(),
            attribute: None,
        };
        self.push_candidate(candidate);
    }

    fn record_runtime_call(&mut self, call: &CallExpr) {
        self.scan.stats.runtime_calls += 1;
        let key = call.args.first().and_then(|arg| match &*arg.expr {
            Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
            Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
                .quasis
                .first()
                .and_then(|q| q.cooked.as_ref())
                .and_then(|cooked| cooked.as_str())
                .map(str::to_string),
            _ => None,
        });
        if let Some(key) = key {
            self.scan.stats.runtime_keys.push(key);
        }
    }
}

fn expr_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::This(_) => Some("this".to_string()),
        Expr::Paren(paren) => expr_path(&paren.expr),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            Some(format!("{}.{}", expr_path(&member.obj)?, prop.sym))
        }
        _ => None,
    }
}

fn is_technical_callee(path: &str) -> bool {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, receivers)) = segments.split_last() else {
        return false;
    };
    TECHNICAL_CALLEES.contains(last)
        || receivers
            .iter()
            .any(|segment| TECHNICAL_RECEIVERS.contains(segment))
}

fn is_comparison(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::EqEq
            | BinaryOp::NotEq
            | BinaryOp::EqEqEq
            | BinaryOp::NotEqEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::In
            | BinaryOp::InstanceOf
    )
}

fn is_literal(expr: &Expr) -> bool {
    matches!(expr, Expr::Lit(_) | Expr::Tpl(_))
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        _ => None,
    }
}

fn jsx_element_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        JSXElementName::JSXMemberExpr(member) => member.prop.sym.to_string(),
        JSXElementName::JSXNamespacedName(ns) => ns.name.sym.to_string(),
    }
}

fn jsx_attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

fn identifier_hint(name: &str) -> Option<Kind> {
    Some(Kind::from_identifier(name))
}

impl Visit for CandidateWalker<'_> {
    fn visit_expr(&mut self, node: &Expr) {
        match node {
            Expr::Lit(Lit::Str(s)) => {
                if let Some(value) = s.value.as_str() {
                    self.collect_string(value, s.span);
                }
            }
            Expr::Tpl(tpl) => {
                self.collect_template(tpl);
                tpl.visit_children_with(self);
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        // directive prologues ('use client') and bare string statements
        if matches!(&*node.expr, Expr::Lit(Lit::Str(_))) {
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let path = match &node.callee {
            Callee::Expr(expr) => expr_path(expr),
            Callee::Import(_) => Some("import".to_string()),
            Callee::Super(_) => None,
        };

        match path.as_deref() {
            Some(name) if is_runtime_callee(name) => self.record_runtime_call(node),
            Some(name) if is_technical_callee(name) => {
                node.callee.visit_with(self);
                self.with_mode(LiteralMode::Suppress, |walker| {
                    node.args.visit_with(walker);
                });
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_bin_expr(&mut self, node: &BinExpr) {
        if !is_comparison(node.op) {
            node.visit_children_with(self);
            return;
        }
        for side in [&node.left, &node.right] {
            if !is_literal(side) {
                side.visit_with(self);
            }
        }
    }

    fn visit_switch_case(&mut self, node: &SwitchCase) {
        if let Some(test) = &node.test
            && !is_literal(test)
        {
            test.visit_with(self);
        }
        node.cons.visit_with(self);
    }

    fn visit_member_expr(&mut self, node: &MemberExpr) {
        node.obj.visit_with(self);
        if let MemberProp::Computed(computed) = &node.prop
            && !is_literal(&computed.expr)
        {
            computed.expr.visit_with(self);
        }
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        node.tag.visit_with(self);
    }

    fn visit_ts_enum_decl(&mut self, _node: &TsEnumDecl) {}

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        let hint = match &node.name {
            Pat::Ident(ident) => identifier_hint(&ident.id.sym),
            _ => None,
        };
        if let Some(init) = &node.init {
            self.with_hint(hint, |walker| init.visit_with(walker));
        }
    }

    fn visit_key_value_prop(&mut self, node: &KeyValueProp) {
        let hint = prop_name(&node.key).and_then(|name| identifier_hint(&name));
        self.with_hint(hint, |walker| node.value.visit_with(walker));
    }

    fn visit_class_prop(&mut self, node: &ClassProp) {
        let hint = prop_name(&node.key).and_then(|name| identifier_hint(&name));
        if let Some(value) = &node.value {
            self.with_hint(hint, |walker| value.visit_with(walker));
        }
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        let hint = match &node.left {
            AssignTarget::Simple(SimpleAssignTarget::Ident(ident)) => {
                identifier_hint(&ident.id.sym)
            }
            AssignTarget::Simple(SimpleAssignTarget::Member(member)) => match &member.prop {
                MemberProp::Ident(prop) => identifier_hint(&prop.sym),
                _ => None,
            },
            _ => None,
        };
        node.left.visit_with(self);
        self.with_hint(hint, |walker| node.right.visit_with(walker));
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        let name = jsx_element_name(&node.opening.name);
        let is_style = name == "style" || name == "script";

        self.elements.push(name);
        self.with_mode(LiteralMode::Collect, |walker| {
            walker.with_hint(None, |walker| {
                node.opening.visit_with(walker);
                if !is_style {
                    node.children.visit_with(walker);
                }
            });
        });
        self.elements.pop();
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        let range = self.range(node.span);
        let Some(raw) = self.content.get(range.clone()) else {
            return;
        };
        let text = collapse_whitespace(raw);
        if text.is_empty() {
            return;
        }
        self.scan.stats.text_nodes += 1;
        if !self.accepts(&text) {
            return;
        }

        let leading = raw.len() - raw.trim_start().len();
        let start = range.start + leading;
        let end = start + raw.trim().len();
        self.push(CandidateSite::JsxText, text, start..end, true);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let name = jsx_attr_name(&node.name);
        let Some(value) = &node.value else {
            return;
        };

        if !self.options.is_translatable_attribute(&name) {
            self.with_mode(LiteralMode::Suppress, |walker| value.visit_with(walker));
            return;
        }

        let element = self.elements.last().cloned().unwrap_or_default();
        let kind = kind_for_attribute(&name, &element);

        match value {
            JSXAttrValue::Str(s) => {
                let Some(raw) = s.value.as_str() else { return };
                let text = collapse_whitespace(raw);
                if text.is_empty() {
                    return;
                }
                self.scan.stats.attributes += 1;
                if !self.accepts(&text) {
                    return;
                }
                let candidate = ScriptCandidate {
                    site: CandidateSite::JsxAttribute,
                    exact: text == raw,
                    text,
                    kind,
                    span: self.range(s.span),
                    template: None,
                    element: Some(element),
                    attribute: Some(name),
                };
                self.push_candidate(candidate);
            }
            JSXAttrValue::JSXExprContainer(container) => {
                if let JSXExpr::Expr(expr) = &container.expr {
                    if is_literal(expr) {
                        self.scan.stats.attributes += 1;
                    }
                    let before = self.scan.candidates.len();
                    self.with_hint(Some(kind), |walker| expr.visit_with(walker));
                    for candidate in &mut self.scan.candidates[before..] {
                        candidate.attribute.get_or_insert_with(|| name.clone());
                    }
                }
            }
            other => other.visit_with(self),
        }
    }
}

/// JS/TS/JSX/TSX parser. A syntax error yields an empty result with
/// `stats.parse_failed` set.
#[derive(Debug, Clone)]
pub struct ScriptParser {
    dialect: ScriptDialect,
    options: ExtractOptions,
}

impl ScriptParser {
    pub fn new(dialect: ScriptDialect, options: ExtractOptions) -> Self {
        Self { dialect, options }
    }
}

impl SyntaxParser for ScriptParser {
    fn parse(&self, content: &str) -> ParseResult {
        let Some(scan) = scan_script(content, self.dialect, &self.options) else {
            return ParseResult {
                items: Vec::new(),
                stats: ParseStats {
                    parse_failed: true,
                    ..ParseStats::default()
                },
            };
        };

        let line_index = build_line_index(content);
        let items = scan
            .candidates
            .into_iter()
            .map(|candidate| {
                let (line, col) = offset_to_line_col(content, &line_index, candidate.span.start);
                let item = match (candidate.site, candidate.attribute) {
                    (CandidateSite::JsxAttribute, Some(attribute)) => ExtractedItem::attribute(
                        candidate.text,
                        candidate.kind,
                        candidate.element,
                        attribute,
                    ),
                    (_, attribute) => {
                        let mut item =
                            ExtractedItem::text(candidate.text, candidate.kind, candidate.element);
                        item.attribute_name = attribute;
                        item
                    }
                };
                item.at(line, col)
            })
            .collect();

        ParseResult {
            items,
            stats: scan.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::ItemType;
    use pretty_assertions::assert_eq;

    fn parse(content: &str) -> ParseResult {
        ScriptParser::new(ScriptDialect::Tsx, ExtractOptions::default()).parse(content)
    }

    fn texts(result: &ParseResult) -> Vec<&str> {
        result.items.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn test_jsx_text_and_attributes() {
        let result = parse(
            r#"export function Header() {
  return (
    <header className="flex items-center">
      <h1>Invoice Overview</h1>
      <button title="Save all changes" onClick={() => save()}>Save</button>
      <input placeholder={"Search invoices"} />
    </header>
  );
}"#,
        );

        let items: Vec<(&str, ItemType, &Kind)> = result
            .items
            .iter()
            .map(|i| (i.text.as_str(), i.item_type, &i.kind))
            .collect();
        assert_eq!(
            items,
            vec![
                ("Invoice Overview", ItemType::Text, &Kind::Heading),
                ("Save all changes", ItemType::Attribute, &Kind::Title),
                ("Save", ItemType::Text, &Kind::Button),
                ("Search invoices", ItemType::Text, &Kind::Placeholder),
            ]
        );
        assert_eq!((result.items[0].line, result.items[0].col), (4, 11));
        assert_eq!(result.items[3].attribute_name.as_deref(), Some("placeholder"));
    }

    #[test]
    fn test_kind_hints_from_identifiers() {
        let result = parse(
            r#"const pageTitle = "Billing Settings";
const config = { submitButton: "Send Invoice", helpText: `Contact ${team.name} today` };"#,
        );
        let items: Vec<(&str, &Kind)> = result.items.iter().map(|i| (i.text.as_str(), &i.kind)).collect();
        assert_eq!(
            items,
            vec![
                ("Billing Settings", &Kind::Title),
                ("Send Invoice", &Kind::Button),
                ("Contact {name} today", &Kind::Text),
            ]
        );
    }

    #[test]
    fn test_exclusions() {
        let result = parse(
            r#"'use client';
import Thing from "Some Module";
console.log("Debug Message Here");
document.querySelector("Main Content");
if (status === "Payment Failed") {}
switch (mode) { case "Dark Mode": break; }
const x = obj["Computed Key"];
const q = gql`Query Name Here`;
enum Color { Red = "Bright Red" }
t("App.text.hello");
const label = t("Nav.label.home");
const ok = "Payment Received";
"#,
        );
        assert_eq!(texts(&result), vec!["Payment Received"]);
        assert_eq!(result.stats.runtime_calls, 2);
        assert_eq!(result.stats.runtime_keys, vec!["App.text.hello", "Nav.label.home"]);
    }

    #[test]
    fn test_non_translatable_jsx_attribute_is_suppressed() {
        let result = parse(
            r#"const el = <div className={cx("Primary Button", active && "Is Active")} aria-label="Close dialog">Ready to go</div>;"#,
        );
        assert_eq!(texts(&result), vec!["Close dialog", "Ready to go"]);
    }

    #[test]
    fn test_syntax_error_degrades() {
        let result = parse("const = <div>Unclosed");
        assert!(result.items.is_empty());
        assert!(result.stats.parse_failed);
    }

    #[test]
    fn test_ts_dialect_allows_angle_bracket_assertions() {
        let result = ScriptParser::new(ScriptDialect::Ts, ExtractOptions::default())
            .parse("const message = <string>value;\nconst heading = 'Account Overview';");
        assert!(!result.stats.parse_failed);
        assert_eq!(texts(&result), vec!["Account Overview"]);
    }

    #[test]
    fn test_candidate_spans() {
        let content = "const a = <p title=\"Hello World\">  Good morning  </p>;";
        let scan = scan_script(content, ScriptDialect::Tsx, &ExtractOptions::default()).unwrap();
        let spans: Vec<&str> = scan
            .candidates
            .iter()
            .map(|c| &content[c.span.clone()])
            .collect();
        assert_eq!(spans, vec!["\"Hello World\"", "Good morning"]);
    }
}

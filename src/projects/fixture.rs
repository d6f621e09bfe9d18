//! Lowering fixtures.
//!
//! A fixture is a TOML file that describes a small program the way semantic analysis would
//! hand it to the lowering: scopes, symbols (with host associations), the storage each symbol
//! is bound to, and directives whose clauses list objects. Lowering a fixture runs every
//! clause through the object-list lowering and reports operands or declare target captures.
//!
//! Names in clause items are bound to symbols by looking them up through the directive's
//! scope and its parents. A name that is not found stays unbound.

use crate::omp_frontend::compiler_errors::{CompilerError, CompilerMessages, ErrorType};
use crate::omp_frontend::compiler_warnings::CompilerWarning;
use crate::omp_frontend::conversion_context::{LoweringContext, StorageValue};
use crate::omp_frontend::omp::{DeclareTargetCaptureClause, OmpObjectLowering};
use crate::omp_frontend::parse_tree::{
    ArrayElement, DataRef, Designator, Expr, Name, OmpObject, StructureComponent, Subscript,
    Substring,
};
use crate::omp_frontend::source_location::{CharPosition, TextLocation};
use crate::omp_frontend::string_interning::{StringId, StringTable};
use crate::omp_frontend::symbols::{ScopeId, SymbolDetails, SymbolTable};
use crate::projects::settings::{LoweringConfig, MINIMUM_LIKELY_SYMBOLS};
use crate::{lower_log, return_fixture_error, timer_log};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;

// ------------------
// Fixture file shape
// ------------------
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    #[serde(default)]
    scope: Vec<FixtureScope>,
    #[serde(default)]
    symbol: Vec<FixtureSymbol>,
    #[serde(default)]
    binding: Vec<FixtureBinding>,
    #[serde(default)]
    directive: Vec<FixtureDirective>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureScope {
    name: String,
    parent: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FixtureSymbolKind {
    #[default]
    Object,
    Component,
    Procedure,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureSymbol {
    name: String,
    scope: String,
    #[serde(default)]
    kind: FixtureSymbolKind,

    // Host associates the symbol of the same name from an enclosing scope
    #[serde(default)]
    host: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureBinding {
    symbol: String,
    scope: String,
    value: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureDirective {
    name: String,
    scope: String,
    #[serde(default)]
    clause: Vec<FixtureClause>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureClause {
    name: String,
    capture: Option<DeclareTargetCaptureClause>,
    objects: Vec<toml::Spanned<FixtureObject>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FixtureObject {
    Name(String),
    Element(FixtureElement),
    Component(FixtureComponent),
    Substring(FixtureSubstring),
    Designator(Box<FixtureObject>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureElement {
    base: String,
    subscripts: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureComponent {
    base: String,
    field: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureSubstring {
    base: String,
    lower: Option<i64>,
    upper: Option<i64>,
}

// -------------
// Fixture report
// -------------
#[derive(Debug, Serialize)]
pub struct FixtureReport {
    pub directives: Vec<DirectiveReport>,

    #[serde(skip)]
    pub warnings: Vec<CompilerWarning>,
}

#[derive(Debug, Serialize)]
pub struct DirectiveReport {
    pub name: String,
    pub clauses: Vec<ClauseReport>,
}

#[derive(Debug, Serialize)]
pub struct ClauseReport {
    pub name: String,
    #[serde(flatten)]
    pub result: ClauseResult,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseResult {
    Operands(Vec<StorageValue>),
    Captures(Vec<CaptureReport>),
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CaptureReport {
    pub clause: DeclareTargetCaptureClause,
    pub symbol: String,
}

// -----------
// Entry Point
// -----------
/// Lowers every clause of every directive in the fixture `source`.
/// `file` is the interned path of the fixture, used for diagnostic locations.
pub fn lower_fixture(
    source: &str,
    file: Option<StringId>,
    config: &LoweringConfig,
    string_table: &mut StringTable,
) -> Result<FixtureReport, CompilerMessages> {
    let _time = Instant::now();

    let fixture: FixtureFile = match toml::from_str(source) {
        Ok(fixture) => fixture,
        Err(e) => {
            let error = fixture_error(format!("Invalid fixture: {e}"));
            return Err(CompilerMessages::from_error(error, Vec::new()));
        }
    };

    let mut binder = FixtureBinder::new(source, file, string_table);
    let (symbols, scopes) = binder
        .build_symbol_table(&fixture)
        .map_err(|error| CompilerMessages::from_error(error, Vec::new()))?;

    let mut ctx = LoweringContext::new(config);
    for binding in &fixture.binding {
        let scope = scope_by_name(&scopes, &binding.scope)
            .map_err(|error| CompilerMessages::from_error(error, Vec::new()))?;
        let name = binder.string_table.intern(&binding.symbol);

        let Some(symbol) = symbols.lookup_local(scope, name) else {
            let error = fixture_error(format!(
                "Binding for '{}' in scope '{}' names no declared symbol",
                binding.symbol, binding.scope
            ));
            return Err(CompilerMessages::from_error(error, Vec::new()));
        };

        ctx.bind_symbol(symbol, StorageValue(binding.value));
    }

    timer_log!(_time, "Fixture symbols and bindings built in: ");

    let mut report = FixtureReport {
        directives: Vec::with_capacity(fixture.directive.len()),
        warnings: Vec::new(),
    };

    for directive in &fixture.directive {
        let scope = scope_by_name(&scopes, &directive.scope)
            .map_err(|error| CompilerMessages::from_error(error, report.warnings.clone()))?;

        // Every directive is its own lowering scope, so host association rebinding
        // is visible to later clauses of the same directive only.
        ctx.push_scope();
        let directive_report =
            binder.lower_directive(directive, scope, &symbols, config, &mut ctx, &mut report.warnings);
        ctx.pop_scope();

        report.directives.push(directive_report?);
    }

    timer_log!(_time, "Fixture lowered in: ");
    Ok(report)
}

fn fixture_error(msg: String) -> CompilerError {
    CompilerError::new(msg, TextLocation::default(), ErrorType::Fixture)
}

fn scope_by_name(scopes: &FxHashMap<String, ScopeId>, name: &str) -> Result<ScopeId, CompilerError> {
    match scopes.get(name) {
        Some(scope) => Ok(*scope),
        None => return_fixture_error!("Unknown scope '{}'", name),
    }
}

struct FixtureBinder<'a> {
    source: &'a str,
    file: Option<StringId>,
    string_table: &'a mut StringTable,
}

impl<'a> FixtureBinder<'a> {
    fn new(source: &'a str, file: Option<StringId>, string_table: &'a mut StringTable) -> Self {
        FixtureBinder {
            source,
            file,
            string_table,
        }
    }

    fn build_symbol_table(
        &mut self,
        fixture: &FixtureFile,
    ) -> Result<(SymbolTable, FxHashMap<String, ScopeId>), CompilerError> {
        let mut symbols = SymbolTable::new();
        let mut scopes: FxHashMap<String, ScopeId> = FxHashMap::default();

        // Parents have to be listed before their children
        for scope in &fixture.scope {
            let parent = match &scope.parent {
                Some(parent) => Some(scope_by_name(&scopes, parent)?),
                None => None,
            };

            if scopes.contains_key(&scope.name) {
                return_fixture_error!("Scope '{}' is declared twice", scope.name);
            }

            let id = symbols.add_scope(self.string_table.intern(&scope.name), parent);
            scopes.insert(scope.name.to_owned(), id);
        }

        let mut declared = Vec::with_capacity(fixture.symbol.len().max(MINIMUM_LIKELY_SYMBOLS));
        for symbol in &fixture.symbol {
            let scope = scope_by_name(&scopes, &symbol.scope)?;
            let name = self.string_table.intern(&symbol.name);

            let declaration = if symbol.host {
                let enclosing = symbols.scope(scope).and_then(|scope| scope.parent);
                let Some(outer) = enclosing.and_then(|parent| symbols.lookup(parent, name)) else {
                    return_fixture_error!(
                        "'{}' in scope '{}' is host associated, but no enclosing scope declares it",
                        symbol.name,
                        symbol.scope
                    );
                };
                symbols.declare_host_association(scope, outer)
            } else {
                let details = match symbol.kind {
                    FixtureSymbolKind::Object => SymbolDetails::Object,
                    FixtureSymbolKind::Component => SymbolDetails::Component,
                    FixtureSymbolKind::Procedure => SymbolDetails::Procedure,
                };
                symbols.declare(scope, name, details)
            };

            match declaration {
                Ok(id) => declared.push(id),
                Err(e) => return_fixture_error!(
                    "'{}' can't be declared in scope '{}': {}",
                    symbol.name,
                    symbol.scope,
                    e.msg
                ),
            }
        }

        lower_log!("Fixture declared ", {declared.len()}, " symbols");
        Ok((symbols, scopes))
    }

    fn lower_directive(
        &mut self,
        directive: &FixtureDirective,
        scope: ScopeId,
        symbols: &SymbolTable,
        config: &LoweringConfig,
        ctx: &mut LoweringContext,
        warnings: &mut Vec<CompilerWarning>,
    ) -> Result<DirectiveReport, CompilerMessages> {
        let mut clauses = Vec::with_capacity(directive.clause.len());

        for clause in &directive.clause {
            let objects: Vec<OmpObject> = clause
                .objects
                .iter()
                .map(|object| {
                    let location = self.span_location(object.span());
                    self.bind_object(object.get_ref(), scope, symbols, location)
                })
                .collect::<Result<_, _>>()
                .map_err(|error| CompilerMessages::from_error(error, warnings.clone()))?;

            let mut lowering =
                OmpObjectLowering::new(symbols, self.string_table, config.missing_objects);

            let result = match clause.capture {
                Some(capture) => lowering
                    .gather_func_and_var_syms(&objects, capture)
                    .map(|pairs| {
                        ClauseResult::Captures(
                            pairs
                                .into_iter()
                                .map(|pair| CaptureReport {
                                    clause: pair.clause,
                                    symbol: symbols
                                        .get(pair.symbol)
                                        .map(|symbol| self.string_table.resolve(symbol.name))
                                        .unwrap_or_default()
                                        .to_owned(),
                                })
                                .collect(),
                        )
                    }),
                None => lowering
                    .gen_object_list(&objects, &clause.name, ctx)
                    .map(ClauseResult::Operands),
            };

            warnings.extend(lowering.into_warnings());

            match result {
                Ok(result) => clauses.push(ClauseReport {
                    name: clause.name.to_owned(),
                    result,
                }),
                Err(error) => return Err(CompilerMessages::from_error(error, warnings.clone())),
            }
        }

        Ok(DirectiveReport {
            name: directive.name.to_owned(),
            clauses,
        })
    }

    fn bind_object(
        &mut self,
        object: &FixtureObject,
        scope: ScopeId,
        symbols: &SymbolTable,
        location: TextLocation,
    ) -> Result<OmpObject, CompilerError> {
        let object = match object {
            FixtureObject::Name(name) => OmpObject::Name(self.bind_name(name, scope, symbols, location)),
            FixtureObject::Element(element) => {
                OmpObject::ArrayElement(self.bind_element(element, scope, symbols, location)?)
            }
            FixtureObject::Component(component) => OmpObject::StructureComponent(
                self.bind_component(component, scope, symbols, location),
            ),
            FixtureObject::Substring(substring) => OmpObject::Designator(Designator::Substring(
                Substring {
                    parent: self.bind_data_ref(&substring.base, scope, symbols, location),
                    lower: substring.lower.map(Expr::IntLiteral),
                    upper: substring.upper.map(Expr::IntLiteral),
                },
            )),
            FixtureObject::Designator(inner) => {
                match self.bind_object(inner, scope, symbols, location)? {
                    OmpObject::Name(name) => OmpObject::Designator(Designator::DataRef(DataRef::Name(name))),
                    OmpObject::ArrayElement(element) => OmpObject::Designator(Designator::DataRef(
                        DataRef::ArrayElement(Box::new(element)),
                    )),
                    OmpObject::StructureComponent(component) => OmpObject::Designator(
                        Designator::DataRef(DataRef::StructureComponent(Box::new(component))),
                    ),
                    designator @ OmpObject::Designator(_) => designator,
                }
            }
        };

        Ok(object)
    }

    fn bind_element(
        &mut self,
        element: &FixtureElement,
        scope: ScopeId,
        symbols: &SymbolTable,
        location: TextLocation,
    ) -> Result<ArrayElement, CompilerError> {
        let base = self.bind_data_ref(&element.base, scope, symbols, location);
        let subscripts = element
            .subscripts
            .iter()
            .map(|subscript| self.bind_subscript(subscript, scope, symbols, location))
            .collect::<Result<_, _>>()?;

        Ok(ArrayElement { base, subscripts })
    }

    fn bind_component(
        &mut self,
        component: &FixtureComponent,
        scope: ScopeId,
        symbols: &SymbolTable,
        location: TextLocation,
    ) -> StructureComponent {
        StructureComponent {
            base: self.bind_data_ref(&component.base, scope, symbols, location),
            component: self.bind_name(&component.field, scope, symbols, location),
        }
    }

    // `s%inner%arr` becomes a chain of structure components
    fn bind_data_ref(
        &mut self,
        path: &str,
        scope: ScopeId,
        symbols: &SymbolTable,
        location: TextLocation,
    ) -> DataRef {
        let mut parts = path.split('%');
        let first = parts.next().unwrap_or_default();
        let mut data_ref = DataRef::Name(self.bind_name(first, scope, symbols, location));

        for part in parts {
            data_ref = DataRef::StructureComponent(Box::new(StructureComponent {
                base: data_ref,
                component: self.bind_name(part, scope, symbols, location),
            }));
        }

        data_ref
    }

    // "3" is an index, "i" an index variable, "1:n:2" a triplet
    fn bind_subscript(
        &mut self,
        subscript: &str,
        scope: ScopeId,
        symbols: &SymbolTable,
        location: TextLocation,
    ) -> Result<Subscript, CompilerError> {
        if !subscript.contains(':') {
            return Ok(Subscript::Index(self.bind_expr(subscript, scope, symbols, location)));
        }

        let bounds: Vec<&str> = subscript.split(':').map(str::trim).collect();
        if bounds.len() > 3 {
            return Err(CompilerError::new(
                format!("Subscript '{subscript}' has more than lower, upper and stride"),
                location,
                ErrorType::Fixture,
            ));
        }

        let mut bounds = bounds.into_iter().map(|bound| {
            if bound.is_empty() {
                None
            } else {
                Some(self.bind_expr(bound, scope, symbols, location))
            }
        });

        let lower = bounds.next().flatten();
        let upper = bounds.next().flatten();
        let stride = bounds.next().flatten();

        Ok(Subscript::Triplet {
            lower,
            upper,
            stride,
        })
    }

    fn bind_expr(
        &mut self,
        text: &str,
        scope: ScopeId,
        symbols: &SymbolTable,
        location: TextLocation,
    ) -> Expr {
        let text = text.trim();
        match text.parse::<i64>() {
            Ok(value) => Expr::IntLiteral(value),
            Err(_) => Expr::Variable(self.bind_data_ref(text, scope, symbols, location)),
        }
    }

    fn bind_name(
        &mut self,
        text: &str,
        scope: ScopeId,
        symbols: &SymbolTable,
        location: TextLocation,
    ) -> Name {
        let source = self.string_table.intern(text.trim());
        Name::new(source, symbols.lookup(scope, source), location)
    }

    // Converts a byte span of the fixture into a zero based line and one based columns
    fn span_location(&self, span: std::ops::Range<usize>) -> TextLocation {
        let start = char_position(self.source, span.start);
        let end = char_position(self.source, span.end.saturating_sub(1).max(span.start));
        TextLocation::new(self.file, start, end)
    }
}

fn char_position(source: &str, offset: usize) -> CharPosition {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or_default();
    let line_number = before.matches('\n').count() as i32;
    let line_start = before.rfind('\n').map(|index| index + 1).unwrap_or(0);
    let char_column = before.get(line_start..).unwrap_or_default().chars().count() as i32 + 1;

    CharPosition {
        line_number,
        char_column,
    }
}

use crate::omp_frontend::conversion_context::{ConversionContext, StorageValue};
use crate::omp_frontend::omp::OmpObjectLowering;
use crate::omp_frontend::parse_tree::{
    ArrayElement, DataRef, Designator, Expr, Name, OmpObject, StructureComponent, Subscript,
    Substring,
};
use crate::omp_frontend::source_location::TextLocation;
use crate::omp_frontend::string_interning::StringTable;
use crate::omp_frontend::symbols::{ScopeId, SymbolDetails, SymbolId, SymbolTable};
use crate::projects::settings::MissingObjectPolicy;
use rustc_hash::FxHashMap;

/// A program with an outer `main` scope and a nested `inner` scope.
/// Clause items are built against `inner`, so names declared only in `main`
/// resolve to the outer symbol.
pub(crate) struct TestProgram {
    pub string_table: StringTable,
    pub symbols: SymbolTable,
    pub main: ScopeId,
    pub inner: ScopeId,
    next_line: i32,
}

impl TestProgram {
    pub(crate) fn new() -> Self {
        let mut string_table = StringTable::new();
        let mut symbols = SymbolTable::new();
        let main = symbols.add_scope(string_table.intern("main"), None);
        let inner = symbols.add_scope(string_table.intern("inner"), Some(main));

        TestProgram {
            string_table,
            symbols,
            main,
            inner,
            next_line: 0,
        }
    }

    pub(crate) fn declare(&mut self, scope: ScopeId, name: &str) -> SymbolId {
        let name = self.string_table.intern(name);
        self.symbols
            .declare(scope, name, SymbolDetails::Object)
            .expect("test symbol should declare")
    }

    pub(crate) fn declare_component(&mut self, scope: ScopeId, name: &str) -> SymbolId {
        let name = self.string_table.intern(name);
        self.symbols
            .declare(scope, name, SymbolDetails::Component)
            .expect("test component should declare")
    }

    /// Declares `outer` in `main` and its host associated view in `inner`.
    pub(crate) fn declare_host_pair(&mut self, name: &str) -> (SymbolId, SymbolId) {
        let outer = self.declare(self.main, name);
        let inner = self
            .symbols
            .declare_host_association(self.inner, outer)
            .expect("host association should declare");
        (outer, inner)
    }

    /// A name bound the way semantics would bind it from inside `inner`.
    pub(crate) fn name(&mut self, text: &str) -> Name {
        let source = self.string_table.intern(text);
        let symbol = self.symbols.lookup(self.inner, source);
        let location = TextLocation::new_just_line(self.next_line);
        self.next_line += 1;
        Name::new(source, symbol, location)
    }

    pub(crate) fn simple(&mut self, text: &str) -> OmpObject {
        OmpObject::Name(self.name(text))
    }

    /// `array(index)` where the index is a variable
    pub(crate) fn element(&mut self, array: &str, index: &str) -> ArrayElement {
        let base = DataRef::Name(self.name(array));
        let index = Expr::Variable(DataRef::Name(self.name(index)));
        ArrayElement {
            base,
            subscripts: vec![Subscript::Index(index)],
        }
    }

    /// `base%field`
    pub(crate) fn component(&mut self, base: &str, field: &str) -> StructureComponent {
        StructureComponent {
            base: DataRef::Name(self.name(base)),
            component: self.name(field),
        }
    }

    /// `text(1:3)` on a character variable
    pub(crate) fn substring(&mut self, text: &str) -> OmpObject {
        OmpObject::Designator(Designator::Substring(Substring {
            parent: DataRef::Name(self.name(text)),
            lower: Some(Expr::IntLiteral(1)),
            upper: Some(Expr::IntLiteral(3)),
        }))
    }

    pub(crate) fn designator_name(&mut self, text: &str) -> OmpObject {
        OmpObject::Designator(Designator::DataRef(DataRef::Name(self.name(text))))
    }

    pub(crate) fn lowering(&self, policy: MissingObjectPolicy) -> OmpObjectLowering<'_> {
        OmpObjectLowering::new(&self.symbols, &self.string_table, policy)
    }
}

/// A conversion context that records every binding copy it is asked to make.
#[derive(Debug, Default)]
pub(crate) struct RecordingContext {
    pub bindings: FxHashMap<SymbolId, StorageValue>,
    pub copies: Vec<(SymbolId, SymbolId)>,
}

impl RecordingContext {
    pub(crate) fn bind(&mut self, symbol: SymbolId, value: u32) {
        self.bindings.insert(symbol, StorageValue(value));
    }
}

impl ConversionContext for RecordingContext {
    fn symbol_address(&self, symbol: SymbolId) -> Option<StorageValue> {
        self.bindings.get(&symbol).copied()
    }

    fn copy_symbol_binding(&mut self, src: SymbolId, target: SymbolId) {
        self.copies.push((src, target));
        if let Some(value) = self.bindings.get(&src).copied() {
            self.bindings.insert(target, value);
        }
    }
}

//! Semantic symbol table.
//!
//! The table owns every symbol. Everything else (parse-tree names, host associations,
//! storage bindings) refers to symbols through `SymbolId`, so a host association never
//! keeps the symbol it aliases alive on its own.

use crate::omp_frontend::compiler_errors::CompilerError;
use crate::omp_frontend::string_interning::StringId;
use crate::{return_compiler_error, symbol_log};
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolDetails {
    /// A variable with its own storage
    Object,

    /// A component of a derived type
    Component,

    Procedure,

    /// The symbol is the inner-scope view of `symbol`, declared in an enclosing scope
    HostAssociated { symbol: SymbolId },
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: StringId,
    pub scope: ScopeId,
    pub details: SymbolDetails,
}

impl Symbol {
    /// The outer symbol this one aliases through host association, if any.
    pub fn host_associated_symbol(&self) -> Option<SymbolId> {
        match self.details {
            SymbolDetails::HostAssociated { symbol } => Some(symbol),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub name: StringId,
    pub parent: Option<ScopeId>,
    symbols: FxHashMap<StringId, SymbolId>,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scope(&mut self, name: StringId, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            name,
            parent,
            symbols: FxHashMap::default(),
        });
        id
    }

    /// Declares a new symbol in `scope`.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: StringId,
        details: SymbolDetails,
    ) -> Result<SymbolId, CompilerError> {
        let id = SymbolId(self.symbols.len() as u32);

        let Some(scope_entry) = self.scopes.get_mut(scope.0 as usize) else {
            return_compiler_error!("Scope {:?} does not exist in the symbol table", scope);
        };

        if scope_entry.symbols.contains_key(&name) {
            return_compiler_error!("{} is already declared in scope {:?}", name, scope);
        }

        scope_entry.symbols.insert(name, id);
        self.symbols.push(Symbol {
            id,
            name,
            scope,
            details,
        });

        symbol_log!("Declared symbol ", {format!("{id:?} in {scope:?}")});
        Ok(id)
    }

    /// Declares the inner-scope alias of `outer` inside `scope`.
    /// `outer` has to live in a scope that encloses `scope`.
    pub fn declare_host_association(
        &mut self,
        scope: ScopeId,
        outer: SymbolId,
    ) -> Result<SymbolId, CompilerError> {
        let Some(outer_symbol) = self.get(outer) else {
            return_compiler_error!("Host associated symbol {:?} does not exist", outer);
        };

        let outer_scope = outer_symbol.scope;
        let name = outer_symbol.name;

        if outer_scope == scope || !self.encloses(outer_scope, scope) {
            return_compiler_error!(
                "Symbol {:?} can't be host associated into {:?}: its scope does not enclose it",
                outer,
                scope
            );
        }

        self.declare(scope, name, SymbolDetails::HostAssociated { symbol: outer })
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    pub fn lookup_local(&self, scope: ScopeId, name: StringId) -> Option<SymbolId> {
        self.scope(scope)
            .and_then(|scope| scope.symbols.get(&name))
            .copied()
    }

    /// Looks `name` up in `scope`, then in each enclosing scope in turn.
    pub fn lookup(&self, scope: ScopeId, name: StringId) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(scope_id) = current {
            if let Some(symbol) = self.lookup_local(scope_id, name) {
                return Some(symbol);
            }
            current = self.scope(scope_id).and_then(|scope| scope.parent);
        }
        None
    }

    /// Whether `outer` is `inner` or one of its ancestors.
    pub fn encloses(&self, outer: ScopeId, inner: ScopeId) -> bool {
        let mut current = Some(inner);
        while let Some(scope_id) = current {
            if scope_id == outer {
                return true;
            }
            current = self.scope(scope_id).and_then(|scope| scope.parent);
        }
        false
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

//! Storage bindings for the lowering pass.
//!
//! A `StorageValue` is the IR handle for a symbol's memory. The context that owns the
//! symbol -> storage map is passed explicitly into every lowering call; the object-list
//! lowering only reads it and, for host associated symbols, adds keys for values that
//! already exist.

use crate::lower_log;
use crate::omp_frontend::symbols::SymbolId;
use crate::projects::settings::LoweringConfig;
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StorageValue(pub u32);

/// What the object-list lowering needs from whoever owns the storage bindings.
pub trait ConversionContext {
    /// The storage bound to `symbol` in the current lowering scope.
    fn symbol_address(&self, symbol: SymbolId) -> Option<StorageValue>;

    /// Make `target` share the storage currently bound to `src`.
    /// The new binding lasts until the innermost lowering scope is popped.
    fn copy_symbol_binding(&mut self, src: SymbolId, target: SymbolId);
}

/// A stack of symbol maps, one per lowering scope.
/// Lookups walk from the innermost scope outwards.
#[derive(Debug)]
pub struct LoweringContext {
    scopes: Vec<FxHashMap<SymbolId, StorageValue>>,
    treat_index_as_section: bool,
}

impl LoweringContext {
    pub fn new(config: &LoweringConfig) -> Self {
        LoweringContext {
            scopes: vec![FxHashMap::default()],
            treat_index_as_section: config.treat_index_as_section,
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pops the innermost scope. The outermost scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Binds `symbol` to `value` in the innermost scope.
    /// Only the owner of the storage (the driver allocating it) should call this.
    pub fn bind_symbol(&mut self, symbol: SymbolId, value: StorageValue) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(symbol, value);
        }
    }

    /// In data clauses, treat `a(N)` as the one element section `a(N:N)`.
    /// Read by the clause processing that interprets array element operands.
    pub fn treat_index_as_section(&self) -> bool {
        self.treat_index_as_section
    }
}

impl ConversionContext for LoweringContext {
    fn symbol_address(&self, symbol: SymbolId) -> Option<StorageValue> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&symbol))
            .copied()
    }

    fn copy_symbol_binding(&mut self, src: SymbolId, target: SymbolId) {
        let Some(value) = self.symbol_address(src) else {
            lower_log!(Yellow "No storage to copy from ", {format!("{src:?}")});
            return;
        };

        lower_log!("Binding ", {format!("{target:?} to the storage of {src:?}")});
        self.bind_symbol(target, value);
    }
}

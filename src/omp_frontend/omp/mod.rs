//! Lowering helpers for the object lists of OpenMP clauses.
//!
//! - `object_symbol` finds the symbol a clause item names
//! - `object_list` turns an object list into the storage operands of the enclosing operation
//! - `declare_target` tags the symbols of a declare target clause with their capture clause
//!
//! All three preserve source order, so callers can correlate results with clause items
//! by position.

pub(crate) mod declare_target;
pub(crate) mod object_list;
pub(crate) mod object_symbol;

#[cfg(test)]
mod tests;

use crate::omp_frontend::compiler_errors::CompilerError;
use crate::omp_frontend::compiler_warnings::{CompilerWarning, WarningKind};
use crate::omp_frontend::parse_tree::OmpObject;
use crate::omp_frontend::string_interning::StringTable;
use crate::omp_frontend::symbols::SymbolTable;
use crate::projects::settings::MissingObjectPolicy;
use crate::return_lowering_error;

pub use declare_target::{DeclareTargetCaptureClause, DeclareTargetCapturePair};
pub use object_symbol::{get_omp_object_name, get_omp_object_symbol};

/// Why a clause item produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingObject {
    /// The item's shape names no symbol, or its name was never bound to one
    UnresolvedReference,

    /// The item's symbol has no storage and no host association that has storage
    MissingStorage,
}

/// Shared state for lowering the object lists of one directive.
///
/// The symbol table is read only. Diagnostics for items that were skipped
/// under `MissingObjectPolicy::Skip` are collected in `warnings`.
pub struct OmpObjectLowering<'a> {
    pub(crate) symbols: &'a SymbolTable,
    pub(crate) string_table: &'a StringTable,
    pub(crate) policy: MissingObjectPolicy,
    pub(crate) warnings: Vec<CompilerWarning>,
}

impl<'a> OmpObjectLowering<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        string_table: &'a StringTable,
        policy: MissingObjectPolicy,
    ) -> Self {
        OmpObjectLowering {
            symbols,
            string_table,
            policy,
            warnings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> &[CompilerWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<CompilerWarning> {
        self.warnings
    }

    /// Applies the missing object policy to a clause item that produced nothing.
    /// Returns an error under `MissingObjectPolicy::Error`, otherwise records a warning.
    pub(crate) fn missing_object(
        &mut self,
        omp_object: &OmpObject,
        reason: MissingObject,
        clause_name: &str,
    ) -> Result<(), CompilerError> {
        let item = omp_object.to_source_string(self.string_table);
        let location = omp_object.location();

        match self.policy {
            MissingObjectPolicy::Error => match reason {
                MissingObject::UnresolvedReference => {
                    return_lowering_error!(
                        format!("'{item}' in the {clause_name} clause does not name a variable"),
                        location,
                        {
                            VariableName => item.as_str(),
                            ClauseName => clause_name,
                            CompilationStage => "OpenMP object list",
                            PrimarySuggestion => "Clause items must be variables, array elements or structure components",
                        }
                    )
                }
                MissingObject::MissingStorage => {
                    return_lowering_error!(
                        format!("'{item}' in the {clause_name} clause has no storage in this scope"),
                        location,
                        {
                            VariableName => item.as_str(),
                            ClauseName => clause_name,
                            CompilationStage => "OpenMP object list",
                        }
                    )
                }
            },

            MissingObjectPolicy::Skip => {
                let warning_kind = match reason {
                    MissingObject::UnresolvedReference => WarningKind::UnresolvedObject,
                    MissingObject::MissingStorage => WarningKind::MissingStorage,
                };
                self.warnings
                    .push(CompilerWarning::new(item, location, warning_kind));
                Ok(())
            }
        }
    }
}

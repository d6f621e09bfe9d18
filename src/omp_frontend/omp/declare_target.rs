use crate::lower_log;
use crate::omp_frontend::compiler_errors::CompilerError;
use crate::omp_frontend::omp::{MissingObject, OmpObjectLowering};
use crate::omp_frontend::parse_tree::OmpObject;
use crate::omp_frontend::symbols::SymbolId;
use serde::{Deserialize, Serialize};

/// The clause of a declare target directive that asked for a symbol
/// to be made available on the offload target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclareTargetCaptureClause {
    To,
    Link,
    Enter,
}

impl DeclareTargetCaptureClause {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclareTargetCaptureClause::To => "to",
            DeclareTargetCaptureClause::Link => "link",
            DeclareTargetCaptureClause::Enter => "enter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeclareTargetCapturePair {
    pub clause: DeclareTargetCaptureClause,
    pub symbol: SymbolId,
}

impl OmpObjectLowering<'_> {
    /// Tags every whole variable or procedure named in a declare target clause with `clause`.
    ///
    /// Only bare names (or designators that are just a name) are captured. Array elements
    /// and structure components contribute nothing. The result keeps the clause's order and
    /// is not deduplicated; merging captures across clauses is the caller's job.
    pub fn gather_func_and_var_syms(
        &mut self,
        object_list: &[OmpObject],
        clause: DeclareTargetCaptureClause,
    ) -> Result<Vec<DeclareTargetCapturePair>, CompilerError> {
        let mut symbol_and_clause = Vec::with_capacity(object_list.len());

        for omp_object in object_list {
            let name = match omp_object {
                OmpObject::Designator(designator) => designator.data_ref_name(),
                OmpObject::Name(name) => Some(name),
                OmpObject::ArrayElement(_) | OmpObject::StructureComponent(_) => None,
            };

            let Some(name) = name else {
                lower_log!(Dark Yellow "Not capturing non-name clause item in ", {clause.as_str()});
                continue;
            };

            match name.symbol {
                Some(symbol) => symbol_and_clause.push(DeclareTargetCapturePair { clause, symbol }),
                None => self.missing_object(
                    omp_object,
                    MissingObject::UnresolvedReference,
                    clause.as_str(),
                )?,
            }
        }

        Ok(symbol_and_clause)
    }
}

use crate::lower_log;
use crate::omp_frontend::compiler_errors::CompilerError;
use crate::omp_frontend::conversion_context::{ConversionContext, StorageValue};
use crate::omp_frontend::omp::object_symbol::get_omp_object_symbol;
use crate::omp_frontend::omp::{MissingObject, OmpObjectLowering};
use crate::omp_frontend::parse_tree::OmpObject;
use crate::omp_frontend::symbols::SymbolId;
use crate::return_compiler_error;

impl OmpObjectLowering<'_> {
    /// Lowers a clause's object list to the storage operands of the enclosing operation.
    ///
    /// Operands come out in the same order as the clause items. A symbol without storage of
    /// its own uses the storage of the symbol it is host associated with, and that binding is
    /// copied onto the symbol in `converter` so later lookups find it directly.
    ///
    /// Items that produce no operand are handled by the missing object policy:
    /// an error for the first one, or a warning and no operand for each of them.
    pub fn gen_object_list(
        &mut self,
        object_list: &[OmpObject],
        clause_name: &str,
        converter: &mut impl ConversionContext,
    ) -> Result<Vec<StorageValue>, CompilerError> {
        let mut operands = Vec::with_capacity(object_list.len());

        for omp_object in object_list {
            let Some(symbol) = get_omp_object_symbol(omp_object) else {
                self.missing_object(omp_object, MissingObject::UnresolvedReference, clause_name)?;
                continue;
            };

            match self.symbol_operand(symbol, converter)? {
                Some(operand) => operands.push(operand),
                None => {
                    self.missing_object(omp_object, MissingObject::MissingStorage, clause_name)?
                }
            }
        }

        Ok(operands)
    }

    fn symbol_operand(
        &self,
        symbol: SymbolId,
        converter: &mut impl ConversionContext,
    ) -> Result<Option<StorageValue>, CompilerError> {
        if let Some(variable) = converter.symbol_address(symbol) {
            return Ok(Some(variable));
        }

        let Some(symbol_entry) = self.symbols.get(symbol) else {
            return_compiler_error!("Clause item resolved to {:?}, which is not in the symbol table", symbol);
        };

        let Some(host_symbol) = symbol_entry.host_associated_symbol() else {
            return Ok(None);
        };

        let Some(variable) = converter.symbol_address(host_symbol) else {
            lower_log!(Yellow "Host associated symbol has no storage: ", {format!("{host_symbol:?}")});
            return Ok(None);
        };

        converter.copy_symbol_binding(host_symbol, symbol);
        Ok(Some(variable))
    }
}

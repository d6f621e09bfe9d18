use crate::omp_frontend::source_location::TextLocation;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerWarning {
    pub msg: String,
    pub location: TextLocation,
    pub warning_kind: WarningKind,
}

impl CompilerWarning {
    pub fn new(msg: impl Into<String>, location: TextLocation, warning_kind: WarningKind) -> Self {
        CompilerWarning {
            msg: msg.into(),
            location,
            warning_kind,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// A clause item had a shape that names no symbol and was left out of the operand list
    UnresolvedObject,

    /// A clause item named a symbol with no storage in the current lowering scope
    MissingStorage,
}

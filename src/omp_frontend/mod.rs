pub mod conversion_context;
pub mod omp;
pub mod parse_tree;
pub mod source_location;
pub mod string_interning;
pub mod symbols;

pub mod compiler_messages {
    pub mod compiler_dev_logging;
    pub mod compiler_errors;
    pub mod compiler_warnings;
    pub mod display_messages;
}
pub use compiler_messages::compiler_errors;
pub use compiler_messages::compiler_warnings;
pub use compiler_messages::display_messages;

/// Flags change how a lowering run behaves.
/// For the built-in CLI these are added as cli flags, and override the config file.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Flag {
    DisableWarnings,
    SkipMissingObjects,
    IndexAsElement,
    JsonOutput,
}

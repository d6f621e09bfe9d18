use crate::omp_frontend::compiler_errors::{
    CompilerError, CompilerMessages, ErrorMetaDataKey, ErrorType, error_type_to_str,
};
use crate::omp_frontend::compiler_warnings::{CompilerWarning, WarningKind};
use crate::omp_frontend::source_location::TextLocation;
use crate::omp_frontend::string_interning::StringTable;
use saying::say;
use std::path::{Path, PathBuf};
use std::{env, fs};

fn relative_display_path(path: &Path) -> String {
    match env::current_dir() {
        Ok(dir) => path
            .strip_prefix(&dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string(),
        Err(_) => path.to_string_lossy().to_string(),
    }
}

fn location_path(location: &TextLocation, string_table: &StringTable) -> Option<PathBuf> {
    location
        .file
        .and_then(|file| string_table.try_resolve(file))
        .map(PathBuf::from)
}

// Lines are zero based in TextLocation
fn source_line(path: &Path, line_number: usize) -> String {
    match fs::read_to_string(path) {
        Ok(file) => file
            .lines()
            .nth(line_number)
            .unwrap_or_default()
            .to_string(),
        Err(_) => String::new(),
    }
}

pub fn print_compiler_messages(messages: CompilerMessages, string_table: &StringTable) {
    for err in messages.errors {
        print_formatted_error(err, string_table);
    }

    for warning in messages.warnings {
        print_formatted_warning(warning, string_table);
    }
}

pub fn print_formatted_error(e: CompilerError, string_table: &StringTable) {
    let path = e
        .file_path
        .clone()
        .or_else(|| location_path(&e.location, string_table));
    let relative_dir = path
        .as_deref()
        .map(relative_display_path)
        .unwrap_or_default();

    match e.error_type {
        ErrorType::File => {
            say!(Yellow "Can't find/read file or directory: ", relative_dir);
            say!(e.msg);
            return;
        }

        ErrorType::Config => {
            say!(Yellow "CONFIG FILE ISSUE - ", Dark Magenta relative_dir);
            say!(Red e.msg);
            return;
        }

        ErrorType::Fixture => {
            say!(Yellow "FIXTURE ISSUE - ", Dark Magenta relative_dir);
            say!(Red e.msg);
            return;
        }

        ErrorType::Compiler => {
            say!(Yellow "COMPILER BUG - ");
            say!(Dark Yellow "lowering developer skill issue (not your fault)");
        }

        ErrorType::Lowering => {
            if !relative_dir.is_empty() {
                say!("\n", Dark Magenta relative_dir);
            }
            let error_kind = error_type_to_str(&e.error_type);
            say!(Red error_kind);
        }
    }

    let line_number = e.location.start_pos.line_number.max(0) as usize;
    say!(Dark Magenta "Line ", Bright {line_number + 1});
    say!(Red e.msg);

    if let Some(stage) = e.metadata.get(&ErrorMetaDataKey::CompilationStage) {
        say!(Dark Yellow "While lowering: ", stage);
    }
    if let Some(suggestion) = e.metadata.get(&ErrorMetaDataKey::PrimarySuggestion) {
        say!(Green "Suggestion: ", suggestion);
    }

    let Some(path) = path else {
        return;
    };

    let line = source_line(&path, line_number);
    if line.is_empty() {
        return;
    }

    println!("\n{line}");

    // spaces before the relevant part of the line
    print!(
        "{}",
        " ".repeat((e.location.start_pos.char_column - 1).max(0) as usize)
    );

    let length_of_underline =
        (e.location.end_pos.char_column - e.location.start_pos.char_column + 1).max(1) as usize;
    say!(Red { "^".repeat(length_of_underline) });
}

pub fn print_formatted_warning(w: CompilerWarning, string_table: &StringTable) {
    say!(Yellow "WARNING: ");

    if let Some(path) = location_path(&w.location, string_table) {
        let relative_path = relative_display_path(&path);
        say!("File: ", relative_path);
    }

    match w.warning_kind {
        WarningKind::UnresolvedObject => {
            say!("Clause item left out of the operand list (no symbol): ", w.msg);
        }
        WarningKind::MissingStorage => {
            say!("Clause item left out of the operand list (no storage): ", w.msg);
        }
    }

    say!(Dark Magenta "Line ", Bright {w.location.start_pos.line_number + 1});
}

use crate::omp_frontend::string_interning::StringId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct CharPosition {
    pub line_number: i32,
    pub char_column: i32,
}

/// Where a clause item came from.
/// `file` is the interned path of the source file, when one is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TextLocation {
    pub file: Option<StringId>,
    pub start_pos: CharPosition,
    pub end_pos: CharPosition,
}

impl TextLocation {
    pub fn new(file: Option<StringId>, start: CharPosition, end: CharPosition) -> Self {
        Self {
            file,
            start_pos: start,
            end_pos: end,
        }
    }

    pub fn new_just_line(line: i32) -> Self {
        Self {
            file: None,
            start_pos: CharPosition {
                line_number: line,
                char_column: 0,
            },
            end_pos: CharPosition {
                line_number: line,
                char_column: 120, // Arbitrary number
            },
        }
    }
}

//! Parse-tree shapes for the objects named in a directive clause.
//!
//! These are the only shapes a clause item can take once the clause grammar has been parsed:
//! a bare name, an array element, a structure component, or a designator wrapping one of those.
//! Every `Name` carries the symbol that semantic analysis bound it to (if any).

use crate::omp_frontend::source_location::TextLocation;
use crate::omp_frontend::string_interning::{StringId, StringTable};
use crate::omp_frontend::symbols::SymbolId;

/// A name as written in the source, plus the symbol semantics resolved it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name {
    pub source: StringId,
    pub symbol: Option<SymbolId>,
    pub location: TextLocation,
}

impl Name {
    pub fn new(source: StringId, symbol: Option<SymbolId>, location: TextLocation) -> Self {
        Name {
            source,
            symbol,
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    IntLiteral(i64),
    Variable(DataRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscript {
    Index(Expr),
    Triplet {
        lower: Option<Expr>,
        upper: Option<Expr>,
        stride: Option<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRef {
    Name(Name),
    ArrayElement(Box<ArrayElement>),
    StructureComponent(Box<StructureComponent>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayElement {
    pub base: DataRef,
    pub subscripts: Vec<Subscript>,
}

/// `base%component`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureComponent {
    pub base: DataRef,
    pub component: Name,
}

/// `parent(lower:upper)` on a character variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substring {
    pub parent: DataRef,
    pub lower: Option<Expr>,
    pub upper: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Designator {
    DataRef(DataRef),
    Substring(Substring),
}

/// One item of a directive clause's object list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmpObject {
    Name(Name),
    ArrayElement(ArrayElement),
    StructureComponent(StructureComponent),
    Designator(Designator),
}

impl DataRef {
    /// The leftmost name of a data reference.
    /// For `s%arr(i)` this is `s`, for `a(i)` it is `a`.
    pub fn first_name(&self) -> &Name {
        match self {
            DataRef::Name(name) => name,
            DataRef::ArrayElement(element) => element.base.first_name(),
            DataRef::StructureComponent(component) => component.base.first_name(),
        }
    }

    fn render(&self, string_table: &StringTable, out: &mut String) {
        match self {
            DataRef::Name(name) => out.push_str(string_table.resolve(name.source)),
            DataRef::ArrayElement(element) => element.render(string_table, out),
            DataRef::StructureComponent(component) => component.render(string_table, out),
        }
    }
}

impl ArrayElement {
    fn render(&self, string_table: &StringTable, out: &mut String) {
        self.base.render(string_table, out);
        out.push('(');
        for (index, subscript) in self.subscripts.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            subscript.render(string_table, out);
        }
        out.push(')');
    }
}

impl StructureComponent {
    fn render(&self, string_table: &StringTable, out: &mut String) {
        self.base.render(string_table, out);
        out.push('%');
        out.push_str(string_table.resolve(self.component.source));
    }
}

impl Subscript {
    fn render(&self, string_table: &StringTable, out: &mut String) {
        match self {
            Subscript::Index(expr) => expr.render(string_table, out),
            Subscript::Triplet {
                lower,
                upper,
                stride,
            } => {
                render_optional(lower, string_table, out);
                out.push(':');
                render_optional(upper, string_table, out);
                if let Some(stride) = stride {
                    out.push(':');
                    stride.render(string_table, out);
                }
            }
        }
    }
}

impl Expr {
    fn render(&self, string_table: &StringTable, out: &mut String) {
        match self {
            Expr::IntLiteral(value) => out.push_str(&value.to_string()),
            Expr::Variable(data_ref) => data_ref.render(string_table, out),
        }
    }
}

fn render_optional(expr: &Option<Expr>, string_table: &StringTable, out: &mut String) {
    if let Some(expr) = expr {
        expr.render(string_table, out);
    }
}

impl Designator {
    pub fn unwrap_array_element(&self) -> Option<&ArrayElement> {
        match self {
            Designator::DataRef(DataRef::ArrayElement(element)) => Some(element),
            _ => None,
        }
    }

    pub fn unwrap_structure_component(&self) -> Option<&StructureComponent> {
        match self {
            Designator::DataRef(DataRef::StructureComponent(component)) => Some(component),
            _ => None,
        }
    }

    /// The name of a designator that is nothing more than a plain data reference.
    pub fn data_ref_name(&self) -> Option<&Name> {
        match self {
            Designator::DataRef(DataRef::Name(name)) => Some(name),
            _ => None,
        }
    }

    fn leading_name(&self) -> &Name {
        match self {
            Designator::DataRef(data_ref) => data_ref.first_name(),
            Designator::Substring(substring) => substring.parent.first_name(),
        }
    }

    fn render(&self, string_table: &StringTable, out: &mut String) {
        match self {
            Designator::DataRef(data_ref) => data_ref.render(string_table, out),
            Designator::Substring(substring) => {
                substring.parent.render(string_table, out);
                out.push('(');
                render_optional(&substring.lower, string_table, out);
                out.push(':');
                render_optional(&substring.upper, string_table, out);
                out.push(')');
            }
        }
    }
}

impl OmpObject {
    /// Source location of the clause item, taken from its leading name.
    pub fn location(&self) -> TextLocation {
        match self {
            OmpObject::Name(name) => name.location,
            OmpObject::ArrayElement(element) => element.base.first_name().location,
            OmpObject::StructureComponent(component) => component.base.first_name().location,
            OmpObject::Designator(designator) => designator.leading_name().location,
        }
    }

    /// The clause item as it would be written in source, for diagnostics.
    pub fn to_source_string(&self, string_table: &StringTable) -> String {
        let mut out = String::new();
        match self {
            OmpObject::Name(name) => out.push_str(string_table.resolve(name.source)),
            OmpObject::ArrayElement(element) => element.render(string_table, &mut out),
            OmpObject::StructureComponent(component) => component.render(string_table, &mut out),
            OmpObject::Designator(designator) => designator.render(string_table, &mut out),
        }
        out
    }
}

use crate::omp_frontend::parse_tree::{ArrayElement, Designator, Name, OmpObject};
use crate::omp_frontend::symbols::SymbolId;

/// The name a clause item stands for.
///
/// - `a` names `a`
/// - `a(i)` names the array `a`, never a subscript
/// - `s%field` names the component `field`, not the aggregate `s`
/// - a designator is unwrapped first and then treated the same way
///
/// Anything else (a substring, or a designator wrapping some other shape) names nothing.
pub fn get_omp_object_name(omp_object: &OmpObject) -> Option<&Name> {
    match omp_object {
        OmpObject::Name(name) => Some(name),
        OmpObject::ArrayElement(array_element) => Some(array_base_name(array_element)),
        OmpObject::StructureComponent(component) => Some(&component.component),
        OmpObject::Designator(designator) => designator_name(designator),
    }
}

/// The symbol a clause item resolves to.
/// `None` when the item names nothing or its name was never bound by semantics.
pub fn get_omp_object_symbol(omp_object: &OmpObject) -> Option<SymbolId> {
    get_omp_object_name(omp_object).and_then(|name| name.symbol)
}

fn designator_name(designator: &Designator) -> Option<&Name> {
    if let Some(array_element) = designator.unwrap_array_element() {
        Some(array_base_name(array_element))
    } else if let Some(component) = designator.unwrap_structure_component() {
        Some(&component.component)
    } else {
        designator.data_ref_name()
    }
}

fn array_base_name(array_element: &ArrayElement) -> &Name {
    array_element.base.first_name()
}

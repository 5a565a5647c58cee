//! Linked type names, anchors and the primitive URL table.
use crate::casing::title_case;
use crate::ir::{Primitive, Resolved, Service, Target, TypeRef};

const STRING_URL: &str =
    "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String";
const NUMBER_URL: &str =
    "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Number";
const BOOLEAN_URL: &str =
    "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Boolean";
const DATE_URL: &str =
    "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Date";
const NULL_URL: &str =
    "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Operators/null";

/// In-document link target for a heading: lowercase, spaces to hyphens, `#`-prefixed.
pub fn anchor(display_name: &str) -> String {
    format!("#{}", display_name.to_lowercase().replace(' ', "-"))
}

pub fn primitive_url(primitive: &Primitive) -> Option<&'static str> {
    match primitive {
        Primitive::String => Some(STRING_URL),
        Primitive::Number
        | Primitive::Integer
        | Primitive::Long
        | Primitive::Float
        | Primitive::Double => Some(NUMBER_URL),
        Primitive::Boolean => Some(BOOLEAN_URL),
        Primitive::Date | Primitive::DateTime => Some(DATE_URL),
        Primitive::Null => Some(NULL_URL),
        Primitive::Untyped | Primitive::Other(_) => None,
    }
}

/// Heading text for a named entity.
pub fn display_name(name: &str) -> String {
    title_case(name)
}

/// Escape characters that Markdown would read as HTML or link syntax.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '<' | '>' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Render a reference as Markdown, flattening unions into `|`-joined members.
///
/// The array suffix is attached once, to the outermost reference.
pub fn type_link(service: &Service, ty: &TypeRef) -> String {
    let mut unions = Vec::new();
    let inner = link(service, ty, &mut unions);
    if !ty.is_array {
        return inner;
    }
    match &ty.target {
        Target::Named { name } if is_union(service, name) => format!("({inner}){}", escape("[]")),
        _ => inner,
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn is_union(service: &Service, name: &str) -> bool {
    matches!(service.resolve(name), Some(Resolved::Union(_)))
}

// `unions` is the chain of unions currently being flattened; a union that
// contains itself is linked instead of expanded again.
fn link<'a>(service: &'a Service, ty: &'a TypeRef, unions: &mut Vec<&'a str>) -> String {
    let suffix = if ty.is_array && unions.is_empty() { "[]" } else { "" };
    match &ty.target {
        Target::Primitive { primitive } => {
            let text = escape(&format!("<{}>{suffix}", primitive.as_str()));
            match primitive_url(primitive) {
                Some(url) => format!("[{text}]({url})"),
                None => text,
            }
        }
        Target::Named { name } => match service.resolve(name) {
            Some(Resolved::Union(union)) if !unions.contains(&name.as_str()) => {
                unions.push(name);
                let members = union
                    .members
                    .iter()
                    .map(|member| link(service, member, unions))
                    .collect::<Vec<_>>();
                unions.pop();
                members.join(" | ")
            }
            _ => {
                let display = display_name(name);
                format!("[{}]({})", escape(&format!("<{display}>{suffix}")), anchor(&display))
            }
        },
    }
}

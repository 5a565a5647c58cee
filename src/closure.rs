//! Per-interface closure of the types, enums and unions reachable from its
//! method signatures, split by whether they were reached from a parameter
//! (input) or from a return value (output).
//!
//! The type graph may be cyclic. Each direction keeps its own visited set
//! keyed by entity name, so every entity is entered at most once per
//! direction and traversal always terminates.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::ir::{Enum, Interface, Resolved, Service, Type, TypeRef, Union};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// Entities reached in one direction, in discovery order.
#[derive(Debug, Default)]
struct Reached<'a> {
    visited: HashSet<&'a str>,
    types: IndexMap<&'a str, &'a Type>,
    enums: IndexMap<&'a str, &'a Enum>,
    unions: IndexMap<&'a str, &'a Union>,
}

#[derive(Debug)]
pub struct Closure<'a> {
    input: Reached<'a>,
    output: Reached<'a>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl<'a> Closure<'a> {
    pub fn resolve(service: &'a Service, interface: &'a Interface) -> Self {
        let mut closure = Closure { input: Reached::default(), output: Reached::default() };
        for method in &interface.methods {
            for param in &method.parameters {
                closure.visit(service, &param.ty, Direction::Input);
            }
            if let Some(ret) = &method.return_type {
                closure.visit(service, &ret.ty, Direction::Output);
            }
        }
        tracing::debug!(
            interface = %interface.name,
            input_types = closure.input.types.len(),
            output_types = closure.output.types.len(),
            enums = closure.enums().len(),
            unions = closure.unions().len(),
            "resolved closure"
        );
        closure
    }

    fn visit(&mut self, service: &'a Service, ty: &'a TypeRef, direction: Direction) {
        let Some(name) = ty.type_name() else { return };
        let reached = match direction {
            Direction::Input => &mut self.input,
            Direction::Output => &mut self.output,
        };
        if reached.visited.contains(name) {
            return;
        }
        let pending: Vec<&'a TypeRef> = match service.resolve(name) {
            Some(Resolved::Type(t)) => {
                reached.visited.insert(name);
                reached.types.insert(name, t);
                let mut refs: Vec<&TypeRef> = t.properties.iter().map(|p| &p.ty).collect();
                if let Some(map) = &t.map_properties {
                    refs.push(&map.key);
                    refs.push(&map.value);
                }
                refs
            }
            Some(Resolved::Union(u)) => {
                reached.visited.insert(name);
                reached.unions.insert(name, u);
                u.members.iter().collect()
            }
            Some(Resolved::Enum(e)) => {
                reached.visited.insert(name);
                reached.enums.insert(name, e);
                Vec::new()
            }
            // dangling reference: nothing to add
            None => Vec::new(),
        };
        for next in pending {
            self.visit(service, next, direction);
        }
    }

    pub fn input_types(&self) -> Vec<&'a Type> {
        sorted(&self.input.types)
    }

    pub fn output_types(&self) -> Vec<&'a Type> {
        sorted(&self.output.types)
    }

    /// Input and output types, one entry per name.
    pub fn types(&self) -> Vec<&'a Type> {
        merged(&self.input.types, &self.output.types)
    }

    pub fn input_enums(&self) -> Vec<&'a Enum> {
        sorted(&self.input.enums)
    }

    pub fn output_enums(&self) -> Vec<&'a Enum> {
        sorted(&self.output.enums)
    }

    pub fn enums(&self) -> Vec<&'a Enum> {
        merged(&self.input.enums, &self.output.enums)
    }

    pub fn input_unions(&self) -> Vec<&'a Union> {
        sorted(&self.input.unions)
    }

    pub fn output_unions(&self) -> Vec<&'a Union> {
        sorted(&self.output.unions)
    }

    pub fn unions(&self) -> Vec<&'a Union> {
        merged(&self.input.unions, &self.output.unions)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn sorted<'a, T>(map: &IndexMap<&'a str, &'a T>) -> Vec<&'a T> {
    let mut entries: Vec<(&str, &'a T)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(_, v)| v).collect()
}

fn merged<'a, T>(a: &IndexMap<&'a str, &'a T>, b: &IndexMap<&'a str, &'a T>) -> Vec<&'a T> {
    let mut all: IndexMap<&'a str, &'a T> = a.clone();
    for (k, v) in b {
        all.entry(*k).or_insert(*v);
    }
    sorted(&all)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(v: serde_json::Value) -> Service {
        Service::from_json_str(&v.to_string()).unwrap()
    }

    fn names<T>(xs: &[&T], name: impl Fn(&T) -> &str) -> Vec<String> {
        xs.iter().map(|x| name(x).to_string()).collect()
    }

    fn type_names(xs: &[&Type]) -> Vec<String> {
        names(xs, |t| t.name.as_str())
    }

    #[test]
    fn self_referencing_type_appears_once() {
        let svc = service(json!({
            "title": "Lists",
            "interfaces": [{ "name": "list", "methods": [
                { "name": "push", "parameters": [{ "name": "node", "typeName": "Node" }] }
            ]}],
            "types": [{ "name": "Node", "properties": [
                { "name": "next", "typeName": "Node" },
                { "name": "value", "primitive": "string" }
            ]}]
        }));
        let closure = Closure::resolve(&svc, &svc.interfaces[0]);
        assert_eq!(type_names(&closure.input_types()), ["Node"]);
        assert!(closure.output_types().is_empty());
    }

    #[test]
    fn mutual_recursion_terminates() {
        let svc = service(json!({
            "title": "Tree",
            "interfaces": [{ "name": "tree", "methods": [
                { "name": "get", "returnType": { "typeName": "Tree" } }
            ]}],
            "types": [
                { "name": "Tree", "properties": [{ "name": "root", "typeName": "Branch" }] },
                { "name": "Branch", "properties": [
                    { "name": "children", "typeName": "Leaf", "isArray": true },
                    { "name": "tree", "typeName": "Tree" }
                ]}
            ],
            "unions": [{ "name": "Leaf", "members": [
                { "typeName": "Branch" },
                { "primitive": "string" }
            ]}]
        }));
        let closure = Closure::resolve(&svc, &svc.interfaces[0]);
        assert_eq!(type_names(&closure.output_types()), ["Branch", "Tree"]);
        assert_eq!(names(&closure.output_unions(), |u| u.name.as_str()), ["Leaf"]);
        assert!(closure.input_types().is_empty());
    }

    #[test]
    fn inputs_and_outputs_are_partitioned() {
        let svc = service(json!({
            "title": "Widgets",
            "interfaces": [{ "name": "widget", "methods": [
                { "name": "create",
                  "parameters": [{ "name": "input", "typeName": "Widget", "isRequired": true }],
                  "returnType": { "typeName": "WidgetReceipt" } },
                { "name": "list", "returnType": { "typeName": "Widget", "isArray": true } }
            ]}],
            "types": [
                { "name": "Widget", "properties": [{ "name": "color", "typeName": "Color" }] },
                { "name": "WidgetReceipt", "properties": [{ "name": "id", "primitive": "string" }] }
            ],
            "enums": [{ "name": "Color", "values": ["red"] }]
        }));
        let closure = Closure::resolve(&svc, &svc.interfaces[0]);
        assert_eq!(type_names(&closure.input_types()), ["Widget"]);
        assert_eq!(type_names(&closure.output_types()), ["Widget", "WidgetReceipt"]);
        assert_eq!(type_names(&closure.types()), ["Widget", "WidgetReceipt"]);
        assert_eq!(names(&closure.input_enums(), |e| e.name.as_str()), ["Color"]);
        assert_eq!(names(&closure.output_enums(), |e| e.name.as_str()), ["Color"]);
        assert_eq!(names(&closure.enums(), |e| e.name.as_str()), ["Color"]);
    }

    #[test]
    fn dangling_references_are_skipped() {
        let svc = service(json!({
            "title": "Ghosts",
            "interfaces": [{ "name": "ghost", "methods": [
                { "name": "haunt", "parameters": [{ "name": "who", "typeName": "Haunt" }] }
            ]}],
            "types": [{ "name": "Haunt", "properties": [
                { "name": "spirit", "typeName": "Ghost" }
            ]}]
        }));
        let closure = Closure::resolve(&svc, &svc.interfaces[0]);
        assert_eq!(type_names(&closure.types()), ["Haunt"]);
        assert!(closure.enums().is_empty());
        assert!(closure.unions().is_empty());
    }

    #[test]
    fn map_properties_are_followed() {
        let svc = service(json!({
            "title": "Maps",
            "interfaces": [{ "name": "index", "methods": [
                { "name": "get", "returnType": { "typeName": "Index" } }
            ]}],
            "types": [
                { "name": "Index", "mapProperties": {
                    "key": { "typeName": "Region" }, "value": { "typeName": "Entry" } } },
                { "name": "Entry" }
            ],
            "enums": [{ "name": "Region", "values": ["eu", "us"] }]
        }));
        let closure = Closure::resolve(&svc, &svc.interfaces[0]);
        assert_eq!(type_names(&closure.output_types()), ["Entry", "Index"]);
        assert_eq!(names(&closure.output_enums(), |e| e.name.as_str()), ["Region"]);
    }

    #[test]
    fn ordering_is_lexicographic_and_repeatable() {
        let svc = service(json!({
            "title": "Order",
            "interfaces": [{ "name": "order", "methods": [
                { "name": "m", "parameters": [
                    { "name": "z", "typeName": "Zed" },
                    { "name": "a", "typeName": "apple" },
                    { "name": "b", "typeName": "Banana" }
                ]}
            ]}],
            "types": [{ "name": "Zed" }, { "name": "apple" }, { "name": "Banana" }]
        }));
        let first = type_names(&Closure::resolve(&svc, &svc.interfaces[0]).types());
        let second = type_names(&Closure::resolve(&svc, &svc.interfaces[0]).types());
        assert_eq!(first, ["Banana", "Zed", "apple"]);
        assert_eq!(first, second);
    }
}

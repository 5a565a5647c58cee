//! Markdown reference document for one interface.
//!
//! `Document::lines` builds a fresh lazy iterator on every call, so rendering
//! the same document twice yields the same lines and no state is shared
//! between calls.
pub mod links;
pub mod rules;

use std::iter;

use crate::closure::Closure;
use crate::ir::{Description, Enum, Interface, Method, Parameter, Service, Type};

use links::{anchor, display_name, type_link};

type Lines<'d> = Box<dyn Iterator<Item = String> + 'd>;

pub struct Document<'a> {
    service: &'a Service,
    interface: &'a Interface,
    closure: Closure<'a>,
    banner: Vec<String>,
}

impl<'a> Document<'a> {
    pub fn new(service: &'a Service, interface: &'a Interface, closure: Closure<'a>) -> Self {
        Self { service, interface, closure, banner: Vec::new() }
    }

    /// Opaque lines placed before the title.
    pub fn with_banner(mut self, banner: Vec<String>) -> Self {
        self.banner = banner;
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let sections: [Lines<'_>; 7] = [
            Box::new(self.banner.iter().cloned()),
            Box::new(self.title()),
            Box::new(paragraphs(self.interface.description.as_ref())),
            Box::new(self.table_of_contents()),
            Box::new(self.methods_section()),
            Box::new(self.types_section()),
            Box::new(self.enums_section()),
        ];
        sections.into_iter().flatten()
    }

    pub fn to_markdown(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    // ------------------------------- Sections ------------------------------ //

    fn title(&self) -> impl Iterator<Item = String> + '_ {
        [format!("# {}", display_name(&self.interface.name)), String::new()].into_iter()
    }

    fn methods(&self) -> Vec<&'a Method> {
        let mut methods: Vec<&Method> = self.interface.methods.iter().collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
    }

    // Types and enums are listed in closure (entity name) order so every entry
    // lines up with its section below.
    fn table_of_contents(&self) -> Lines<'_> {
        let groups: [(&str, Vec<&'a str>); 3] = [
            ("Methods", self.methods().into_iter().map(|m| m.name.as_str()).collect()),
            ("Types", self.closure.types().into_iter().map(|t| t.name.as_str()).collect()),
            ("Enums", self.closure.enums().into_iter().map(|e| e.name.as_str()).collect()),
        ];
        if groups.iter().all(|(_, names)| names.is_empty()) {
            return Box::new(iter::empty());
        }
        let entries = groups.into_iter().filter(|(_, names)| !names.is_empty()).flat_map(
            |(heading, names)| {
                iter::once(toc_entry(heading, 0))
                    .chain(names.into_iter().map(|name| toc_entry(&display_name(name), 1)))
            },
        );
        Box::new(entries.chain(iter::once(String::new())))
    }

    fn methods_section(&self) -> Lines<'_> {
        let methods = self.methods();
        if methods.is_empty() {
            return Box::new(iter::empty());
        }
        Box::new(
            heading(2, "Methods")
                .chain(methods.into_iter().flat_map(move |method| self.method(method))),
        )
    }

    fn method(&self, method: &'a Method) -> impl Iterator<Item = String> + '_ {
        let mut params: Vec<&Parameter> = method.parameters.iter().collect();
        params.sort_by(|a, b| a.name.cmp(&b.name));

        let params_block: Lines<'_> = if params.is_empty() {
            Box::new(iter::empty())
        } else {
            Box::new(
                params
                    .clone()
                    .into_iter()
                    .flat_map(move |param| self.parameter(param))
                    .chain(iter::once(String::new())),
            )
        };
        let returns = method.return_type.as_ref().map(|ret| {
            let desc = ret.description.as_ref().map(|d| format!(" - {}", d.inline()));
            format!("Returns: {}{}", type_link(self.service, &ret.ty), desc.unwrap_or_default())
        });

        heading(3, &display_name(&method.name))
            .chain([signature(method, &params), String::new()])
            .chain(params_block)
            .chain(returns.into_iter().flat_map(|line| [line, String::new()]))
            .chain(paragraphs(method.description.as_ref()))
    }

    /// Bullet for a parameter or property, followed by its rule bullets.
    fn parameter(&self, param: &'a Parameter) -> impl Iterator<Item = String> + use<'a> {
        let mut line = format!("- `{}` {}", param.name, type_link(self.service, &param.ty));
        if !param.is_required {
            line.push_str(" (optional)");
        }
        if let Some(desc) = &param.description {
            line.push_str(" - ");
            line.push_str(&desc.inline());
        }
        iter::once(line).chain(rules::bullets(&param.rules))
    }

    fn types_section(&self) -> Lines<'_> {
        let types = self.closure.types();
        if types.is_empty() {
            return Box::new(iter::empty());
        }
        Box::new(heading(2, "Types").chain(types.into_iter().flat_map(move |ty| self.ty(ty))))
    }

    fn ty(&self, ty: &'a Type) -> impl Iterator<Item = String> + '_ {
        let properties: Lines<'_> = if ty.properties.is_empty() {
            Box::new(iter::empty())
        } else {
            Box::new(
                ty.properties
                    .iter()
                    .flat_map(move |prop| self.parameter(prop))
                    .chain(iter::once(String::new())),
            )
        };
        let map_properties = ty.map_properties.iter().flat_map(move |map| {
            [
                "**Map Properties**".to_string(),
                String::new(),
                format!("- Key: {}", type_link(self.service, &map.key)),
                format!("- Value: {}", type_link(self.service, &map.value)),
                String::new(),
            ]
        });
        heading(3, &display_name(&ty.name))
            .chain(paragraphs(ty.description.as_ref()))
            .chain(properties)
            .chain(map_properties)
    }

    fn enums_section(&self) -> Lines<'_> {
        let enums = self.closure.enums();
        if enums.is_empty() {
            return Box::new(iter::empty());
        }
        Box::new(heading(2, "Enums").chain(enums.into_iter().flat_map(enumeration)))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn enumeration(en: &Enum) -> impl Iterator<Item = String> + '_ {
    let values = en.values.iter().map(move |value| match en.value_description(value) {
        Some(desc) => format!("- `{value}` - {}", desc.inline()),
        None => format!("- `{value}`"),
    });
    let trailer = (!en.values.is_empty()).then(String::new);
    heading(3, &display_name(&en.name))
        .chain(paragraphs(en.description()))
        .chain(values)
        .chain(trailer)
}

fn heading(level: usize, text: &str) -> impl Iterator<Item = String> + use<> {
    [format!("{} {text}", "#".repeat(level)), String::new()].into_iter()
}

fn toc_entry(display: &str, depth: usize) -> String {
    format!("{}- [{display}]({})", "  ".repeat(depth), anchor(display))
}

/// Each paragraph as its own block.
fn paragraphs(desc: Option<&Description>) -> impl Iterator<Item = String> + '_ {
    desc.into_iter()
        .flat_map(|d| d.paragraphs())
        .flat_map(|p| [p.clone(), String::new()])
}

/// `name({ a, b? })`; a trailing `?` marks the whole argument optional
/// when no parameter is required.
fn signature(method: &Method, params: &[&Parameter]) -> String {
    if params.is_empty() {
        return format!("`{}()`", method.name);
    }
    let names = params
        .iter()
        .map(|p| if p.is_required { p.name.clone() } else { format!("{}?", p.name) })
        .collect::<Vec<_>>()
        .join(", ");
    let optional = if params.iter().any(|p| p.is_required) { "" } else { "?" };
    format!("`{}({{ {names} }}{optional})`", method.name)
}

// ------------------------------- Tests ------------------------------------ //

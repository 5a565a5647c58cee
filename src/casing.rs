//! Identifier casing used for headings, anchors and file names.
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\s_\-.]+").expect("separator regex is valid")
});

/// Split an identifier into words.
///
/// Boundaries are separators, a lower→upper transition (`widgetReceipt`),
/// the end of an acronym (`HTTPServer` → `HTTP`, `Server`) and letter↔digit.
pub fn words(ident: &str) -> Vec<String> {
    let mut out = Vec::new();
    for chunk in SEPARATORS.split(ident).filter(|s| !s.is_empty()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let (prev, cur) = (chars[i - 1], chars[i]);
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && cur.is_uppercase())
                || (prev.is_uppercase()
                    && cur.is_uppercase()
                    && next.is_some_and(char::is_lowercase))
                || (prev.is_alphabetic() && cur.is_ascii_digit())
                || (prev.is_ascii_digit() && cur.is_alphabetic());
            if boundary {
                out.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        out.push(chars[start..].iter().collect());
    }
    out
}

/// `widgetReceipt` → `Widget Receipt`
pub fn title_case(ident: &str) -> String {
    words(ident).iter().map(|w| capitalize(w)).collect::<Vec<_>>().join(" ")
}

/// `widgetReceipt` → `widget-receipt`
pub fn kebab_case(ident: &str) -> String {
    words(ident).iter().map(|w| w.to_lowercase()).collect::<Vec<_>>().join("-")
}

/// `widget_receipt` → `WidgetReceipt`
pub fn pascal_case(ident: &str) -> String {
    words(ident).iter().map(|w| capitalize(w)).collect()
}

// Acronyms keep their case; everything else gets a lowercase tail.
fn capitalize(word: &str) -> String {
    if word.chars().all(|c| !c.is_lowercase()) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

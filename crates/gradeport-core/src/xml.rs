//! Minimal XML infrastructure for the preset document formats.
//!
//! Writing goes through [`DocBuilder`]: encoders collect (tag, value) pairs,
//! absent values are filtered, and the document is serialized once. The
//! "omit if absent" rule lives here instead of being scattered across
//! per-field conditionals.
//!
//! Reading is a small structured walker that locates elements by name and
//! iterates quote-aware `key="value"` attributes, so it tolerates attribute
//! reordering and whitespace changes. A missing tag simply means an absent
//! field. This is not a general XML parser; it covers exactly the document
//! shapes the codec emits.

use std::collections::HashMap;
use std::fmt::Display;

/// Escape text for use in attribute values or element bodies.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape`]. Unknown entities pass through untouched.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let known = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
        ];
        if let Some((entity, ch)) = known.iter().find(|(e, _)| tail.starts_with(e)) {
            out.push(*ch);
            rest = &tail[entity.len()..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

// ============================================================================
// Writer
// ============================================================================

/// Structured builder for the metadata-namespaced preset documents.
///
/// Collects description attributes and child elements, then serializes the
/// whole document in one pass. `None` values never reach the output.
#[derive(Debug, Default)]
pub struct DocBuilder {
    attrs: Vec<(String, String)>,
    children: Vec<(String, String)>,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a description attribute; `None` is filtered out.
    pub fn attr<T: Display>(&mut self, name: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.attrs.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Add a text attribute, escaping the value; `None` is filtered out.
    pub fn attr_text(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.attrs.push((name.to_string(), escape(value)));
        }
        self
    }

    /// Add a child element with a pre-serialized body; empty bodies are
    /// filtered out (an empty curve never becomes an empty container).
    pub fn child(&mut self, name: &str, body: String) -> &mut Self {
        if !body.is_empty() {
            self.children.push((name.to_string(), body));
        }
        self
    }

    /// Add a child element whose body is a localized text alternative
    /// (the name/description convention of the preset formats).
    pub fn child_alt_text(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            let body = format!(
                "<rdf:Alt>\n     <rdf:li xml:lang=\"x-default\">{}</rdf:li>\n    </rdf:Alt>",
                escape(value)
            );
            self.children.push((name.to_string(), body));
        }
        self
    }

    /// Serialize the complete metadata-wrapped document.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str("<x:xmpmeta xmlns:x=\"adobe:ns:meta/\" x:xmptk=\"Gradeport\">\n");
        out.push_str(" <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n");
        out.push_str("  <rdf:Description rdf:about=\"\"\n");
        out.push_str("    xmlns:crs=\"http://ns.adobe.com/camera-raw-settings/1.0/\"");
        for (name, value) in &self.attrs {
            out.push_str(&format!("\n    {}=\"{}\"", name, value));
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
        } else {
            out.push_str(">\n");
            for (name, body) in &self.children {
                out.push_str(&format!("   <{}>{}</{}>\n", name, body, name));
            }
            out.push_str("  </rdf:Description>\n");
        }
        out.push_str(" </rdf:RDF>\n");
        out.push_str("</x:xmpmeta>\n");
        out
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Locate the open tag of the first element named `name`.
///
/// Returns (start of `<`, index just past the open tag's `>`, self-closing).
fn find_open_tag(text: &str, name: &str) -> Option<(usize, usize, bool)> {
    let needle = format!("<{}", name);
    let mut search_from = 0;
    loop {
        let rel = text[search_from..].find(&needle)?;
        let start = search_from + rel;
        let after_name = start + needle.len();
        // Require a real boundary so "Curve" never matches "CurveRed".
        match text[after_name..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => {
                let close_rel = text[after_name..].find('>')?;
                let close = after_name + close_rel;
                let self_closing = text[..close].ends_with('/');
                return Some((start, close + 1, self_closing));
            }
            _ => search_from = after_name,
        }
    }
}

/// Inner text of the first element named `name`, or `None` when absent.
/// Self-closing elements yield an empty string.
pub fn element_inner<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let (_, body_start, self_closing) = find_open_tag(text, name)?;
    if self_closing {
        return Some("");
    }
    let close_tag = format!("</{}>", name);
    let end = text[body_start..].find(&close_tag)?;
    Some(&text[body_start..body_start + end])
}

/// Inner texts of every sequential element named `name`.
///
/// Elements are scanned left to right; same-name nesting is not supported
/// (the codec's grammars never nest an element inside itself).
pub fn element_inners<'a>(text: &'a str, name: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut rest = text;
    let close_tag = format!("</{}>", name);
    while let Some((_, body_start, self_closing)) = find_open_tag(rest, name) {
        if self_closing {
            out.push("");
            rest = &rest[body_start..];
            continue;
        }
        let Some(end) = rest[body_start..].find(&close_tag) else {
            break;
        };
        out.push(&rest[body_start..body_start + end]);
        rest = &rest[body_start + end + close_tag.len()..];
    }
    out
}

/// Attributes of one element, with typed accessors.
#[derive(Debug, Default)]
pub struct Attrs(HashMap<String, String>);

impl Attrs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn get_text(&self, name: &str) -> Option<String> {
        self.get(name).map(unescape)
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name)?.trim().parse().ok()
    }

    pub fn get_u32(&self, name: &str) -> Option<u32> {
        self.get(name)?.trim().parse().ok()
    }

    pub fn get_u8(&self, name: &str) -> Option<u8> {
        self.get(name)?.trim().parse().ok()
    }

    /// The formats spell booleans "True"/"False".
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)?.trim() {
            "True" | "true" => Some(true),
            "False" | "false" => Some(false),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse the attributes of the first element named `name`.
///
/// Quote-aware and tolerant of attribute order, newlines, and extra
/// whitespace. Returns an empty set when the element is absent.
pub fn element_attrs(text: &str, name: &str) -> Attrs {
    let Some((start, open_end, _)) = find_open_tag(text, name) else {
        return Attrs::default();
    };
    let open_tag = &text[start..open_end];
    // Skip past "<name" to the attribute region.
    let attr_region = &open_tag[name.len() + 1..];
    Attrs(parse_attr_pairs(attr_region))
}

fn parse_attr_pairs(region: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    let mut chars = region.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() || c == '>' || c == '/' {
            continue;
        }
        // Attribute name runs to '='.
        let Some(eq_rel) = region[i..].find('=') else {
            break;
        };
        let name = region[i..i + eq_rel].trim().to_string();
        let after_eq = i + eq_rel + 1;
        let Some(quote_rel) = region[after_eq..].find('"') else {
            break;
        };
        let value_start = after_eq + quote_rel + 1;
        let Some(end_rel) = region[value_start..].find('"') else {
            break;
        };
        let value = region[value_start..value_start + end_rel].to_string();
        if !name.is_empty() {
            attrs.insert(name, value);
        }
        // Resume scanning after the closing quote.
        let resume = value_start + end_rel + 1;
        while let Some(&(j, _)) = chars.peek() {
            if j < resume {
                chars.next();
            } else {
                break;
            }
        }
    }
    attrs
}

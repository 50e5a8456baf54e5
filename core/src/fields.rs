//! Feltoppslag i XML-treet.
//!
//! Eksportfiler fra Garmin/Wahoo/Strava bruker ulike navnerom-prefiks for samme
//! logiske felt (`gpxtpx:hr`, `ns3:hr`, ...). I stedet for ad hoc if/else per
//! felt har hvert logisk felt en `FieldChain`: en prioritert liste med
//! kandidatnavn der første treff med tallverdi vinner.
//!
//! Navneregler:
//! - `"prefix:local"` matcher bare elementer med akkurat det prefikset.
//! - `"local"` matcher lokalnavnet uansett navnerom.

use roxmltree::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChain {
    names: Vec<String>,
}

impl FieldChain {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    /// Ny kjede med `extra` lagt til bakerst (lavest prioritet). Duplikater hoppes over.
    pub fn extended(&self, extra: &[String]) -> Self {
        let mut names = self.names.clone();
        for name in extra {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Første kandidat (i prioritert rekkefølge) som finnes under `node` og har tallverdi.
    pub fn first_f64(&self, node: Node<'_, '_>) -> Option<f64> {
        self.names.iter().find_map(|name| {
            let hit = first_descendant(node, name)?;
            let value = text_f64(hit);
            if value.is_none() {
                log::trace!("field {name} present but not numeric: {:?}", hit.text());
            }
            value
        })
    }

    /// Som `first_f64`, men med default 0.0 (lenient policy).
    pub fn f64_or_zero(&self, node: Node<'_, '_>) -> f64 {
        self.first_f64(node).unwrap_or(0.0)
    }
}

/// Prefikset elementet faktisk har i dokumentet (None for default-navnerom).
pub fn element_prefix<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    let uri = node.tag_name().namespace()?;
    node.lookup_prefix(uri)
}

pub fn name_matches(node: Node<'_, '_>, name: &str) -> bool {
    if !node.is_element() {
        return false;
    }
    match name.split_once(':') {
        Some((prefix, local)) => {
            node.tag_name().name() == local && element_prefix(node) == Some(prefix)
        }
        None => node.tag_name().name() == name,
    }
}

/// Første etterkommer (dokumentrekkefølge, `node` selv ekskludert) med navnet.
pub fn first_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| name_matches(*n, name))
}

pub fn text_f64(node: Node<'_, '_>) -> Option<f64> {
    node.text()
        .map(str::trim)
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub fn attr_f64(node: Node<'_, '_>, attr: &str) -> Option<f64> {
    node.attribute(attr)
        .map(str::trim)
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub fn descendant_f64(node: Node<'_, '_>, name: &str) -> Option<f64> {
    first_descendant(node, name).and_then(text_f64)
}

pub fn descendant_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    first_descendant(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

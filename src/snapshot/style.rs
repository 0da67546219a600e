use crate::snapshot::node::SvgNode;

/// Presentation properties resolved for every node: `(name, initial value, inherited)`.
pub(crate) const PROPERTIES: &[(&str, &str, bool)] = &[
    ("fill", "black", true),
    ("fill-opacity", "1", true),
    ("fill-rule", "nonzero", true),
    ("stroke", "none", true),
    ("stroke-width", "1", true),
    ("stroke-opacity", "1", true),
    ("stroke-linecap", "butt", true),
    ("stroke-linejoin", "miter", true),
    ("opacity", "1", false),
    ("visibility", "visible", true),
    ("display", "inline", false),
];

fn property_index(name: &str) -> Option<usize> {
    PROPERTIES.iter().position(|(p, _, _)| *p == name)
}

/// Parse `a: b; c: d` declarations, skipping malformed entries.
pub(crate) fn parse_declarations(block: &str) -> Vec<(String, String)> {
    block
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            (!k.is_empty() && !v.is_empty()).then(|| (k.to_ascii_lowercase(), v.to_string()))
        })
        .collect()
}

/// Class selector with descendant combinators, e.g. `.fang .left` or `.nose.big`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// Compound class sets, outermost ancestor first; the last one matches the subject.
    compounds: Vec<Vec<String>>,
}

impl Selector {
    /// Parse a class-only selector. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let compounds = s
            .split_whitespace()
            .map(|compound| {
                let classes: Vec<String> = compound
                    .strip_prefix('.')?
                    .split('.')
                    .map(str::to_string)
                    .collect();
                classes
                    .iter()
                    .all(|c| is_class_name(c))
                    .then_some(classes)
            })
            .collect::<Option<Vec<_>>>()?;
        (!compounds.is_empty()).then_some(Self { compounds })
    }

    /// Match against the subject's classes and its ancestors' classes (root first).
    pub fn matches(&self, subject: &[&str], ancestors: &[Vec<String>]) -> bool {
        let Some((last, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !compound_matches(last, subject.iter().copied()) {
            return false;
        }
        let mut remaining = rest.iter().rev().peekable();
        for anc in ancestors.iter().rev() {
            let Some(want) = remaining.peek() else {
                break;
            };
            if compound_matches(want, anc.iter().map(String::as_str)) {
                remaining.next();
            }
        }
        remaining.peek().is_none()
    }
}

fn is_class_name(c: &str) -> bool {
    !c.is_empty()
        && c
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_')
}

fn compound_matches<'a>(want: &[String], have: impl Iterator<Item = &'a str> + Clone) -> bool {
    want.iter().all(|w| have.clone().any(|h| h == w))
}

/// One author rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Selector list; the rule applies when any selector matches.
    pub selectors: Vec<Selector>,
    /// Declarations in source order.
    pub declarations: Vec<(String, String)>,
}

/// Ordered author stylesheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheet {
    /// Rules in source order; later rules win.
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Parse `selector, selector { prop: value; }` rules.
    ///
    /// Rules whose selectors are not class selectors are dropped with a warning.
    pub fn parse(css: &str) -> Self {
        let mut rules = Vec::new();
        let mut rest = css;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                tracing::warn!("unterminated css rule ignored");
                break;
            };
            let prelude = rest[..open].trim();
            let selectors = prelude
                .split(',')
                .map(Selector::parse)
                .collect::<Option<Vec<_>>>();
            match selectors {
                Some(selectors) if !selectors.is_empty() => rules.push(StyleRule {
                    selectors,
                    declarations: parse_declarations(&rest[open + 1..close]),
                }),
                _ => tracing::warn!(selector = prelude, "unsupported css selector ignored"),
            }
            rest = &rest[close + 1..];
        }
        Self { rules }
    }
}

/// Fully resolved presentation state, one value per entry of [`PROPERTIES`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputedStyle {
    values: Vec<String>,
}

impl ComputedStyle {
    /// Resolve `node` given its parent's computed style and ancestor class lists.
    ///
    /// Cascade order: inherited/initial values, presentation attributes, stylesheet rules in
    /// order, then the inline `style` attribute.
    pub fn resolve(
        node: &SvgNode,
        parent: Option<&ComputedStyle>,
        ancestors: &[Vec<String>],
        sheet: &StyleSheet,
    ) -> Self {
        let mut values: Vec<String> = PROPERTIES
            .iter()
            .enumerate()
            .map(|(i, (_, initial, inherited))| match parent {
                Some(p) if *inherited => p.values[i].clone(),
                _ => (*initial).to_string(),
            })
            .collect();

        let mut apply = |name: &str, value: &str| {
            let Some(i) = property_index(name) else {
                return;
            };
            values[i] = match value {
                "inherit" => match parent {
                    Some(p) => p.values[i].clone(),
                    None => PROPERTIES[i].1.to_string(),
                },
                "initial" => PROPERTIES[i].1.to_string(),
                v => v.to_string(),
            };
        };

        for (k, v) in &node.attrs {
            apply(k, v);
        }

        let classes: Vec<&str> = node.classes().collect();
        for rule in &sheet.rules {
            if rule.selectors.iter().any(|s| s.matches(&classes, ancestors)) {
                for (k, v) in &rule.declarations {
                    apply(k, v);
                }
            }
        }

        if let Some(inline) = node.attr("style") {
            for (k, v) in parse_declarations(inline) {
                apply(&k, &v);
            }
        }

        Self { values }
    }

    /// Value of a resolved property.
    pub fn get(&self, name: &str) -> Option<&str> {
        property_index(name).map(|i| self.values[i].as_str())
    }

    /// Every property as an inline `style` value: `fill:red;stroke:none;...`.
    pub fn to_inline(&self) -> String {
        PROPERTIES
            .iter()
            .zip(&self.values)
            .map(|((name, _, _), v)| format!("{name}:{v}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/style.rs"]
mod tests;

use crate::foundation::core::{Affine, Point};

/// Fixed vertical pivot shared by every part, in scene units.
pub const ORIGIN_Y: f64 = 40.0;

/// Per-part placement: offset, uniform scale and rotation in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Horizontal offset in scene px.
    pub translate_x: f64,
    /// Vertical offset in scene px.
    pub translate_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotate: f64,
}

impl Transform {
    /// The neutral placement of a part that was never animated.
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotate: 0.0,
    };

    /// SVG attribute syntax: `translate(X Y) scale(S) rotate(R)`.
    pub fn to_attribute(&self) -> String {
        format!(
            "translate({} {}) scale({}) rotate({})",
            self.translate_x, self.translate_y, self.scale, self.rotate
        )
    }

    /// CSS style syntax: `translate(Xpx, Ypx) scale(S) rotate(Rdeg)`.
    pub fn to_style(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}) rotate({}deg)",
            self.translate_x, self.translate_y, self.scale, self.rotate
        )
    }

    /// Parse the SVG attribute syntax. Arguments may be separated by whitespace or commas.
    pub fn parse_attribute(s: &str) -> Option<Self> {
        Self::from_functions(&parse_functions(s, |c| c.is_whitespace() || c == ',')?)
    }

    /// Parse the CSS style syntax. Arguments must be comma separated.
    pub fn parse_style(s: &str) -> Option<Self> {
        Self::from_functions(&parse_functions(s, |c| c == ',')?)
    }

    fn from_functions(funcs: &[(&str, Vec<f64>)]) -> Option<Self> {
        let mut out = Self::IDENTITY;
        for (name, args) in funcs {
            match (*name, args.as_slice()) {
                ("translate", [x]) => {
                    out.translate_x = *x;
                    out.translate_y = 0.0;
                }
                ("translate", [x, y]) => {
                    out.translate_x = *x;
                    out.translate_y = *y;
                }
                ("scale", [s]) => out.scale = *s,
                ("rotate", [r]) => out.rotate = *r,
                _ => return None,
            }
        }
        Some(out)
    }

    /// Affine matrix for this placement, pivoting scale and rotation around `origin`.
    ///
    /// Equivalent to `translate(dx dy) translate(ox oy) scale(s) rotate(r) translate(-ox -oy)`.
    pub fn to_affine(&self, origin: Origin) -> Affine {
        let pivot = Point::new(origin.x, origin.y).to_vec2();
        Affine::translate((self.translate_x, self.translate_y))
            * Affine::translate(pivot)
            * Affine::scale(self.scale)
            * Affine::rotate(self.rotate.to_radians())
            * Affine::translate(-pivot)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Pivot for scale and rotation, in scene units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Origin {
    /// Horizontal pivot.
    pub x: f64,
    /// Vertical pivot; [`ORIGIN_Y`] for every generated frame.
    pub y: f64,
}

impl Origin {
    /// The neutral pivot at the horizontal center of the face.
    pub const CENTER: Self = Self {
        x: 50.0,
        y: ORIGIN_Y,
    };

    /// `transform-origin` value: `OXpx OYpx`.
    pub fn to_value(&self) -> String {
        format!("{}px {}px", self.x, self.y)
    }

    /// Parse a two-component `transform-origin` value with optional `px` units.
    pub fn parse(s: &str) -> Option<Self> {
        let mut it = s.split_whitespace().map(parse_length);
        let x = it.next()??;
        let y = it.next()??;
        if it.next().is_some() {
            return None;
        }
        Some(Self { x, y })
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::CENTER
    }
}

fn parse_length(v: &str) -> Option<f64> {
    let v = v.trim();
    let v = v
        .strip_suffix("px")
        .or_else(|| v.strip_suffix("deg"))
        .unwrap_or(v);
    let n: f64 = v.parse().ok()?;
    n.is_finite().then_some(n)
}

/// Split `name(a b) name(c)` into named argument lists.
fn parse_functions(s: &str, is_sep: impl Fn(char) -> bool) -> Option<Vec<(&str, Vec<f64>)>> {
    let mut out = Vec::new();
    let mut rest = s.trim();
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest.find(')')?;
        if close < open {
            return None;
        }
        let name = rest[..open].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let args = rest[open + 1..close]
            .split(&is_sep)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(parse_length)
            .collect::<Option<Vec<_>>>()?;
        out.push((name, args));
        rest = rest[close + 1..].trim_start();
    }
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/transform.rs"]
mod tests;

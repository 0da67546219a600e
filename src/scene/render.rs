use crate::{
    foundation::{color::Color, core::Canvas},
    scene::{
        model::Scene,
        part::{Part, PartId},
    },
    snapshot::{
        node::{SVG_NS, SvgDocument, SvgNode},
        style::StyleSheet,
    },
};

/// Scene coordinates span `0..VIEWBOX` on both axes.
pub const VIEWBOX: f64 = 100.0;

const FACE_CSS: &str = "
.body, .nose, .fang, .eye { stroke-width: 2; stroke-linejoin: round; }
.body { fill: #d9473b; }
.nose .snout { fill: #f4a59a; }
.nose .nostril { fill: #5b1e18; }
.fang .left, .fang .right { fill: #fff8e1; }
.eye .left, .eye .right { fill: #2a1b14; }
";

/// Stylesheet shared by every projected scene.
pub fn face_stylesheet() -> StyleSheet {
    StyleSheet::parse(FACE_CSS)
}

fn place(node: SvgNode, part: Option<&Part>) -> SvgNode {
    let Some(part) = part else {
        return node;
    };
    let [a, b, c, d, e, f] = part.transform().to_affine(part.origin()).as_coeffs();
    let mut node = node.with_attr("transform", format!("matrix({a} {b} {c} {d} {e} {f})"));
    if let Some(stroke) = part.stroke() {
        let stroke = Color::parse_css(stroke)
            .map(Color::to_hex)
            .unwrap_or_else(|_| stroke.to_string());
        node.set_attr("stroke", stroke);
    }
    node
}

/// Project `scene` into a standalone SVG document of `canvas` pixels.
///
/// The projection is one-way: the scene stays the source of truth and parts missing from the
/// scene are drawn at their neutral placement.
pub fn scene_document(scene: &Scene, background: &str, canvas: Canvas) -> SvgDocument {
    let part = |id: PartId| scene.get(id);
    let background = Color::parse_css(background)
        .map(Color::to_hex)
        .unwrap_or_else(|_| background.to_string());

    let body = place(
        SvgNode::new("ellipse")
            .with_attr("class", "body")
            .with_attr("cx", "50")
            .with_attr("cy", "45")
            .with_attr("rx", "36")
            .with_attr("ry", "30"),
        part(PartId::Body),
    );

    let nose = place(
        SvgNode::new("g")
            .with_attr("class", "nose")
            .with_child(
                SvgNode::new("ellipse")
                    .with_attr("class", "snout")
                    .with_attr("cx", "50")
                    .with_attr("cy", "55")
                    .with_attr("rx", "13")
                    .with_attr("ry", "9"),
            )
            .with_child(nostril("45"))
            .with_child(nostril("55")),
        part(PartId::Nose),
    );

    let fang = SvgNode::new("g")
        .with_attr("class", "fang")
        .with_child(place(
            SvgNode::new("path")
                .with_attr("class", "left")
                .with_attr("d", "M36 60 L40 74 L43 61 Z"),
            part(PartId::LeftFang),
        ))
        .with_child(place(
            SvgNode::new("path")
                .with_attr("class", "right")
                .with_attr("d", "M64 60 L60 74 L57 61 Z"),
            part(PartId::RightFang),
        ));

    let eye = SvgNode::new("g")
        .with_attr("class", "eye")
        .with_child(place(eye_circle("left", "38"), part(PartId::LeftEye)))
        .with_child(place(eye_circle("right", "62"), part(PartId::RightEye)));

    let root = SvgNode::new("svg")
        .with_attr("xmlns", SVG_NS)
        .with_attr("class", "world")
        .with_attr("width", canvas.width.to_string())
        .with_attr("height", canvas.height.to_string())
        .with_attr("viewBox", format!("0 0 {VIEWBOX} {VIEWBOX}"))
        .with_child(SvgNode::new("title").with_text("fukuwarai"))
        .with_child(
            SvgNode::new("rect")
                .with_attr("class", "backdrop")
                .with_attr("width", VIEWBOX.to_string())
                .with_attr("height", VIEWBOX.to_string())
                .with_attr("fill", background),
        )
        .with_child(body)
        .with_child(nose)
        .with_child(fang)
        .with_child(eye);

    SvgDocument {
        root,
        stylesheet: face_stylesheet(),
    }
}

fn nostril(cx: &str) -> SvgNode {
    SvgNode::new("circle")
        .with_attr("class", "nostril")
        .with_attr("cx", cx)
        .with_attr("cy", "55")
        .with_attr("r", "2.5")
}

fn eye_circle(side: &str, cx: &str) -> SvgNode {
    SvgNode::new("circle")
        .with_attr("class", side)
        .with_attr("cx", cx)
        .with_attr("cy", "38")
        .with_attr("r", "4")
}

#[cfg(test)]
#[path = "../../tests/unit/scene/render.rs"]
mod tests;

use super::*;
use crate::snapshot::style::StyleSheet;

fn doc() -> SvgDocument {
    SvgDocument {
        root: SvgNode::new("svg")
            .with_attr("width", "20")
            .with_attr("height", "10")
            .with_attr("viewBox", "0 0 20 10")
            .with_child(
                SvgNode::new("g")
                    .with_attr("class", "pair")
                    .with_child(
                        SvgNode::new("rect")
                            .with_attr("class", "left")
                            .with_attr("width", "10")
                            .with_attr("height", "10"),
                    )
                    .with_child(
                        SvgNode::new("rect")
                            .with_attr("class", "right")
                            .with_attr("x", "10")
                            .with_attr("width", "10")
                            .with_attr("height", "10"),
                    ),
            )
            .with_child(SvgNode::new("title").with_text("a & b")),
        stylesheet: StyleSheet::parse(
            ".pair .left { fill: #00ff00 } .pair .right { fill: #0000ff } .pair { stroke: none }",
        ),
    }
}

#[test]
fn inline_visits_every_node_and_keeps_order() {
    let src = doc();
    let out = inline_computed_styles(&src);
    assert_eq!(out.node_count(), src.root.node_count());
    assert_eq!(out.attr("xmlns"), Some(SVG_NS));
    assert_eq!(out.attr("version"), Some("1.1"));

    let tags: Vec<&str> = out.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, ["g", "title"]);
    let pair = &out.children[0];
    assert_eq!(pair.children[0].attr("class"), Some("left"));
    assert_eq!(pair.children[1].attr("class"), Some("right"));
    assert_eq!(out.children[1].text.as_deref(), Some("a & b"));
}

#[test]
fn inline_freezes_resolved_styles() {
    let out = inline_computed_styles(&doc());
    let left = out.find_by_class("left").unwrap();
    let style = left.attr("style").unwrap();
    assert!(style.starts_with("fill:#00ff00;"));
    assert!(style.contains("stroke:none"));
    let right = out.find_by_class("right").unwrap();
    assert!(right.attr("style").unwrap().starts_with("fill:#0000ff;"));
    // The clone no longer depends on the stylesheet.
    assert!(out.attr("style").unwrap().starts_with("fill:black;"));
}

#[test]
fn serialize_escapes_text_and_attributes() {
    let node = SvgNode::new("svg")
        .with_attr("data-x", "\"<&>\"")
        .with_child(SvgNode::new("title").with_text("1 < 2 & 3"))
        .with_child(SvgNode::new("rect"));
    assert_eq!(
        serialize_svg(&node),
        "<svg data-x=\"&quot;&lt;&amp;&gt;&quot;\"><title>1 &lt; 2 &amp; 3</title><rect/></svg>"
    );
}

#[test]
fn render_snapshot_matches_declared_fills() {
    let snap = render_snapshot(&doc()).unwrap();
    assert_eq!((snap.width, snap.height), (20, 10));
    let img = snap.decode_rgba8().unwrap();
    assert_eq!(img.get_pixel(4, 5).0, [0, 255, 0, 255]);
    assert_eq!(img.get_pixel(15, 5).0, [0, 0, 255, 255]);
}

#[test]
fn render_snapshot_reports_decode_errors() {
    let mut broken = doc();
    broken.root.set_attr("not valid", "1");
    assert!(matches!(
        render_snapshot(&broken),
        Err(FukuwaraiError::Decode(_))
    ));
}

#[test]
fn spawned_snapshot_matches_synchronous_render() {
    let d = doc();
    let pending = spawn_snapshot(&d);
    assert_eq!(pending.wait().unwrap(), render_snapshot(&d).unwrap());
}

#[test]
fn spawned_snapshot_surfaces_size_errors() {
    let mut pending = spawn_snapshot(&SvgDocument::default());
    assert!(matches!(
        pending.try_take(),
        Some(Err(FukuwaraiError::Validation(_)))
    ));
}

#[test]
fn abandoned_snapshot_does_not_disturb_later_ones() {
    let d = doc();
    drop(spawn_snapshot(&d));
    let pending = spawn_snapshot(&d);
    assert_eq!(pending.wait().unwrap(), render_snapshot(&d).unwrap());
}

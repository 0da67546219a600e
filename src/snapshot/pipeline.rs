use std::fmt::Write as _;
use std::sync::mpsc;

use crate::{
    foundation::error::{FukuwaraiError, FukuwaraiResult},
    snapshot::{
        node::{SVG_NS, SvgDocument, SvgNode},
        raster::{Snapshot, encode_svg_data_uri, rasterize_data_uri},
        style::ComputedStyle,
    },
};

struct Slot {
    node: SvgNode,
    parent: Option<usize>,
    computed: ComputedStyle,
    ancestry: Vec<Vec<String>>,
}

fn styled_clone(src: &SvgNode, computed: &ComputedStyle) -> SvgNode {
    let mut out = src.shallow_clone();
    out.set_attr("style", computed.to_inline());
    out
}

/// Clone `doc` into a self-contained tree where every element carries its fully resolved
/// presentation state as an inline `style`.
///
/// The source tree is walked with an explicit work stack; every element is visited exactly once.
/// Leaves keep their raw text content. The returned root declares the SVG namespace and version.
pub fn inline_computed_styles(doc: &SvgDocument) -> SvgNode {
    let sheet = &doc.stylesheet;
    let root_computed = ComputedStyle::resolve(&doc.root, None, &[], sheet);
    let mut slots = vec![Slot {
        node: styled_clone(&doc.root, &root_computed),
        parent: None,
        computed: root_computed,
        ancestry: Vec::new(),
    }];

    let mut stack: Vec<(&SvgNode, usize)> = vec![(&doc.root, 0)];
    while let Some((src, idx)) = stack.pop() {
        if src.children.is_empty() {
            slots[idx].node.text = src.text.clone();
            continue;
        }

        let mut ancestry = slots[idx].ancestry.clone();
        ancestry.push(src.classes().map(str::to_string).collect());
        for child in &src.children {
            let computed =
                ComputedStyle::resolve(child, Some(&slots[idx].computed), &ancestry, sheet);
            slots.push(Slot {
                node: styled_clone(child, &computed),
                parent: Some(idx),
                computed,
                ancestry: ancestry.clone(),
            });
            stack.push((child, slots.len() - 1));
        }
    }

    // Children are allocated after their parent and contiguously per parent, so a reverse sweep
    // finishes every subtree before attaching it.
    for i in (1..slots.len()).rev() {
        let mut node = std::mem::take(&mut slots[i].node);
        node.children.reverse();
        if let Some(parent) = slots[i].parent {
            slots[parent].node.children.push(node);
        }
    }

    let mut root = std::mem::take(&mut slots[0].node);
    root.children.reverse();
    root.set_attr("xmlns", SVG_NS);
    root.set_attr("version", "1.1");
    root
}

/// Serialize a tree to standalone XML markup.
pub fn serialize_svg(root: &SvgNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root);
    out
}

fn write_node(out: &mut String, node: &SvgNode) {
    let _ = write!(out, "<{}", node.tag);
    for (k, v) in &node.attrs {
        let _ = write!(out, " {k}=\"{}\"", escape(v, true));
    }
    match (&node.text, node.children.is_empty()) {
        (None, true) => out.push_str("/>"),
        (text, _) => {
            out.push('>');
            if let Some(text) = text {
                out.push_str(&escape(text, false));
            }
            for child in &node.children {
                write_node(out, child);
            }
            let _ = write!(out, "</{}>", node.tag);
        }
    }
}

fn escape(s: &str, attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Run the full snapshot pipeline synchronously: inline styles, serialize, encode as a data URI,
/// decode, rasterize at the document's intrinsic size and export PNG.
#[tracing::instrument(skip(doc))]
pub fn render_snapshot(doc: &SvgDocument) -> FukuwaraiResult<Snapshot> {
    let canvas = doc.intrinsic_size()?;
    let markup = serialize_svg(&inline_computed_styles(doc));
    tracing::debug!(bytes = markup.len(), "serialized snapshot markup");
    rasterize_data_uri(&encode_svg_data_uri(&markup), canvas)
}

/// A snapshot being decoded and rasterized on a worker thread.
#[derive(Debug)]
pub struct PendingSnapshot {
    rx: mpsc::Receiver<FukuwaraiResult<Snapshot>>,
}

impl PendingSnapshot {
    /// Block until the worker finishes.
    pub fn wait(self) -> FukuwaraiResult<Snapshot> {
        self.rx
            .recv()
            .map_err(|_| FukuwaraiError::decode("snapshot worker exited without a result"))?
    }

    /// Take the result if the worker has finished, without blocking.
    pub fn try_take(&mut self) -> Option<FukuwaraiResult<Snapshot>> {
        match self.rx.try_recv() {
            Ok(res) => Some(res),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(FukuwaraiError::decode(
                "snapshot worker exited without a result",
            ))),
        }
    }
}

/// Start the snapshot pipeline off-thread.
///
/// Style inlining and serialization run on the caller's thread, so the job captures the scene as
/// it is now; later changes to the source document (including a session reset) do not affect it.
pub fn spawn_snapshot(doc: &SvgDocument) -> PendingSnapshot {
    let (tx, rx) = mpsc::sync_channel(1);
    match doc.intrinsic_size() {
        Ok(canvas) => {
            let uri = encode_svg_data_uri(&serialize_svg(&inline_computed_styles(doc)));
            rayon::spawn(move || {
                if tx.send(rasterize_data_uri(&uri, canvas)).is_err() {
                    tracing::debug!("snapshot receiver dropped; result discarded");
                }
            });
        }
        Err(e) => {
            let _ = tx.send(Err(e));
        }
    }
    PendingSnapshot { rx }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/pipeline.rs"]
mod tests;

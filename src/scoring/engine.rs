use crate::{
    foundation::math::{circular_distance_deg, median, round_to_tenth},
    scene::model::FrozenScene,
};

/// A measured dimension of a part placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// Horizontal offset.
    X,
    /// Vertical offset.
    Y,
    /// Uniform scale.
    Scale,
    /// Rotation in degrees (circular).
    Rotation,
    /// Horizontal pivot.
    OriginX,
}

impl Dimension {
    /// Every dimension, in series order.
    pub const ALL: [Dimension; 5] = [
        Dimension::X,
        Dimension::Y,
        Dimension::Scale,
        Dimension::Rotation,
        Dimension::OriginX,
    ];

    /// Legal span used to normalize distances to a percentage.
    pub fn range(self) -> f64 {
        match self {
            Dimension::X | Dimension::Y => 128.0,
            Dimension::Scale => 5.0,
            Dimension::Rotation => 180.0,
            Dimension::OriginX => 10.0,
        }
    }

    fn distance(self, median: f64, sample: f64) -> f64 {
        match self {
            Dimension::Rotation => circular_distance_deg(median, sample),
            _ => (median - sample).abs(),
        }
    }
}

/// One sample series per dimension, one sample per part.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreComponents {
    /// Horizontal offsets.
    pub x: Vec<f64>,
    /// Vertical offsets.
    pub y: Vec<f64>,
    /// Scales.
    pub scale: Vec<f64>,
    /// Rotations in degrees.
    pub rotation: Vec<f64>,
    /// Horizontal pivots.
    pub origin_x: Vec<f64>,
}

impl ScoreComponents {
    /// Collect the frozen placement of every part.
    pub fn from_frozen(scene: FrozenScene<'_>) -> Self {
        let mut out = Self::default();
        for part in scene.parts() {
            let t = part.transform();
            out.x.push(t.translate_x);
            out.y.push(t.translate_y);
            out.scale.push(t.scale);
            out.rotation.push(t.rotate);
            out.origin_x.push(part.origin().x);
        }
        out
    }

    /// Series for `dim`.
    pub fn series(&self, dim: Dimension) -> &[f64] {
        match dim {
            Dimension::X => &self.x,
            Dimension::Y => &self.y,
            Dimension::Scale => &self.scale,
            Dimension::Rotation => &self.rotation,
            Dimension::OriginX => &self.origin_x,
        }
    }
}

/// Result of scoring a completed scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Score {
    /// Mean of the dimension scores, rounded to one decimal place.
    pub overall: f64,
    /// Unrounded score per dimension, in [`Dimension::ALL`] order.
    pub dimensions: Vec<(Dimension, f64)>,
}

impl Score {
    /// Score of one dimension.
    pub fn dimension(&self, dim: Dimension) -> Option<f64> {
        self.dimensions
            .iter()
            .find(|(d, _)| *d == dim)
            .map(|(_, s)| *s)
    }
}

/// Mean proximity of a series to its own median, as a percentage.
///
/// Each sample scores `100 - distance / range * 100`, clamped to `[0, 100]`. An empty series
/// scores 100.
pub fn dimension_score(dim: Dimension, series: &[f64]) -> f64 {
    let Some(mid) = median(series) else {
        return 100.0;
    };
    let total: f64 = series
        .iter()
        .map(|&s| (100.0 - dim.distance(mid, s) / dim.range() * 100.0).clamp(0.0, 100.0))
        .sum();
    total / series.len() as f64
}

/// Score arbitrary series.
pub fn score_components(components: &ScoreComponents) -> Score {
    let dimensions: Vec<(Dimension, f64)> = Dimension::ALL
        .into_iter()
        .map(|dim| (dim, dimension_score(dim, components.series(dim))))
        .collect();
    let mean = dimensions.iter().map(|(_, s)| s).sum::<f64>() / dimensions.len() as f64;
    Score {
        overall: round_to_tenth(mean),
        dimensions,
    }
}

/// Score a scene whose parts are all Frozen.
#[tracing::instrument(skip(scene), fields(parts = scene.parts().len()))]
pub fn score(scene: FrozenScene<'_>) -> Score {
    let out = score_components(&ScoreComponents::from_frozen(scene));
    tracing::debug!(overall = out.overall, "scored scene");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scoring/engine.rs"]
mod tests;

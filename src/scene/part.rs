use crate::{
    animation::waveform::RenderedFrame,
    scene::transform::{Origin, Transform},
};

/// Identifier of one animatable part, listed in activation order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PartId {
    /// The head silhouette.
    Body,
    /// The snout, including nostrils.
    Nose,
    /// Left tusk.
    LeftFang,
    /// Right tusk.
    RightFang,
    /// Left eye.
    LeftEye,
    /// Right eye.
    RightEye,
}

impl PartId {
    /// Every part, in activation order.
    pub const ALL: [PartId; 6] = [
        PartId::Body,
        PartId::Nose,
        PartId::LeftFang,
        PartId::RightFang,
        PartId::LeftEye,
        PartId::RightEye,
    ];

    /// Stable key used to namespace share-link parameters.
    pub fn key(self) -> &'static str {
        match self {
            PartId::Body => "body",
            PartId::Nose => "nose",
            PartId::LeftFang => "left-fang",
            PartId::RightFang => "right-fang",
            PartId::LeftEye => "left-eye",
            PartId::RightEye => "right-eye",
        }
    }

    /// Inverse of [`PartId::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    /// Human-readable name shown while the part is animating.
    pub fn display_name(self) -> &'static str {
        match self {
            PartId::Body => "Body",
            PartId::Nose => "Nose",
            PartId::LeftFang => "Left Fang",
            PartId::RightFang => "Right Fang",
            PartId::LeftEye => "Left Eye",
            PartId::RightEye => "Right Eye",
        }
    }
}

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Animation lifecycle of a part.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LiveState {
    /// Never started.
    #[default]
    Idle,
    /// The waveform mutates the transform every frame.
    Animating,
    /// The transform is fixed.
    Frozen,
}

/// One animatable part and its current placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub(crate) id: PartId,
    pub(crate) transform: Transform,
    pub(crate) origin: Origin,
    pub(crate) live: LiveState,
    pub(crate) stroke: Option<String>,
}

impl Part {
    /// A fresh, Idle part at the neutral placement.
    pub fn new(id: PartId) -> Self {
        Self {
            id,
            transform: Transform::IDENTITY,
            origin: Origin::CENTER,
            live: LiveState::Idle,
            stroke: None,
        }
    }

    /// A part already Frozen at the given placement.
    pub fn frozen(id: PartId, transform: Transform, origin: Origin) -> Self {
        Self {
            id,
            transform,
            origin,
            live: LiveState::Frozen,
            stroke: None,
        }
    }

    /// Part identifier.
    pub fn id(&self) -> PartId {
        self.id
    }

    /// Current offset, scale and rotation.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Current pivot.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Lifecycle state.
    pub fn live(&self) -> LiveState {
        self.live
    }

    /// Outline color, set while the part is highlighted.
    pub fn stroke(&self) -> Option<&str> {
        self.stroke.as_deref()
    }

    pub(crate) fn activate(&mut self, accent: String) {
        debug_assert_eq!(self.live, LiveState::Idle);
        self.live = LiveState::Animating;
        self.stroke = Some(accent);
    }

    pub(crate) fn apply(&mut self, frame: RenderedFrame) {
        debug_assert_eq!(self.live, LiveState::Animating);
        self.transform = frame.transform;
        self.origin = frame.origin;
    }

    pub(crate) fn freeze(&mut self) {
        self.live = LiveState::Frozen;
        self.stroke = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/part.rs"]
mod tests;

use crate::{
    animation::{
        task::AnimationTask,
        waveform::{RenderedFrame, WaveformState},
    },
    foundation::{
        core::{Hue, Rng64},
        error::FukuwaraiResult,
    },
    scene::{model::Scene, part::PartId, render::scene_document},
    scoring::engine::{Score, score},
    session::{
        config::SessionConfig,
        share::{RestoredScene, decode_share_link, encode_share_link},
    },
    snapshot::{
        node::SvgDocument,
        pipeline::{PendingSnapshot, render_snapshot, spawn_snapshot},
        raster::Snapshot,
    },
};

/// Text shown before the first click.
pub const START_TEXT: &str = "Click to Start!";
/// Text shown once every part is Frozen.
pub const FINISH_TEXT: &str = "Finish!";

/// Coarse lifecycle of a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No part has been activated yet.
    NotStarted,
    /// One part is Animating; earlier parts are Frozen.
    InProgress,
    /// Every part is Frozen and the score is available.
    Complete,
}

/// Outcome of one advance trigger.
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    /// The first part started animating.
    Started(PartId),
    /// `frozen` stopped and `active` started animating.
    Switched {
        /// Part that was just frozen.
        frozen: PartId,
        /// Part that is now animating.
        active: PartId,
    },
    /// The last part was frozen and the scene was scored.
    Completed {
        /// Part that was just frozen.
        frozen: PartId,
        /// Final score.
        score: Score,
    },
    /// The session was already complete; nothing changed.
    AlreadyComplete,
}

/// One play-through: owns the scene, the background hue and the single animation task.
///
/// At most one part is Animating at any time. Freezing a part drops its task before anything
/// else can observe the scene, so a frozen part never moves again.
#[derive(Debug)]
pub struct Session {
    cfg: SessionConfig,
    rng: Rng64,
    hue: Hue,
    scene: Scene,
    task: Option<AnimationTask>,
    next_index: usize,
    score: Option<Score>,
}

impl Session {
    /// Fresh session: every part Idle, random background hue.
    pub fn new(cfg: SessionConfig, seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let hue = Hue::random(&mut rng);
        tracing::debug!(seed, hue = hue.degrees(), "new session");
        Self {
            cfg,
            rng,
            hue,
            scene: Scene::standard(),
            task: None,
            next_index: 0,
            score: None,
        }
    }

    /// Completed session rebuilt from a share link, scored without play-through.
    ///
    /// `seed` only drives what happens after a [`Session::reset`].
    pub fn restore(cfg: SessionConfig, link: &str, seed: u64) -> FukuwaraiResult<Self> {
        Ok(Self::from_restored(cfg, decode_share_link(link)?, seed))
    }

    /// Completed session from an already decoded share link.
    pub fn from_restored(cfg: SessionConfig, restored: RestoredScene, seed: u64) -> Self {
        let score = restored.scene.frozen().map(score);
        Self {
            cfg,
            rng: Rng64::new(seed),
            hue: restored.hue,
            next_index: restored.scene.len(),
            scene: restored.scene,
            task: None,
            score,
        }
    }

    /// Handle one click: freeze the Animating part (if any) and start the next one.
    pub fn advance(&mut self) -> Advance {
        let frozen = match self.task.take() {
            Some(task) => {
                let index = task.part_index();
                task.cancel();
                self.scene.part_mut(index).map(|part| {
                    part.freeze();
                    tracing::debug!(part = %part.id(), "part frozen");
                    part.id()
                })
            }
            None if self.score.is_some() => return Advance::AlreadyComplete,
            None => None,
        };

        let accent = self.accent_color();
        let index = self.next_index;
        if let Some(part) = self.scene.part_mut(index) {
            let mut task = AnimationTask::start(index, WaveformState::seeded(&mut self.rng));
            part.activate(accent);
            part.apply(task.tick());
            tracing::debug!(part = %part.id(), "part animating");
            let active = part.id();
            self.task = Some(task);
            self.next_index += 1;
            return match frozen {
                Some(frozen) => Advance::Switched { frozen, active },
                None => Advance::Started(active),
            };
        }

        let (Some(frozen), Some(view)) = (frozen, self.scene.frozen()) else {
            return Advance::AlreadyComplete;
        };
        let result = score(view);
        tracing::debug!(overall = result.overall, "session complete");
        self.score = Some(result.clone());
        Advance::Completed {
            frozen,
            score: result,
        }
    }

    /// Advance the Animating part by one display frame. No-op when nothing animates.
    pub fn tick(&mut self) -> Option<RenderedFrame> {
        let task = self.task.as_mut()?;
        let frame = task.tick();
        if let Some(part) = self.scene.part_mut(task.part_index()) {
            part.apply(frame);
        }
        Some(frame)
    }

    /// Discard everything and start over with fresh seeds and a new hue.
    pub fn reset(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
        let seed = self.rng.next_u64();
        *self = Self::new(self.cfg.clone(), seed);
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if self.score.is_some() {
            SessionPhase::Complete
        } else if self.next_index == 0 {
            SessionPhase::NotStarted
        } else {
            SessionPhase::InProgress
        }
    }

    /// The parts and their placements.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Part currently Animating.
    pub fn active_part(&self) -> Option<PartId> {
        let task = self.task.as_ref()?;
        self.scene.parts().get(task.part_index()).map(|p| p.id())
    }

    /// Frames produced by the active task so far.
    pub fn active_ticks(&self) -> Option<u64> {
        self.task.as_ref().map(AnimationTask::ticks)
    }

    /// Final score, once complete.
    pub fn score(&self) -> Option<&Score> {
        self.score.as_ref()
    }

    /// Settings this session was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.cfg
    }

    /// Background hue.
    pub fn hue(&self) -> Hue {
        self.hue
    }

    /// Accent hue: the background hue rotated by the configured offset.
    pub fn accent_hue(&self) -> Hue {
        self.hue.rotated(i64::from(self.cfg.accent_offset_deg))
    }

    /// Background CSS color.
    pub fn background_color(&self) -> String {
        format!("hsl({}, 100%, 70%)", self.hue)
    }

    /// Highlight CSS color for the Animating part.
    pub fn accent_color(&self) -> String {
        format!("hsl({}, 100%, 40%)", self.accent_hue())
    }

    /// Status line for the current phase.
    pub fn status_text(&self) -> &'static str {
        match self.phase() {
            SessionPhase::NotStarted => START_TEXT,
            SessionPhase::Complete => FINISH_TEXT,
            SessionPhase::InProgress => self
                .active_part()
                .map(PartId::display_name)
                .unwrap_or(FINISH_TEXT),
        }
    }

    /// SVG projection of the current scene.
    pub fn document(&self) -> SvgDocument {
        scene_document(&self.scene, &self.background_color(), self.cfg.canvas)
    }

    /// Render the current scene to PNG on the calling thread.
    pub fn snapshot(&self) -> FukuwaraiResult<Snapshot> {
        render_snapshot(&self.document())
    }

    /// Render the current scene to PNG on a worker thread.
    ///
    /// The job captures the scene as it is now; a later reset does not affect it.
    pub fn spawn_snapshot(&self) -> PendingSnapshot {
        spawn_snapshot(&self.document())
    }

    /// Share link restoring this scene and hue.
    pub fn share_link(&self) -> FukuwaraiResult<String> {
        encode_share_link(
            &self.cfg.share_base_url,
            &self.scene,
            self.hue,
            self.cfg.share_format,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;

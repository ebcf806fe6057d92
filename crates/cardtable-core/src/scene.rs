//! Boundary toward the renderer: where visuals are registered and where the
//! observer currently stands.

use crate::model::card::CardId;
use crate::model::player::Seat;
use crate::motion::Transform;
use glam::Vec3;

/// What a registered visual represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Card(CardId),
    CardArea(Seat),
}

/// Receives each visual once, when it is first placed on the table.
pub trait SceneSink {
    fn add(&mut self, kind: VisualKind, transform: &Transform);
}

/// Read-only source of the observer position used by floating cards.
pub trait Viewpoint {
    fn eye(&self) -> Vec3;
}

/// A viewpoint that never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewpoint(pub Vec3);

impl Default for FixedViewpoint {
    fn default() -> Self {
        Self(Vec3::new(0.0, 10.0, 10.0))
    }
}

impl Viewpoint for FixedViewpoint {
    fn eye(&self) -> Vec3 {
        self.0
    }
}

/// Scene sink that only remembers what was added.
#[derive(Debug, Clone, Default)]
pub struct RecordingScene {
    added: Vec<(VisualKind, Transform)>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn added(&self) -> &[(VisualKind, Transform)] {
        &self.added
    }

    pub fn card_count(&self) -> usize {
        self.added
            .iter()
            .filter(|(kind, _)| matches!(kind, VisualKind::Card(_)))
            .count()
    }

    pub fn card_area_count(&self) -> usize {
        self.added
            .iter()
            .filter(|(kind, _)| matches!(kind, VisualKind::CardArea(_)))
            .count()
    }
}

impl SceneSink for RecordingScene {
    fn add(&mut self, kind: VisualKind, transform: &Transform) {
        self.added.push((kind, *transform));
    }
}

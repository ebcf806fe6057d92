use crate::model::face::CardFace;
use crate::motion::{ARRIVE_EPSILON, FLIP_ANGLE, FLOAT_TILT, ROTATE_EPSILON, Transform};
use core::fmt;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Stable index of a card inside the deck that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub(crate) usize);

impl CardId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable outcome of one positional step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    Moved,
    Arrived,
}

/// Called once, with the card that just arrived, then dropped.
pub type ArrivalListener = Box<dyn FnOnce(&mut Card)>;

/// A playing card plus the animation state of its visual.
///
/// Position and rotation each have an optional target; `None` means that
/// axis is idle. Floating is independent of both and re-aims the card at the
/// viewer on every tick.
pub struct Card {
    id: CardId,
    face: CardFace,
    transform: Transform,
    target_position: Option<Vec3>,
    target_rotation: Option<Quat>,
    floating: bool,
    arrival_listeners: Vec<ArrivalListener>,
}

impl Card {
    pub fn new(id: CardId, face: CardFace) -> Self {
        Self {
            id,
            face,
            transform: Transform::IDENTITY,
            target_position: None,
            target_rotation: None,
            floating: false,
            arrival_listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    pub fn target_position(&self) -> Option<Vec3> {
        self.target_position
    }

    pub fn target_rotation(&self) -> Option<Quat> {
        self.target_rotation
    }

    pub fn set_target_position(&mut self, position: Vec3) {
        self.target_position = Some(position);
    }

    pub fn set_target_rotation(&mut self, rotation: Quat) {
        self.target_rotation = Some(rotation);
    }

    /// Quarter turn about `axis`, the flip used by `show` and `hide`.
    pub fn flip_about(&mut self, axis: Vec3) {
        self.set_target_rotation(Quat::from_axis_angle(axis.normalize(), FLIP_ANGLE));
    }

    pub fn show(&mut self) {
        self.flip_about(Vec3::X);
    }

    pub fn hide(&mut self) {
        self.flip_about(Vec3::NEG_X);
    }

    pub fn is_moving(&self) -> bool {
        self.target_position.is_some()
    }

    pub fn is_rotating(&self) -> bool {
        self.target_rotation.is_some()
    }

    pub fn is_floating(&self) -> bool {
        self.floating
    }

    pub fn set_floating(&mut self, floating: bool) {
        self.floating = floating;
    }

    /// Registers a listener for the next arrival only.
    pub fn on_arrived(&mut self, listener: ArrivalListener) {
        self.arrival_listeners.push(listener);
    }

    pub fn pending_listeners(&self) -> usize {
        self.arrival_listeners.len()
    }

    /// One positional step toward the target.
    ///
    /// Returns `None` when idle. On arrival the target is cleared before the
    /// listeners run, so a listener may set a fresh target.
    pub fn move_toward(&mut self, speed: f32) -> Option<Motion> {
        let target = self.target_position?;

        if self.transform.position.distance(target) < ARRIVE_EPSILON {
            self.target_position = None;
            tracing::trace!(
                target: "cardtable::card",
                card = %self.face,
                x = target.x,
                y = target.y,
                z = target.z,
                "arrived"
            );
            for listener in std::mem::take(&mut self.arrival_listeners) {
                listener(self);
            }
            return Some(Motion::Arrived);
        }

        self.transform.position = self.transform.position.lerp(target, speed);
        Some(Motion::Moved)
    }

    /// One angular step toward the target rotation. Settling emits nothing.
    pub fn rotate_toward(&mut self, speed: f32) {
        let Some(target) = self.target_rotation else {
            return;
        };

        if self.transform.rotation.angle_between(target) < ROTATE_EPSILON {
            self.target_rotation = None;
            return;
        }

        self.transform.rotation = self.transform.rotation.slerp(target, speed).normalize();
    }

    /// Aims the card at `viewpoint` with the fixed floating tilt.
    pub fn face_viewpoint(&mut self, viewpoint: Vec3) {
        self.transform.look_at(viewpoint);
        self.transform.set_euler_x(FLOAT_TILT);
    }

    /// Full per-frame step: move, rotate, then float.
    pub fn update(&mut self, speed: f32, viewpoint: Vec3) -> Option<Motion> {
        let motion = self.move_toward(speed);
        self.rotate_toward(speed);
        if self.floating {
            self.face_viewpoint(viewpoint);
        }
        motion
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("id", &self.id)
            .field("face", &self.face)
            .field("transform", &self.transform)
            .field("target_position", &self.target_position)
            .field("target_rotation", &self.target_rotation)
            .field("floating", &self.floating)
            .field("arrival_listeners", &self.arrival_listeners.len())
            .finish()
    }
}

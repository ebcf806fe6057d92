use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// X offsets of the non-dealer card areas, in seating order.
pub const DEFAULT_SEAT_OFFSETS: [f32; 5] = [0.0, 7.0, -7.0, 14.0, -14.0];

pub const SEAT_HEIGHT: f32 = 0.05;
/// Z of the first seat; each later seat sits `SEAT_STAGGER` further back.
pub const FRONT_ROW_DEPTH: f32 = 6.0;
pub const SEAT_STAGGER: f32 = 0.5;
pub const DEALER_AREA: Vec3 = Vec3::new(0.0, SEAT_HEIGHT, -8.0);
pub const EVEN_SPACING: f32 = 7.0;

/// What to do with seats beyond the offset table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowStrategy {
    /// Extra seats all land on the first offset and overlap.
    ReuseFirst,
    /// Every seat is spread evenly around the centre line.
    #[default]
    EvenlySpaced,
}

/// More seats were requested than the offset table holds. Not fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{requested} seats requested but the layout holds {capacity} offsets ({strategy:?})")]
pub struct LayoutOverflow {
    pub requested: usize,
    pub capacity: usize,
    pub strategy: OverflowStrategy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeatPlacement {
    pub seats: Vec<Vec3>,
    pub overflow: Option<LayoutOverflow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeatLayout {
    offsets: Vec<f32>,
    overflow: OverflowStrategy,
    dealer: Vec3,
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self::new(DEFAULT_SEAT_OFFSETS.to_vec(), OverflowStrategy::default())
    }
}

impl SeatLayout {
    pub fn new(offsets: Vec<f32>, overflow: OverflowStrategy) -> Self {
        Self {
            offsets,
            overflow,
            dealer: DEALER_AREA,
        }
    }

    pub fn with_dealer_area(mut self, dealer: Vec3) -> Self {
        self.dealer = dealer;
        self
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn overflow_strategy(&self) -> OverflowStrategy {
        self.overflow
    }

    pub fn dealer_area(&self) -> Vec3 {
        self.dealer
    }

    /// Card-area anchors for `count` non-dealer seats.
    pub fn place(&self, count: usize) -> SeatPlacement {
        let overflow = (count > self.offsets.len()).then_some(LayoutOverflow {
            requested: count,
            capacity: self.offsets.len(),
            strategy: self.overflow,
        });
        let spread = overflow.is_some() && self.overflow == OverflowStrategy::EvenlySpaced;

        let seats = (0..count)
            .map(|index| {
                let x = if spread {
                    (index as f32 - (count - 1) as f32 / 2.0) * EVEN_SPACING
                } else {
                    self.offsets
                        .get(index)
                        .or(self.offsets.first())
                        .copied()
                        .unwrap_or(0.0)
                };
                Vec3::new(x, SEAT_HEIGHT, FRONT_ROW_DEPTH - index as f32 * SEAT_STAGGER)
            })
            .collect();

        SeatPlacement { seats, overflow }
    }
}

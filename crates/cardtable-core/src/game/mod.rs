pub mod dealing;
pub mod layout;
pub mod snapshot;
pub mod table;

pub use dealing::{SharedDeck, SharedPlayer};
pub use layout::{LayoutOverflow, OverflowStrategy, SeatLayout};
pub use snapshot::TableSnapshot;
pub use table::{OpeningStatus, OpeningStep, Table};

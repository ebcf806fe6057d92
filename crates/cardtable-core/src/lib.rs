pub mod error;
pub mod game;
pub mod model;
pub mod motion;
pub mod rng;
pub mod scene;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "cardtable"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

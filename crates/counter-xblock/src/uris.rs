//! Handler names exposed by the block's backend

pub mod counter {
    pub const INCREMENT: &str = "increment_count";
}

pub mod add;
pub mod delete;
pub mod list;
pub mod rate;
pub mod review;
pub mod show;
pub mod stats;
pub mod tags;

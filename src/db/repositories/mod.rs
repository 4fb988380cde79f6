pub mod activity;
pub mod advisor;

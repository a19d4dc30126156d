pub mod batch;
pub mod estimate;
pub mod info;

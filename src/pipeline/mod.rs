pub mod batch;
pub mod stage1_bands;
pub mod stage2_verify;

pub mod bands;
pub mod lms;
pub mod percentiles;

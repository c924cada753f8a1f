//! Plot layer: axis validation, least-squares fitting, and the plot
//! descriptor handed to front ends.

pub mod regression;
pub mod spec;
pub mod validate;

//! Domain models for the EcoMindShift pages.

pub mod business_spec;
pub mod data_item;
pub mod requirements;
pub mod testimonial;

pub use business_spec::*;
pub use data_item::*;
pub use requirements::*;
pub use testimonial::*;

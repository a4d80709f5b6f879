//! Typed page clients, one [`ResourceController`](resource_controller::ResourceController)
//! per page.

pub mod business_spec_client;
pub mod data_list_client;
pub mod requirements_client;
pub mod testimonial_client;

pub use business_spec_client::*;
pub use data_list_client::*;
pub use requirements_client::*;
pub use testimonial_client::*;

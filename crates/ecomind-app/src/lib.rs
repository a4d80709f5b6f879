//! # EcoMindShift
//!
//! The EcoMindShift small-business pages, built on
//! [`resource_controller`]:
//!
//! - **Business specification editor** ([`clients::BusinessSpecClient`])
//! - **Requirements form** ([`clients::RequirementsClient`])
//! - **Testimonial form** ([`clients::TestimonialClient`])
//! - **Data list** ([`clients::DataListClient`])
//!
//! Each client owns one controller and renders its page as text through
//! [`view`]. [`lifecycle::EcoMindSystem`] wires them all to one transport.

pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod navigation;
pub mod view;

//! Site-level and project-level appraisal.

pub mod aggregate;
#[cfg(feature = "business_case")]
pub mod business_case;
pub mod decision;
pub mod site;
#[cfg(feature = "sensitivity")]
pub mod stress;

pub use aggregate::{aggregate, combine_timelines, ProjectAggregate, ProjectInput};
pub use decision::decide;
pub use site::{evaluate_site, SiteResult};

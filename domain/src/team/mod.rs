//! Team bounded context

pub mod entities;
pub mod value_objects;

pub use entities::TeamProfile;
pub use value_objects::{MemberReport, TeamRunReport};

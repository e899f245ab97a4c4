// Skill gap analysis against a taxonomy of learnable skills.

pub mod analysis;
pub mod handlers;
pub mod taxonomy;

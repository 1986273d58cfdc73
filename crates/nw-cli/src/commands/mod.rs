pub mod play;
pub mod roles;
pub mod rules;

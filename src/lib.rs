pub mod access;
pub mod expression;
pub mod planner;
pub mod session;
pub mod settings;

pub mod handlers;
pub mod readiness;
pub mod skill_sync;

// --- File: crates/schedulify_schedules/src/lib.rs ---
#[cfg(feature = "openapi")]
pub mod doc;
mod body;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;
pub mod views;

pub use body::JsonOrForm;
pub use handlers::ScheduleState;
pub use routes::routes;

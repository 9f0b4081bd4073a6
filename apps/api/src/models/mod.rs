pub mod application;
pub mod job;
pub mod user;

pub use application::{Application, ApplicationStatus};
pub use job::{Job, JobType};
pub use user::{Role, User};

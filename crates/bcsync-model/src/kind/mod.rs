mod job;
pub use job::JobType;

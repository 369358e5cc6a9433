pub mod topic;

pub use topic::{OutputFormat, Section, TopicContent};

pub mod feedback;
pub mod submission;

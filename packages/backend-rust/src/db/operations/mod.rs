pub mod items;
pub mod lessons;

pub use lessons::CompletedLesson;

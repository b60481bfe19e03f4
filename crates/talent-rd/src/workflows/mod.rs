pub mod competency;
pub mod evaluation;
pub mod training;

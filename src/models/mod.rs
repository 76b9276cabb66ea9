pub mod counter;
pub mod url;

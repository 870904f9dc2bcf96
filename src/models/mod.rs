pub mod project;
pub mod results;
pub mod scan;
pub mod upload;

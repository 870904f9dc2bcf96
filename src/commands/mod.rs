pub mod auth_commands;
pub mod navigation_commands;
pub mod project_commands;
pub mod results_commands;
pub mod scan_commands;
pub mod upload_commands;

pub mod api_client;
pub mod navigation_service;
pub mod project_service;
pub mod results_service;
pub mod scan_service;
pub mod upload_service;

mod commands;
mod error;
mod models;
mod services;
mod state;

use commands::{
    auth_commands, navigation_commands, project_commands, results_commands, scan_commands,
    upload_commands,
};
use services::api_client::ApiClient;
use state::AppState;

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _guard = std::env::var("SENTRY_DSN")
        .ok()
        .filter(|dsn| !dsn.trim().is_empty())
        .map(|dsn| {
            sentry::init((
                dsn,
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    send_default_pii: false,
                    ..Default::default()
                },
            ))
        });

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            app.manage(AppState::new(ApiClient::from_env()));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            auth_commands::login,
            navigation_commands::canonicalize_route,
            navigation_commands::visit_path,
            navigation_commands::navigate_back,
            project_commands::list_projects,
            project_commands::filter_projects,
            project_commands::create_project,
            project_commands::delete_project,
            project_commands::reset_projects,
            scan_commands::get_scan_draft,
            scan_commands::add_keyword,
            scan_commands::remove_keyword,
            scan_commands::remove_synonym,
            scan_commands::set_search_scope,
            scan_commands::set_document_selection,
            scan_commands::discard_scan_draft,
            scan_commands::generate_synonyms,
            scan_commands::start_scan,
            upload_commands::get_upload_state,
            upload_commands::stage_files,
            upload_commands::remove_pending_file,
            upload_commands::clear_pending_files,
            upload_commands::acknowledge_upload_error,
            upload_commands::upload_and_process,
            results_commands::fetch_project_results,
            results_commands::fetch_file_statuses,
            results_commands::fetch_project_overview,
            results_commands::filter_results,
            results_commands::band_for_distance,
            results_commands::delete_file,
            results_commands::fetch_doc_results,
            results_commands::download_archive,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

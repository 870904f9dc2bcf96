use tauri::{command, State};

use crate::error::AppError;
use crate::services::navigation_service::{self, Route};
use crate::state::AppState;

/// Normalizes a path against the route table; unknown paths are rejected
/// so the webview can fall back to the home view.
#[command]
pub fn canonicalize_route(path: String) -> Result<String, AppError> {
    Route::parse(&path)
        .map(|route| route.to_path())
        .ok_or_else(|| AppError::validation(format!("unknown route: {path}")))
}

#[command]
pub fn visit_path(path: String, state: State<'_, AppState>) {
    state.visit_path(&path);
}

/// Computes where the back button should go from `current` and pops the
/// current entry off the history. The webview is expected to call
/// `visit_path` again once it lands on the target.
#[command]
pub fn navigate_back(current: String, state: State<'_, AppState>) -> String {
    let history = state.history_snapshot();
    let target = navigation_service::back_target(&history, &current);
    state.pop_path(&current);
    target
}

use tauri::{command, State};

use crate::error::AppError;
use crate::models::project::LoginOutcome;
use crate::state::AppState;

/// Forwards credentials to the backend. A failed login is a normal
/// outcome, not an error: the message is shown as-is and the user stays on
/// the login view.
#[command]
pub async fn login(
    username: String,
    password: String,
    state: State<'_, AppState>,
) -> Result<LoginOutcome, AppError> {
    state.api.login(&username, &password).await
}

use axum::extract::{Path, State};
use tracing::info;

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::models::user::Account;
use crate::routes::{ApiResponse, Envelope};
use crate::state::AppState;

/// GET /api/users/profile/:email
pub async fn handle_profile(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(email): Path<String>,
) -> ApiResponse<Account> {
    authed.ensure_owner(&email, "Not authorized to access this profile")?;

    let account = state
        .accounts
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    info!(user_id = %account.id, "profile fetched");
    Ok(Envelope::ok(account, "Profile fetched successfully"))
}

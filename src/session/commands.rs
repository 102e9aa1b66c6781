use log::{info, warn};
use validator::Validate;

use super::{Role, UserSession};
use crate::api::api;
use crate::api::auth::{LoginRequest, SignupRequest};

#[tauri::command]
pub async fn login(role: String, email: String, password: String) -> Result<UserSession, String> {
    let role = Role::parse(&role).ok_or_else(|| format!("Unknown role: {}", role))?;
    info!("🔐 Login attempt as {}: {}", role.as_str(), email);

    let request = LoginRequest { email, password };
    request.validate().map_err(flatten_validation)?;

    let response = api()
        .login(role, &request)
        .await
        .map_err(|e| e.to_string())?;
    let user_id = response.user_id(role).map_err(|e| e.to_string())?;

    let session = UserSession::new(
        role,
        user_id,
        response.email,
        response.name,
        response.company_name,
    );
    super::store_session(session.clone());

    info!("✅ Logged in {} as {}", session.email, role.as_str());
    Ok(session)
}

#[tauri::command]
pub async fn signup(
    role: String,
    email: String,
    password: String,
    name: String,
    company_name: Option<String>,
) -> Result<String, String> {
    let role = Role::parse(&role).ok_or_else(|| format!("Unknown role: {}", role))?;
    info!("📝 Signup as {}: {}", role.as_str(), email);

    let request = SignupRequest {
        email,
        password,
        name,
        company_name: match role {
            Role::Recruiter => company_name,
            Role::Candidate => None,
        },
    };
    request.validate().map_err(flatten_validation)?;

    let response = api()
        .signup(role, &request)
        .await
        .map_err(|e| e.to_string())?;

    info!("✅ Signup complete: {}", response.message);
    Ok(response.message)
}

#[tauri::command]
pub async fn current_session() -> Result<Option<UserSession>, String> {
    Ok(super::active_session())
}

#[tauri::command]
pub async fn logout() -> Result<bool, String> {
    let cleared = super::clear_session();
    if cleared {
        info!("👋 Logged out");
    } else {
        warn!("Logout requested with no active session");
    }
    Ok(cleared)
}

fn flatten_validation(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|list| list.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect::<Vec<_>>()
        .join("; ")
}

use avisgate_core::{AppError, Principal};
use tracing::{info, instrument};

use super::model::{
    LoginRequest, LoginResponse, MeResponse, MessageResponse, REGISTERED_MESSAGE, RegisterRequest,
};
use crate::state::AppState;

pub struct UserService;

impl UserService {
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn register(
        state: &AppState,
        dto: RegisterRequest,
    ) -> Result<MessageResponse, AppError> {
        if state.principals.find_by_identifier(&dto.email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        let credential_hash = state.hasher.hash(&dto.password)?;
        let principal = Principal::new(dto.email, credential_hash).with_full_name(dto.full_name);

        // Lost a race with a concurrent registration of the same email.
        if !state.principals.insert(principal).await? {
            return Err(AppError::EmailTaken);
        }

        info!("Account registered");
        Ok(MessageResponse {
            message: REGISTERED_MESSAGE.to_string(),
        })
    }

    /// Unknown email and wrong password fail the same way, after the same bcrypt work.
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginResponse, AppError> {
        let Some(principal) = state.principals.find_by_identifier(&dto.email).await? else {
            state.hasher.verify(&dto.password, &state.decoy_hash)?;
            return Err(AppError::InvalidCredentials);
        };

        if !state.hasher.verify(&dto.password, &principal.credential_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = state.tokens.issue(&principal)?;
        info!("Login succeeded");

        Ok(LoginResponse {
            token,
            email: principal.identifier,
        })
    }

    pub fn me(principal: &Principal) -> MeResponse {
        MeResponse {
            email: principal.identifier.clone(),
            authorities: principal.authorities.iter().cloned().collect(),
        }
    }
}

//! Authorization extractors layered on [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use motorlist_core::error::CoreError;
use motorlist_core::listing::ListingOwner;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an operator acting for a dealer business profile. Rejects with
/// 403 Forbidden otherwise.
///
/// ```ignore
/// async fn dealer_only(dealer: RequireDealer) -> AppResult<Json<()>> {
///     let owner = &dealer.owner; // every listing read/write is scoped to this
///     Ok(Json(()))
/// }
/// ```
pub struct RequireDealer {
    pub user: AuthUser,
    pub owner: ListingOwner,
}

impl FromRequestParts<AppState> for RequireDealer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let Some(business_profile_id) = user.business_profile_id.clone() else {
            return Err(AppError::Core(CoreError::Forbidden(
                "A dealer business profile is required".into(),
            )));
        };
        let owner = ListingOwner {
            dealer_id: user.user_id.clone(),
            business_profile_id,
        };
        Ok(RequireDealer { user, owner })
    }
}

use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::profile::repo_types::NewProfile;
use crate::recommend::client::RecommendError;
use crate::recommend::dto::{GenerateResponse, ProfileForm};
use crate::recommend::sections::parse_plan;
use crate::recommend::validate::{validate, ValidationError};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

/// Validates the form, asks the endpoint for a plan and remembers both the
/// profile and the plan. Persistence is best effort and only shows up as
/// `saved: false`.
#[instrument(skip_all)]
pub async fn generate_plan(state: &AppState, form: &ProfileForm) -> Result<GenerateResponse, PlanError> {
    let request = validate(form)?;
    let recommendation = state.recommender.generate(&request).await?;

    let profile = NewProfile::from(request);
    let snapshot = profile.clone().stamped(OffsetDateTime::now_utc());
    let profile_saved = state.store.save_profile(profile).await;
    let history_saved = state.store.save_recommendation(&recommendation, snapshot).await;
    let saved = profile_saved && history_saved;
    if !saved {
        warn!(profile_saved, history_saved, "plan generated but not fully persisted");
    }

    let plan = parse_plan(&recommendation);
    info!(sections = plan.sections.len(), saved, "plan generated");
    Ok(GenerateResponse {
        recommendation,
        plan,
        saved,
    })
}

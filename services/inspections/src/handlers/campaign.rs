use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Serialize;
use serde_json::Value;

use leakwatch_domain::pagination::PageRequest;

use crate::domain::campaign::Campaign;
use crate::domain::record::Resource;
use crate::error::InspectionsError;
use crate::state::AppState;
use crate::usecase::campaign::{ListCampaignPageUseCase, ToggleCampaignUseCase};
use crate::usecase::projection::ProjectUseCase;

// ── GET /api/campaigns?page=&limit= ──────────────────────────────────────────

pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<Value>>, InspectionsError> {
    let usecase = ListCampaignPageUseCase {
        repo: state.store(),
    };
    let campaigns = usecase.execute(page).await?;
    let project = ProjectUseCase {
        store: state.store(),
    };
    Ok(Json(project.execute(&campaigns, Campaign::VIEW).await?))
}

// ── POST /api/campaigns/state/{id} ───────────────────────────────────────────

#[derive(Serialize)]
pub struct ToggleResponse {
    pub code: u16,
    pub message: &'static str,
}

pub async fn toggle_campaign(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ToggleResponse>, InspectionsError> {
    let usecase = ToggleCampaignUseCase {
        repo: state.store(),
    };
    let active = usecase.execute(id).await?;
    Ok(Json(ToggleResponse {
        code: 200,
        message: if active {
            "Campaign activated"
        } else {
            "Campaign deactivated"
        },
    }))
}

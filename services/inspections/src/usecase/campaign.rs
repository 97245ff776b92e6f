use chrono::Utc;

use leakwatch_domain::pagination::PageRequest;

use crate::domain::campaign::Campaign;
use crate::domain::record::{Record, Table};
use crate::domain::repository::Repository;
use crate::error::InspectionsError;

// ── ListCampaignPage ─────────────────────────────────────────────────────────

pub struct ListCampaignPageUseCase<R: Repository<Campaign>> {
    pub repo: R,
}

impl<R: Repository<Campaign>> ListCampaignPageUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Campaign>, InspectionsError> {
        if !page.is_valid() {
            return Err(InspectionsError::InvalidPage);
        }
        self.repo.find_page(page).await
    }
}

// ── ToggleCampaign ───────────────────────────────────────────────────────────

pub struct ToggleCampaignUseCase<R: Repository<Campaign>> {
    pub repo: R,
}

impl<R: Repository<Campaign>> ToggleCampaignUseCase<R> {
    /// Flip `isActive` and return the new value.
    pub async fn execute(&self, id: i32) -> Result<bool, InspectionsError> {
        let mut campaign = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(InspectionsError::NotFound(Table::Campaigns.resource()))?;
        let active = campaign.toggle();
        campaign.touch(Utc::now());
        self.repo.save(campaign).await?;
        tracing::info!(campaign_id = id, active, "campaign toggled");
        Ok(active)
    }
}

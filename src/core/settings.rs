use crate::core::validate;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::settings::{load_settings, upsert_settings};
use crate::errors::AppResult;
use crate::models::settings::{BusinessSettings, SettingsPatch};
use rusqlite::Connection;

/// Business settings of an organization.
pub struct SettingsLogic;

impl SettingsLogic {
    /// Stored settings, or the defaults when the organization has none yet.
    pub fn load(conn: &Connection, org: &str) -> AppResult<BusinessSettings> {
        Ok(load_settings(conn, org)?.unwrap_or_default())
    }

    /// Merge `patch` into the stored settings and persist the result.
    ///
    /// Existing jobs are not touched: their derived fields are refreshed on
    /// their next write, or all at once by `db --recalc`.
    pub fn update(pool: &mut DbPool, org: &str, patch: &SettingsPatch) -> AppResult<BusinessSettings> {
        validate::settings_patch(patch)?;

        pool.immediate(|tx| {
            let mut settings = Self::load(tx, org)?;
            patch.apply(&mut settings);
            upsert_settings(tx, org, &settings)?;

            ttlog(
                tx,
                "settings",
                org,
                &format!(
                    "materials {}% labor {}% payout {}% min GP {} target GM {}% deposit {}%",
                    settings.sub_materials_pct,
                    settings.sub_labor_pct,
                    settings.sub_payout_pct,
                    settings.min_gross_profit_per_job,
                    settings.target_gross_margin_pct,
                    settings.default_deposit_pct
                ),
            )?;
            Ok(settings)
        })
    }
}

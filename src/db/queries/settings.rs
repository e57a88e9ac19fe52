use crate::errors::AppResult;
use crate::models::settings::BusinessSettings;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, named_params};

pub fn load_settings(conn: &Connection, org: &str) -> AppResult<Option<BusinessSettings>> {
    let mut stmt = conn.prepare(
        "SELECT sub_materials_pct, sub_labor_pct, sub_payout_pct,
                min_gross_profit_per_job, target_gross_margin_pct, default_deposit_pct
         FROM business_settings
         WHERE organization_id = ?1",
    )?;

    let found = stmt
        .query_row([org], |row| {
            Ok(BusinessSettings {
                sub_materials_pct: row.get(0)?,
                sub_labor_pct: row.get(1)?,
                sub_payout_pct: row.get(2)?,
                min_gross_profit_per_job: row.get(3)?,
                target_gross_margin_pct: row.get(4)?,
                default_deposit_pct: row.get(5)?,
            })
        })
        .optional()?;

    Ok(found)
}

/// One settings row per organization.
pub fn upsert_settings(conn: &Connection, org: &str, s: &BusinessSettings) -> AppResult<()> {
    conn.execute(
        "INSERT INTO business_settings (
            organization_id, sub_materials_pct, sub_labor_pct, sub_payout_pct,
            min_gross_profit_per_job, target_gross_margin_pct, default_deposit_pct, updated_at
         ) VALUES (:org, :materials, :labor, :payout, :min_gp, :target_gm, :deposit, :now)
         ON CONFLICT(organization_id) DO UPDATE SET
            sub_materials_pct        = excluded.sub_materials_pct,
            sub_labor_pct            = excluded.sub_labor_pct,
            sub_payout_pct           = excluded.sub_payout_pct,
            min_gross_profit_per_job = excluded.min_gross_profit_per_job,
            target_gross_margin_pct  = excluded.target_gross_margin_pct,
            default_deposit_pct      = excluded.default_deposit_pct,
            updated_at               = excluded.updated_at",
        named_params! {
            ":org": org,
            ":materials": s.sub_materials_pct,
            ":labor": s.sub_labor_pct,
            ":payout": s.sub_payout_pct,
            ":min_gp": s.min_gross_profit_per_job,
            ":target_gm": s.target_gross_margin_pct,
            ":deposit": s.default_deposit_pct,
            ":now": Local::now().to_rfc3339(),
        },
    )?;
    Ok(())
}

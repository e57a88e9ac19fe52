use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::settings::SettingsLogic;
use crate::errors::AppResult;
use crate::models::settings::{BusinessSettings, SettingsPatch};
use crate::ui::messages::{field, header, info, success};
use crate::utils::formatting::{money, pct};

fn print_settings(s: &BusinessSettings, cfg: &Config) {
    header(format!("Business settings ({})", cfg.organization), cfg.separator());
    field("Sub materials", pct(s.sub_materials_pct));
    field("Sub labor", pct(s.sub_labor_pct));
    field("Sub payout", pct(s.sub_payout_pct));
    field("Min gross profit / job", money(s.min_gross_profit_per_job, &cfg.currency_symbol));
    field("Target gross margin", pct(s.target_gross_margin_pct));
    field("Default deposit", pct(s.default_deposit_pct));
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings {
        show,
        sub_materials_pct,
        sub_labor_pct,
        sub_payout_pct,
        min_gross_profit,
        target_margin_pct,
        deposit_pct,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;

        let patch = SettingsPatch {
            sub_materials_pct: *sub_materials_pct,
            sub_labor_pct: *sub_labor_pct,
            sub_payout_pct: *sub_payout_pct,
            min_gross_profit_per_job: *min_gross_profit,
            target_gross_margin_pct: *target_margin_pct,
            default_deposit_pct: *deposit_pct,
        };

        if !patch.is_empty() {
            let updated = SettingsLogic::update(&mut pool, &cfg.organization, &patch)?;
            success("Settings updated.");
            info("Existing jobs keep their amounts until updated (or run `db --recalc`).");
            print_settings(&updated, cfg);
        } else if *show {
            let current = SettingsLogic::load(&pool.conn, &cfg.organization)?;
            print_settings(&current, cfg);
        } else {
            info("Nothing to do: use --show or pass at least one setting.");
        }
    }

    Ok(())
}

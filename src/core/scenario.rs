use crate::core::calculator::scenario::{calculate_scenario_results, compare_scenarios};
use crate::core::validate;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::scenarios::{
    clear_baselines, delete_scenario, insert_scenario, load_baseline, load_scenario, load_scenarios,
    update_scenario,
};
use crate::errors::{AppError, AppResult};
use crate::models::scenario::{Scenario, ScenarioComparison, ScenarioInputs, ScenarioPatch};
use chrono::Local;
use rusqlite::Connection;

/// What-if scenarios. Results are cached next to the inputs and rebuilt on
/// every write.
pub struct ScenarioLogic;

/// A resolved comparison: both scenarios and their deltas.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub baseline: Scenario,
    pub candidate: Scenario,
    pub differences: ScenarioComparison,
}

impl ScenarioLogic {
    pub fn create(pool: &mut DbPool, org: &str, patch: &ScenarioPatch) -> AppResult<Scenario> {
        validate::scenario_patch(patch)?;
        let name = patch.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(AppError::Validation("scenario name is required".into()));
        }

        let now = Local::now().to_rfc3339();
        let mut scenario = Scenario {
            id: 0,
            organization_id: org.to_string(),
            name: name.to_string(),
            description: String::new(),
            version: 1,
            is_baseline: false,
            inputs: ScenarioInputs::default(),
            results: Default::default(),
            created_at: now.clone(),
            updated_at: now,
        };
        patch.apply(&mut scenario);
        scenario.name = name.to_string();
        scenario.results = calculate_scenario_results(&scenario.inputs);

        pool.immediate(|tx| {
            // ids start at 1, so 0 keeps nothing
            if scenario.is_baseline {
                clear_baselines(tx, org, 0)?;
            }
            scenario.id = insert_scenario(tx, &scenario)?;

            ttlog(
                tx,
                "scenario_add",
                &format!("{org}/scenario#{}", scenario.id),
                &format!(
                    "{}{}",
                    scenario.name,
                    if scenario.is_baseline { " (baseline)" } else { "" }
                ),
            )?;
            Ok(scenario)
        })
    }

    /// Apply `patch`, bump the version and recompute the cached results.
    /// Flagging a scenario as baseline clears the flag everywhere else in
    /// the same transaction.
    pub fn update(pool: &mut DbPool, org: &str, id: i64, patch: &ScenarioPatch) -> AppResult<Scenario> {
        validate::scenario_patch(patch)?;

        pool.immediate(|tx| {
            let mut scenario = Self::get(tx, org, id)?;
            patch.apply(&mut scenario);
            scenario.name = scenario.name.trim().to_string();
            scenario.version += 1;
            scenario.results = calculate_scenario_results(&scenario.inputs);
            scenario.updated_at = Local::now().to_rfc3339();

            if scenario.is_baseline {
                clear_baselines(tx, org, id)?;
            }
            update_scenario(tx, &scenario)?;

            ttlog(
                tx,
                "scenario_edit",
                &format!("{org}/scenario#{id}"),
                &format!("{} v{}", scenario.name, scenario.version),
            )?;
            Ok(scenario)
        })
    }

    pub fn get(conn: &Connection, org: &str, id: i64) -> AppResult<Scenario> {
        load_scenario(conn, org, id)?.ok_or_else(|| AppError::NotFound(format!("scenario #{id}")))
    }

    pub fn list(conn: &Connection, org: &str) -> AppResult<Vec<Scenario>> {
        load_scenarios(conn, org)
    }

    pub fn delete(pool: &mut DbPool, org: &str, id: i64) -> AppResult<()> {
        pool.immediate(|tx| {
            if !delete_scenario(tx, org, id)? {
                return Err(AppError::NotFound(format!("scenario #{id}")));
            }
            ttlog(tx, "scenario_del", &format!("{org}/scenario#{id}"), "deleted")?;
            Ok(())
        })
    }

    /// Compare `candidate_id` against `baseline_id`, or against the
    /// organization's current baseline when no id is given.
    pub fn compare(
        conn: &Connection,
        org: &str,
        baseline_id: Option<i64>,
        candidate_id: i64,
    ) -> AppResult<ComparisonReport> {
        let baseline = match baseline_id {
            Some(id) => Self::get(conn, org, id)?,
            None => load_baseline(conn, org)?
                .ok_or_else(|| AppError::NotFound(format!("baseline scenario for '{org}'")))?,
        };
        let candidate = Self::get(conn, org, candidate_id)?;
        let differences = compare_scenarios(&baseline.results, &candidate.results);

        Ok(ComparisonReport {
            baseline,
            candidate,
            differences,
        })
    }
}

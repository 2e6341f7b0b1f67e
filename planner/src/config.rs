//! Planner configuration (§6): knobs the CLI exposes plus the internal
//! defaults used when embedding the core as a library.

use planner_param::EnvParam;

/// Escape hatch for experimentation without touching the CLI surface: set
/// `PLANNER_NO_NOVELTY=1` to start every run with the novelty constraint off.
static DISABLE_NOVELTY_CONSTRAINT: EnvParam<bool> = EnvParam::new("PLANNER_NO_NOVELTY", "false");

/// Granularity at which CSP handlers are built (§4.D).
///
/// This implementation grounds every action schema eagerly (§9 open
/// questions), so a handler's parameter space is always empty by the time it
/// runs — all three granularities therefore share the same handler
/// implementation and differ only in documentation intent. The variant is
/// still surfaced because it is part of the configuration surface described
/// in the specification, and an ungrounded solver could legitimately use it
/// to choose between pre-grounding aggressively or deferring to the CSP.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum CspModel {
    GroundActionCSP,
    #[default]
    ActionSchemaCSP,
    EffectSchemaCSP,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Heuristic {
    #[default]
    HFf,
    HMax,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum SearchStrategy {
    #[default]
    GreedyBestFirst,
    BreadthFirst,
}

#[derive(Copy, Clone, Debug)]
pub struct Config {
    pub csp_model: CspModel,
    pub use_novelty_constraint: bool,
    pub approximate_action_resolution: bool,
    pub use_min_hmax_value_selector: bool,
    pub heuristic: Heuristic,
    pub search: SearchStrategy,
    pub timeout: std::time::Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            csp_model: CspModel::default(),
            use_novelty_constraint: !DISABLE_NOVELTY_CONSTRAINT.get(),
            approximate_action_resolution: false,
            use_min_hmax_value_selector: false,
            heuristic: Heuristic::default(),
            search: SearchStrategy::default(),
            timeout: std::time::Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Approximate formula support for preconditions beyond plain conjunctions
    /// of positive atoms is explicitly unimplemented (§9 open questions): the
    /// source planner this is modeled on marks it "needs to be rethought", and
    /// the specification requires failing this cleanly at startup rather than
    /// silently degrading mid-search.
    pub fn validate(&self, actions: &planner_collections::ref_store::RefStore<crate::problem::ActionId, crate::problem::GroundAction>) -> Result<(), crate::error::PlannerError> {
        if !self.approximate_action_resolution {
            return Ok(());
        }
        for action in actions.keys() {
            if formula_is_complex(&actions[action].precondition) {
                return Err(crate::error::PlannerError::UnsupportedFeature(format!(
                    "approximate_action_resolution is not supported for non-conjunctive preconditions (action {})",
                    actions[action].schema_name
                )));
            }
        }
        Ok(())
    }
}

fn formula_is_complex(f: &crate::formula::Formula) -> bool {
    match f {
        crate::formula::Formula::Atomic(_) => false,
        crate::formula::Formula::And(parts) => parts.iter().any(formula_is_complex),
        crate::formula::Formula::Or(_) | crate::formula::Formula::Exists(_, _) => true,
    }
}

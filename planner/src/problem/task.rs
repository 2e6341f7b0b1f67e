//! Assembly of a [`ProblemIndex`] into a complete planning task: ground
//! actions, an initial state and a goal formula.

use crate::formula::{Binding, Formula};
use crate::problem::action::{ActionId, ActionSchema, Effect, EffectValue, GroundAction};
use crate::problem::signature::Signature;
use crate::problem::state::State;
use crate::problem::state_var::StateVar;
use crate::problem::value::Value;
use crate::problem::{ProblemError, ProblemIndex, ProblemIndexBuilder};
use crate::util::enumerate::enumerate;
use planner_collections::ref_store::RefStore;
use planner_symbols::{SymId, SymbolTable};
use streaming_iterator::StreamingIterator;

#[derive(thiserror::Error, Debug)]
pub enum TaskBuildError {
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error("initial state omits non-boolean variable {0:?}")]
    MissingInitialValue(StateVar),
    #[error("action {schema}: effect left-hand side does not resolve to a state variable")]
    UnresolvedEffectLhs { schema: String },
    /// Covers both a genuinely undeclared state variable and the documented
    /// scope cut in [`EffectValue`](crate::problem::EffectValue): an effect
    /// rhs that is still an `Arith`/`Compare` term or a fluent-valued nested
    /// term after grounding has no `StateVariableRef`/constant form to fall
    /// back to, so it is rejected the same way.
    #[error("action {schema}: precondition or effect references an undeclared state variable, or an effect rhs needs indirect/arithmetic resolution this planner does not support (see DESIGN.md)")]
    UnresolvedReference { schema: String },
}

pub struct Task {
    pub problem: ProblemIndex,
    pub actions: RefStore<ActionId, GroundAction>,
    pub initial: State,
    pub goal: Formula,
}

impl Task {
    pub fn is_goal(&self, state: &State) -> bool {
        self.goal.satisfied(&Binding::empty(), state, &self.problem)
    }

    pub fn applicable<'a>(&'a self, state: &'a State) -> impl Iterator<Item = ActionId> + 'a {
        self.actions
            .keys()
            .filter(move |&a| self.actions[a].precondition.satisfied(&Binding::empty(), state, &self.problem))
    }

    pub fn apply(&self, state: &State, action: ActionId) -> State {
        let mut next = state.clone();
        for effect in &self.actions[action].effects {
            let value = effect.resolve(state);
            next.set(effect.var, value);
        }
        next
    }
}

pub struct TaskBuilder {
    symbols: SymbolTable,
    signatures: Vec<Signature>,
    schemas: Vec<ActionSchema>,
    initial_facts: Vec<(StateVar, Value)>,
    goal: Formula,
}

impl TaskBuilder {
    pub fn new(symbols: SymbolTable, signatures: Vec<Signature>, goal: Formula) -> Self {
        TaskBuilder {
            symbols,
            signatures,
            schemas: Vec::new(),
            initial_facts: Vec::new(),
            goal,
        }
    }

    pub fn with_action(mut self, schema: ActionSchema) -> Self {
        self.schemas.push(schema);
        self
    }

    pub fn with_initial_fact(mut self, var: StateVar, value: Value) -> Self {
        self.initial_facts.push((var, value));
        self
    }

    pub fn build(self) -> Result<Task, TaskBuildError> {
        let problem = ProblemIndexBuilder::new(self.symbols, self.signatures).build(Some(&self.goal))?;

        let mut values: Vec<Option<Value>> = vec![None; problem.num_variables()];
        for (sv, value) in &self.initial_facts {
            let var = problem
                .variable_of(sv)
                .ok_or_else(|| TaskBuildError::MissingInitialValue(sv.clone()))?;
            values[usize::from(var)] = Some(*value);
        }
        let mut resolved = Vec::with_capacity(values.len());
        for (var, value) in values.into_iter().enumerate() {
            let value = match value {
                Some(v) => v,
                // closed-world assumption: an unmentioned boolean defaults to false.
                None if matches!(problem.variable_objects(var.into())[0], Value::Bool(_)) => Value::Bool(false),
                None => {
                    return Err(TaskBuildError::MissingInitialValue(problem.variable(var.into()).clone()));
                }
            };
            resolved.push(value);
        }
        let initial = State::new(resolved);

        let mut actions: RefStore<ActionId, GroundAction> = RefStore::new();
        for schema in &self.schemas {
            ground_schema(schema, &problem, &mut actions)?;
        }
        tracing::debug!(
            variables = problem.num_variables(),
            actions = actions.len(),
            "task grounded"
        );

        Ok(Task {
            problem,
            actions,
            initial,
            goal: self.goal,
        })
    }
}

fn ground_schema(
    schema: &ActionSchema,
    problem: &ProblemIndex,
    out: &mut RefStore<ActionId, GroundAction>,
) -> Result<(), TaskBuildError> {
    let domains: Vec<Vec<SymId>> = schema.params.iter().map(|&t| problem.symbols.instances_of_type(t)).collect();
    let mut combos = enumerate(domains);
    while let Some(combo) = combos.next() {
        let args: smallvec::SmallVec<[SymId; 6]> = combo.iter().copied().collect();
        let params: Vec<Option<SymId>> = args.iter().copied().map(Some).collect();

        let precondition = schema.precondition.bind(&params);

        let mut relaxed_preconditions = Vec::new();
        for atom in precondition.all_atoms() {
            if !atom.positive {
                continue;
            }
            if let (Some(var), Some(value)) = (atom.term.resolve_state_variable(problem), atom.value.as_ground_value()) {
                relaxed_preconditions.push((var, value));
            }
        }

        let mut effects = Vec::with_capacity(schema.effects.len());
        for tmpl in &schema.effects {
            let lhs = tmpl.lhs.bind(&params);
            let rhs = tmpl.rhs.bind(&params);
            let var = lhs
                .resolve_state_variable(problem)
                .ok_or_else(|| TaskBuildError::UnresolvedEffectLhs {
                    schema: schema.name.as_str().to_string(),
                })?;
            let value = match rhs.as_ground_value() {
                Some(v) => EffectValue::Constant(v),
                None => match rhs.resolve_state_variable(problem) {
                    Some(src) => EffectValue::Copy(src),
                    None => {
                        return Err(TaskBuildError::UnresolvedReference {
                            schema: schema.name.as_str().to_string(),
                        })
                    }
                },
            };
            effects.push(Effect { var, value });
        }

        out.push(GroundAction {
            schema_name: schema.name.clone(),
            args,
            precondition,
            relaxed_preconditions,
            effects,
        });
    }
    Ok(())
}

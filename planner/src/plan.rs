//! Plan representation and the two output files the CLI writes (§6).

use crate::problem::{ActionId, Task};
use std::io::{self, Write};

#[derive(Clone, Debug, Default)]
pub struct Plan {
    pub actions: Vec<ActionId>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Replays the plan against the task's initial state and checks the goal
    /// holds afterwards (§8 round-trip law).
    pub fn replay_reaches_goal(&self, task: &Task) -> bool {
        let mut state = task.initial.clone();
        for &action in &self.actions {
            if !task.actions[action].precondition.satisfied(&crate::formula::Binding::empty(), &state, &task.problem) {
                return false;
            }
            state = task.apply(&state, action);
        }
        task.is_goal(&state)
    }

    /// Writes `plan.ipc`: one action per line, lower-case name followed by its
    /// object arguments in parentheses, e.g. `(move b1 b2)`. Empty for an
    /// already-solved task.
    pub fn write_ipc(&self, task: &Task, w: &mut impl Write) -> io::Result<()> {
        for &action in &self.actions {
            writeln!(w, "{}", task.actions[action].display_name(&task.problem.symbols))?;
        }
        Ok(())
    }
}

/// Statistics accumulated by the search harness, reported in `searchlog.out`
/// regardless of whether the search succeeded.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    pub nodes_generated: u64,
    pub nodes_expanded: u64,
    pub elapsed: std::time::Duration,
}

pub enum SearchOutcome {
    Solved(Plan),
    Unsolvable,
    TimedOut,
}

pub fn write_searchlog(
    outcome: &SearchOutcome,
    stats: &SearchStats,
    task: &Task,
    w: &mut impl Write,
) -> io::Result<()> {
    match outcome {
        SearchOutcome::Solved(plan) => {
            writeln!(w, "plan found, length {}", plan.len())?;
            for &action in &plan.actions {
                writeln!(w, "{}", task.actions[action].display_name(&task.problem.symbols))?;
            }
        }
        SearchOutcome::Unsolvable => writeln!(w, "no plan")?,
        SearchOutcome::TimedOut => writeln!(w, "timeout, no plan")?,
    }
    writeln!(w, "time: {:.3}s", stats.elapsed.as_secs_f64())?;
    writeln!(w, "nodes generated: {}", stats.nodes_generated)?;
    writeln!(w, "nodes expanded: {}", stats.nodes_expanded)?;
    Ok(())
}

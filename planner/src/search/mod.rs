//! Search Harness (§4.H): breadth-first and greedy best-first search over
//! ground states, consuming the heuristic driver (§4.G).

pub mod arena;

pub use arena::{Arena, Node, NodeId};

use crate::config::{Config, SearchStrategy};
use crate::heuristic;
use crate::plan::{SearchOutcome, SearchStats};
use crate::problem::Task;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::time::Instant;

pub fn search(task: &Task, config: &Config) -> (SearchOutcome, SearchStats) {
    match config.search {
        SearchStrategy::BreadthFirst => breadth_first(task, config),
        SearchStrategy::GreedyBestFirst => greedy_best_first(task, config),
    }
}

fn breadth_first(task: &Task, config: &Config) -> (SearchOutcome, SearchStats) {
    let start = Instant::now();
    let mut stats = SearchStats::default();
    let mut arena = Arena::new();
    let mut closed: HashSet<crate::problem::State> = HashSet::new();
    let mut open: VecDeque<NodeId> = VecDeque::new();

    let root = arena.push_root(task.initial.clone());
    stats.nodes_generated += 1;
    if task.is_goal(&arena.get(root).state) {
        stats.elapsed = start.elapsed();
        return (SearchOutcome::Solved(arena.extract_plan(root)), stats);
    }
    closed.insert(arena.get(root).state.clone());
    open.push_back(root);

    while let Some(id) = open.pop_front() {
        if start.elapsed() >= config.timeout {
            stats.elapsed = start.elapsed();
            return (SearchOutcome::TimedOut, stats);
        }
        stats.nodes_expanded += 1;
        let state = arena.get(id).state.clone();
        for action in task.applicable(&state).collect::<Vec<_>>() {
            let successor = task.apply(&state, action);
            if closed.contains(&successor) {
                continue;
            }
            closed.insert(successor.clone());
            let child = arena.push_child(id, successor, action);
            stats.nodes_generated += 1;
            if task.is_goal(&arena.get(child).state) {
                stats.elapsed = start.elapsed();
                return (SearchOutcome::Solved(arena.extract_plan(child)), stats);
            }
            open.push_back(child);
        }
    }
    tracing::debug!(expanded = stats.nodes_expanded, "breadth-first search exhausted open list");
    stats.elapsed = start.elapsed();
    (SearchOutcome::Unsolvable, stats)
}

struct Candidate {
    node: NodeId,
    heuristic: u32,
    generation: u64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.heuristic == other.heuristic && self.generation == other.generation
    }
}
impl Eq for Candidate {}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
/// Reversed so that `BinaryHeap` (a max-heap) pops the *lowest* heuristic
/// value first, breaking ties by earliest generation order (§4.H).
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .heuristic
            .cmp(&self.heuristic)
            .then_with(|| other.generation.cmp(&self.generation))
    }
}

fn greedy_best_first(task: &Task, config: &Config) -> (SearchOutcome, SearchStats) {
    let start = Instant::now();
    let mut stats = SearchStats::default();
    let mut arena = Arena::new();
    let mut closed: HashSet<crate::problem::State> = HashSet::new();
    let mut open: BinaryHeap<Candidate> = BinaryHeap::new();
    let mut generation: u64 = 0;

    let root = arena.push_root(task.initial.clone());
    stats.nodes_generated += 1;
    if task.is_goal(&arena.get(root).state) {
        stats.elapsed = start.elapsed();
        return (SearchOutcome::Solved(arena.extract_plan(root)), stats);
    }
    match heuristic::evaluate(task, config, &arena.get(root).state) {
        None => {
            tracing::debug!("initial state is a heuristic dead end");
            stats.elapsed = start.elapsed();
            return (SearchOutcome::Unsolvable, stats);
        }
        Some(h) => {
            closed.insert(arena.get(root).state.clone());
            open.push(Candidate {
                node: root,
                heuristic: h,
                generation,
            });
            generation += 1;
        }
    }

    while let Some(candidate) = open.pop() {
        if start.elapsed() >= config.timeout {
            stats.elapsed = start.elapsed();
            return (SearchOutcome::TimedOut, stats);
        }
        stats.nodes_expanded += 1;
        let id = candidate.node;
        let state = arena.get(id).state.clone();
        for action in task.applicable(&state).collect::<Vec<_>>() {
            let successor = task.apply(&state, action);
            if closed.contains(&successor) {
                continue;
            }
            closed.insert(successor.clone());
            let child = arena.push_child(id, successor.clone(), action);
            stats.nodes_generated += 1;
            if task.is_goal(&successor) {
                stats.elapsed = start.elapsed();
                return (SearchOutcome::Solved(arena.extract_plan(child)), stats);
            }
            if let Some(h) = heuristic::evaluate(task, config, &successor) {
                open.push(Candidate {
                    node: child,
                    heuristic: h,
                    generation,
                });
                generation += 1;
            }
            // a `None` heuristic (dead end) is simply never opened (§7).
        }
    }
    stats.elapsed = start.elapsed();
    (SearchOutcome::Unsolvable, stats)
}

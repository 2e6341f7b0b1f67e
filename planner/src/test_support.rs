//! Small fixtures shared by unit tests across modules: a three-block,
//! single-room blocks-world problem with a functional `on` fluent and a
//! boolean `clear` predicate, matching the literal end-to-end scenario used
//! throughout the design notes.

use crate::problem::{FnId, ProblemIndex, ProblemIndexBuilder, ReturnType, Signature, State, StateVar, Value};
use planner_symbols::{Sym, SymbolTable, TypeHierarchy};

pub fn blocks_world_problem() -> ProblemIndex {
    let types = TypeHierarchy::new(vec![(Sym::new("block"), None)]).unwrap();
    let symbols = SymbolTable::new(
        types,
        vec![
            (Sym::new("b1"), Sym::new("block")),
            (Sym::new("b2"), Sym::new("block")),
            (Sym::new("b3"), Sym::new("block")),
            (Sym::new("table"), Sym::new("block")),
        ],
    )
    .unwrap();
    let block = symbols.types.id_of("block").unwrap();

    let signatures = vec![
        Signature {
            name: Sym::new("on"),
            arg_types: vec![block],
            ret: ReturnType::Sym(block),
        },
        Signature {
            name: Sym::new("clear"),
            arg_types: vec![block],
            ret: ReturnType::Bool,
        },
    ];

    ProblemIndexBuilder::new(symbols, signatures).build(None).unwrap()
}

pub fn fn_id(problem: &ProblemIndex, name: &str) -> FnId {
    problem
        .signatures()
        .find(|&f| problem.signature(f).name.as_str() == name)
        .unwrap_or_else(|| panic!("no such function: {name}"))
}

/// `b1`, `b2` and `b3` all directly on the table, all clear.
pub fn blocks_world_initial(problem: &ProblemIndex) -> State {
    let on = fn_id(problem, "on");
    let clear = fn_id(problem, "clear");
    let table = problem.symbols.id("table").unwrap();
    let blocks = ["b1", "b2", "b3"].map(|n| problem.symbols.id(n).unwrap());

    let mut values = vec![Value::Bool(false); problem.num_variables()];
    for var in problem.variables() {
        let sv = problem.variable(var);
        let value = if sv.function == on {
            Value::Obj(table)
        } else if sv.function == clear {
            Value::Bool(blocks.contains(&sv.args[0]))
        } else {
            Value::Bool(false)
        };
        values[usize::from(var)] = value;
    }
    State::new(values)
}

#[allow(dead_code)]
pub fn state_var(problem: &ProblemIndex, function: &str, args: &[&str]) -> StateVar {
    let f = fn_id(problem, function);
    let args = args.iter().map(|a| problem.symbols.id(a).unwrap()).collect::<Vec<_>>();
    StateVar::new(f, args)
}

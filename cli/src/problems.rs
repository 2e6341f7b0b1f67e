//! Built-in problem catalog.
//!
//! Parsing an on-disk problem description into the core's data model is
//! explicitly the province of a parser collaborator this repository does not
//! include (§1 of the design notes this binary is built against). Until that
//! collaborator exists, `--data <dir>` selects one of a small number of
//! hand-encoded tasks by the final path component of the data directory,
//! rather than reading its contents.

use anyhow::{bail, Result};
use planner_core::formula::{Formula, Term};
use planner_core::problem::{ActionSchema, EffectTemplate, FnId, ReturnType, Signature, StateVar, Task, TaskBuilder, Value};
use planner_symbols::{Sym, SymbolTable, TypeHierarchy};

/// Resolves `--data <dir>` to one of the built-in tasks, keyed by the final
/// path component (e.g. `--data demos/blocksworld-3`).
pub fn load(data_dir: &std::path::Path) -> Result<Task> {
    let name = data_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    match name {
        "blocksworld-3" => Ok(blocksworld_3()),
        "gripper-2balls" => Ok(gripper_2balls()),
        "already-solved" => Ok(already_solved()),
        "unsolvable" => Ok(unsolvable()),
        other => bail!(
            "no built-in problem named {other:?} under {}; known problems: \
             blocksworld-3, gripper-2balls, already-solved, unsolvable",
            data_dir.display()
        ),
    }
}

/// §8 "Blocks world, 3 blocks": `h(init) = 1`, solved by `stack b1 b2`.
fn blocksworld_3() -> Task {
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
    let on = FnId::from_u32(0);
    let clear = FnId::from_u32(1);
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

    let stack = ActionSchema {
        name: Sym::new("stack"),
        params: vec![block, block],
        precondition: Formula::and(vec![
            Formula::predicate(clear, vec![Term::BoundVariable(0)], true),
            Formula::predicate(clear, vec![Term::BoundVariable(1)], true),
        ]),
        effects: vec![
            EffectTemplate {
                lhs: Term::NestedTerm(on, vec![Term::BoundVariable(0)]),
                rhs: Term::BoundVariable(1),
            },
            EffectTemplate {
                lhs: Term::NestedTerm(clear, vec![Term::BoundVariable(1)]),
                rhs: Term::Constant(Value::Bool(false)),
            },
        ],
    };

    let b1 = symbols.id("b1").unwrap();
    let b2 = symbols.id("b2").unwrap();
    let b3 = symbols.id("b3").unwrap();
    let table = symbols.id("table").unwrap();

    let goal = Formula::and(vec![
        Formula::atom(Term::NestedTerm(on, vec![Term::ObjectConstant(b1)]), Term::ObjectConstant(b2), true),
        Formula::atom(Term::NestedTerm(on, vec![Term::ObjectConstant(b2)]), Term::ObjectConstant(b3), true),
    ]);

    TaskBuilder::new(symbols, signatures, goal)
        .with_action(stack)
        .with_initial_fact(StateVar::new(on, smallvec::smallvec![b1]), Value::Obj(table))
        .with_initial_fact(StateVar::new(on, smallvec::smallvec![b2]), Value::Obj(b3))
        .with_initial_fact(StateVar::new(on, smallvec::smallvec![b3]), Value::Obj(table))
        .with_initial_fact(StateVar::new(clear, smallvec::smallvec![b1]), Value::Bool(true))
        .with_initial_fact(StateVar::new(clear, smallvec::smallvec![b2]), Value::Bool(true))
        .with_initial_fact(StateVar::new(clear, smallvec::smallvec![b3]), Value::Bool(false))
        .with_initial_fact(StateVar::new(clear, smallvec::smallvec![table]), Value::Bool(true))
        .build()
        .unwrap()
}

/// §8 "Gripper, 2 balls 1 room": one robot with a single gripper carries balls
/// one at a time between two rooms; expected plan length 5
/// (`pick`, `move A→B`, `drop` per ball, minus the shared `move`).
fn gripper_2balls() -> Task {
    let types = TypeHierarchy::new(vec![
        (Sym::new("room"), None),
        (Sym::new("ball"), None),
        (Sym::new("gripper"), None),
    ])
    .unwrap();
    // `carrying(g)` ranges over `ball` and needs a "nothing carried" sentinel
    // object of that type, declared explicitly rather than overloading `None`.
    let symbols = SymbolTable::new(
        types,
        vec![
            (Sym::new("room-a"), Sym::new("room")),
            (Sym::new("room-b"), Sym::new("room")),
            (Sym::new("ball1"), Sym::new("ball")),
            (Sym::new("ball2"), Sym::new("ball")),
            (Sym::new("no-ball"), Sym::new("ball")),
            (Sym::new("gripper1"), Sym::new("gripper")),
        ],
    )
    .unwrap();
    let room = symbols.types.id_of("room").unwrap();
    let ball = symbols.types.id_of("ball").unwrap();
    let gripper = symbols.types.id_of("gripper").unwrap();

    // `robot-at`: the (single) robot's room, modeled as a nullary fluent.
    let robot_at = FnId::from_u32(0);
    let ball_at = FnId::from_u32(1);
    let carrying = FnId::from_u32(2);
    let free = FnId::from_u32(3);

    let signatures = vec![
        Signature {
            name: Sym::new("robot-at"),
            arg_types: vec![],
            ret: ReturnType::Sym(room),
        },
        Signature {
            name: Sym::new("ball-at"),
            arg_types: vec![ball],
            ret: ReturnType::Sym(room),
        },
        Signature {
            name: Sym::new("carrying"),
            arg_types: vec![gripper],
            ret: ReturnType::Sym(ball),
        },
        Signature {
            name: Sym::new("free"),
            arg_types: vec![gripper],
            ret: ReturnType::Bool,
        },
    ];

    let room_a = symbols.id("room-a").unwrap();
    let room_b = symbols.id("room-b").unwrap();
    let ball1 = symbols.id("ball1").unwrap();
    let ball2 = symbols.id("ball2").unwrap();
    let no_ball = symbols.id("no-ball").unwrap();
    let gripper1 = symbols.id("gripper1").unwrap();

    let pick = ActionSchema {
        name: Sym::new("pick"),
        params: vec![ball, gripper, room],
        precondition: Formula::and(vec![
            Formula::atom(Term::NestedTerm(ball_at, vec![Term::BoundVariable(0)]), Term::BoundVariable(2), true),
            Formula::atom(Term::NestedTerm(robot_at, vec![]), Term::BoundVariable(2), true),
            Formula::predicate(free, vec![Term::BoundVariable(1)], true),
        ]),
        effects: vec![
            EffectTemplate {
                lhs: Term::NestedTerm(carrying, vec![Term::BoundVariable(1)]),
                rhs: Term::BoundVariable(0),
            },
            EffectTemplate {
                lhs: Term::NestedTerm(free, vec![Term::BoundVariable(1)]),
                rhs: Term::Constant(Value::Bool(false)),
            },
        ],
    };

    let drop = ActionSchema {
        name: Sym::new("drop"),
        params: vec![ball, gripper, room],
        precondition: Formula::and(vec![
            Formula::atom(Term::NestedTerm(carrying, vec![Term::BoundVariable(1)]), Term::BoundVariable(0), true),
            Formula::atom(Term::NestedTerm(robot_at, vec![]), Term::BoundVariable(2), true),
        ]),
        effects: vec![
            EffectTemplate {
                lhs: Term::NestedTerm(ball_at, vec![Term::BoundVariable(0)]),
                rhs: Term::BoundVariable(2),
            },
            EffectTemplate {
                lhs: Term::NestedTerm(free, vec![Term::BoundVariable(1)]),
                rhs: Term::Constant(Value::Bool(true)),
            },
        ],
    };

    let move_robot = ActionSchema {
        name: Sym::new("move"),
        params: vec![room, room],
        precondition: Formula::atom(Term::NestedTerm(robot_at, vec![]), Term::BoundVariable(0), true),
        effects: vec![EffectTemplate {
            lhs: Term::NestedTerm(robot_at, vec![]),
            rhs: Term::BoundVariable(1),
        }],
    };

    let goal = Formula::and(vec![
        Formula::atom(Term::NestedTerm(ball_at, vec![Term::ObjectConstant(ball1)]), Term::ObjectConstant(room_b), true),
        Formula::atom(Term::NestedTerm(ball_at, vec![Term::ObjectConstant(ball2)]), Term::ObjectConstant(room_b), true),
    ]);

    TaskBuilder::new(symbols, signatures, goal)
        .with_action(pick)
        .with_action(drop)
        .with_action(move_robot)
        .with_initial_fact(StateVar::new(robot_at, smallvec::smallvec![]), Value::Obj(room_a))
        .with_initial_fact(StateVar::new(ball_at, smallvec::smallvec![ball1]), Value::Obj(room_a))
        .with_initial_fact(StateVar::new(ball_at, smallvec::smallvec![ball2]), Value::Obj(room_a))
        .with_initial_fact(StateVar::new(ball_at, smallvec::smallvec![no_ball]), Value::Obj(room_a))
        .with_initial_fact(StateVar::new(carrying, smallvec::smallvec![gripper1]), Value::Obj(no_ball))
        .with_initial_fact(StateVar::new(free, smallvec::smallvec![gripper1]), Value::Bool(true))
        .build()
        .unwrap()
}

/// §8 "Already solved": a single boolean whose initial value already matches the goal.
fn already_solved() -> Task {
    let types = TypeHierarchy::new(vec![]).unwrap();
    let symbols = SymbolTable::new(types, vec![]).unwrap();
    let p = FnId::from_u32(0);
    let signatures = vec![Signature {
        name: Sym::new("p"),
        arg_types: vec![],
        ret: ReturnType::Bool,
    }];
    let goal = Formula::predicate(p, vec![], true);
    TaskBuilder::new(symbols, signatures, goal)
        .with_initial_fact(StateVar::new(p, smallvec::smallvec![]), Value::Bool(true))
        .build()
        .unwrap()
}

/// §8 "Unsolvable": `p` starts false, no action ever sets it, goal wants it true.
fn unsolvable() -> Task {
    let types = TypeHierarchy::new(vec![]).unwrap();
    let symbols = SymbolTable::new(types, vec![]).unwrap();
    let p = FnId::from_u32(0);
    let signatures = vec![Signature {
        name: Sym::new("p"),
        arg_types: vec![],
        ret: ReturnType::Bool,
    }];
    let goal = Formula::predicate(p, vec![], true);
    TaskBuilder::new(symbols, signatures, goal).build().unwrap()
}

use serde_json::{Value, json};

use super::model::ConflictModel;
use super::normalize::normalize_conflict;
use super::parse::parse_conflict_document;

pub(crate) fn model_from_json(value: Value) -> ConflictModel {
    let raw = parse_conflict_document(&value.to_string()).expect("fixture parses");
    normalize_conflict("fixture", raw).expect("fixture normalizes")
}

/// 0 -A(+1)-> 1 -B(-1)-> 2
pub(crate) fn chain() -> ConflictModel {
    model_from_json(json!({
        "nodes": [
            {"id": 0, "ordered": "1", "decimal": "0", "state": "NN",
             "reachable": [{"target": 1, "dm": "A", "payoffChange": 1}]},
            {"id": 1, "ordered": "2", "decimal": "1", "state": "YN",
             "reachable": [{"target": 2, "dm": "B", "payoffChange": -1}]},
            {"id": 2, "ordered": "3", "decimal": "3", "state": "YY", "reachable": []}
        ],
        "decisionMakers": [
            {"id": "A", "name": "Alpha", "options": [0]},
            {"id": "B", "name": "Beta", "options": [1]}
        ],
        "options": [{"name": "attack"}, {"name": "retreat"}]
    }))
}

/// Two states with moves in both directions by alternating movers, so
/// every walk can continue forever.
pub(crate) fn two_cycle() -> ConflictModel {
    model_from_json(json!({
        "nodes": [
            {"id": 0, "ordered": "1", "decimal": "0", "state": "N",
             "reachable": [
                 {"target": 1, "dm": "dm0", "payoffChange": 2},
                 {"target": 1, "dm": "dm1", "payoffChange": 0.5}
             ]},
            {"id": 1, "ordered": "2", "decimal": "1", "state": "Y",
             "reachable": [
                 {"target": 0, "dm": "dm0", "payoffChange": -3},
                 {"target": 0, "dm": "dm1", "payoffChange": 1}
             ]}
        ],
        "decisionMakers": [
            {"name": "Alpha", "options": [0]},
            {"name": "Beta", "options": []}
        ],
        "options": [{"name": "only"}]
    }))
}

pub(crate) fn three_party() -> ConflictModel {
    let node = |id: usize, state: &str, reachable: Value| {
        json!({
            "id": id,
            "ordered": (id + 1).to_string(),
            "decimal": (id * 3).to_string(),
            "state": state,
            "reachable": reachable,
        })
    };
    model_from_json(json!({
        "nodes": [
            node(0, "NNNNN", json!([
                {"target": 1, "dm": "dm0", "payoffChange": 1},
                {"target": 2, "dm": "dm2", "payoffChange": -2}
            ])),
            node(1, "YNNNN", json!([
                {"target": 3, "dm": "dm2", "payoffChange": 4},
                {"target": 0, "dm": "dm0", "payoffChange": 0}
            ])),
            node(2, "NNYNN", json!([{"target": 3, "dm": "dm0", "payoffChange": 2}])),
            node(3, "YNYNN", json!([]))
        ],
        "decisionMakers": [
            {"name": "Alpha", "options": [0, 1]},
            {"name": "Silent", "options": []},
            {"name": "Gamma", "options": [2, 3, 4]}
        ],
        "options": [
            {"name": "o0"}, {"name": "o1"}, {"name": "o2"}, {"name": "o3"}, {"name": "o4"}
        ],
        "startNode": 2
    }))
}

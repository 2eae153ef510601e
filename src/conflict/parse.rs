use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawConflict {
    pub(super) nodes: Vec<RawNode>,
    #[serde(default, rename = "decisionMakers")]
    pub(super) decision_makers: Vec<RawDecisionMaker>,
    #[serde(default)]
    pub(super) options: Vec<RawOption>,
    #[serde(default, rename = "startNode")]
    pub(super) start_node: Option<RawIndex>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawNode {
    pub(super) id: RawIndex,
    #[serde(default, deserialize_with = "label_string")]
    pub(super) ordered: String,
    #[serde(default, deserialize_with = "label_string")]
    pub(super) decimal: String,
    #[serde(default)]
    pub(super) state: RawState,
    #[serde(default)]
    pub(super) reachable: Vec<RawTransition>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawTransition {
    pub(super) target: RawIndex,
    #[serde(alias = "decisionMakerId")]
    pub(super) dm: String,
    #[serde(rename = "payoffChange", alias = "payoff")]
    pub(super) payoff_change: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawDecisionMaker {
    #[serde(default)]
    pub(super) id: Option<String>,
    pub(super) name: String,
    #[serde(default)]
    pub(super) options: Vec<usize>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawOption {
    Named { name: String },
    Bare(String),
}

impl RawOption {
    pub(super) fn into_name(self) -> String {
        match self {
            Self::Named { name } | Self::Bare(name) => name,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawIndex {
    Number(usize),
    Text(String),
}

impl RawIndex {
    pub(super) fn resolve(&self) -> Result<usize> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse()
                .with_context(|| format!("state id {text:?} is not a non-negative integer")),
        }
    }
}

/// Either `"YNY"` (one character per option) or `["Y", "N", "Y"]`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawState {
    Text(String),
    Values(Vec<Value>),
}

impl Default for RawState {
    fn default() -> Self {
        Self::Values(Vec::new())
    }
}

impl RawState {
    pub(super) fn into_values(self) -> Vec<String> {
        match self {
            Self::Text(text) => text.chars().map(String::from).collect(),
            Self::Values(values) => values.into_iter().map(value_string).collect(),
        }
    }
}

fn value_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn label_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(value_string)
}

pub(super) fn parse_conflict_document(raw: &str) -> Result<RawConflict> {
    let parsed: Value = serde_json::from_str(raw).context("invalid conflict JSON")?;
    if !parsed.is_object() {
        return Err(anyhow!("conflict document must be a JSON object"));
    }

    RawConflict::deserialize(parsed).context("conflict document does not match the expected layout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_string_and_numeric_ids() {
        let raw = r#"{
            "nodes": [
                {"id": "0", "ordered": 1, "decimal": "0", "state": "YN",
                 "reachable": [{"target": 1, "dm": "dm0", "payoffChange": 2}]},
                {"id": 1, "ordered": "2", "decimal": "1", "state": ["N", 1],
                 "reachable": [{"target": "0", "decisionMakerId": "dm1", "payoff": -1}]}
            ],
            "decisionMakers": [{"name": "A", "options": [0]}, {"name": "B", "options": [1]}],
            "options": [{"name": "escalate"}, "concede"]
        }"#;

        let conflict = parse_conflict_document(raw).expect("document parses");

        assert_eq!(conflict.nodes.len(), 2);
        assert_eq!(conflict.nodes[0].id.resolve().unwrap(), 0);
        assert_eq!(conflict.nodes[0].ordered, "1");
        assert_eq!(conflict.nodes[1].reachable[0].dm, "dm1");
        assert_eq!(conflict.nodes[1].reachable[0].payoff_change, -1.0);
        assert_eq!(
            conflict.nodes[1].state.clone().into_values(),
            vec!["N".to_owned(), "1".to_owned()]
        );
        let names = conflict
            .options
            .into_iter()
            .map(RawOption::into_name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["escalate", "concede"]);
    }

    #[test]
    fn rejects_non_object_documents() {
        let error = parse_conflict_document("[1, 2, 3]").unwrap_err();
        assert!(error.to_string().contains("JSON object"));
    }

    #[test]
    fn rejects_malformed_json() {
        let error = parse_conflict_document("{\"nodes\": [").unwrap_err();
        assert!(format!("{error:#}").contains("invalid conflict JSON"));
    }

    #[test]
    fn non_numeric_id_fails_to_resolve() {
        let index = RawIndex::Text("seven".to_owned());
        assert!(index.resolve().is_err());
    }
}

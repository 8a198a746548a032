//! Tipos do ClickUp API
//!
//! As entidades são mantidas quase opacas: apenas o `id` (e o que o cliente
//! precisa para navegar a hierarquia) é tipado, o resto dos campos vai para
//! `extra` e é re-serializado sem alteração.
//!
//! ## ⚠️ Notas Importantes
//!
//! - **IDs**: a API v2 devolve IDs ora como string, ora como número; aqui são sempre `String`
//! - **Project**: é uma "list" na nomenclatura do ClickUp
//! - **Issue**: é uma "task" na nomenclatura do ClickUp

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Deserializa ID que pode vir como string ou integer da API do ClickUp
pub(crate) fn deserialize_id_flexible<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(de::Error::custom("id must be string or number")),
    }
}

/// Team (workspace) - unidade de topo no ClickUp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: String,

    /// Demais campos da API (name, color, members, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Space - subdivisão de um Team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Projeto ("list" no ClickUp) anotado com o Team dono
///
/// A API não devolve o team de uma list, então o cliente acrescenta o campo
/// `__team`. Quando o team não é conhecido o campo é serializado como `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: String,

    #[serde(
        rename = "__team",
        default,
        serialize_with = "serialize_team_or_empty",
        deserialize_with = "deserialize_team_or_empty"
    )]
    pub team: Option<Team>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// ID do team dono, se resolvido
    pub fn team_id(&self) -> Option<&str> {
        self.team.as_ref().map(|t| t.id.as_str())
    }

    /// Anexa o team dono
    pub fn with_team(mut self, team: Option<Team>) -> Self {
        self.team = team;
        self
    }
}

fn serialize_team_or_empty<S>(team: &Option<Team>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match team {
        Some(team) => team.serialize(serializer),
        None => Map::new().serialize(serializer),
    }
}

fn deserialize_team_or_empty<'de, D>(deserializer: D) -> std::result::Result<Option<Team>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        other => Team::deserialize(other).map(Some).map_err(de::Error::custom),
    }
}

/// Issue ("task" no ClickUp)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_is_normalized() {
        let team: Team = serde_json::from_value(json!({ "id": 9001, "name": "Acme" })).unwrap();
        assert_eq!(team.id, "9001");
        assert_eq!(team.extra["name"], "Acme");
    }

    #[test]
    fn test_project_keeps_upstream_fields_and_adds_team() {
        let project: Project = serde_json::from_value(json!({
            "id": "list_1",
            "name": "Backlog",
            "task_count": 3
        }))
        .unwrap();
        assert!(project.team.is_none());

        let team: Team = serde_json::from_value(json!({ "id": "t1", "name": "Acme" })).unwrap();
        let value = serde_json::to_value(project.with_team(Some(team))).unwrap();

        assert_eq!(value["id"], "list_1");
        assert_eq!(value["name"], "Backlog");
        assert_eq!(value["task_count"], 3);
        assert_eq!(value["__team"]["id"], "t1");
        assert_eq!(value["__team"]["name"], "Acme");
    }

    #[test]
    fn test_unknown_team_serializes_as_empty_object() {
        let project = Project {
            id: "list_1".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["__team"], json!({}));

        let back: Project = serde_json::from_value(value).unwrap();
        assert_eq!(back.team, None);
        assert_eq!(back.team_id(), None);
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let result: std::result::Result<Issue, _> = serde_json::from_value(json!({ "id": [1] }));
        assert!(result.is_err());
    }
}

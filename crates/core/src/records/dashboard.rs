//! Back-office dashboard summary.

use serde::{Deserialize, Serialize};

use crate::types::Role;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub eventos: u64,
    pub avisos: u64,
    pub agenda: u64,
    pub horarios: u64,
}

/// One line of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub action: String,
    pub item: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Activity {
    /// Back-office screen the activity belongs to.
    #[must_use]
    pub fn screen(&self) -> Option<&'static str> {
        match self.kind.as_str() {
            "evento" => Some("/admin/eventos"),
            "aviso" => Some("/admin/avisos"),
            "agenda" => Some("/admin/agenda"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub activity: Vec<Activity>,
    #[serde(default, deserialize_with = "Role::deserialize_lenient")]
    pub user_role: Role,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_api_summary() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"stats":{"eventos":3,"avisos":5,"agenda":2,"horarios":9},
                "activity":[{"action":"Aviso Publicado","item":"Quermesse","type":"aviso","sort_id":4000}],
                "user_role":"gestor"}"#,
        )
        .unwrap();
        assert_eq!(summary.stats.horarios, 9);
        assert_eq!(summary.activity[0].screen(), Some("/admin/avisos"));
        assert_eq!(summary.user_role, Role::Gestor);
    }
}

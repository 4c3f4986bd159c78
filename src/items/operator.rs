use serde::{Deserialize, Serialize};

/// Raw operator record, as embedded in chat state updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorItem {
    #[serde(default, deserialize_with = "super::opt_string_or_number")]
    pub id: Option<String>,
    pub fullname: Option<String>,
    pub avatar: Option<String>,
}

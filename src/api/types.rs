use serde::Serialize;

use crate::EntryType;

/// Request body for POST (append) and PUT (replace).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntryPayload<'a> {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub body: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = EntryPayload {
            entry_type: EntryType::Task,
            body: "buy milk",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "task", "body": "buy milk" }));
    }
}

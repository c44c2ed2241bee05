//! Restaurant records and the list envelope the backend wraps them in.

use serde::{Deserialize, Serialize};

use super::UserInfo;

/// The owning user of a restaurant, present when the `owner` relation is
/// included in the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A restaurant as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
}

impl Restaurant {
    /// True when the expanded owner is the given user.
    pub fn is_owned_by(&self, user: &UserInfo) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.id == user.id)
    }

    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "No description available.",
        }
    }
}

/// Fields sent when creating a restaurant.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewRestaurant {
    pub name: String,
}

/// Query options for listing records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Relations to expand in the response.
    pub include: Vec<String>,
}

impl ListOptions {
    /// List restaurants with their owner expanded.
    pub fn with_owner() -> Self {
        Self {
            include: vec!["owner".to_string()],
        }
    }

    /// Query string fragment for the included relations, if any.
    pub fn relations_query(&self) -> Option<String> {
        if self.include.is_empty() {
            None
        } else {
            Some(format!("relations={}", self.include.join(",")))
        }
    }
}

/// Paginated list envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub from: Option<u32>,
    #[serde(default)]
    pub to: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl<T> Paginated<T> {
    /// A single page holding every item.
    pub fn single_page(data: Vec<T>) -> Self {
        let total = data.len() as u32;
        Self {
            current_page: Some(1),
            last_page: Some(1),
            from: (total > 0).then_some(1),
            to: (total > 0).then_some(total),
            total: Some(total),
            per_page: Some(total),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserInfo {
        UserInfo {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: None,
            role: Some("customer".to_string()),
        }
    }

    #[test]
    fn ownership_matches_on_owner_id_only() {
        let owned: Restaurant = serde_json::from_str(
            r#"{"id": 1, "name": "Noodle Bar", "owner": {"id": 7, "name": "Kim"}}"#,
        )
        .unwrap();
        let orphan: Restaurant = serde_json::from_str(r#"{"id": 2, "name": "Taqueria"}"#).unwrap();

        assert!(owned.is_owned_by(&user("7")));
        assert!(!owned.is_owned_by(&user("8")));
        assert!(!orphan.is_owned_by(&user("7")));
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let mut r: Restaurant = serde_json::from_str(r#"{"id": "a", "name": "Deli"}"#).unwrap();
        assert_eq!(r.description_or_default(), "No description available.");
        r.description = Some(String::new());
        assert_eq!(r.description_or_default(), "No description available.");
        r.description = Some("  ".to_string());
        assert_eq!(r.description_or_default(), "  ");
        r.description = Some("Sandwiches".to_string());
        assert_eq!(r.description_or_default(), "Sandwiches");
    }

    #[test]
    fn parses_paginated_envelope() {
        let page: Paginated<Restaurant> = serde_json::from_str(
            r#"{
                "data": [{"id": 3, "name": "Pho 24", "description": null}],
                "currentPage": 1, "lastPage": 1, "from": 1, "to": 1,
                "total": 1, "perPage": 20
            }"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, "3");
        assert_eq!(page.per_page, Some(20));
    }

    #[test]
    fn relations_query() {
        assert_eq!(ListOptions::default().relations_query(), None);
        assert_eq!(
            ListOptions::with_owner().relations_query().as_deref(),
            Some("relations=owner")
        );
    }
}

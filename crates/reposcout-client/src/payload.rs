//! Wire payload types for the GitHub-style search API
//!
//! Deserialized with serde and immediately converted into domain entities;
//! payload types never leave this crate.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{Owner, Repository, SearchResults};

/// Body of a `GET /search/repositories` response.
#[derive(Debug, Deserialize)]
pub struct SearchResponseBody {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<RepositoryItem>,
}

/// One repository item, as used both in search results and entity lookups.
#[derive(Debug, Deserialize)]
pub struct RepositoryItem {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: OwnerItem,
    pub stargazers_count: u32,
    #[serde(default)]
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub struct OwnerItem {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

impl From<OwnerItem> for Owner {
    fn from(item: OwnerItem) -> Self {
        Self {
            id: item.id,
            login: item.login,
            avatar_url: item.avatar_url,
            html_url: item.html_url,
        }
    }
}

impl From<RepositoryItem> for Repository {
    fn from(item: RepositoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            full_name: item.full_name,
            description: item.description,
            owner: item.owner.into(),
            star_count: item.stargazers_count,
            language: item.language,
            updated_at: item.updated_at,
            html_url: item.html_url,
        }
    }
}

impl From<SearchResponseBody> for SearchResults<Repository> {
    fn from(body: SearchResponseBody) -> Self {
        Self {
            items: body.items.into_iter().map(Repository::from).collect(),
            total_count: body.total_count,
            incomplete: body.incomplete_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "total_count": 12,
        "incomplete_results": false,
        "items": [
            {
                "id": 31792824,
                "name": "flutter",
                "full_name": "flutter/flutter",
                "description": "Build apps for any screen",
                "owner": {
                    "id": 14101776,
                    "login": "flutter",
                    "avatar_url": "https://avatars.githubusercontent.com/u/14101776",
                    "html_url": "https://github.com/flutter"
                },
                "stargazers_count": 170000,
                "language": "Dart",
                "updated_at": "2026-08-01T10:15:00Z",
                "html_url": "https://github.com/flutter/flutter"
            }
        ]
    }"#;

    #[test]
    fn deserializes_github_shape() {
        let body: SearchResponseBody =
            serde_json::from_str(SAMPLE).expect("sample payload must parse");
        assert_eq!(body.total_count, 12);
        assert!(!body.incomplete_results);
        assert_eq!(body.items.len(), 1);
    }

    #[test]
    fn converts_into_domain_entities() {
        let body: SearchResponseBody =
            serde_json::from_str(SAMPLE).expect("sample payload must parse");
        let results = SearchResults::from(body);

        let repo = results.items.first().expect("one item");
        assert_eq!(repo.full_name, "flutter/flutter");
        assert_eq!(repo.owner.login, "flutter");
        assert_eq!(repo.star_count, 170_000);
        assert!(repo.is_popular());
        assert!(results.has_more());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let json = r#"{
            "id": 1,
            "name": "r",
            "full_name": "o/r",
            "owner": {
                "id": 2,
                "login": "o",
                "avatar_url": "https://a",
                "html_url": "https://h"
            },
            "stargazers_count": 0,
            "updated_at": "2026-01-01T00:00:00Z",
            "html_url": "https://github.com/o/r"
        }"#;
        let item: RepositoryItem = serde_json::from_str(json).expect("must parse");
        assert!(item.description.is_none());
        assert!(item.language.is_none());
    }
}

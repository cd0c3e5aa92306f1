//! Team directory lookups.
//!
//! Resolves human names and aliases to tracker account ids, and account
//! ids back to display names. Pure lookups against the loaded config.

use crate::config::{JiraConfig, TeamMember};

/// Find a team member by name, tracker name, or alias.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[must_use]
pub fn find_member<'a>(config: &'a JiraConfig, name_or_alias: &str) -> Option<&'a TeamMember> {
    let normalized = name_or_alias.trim().to_lowercase();

    config.team.members.iter().find(|member| {
        if member.name.to_lowercase() == normalized {
            return true;
        }
        if member
            .jira
            .as_deref()
            .is_some_and(|jira| jira.to_lowercase() == normalized)
        {
            return true;
        }
        member
            .aliases
            .iter()
            .any(|alias| alias.to_lowercase() == normalized)
    })
}

/// Display name for a tracker account id, `"Unknown"` when unmapped.
#[must_use]
pub fn member_name(config: &JiraConfig, account_id: &str) -> String {
    config
        .team
        .members
        .iter()
        .find(|member| member.account_id == account_id)
        .map_or_else(|| "Unknown".to_string(), |member| member.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_members() -> JiraConfig {
        serde_json::from_str(
            r#"{
                "jira": { "site": "https://acme.atlassian.net", "project": "AS" },
                "team": {
                    "members": [
                        {
                            "name": "이승우",
                            "aliases": ["승우", "swlee"],
                            "jira": "Seungwoo Lee",
                            "accountId": "acc-lee"
                        },
                        { "name": "김수민", "accountId": "acc-kim" }
                    ]
                }
            }"#,
        )
        .expect("parse config")
    }

    #[test]
    fn test_find_by_name_alias_and_jira_name() {
        let config = config_with_members();
        assert_eq!(
            find_member(&config, "이승우").map(|m| m.account_id.as_str()),
            Some("acc-lee")
        );
        assert_eq!(
            find_member(&config, " swlee ").map(|m| m.account_id.as_str()),
            Some("acc-lee")
        );
        assert_eq!(
            find_member(&config, "seungwoo lee").map(|m| m.account_id.as_str()),
            Some("acc-lee")
        );
        assert!(find_member(&config, "nobody").is_none());
    }

    #[test]
    fn test_member_name_falls_back_to_unknown() {
        let config = config_with_members();
        assert_eq!(member_name(&config, "acc-kim"), "김수민");
        assert_eq!(member_name(&config, "acc-stranger"), "Unknown");
    }
}

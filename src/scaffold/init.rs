use once_cell::sync::Lazy;
use regex::Regex;

use crate::structures::ValidationIssue;

pub const VALID_ORGS: &[&str] = &["nl", "pvc", "tws", "mys"];
pub const VALID_ENVS: &[&str] = &["dev", "staging", "prod"];
pub const VALID_STACKS: &[&str] = &[
    "fastapi",
    "fastapi-hexagonal",
    "nodejs",
    "go",
    "dotnet",
    "flutter",
    "reactnative",
];
pub const VALID_REGIONS: &[&str] = &["euw", "eus", "wus", "san", "saf"];
pub const DEFAULT_REGION: &str = "euw";

static KEY_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)=([\w-]+)").expect("static regex"));
static PROJECT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]{2,20}$").expect("static regex"));

/// Paramètres d'initialisation d'un projet généré depuis le template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitConfig {
    pub org: String,
    pub env: String,
    pub project: String,
    pub techstack: String,
    pub region: String,
}

/// Lit une commande `/init org=nl env=dev project=myapi stack=fastapi [region=euw]`.
///
/// Renvoie `None` si le texte n'est pas une commande `/init` ou s'il manque
/// org, env, project ou stack. Les clés inconnues sont ignorées.
pub fn parse_init_command(text: &str) -> Option<InitConfig> {
    if !text.trim().starts_with("/init") {
        return None;
    }

    let (mut org, mut env, mut project, mut techstack, mut region) = (None, None, None, None, None);
    for caps in KEY_VALUE.captures_iter(text) {
        let value = caps[2].to_string();
        match &caps[1] {
            "org" => org = Some(value),
            "env" => env = Some(value),
            "project" => project = Some(value),
            "stack" | "techstack" => techstack = Some(value),
            "region" => region = Some(value),
            _ => {}
        }
    }

    Some(InitConfig {
        org: org?,
        env: env?,
        project: project?,
        techstack: techstack?,
        region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
    })
}

/// Déduit la configuration d'un nom de dépôt `<org>-<env>-<project>-<stack...>`.
pub fn from_repo_name(name: &str) -> Option<InitConfig> {
    let parts: Vec<&str> = name.split('-').collect();
    if parts.len() < 4 {
        return None;
    }
    Some(InitConfig {
        org: parts[0].to_string(),
        env: parts[1].to_string(),
        project: parts[2].to_string(),
        techstack: parts[3..].join("-"),
        region: DEFAULT_REGION.to_string(),
    })
}

impl InitConfig {
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !VALID_ORGS.contains(&self.org.as_str()) {
            issues.push(ValidationIssue::Org { value: self.org.clone(), valid: VALID_ORGS.join(", ") });
        }
        if !VALID_ENVS.contains(&self.env.as_str()) {
            issues.push(ValidationIssue::Env { value: self.env.clone(), valid: VALID_ENVS.join(", ") });
        }
        if !VALID_STACKS.contains(&self.techstack.as_str()) {
            issues.push(ValidationIssue::Stack { value: self.techstack.clone(), valid: VALID_STACKS.join(", ") });
        }
        if !VALID_REGIONS.contains(&self.region.as_str()) {
            issues.push(ValidationIssue::Region { value: self.region.clone(), valid: VALID_REGIONS.join(", ") });
        }
        if !PROJECT_NAME.is_match(&self.project) {
            issues.push(ValidationIssue::Project(self.project.clone()));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InitConfig {
        InitConfig {
            org: "nl".into(),
            env: "dev".into(),
            project: "myapi".into(),
            techstack: "fastapi".into(),
            region: "euw".into(),
        }
    }

    #[test]
    fn parses_full_command() {
        let cfg = parse_init_command("/init org=nl env=dev project=myapi stack=fastapi region=san").unwrap();
        assert_eq!(cfg, InitConfig { region: "san".into(), ..sample() });
    }

    #[test]
    fn region_defaults_to_euw() {
        let cfg = parse_init_command("  /init org=nl env=dev project=myapi techstack=fastapi").unwrap();
        assert_eq!(cfg.region, "euw");
        assert_eq!(cfg.techstack, "fastapi");
    }

    #[test]
    fn hyphenated_stack_is_kept_whole() {
        let cfg = parse_init_command("/init org=tws env=prod project=shop stack=fastapi-hexagonal").unwrap();
        assert_eq!(cfg.techstack, "fastapi-hexagonal");
    }

    #[test]
    fn rejects_non_init_and_incomplete_commands() {
        assert!(parse_init_command("hello org=nl env=dev project=x stack=go").is_none());
        assert!(parse_init_command("/init org=nl env=dev stack=go").is_none());
    }

    #[test]
    fn ignores_unknown_keys_and_last_duplicate_wins() {
        let cfg = parse_init_command("/init colour=blue org=pvc org=nl env=dev project=myapi stack=fastapi").unwrap();
        assert_eq!(cfg.org, "nl");
    }

    #[test]
    fn repo_name_joins_trailing_stack_parts() {
        let cfg = from_repo_name("nl-dev-myapi-fastapi-hexagonal").unwrap();
        assert_eq!(cfg.project, "myapi");
        assert_eq!(cfg.techstack, "fastapi-hexagonal");
        assert_eq!(cfg.region, "euw");
        assert!(from_repo_name("nl-dev-myapi").is_none());
    }

    #[test]
    fn valid_config_has_no_issues() {
        assert!(sample().validate().is_empty());
    }

    #[test]
    fn every_problem_is_reported() {
        let cfg = InitConfig {
            org: "acme".into(),
            env: "qa".into(),
            project: "My-App".into(),
            techstack: "rails".into(),
            region: "mars".into(),
        };
        let messages: Vec<String> = cfg.validate().iter().map(ToString::to_string).collect();
        assert_eq!(messages, [
            r#"Invalid org "acme". Valid: nl, pvc, tws, mys"#,
            r#"Invalid env "qa". Valid: dev, staging, prod"#,
            r#"Invalid stack "rails". Valid: fastapi, fastapi-hexagonal, nodejs, go, dotnet, flutter, reactnative"#,
            r#"Invalid region "mars". Valid: euw, eus, wus, san, saf"#,
            r#"Invalid project name "My-App". Must be 2-20 lowercase alphanumeric characters."#,
        ]);
    }

    #[test]
    fn project_name_length_bounds() {
        let short = InitConfig { project: "a".into(), ..sample() };
        let long = InitConfig { project: "a".repeat(21), ..sample() };
        let edge = InitConfig { project: "a".repeat(20), ..sample() };
        assert_eq!(short.validate().len(), 1);
        assert_eq!(long.validate().len(), 1);
        assert!(edge.validate().is_empty());
    }
}

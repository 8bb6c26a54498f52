use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::init::InitConfig;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Project,
    Org,
    Env,
}

impl Placeholder {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PROJECT" => Some(Self::Project),
            "ORG" => Some(Self::Org),
            "ENV" => Some(Self::Env),
            _ => None,
        }
    }

    fn value(self, config: &InitConfig) -> &str {
        match self {
            Self::Project => &config.project,
            Self::Org => &config.org,
            Self::Env => &config.env,
        }
    }
}

// Les marqueurs `{{NAME}}` inconnus restent tels quels
pub fn render(template: &str, config: &InitConfig) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match Placeholder::from_name(&caps[1]) {
            Some(placeholder) => placeholder.value(config).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

use serde::Serialize;

// Valeurs figées au rendu du template (voir `scaffold::render`), jamais lues à l'exécution
pub const PROJECT: &str = "{{PROJECT}}";
pub const ORG: &str = "{{ORG}}";
pub const ENV: &str = "{{ENV}}";

/// Corps de la réponse de `/`. L'ordre des champs fixe l'ordre des clés JSON.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ProjectInfo {
    pub message: &'static str,
    pub org: &'static str,
    pub env: &'static str,
}

impl ProjectInfo {
    pub const fn current() -> Self {
        Self { message: PROJECT, org: ORG, env: ENV }
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectInfo;

    #[test]
    fn serializes_placeholders_in_declared_order() {
        let body = serde_json::to_string(&ProjectInfo::current()).unwrap();
        assert_eq!(body, r#"{"message":"{{PROJECT}}","org":"{{ORG}}","env":"{{ENV}}"}"#);
    }

    #[test]
    fn has_exactly_three_keys() {
        let value = serde_json::to_value(ProjectInfo::current()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["env", "message", "org"]);
    }
}

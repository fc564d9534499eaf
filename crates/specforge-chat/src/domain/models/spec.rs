#[cfg(test)]
#[path = "spec_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Backend specification payload returned by the generation endpoint.
///
/// Every field is optional: the endpoint has shipped a flat shape (`framework`,
/// `database`, endpoint-style `api`) and a nested one (`stack`, resource-style
/// `api`, `env`, `extras`), and both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackendSpec {
    pub name: Option<String>,
    pub framework: Option<String>,
    pub database: Option<String>,
    pub stack: Option<StackSpec>,
    pub auth: Option<AuthSpec>,
    pub entities: Option<Vec<EntitySpec>>,
    pub api: Option<Vec<ApiSpec>>,
    pub env: Option<Vec<String>>,
    pub extras: Option<ExtrasSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSpec {
    pub language: Option<String>,
    pub framework: Option<String>,
    pub database: Option<String>,
    pub orm: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSpec {
    pub strategy: Option<String>,
    pub provider: Option<String>,
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySpec {
    pub name: String,
    pub description: Option<String>,
    pub fields: Option<Vec<FieldSpec>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiSpec {
    Endpoint {
        method: String,
        path: String,
        #[serde(default)]
        description: Option<String>,
    },
    Resource {
        resource: String,
        #[serde(default)]
        operations: Vec<String>,
        #[serde(default)]
        relations: Option<Vec<String>>,
    },
    Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtrasSpec {
    pub queue: Option<String>,
    pub cache: Option<String>,
    pub storage: Option<String>,
    pub third_party: Option<Vec<String>>,
}

fn text(value: &Value, key: &str) -> Option<String> {
    return value.get(key).and_then(Value::as_str).map(str::to_string);
}

/// Reads a list of names. Maps contribute their keys and plain strings count as one item.
fn names(value: &Value, key: &str) -> Option<Vec<String>> {
    let names = match value.get(key)? {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string).or_else(|| text(item, "name")))
            .collect(),
        Value::Object(map) => map.keys().cloned().collect(),
        Value::String(item) => vec![item.to_string()],
        Value::Null => return None,
        _ => {
            tracing::warn!(field = key, "ignoring spec field with an unexpected shape");
            return None;
        }
    };

    return Some(names);
}

fn entries<T, F>(value: &Value, key: &str, read: F) -> Option<Vec<T>>
where
    F: Fn(&Value) -> Option<T>,
{
    let field = value.get(key).filter(|field| !field.is_null())?;
    let Some(items) = field.as_array() else {
        tracing::warn!(field = key, "ignoring spec field that is not a list");
        return None;
    };

    return Some(items.iter().filter_map(read).collect());
}

impl StackSpec {
    fn read(value: &Value) -> Option<StackSpec> {
        if !value.is_object() {
            return None;
        }

        return Some(StackSpec {
            language: text(value, "language"),
            framework: text(value, "framework"),
            database: text(value, "database"),
            orm: text(value, "orm"),
        });
    }
}

impl AuthSpec {
    fn read(value: &Value) -> Option<AuthSpec> {
        if let Some(strategy) = value.as_str() {
            return Some(AuthSpec {
                strategy: Some(strategy.to_string()),
                ..AuthSpec::default()
            });
        }
        if !value.is_object() {
            return None;
        }

        return Some(AuthSpec {
            strategy: text(value, "strategy"),
            provider: text(value, "provider"),
            roles: names(value, "roles"),
        });
    }
}

impl EntitySpec {
    fn read(value: &Value) -> Option<EntitySpec> {
        if let Some(name) = value.as_str() {
            return Some(EntitySpec {
                name: name.to_string(),
                ..EntitySpec::default()
            });
        }

        let Some(name) = text(value, "name") else {
            tracing::warn!(entity = %value, "skipping entity without a name");
            return None;
        };

        return Some(EntitySpec {
            name,
            description: text(value, "description"),
            fields: entries(value, "fields", |field| {
                serde_json::from_value::<FieldSpec>(field.clone()).ok()
            }),
        });
    }
}

impl ExtrasSpec {
    fn read(value: &Value) -> Option<ExtrasSpec> {
        if !value.is_object() {
            return None;
        }

        return Some(ExtrasSpec {
            queue: text(value, "queue"),
            cache: text(value, "cache"),
            storage: text(value, "storage"),
            third_party: names(value, "thirdParty").or_else(|| names(value, "third_party")),
        });
    }
}

impl BackendSpec {
    /// Reads a spec out of an arbitrary JSON payload. Each field is read on its
    /// own, so a field with an unexpected shape is dropped without losing the rest.
    pub fn from_payload(payload: &Value) -> BackendSpec {
        if !payload.is_object() {
            tracing::warn!("spec payload is not an object");
            return BackendSpec::default();
        }

        return BackendSpec {
            name: text(payload, "name"),
            framework: text(payload, "framework"),
            database: text(payload, "database"),
            stack: payload.get("stack").and_then(StackSpec::read),
            auth: payload.get("auth").and_then(AuthSpec::read),
            entities: entries(payload, "entities", EntitySpec::read),
            api: entries(payload, "api", |entry| {
                serde_json::from_value::<ApiSpec>(entry.clone()).ok()
            }),
            env: names(payload, "env"),
            extras: payload.get("extras").and_then(ExtrasSpec::read),
        };
    }

    pub fn framework(&self) -> Option<&str> {
        return self.framework.as_deref().or_else(|| {
            self.stack
                .as_ref()
                .and_then(|stack| stack.framework.as_deref())
        });
    }

    pub fn database(&self) -> Option<&str> {
        return self.database.as_deref().or_else(|| {
            self.stack
                .as_ref()
                .and_then(|stack| stack.database.as_deref())
        });
    }

    pub fn entities(&self) -> &[EntitySpec] {
        return self.entities.as_deref().unwrap_or_default();
    }

    pub fn api(&self) -> &[ApiSpec] {
        return self.api.as_deref().unwrap_or_default();
    }

    pub fn env(&self) -> &[String] {
        return self.env.as_deref().unwrap_or_default();
    }
}

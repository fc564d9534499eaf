use serde_json::Value;

use crate::domain::models::ApiSpec;
use crate::domain::models::BackendSpec;

const DEFAULT_FRAMEWORK: &str = "Express.js";
const DEFAULT_DATABASE: &str = "PostgreSQL";
const DEFAULT_AUTH_STRATEGY: &str = "JWT";

const PROJECT_STRUCTURE: &str = r#"```bash
backend/
├── src/
│   ├── controllers/
│   ├── models/
│   ├── routes/
│   ├── middleware/
│   └── utils/
├── tests/
├── docs/
└── package.json
```"#;

fn operation_method(operation: &str) -> &'static str {
    match operation {
        "list" | "get" => "GET",
        "create" => "POST",
        "update" => "PUT",
        "delete" => "DELETE",
        _ => "ANY",
    }
}

fn operation_path(resource: &str, operation: &str) -> String {
    let base = format!("/{}", resource.trim_start_matches('/'));
    match operation {
        "get" | "update" | "delete" => format!("{base}/:id"),
        _ => base,
    }
}

fn endpoint_lines(api: &[ApiSpec]) -> Vec<String> {
    let mut lines: Vec<String> = vec![];
    for entry in api {
        match entry {
            ApiSpec::Endpoint {
                method,
                path,
                description,
            } => {
                let description = description.as_deref().unwrap_or("API endpoint");
                lines.push(format!("- **{method} {path}**: {description}"));
            }
            ApiSpec::Resource {
                resource,
                operations,
                ..
            } => {
                for operation in operations {
                    lines.push(format!(
                        "- **{} {}**: {} {}",
                        operation_method(operation),
                        operation_path(resource, operation),
                        operation,
                        resource
                    ));
                }
            }
            ApiSpec::Other(entry) => {
                tracing::warn!(entry = %entry, "API entry has an unexpected shape");
                lines.push(format!("- **API endpoint**: `{entry}`"));
            }
        }
    }

    return lines;
}

fn bullet_list(lines: Vec<String>, empty: &str) -> String {
    if lines.is_empty() {
        return empty.to_string();
    }

    return lines.join("\n");
}

/// Expands a generated spec into the markdown reply shown to the user.
pub fn format_spec(spec: &BackendSpec) -> String {
    let auth = spec.auth.clone().unwrap_or_default();
    let auth_strategy = auth.strategy.as_deref().unwrap_or(DEFAULT_AUTH_STRATEGY);
    let auth_provider = auth
        .provider
        .map(|provider| format!(" ({provider})"))
        .unwrap_or_default();

    let entities = spec
        .entities()
        .iter()
        .map(|entity| {
            let description = entity.description.as_deref().unwrap_or("Entity model");
            return format!("- **{}**: {}", entity.name, description);
        })
        .collect::<Vec<String>>();
    let endpoints = endpoint_lines(spec.api());

    let mut sections = vec![format!(
        "## 🏗️ Generated Backend Specification

### Architecture Overview
- **Framework**: {}
- **Database**: {}
- **Authentication**: {auth_strategy}{auth_provider}",
        spec.framework().unwrap_or(DEFAULT_FRAMEWORK),
        spec.database().unwrap_or(DEFAULT_DATABASE),
    )];

    sections.push(format!(
        "### 📊 Data Models ({})\n{}",
        entities.len(),
        bullet_list(entities, "- No entities defined")
    ));
    sections.push(format!(
        "### 🔗 API Endpoints ({})\n{}",
        spec.api().len(),
        bullet_list(endpoints, "- No endpoints defined")
    ));

    if !spec.env().is_empty() {
        let vars = spec
            .env()
            .iter()
            .map(|var| format!("- `{var}`"))
            .collect::<Vec<String>>();
        sections.push(format!("### ⚙️ Environment\n{}", vars.join("\n")));
    }

    if let Some(extras) = &spec.extras {
        let mut lines: Vec<String> = vec![];
        for (label, value) in [
            ("Queue", &extras.queue),
            ("Cache", &extras.cache),
            ("Storage", &extras.storage),
        ] {
            if let Some(value) = value {
                lines.push(format!("- **{label}**: {value}"));
            }
        }
        if let Some(services) = extras.third_party.as_ref().filter(|s| !s.is_empty()) {
            lines.push(format!("- **Third-party**: {}", services.join(", ")));
        }
        if !lines.is_empty() {
            sections.push(format!("### 🧩 Extras\n{}", lines.join("\n")));
        }
    }

    sections.push(
        "### 🛡️ Security Features
- Authentication and authorization
- Input validation and sanitization
- Rate limiting and CORS protection
- Environment-based configuration"
            .to_string(),
    );
    sections.push(format!("### 📁 Project Structure\n{PROJECT_STRUCTURE}"));
    sections.push(
        "Would you like me to scaffold this into a complete project, or would you like to modify any part of the specification?"
            .to_string(),
    );

    return sections.join("\n\n");
}

/// Formats a raw success payload from the endpoint.
pub fn format_spec_response(payload: &Value) -> String {
    return format_spec(&BackendSpec::from_payload(payload));
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::models::ContentBlock;
    use crate::domain::services::tokenize;

    #[test]
    fn it_formats_flat_specs() {
        let payload = json!({
            "framework": "FastAPI",
            "database": "MongoDB",
            "auth": { "strategy": "OAuth", "provider": "Google" },
            "entities": [
                { "name": "User", "description": "Registered account" },
                { "name": "Post" }
            ],
            "api": [
                { "method": "GET", "path": "/users", "description": "List users" },
                { "method": "POST", "path": "/posts" }
            ]
        });

        let text = format_spec_response(&payload);
        assert!(text.starts_with("## 🏗️ Generated Backend Specification"));
        assert!(text.contains("- **Framework**: FastAPI"));
        assert!(text.contains("- **Database**: MongoDB"));
        assert!(text.contains("- **Authentication**: OAuth (Google)"));
        assert!(text.contains("### 📊 Data Models (2)"));
        assert!(text.contains("- **User**: Registered account"));
        assert!(text.contains("- **Post**: Entity model"));
        assert!(text.contains("### 🔗 API Endpoints (2)"));
        assert!(text.contains("- **GET /users**: List users"));
        assert!(text.contains("- **POST /posts**: API endpoint"));
    }

    #[test]
    fn it_uses_defaults_for_empty_specs() {
        let text = format_spec_response(&json!({}));
        assert!(text.contains("- **Framework**: Express.js"));
        assert!(text.contains("- **Database**: PostgreSQL"));
        assert!(text.contains("- **Authentication**: JWT\n"));
        assert!(text.contains("### 📊 Data Models (0)\n- No entities defined"));
        assert!(text.contains("### 🔗 API Endpoints (0)\n- No endpoints defined"));
        assert!(!text.contains("### ⚙️ Environment"));
        assert!(!text.contains("### 🧩 Extras"));
    }

    #[test]
    fn it_formats_nested_stack_specs() {
        let payload = json!({
            "stack": { "language": "node", "framework": "NestJS", "database": "MySQL", "orm": "Prisma" },
            "auth": { "strategy": "session", "roles": ["admin"] },
            "entities": [{ "name": "Order", "fields": [{ "name": "id", "type": "uuid", "required": true, "unique": true }] }],
            "api": [{ "resource": "orders", "operations": ["list", "get", "create"] }],
            "env": ["DATABASE_URL", "JWT_SECRET"],
            "extras": { "queue": "BullMQ", "thirdParty": ["Stripe", "SendGrid"] }
        });

        let text = format_spec_response(&payload);
        assert!(text.contains("- **Framework**: NestJS"));
        assert!(text.contains("- **Database**: MySQL"));
        assert!(text.contains("- **Authentication**: session"));
        assert!(text.contains("### 🔗 API Endpoints (1)"));
        assert!(text.contains("- **GET /orders**: list orders"));
        assert!(text.contains("- **GET /orders/:id**: get orders"));
        assert!(text.contains("- **POST /orders**: create orders"));
        assert!(text.contains("- `DATABASE_URL`"));
        assert!(text.contains("- **Queue**: BullMQ"));
        assert!(text.contains("- **Third-party**: Stripe, SendGrid"));
    }

    #[test]
    fn it_prefers_top_level_values_over_stack() {
        let payload = json!({ "framework": "Django", "stack": { "framework": "Flask" } });
        assert!(format_spec_response(&payload).contains("- **Framework**: Django"));
    }

    #[test]
    fn it_keeps_fields_next_to_an_off_type_auth() {
        let text = format_spec_response(&json!({
            "framework": "FastAPI",
            "database": "MongoDB",
            "auth": "OAuth"
        }));
        assert!(text.contains("- **Framework**: FastAPI"));
        assert!(text.contains("- **Database**: MongoDB"));
        assert!(text.contains("- **Authentication**: OAuth\n"));
    }

    #[test]
    fn it_lists_env_given_as_a_map() {
        let text = format_spec_response(&json!({
            "framework": "FastAPI",
            "env": { "DATABASE_URL": "postgres://", "PORT": "8000" }
        }));
        assert!(text.contains("- **Framework**: FastAPI"));
        assert!(text.contains("### ⚙️ Environment\n- `DATABASE_URL`\n- `PORT`"));
    }

    #[test]
    fn it_ignores_fields_of_unexpected_type() {
        let text = format_spec_response(&json!({
            "framework": 42,
            "database": "SQLite",
            "auth": ["jwt"],
            "entities": { "User": {} },
            "extras": "none"
        }));
        assert!(text.contains("- **Framework**: Express.js"));
        assert!(text.contains("- **Database**: SQLite"));
        assert!(text.contains("- **Authentication**: JWT\n"));
        assert!(text.contains("### 📊 Data Models (0)"));
        assert!(!text.contains("### 🧩 Extras"));
    }

    #[test]
    fn it_counts_api_entries_and_renders_unknown_ones() {
        let text = format_spec_response(&json!({
            "api": [
                { "resource": "books", "operations": ["list", "create"] },
                { "method": "GET", "path": "/health" },
                { "summary": "webhooks" }
            ]
        }));
        assert!(text.contains("### 🔗 API Endpoints (3)"));
        assert!(text.contains("- **GET /books**: list books"));
        assert!(text.contains("- **POST /books**: create books"));
        assert!(text.contains("- **GET /health**: API endpoint"));
        assert!(text.contains(r#"- **API endpoint**: `{"summary":"webhooks"}`"#));
    }

    #[test]
    fn it_falls_back_for_unexpected_payloads() {
        let text = format_spec_response(&json!("just a string"));
        assert!(text.contains("- **Framework**: Express.js"));
    }

    #[test]
    fn it_produces_tokenizable_output() {
        let blocks = tokenize(&format_spec_response(&json!({})));
        let code: Vec<&ContentBlock> = blocks.iter().filter(|b| b.is_code()).collect();

        assert_eq!(blocks.len(), 3);
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].language(), Some("bash"));
        assert!(code[0].content().starts_with("backend/"));
    }
}

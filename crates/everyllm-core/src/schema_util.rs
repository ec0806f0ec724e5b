//! Helpers for turning Rust type information into JSON Schema that can be
//! shipped alongside a prompt. The JSON is produced with [`schemars`] and
//! forwarded to providers that support structured responses (OpenAI's
//! `response_format = json_schema`, which LiteLLM passes through).

use schemars::{
    JsonSchema,
    r#gen::{SchemaGenerator, SchemaSettings},
};
use serde_json::{Value, json};

use crate::error::Result;

/// Name used when the schema carries no title.
const FALLBACK_SCHEMA_NAME: &str = "response";

/// Generate a JSON Schema for `T` **inline**, i.e. without `$ref` pointers
/// to external definitions.
///
/// ```
/// use everyllm_core::schema_util::derive_response_schema;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct Foo { bar: String }
///
/// let schema = derive_response_schema::<Foo>().unwrap();
/// assert_eq!(schema["title"], "Foo");
/// ```
pub fn derive_response_schema<T>() -> Result<Value>
where
    T: JsonSchema,
{
    // Some providers do not resolve `$ref`s.
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = SchemaGenerator::new(settings);
    let root = generator.into_root_schema_for::<T>();

    Ok(serde_json::to_value(root)?)
}

/// Build the complete `response_format` object asking the provider to
/// answer with JSON matching `T`.
pub fn json_schema_response_format<T>() -> Result<Value>
where
    T: JsonSchema,
{
    let schema = derive_response_schema::<T>()?;
    let name = schema_name(&schema);

    Ok(json!({
        "type": "json_schema",
        "json_schema": {
            "name": name,
            "schema": schema,
        }
    }))
}

/// OpenAI only accepts `[a-zA-Z0-9_-]` in schema names, while schemars
/// titles for generic types look like `Wrapper_for_Foo` or contain spaces.
fn schema_name(schema: &Value) -> String {
    let name: String = schema
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(FALLBACK_SCHEMA_NAME)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();

    if name.is_empty() {
        FALLBACK_SCHEMA_NAME.to_owned()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Inner {
        value: u32,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Outer {
        title: String,
        inner: Inner,
    }

    #[test]
    fn nested_types_are_inlined() {
        let schema = derive_response_schema::<Outer>().unwrap();
        assert!(schema.get("definitions").is_none());
        assert_eq!(schema["properties"]["inner"]["type"], "object");
        assert_eq!(
            schema["properties"]["inner"]["properties"]["value"]["type"],
            "integer"
        );
    }

    #[test]
    fn response_format_wraps_schema() {
        let format = json_schema_response_format::<Outer>().unwrap();
        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["name"], "Outer");
        assert_eq!(format["json_schema"]["schema"]["title"], "Outer");
    }

    #[test]
    fn schema_names_are_sanitised() {
        assert_eq!(schema_name(&json!({"title": "Array of Foo"})), "Array_of_Foo");
        assert_eq!(schema_name(&json!({})), "response");
        assert_eq!(schema_name(&json!({"title": ""})), "response");
    }
}

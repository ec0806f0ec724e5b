use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[macro_export]
macro_rules! impl_builder_methods {
    ($builder:ident, $($field:ident: $field_type:ty),*) => {
        impl $builder {
            $(
                pub fn $field(mut self, $field: $field_type) -> Self {
                    self.$field = Some($field);
                    self
                }
            )*
        }
    };
}

/// Token accounting as reported by the provider. Passed through, never
/// aggregated.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    /// Provider-specific breakdowns such as `prompt_tokens_details`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

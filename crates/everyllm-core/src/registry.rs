//! Resolution of a [`ChatModel`] into the literal model string the
//! completion gateway expects.
//!
//! Resolution depends on three inputs only:
//!
//! * the model itself,
//! * the deployment mode (`OPENAI_MODE`), which renames the gateway-named
//!   models into the `azure/…` namespace,
//! * the `CUSTOM_MODEL` override for [`ChatModel::Custom`].
//!
//! Those inputs are captured in an immutable [`RegistrySettings`] snapshot.
//! [`resolve_model`] takes a fresh snapshot of the process environment on
//! every call, so changing the environment between two calls changes the
//! result. Long-lived components should build a [`ModelRegistry`] once and
//! keep it instead.
//!
//! ```rust
//! use everyllm_core::{
//!     model::ChatModel,
//!     registry::{ModelRegistry, OpenAiMode, RegistrySettings},
//! };
//!
//! let registry = ModelRegistry::new(RegistrySettings::default().with_openai_mode(OpenAiMode::Azure));
//! assert_eq!(registry.resolve(ChatModel::Gpt4o).unwrap(), "azure/gpt-4o");
//! assert_eq!(registry.resolve(ChatModel::LocalGemma).unwrap(), "gemma");
//! ```
use std::{env, fmt, str::FromStr};

use crate::{
    error::{EveryLlmError, Result},
    model::ChatModel,
};

pub const CUSTOM_MODEL_ENV: &str = "CUSTOM_MODEL";
pub const OPENAI_MODE_ENV: &str = "OPENAI_MODE";

/// Namespace prepended to gateway-named models in [`OpenAiMode::Azure`].
pub const AZURE_PREFIX: &str = "azure/";

/// Fixed provider names for models whose string form is not what the
/// provider expects (or that are renamed in gateway mode).
const MODEL_MAPPINGS: &[(ChatModel, &str)] = &[
    (ChatModel::Gpt4o, "gpt-4o"),
    (ChatModel::Gpt4oMini, "gpt-4o-mini"),
    (ChatModel::Claude35Sonnet, "Claude 3.5 Sonnet"),
];

/// Models that receive the gateway naming when running in Azure mode.
const DEFAULT_GATEWAY_MODELS: &[ChatModel] = &[ChatModel::Gpt4o, ChatModel::Gpt4oMini];

/// How hosted OpenAI models are deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenAiMode {
    /// Talk to OpenAI directly; model names are used as-is.
    #[default]
    OpenAi,
    /// Go through an Azure deployment; names become `azure/<deployment>`.
    Azure,
}

impl OpenAiMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OpenAiMode::OpenAi => "openai",
            OpenAiMode::Azure => "azure",
        }
    }

    /// Interpret a raw `OPENAI_MODE` value. Only `"azure"` switches modes;
    /// anything else keeps the default.
    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("azure") => OpenAiMode::Azure,
            None | Some("openai") => OpenAiMode::OpenAi,
            Some(_other) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    value = _other,
                    "unrecognised {OPENAI_MODE_ENV}, falling back to `openai`"
                );
                OpenAiMode::OpenAi
            }
        }
    }
}

impl fmt::Display for OpenAiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenAiMode {
    type Err = EveryLlmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "openai" => Ok(OpenAiMode::OpenAi),
            "azure" => Ok(OpenAiMode::Azure),
            other => Err(EveryLlmError::Configuration(format!(
                "unknown {OPENAI_MODE_ENV} `{other}`, expected `openai` or `azure`"
            ))),
        }
    }
}

/// Immutable snapshot of everything model resolution reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    pub openai_mode: OpenAiMode,
    pub custom_model: Option<String>,
    pub gateway_models: Vec<ChatModel>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            openai_mode: OpenAiMode::default(),
            custom_model: None,
            gateway_models: DEFAULT_GATEWAY_MODELS.to_vec(),
        }
    }
}

impl RegistrySettings {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup. Useful to inject
    /// configuration without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = lookup(OPENAI_MODE_ENV);

        Self {
            openai_mode: OpenAiMode::from_env_value(mode.as_deref()),
            custom_model: lookup(CUSTOM_MODEL_ENV),
            ..Self::default()
        }
    }

    pub fn with_openai_mode(mut self, mode: OpenAiMode) -> Self {
        self.openai_mode = mode;
        self
    }

    pub fn with_custom_model(mut self, model: impl Into<String>) -> Self {
        self.custom_model = Some(model.into());
        self
    }

    /// Extend the set of models renamed in [`OpenAiMode::Azure`].
    pub fn with_gateway_model(mut self, model: ChatModel) -> Self {
        if !self.gateway_models.contains(&model) {
            self.gateway_models.push(model);
        }
        self
    }
}

/// Resolves [`ChatModel`] values against one [`RegistrySettings`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    settings: RegistrySettings,
}

impl ModelRegistry {
    pub fn new(settings: RegistrySettings) -> Self {
        Self { settings }
    }

    pub fn from_env() -> Self {
        Self::new(RegistrySettings::from_env())
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub fn mode(&self) -> OpenAiMode {
        self.settings.openai_mode
    }

    /// Entry of the fixed mapping, if the model has one.
    pub fn mapped_name(model: ChatModel) -> Option<&'static str> {
        MODEL_MAPPINGS
            .iter()
            .find(|(candidate, _)| *candidate == model)
            .map(|(_, name)| *name)
    }

    /// Turn `model` into the literal string the provider expects.
    ///
    /// # Errors
    ///
    /// [`EveryLlmError::Configuration`] if `model` is [`ChatModel::Custom`]
    /// and no custom model is configured. Every other model resolves.
    pub fn resolve(&self, model: ChatModel) -> Result<String> {
        let resolved = if model == ChatModel::Custom {
            self.settings
                .custom_model
                .clone()
                .ok_or_else(|| EveryLlmError::missing_env(CUSTOM_MODEL_ENV))?
        } else {
            let name = Self::mapped_name(model).unwrap_or(model.as_str());

            if self.settings.openai_mode == OpenAiMode::Azure
                && self.settings.gateway_models.contains(&model)
            {
                gateway_name(name)
            } else {
                name.to_owned()
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(%model, mode = %self.settings.openai_mode, resolved = %resolved, "resolved model");

        Ok(resolved)
    }
}

/// Azure deployment names carry no dots (`gpt-3.5-turbo` is deployed as
/// `gpt-35-turbo`).
fn gateway_name(name: &str) -> String {
    format!("{AZURE_PREFIX}{}", name.replace('.', ""))
}

/// Resolve `model` against a fresh snapshot of the process environment.
pub fn resolve_model(model: ChatModel) -> Result<String> {
    ModelRegistry::from_env().resolve(model)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> RegistrySettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RegistrySettings::from_lookup(|key| vars.get(key).cloned())
    }

    fn resolve(vars: &[(&str, &str)], model: ChatModel) -> Result<String> {
        ModelRegistry::new(settings(vars)).resolve(model)
    }

    #[test]
    fn unmapped_models_fall_back_to_their_string_form() {
        for model in [
            ChatModel::CommandR,
            ChatModel::LocalLlama3,
            ChatModel::LocalGemma,
            ChatModel::LocalMistral,
            ChatModel::LocalPhi3_14b,
        ] {
            assert_eq!(ModelRegistry::mapped_name(model), None);
            assert_eq!(resolve(&[], model).unwrap(), model.as_str());
            assert_eq!(
                resolve(&[("OPENAI_MODE", "azure")], model).unwrap(),
                model.as_str()
            );
        }
    }

    #[test]
    fn mapped_models_use_the_mapping() {
        assert_eq!(
            resolve(&[], ChatModel::Claude35Sonnet).unwrap(),
            "Claude 3.5 Sonnet"
        );
        // Not gateway-named, so Azure mode leaves it alone.
        assert_eq!(
            resolve(&[("OPENAI_MODE", "azure")], ChatModel::Claude35Sonnet).unwrap(),
            "Claude 3.5 Sonnet"
        );
    }

    #[test]
    fn custom_model_requires_override() {
        let err = resolve(&[], ChatModel::Custom).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "CUSTOM_MODEL is not set");
    }

    #[test]
    fn custom_model_is_returned_verbatim() {
        for value in ["ollama/qwen2:7b", "azure/gpt-4.1", "", "  spaced  "] {
            assert_eq!(
                resolve(&[("CUSTOM_MODEL", value), ("OPENAI_MODE", "azure")], ChatModel::Custom)
                    .unwrap(),
                value
            );
        }
    }

    #[test]
    fn flagship_follows_openai_mode() {
        assert_eq!(resolve(&[], ChatModel::Gpt4o).unwrap(), "gpt-4o");
        assert_eq!(
            resolve(&[("OPENAI_MODE", "openai")], ChatModel::Gpt4o).unwrap(),
            "gpt-4o"
        );
        assert_eq!(
            resolve(&[("OPENAI_MODE", "azure")], ChatModel::Gpt4o).unwrap(),
            "azure/gpt-4o"
        );
    }

    #[test]
    fn economy_in_azure_mode_only_gains_prefix() {
        assert_eq!(resolve(&[], ChatModel::Gpt4oMini).unwrap(), "gpt-4o-mini");
        assert_eq!(
            resolve(&[("OPENAI_MODE", "azure")], ChatModel::Gpt4oMini).unwrap(),
            "azure/gpt-4o-mini"
        );
    }

    #[test]
    fn unknown_mode_keeps_default_naming() {
        let settings = settings(&[("OPENAI_MODE", "Azure")]);
        assert_eq!(settings.openai_mode, OpenAiMode::OpenAi);
        assert_eq!(
            ModelRegistry::new(settings).resolve(ChatModel::Gpt4o).unwrap(),
            "gpt-4o"
        );
    }

    #[test]
    fn gateway_name_strips_dots() {
        assert_eq!(gateway_name("gpt-3.5-turbo"), "azure/gpt-35-turbo");
        assert_eq!(gateway_name("gpt-4o"), "azure/gpt-4o");
    }

    #[test]
    fn gateway_table_is_extendable() {
        let registry = ModelRegistry::new(
            RegistrySettings::default()
                .with_openai_mode(OpenAiMode::Azure)
                .with_gateway_model(ChatModel::LocalLlama3),
        );
        assert_eq!(
            registry.resolve(ChatModel::LocalLlama3).unwrap(),
            "azure/llama31"
        );
    }

    #[test]
    fn resolution_is_repeatable() {
        let registry = ModelRegistry::new(settings(&[
            ("OPENAI_MODE", "azure"),
            ("CUSTOM_MODEL", "my-model"),
        ]));
        for model in ChatModel::ALL {
            assert_eq!(
                registry.resolve(model).unwrap(),
                registry.resolve(model).unwrap()
            );
        }
    }

    /// The only test in this crate that touches the process environment.
    #[test]
    fn resolve_model_rereads_the_environment_on_every_call() {
        // SAFETY: no other test in this binary reads or writes the environment.
        unsafe {
            env::remove_var(CUSTOM_MODEL_ENV);
            env::set_var(OPENAI_MODE_ENV, "openai");
        }
        assert_eq!(resolve_model(ChatModel::Gpt4o).unwrap(), "gpt-4o");
        assert!(resolve_model(ChatModel::Custom).unwrap_err().is_configuration());

        unsafe {
            env::set_var(OPENAI_MODE_ENV, "azure");
            env::set_var(CUSTOM_MODEL_ENV, "ollama/qwen2:7b");
        }
        assert_eq!(resolve_model(ChatModel::Gpt4o).unwrap(), "azure/gpt-4o");
        assert_eq!(resolve_model(ChatModel::Gpt4oMini).unwrap(), "azure/gpt-4o-mini");
        assert_eq!(resolve_model(ChatModel::Custom).unwrap(), "ollama/qwen2:7b");

        let snapshot = ModelRegistry::from_env();
        unsafe {
            env::remove_var(OPENAI_MODE_ENV);
            env::remove_var(CUSTOM_MODEL_ENV);
        }
        assert_eq!(resolve_model(ChatModel::Gpt4o).unwrap(), "gpt-4o");
        assert_eq!(snapshot.resolve(ChatModel::Gpt4o).unwrap(), "azure/gpt-4o");
    }

    #[test]
    fn mode_parses_strictly() {
        assert_eq!("azure".parse::<OpenAiMode>().unwrap(), OpenAiMode::Azure);
        assert_eq!("openai".parse::<OpenAiMode>().unwrap(), OpenAiMode::OpenAi);
        assert!("gcp".parse::<OpenAiMode>().is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-bot retrieval overrides. Every field is optional and falls back to
/// the deployment-wide `RagConfig` default when unset. Validated on
/// construction so a persisted bot never carries out-of-range tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotSettings {
    top_k: Option<i32>,
    similarity_threshold: Option<f32>,
}

impl BotSettings {
    pub fn new(top_k: Option<i32>, similarity_threshold: Option<f32>) -> Result<Self, String> {
        if let Some(k) = top_k {
            if !(1..=100).contains(&k) {
                return Err(format!("top_k must be between 1 and 100, got {}", k));
            }
        }

        if let Some(threshold) = similarity_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(format!(
                    "similarity_threshold must be between 0.0 and 1.0, got {}",
                    threshold
                ));
            }
        }

        Ok(Self {
            top_k,
            similarity_threshold,
        })
    }

    pub fn top_k(&self) -> Option<i32> {
        self.top_k
    }

    pub fn similarity_threshold(&self) -> Option<f32> {
        self.similarity_threshold
    }
}

/// A logical tenant. Retrieval for a bot is scoped to the documents
/// associated with it, never the whole corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    id: Uuid,
    name: String,
    system_prompt: String,
    is_active: bool,
    settings: BotSettings,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Bot {
    pub fn new(name: String, system_prompt: String, settings: BotSettings) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            system_prompt,
            is_active: true,
            settings,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        id: Uuid,
        name: String,
        system_prompt: String,
        is_active: bool,
        settings: BotSettings,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            system_prompt,
            is_active,
            settings,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

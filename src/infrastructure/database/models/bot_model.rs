use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Bot, BotSettings};
use crate::infrastructure::database::schema::bots;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BotModel {
    pub id: Uuid,
    pub name: String,
    pub system_prompt: String,
    pub is_active: bool,
    pub settings_top_k: Option<i32>,
    pub settings_similarity_threshold: Option<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = bots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBotModel {
    pub id: Uuid,
    pub name: String,
    pub system_prompt: String,
    pub is_active: bool,
    pub settings_top_k: Option<i32>,
    pub settings_similarity_threshold: Option<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Bot> for NewBotModel {
    fn from(bot: &Bot) -> Self {
        Self {
            id: bot.id(),
            name: bot.name().to_string(),
            system_prompt: bot.system_prompt().to_string(),
            is_active: bot.is_active(),
            settings_top_k: bot.settings().top_k(),
            settings_similarity_threshold: bot.settings().similarity_threshold(),
            created_at: bot.created_at(),
            updated_at: bot.updated_at(),
        }
    }
}

impl TryFrom<BotModel> for Bot {
    type Error = String;

    fn try_from(model: BotModel) -> Result<Self, Self::Error> {
        let settings =
            BotSettings::new(model.settings_top_k, model.settings_similarity_threshold)?;

        Ok(Bot::from_stored(
            model.id,
            model.name,
            model.system_prompt,
            model.is_active,
            settings,
            model.created_at,
            model.updated_at,
        ))
    }
}

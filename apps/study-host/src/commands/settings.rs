//! Settings commands.

use super::CommandError;
use crate::db::SettingsRepository;
use crate::state::AppState;
use matchcards_core::EngineConfig;

/// Get stored game settings.
pub async fn get_game_settings(state: &AppState) -> Result<EngineConfig, CommandError> {
    let repo = state.repository.lock().expect("repository lock");
    repo.get_game_settings().map_err(Into::into)
}

/// Save game settings. Sizes are clamped to playable values and the seed is
/// not stored.
pub async fn save_game_settings(
    settings: EngineConfig,
    state: &AppState,
) -> Result<EngineConfig, CommandError> {
    let settings = EngineConfig {
        seed: None,
        ..settings.validated()
    };
    let repo = state.repository.lock().expect("repository lock");
    repo.save_game_settings(&settings)?;
    Ok(settings)
}

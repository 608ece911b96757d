//! Item and team transitions.
//!
//! Every operation reads a snapshot and returns a new one; the input is never
//! modified. Validation failures return an error and produce no snapshot.

use super::Snapshot;
use crate::config::PickerConfig;
use crate::core::{InputKind, Item, PickerError, Result, Team};

#[derive(Debug, Clone, Default)]
pub struct CollectionManager {
    config: PickerConfig,
}

impl CollectionManager {
    pub fn new(config: PickerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Snapshot used when nothing is stored: one empty default team.
    pub fn initial_snapshot(&self) -> Snapshot {
        Snapshot::with_default_team(&self.config.default_team_name, Default::default())
    }

    // ========================================================================
    // Items (active team)
    // ========================================================================

    /// Append an item to the active team.
    pub fn add_item(&self, snapshot: &Snapshot, text: &str) -> Result<Snapshot> {
        let text = validate_input(text, self.config.max_item_length, InputKind::Item)?;
        Ok(update_active_team(snapshot, |team| {
            team.items.push_back(Item::new(text));
            true
        }))
    }

    /// Remove an item from the active team; unknown ids are ignored.
    pub fn remove_item(&self, snapshot: &Snapshot, item_id: &str) -> Snapshot {
        update_active_team(snapshot, |team| {
            let before = team.items.len();
            team.items.retain(|item| item.id != item_id);
            team.items.len() != before
        })
    }

    /// Empty the active team.
    pub fn clear_items(&self, snapshot: &Snapshot) -> Snapshot {
        update_active_team(snapshot, |team| {
            if team.items.is_empty() {
                return false;
            }
            team.items.clear();
            true
        })
    }

    // ========================================================================
    // Teams
    // ========================================================================

    /// Append a new empty team and make it active.
    pub fn add_team(&self, snapshot: &Snapshot, name: &str) -> Result<Snapshot> {
        let name = validate_input(name, self.config.max_team_name_length, InputKind::TeamName)?;
        let team = Team::new(name);
        let active = Some(team.id.clone());

        let mut teams = snapshot.teams().clone();
        teams.push_back(team);
        Ok(snapshot.with_teams(teams, active))
    }

    pub fn rename_team(&self, snapshot: &Snapshot, team_id: &str, new_name: &str) -> Result<Snapshot> {
        let name = validate_input(new_name, self.config.max_team_name_length, InputKind::TeamName)?;
        let Some(index) = snapshot.position(team_id) else {
            return Ok(snapshot.clone());
        };

        let mut teams = snapshot.teams().clone();
        let mut team = teams[index].clone();
        if team.name == name {
            return Ok(snapshot.clone());
        }
        team.name = name;
        teams.set(index, team);
        Ok(snapshot.with_teams(teams, snapshot.active_team_id().cloned()))
    }

    /// Remove a team and its items. The last remaining team cannot be deleted;
    /// deleting the active team activates the first remaining one.
    pub fn delete_team(&self, snapshot: &Snapshot, team_id: &str) -> Result<Snapshot> {
        if snapshot.teams().len() <= 1 {
            return Err(PickerError::CannotDeleteLastTeam);
        }
        let Some(index) = snapshot.position(team_id) else {
            return Ok(snapshot.clone());
        };

        let mut teams = snapshot.teams().clone();
        teams.remove(index);

        let active = match snapshot.active_team_id() {
            Some(active) if active != team_id => Some(active.clone()),
            _ => teams.front().map(|team| team.id.clone()),
        };
        Ok(snapshot.with_teams(teams, active))
    }

    /// Make `team_id` active; unknown ids are ignored.
    pub fn switch_active_team(&self, snapshot: &Snapshot, team_id: &str) -> Snapshot {
        match snapshot.team(team_id) {
            Some(team) => snapshot.with_teams(snapshot.teams().clone(), Some(team.id.clone())),
            None => snapshot.clone(),
        }
    }
}

/// Trimmed input, or the reason it is rejected. Length is measured in
/// characters on the untrimmed text.
pub fn validate_input(raw: &str, max: usize, kind: InputKind) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PickerError::EmptyInput { kind });
    }
    if raw.chars().count() > max {
        return Err(PickerError::InputTooLong { kind, max });
    }
    Ok(trimmed.to_string())
}

/// Apply `edit` to a copy of the active team. `edit` reports whether it
/// changed anything; unchanged edits and missing active teams return the input.
fn update_active_team<F>(snapshot: &Snapshot, edit: F) -> Snapshot
where
    F: FnOnce(&mut Team) -> bool,
{
    let Some(index) = snapshot.active_position() else {
        return snapshot.clone();
    };

    let mut team = snapshot.teams()[index].clone();
    if !edit(&mut team) {
        return snapshot.clone();
    }

    let mut teams = snapshot.teams().clone();
    teams.set(index, team);
    snapshot.with_teams(teams, snapshot.active_team_id().cloned())
}

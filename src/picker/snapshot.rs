use crate::core::{EntryId, Item, Team, TeamSummary};
use im::Vector;

/// Immutable picture of all teams and the active team at one point in time.
///
/// Cloning is cheap: the team and item sequences are persistent vectors that
/// share structure between versions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    teams: Vector<Team>,
    active_team_id: Option<EntryId>,
}

impl Snapshot {
    /// Build a snapshot, pointing a dangling or missing active id at the first team.
    pub fn new(teams: Vector<Team>, active_team_id: Option<EntryId>) -> Self {
        Self {
            teams,
            active_team_id,
        }
        .repaired()
    }

    /// Single-list snapshot: one implicit team holding `items`.
    pub fn with_default_team(name: &str, items: Vector<Item>) -> Self {
        let team = Team::with_items(name, items);
        let active = Some(team.id.clone());
        Self {
            teams: Vector::unit(team),
            active_team_id: active,
        }
    }

    pub fn teams(&self) -> &Vector<Team> {
        &self.teams
    }

    pub fn active_team_id(&self) -> Option<&EntryId> {
        self.active_team_id.as_ref()
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    pub fn active_team(&self) -> Option<&Team> {
        self.active_team_id.as_deref().and_then(|id| self.team(id))
    }

    /// Items of the active team; empty when there is none.
    pub fn active_items(&self) -> Vector<Item> {
        self.active_team()
            .map(|team| team.items.clone())
            .unwrap_or_default()
    }

    pub fn summaries(&self) -> Vec<TeamSummary> {
        self.teams
            .iter()
            .map(|team| TeamSummary {
                id: team.id.clone(),
                name: team.name.clone(),
                item_count: team.item_count(),
                active: self.active_team_id.as_deref() == Some(team.id.as_str()),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.teams.iter().position(|team| team.id == id)
    }

    pub(crate) fn active_position(&self) -> Option<usize> {
        self.active_team_id.as_deref().and_then(|id| self.position(id))
    }

    pub(crate) fn with_teams(&self, teams: Vector<Team>, active_team_id: Option<EntryId>) -> Self {
        Self {
            teams,
            active_team_id,
        }
    }

    /// Same snapshot with the active id corrected to an existing team.
    pub fn repaired(self) -> Self {
        if self.active_team().is_some() || (self.teams.is_empty() && self.active_team_id.is_none()) {
            return self;
        }
        let active_team_id = self.teams.front().map(|team| team.id.clone());
        Self {
            teams: self.teams,
            active_team_id,
        }
    }
}

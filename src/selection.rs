//! In-progress team draft: name, search filter and picked classmates.

use crate::types::Candidate;

/// Snapshot of the draft handed to the submission pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTeam {
    pub name: String,
    pub members: Vec<i64>,
}

/// Selection is keyed by id only and is not checked against the roster.
/// `selected.len() <= capacity` holds after every operation.
#[derive(Debug, Clone)]
pub struct SelectionState {
    capacity: usize,
    team_name: String,
    search_term: String,
    selected: Vec<i64>,
}

impl SelectionState {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            team_name: String::new(),
            search_term: String::new(),
            selected: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Selected ids in the order they were picked.
    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    pub fn set_team_name(&mut self, name: impl Into<String>) {
        self.team_name = name.into();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.selected.len())
    }

    /// Remove if present, otherwise add when capacity remains.
    /// Returns whether the state changed.
    pub fn toggle(&mut self, id: i64) -> bool {
        if let Some(pos) = self.selected.iter().position(|&s| s == id) {
            self.selected.remove(pos);
            return true;
        }

        if self.selected.len() < self.capacity {
            self.selected.push(id);
            true
        } else {
            tracing::debug!(id, capacity = self.capacity, "selection full, ignoring toggle");
            false
        }
    }

    pub fn is_selectable(&self, id: i64) -> bool {
        self.is_selected(id) || self.selected.len() < self.capacity
    }

    /// Roster entries matching the search term, in roster order.
    pub fn visible_candidates<'a>(&self, roster: &'a [Candidate]) -> Vec<&'a Candidate> {
        roster
            .iter()
            .filter(|c| c.matches(&self.search_term))
            .collect()
    }

    /// Keep only ids still present in `roster`; returns the dropped ones.
    pub fn reconcile(&mut self, roster: &[Candidate]) -> Vec<i64> {
        let (kept, dropped): (Vec<i64>, Vec<i64>) = self
            .selected
            .iter()
            .partition(|id| roster.iter().any(|c| c.id == **id));
        self.selected = kept;
        dropped
    }

    pub fn draft(&self) -> DraftTeam {
        DraftTeam {
            name: self.team_name.clone(),
            members: self.selected.clone(),
        }
    }

    /// Back to the initial state, keeping the capacity.
    pub fn clear(&mut self) {
        self.team_name.clear();
        self.search_term.clear();
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Candidate> {
        vec![
            Candidate::new(1, "A", "a@x"),
            Candidate::new(2, "B", "b@x"),
            Candidate::new(3, "C", "c@x"),
        ]
    }

    #[test]
    fn test_initial_state() {
        let state = SelectionState::new(2);
        assert_eq!(state.team_name(), "");
        assert_eq!(state.search_term(), "");
        assert!(state.selected().is_empty());
        assert_eq!(state.remaining(), 2);
    }

    #[test]
    fn test_toggle_sequence() {
        let mut state = SelectionState::new(2);
        state.toggle(1);
        state.toggle(2);
        assert_eq!(state.selected(), &[1, 2]);

        assert!(!state.toggle(3));
        assert_eq!(state.selected(), &[1, 2]);

        state.toggle(1);
        assert_eq!(state.selected(), &[2]);

        state.toggle(3);
        assert_eq!(state.selected(), &[2, 3]);
    }

    #[test]
    fn test_removal_never_blocked() {
        let mut state = SelectionState::new(1);
        state.toggle(7);
        assert_eq!(state.remaining(), 0);
        assert!(state.toggle(7));
        assert!(state.selected().is_empty());
    }

    #[test]
    fn test_capacity_holds_for_any_sequence() {
        // Small LCG so the sequence is deterministic but irregular.
        let mut seed: u64 = 0x5eed;
        for capacity in 0..4 {
            let mut state = SelectionState::new(capacity);
            for _ in 0..500 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let id = (seed >> 33) as i64 % 6;
                let before = state.selected().to_vec();
                state.toggle(id);
                assert!(state.selected().len() <= capacity);
                if before.contains(&id) {
                    assert!(!state.is_selected(id));
                } else if before.len() == capacity {
                    assert_eq!(state.selected(), before.as_slice());
                }
            }
        }
    }

    #[test]
    fn test_toggle_unknown_id_allowed() {
        let mut state = SelectionState::new(2);
        assert!(state.toggle(999));
        assert!(state.is_selected(999));
    }

    #[test]
    fn test_is_selectable() {
        let mut state = SelectionState::new(2);
        state.toggle(1);
        state.toggle(2);
        assert!(state.is_selectable(1));
        assert!(!state.is_selectable(3));
        state.toggle(2);
        assert!(state.is_selectable(3));
    }

    #[test]
    fn test_visible_candidates_empty_search_keeps_order() {
        let state = SelectionState::new(2);
        let roster = roster();
        let visible: Vec<i64> = state.visible_candidates(&roster).iter().map(|c| c.id).collect();
        assert_eq!(visible, vec![1, 2, 3]);
    }

    #[test]
    fn test_visible_candidates_case_insensitive() {
        let roster = vec![
            Candidate::new(1, "Ana Ruiz", "ana@udea.edu.co"),
            Candidate::new(2, "Pedro", "pedro@gmail.com"),
        ];
        let mut state = SelectionState::new(2);
        for term in ["ANA", "ruiz", "UDEA"] {
            state.set_search_term(term);
            let visible = state.visible_candidates(&roster);
            assert_eq!(visible.len(), 1, "term {term}");
            assert_eq!(visible[0].id, 1);
        }

        state.set_search_term("zzz");
        assert!(state.visible_candidates(&roster).is_empty());
    }

    #[test]
    fn test_visible_candidates_matches_email_only() {
        let roster = roster();
        let mut state = SelectionState::new(2);
        state.set_search_term("@X");
        assert_eq!(state.visible_candidates(&roster).len(), 3);
    }

    #[test]
    fn test_reconcile_drops_stale_ids() {
        let mut state = SelectionState::new(2);
        state.toggle(2);
        state.toggle(42);
        let dropped = state.reconcile(&roster());
        assert_eq!(dropped, vec![42]);
        assert_eq!(state.selected(), &[2]);
    }

    #[test]
    fn test_draft_and_clear() {
        let mut state = SelectionState::new(2);
        state.set_team_name("Team X");
        state.set_search_term("a");
        state.toggle(1);
        assert_eq!(
            state.draft(),
            DraftTeam {
                name: "Team X".into(),
                members: vec![1]
            }
        );

        state.clear();
        assert_eq!(state.team_name(), "");
        assert_eq!(state.search_term(), "");
        assert!(state.selected().is_empty());
        assert_eq!(state.capacity(), 2);
    }
}

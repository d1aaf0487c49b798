use serde::{Deserialize, Serialize};

/// The two amount entry fields of the send flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Fiat,
    Asset,
}

impl Field {
    /// The opposite field (the mirror target when this one is authoritative).
    pub fn other(&self) -> Field {
        match self {
            Field::Fiat => Field::Asset,
            Field::Asset => Field::Fiat,
        }
    }
}

/// Which fields the user currently has under active edit.
///
/// Set by the driving layer from its input events; the synchronizer only
/// reads it. This replaces activeElement-style probing with explicit data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    pub fiat: bool,
    pub asset: bool,
}

impl FocusState {
    pub fn is_focused(&self, field: Field) -> bool {
        match field {
            Field::Fiat => self.fiat,
            Field::Asset => self.asset,
        }
    }

    pub fn set_focused(&mut self, field: Field, focused: bool) {
        match field {
            Field::Fiat => self.fiat = focused,
            Field::Asset => self.asset = focused,
        }
    }

    /// Drop focus from both fields (blur).
    pub fn clear(&mut self) {
        self.fiat = false;
        self.asset = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_swaps() {
        assert_eq!(Field::Fiat.other(), Field::Asset);
        assert_eq!(Field::Asset.other(), Field::Fiat);
    }

    #[test]
    fn focus_roundtrip() {
        let mut focus = FocusState::default();
        assert!(!focus.is_focused(Field::Asset));
        focus.set_focused(Field::Asset, true);
        assert!(focus.is_focused(Field::Asset));
        assert!(!focus.is_focused(Field::Fiat));
        focus.clear();
        assert!(!focus.is_focused(Field::Asset));
    }
}

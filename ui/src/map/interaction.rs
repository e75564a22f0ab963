use fleet::JourneyID;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupState {
    Idle,
    Open(JourneyID),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapEvent {
    MarkerClicked(JourneyID),
    PopupClosed,
    ClickedOutside,
}

impl PopupState {
    pub fn handle(self, ev: MapEvent) -> Self {
        match ev {
            // Clicking another marker while a popup is up just moves the popup
            MapEvent::MarkerClicked(id) => PopupState::Open(id),
            MapEvent::PopupClosed | MapEvent::ClickedOutside => PopupState::Idle,
        }
    }

    pub fn open_for(self) -> Option<JourneyID> {
        match self {
            PopupState::Idle => None,
            PopupState::Open(id) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        let a = JourneyID(0);
        let b = JourneyID(1);

        let state = PopupState::Idle;
        assert_eq!(state.handle(MapEvent::PopupClosed), PopupState::Idle);
        assert_eq!(state.handle(MapEvent::ClickedOutside), PopupState::Idle);

        let state = state.handle(MapEvent::MarkerClicked(a));
        assert_eq!(state, PopupState::Open(a));
        assert_eq!(state.open_for(), Some(a));

        let state = state.handle(MapEvent::MarkerClicked(b));
        assert_eq!(state, PopupState::Open(b));

        assert_eq!(state.handle(MapEvent::PopupClosed), PopupState::Idle);
        assert_eq!(state.handle(MapEvent::ClickedOutside), PopupState::Idle);
    }
}

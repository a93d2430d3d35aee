use super::EventKind;

/// Where an event firing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Replayed locally right after the input that caused it.
    Predicted,
    /// Delivered by a server snapshot.
    Authoritative,
}

impl Origin {
    pub fn is_predicted(self) -> bool {
        self == Self::Predicted
    }
}

/// Decides whether an event about `subject` runs on this firing. A
/// predictable event about the viewer runs from exactly one timeline: the
/// predicted replay when prediction is on, the snapshot otherwise.
pub fn should_fire(kind: EventKind, subject_is_viewer: bool, origin: Origin, prediction: bool) -> bool {
    !(subject_is_viewer && kind.is_predictable() && origin.is_predicted() != prediction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firings(kind: EventKind, viewer: bool, prediction: bool) -> usize {
        [Origin::Predicted, Origin::Authoritative]
            .into_iter()
            .filter(|origin| {
                // Only the local player's events are ever replayed.
                (viewer || *origin == Origin::Authoritative)
                    && should_fire(kind, viewer, *origin, prediction)
            })
            .count()
    }

    #[test]
    fn viewer_predictable_fires_once() {
        for prediction in [true, false] {
            assert_eq!(firings(EventKind::FireWeapon, true, prediction), 1);
            assert_eq!(firings(EventKind::Jump, true, prediction), 1);
        }
    }

    #[test]
    fn prediction_picks_the_timeline() {
        assert!(should_fire(EventKind::Dash, true, Origin::Predicted, true));
        assert!(!should_fire(EventKind::Dash, true, Origin::Authoritative, true));
        assert!(should_fire(EventKind::Dash, true, Origin::Authoritative, false));
        assert!(!should_fire(EventKind::Dash, true, Origin::Predicted, false));
    }

    #[test]
    fn others_and_authoritative_kinds_always_fire() {
        assert!(should_fire(EventKind::FireWeapon, false, Origin::Authoritative, true));
        assert!(should_fire(EventKind::Pain, true, Origin::Authoritative, true));
        assert_eq!(firings(EventKind::Die, true, true), 2);
    }
}

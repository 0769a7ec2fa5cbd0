//! Store modal state: closed, waiting for resolved info, or showing it.

use crate::models::{Pin, ResolvedStoreInfo, Store};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Loading {
        pin_id: String,
        ticket: u64,
    },
    Open {
        pin_id: String,
        info: ResolvedStoreInfo,
    },
}

/// Store modal lifecycle. Each open request is tagged with a ticket so
/// a slow response for an earlier pin cannot overwrite a later one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalController {
    state: ModalState,
    next_ticket: u64,
}

impl ModalController {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    /// Start loading info for `pin`. Returns the ticket to resolve with, or
    /// `None` when the pin's store is unknown (nothing to fetch).
    pub fn open(&mut self, pin: &Pin, stores: &[Store]) -> Option<u64> {
        if !stores.iter().any(|s| s.id == pin.store_id) {
            return None;
        }
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.state = ModalState::Loading {
            pin_id: pin.id.clone(),
            ticket,
        };
        Some(ticket)
    }

    /// Deliver a response. Returns false when the ticket is stale and the
    /// response was dropped. A missing record closes the modal.
    pub fn resolve(&mut self, ticket: u64, info: Option<ResolvedStoreInfo>) -> bool {
        let pin_id = match &self.state {
            ModalState::Loading { pin_id, ticket: t } if *t == ticket => pin_id.clone(),
            _ => return false,
        };
        self.state = match info {
            Some(info) => ModalState::Open { pin_id, info },
            None => ModalState::Closed,
        };
        true
    }

    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Vec<Pin>, Vec<Store>) {
        let stores = vec![Store::placeholder("s1".into())];
        let pins = vec![
            Pin::new("p1".into(), "s1".into(), 10.0, 10.0),
            Pin::new("p2".into(), "s1".into(), 20.0, 20.0),
            Pin::new("p3".into(), "missing".into(), 30.0, 30.0),
        ];
        (pins, stores)
    }

    fn info(name: &str) -> ResolvedStoreInfo {
        ResolvedStoreInfo {
            store_id: "s1".into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_then_resolve() {
        let (pins, stores) = fixtures();
        let mut modal = ModalController::default();
        let ticket = modal.open(&pins[0], &stores).unwrap();
        assert!(matches!(modal.state(), ModalState::Loading { .. }));
        assert!(modal.resolve(ticket, Some(info("A"))));
        match modal.state() {
            ModalState::Open { pin_id, info } => {
                assert_eq!(pin_id, "p1");
                assert_eq!(info.name, "A");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_unknown_store_does_not_open() {
        let (pins, stores) = fixtures();
        let mut modal = ModalController::default();
        assert!(modal.open(&pins[2], &stores).is_none());
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (pins, stores) = fixtures();
        let mut modal = ModalController::default();
        let first = modal.open(&pins[0], &stores).unwrap();
        let second = modal.open(&pins[1], &stores).unwrap();
        assert!(!modal.resolve(first, Some(info("old"))));
        assert!(modal.resolve(second, Some(info("new"))));
        match modal.state() {
            ModalState::Open { pin_id, info } => {
                assert_eq!(pin_id, "p2");
                assert_eq!(info.name, "new");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_response_after_close_is_discarded() {
        let (pins, stores) = fixtures();
        let mut modal = ModalController::default();
        let ticket = modal.open(&pins[0], &stores).unwrap();
        modal.close();
        assert!(!modal.resolve(ticket, Some(info("late"))));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_missing_info_closes() {
        let (pins, stores) = fixtures();
        let mut modal = ModalController::default();
        let ticket = modal.open(&pins[0], &stores).unwrap();
        assert!(modal.resolve(ticket, None));
        assert!(!modal.is_open());
    }
}

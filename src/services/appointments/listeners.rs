use crate::models::appointment::Appointments;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Appointments)>;

/// Synchronous change listeners, called in subscription order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, appointments: &Appointments) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(appointments);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

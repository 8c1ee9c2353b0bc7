// 👤 Person Entity - guest account with balance and booked stays
//
// A person never owns a reservation. It keeps the ids and the HotelGraph
// resolves them to the instance owned by the room.

use std::collections::BTreeSet;

use super::reservation::ReservationId;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    name: String,
    email: Option<String>,
    balance: f64,
    reservations: BTreeSet<ReservationId>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            email: None,
            balance: 0.0,
            reservations: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Add to the balance. Deltas are trusted as given.
    pub fn add_balance(&mut self, amount: f64) {
        self.balance += amount;
    }

    /// Remember a reservation made by this person
    pub fn add_reservation(&mut self, id: ReservationId) {
        self.reservations.insert(id);
    }

    pub fn reservations(&self) -> &BTreeSet<ReservationId> {
        &self.reservations
    }

    pub fn has_reservation(&self, id: ReservationId) -> bool {
        self.reservations.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person_starts_empty() {
        let person = Person::new("Ola Nordmann");
        assert_eq!(person.name(), "Ola Nordmann");
        assert_eq!(person.email(), None);
        assert_eq!(person.balance(), 0.0);
        assert!(person.reservations().is_empty());
    }

    #[test]
    fn test_balance_accumulates() {
        let mut person = Person::new("Kari");
        person.add_balance(150.5);
        person.add_balance(49.5);
        assert_eq!(person.balance(), 200.0);
    }

    #[test]
    fn test_reservation_ids_collapse() {
        let mut person = Person::new("Kari");
        person.set_email("kari@example.com");
        person.add_reservation(ReservationId(3));
        person.add_reservation(ReservationId(3));

        assert_eq!(person.email(), Some("kari@example.com"));
        assert_eq!(person.reservations().len(), 1);
        assert!(person.has_reservation(ReservationId(3)));
    }
}

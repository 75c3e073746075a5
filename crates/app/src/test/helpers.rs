//! Test Helpers

use fishery::{
    actors::{Actor, Role},
    ids::UserId,
    registrations::RegistrationDetails,
};

fn actor(id: &str, name: &str, role: Role) -> Actor {
    Actor {
        user_id: UserId::new(id),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        role,
    }
}

pub(crate) fn owner() -> Actor {
    actor("owner-1", "Maria Santos", Role::Fisherfolk)
}

pub(crate) fn other_owner() -> Actor {
    actor("owner-2", "Jose Rizal", Role::Fisherfolk)
}

pub(crate) fn mao() -> Actor {
    actor("mao-1", "MAO Officer", Role::Mao)
}

pub(crate) fn mto() -> Actor {
    actor("mto-1", "MTO Cashier", Role::Mto)
}

pub(crate) fn inspector() -> Actor {
    actor("insp-1", "Inspector Cruz", Role::Inspector)
}

pub(crate) fn details() -> RegistrationDetails {
    RegistrationDetails {
        details: "name: Bangka Uno; length: 8m; engine: 16hp".to_string(),
        profile: "municipal fisher".to_string(),
        contact: "0917 555 0101".to_string(),
        address: "Brgy. Poblacion".to_string(),
        photos: vec![],
    }
}

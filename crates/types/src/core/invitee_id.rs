// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::id_newtype! {
    /// The opaque id of an invitee inside the identity directory
    InviteeId(String)
}

impl InviteeId {
    /// Generate a fresh, random invitee id
    ///
    /// The id is a hyphenated UUIDv4, which fits the 36 character limit of the directory.
    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = InviteeId::generate();
        let b = InviteeId::generate();

        assert_ne!(a, b);
        assert_eq!(a.inner().len(), 36);
    }
}

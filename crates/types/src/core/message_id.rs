// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use uuid::Uuid;

crate::id_newtype! {
    /// Tags a single outgoing message so repeated dispatches can be told apart in provider logs
    #[derive(Copy)]
    MessageId(uuid::Uuid)
}

impl MessageId {
    /// Generate a fresh message id
    pub fn generate() -> Self {
        Self::from(Uuid::new_v4())
    }
}

// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::id_newtype! {
    /// The id of an event, owned by the event management collaborator
    EventId(String)
}

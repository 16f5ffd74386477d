// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::id_newtype! {
    /// The id the RSVP store assigned to an appended response
    RsvpId(String)
}

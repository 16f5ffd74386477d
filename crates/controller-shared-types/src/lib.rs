// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Shared types and trait definitions for the eventify controller.
//!
//! Holds the settings and the capability interfaces of the external
//! collaborators, so collaborator implementations and test doubles do not need
//! to depend on the controller itself.

pub mod capabilities;
pub mod settings;

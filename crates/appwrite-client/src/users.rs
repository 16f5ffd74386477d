// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{query_params, Result};
use crate::{AppwriteClient, Query};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUser<'s> {
    user_id: &'s str,
    email: &'s str,
    phone: &'s str,
}

#[derive(Deserialize)]
struct UserList {
    users: Vec<User>,
}

impl AppwriteClient {
    /// Create a new user with the given id, email and phone number
    ///
    /// Appwrite rejects duplicates of any of the three fields with `409 Conflict`
    pub async fn create_user(&self, user_id: &str, email: &str, phone: &str) -> Result<User> {
        let url = self.url(["users"])?;

        let body = CreateUser {
            user_id,
            email,
            phone,
        };

        let response = self
            .send_authorized(move |c| c.post(url).json(&body))
            .await?;

        Ok(response.json().await?)
    }

    /// List users, optionally filtered by queries
    pub async fn list_users(&self, queries: &[Query]) -> Result<Vec<User>> {
        let url = self.url(["users"])?;

        let params = query_params(queries);

        let response = self
            .send_authorized(move |c| c.get(url).query(&params))
            .await?;

        let list: UserList = response.json().await?;

        Ok(list.users)
    }

    /// Get the first user whose email and phone number both match exactly
    pub async fn find_user_by_contact(&self, email: &str, phone: &str) -> Result<Option<User>> {
        let queries = [
            Query::equal("email", email),
            Query::equal("phone", phone),
            Query::limit(1),
        ];

        let users = self.list_users(&queries).await?;

        // The server side filter is authoritative, but keep the match exact
        Ok(users
            .into_iter()
            .find(|user| user.email == email && user.phone == phone))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn user_from_api_json() {
        let user: User = serde_json::from_str(
            r#"{
                "$id": "5e5ea5c16897e",
                "$createdAt": "2020-10-15T06:38:00.000+00:00",
                "name": "",
                "registration": "2020-10-15T06:38:00.000+00:00",
                "status": true,
                "email": "a@b.com",
                "phone": "+15551234567",
                "emailVerification": false,
                "phoneVerification": false
            }"#,
        )
        .unwrap();

        assert_eq!(user.id, "5e5ea5c16897e");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.phone, "+15551234567");
    }

    #[test]
    fn create_body() {
        let body = CreateUser {
            user_id: "id",
            email: "a@b.com",
            phone: "+1555",
        };

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"userId": "id", "email": "a@b.com", "phone": "+1555"})
        );
    }
}

//! The mock-authenticated user record.

use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// A storefront user.
///
/// Fabricated by mock login/register - there is no credential store behind
/// it. Exactly these three fields persist as the `moto-shop-user` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_shape() {
        let user = User {
            id: UserId::new("k3j9x2m1q"),
            name: "rider".to_owned(),
            email: Email::parse("rider@example.com").unwrap(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "k3j9x2m1q",
                "name": "rider",
                "email": "rider@example.com"
            })
        );
    }
}

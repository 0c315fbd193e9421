use serde::Deserialize;

use crate::web::session::UserType;

const MAX_EMAIL_LEN: usize = 254;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub csrf_token: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
    pub password: String,
}

impl LoginData {
    pub fn validate(&self) -> bool {
        let email = self.email.trim();
        if email.is_empty() || email.len() > MAX_EMAIL_LEN {
            return false;
        }

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return false,
        }

        !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(email: &str, password: &str) -> LoginData {
        LoginData {
            csrf_token: "token".to_string(),
            user_type: UserType::Employee,
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn validate_accepts_email_and_password() {
        assert!(data("a@a", "azerty").validate());
        assert!(data(" employee@test.tld ", "x").validate());
    }

    #[test]
    fn validate_rejects_bad_input() {
        assert!(!data("", "azerty").validate());
        assert!(!data("no-at-sign", "azerty").validate());
        assert!(!data("@a", "azerty").validate());
        assert!(!data("a@", "azerty").validate());
        assert!(!data("a@a", "").validate());
        assert!(!data(&format!("{}@a", "x".repeat(MAX_EMAIL_LEN)), "azerty").validate());
    }
}

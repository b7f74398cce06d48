//! Authentication DTOs.
//!
//! Field names on the wire are camelCase (`usernameOrEmail`, `fullName`) and
//! the id field is spelled `userID`, matching the API's published contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use authgate_core::serde::deserialize_blank_as_none;

/// Registration request.
///
/// A blank `email` is treated as absent.
#[derive(Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "Secr3t!")]
    pub password: String,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    #[serde(rename = "userID")]
    #[schema(example = 1)]
    pub user_id: i64,
}

/// Login request; the identifier may be a username or an email address.
#[derive(Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "usernameOrEmail is required"))]
    #[schema(example = "alice")]
    pub username_or_email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "Secr3t!")]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username_or_email", &self.username_or_email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProtectedResponse {
    #[schema(example = "Protected endpoint accessed!")]
    pub message: String,
    #[serde(rename = "userID")]
    #[schema(example = 1)]
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid credentials")]
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(json: &str) -> RegisterRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_register_request_camel_case() {
        let request = register(
            r#"{"username":"alice","password":"Secr3t!","email":"a@x.com","fullName":"Alice A"}"#,
        );

        assert_eq!(request.username, "alice");
        assert_eq!(request.email.as_deref(), Some("a@x.com"));
        assert_eq!(request.full_name.as_deref(), Some("Alice A"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_optional_fields() {
        let request = register(r#"{"username":"bob","password":"pw","email":""}"#);

        assert!(request.email.is_none());
        assert!(request.full_name.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_invalid_email() {
        let request = register(r#"{"username":"bob","password":"pw","email":"not-an-email"}"#);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_empty_password() {
        let request = register(r#"{"username":"bob","password":""}"#);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_missing_username() {
        let result = serde_json::from_str::<RegisterRequest>(r#"{"password":"pw"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_request_field_names() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"usernameOrEmail":"a@x.com","password":"pw"}"#).unwrap();

        assert_eq!(request.username_or_email, "a@x.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_request_empty_identifier() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"usernameOrEmail":"","password":"pw"}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_debug_hides_passwords() {
        let request = register(r#"{"username":"alice","password":"Secr3t!"}"#);
        assert!(!format!("{:?}", request).contains("Secr3t!"));

        let login: LoginRequest =
            serde_json::from_str(r#"{"usernameOrEmail":"alice","password":"Secr3t!"}"#).unwrap();
        assert!(!format!("{:?}", login).contains("Secr3t!"));
    }

    #[test]
    fn test_responses_use_user_id_key() {
        let json = serde_json::to_string(&RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: 1,
        })
        .unwrap();
        assert!(json.contains(r#""userID":1"#));

        let json = serde_json::to_string(&ProtectedResponse {
            message: "Protected endpoint accessed!".to_string(),
            user_id: 1,
        })
        .unwrap();
        assert!(json.contains(r#""userID":1"#));
    }
}

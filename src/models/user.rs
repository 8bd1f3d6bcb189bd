use serde::{Deserialize, Serialize};

/// Role reported for the logged-in user
///
/// Drives which workflow actions the client offers; the backend re-checks
/// every call regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Librarian,
    Reviewer,
    Member,
}

impl Role {
    /// Display label (matches the original UI wording)
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Quản Trị Viên",
            Role::Librarian => "Thủ Thư",
            Role::Reviewer => "Người Thẩm Định",
            Role::Member => "Người Dùng",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Logged-in user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    /// Cohort / class label ("class" on the wire)
    #[serde(default)]
    pub class_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Member
}

/// Login request body
///
/// The backend accepts exactly one credential shape: email + password.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Generic `{ success, message, data }` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Payload of a successful login / registration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(rename = "class", default)]
    pub class_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

impl AuthPayload {
    pub fn into_user(self) -> User {
        User {
            id: self.user_id,
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            class_name: self.class_name,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_payload_wire_shape() {
        let json = r#"{
            "accessToken": "tok-123",
            "userId": "6",
            "name": "Nguyen Van A",
            "email": "a@uni.edu.vn",
            "phoneNumber": "0900000000",
            "class": "K66-CS"
        }"#;
        let payload: AuthPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.access_token, "tok-123");
        assert_eq!(payload.class_name, "K66-CS");
        // role defaults when the backend omits it
        assert_eq!(payload.role, Role::Member);
    }

    #[test]
    fn test_envelope_without_data() {
        let json = r#"{ "success": false, "message": "Sai mật khẩu" }"#;
        let envelope: ApiEnvelope<AuthPayload> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message, "Sai mật khẩu");
    }
}

//! Account and authentication contracts.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};
use crate::tokens::{AccessToken, RefreshToken, TokenPair};

/// Role of an account on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Producer,
    Staff,
    Dev,
}

impl UserRole {
    /// Landing path for this role after a successful login.
    pub fn home_path(&self) -> &'static str {
        match self {
            UserRole::Customer => "/dashboard/customer",
            UserRole::Producer => "/dashboard/producer",
            UserRole::Staff => "/dashboard/staff",
            UserRole::Dev => "/dashboard/dev",
        }
    }
}

/// Supported countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "CL")]
    Chile,
    #[serde(rename = "AR")]
    Argentina,
}

/// Identity document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    Rut,
    Dni,
    Passport,
}

impl Country {
    /// ISO 3166-1 alpha-2 code.
    pub fn code(&self) -> &'static str {
        match self {
            Country::Chile => "CL",
            Country::Argentina => "AR",
        }
    }
}

impl FromStr for Country {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CL" => Ok(Country::Chile),
            "AR" => Ok(Country::Argentina),
            _ => Err(InvalidInputError::Field {
                field: "country",
                reason: format!("'{}' is not one of CL, AR", s),
            }
            .into()),
        }
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RUT" => Ok(DocumentType::Rut),
            "DNI" => Ok(DocumentType::Dni),
            "PASSPORT" => Ok(DocumentType::Passport),
            _ => Err(InvalidInputError::Field {
                field: "document type",
                reason: format!("'{}' is not one of RUT, DNI, PASSPORT", s),
            }
            .into()),
        }
    }
}

/// An account as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, alias = "documentId", skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// First and last name joined.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub country: Country,
    pub date_of_birth: NaiveDate,
}

/// Body for `POST /auth/google`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest<'a> {
    pub id_token: &'a str,
}

/// Body for `POST /auth/refresh`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from login, registration and Google login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
}

impl AuthResponse {
    /// The issued credential pair.
    pub fn token_pair(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

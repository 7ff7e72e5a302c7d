//! Request and response shapes shared by the resolver and the HTTP handlers

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Partial key set accepted by every endpoint. Each field is optional here;
/// the single-purpose operations decide which ones they require.
///
/// Both the upper snake case keys and their camelCase aliases are accepted.
/// When a body carries both spellings of one field the upper snake case key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "WireQuery")]
pub struct AuthorizationQuery {
    pub admin_email: Option<String>,
    pub app_id: Option<i64>,
    pub employee_code: Option<String>,
}

impl AuthorizationQuery {
    /// Admin email, treating an empty string as absent
    pub fn admin_email(&self) -> Option<&str> {
        self.admin_email.as_deref().filter(|email| !email.is_empty())
    }

    /// App id. Falsy JSON values were already dropped while parsing.
    pub fn app_id(&self) -> Option<i64> {
        self.app_id
    }

    /// Employee code, treating an empty string as absent
    pub fn employee_code(&self) -> Option<&str> {
        self.employee_code.as_deref().filter(|code| !code.is_empty())
    }
}

#[derive(Deserialize)]
struct WireQuery {
    #[serde(rename = "ADMIN_EMAIL", default)]
    admin_email: Option<String>,
    #[serde(rename = "adminEmail", default)]
    admin_email_alias: Option<String>,

    #[serde(rename = "APP_ID", default, deserialize_with = "deserialize_app_id")]
    app_id: Option<i64>,
    #[serde(rename = "appId", default, deserialize_with = "deserialize_app_id")]
    app_id_alias: Option<i64>,

    #[serde(rename = "EMPLOYEE_CODE", default)]
    employee_code: Option<String>,
    #[serde(rename = "employeeCode", default)]
    employee_code_alias: Option<String>,
}

impl From<WireQuery> for AuthorizationQuery {
    fn from(wire: WireQuery) -> Self {
        Self {
            admin_email: wire.admin_email.or(wire.admin_email_alias),
            app_id: wire.app_id.or(wire.app_id_alias),
            employee_code: wire.employee_code.or(wire.employee_code_alias),
        }
    }
}

/// APP_ID arrives as a JSON integer, an integral float or a numeric string.
///
/// `null`, `false`, the number `0` and an empty string mean "not supplied".
/// A string `"0"` is a supplied id and still runs its lookup.
fn deserialize_app_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AppIdVisitor)
}

struct AppIdVisitor;

impl<'de> Visitor<'de> for AppIdVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("APP_ID as an integer or numeric string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AppIdVisitor)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        if value {
            Err(E::custom("APP_ID must be an integer, got true"))
        } else {
            Ok(None)
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value).filter(|id| *id != 0))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        let id = i64::try_from(value).map_err(|_| E::custom(format!("APP_ID {} is out of range", value)))?;
        self.visit_i64(id)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if value.fract() != 0.0 || !value.is_finite() || value.abs() >= i64::MAX as f64 {
            return Err(E::custom(format!("APP_ID must be an integer, got {}", value)));
        }
        self.visit_i64(value as i64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| E::custom(format!("APP_ID must be an integer, got {:?}", value)))
    }
}

/// Body of `/check_admin`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminCheck {
    pub admin: bool,
}

/// Body of `/check_admin_type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStatus {
    pub admin: bool,
    pub admin_type: Option<String>,
}

impl AdminStatus {
    pub fn not_admin() -> Self {
        Self {
            admin: false,
            admin_type: None,
        }
    }
}

/// Body of `/get_app_security_level`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSecurityLevel {
    #[serde(rename = "App_Security_level")]
    pub level: String,
}

/// Body of `/get_employee_security_level`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSecurityLevel {
    #[serde(rename = "TITLE_GROUP_SECURITY_LEVEL")]
    pub level: String,
}

/// Combined lookup result.
///
/// Outer `None` means the key was not requested and is omitted from the JSON.
/// `Some(None)` means it was requested but nothing was found and renders as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorizationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,

    #[serde(rename = "App_Security_level", skip_serializing_if = "Option::is_none")]
    pub app_security_level: Option<Option<String>>,

    #[serde(rename = "TITLE_GROUP_SECURITY_LEVEL", skip_serializing_if = "Option::is_none")]
    pub employee_security_level: Option<Option<String>>,
}

impl AuthorizationResult {
    /// Number of keys that will appear in the rendered map
    pub fn len(&self) -> usize {
        [
            self.admin.is_some(),
            self.app_security_level.is_some(),
            self.employee_security_level.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Role-specific profiles attached 1:1 to a user, plus the patch and diff
//! machinery used by administrative edits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::User;
use crate::config::{BIRTH_DATE_FORMAT, DEFAULT_PLAN, MSG_INVALID_DATE, NO_CHANGES_DETECTED};
use crate::errors::{AppError, AppResult};

/// Explorer detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerProfile {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "primer_nombre")]
    pub first_name: String,
    #[serde(rename = "segundo_nombre")]
    pub second_name: String,
    #[serde(rename = "primer_apellido")]
    pub first_surname: String,
    #[serde(rename = "segundo_apellido")]
    pub second_surname: String,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "preferencias")]
    pub preference: String,
}

impl ExplorerProfile {
    /// "<first name> <first surname>", as shown in audit details.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.first_surname)
    }

    /// Mutable fields in audit order.
    pub fn tracked_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("primer_nombre", self.first_name.clone()),
            ("segundo_nombre", self.second_name.clone()),
            ("primer_apellido", self.first_surname.clone()),
            ("segundo_apellido", self.second_surname.clone()),
            ("telefono", self.phone.clone()),
            ("fecha_nacimiento", format_date(self.birth_date)),
        ]
    }
}

/// Entrepreneur detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrepreneurProfile {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "primer_nombre")]
    pub first_name: String,
    #[serde(rename = "segundo_nombre")]
    pub second_name: String,
    #[serde(rename = "primer_apellido")]
    pub first_surname: String,
    #[serde(rename = "segundo_apellido")]
    pub second_surname: String,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "nombre_emprendimiento")]
    pub business_name: String,
    #[serde(rename = "nit")]
    pub tax_id: String,
    #[serde(rename = "clasificacion")]
    pub category: String,
    #[serde(rename = "zona")]
    pub zone: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
    pub plan: String,
}

impl EntrepreneurProfile {
    /// Mutable fields in audit order.
    pub fn tracked_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("nombre_emprendimiento", self.business_name.clone()),
            ("nit", self.tax_id.clone()),
            ("zona", self.zone.clone()),
            ("ubicacion", self.location.clone()),
            ("plan", self.plan.clone()),
            ("clasificacion", self.category.clone()),
        ]
    }
}

/// What a user owns besides credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tipo", content = "datos")]
pub enum Profile {
    #[serde(rename = "Explorador")]
    Explorer(ExplorerProfile),
    #[serde(rename = "Emprendedor")]
    Entrepreneur(EntrepreneurProfile),
    #[serde(rename = "Administrador")]
    Administrator,
    /// Unrecognized role, or a row whose profile is missing.
    #[serde(rename = "Ninguno")]
    Unassigned,
}

/// A user together with their profile.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub user: User,
    pub profile: Profile,
}

// =============================================================================
// Creation inputs
// =============================================================================

/// Personal fields shared by both profile kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalDetails {
    pub first_name: String,
    pub second_name: String,
    pub first_surname: String,
    pub second_surname: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewExplorer {
    pub personal: PersonalDetails,
    pub preference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntrepreneur {
    pub personal: PersonalDetails,
    pub business_name: String,
    pub tax_id: String,
    pub category: String,
    pub location: String,
    pub zone: String,
}

// =============================================================================
// Patches
// =============================================================================

/// Administrative edit of an explorer. `None` keeps the stored value,
/// `Some("")` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorerPatch {
    #[serde(rename = "primer_nombre")]
    pub first_name: Option<String>,
    #[serde(rename = "segundo_nombre")]
    pub second_name: Option<String>,
    #[serde(rename = "primer_apellido")]
    pub first_surname: Option<String>,
    #[serde(rename = "segundo_apellido")]
    pub second_surname: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    /// Raw "YYYY-MM-DD"; blank is treated as absent.
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<String>,
}

impl ExplorerPatch {
    /// Apply onto `profile`. The date is parsed before anything is touched,
    /// so a bad date leaves the profile unchanged.
    pub fn apply(&self, profile: &mut ExplorerProfile) -> AppResult<()> {
        let birth_date = match self.birth_date.as_deref() {
            Some(raw) => parse_birth_date(raw)?,
            None => None,
        };

        assign(&mut profile.first_name, &self.first_name);
        assign(&mut profile.second_name, &self.second_name);
        assign(&mut profile.first_surname, &self.first_surname);
        assign(&mut profile.second_surname, &self.second_surname);
        assign(&mut profile.phone, &self.phone);
        if birth_date.is_some() {
            profile.birth_date = birth_date;
        }
        Ok(())
    }
}

/// Administrative edit of an entrepreneur.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntrepreneurPatch {
    #[serde(rename = "nombre_emprendimiento")]
    pub business_name: Option<String>,
    #[serde(rename = "nit")]
    pub tax_id: Option<String>,
    #[serde(rename = "zona")]
    pub zone: Option<String>,
    #[serde(rename = "ubicacion")]
    pub location: Option<String>,
    pub plan: Option<String>,
    #[serde(rename = "clasificacion")]
    pub category: Option<String>,
}

impl EntrepreneurPatch {
    pub fn apply(&self, profile: &mut EntrepreneurProfile) -> AppResult<()> {
        assign(&mut profile.business_name, &self.business_name);
        assign(&mut profile.tax_id, &self.tax_id);
        assign(&mut profile.zone, &self.zone);
        assign(&mut profile.location, &self.location);
        assign(&mut profile.plan, &self.plan);
        assign(&mut profile.category, &self.category);
        Ok(())
    }
}

fn assign(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}

// =============================================================================
// Dates and diffs
// =============================================================================

/// Parse a birth date in strict `YYYY-MM-DD` form. Blank input means "no
/// date".
pub fn parse_birth_date(raw: &str) -> AppResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT)
        .map(Some)
        .map_err(|_| AppError::validation(MSG_INVALID_DATE))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(BIRTH_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Normalize a stored plan onto the fixed plan set; blanks become the
/// default plan.
pub fn plan_or_default(plan: &str) -> &str {
    if plan.trim().is_empty() {
        DEFAULT_PLAN
    } else {
        plan
    }
}

/// One field that differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub before: String,
    pub after: String,
}

impl std::fmt::Display for FieldChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}' → '{}'", self.field, self.before, self.after)
    }
}

/// Compare two snapshots produced by `tracked_fields`, keeping field order.
pub fn diff_fields(
    before: &[(&'static str, String)],
    after: &[(&'static str, String)],
) -> Vec<FieldChange> {
    before
        .iter()
        .zip(after)
        .filter(|((_, old), (_, new))| old != new)
        .map(|((field, old), (_, new))| FieldChange {
            field,
            before: old.clone(),
            after: new.clone(),
        })
        .collect()
}

/// Render changes as `a: 'x' → 'y', b: ...` or the no-change marker.
pub fn describe_changes(changes: &[FieldChange]) -> String {
    if changes.is_empty() {
        return NO_CHANGES_DETECTED.to_string();
    }
    changes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

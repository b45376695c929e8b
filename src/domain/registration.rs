//! Sign-up form data.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use super::profile::{NewEntrepreneur, NewExplorer, PersonalDetails};
use super::user::UserRole;
use crate::config::DEFAULT_ROLE;

/// Everything the registration form can submit. Role-specific fields are
/// optional; only the ones matching `role` are used.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct Registration {
    #[serde(default)]
    #[validate(length(min = 1, message = "El nombre de usuario es obligatorio"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "El correo es obligatorio"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, rename = "fecha_nacimiento")]
    pub birth_date: String,

    // Explorer fields
    #[serde(default, rename = "primer_nombre")]
    pub first_name: String,
    #[serde(default, rename = "segundo_nombre")]
    pub second_name: String,
    #[serde(default, rename = "primer_apellido")]
    pub first_surname: String,
    #[serde(default, rename = "segundo_apellido")]
    pub second_surname: String,
    #[serde(default, rename = "telefono")]
    pub phone: String,
    #[serde(default, rename = "preferencias")]
    pub preference: String,

    // Entrepreneur fields
    #[serde(default, rename = "primer_nombre_emp")]
    pub owner_first_name: String,
    #[serde(default, rename = "segundo_nombre_emp")]
    pub owner_second_name: String,
    #[serde(default, rename = "primer_apellido_emp")]
    pub owner_first_surname: String,
    #[serde(default, rename = "segundo_apellido_emp")]
    pub owner_second_surname: String,
    #[serde(default, rename = "telefono_emp")]
    pub owner_phone: String,
    #[serde(default, rename = "nombre_emprendimiento")]
    pub business_name: String,
    #[serde(default, rename = "nit")]
    pub tax_id: String,
    #[serde(default, rename = "clasificacion")]
    pub category: String,
    #[serde(default, rename = "ubicacion")]
    pub location: String,
    #[serde(default, rename = "zona")]
    pub zone: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Registration {
    /// Trim surrounding whitespace from every field except the password.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.username,
            &mut self.email,
            &mut self.birth_date,
            &mut self.first_name,
            &mut self.second_name,
            &mut self.first_surname,
            &mut self.second_surname,
            &mut self.phone,
            &mut self.preference,
            &mut self.owner_first_name,
            &mut self.owner_second_name,
            &mut self.owner_first_surname,
            &mut self.owner_second_surname,
            &mut self.owner_phone,
            &mut self.business_name,
            &mut self.tax_id,
            &mut self.category,
            &mut self.location,
            &mut self.zone,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
        self
    }

    pub fn role(&self) -> UserRole {
        UserRole::from(self.role.as_str())
    }

    pub fn explorer(&self, birth_date: Option<NaiveDate>) -> NewExplorer {
        NewExplorer {
            personal: PersonalDetails {
                first_name: self.first_name.clone(),
                second_name: self.second_name.clone(),
                first_surname: self.first_surname.clone(),
                second_surname: self.second_surname.clone(),
                birth_date,
                phone: self.phone.clone(),
            },
            preference: self.preference.clone(),
        }
    }

    pub fn entrepreneur(&self, birth_date: Option<NaiveDate>) -> NewEntrepreneur {
        NewEntrepreneur {
            personal: PersonalDetails {
                first_name: self.owner_first_name.clone(),
                second_name: self.owner_second_name.clone(),
                first_surname: self.owner_first_surname.clone(),
                second_surname: self.owner_second_surname.clone(),
                birth_date,
                phone: self.owner_phone.clone(),
            },
            business_name: self.business_name.clone(),
            tax_id: self.tax_id.clone(),
            category: self.category.clone(),
            location: self.location.clone(),
            zone: self.zone.clone(),
        }
    }
}

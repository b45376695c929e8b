//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// User Roles
// =============================================================================

/// Role tag for end users browsing businesses
pub const ROLE_EXPLORER: &str = "Explorador";

/// Role tag for business owners
pub const ROLE_ENTREPRENEUR: &str = "Emprendedor";

/// Role tag for moderators
pub const ROLE_ADMIN: &str = "Administrador";

/// Role assigned when the registration form omits one
pub const DEFAULT_ROLE: &str = ROLE_EXPLORER;

// =============================================================================
// Routes
// =============================================================================

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin_dashboard";
pub const ENTREPRENEUR_DASHBOARD_PATH: &str = "/emprendedor_dashboard";
pub const EXPLORER_DASHBOARD_PATH: &str = "/explorador_dashboard";

// =============================================================================
// Sessions
// =============================================================================

/// Cookie carrying the opaque session token
pub const SESSION_COOKIE_NAME: &str = "chia_session";

/// Default session lifetime in seconds (24 hours)
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Session keys
pub mod session_keys {
    /// Signed-in identity
    pub const USER: &str = "user";

    /// Pending flash messages
    pub const FLASHES: &str = "flashes";
}

/// Default directory for the file-backed session store
pub const DEFAULT_SESSION_DIR: &str = ".sessions";

/// Cache key prefix for session data
pub const CACHE_PREFIX_SESSION: &str = "session:";

// =============================================================================
// Profiles
// =============================================================================

/// Birth dates are accepted only in this layout
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Plan assigned to new entrepreneurs
pub const DEFAULT_PLAN: &str = "Sin Plan";

/// Plans offered to entrepreneurs, in dashboard order
pub const PLAN_LABELS: [&str; 4] = [DEFAULT_PLAN, "Valvanera", "Castillo Marroquin", "Diosa chia"];

/// Explorer preference categories, in dashboard order
pub const PREFERENCE_LABELS: [&str; 6] = [
    "Comida",
    "Hospedaje",
    "Ocio",
    "Arte y Cultura",
    "Naturaleza",
    "Compras",
];

// =============================================================================
// Audit Log
// =============================================================================

pub const ACTION_CREATION: &str = "Creación";
pub const ACTION_EDIT: &str = "Edición";
pub const ACTION_DELETION: &str = "Eliminación";

/// Action fragments counted on the admin dashboard (substring match)
pub const ACTION_LABELS: [&str; 3] = [ACTION_CREATION, ACTION_EDIT, ACTION_DELETION];

pub const ENTITY_USER: &str = "Usuario";
pub const ENTITY_EXPLORER: &str = "Explorador";
pub const ENTITY_ENTREPRENEUR: &str = "Emprendedor";

/// Audit detail used when an edit leaves every field untouched
pub const NO_CHANGES_DETECTED: &str = "Sin cambios detectados";

// =============================================================================
// User-facing messages
// =============================================================================

pub const MSG_DUPLICATE_ACCOUNT: &str = "Usuario o correo ya registrado";
pub const MSG_DUPLICATE_TAX_ID: &str = "El NIT ya está registrado";
pub const MSG_BUSINESS_REQUIRED: &str = "El nombre del emprendimiento y el NIT son obligatorios";
pub const MSG_INVALID_DATE: &str = "Formato de fecha inválido. Usa AAAA-MM-DD.";
pub const MSG_REGISTERED: &str = "Registro exitoso. Ya puedes iniciar sesión.";
pub const MSG_LOGGED_OUT: &str = "Has cerrado sesión";
pub const MSG_ENTREPRENEUR_DELETED: &str = "Emprendimiento eliminado completamente.";
pub const MSG_EXPLORER_DELETED: &str = "Explorador eliminado completamente.";
pub const MSG_ENTREPRENEUR_UPDATED: &str = "Información actualizada correctamente.";
pub const MSG_EXPLORER_UPDATED: &str = "Explorador actualizado correctamente.";
pub const MSG_UPDATE_FAILED: &str = "Error al actualizar la información.";
pub const MSG_REGISTRATION_FAILED: &str = "No fue posible completar el registro.";
pub const MSG_ADMIN_EXISTS: &str = "El administrador ya existe";
pub const MSG_ADMIN_CREATED: &str = "Usuario administrador creado correctamente";
pub const MSG_NOT_AUTHORIZED: &str = "Acceso no autorizado";

// =============================================================================
// Administrator bootstrap
// =============================================================================

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@myiana.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://chia.db?mode=rwc";

/// Upper bound on pooled database connections
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// Cache (Redis)
// =============================================================================

/// Default Redis URL (for development)
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 1;
